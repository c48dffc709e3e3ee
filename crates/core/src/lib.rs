//! Core types, validation, and pagination for the Glint collector.

pub mod error;
pub mod events;
pub mod pagination;
pub mod session;

pub use error::{Error, Result};
pub use events::*;
pub use pagination::*;
pub use session::*;
