//! Utility Module
//!
//! Error types, logging setup and input validation helpers.

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{ApiStatus, AppError, AppResult};
pub use logger::init_logger_with_file;
