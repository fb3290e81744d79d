//! REST API module.
//!
//! Handlers return their payload directly on success and an [`AppError`] body
//! (`{ error, code }`) otherwise.

mod account;
mod generate;
mod history;

pub use account::*;
pub use generate::*;
pub use history::*;

use crate::errors::AppError;

/// Result type shared by all handlers.
pub type ApiResult<T> = Result<T, AppError>;
