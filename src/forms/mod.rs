//! Form definitions backing the list screens.

use thiserror::Error;
use validator::ValidationErrors;

pub mod notices;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid title")]
    InvalidTitle,

    #[error("invalid body")]
    InvalidBody,

    #[error("invalid priority")]
    InvalidPriority,
}
