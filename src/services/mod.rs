//! List screen operations composed from a controller and a writer.
//!
//! Services never prompt or alert; they return outcomes and leave
//! notification to the presentation layer.

use thiserror::Error;

use crate::transport::errors::TransportError;

pub mod documents;
pub mod notices;
pub mod patients;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("item is not on the current page")]
    NotFound,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
