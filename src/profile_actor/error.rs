use thiserror::Error;

use crate::validation::FieldErrors;

/// Errors that can occur during profile operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),
    #[error("Profile validation error: {0}")]
    ValidationError(FieldErrors),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(ProfileError);
