use thiserror::Error;

use crate::auth::Role;
use crate::validation::FieldErrors;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Sign-up validation error: {0}")]
    ValidationError(FieldErrors),
    #[error("Email already in use: {0}")]
    EmailInUse(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("This account is registered as a {actual}, not a {expected}")]
    WrongRole { expected: Role, actual: Role },
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
