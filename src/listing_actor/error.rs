use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ListingError {
    #[error("Listing not found: {0}")]
    NotFound(String),
    #[error("Listing validation error: {0}")]
    ValidationError(FieldErrors),
    #[error("Listing {listing_id} is not owned by farmer {farmer_id}")]
    NotOwner { listing_id: String, farmer_id: String },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(ListingError);
