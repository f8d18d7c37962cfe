//! Pickup verification records. Create-only: the store refuses every update
//! and delete.

use std::convert::Infallible;
use thiserror::Error;

use crate::actor_framework::Entity;
use crate::domain::{Verification, VerificationCreate, VerificationStatus};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum VerificationError {
    #[error("Verification not found: {0}")]
    NotFound(String),
    #[error("Verification record is incomplete: {0}")]
    Incomplete(&'static str),
    #[error("Verification records cannot be changed")]
    Immutable,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(VerificationError);

impl VerificationCreate {
    /// A record needs a fully passed checklist and at least one photo.
    pub fn check_complete(&self) -> Result<(), VerificationError> {
        if !self.checklist.is_complete() {
            return Err(VerificationError::Incomplete("checklist"));
        }
        if self.photos.is_empty() {
            return Err(VerificationError::Incomplete("photos"));
        }
        Ok(())
    }
}

impl Entity for Verification {
    type Id = String;
    type CreateParams = VerificationCreate;
    type Patch = Infallible;
    type Action = ();
    type ActionResult = ();
    type Error = VerificationError;

    const COLLECTION: &'static str = "verifications";

    fn from_create_params(id: String, params: VerificationCreate) -> Result<Self, VerificationError> {
        params.check_complete()?;
        Ok(Self {
            id,
            order_id: params.order_id,
            rider_id: params.rider_id,
            rider_name: params.rider_name,
            scanned_product: params.scanned_product,
            checklist: params.checklist,
            photos: params.photos,
            notes: params.notes,
            timestamp: params.timestamp,
            status: VerificationStatus::Verified,
        })
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), VerificationError> {
        match patch {}
    }

    fn on_delete(&self) -> Result<(), VerificationError> {
        Err(VerificationError::Immutable)
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), VerificationError> {
        Err(VerificationError::Immutable)
    }
}
