use thiserror::Error;

use crate::domain::OrderStatus;
use crate::profile_actor::ProfileError;
use crate::provenance::ScanError;
use crate::validation::FieldErrors;
use crate::verification_actor::VerificationError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Order validation error: {0}")]
    ValidationError(FieldErrors),
    #[error("Invalid line item: {0}")]
    InvalidLineItem(String),
    #[error("Invalid listing: {0}")]
    InvalidListing(String),
    #[error("Only {available} kg of listing {listing_id} available, {requested} kg requested")]
    InsufficientStock {
        listing_id: String,
        requested: f64,
        available: f64,
    },
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Order already accepted by rider {0}")]
    AlreadyAccepted(String),
    #[error("Order is already {0}; it can no longer be marked ready for pickup")]
    ReadyTooLate(OrderStatus),
    #[error("Order is not assigned to rider {0}")]
    NotAssignedRider(String),
    #[error("Order does not belong to buyer {0}")]
    NotOrderBuyer(String),
    #[error("Order has no items from farmer {0}")]
    NotOrderFarmer(String),
    #[error("Order acceptance was not confirmed")]
    NotConfirmed,
    #[error("Please scan the QR code first")]
    MissingScan,
    #[error(transparent)]
    MalformedScan(#[from] ScanError),
    #[error("Scanned product does not match any listing: {0}")]
    UnknownListing(String),
    #[error("Quality checklist incomplete: {}", .missing.join(", "))]
    IncompleteChecklist { missing: Vec<&'static str> },
    #[error("At least one photo is required")]
    MissingPhotos,
    #[error("Pay on delivery orders need a photo of the received payment")]
    MissingPaymentProof,
    #[error("Pickup verification already recorded")]
    AlreadyVerified,
    #[error("Delivery already confirmed")]
    AlreadyConfirmed,
    #[error("Orders cannot be deleted")]
    DeleteNotAllowed,
    #[error("Verification error: {0}")]
    Verification(#[from] VerificationError),
    #[error("Rider wallet error: {0}")]
    Wallet(#[from] ProfileError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(OrderError);
