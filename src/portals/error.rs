use thiserror::Error;

use crate::auth::AuthError;
use crate::listing_actor::ListingError;
use crate::media::ImageError;
use crate::order_actor::OrderError;
use crate::profile_actor::ProfileError;

/// Everything a portal operation can fail with.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PortalError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("No profile found for account {0}")]
    MissingProfile(String),
}
