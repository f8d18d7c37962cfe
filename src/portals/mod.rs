//! Role-scoped entry points. Each portal owns its own session context and
//! talks to the stores only through the typed clients.

pub mod buyer;
mod error;
pub mod farmer;
pub mod rider;

pub use buyer::{BuyerPortal, MarketplaceQuery, SortOrder};
pub use error::*;
pub use farmer::{FarmerPortal, ListingDraft};
pub use rider::RiderPortal;
