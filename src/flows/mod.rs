//! Rider-side working state for pickup and hand-over, held until submission.

pub mod delivery;
pub mod pickup;

pub use delivery::*;
pub use pickup::*;
