//! Listing-specific domain logic: field validation and flash-sale pricing.

pub mod entity;
pub mod error;

pub use error::*;
