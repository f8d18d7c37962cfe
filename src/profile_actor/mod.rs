//! Farmer, business and rider profiles, including the rider wallet.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
