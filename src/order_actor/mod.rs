//! Order-specific domain logic: the lifecycle transitions and their guards.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
