//! Typed clients over the store actors. Domain errors come back instead of
//! raw store errors, and cross-collection workflows live in `OrderClient`.

#[macro_use]
mod macros;
pub mod listing_client;
pub mod order_client;
pub mod profile_client;
pub mod verification_client;

pub use listing_client::*;
pub use order_client::*;
pub use profile_client::*;
pub use verification_client::*;
