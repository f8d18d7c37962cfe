pub mod cart;
pub mod listing;
pub mod order;
pub mod profile;
pub mod verification;

pub use cart::*;
pub use listing::*;
pub use order::*;
pub use profile::*;
pub use verification::*;
