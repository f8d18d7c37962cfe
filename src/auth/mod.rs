//! Email/password accounts, role-scoped sessions and sign-up forms.

mod error;
pub mod forms;
mod password;
mod service;
mod session;

pub use error::*;
pub use forms::*;
pub use service::{AuthClient, AuthRequest, AuthService};
pub use session::*;
