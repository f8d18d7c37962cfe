use std::fmt;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use super::{AuthClient, AuthError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Business,
    Farmer,
    Rider,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Business => f.write_str("business"),
            Role::Farmer => f.write_str("farmer"),
            Role::Rider => f.write_str("rider"),
        }
    }
}

/// The signed-in identity. `uid` keys the role's profile document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub role: Role,
}

/// Auth state for one portal instance, scoped to a single role.
///
/// Changes are published on a watch channel, so dashboards can follow
/// sign-in and sign-out without polling.
pub struct SessionContext {
    auth: AuthClient,
    role: Role,
    state: watch::Sender<Option<Session>>,
}

impl SessionContext {
    pub fn new(auth: AuthClient, role: Role) -> Self {
        let (state, _) = watch::channel(None);
        Self { auth, role, state }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    #[instrument(skip(self, password), fields(role = %self.role))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.auth.sign_up(email.to_string(), password.to_string(), self.role).await?;
        self.state.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Signs in only if the account belongs to this portal's role.
    #[instrument(skip(self, password), fields(role = %self.role))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.auth.sign_in(email.to_string(), password.to_string()).await?;
        if session.role != self.role {
            warn!(uid = %session.uid, "Account used on the wrong portal");
            return Err(AuthError::WrongRole {
                expected: self.role,
                actual: session.role,
            });
        }
        info!(uid = %session.uid, "Signed in");
        self.state.send_replace(Some(session.clone()));
        Ok(session)
    }

    pub fn sign_out(&self) {
        if let Some(previous) = self.state.send_replace(None) {
            info!(uid = %previous.uid, "Signed out");
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn require(&self) -> Result<Session, AuthError> {
        self.current().ok_or(AuthError::NotSignedIn)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthService;

    fn auth() -> AuthClient {
        let (service, client) = AuthService::new(8);
        tokio::spawn(service.run());
        client
    }

    #[tokio::test]
    async fn test_session_changes_are_published() {
        let context = SessionContext::new(auth(), Role::Rider);
        let mut changes = context.subscribe();
        assert!(context.require().is_err());

        let session = context.sign_up("ravi@ride.in", "secret1").await.unwrap();
        changes.changed().await.unwrap();
        assert_eq!(changes.borrow().as_ref(), Some(&session));

        context.sign_out();
        changes.changed().await.unwrap();
        assert!(changes.borrow().is_none());
        assert_eq!(context.require(), Err(AuthError::NotSignedIn));
    }

    #[tokio::test]
    async fn test_wrong_portal_is_refused() {
        let auth = auth();
        let farmer = SessionContext::new(auth.clone(), Role::Farmer);
        farmer.sign_up("ramesh@farm.in", "secret1").await.unwrap();

        let rider = SessionContext::new(auth, Role::Rider);
        let err = rider.sign_in("ramesh@farm.in", "secret1").await.unwrap_err();
        assert_eq!(
            err,
            AuthError::WrongRole {
                expected: Role::Rider,
                actual: Role::Farmer
            }
        );
        assert!(rider.current().is_none());
    }
}
