use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::password::{hash_password_blocking, verify_password_blocking};
use super::{AuthError, Role, Session};

pub type ServiceResponse<T> = oneshot::Sender<Result<T, AuthError>>;

/// Typed messages for the auth actor. Each variant carries its parameters and
/// a oneshot channel for the response.
#[derive(Debug)]
pub enum AuthRequest {
    SignUp {
        email: String,
        password: String,
        role: Role,
        respond_to: ServiceResponse<Session>,
    },
    SignIn {
        email: String,
        password: String,
        respond_to: ServiceResponse<Session>,
    },
}

struct Account {
    uid: String,
    password_hash: String,
    role: Role,
}

/// In-process stand-in for the identity provider. Accounts are keyed by
/// normalized email.
pub struct AuthService {
    receiver: mpsc::Receiver<AuthRequest>,
    accounts: HashMap<String, Account>,
}

impl AuthService {
    pub fn new(buffer_size: usize) -> (Self, AuthClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            accounts: HashMap::new(),
        };
        (service, AuthClient::new(sender))
    }

    #[instrument(name = "auth_service", skip(self))]
    pub async fn run(mut self) {
        info!("AuthService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AuthRequest::SignUp {
                    email,
                    password,
                    role,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_sign_up(email, password, role).await);
                }
                AuthRequest::SignIn {
                    email,
                    password,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_sign_in(email, password).await);
                }
            }
        }
        info!("AuthService stopped");
    }

    /// Argon2 work runs on the blocking pool. Requests are still handled one
    /// at a time, so an email cannot be claimed twice while a hash is pending.
    async fn handle_sign_up(&mut self, email: String, password: String, role: Role) -> Result<Session, AuthError> {
        let key = normalize(&email);
        if self.accounts.contains_key(&key) {
            warn!(email = %key, "Sign-up for an existing email");
            return Err(AuthError::EmailInUse(key));
        }
        let account = Account {
            uid: Uuid::new_v4().to_string(),
            password_hash: hash_password_blocking(password).await?,
            role,
        };
        let session = Session {
            uid: account.uid.clone(),
            email: key.clone(),
            role,
        };
        self.accounts.insert(key, account);
        info!(uid = %session.uid, role = %role, "Account created");
        Ok(session)
    }

    async fn handle_sign_in(&self, email: String, password: String) -> Result<Session, AuthError> {
        let key = normalize(&email);
        let account = self.accounts.get(&key).ok_or(AuthError::InvalidCredentials)?;
        let session = Session {
            uid: account.uid.clone(),
            email: key,
            role: account.role,
        };
        if !verify_password_blocking(account.password_hash.clone(), password).await? {
            warn!(email = %session.email, "Sign-in with a wrong password");
            return Err(AuthError::InvalidCredentials);
        }
        debug!(uid = %session.uid, "Signed in");
        Ok(session)
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct AuthClient {
    sender: mpsc::Sender<AuthRequest>,
}

impl AuthClient {
    pub fn new(sender: mpsc::Sender<AuthRequest>) -> Self {
        Self { sender }
    }
}

macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip_all)]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

client_method!(AuthClient => fn sign_up(email: String, password: String, role: Role) -> Session as AuthRequest::SignUp, Error = AuthError);
client_method!(AuthClient => fn sign_in(email: String, password: String) -> Session as AuthRequest::SignIn, Error = AuthError);
