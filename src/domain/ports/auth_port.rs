//! Authentication port definition.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::entities::{AuthToken, User};
use crate::domain::errors::ApiError;

/// Password kept in memory only as long as the request needs it.
pub type Password = Zeroizing<String>;

/// Successful signup or login.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    /// Issued bearer token.
    pub token: AuthToken,
    /// Account the token belongs to.
    pub user: User,
    /// Server greeting, shown to the user.
    pub message: Option<String>,
}

/// Port for account creation and sign-in.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Creates an account and signs in.
    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &Password,
    ) -> Result<AuthGrant, ApiError>;

    /// Signs in to an existing account.
    async fn login(&self, email: &str, password: &Password) -> Result<AuthGrant, ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Which endpoint a mock call hit.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum AuthCall {
        Signup { name: String, email: String },
        Login { email: String },
    }

    /// Mock authentication port for testing.
    pub struct MockAuthPort {
        should_succeed: Arc<AtomicBool>,
        calls: Mutex<Vec<AuthCall>>,
    }

    impl MockAuthPort {
        /// Creates new mock.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Returns the calls received so far.
        pub fn calls(&self) -> Vec<AuthCall> {
            self.calls.lock().clone()
        }

        fn grant(&self, name: &str, email: &str) -> Result<AuthGrant, ApiError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(AuthGrant {
                    token: AuthToken::new_unchecked("mock.jwt.token"),
                    user: User::new(Some("1".into()), name, email),
                    message: Some("Welcome".to_string()),
                })
            } else {
                Err(ApiError::server(401, Some("Invalid credentials".to_string())))
            }
        }
    }

    #[async_trait]
    impl AuthPort for MockAuthPort {
        async fn signup(
            &self,
            name: &str,
            email: &str,
            _password: &Password,
        ) -> Result<AuthGrant, ApiError> {
            self.calls.lock().push(AuthCall::Signup {
                name: name.to_string(),
                email: email.to_string(),
            });
            self.grant(name, email)
        }

        async fn login(&self, email: &str, _password: &Password) -> Result<AuthGrant, ApiError> {
            self.calls.lock().push(AuthCall::Login {
                email: email.to_string(),
            });
            self.grant("", email)
        }
    }
}
