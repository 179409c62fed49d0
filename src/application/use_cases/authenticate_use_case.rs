//! Signup / login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{AuthMode, AuthResponse, Credentials};
use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, SessionStoragePort};

/// Handles the signup and login workflow and the session lifecycle.
#[derive(Clone)]
pub struct AuthenticateUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl AuthenticateUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Submits credentials to the endpoint selected by `credentials.mode`.
    ///
    /// # Errors
    /// Returns error if a required field is blank or the server rejects the request.
    pub async fn execute(&self, credentials: Credentials) -> Result<AuthResponse, AuthError> {
        let email = credentials.email.trim();
        if email.is_empty() {
            return Err(AuthError::invalid_input("Email is required"));
        }
        if credentials.password.is_empty() {
            return Err(AuthError::invalid_input("Password is required"));
        }

        debug!(mode = ?credentials.mode, "Submitting credentials");

        let grant = match credentials.mode {
            AuthMode::Signup => {
                self.auth_port
                    .signup(credentials.name.trim(), email, &credentials.password)
                    .await
            }
            AuthMode::Login => self.auth_port.login(email, &credentials.password).await,
        }
        .map_err(|e| {
            warn!(error = %e, mode = ?credentials.mode, "Authentication failed");
            AuthError::from(e)
        })?;

        info!(
            user = %grant.user.display_name(),
            mode = ?credentials.mode,
            "Successfully authenticated"
        );

        let session = Session::new(grant.token, grant.user);

        match self.storage_port.store_session(&session).await {
            Ok(()) => info!("Session persisted to secure storage"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist session to secure storage");
            }
        }

        Ok(AuthResponse {
            session,
            message: grant.message,
        })
    }

    /// Deletes the stored session.
    ///
    /// # Errors
    /// Returns error if deletion fails.
    pub async fn logout(&self) -> Result<(), AuthError> {
        debug!("Deleting session from secure storage");
        match self.storage_port.delete_session().await {
            Ok(()) => {
                info!("Session deleted from secure storage");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete session from secure storage");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{AuthCall, MockAuthPort, MockSessionStorage};

    #[tokio::test]
    async fn test_successful_signup() {
        let auth_port = Arc::new(MockAuthPort::new(true));
        let storage_port = Arc::new(MockSessionStorage::new());

        let use_case = AuthenticateUseCase::new(auth_port.clone(), storage_port.clone());
        let credentials = Credentials::signup("Ada", "ada@example.com", "hunter2");

        let response = use_case.execute(credentials).await.unwrap();

        assert_eq!(response.session.label(), "Ada");
        assert_eq!(response.message.as_deref(), Some("Welcome"));
        assert!(storage_port.has_session().await.unwrap());
        assert_eq!(
            auth_port.calls(),
            vec![AuthCall::Signup {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_login_hits_login_endpoint() {
        let auth_port = Arc::new(MockAuthPort::new(true));
        let storage_port = Arc::new(MockSessionStorage::new());

        let use_case = AuthenticateUseCase::new(auth_port.clone(), storage_port);
        use_case
            .execute(Credentials::login(" ada@example.com ", "hunter2"))
            .await
            .unwrap();

        assert_eq!(
            auth_port.calls(),
            vec![AuthCall::Login {
                email: "ada@example.com".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_required_fields() {
        let auth_port = Arc::new(MockAuthPort::new(true));
        let storage_port = Arc::new(MockSessionStorage::new());
        let use_case = AuthenticateUseCase::new(auth_port.clone(), storage_port);

        let no_email = use_case.execute(Credentials::login("  ", "pw")).await;
        assert!(matches!(no_email, Err(AuthError::InvalidInput { .. })));

        let no_password = use_case.execute(Credentials::login("a@b.c", "")).await;
        assert!(matches!(no_password, Err(AuthError::InvalidInput { .. })));

        assert!(auth_port.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let auth_port = Arc::new(MockAuthPort::new(false));
        let storage_port = Arc::new(MockSessionStorage::new());

        let use_case = AuthenticateUseCase::new(auth_port, storage_port.clone());
        let result = use_case
            .execute(Credentials::login("ada@example.com", "wrong"))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(!storage_port.has_session().await.unwrap());
    }

    #[tokio::test]
    async fn test_login_always_stores_session() {
        let auth_port = Arc::new(MockAuthPort::new(true));
        let storage_port = Arc::new(MockSessionStorage::new());

        let use_case = AuthenticateUseCase::new(auth_port, storage_port.clone());
        use_case
            .execute(Credentials::login("ada@example.com", "pw"))
            .await
            .unwrap();

        let stored = storage_port.get_session().await.unwrap().unwrap();
        assert_eq!(stored.label(), "ada@example.com");
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_fail_login() {
        let auth_port = Arc::new(MockAuthPort::new(true));
        let storage_port = Arc::new(MockSessionStorage::failing());

        let use_case = AuthenticateUseCase::new(auth_port, storage_port);
        let response = use_case
            .execute(Credentials::login("ada@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(response.session.label(), "ada@example.com");
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let auth_port = Arc::new(MockAuthPort::new(true));
        let storage_port = Arc::new(MockSessionStorage::new());
        let use_case = AuthenticateUseCase::new(auth_port, storage_port.clone());

        use_case
            .execute(Credentials::login("ada@example.com", "pw"))
            .await
            .unwrap();
        use_case.logout().await.unwrap();

        assert!(!storage_port.has_session().await.unwrap());
    }
}
