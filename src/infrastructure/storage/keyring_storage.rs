//! Keyring-based session storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use super::session_record;
use crate::domain::entities::Session;
use crate::domain::errors::{AuthError, SecretError};
use crate::domain::ports::SessionStoragePort;

const KEYRING_SERVICE: &str = "jobtrack";
const KEYRING_USER: &str = "session";

/// System keyring session storage adapter.
pub struct KeyringSessionStorage {
    service: String,
    user: String,
}

impl KeyringSessionStorage {
    /// Creates new storage with default names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_names(KEYRING_SERVICE, KEYRING_USER)
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<Entry, AuthError> {
        Entry::new(&self.service, &self.user)
            .map_err(|e| SecretError::AccessFailed(e.to_string()).into())
    }
}

impl Default for KeyringSessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        debug!(service = %self.service, "Retrieving session from keyring");

        let entry = self.entry()?;

        match entry.get_password() {
            Ok(raw) => {
                let raw = zeroize::Zeroizing::new(raw);
                match session_record::decode(&raw) {
                    Ok(session) => {
                        debug!("Session found in keyring");
                        Ok(Some(session))
                    }
                    Err(e) => {
                        warn!(error = %e, "Discarding unreadable stored session");
                        Ok(None)
                    }
                }
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No session stored in keyring");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve session from keyring");
                Err(AuthError::retrieval_failed(e.to_string()))
            }
        }
    }

    async fn store_session(&self, session: &Session) -> Result<(), AuthError> {
        debug!(service = %self.service, "Storing session in keyring");

        let entry = self.entry()?;
        let raw = session_record::encode(session)?;

        entry.set_password(&raw).map_err(|e| {
            warn!(error = %e, "Failed to store session in keyring");
            AuthError::storage_failed(e.to_string())
        })?;

        debug!("Session stored");
        Ok(())
    }

    async fn delete_session(&self) -> Result<(), AuthError> {
        debug!(service = %self.service, "Deleting session from keyring");

        let entry = self.entry()?;

        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to delete session from keyring");
                Err(SecretError::DeletionFailed(e.to_string()).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthToken;

    #[tokio::test]
    #[ignore = "requires system keyring"]
    async fn test_store_and_retrieve_session() {
        let storage = KeyringSessionStorage::with_names("jobtrack-test", "test-session");
        let session = Session::from_token(AuthToken::new_unchecked("abc.def"));

        storage.store_session(&session).await.unwrap();
        assert_eq!(storage.get_session().await.unwrap(), Some(session));

        storage.delete_session().await.unwrap();
        assert!(storage.get_session().await.unwrap().is_none());
    }
}
