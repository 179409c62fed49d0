//! Stub session storage for builds without keyring support.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::SessionStoragePort;

/// Session storage that keeps nothing; sessions last one run.
/// Used when the keyring feature is disabled.
pub struct KeyringSessionStorage;

impl KeyringSessionStorage {
    /// Creates new stub storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Creates storage with custom names (no-op in stub).
    #[must_use]
    pub fn with_names(_service: impl Into<String>, _user: impl Into<String>) -> Self {
        Self
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
        debug!("Keyring feature disabled, no stored session");
        Ok(None)
    }

    async fn store_session(&self, _session: &Session) -> Result<(), AuthError> {
        debug!("Keyring feature disabled, session not persisted");
        Ok(())
    }

    async fn delete_session(&self) -> Result<(), AuthError> {
        Ok(())
    }
}
