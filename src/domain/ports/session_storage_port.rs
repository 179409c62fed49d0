//! Session storage port definition.

use async_trait::async_trait;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;

/// Port for session persistence operations.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Retrieves stored session.
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Stores session securely.
    async fn store_session(&self, session: &Session) -> Result<(), AuthError>;

    /// Deletes stored session.
    async fn delete_session(&self) -> Result<(), AuthError>;

    /// Checks if a session exists.
    async fn has_session(&self) -> Result<bool, AuthError> {
        Ok(self.get_session().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock session storage for testing.
    pub struct MockSessionStorage {
        session: Arc<RwLock<Option<Session>>>,
        fail_writes: bool,
    }

    impl MockSessionStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                session: Arc::new(RwLock::new(None)),
                fail_writes: false,
            }
        }

        /// Creates mock storage with a session.
        pub fn with_session(session: Session) -> Self {
            Self {
                session: Arc::new(RwLock::new(Some(session))),
                fail_writes: false,
            }
        }

        /// Creates mock storage whose writes always fail.
        pub fn failing() -> Self {
            Self {
                session: Arc::new(RwLock::new(None)),
                fail_writes: true,
            }
        }
    }

    impl Default for MockSessionStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SessionStoragePort for MockSessionStorage {
        async fn get_session(&self) -> Result<Option<Session>, AuthError> {
            Ok(self.session.read().await.clone())
        }

        async fn store_session(&self, session: &Session) -> Result<(), AuthError> {
            if self.fail_writes {
                return Err(AuthError::storage_failed("mock storage is read-only"));
            }
            *self.session.write().await = Some(session.clone());
            Ok(())
        }

        async fn delete_session(&self) -> Result<(), AuthError> {
            *self.session.write().await = None;
            Ok(())
        }
    }
}
