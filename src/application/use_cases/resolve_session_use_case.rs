//! Session resolution use case.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::TokenSource;
use crate::domain::entities::{AuthToken, Session};
use crate::domain::errors::AuthError;
use crate::domain::ports::SessionStoragePort;

/// Resolved session with its source.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    /// The session.
    pub session: Session,
    /// Where it came from.
    pub source: TokenSource,
}

impl ResolvedSession {
    /// Creates new resolved session.
    #[must_use]
    pub const fn new(session: Session, source: TokenSource) -> Self {
        Self { session, source }
    }
}

/// Resolves a session from available sources.
pub struct ResolveSessionUseCase {
    storage_port: Arc<dyn SessionStoragePort>,
}

impl ResolveSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self { storage_port }
    }

    /// Resolves session from keyring or CLI/Env.
    ///
    /// Priority:
    /// 1. Keyring
    /// 2. CLI/Env (passed as argument)
    ///
    /// # Errors
    /// Storage failures are logged and treated as "no stored session"; this
    /// currently never returns an error.
    pub async fn execute(
        &self,
        cli_token: Option<String>,
    ) -> Result<Option<ResolvedSession>, AuthError> {
        debug!("Checking keyring for stored session");
        match self.storage_port.get_session().await {
            Ok(Some(session)) => {
                info!("Using session from system keyring");
                return Ok(Some(ResolvedSession::new(session, TokenSource::Keyring)));
            }
            Ok(None) => {
                debug!("No session found in keyring");
            }
            Err(e) => {
                debug!(error = %e, "Failed to check keyring");
            }
        }

        if let Some(token_str) = cli_token.filter(|s| !s.trim().is_empty()) {
            debug!("Checking command-line/env token");
            if let Some(token) = AuthToken::new(token_str) {
                info!("Using token from command line / environment");
                return Ok(Some(ResolvedSession::new(
                    Session::from_token(token),
                    TokenSource::CommandLine,
                )));
            }
            debug!("Command-line token has invalid format");
        }

        debug!("No session found in any source");
        Ok(None)
    }
}
