//! JSON form of a stored session.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::entities::{AuthToken, Session, User, UserId};
use crate::domain::errors::SecretError;

#[derive(Serialize, Deserialize)]
struct StoredUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: Zeroizing<String>,
    #[serde(default)]
    user: Option<StoredUser>,
}

/// Serializes a session for the keyring.
pub fn encode(session: &Session) -> Result<Zeroizing<String>, SecretError> {
    let record = StoredSession {
        token: Zeroizing::new(session.token().as_str().to_string()),
        user: session.user().map(|user| StoredUser {
            id: user.id().map(|id| id.as_str().to_string()),
            name: user.name().to_string(),
            email: user.email().to_string(),
        }),
    };
    serde_json::to_string(&record)
        .map(Zeroizing::new)
        .map_err(|e| SecretError::StorageFailed(e.to_string()))
}

/// Parses a stored session. A bare token, as written by older builds, is accepted too.
pub fn decode(raw: &str) -> Result<Session, SecretError> {
    let raw = raw.trim();
    if !raw.starts_with('{') {
        return AuthToken::new(raw)
            .map(Session::from_token)
            .ok_or_else(|| SecretError::Corrupt("stored token is empty".to_string()));
    }

    let record: StoredSession =
        serde_json::from_str(raw).map_err(|e| SecretError::Corrupt(e.to_string()))?;
    let token = AuthToken::new(record.token.as_str())
        .ok_or_else(|| SecretError::Corrupt("stored token is empty".to_string()))?;

    Ok(match record.user {
        Some(user) => Session::new(
            token,
            User::new(user.id.map(UserId::from), user.name, user.email),
        ),
        None => Session::from_token(token),
    })
}
