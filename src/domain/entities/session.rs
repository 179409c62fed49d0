//! Signed-in session.

use super::{AuthToken, User};

/// Credentials of the signed-in user.
///
/// Created by signup/login or resumed from storage, handed to the
/// authenticated API client on construction, and dropped on logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: AuthToken,
    user: Option<User>,
}

impl Session {
    /// Creates a session for a known user.
    #[must_use]
    pub const fn new(token: AuthToken, user: User) -> Self {
        Self {
            token,
            user: Some(user),
        }
    }

    /// Creates a session from a bare token whose user is not known yet.
    #[must_use]
    pub const fn from_token(token: AuthToken) -> Self {
        Self { token, user: None }
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Returns the signed-in user, if known.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Short label for the navigation bar.
    #[must_use]
    pub fn label(&self) -> &str {
        self.user.as_ref().map_or("signed in", User::display_name)
    }
}
