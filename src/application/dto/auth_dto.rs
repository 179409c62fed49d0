//! Authentication DTOs.

use crate::domain::entities::Session;
use crate::domain::ports::Password;

/// Source of a resumed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Session stored in the system keyring.
    Keyring,
    /// Token passed on the command line or via environment.
    CommandLine,
    /// Token obtained by signing up or logging in.
    UserInput,
}

impl TokenSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Keyring => "system keyring",
            Self::CommandLine => "command line / environment",
            Self::UserInput => "user input",
        }
    }
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Which endpoint the auth form submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Create an account.
    #[default]
    Signup,
    /// Sign in to an existing account.
    Login,
}

impl AuthMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Signup => Self::Login,
            Self::Login => Self::Signup,
        }
    }

    /// Returns the form title and submit label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Signup => "Sign Up",
            Self::Login => "Log In",
        }
    }

    /// Returns the hint for switching to the other mode.
    #[must_use]
    pub const fn switch_hint(self) -> &'static str {
        match self {
            Self::Signup => "Already have an account? Log In",
            Self::Login => "Don't have an account? Sign Up",
        }
    }
}

/// Credentials submitted from the auth form.
#[derive(Clone)]
pub struct Credentials {
    /// Target endpoint.
    pub mode: AuthMode,
    /// Display name; only sent on signup.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: Password,
}

impl Credentials {
    /// Creates login credentials.
    #[must_use]
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::Login,
            name: String::new(),
            email: email.into(),
            password: Password::new(password.into()),
        }
    }

    /// Creates signup credentials.
    #[must_use]
    pub fn signup(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            mode: AuthMode::Signup,
            name: name.into(),
            ..Self::login(email, password)
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("mode", &self.mode)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Successful authentication.
#[derive(Debug, Clone)]
pub struct AuthResponse {
    /// Newly created session.
    pub session: Session,
    /// Server greeting.
    pub message: Option<String>,
}
