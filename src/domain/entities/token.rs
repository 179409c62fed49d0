//! Bearer token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque bearer token issued by the tracker API.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AuthToken {
    value: String,
}

impl AuthToken {
    /// Creates a token, rejecting blank or whitespace-containing values.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self { value })
    }

    /// Creates token without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.value)
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.value.chars().collect();
        if chars.len() <= 10 {
            return "*".repeat(chars.len());
        }

        let prefix: String = chars[..4].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{prefix}...{suffix}")
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "eyJhbGciOiJIUzI1NiJ9.eyJpZCI6MX0.c2lnbmF0dXJl";

    #[test]
    fn test_valid_token_creation() {
        let token = AuthToken::new(format!("  {RAW}\n"));
        assert_eq!(token.unwrap().as_str(), RAW);
    }

    #[test]
    fn test_blank_token_rejected() {
        assert!(AuthToken::new("   ").is_none());
        assert!(AuthToken::new("abc def").is_none());
    }

    #[test]
    fn test_bearer_header() {
        let token = AuthToken::new_unchecked("abc");
        assert_eq!(token.bearer_header(), "Bearer abc");
    }

    #[test]
    fn test_token_masking() {
        let token = AuthToken::new_unchecked(RAW);
        let masked = token.masked();

        assert!(masked.contains("..."));
        assert!(!masked.contains(RAW));
        assert_eq!(AuthToken::new_unchecked("short").masked(), "*****");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = AuthToken::new_unchecked(RAW);
        let debug_output = format!("{token:?}");

        assert!(!debug_output.contains(RAW));
    }
}
