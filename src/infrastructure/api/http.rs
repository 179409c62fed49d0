//! Shared reqwest plumbing: client construction, URL joining and error mapping.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::dto::ErrorResponse;
use crate::domain::errors::ApiError;

const USER_AGENT: &str = concat!("jobtrack/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the tracker API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base URL every path is appended to, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    /// Fixed per-request timeout.
    pub timeout: Duration,
}

impl ApiSettings {
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

/// Base URL plus configured reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds the reqwest client.
    ///
    /// # Errors
    /// Returns error if the TLS backend cannot be initialised.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Joins `path` onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Maps a transport failure.
pub fn send_error(error: &reqwest::Error) -> ApiError {
    warn!(error = %error, "Request to tracker API failed");
    if error.is_timeout() {
        ApiError::Timeout
    } else if error.is_connect() {
        ApiError::network("failed to connect to the tracker API")
    } else {
        ApiError::network(error.to_string())
    }
}

/// Maps a non-success status and its body.
#[must_use]
pub fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty());

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized { message },
        _ => ApiError::server(status.as_u16(), message),
    }
}

/// Passes a successful response through, or converts it into an error.
///
/// # Errors
/// Returns the mapped error for non-2xx responses.
pub async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let error = status_error(status, &body);
    warn!(status = status.as_u16(), error = %error, "Tracker API returned an error");
    Err(error)
}

/// Decodes a successful JSON body.
///
/// # Errors
/// Returns a status error for non-2xx responses, or a decode error.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check(response).await?;
    response.json::<T>().await.map_err(|e| {
        warn!(error = %e, "Failed to parse tracker API response");
        ApiError::decode(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(&ApiSettings::new(base, Duration::from_secs(5))).unwrap()
    }

    #[test]
    fn test_url_joining() {
        assert_eq!(
            transport("http://localhost:3000/api/").url("/applications"),
            "http://localhost:3000/api/applications"
        );
        assert_eq!(
            transport("http://localhost:3000/api").url("reminders/3/dismiss"),
            "http://localhost:3000/api/reminders/3/dismiss"
        );
    }

    #[test]
    fn test_status_error_uses_body_message() {
        let error = status_error(StatusCode::BAD_REQUEST, r#"{"message": "Title is required"}"#);
        assert_eq!(
            error,
            ApiError::server(400, Some("Title is required".to_string()))
        );
        assert_eq!(error.user_message("Error saving application"), "Title is required");
    }

    #[test]
    fn test_status_error_without_body() {
        let error = status_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(error, ApiError::server(500, None));
        assert_eq!(error.user_message("Delete failed"), "Delete failed");
    }

    #[test]
    fn test_unauthorized_is_distinct() {
        let error = status_error(StatusCode::UNAUTHORIZED, r#"{"message": "Invalid token"}"#);
        assert_eq!(
            error,
            ApiError::Unauthorized {
                message: Some("Invalid token".to_string())
            }
        );
    }
}
