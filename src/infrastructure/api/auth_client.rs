//! Signup and login endpoints.

use async_trait::async_trait;
use tracing::{debug, info};

use super::dto::{AuthResponseBody, LoginBody, SignupBody};
use super::http::{self, ApiSettings, HttpTransport};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthGrant, AuthPort, Password};

/// Unauthenticated client for `POST /signup` and `POST /login`.
pub struct AuthApiClient {
    http: HttpTransport,
}

impl AuthApiClient {
    /// Creates the client.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpTransport::new(settings)?,
        })
    }

    async fn post(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<AuthResponseBody, ApiError> {
        let response = self
            .http
            .client()
            .post(self.http.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| http::send_error(&e))?;

        http::decode(response).await
    }
}

#[async_trait]
impl AuthPort for AuthApiClient {
    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &Password,
    ) -> Result<AuthGrant, ApiError> {
        debug!(email, "Signing up");
        let body = SignupBody {
            name,
            email,
            password: password.as_str(),
        };
        let grant = self.post("/signup", &body).await?.into_grant(email)?;
        info!(user = %grant.user.display_name(), "Account created");
        Ok(grant)
    }

    async fn login(&self, email: &str, password: &Password) -> Result<AuthGrant, ApiError> {
        debug!(email, "Logging in");
        let body = LoginBody {
            email,
            password: password.as_str(),
        };
        let grant = self.post("/login", &body).await?.into_grant(email)?;
        info!(user = %grant.user.display_name(), "Logged in");
        Ok(grant)
    }
}
