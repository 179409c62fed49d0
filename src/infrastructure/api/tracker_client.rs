//! Authenticated tracker endpoints.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, header};
use serde::Serialize;
use tracing::debug;

use super::dto::{
    ApplicationBody, ApplicationResponse, CompanyBody, CompanyResponse, NoteBody, ProfileBody,
    ReminderBody, ReminderResponse, StatusStatsResponse, TimelineItem,
};
use super::http::{self, ApiSettings, HttpTransport};
use crate::domain::entities::{
    Application, ApplicationId, Company, CompanyId, NoteId, Reminder, ReminderId, Session,
    StatusSlice, TimelinePoint, UserProfile,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    ApplicationDraft, ApplicationFilter, CompanyDraft, ReminderDraft, TrackerPort,
};

/// Tracker API client bound to one session.
///
/// Every request carries the session's bearer token; the client is dropped
/// together with the session on logout.
pub struct TrackerApiClient {
    http: HttpTransport,
    session: Session,
}

impl TrackerApiClient {
    /// Creates a client for `session`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(settings: &ApiSettings, session: Session) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpTransport::new(settings)?,
            session,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "Dispatching request");
        self.http
            .client()
            .request(method, self.http.url(path))
            .header(header::AUTHORIZATION, self.session.token().bearer_header())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        builder.send().await.map_err(|e| http::send_error(&e))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        http::decode(response).await
    }

    async fn write<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self.send(self.request(method, path).json(body)).await?;
        http::check(response).await.map(drop)
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        http::check(response).await.map(drop)
    }
}

#[async_trait]
impl TrackerPort for TrackerApiClient {
    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<Application>, ApiError> {
        let builder = self
            .request(Method::GET, "/applications")
            .query(&filter.query_pairs());
        let response = self.send(builder).await?;
        let apps: Vec<ApplicationResponse> = http::decode(response).await?;
        Ok(apps.into_iter().map(Application::from).collect())
    }

    async fn create_application(&self, draft: &ApplicationDraft) -> Result<(), ApiError> {
        self.write(Method::POST, "/applications", &ApplicationBody::from(draft))
            .await
    }

    async fn update_application(
        &self,
        id: &ApplicationId,
        draft: &ApplicationDraft,
    ) -> Result<(), ApiError> {
        self.write(
            Method::PUT,
            &format!("/applications/{id}"),
            &ApplicationBody::from(draft),
        )
        .await
    }

    async fn delete_application(&self, id: &ApplicationId) -> Result<(), ApiError> {
        self.delete(&format!("/applications/{id}")).await
    }

    async fn add_note(
        &self,
        application_id: &ApplicationId,
        content: &str,
    ) -> Result<(), ApiError> {
        self.write(
            Method::POST,
            &format!("/applications/{application_id}/notes"),
            &NoteBody { content },
        )
        .await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<(), ApiError> {
        self.delete(&format!("/notes/{id}")).await
    }

    async fn list_companies(&self) -> Result<Vec<Company>, ApiError> {
        let companies: Vec<CompanyResponse> = self.get("/companies").await?;
        Ok(companies.into_iter().map(Company::from).collect())
    }

    async fn create_company(&self, draft: &CompanyDraft) -> Result<(), ApiError> {
        self.write(Method::POST, "/companies", &CompanyBody::from(draft))
            .await
    }

    async fn update_company(&self, id: &CompanyId, draft: &CompanyDraft) -> Result<(), ApiError> {
        self.write(
            Method::PUT,
            &format!("/companies/{id}"),
            &CompanyBody::from(draft),
        )
        .await
    }

    async fn delete_company(&self, id: &CompanyId) -> Result<(), ApiError> {
        self.delete(&format!("/companies/{id}")).await
    }

    async fn list_reminders(&self) -> Result<Vec<Reminder>, ApiError> {
        let reminders: Vec<ReminderResponse> = self.get("/reminders").await?;
        Ok(reminders.into_iter().map(Reminder::from).collect())
    }

    async fn create_reminder(&self, draft: &ReminderDraft) -> Result<(), ApiError> {
        self.write(Method::POST, "/reminders", &ReminderBody::from(draft))
            .await
    }

    async fn delete_reminder(&self, id: &ReminderId) -> Result<(), ApiError> {
        self.delete(&format!("/reminders/{id}")).await
    }

    async fn dismiss_reminder(&self, id: &ReminderId) -> Result<(), ApiError> {
        self.write(
            Method::POST,
            &format!("/reminders/{id}/dismiss"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let profile: ProfileBody = self.get("/profile").await?;
        Ok(profile.into())
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
        self.write(Method::PUT, "/profile", &ProfileBody::from(profile))
            .await
    }

    async fn status_stats(&self) -> Result<Vec<StatusSlice>, ApiError> {
        let stats: StatusStatsResponse = self.get("/stats/status").await?;
        Ok(stats.into_slices())
    }

    async fn timeline_stats(&self) -> Result<Vec<TimelinePoint>, ApiError> {
        let items: Vec<TimelineItem> = self.get("/stats/timeline").await?;
        Ok(items.into_iter().map(TimelinePoint::from).collect())
    }
}
