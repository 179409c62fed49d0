//! Tracker data port for applications, companies, reminders and profile.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Application, ApplicationId, ApplicationStatus, Company, CompanyId, NoteId, Reminder,
    ReminderId, StatusSlice, TimelinePoint, UserProfile,
};
use crate::domain::errors::ApiError;

/// Filters for the applications list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    /// Restrict to one status; `None` means all statuses.
    pub status: Option<ApplicationStatus>,
    /// Free-text query over title, company and location.
    pub q: String,
}

impl ApplicationFilter {
    /// Sets the status filter.
    #[must_use]
    pub const fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = q.into();
        self
    }

    /// Returns whether no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.q.trim().is_empty()
    }

    /// Query-string pairs; inactive filters are omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        let q = self.q.trim();
        if !q.is_empty() {
            pairs.push(("q", q.to_string()));
        }
        pairs
    }
}

/// Fields submitted when creating or updating an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    /// Job title.
    pub title: String,
    /// Company the application is for.
    pub company_id: CompanyId,
    /// Job location.
    pub location: String,
    /// Pipeline status.
    pub status: ApplicationStatus,
}

/// Fields submitted when creating or updating a company.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDraft {
    /// Company name.
    pub name: String,
    /// Website URL.
    pub website: String,
    /// Industry sector.
    pub industry: String,
    /// Location.
    pub location: String,
    /// Careers page URL.
    pub careers_page: String,
    /// Contact email.
    pub contact_email: String,
}

/// Fields submitted when creating a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    /// Application the reminder belongs to.
    pub application_id: ApplicationId,
    /// Optional note.
    pub note: String,
    /// When to remind, in UTC.
    pub remind_at: DateTime<Utc>,
}

/// Port for the authenticated tracker API.
///
/// Implementations are bound to one session; they never see a missing token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackerPort: Send + Sync {
    /// Lists applications matching the filter.
    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<Application>, ApiError>;

    /// Creates an application.
    async fn create_application(&self, draft: &ApplicationDraft) -> Result<(), ApiError>;

    /// Replaces an application.
    async fn update_application(
        &self,
        id: &ApplicationId,
        draft: &ApplicationDraft,
    ) -> Result<(), ApiError>;

    /// Deletes an application.
    async fn delete_application(&self, id: &ApplicationId) -> Result<(), ApiError>;

    /// Adds a note to an application.
    async fn add_note(&self, application_id: &ApplicationId, content: &str)
    -> Result<(), ApiError>;

    /// Deletes a note.
    async fn delete_note(&self, id: &NoteId) -> Result<(), ApiError>;

    /// Lists companies.
    async fn list_companies(&self) -> Result<Vec<Company>, ApiError>;

    /// Creates a company.
    async fn create_company(&self, draft: &CompanyDraft) -> Result<(), ApiError>;

    /// Replaces a company.
    async fn update_company(&self, id: &CompanyId, draft: &CompanyDraft) -> Result<(), ApiError>;

    /// Deletes a company.
    async fn delete_company(&self, id: &CompanyId) -> Result<(), ApiError>;

    /// Lists reminders.
    async fn list_reminders(&self) -> Result<Vec<Reminder>, ApiError>;

    /// Creates a reminder.
    async fn create_reminder(&self, draft: &ReminderDraft) -> Result<(), ApiError>;

    /// Deletes a reminder.
    async fn delete_reminder(&self, id: &ReminderId) -> Result<(), ApiError>;

    /// Marks a reminder as dismissed.
    async fn dismiss_reminder(&self, id: &ReminderId) -> Result<(), ApiError>;

    /// Fetches the signed-in user's profile.
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError>;

    /// Replaces the signed-in user's profile.
    async fn update_profile(&self, profile: &UserProfile) -> Result<(), ApiError>;

    /// Fetches the application count per status.
    async fn status_stats(&self) -> Result<Vec<StatusSlice>, ApiError>;

    /// Fetches the application count per date.
    async fn timeline_stats(&self) -> Result<Vec<TimelinePoint>, ApiError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_query() {
        let filter = ApplicationFilter::default();
        assert!(filter.is_empty());
        assert!(filter.query_pairs().is_empty());
    }

    #[test]
    fn test_filter_query_pairs() {
        let filter = ApplicationFilter::default()
            .with_status(ApplicationStatus::Interview)
            .with_query("  rust ");

        assert_eq!(
            filter.query_pairs(),
            vec![("status", "interview".to_string()), ("q", "rust".to_string())]
        );
    }

    #[test]
    fn test_blank_query_is_omitted() {
        let filter = ApplicationFilter::default().with_query("   ");
        assert!(filter.is_empty());
        assert!(filter.query_pairs().is_empty());
    }
}
