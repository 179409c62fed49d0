//! Wire types for the tracker API.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::entities::{
    Application, ApplicationStatus, AuthToken, Company, CompanyRef, Note, Reminder,
    ReminderStatus, StatusSlice, TimelinePoint, User, UserId, UserProfile,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{ApplicationDraft, AuthGrant, CompanyDraft, ReminderDraft};
use crate::domain::serde_utils::{lenient_count, string_or_number};

/// Error body; `message` is absent on some failures.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    #[serde(default, with = "string_or_number::option")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<UserResponse> for User {
    fn from(user: UserResponse) -> Self {
        Self::new(
            user.id.map(UserId::from),
            user.name.unwrap_or_default(),
            user.email.unwrap_or_default(),
        )
    }
}

/// `POST /signup` and `POST /login` response.
#[derive(Debug, Deserialize)]
pub struct AuthResponseBody {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserResponse>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponseBody {
    /// Converts to a grant; `email` fills in a user the server did not echo.
    ///
    /// # Errors
    /// Returns a decode error if the token is blank or malformed.
    pub fn into_grant(self, email: &str) -> Result<AuthGrant, ApiError> {
        let token = AuthToken::new(self.token)
            .ok_or_else(|| ApiError::decode("response did not contain a usable token"))?;
        let user = self
            .user
            .map_or_else(|| User::new(None, "", email), User::from);
        Ok(AuthGrant {
            token,
            user,
            message: self.message.filter(|m| !m.trim().is_empty()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SignupBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompanyRefResponse {
    #[serde(default, with = "string_or_number::option")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(default, with = "string_or_number::option")]
    pub application_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl From<NoteResponse> for Note {
    fn from(note: NoteResponse) -> Self {
        let mut converted = Self::new(note.id, note.content.unwrap_or_default());
        converted.application_id = note.application_id.map(Into::into);
        converted
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "string_or_number::option")]
    pub company_id: Option<String>,
    #[serde(default, rename = "Company")]
    pub company: Option<CompanyRefResponse>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "Notes")]
    pub notes: Option<Vec<NoteResponse>>,
}

impl From<ApplicationResponse> for Application {
    fn from(app: ApplicationResponse) -> Self {
        let status = app
            .status
            .as_deref()
            .map_or(Ok(ApplicationStatus::default()), str::parse)
            .unwrap_or_else(|e| {
                warn!(id = %app.id, error = %e, "Unknown application status, using default");
                ApplicationStatus::default()
            });

        let mut converted = Self::new(app.id, app.title.unwrap_or_default(), status)
            .with_location(app.location.unwrap_or_default())
            .with_notes(
                app.notes
                    .unwrap_or_default()
                    .into_iter()
                    .map(Note::from)
                    .collect(),
            );
        if let Some(company_id) = app.company_id {
            converted = converted.with_company_id(company_id);
        }
        if let Some(company) = app.company {
            converted = converted.with_company(CompanyRef {
                id: company.id.map(Into::into),
                name: company.name.unwrap_or_default(),
            });
        }
        converted
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationBody<'a> {
    pub title: &'a str,
    pub company_id: &'a str,
    pub location: &'a str,
    pub status: &'a str,
}

impl<'a> From<&'a ApplicationDraft> for ApplicationBody<'a> {
    fn from(draft: &'a ApplicationDraft) -> Self {
        Self {
            title: &draft.title,
            company_id: draft.company_id.as_str(),
            location: &draft.location,
            status: draft.status.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteBody<'a> {
    pub content: &'a str,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub careers_page: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

impl From<CompanyResponse> for Company {
    fn from(company: CompanyResponse) -> Self {
        let mut converted = Self::new(company.id, company.name.unwrap_or_default());
        converted.website = non_empty(company.website);
        converted.industry = non_empty(company.industry);
        converted.location = non_empty(company.location);
        converted.careers_page = non_empty(company.careers_page);
        converted.contact_email = non_empty(company.contact_email);
        converted
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyBody<'a> {
    pub name: &'a str,
    pub website: &'a str,
    pub industry: &'a str,
    pub location: &'a str,
    pub careers_page: &'a str,
    pub contact_email: &'a str,
}

impl<'a> From<&'a CompanyDraft> for CompanyBody<'a> {
    fn from(draft: &'a CompanyDraft) -> Self {
        Self {
            name: &draft.name,
            website: &draft.website,
            industry: &draft.industry,
            location: &draft.location,
            careers_page: &draft.careers_page,
            contact_email: &draft.contact_email,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    #[serde(with = "string_or_number")]
    pub id: String,
    #[serde(with = "string_or_number")]
    pub application_id: String,
    #[serde(default)]
    pub note: Option<String>,
    pub remind_at: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<ReminderResponse> for Reminder {
    fn from(reminder: ReminderResponse) -> Self {
        let status = reminder
            .status
            .as_deref()
            .map_or(ReminderStatus::Pending, ReminderStatus::from_wire);
        Self::new(
            reminder.id,
            reminder.application_id,
            reminder.remind_at,
            status,
        )
        .with_note(reminder.note.unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderBody<'a> {
    pub application_id: &'a str,
    pub note: &'a str,
    pub remind_at: String,
}

impl<'a> From<&'a ReminderDraft> for ReminderBody<'a> {
    fn from(draft: &'a ReminderDraft) -> Self {
        Self {
            application_id: draft.application_id.as_str(),
            note: &draft.note,
            remind_at: draft.remind_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Profile in both directions; `null` fields read as empty.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub career_goal: Option<String>,
}

impl From<ProfileBody> for UserProfile {
    fn from(profile: ProfileBody) -> Self {
        Self {
            name: profile.name.unwrap_or_default(),
            email: profile.email.unwrap_or_default(),
            phone: profile.phone.unwrap_or_default(),
            linkedin: profile.linkedin.unwrap_or_default(),
            career_goal: profile.career_goal.unwrap_or_default(),
        }
    }
}

impl From<&UserProfile> for ProfileBody {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: Some(profile.name.clone()),
            email: Some(profile.email.clone()),
            phone: Some(profile.phone.clone()),
            linkedin: Some(profile.linkedin.clone()),
            career_goal: Some(profile.career_goal.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Count(#[serde(with = "lenient_count")] pub u64);

/// `GET /stats/status`: status name to count.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct StatusStatsResponse(pub BTreeMap<String, Count>);

impl StatusStatsResponse {
    /// Known statuses first in pipeline order, then any others by name.
    #[must_use]
    pub fn into_slices(self) -> Vec<StatusSlice> {
        let rank = |name: &str| {
            ApplicationStatus::ALL
                .iter()
                .position(|s| s.as_str() == name)
                .unwrap_or(ApplicationStatus::ALL.len())
        };
        let mut slices: Vec<StatusSlice> = self
            .0
            .into_iter()
            .map(|(status, Count(count))| StatusSlice { status, count })
            .collect();
        slices.sort_by_key(|slice| rank(&slice.status));
        slices
    }
}

#[derive(Debug, Deserialize)]
pub struct TimelineItem {
    #[serde(default)]
    pub date: String,
    #[serde(with = "lenient_count")]
    pub count: u64,
}

impl From<TimelineItem> for TimelinePoint {
    fn from(item: TimelineItem) -> Self {
        Self {
            date: item.date,
            count: item.count,
        }
    }
}
