//! Job application entity.

use std::fmt;
use std::str::FromStr;

use super::{ApplicationId, CompanyId, Note};

/// Pipeline stage of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApplicationStatus {
    /// Application sent, no response yet.
    #[default]
    Applied,
    /// Phone screen stage.
    Phone,
    /// Interview stage.
    Interview,
    /// Offer received.
    Offer,
    /// Application rejected.
    Rejected,
}

impl ApplicationStatus {
    /// All statuses in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Applied,
        Self::Phone,
        Self::Interview,
        Self::Offer,
        Self::Rejected,
    ];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Phone => "phone",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Phone => "Phone",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Company summary embedded in an application record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRef {
    /// Company identifier.
    pub id: Option<CompanyId>,
    /// Company name.
    pub name: String,
}

/// Job application record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    id: ApplicationId,
    title: String,
    company_id: Option<CompanyId>,
    company: Option<CompanyRef>,
    location: Option<String>,
    status: ApplicationStatus,
    notes: Vec<Note>,
}

impl Application {
    /// Fallback shown when the company cannot be resolved.
    pub const UNKNOWN_COMPANY: &'static str = "Unknown";

    /// Creates a new application.
    #[must_use]
    pub fn new(
        id: impl Into<ApplicationId>,
        title: impl Into<String>,
        status: ApplicationStatus,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company_id: None,
            company: None,
            location: None,
            status,
            notes: Vec::new(),
        }
    }

    /// Sets the referenced company.
    #[must_use]
    pub fn with_company_id(mut self, company_id: impl Into<CompanyId>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    /// Sets the embedded company summary.
    #[must_use]
    pub fn with_company(mut self, company: CompanyRef) -> Self {
        self.company = Some(company);
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.location = (!location.is_empty()).then_some(location);
        self
    }

    /// Sets the attached notes.
    #[must_use]
    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }

    /// Returns the application ID.
    #[must_use]
    pub const fn id(&self) -> &ApplicationId {
        &self.id
    }

    /// Returns the job title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the referenced company ID.
    #[must_use]
    pub const fn company_id(&self) -> Option<&CompanyId> {
        self.company_id.as_ref()
    }

    /// Returns the embedded company summary.
    #[must_use]
    pub const fn company(&self) -> Option<&CompanyRef> {
        self.company.as_ref()
    }

    /// Returns the company name, or the unknown fallback.
    #[must_use]
    pub fn company_name(&self) -> &str {
        self.company
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(Self::UNKNOWN_COMPANY)
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Returns the attached notes.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}
