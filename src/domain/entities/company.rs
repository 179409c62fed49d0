//! Company entity.

use super::CompanyId;

/// Company the user is tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// Company identifier.
    pub id: CompanyId,
    /// Company name.
    pub name: String,
    /// Public website URL.
    pub website: Option<String>,
    /// Industry sector.
    pub industry: Option<String>,
    /// Headquarters or office location.
    pub location: Option<String>,
    /// Careers page URL.
    pub careers_page: Option<String>,
    /// Recruiting contact address.
    pub contact_email: Option<String>,
}

impl Company {
    /// Creates a company with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<CompanyId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            website: None,
            industry: None,
            location: None,
            careers_page: None,
            contact_email: None,
        }
    }

    /// Industry label for list rows.
    #[must_use]
    pub fn industry_label(&self) -> &str {
        non_empty(self.industry.as_deref()).unwrap_or("N/A")
    }

    /// Location label for list rows.
    #[must_use]
    pub fn location_label(&self) -> &str {
        non_empty(self.location.as_deref()).unwrap_or("Unknown")
    }

    /// Returns the `mailto:` link for the contact address.
    #[must_use]
    pub fn mailto(&self) -> Option<String> {
        non_empty(self.contact_email.as_deref()).map(|email| format!("mailto:{email}"))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
