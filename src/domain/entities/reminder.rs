//! Reminder entity.

use chrono::{DateTime, Utc};

use super::{ApplicationId, ReminderId};

/// Lifecycle state of a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReminderStatus {
    /// Waiting to fire.
    #[default]
    Pending,
    /// Dismissed by the user.
    Dismissed,
    /// Any other server-side state.
    Other(String),
}

impl ReminderStatus {
    /// Parses the wire value; unknown values are preserved.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "dismissed" => Self::Dismissed,
            _ => Self::Other(value.to_string()),
        }
    }

    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Dismissed => "dismissed",
            Self::Other(value) => value,
        }
    }

    /// Returns whether the reminder is still pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduled follow-up for an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    id: ReminderId,
    application_id: ApplicationId,
    note: Option<String>,
    remind_at: DateTime<Utc>,
    status: ReminderStatus,
}

impl Reminder {
    /// Creates a new reminder.
    #[must_use]
    pub fn new(
        id: impl Into<ReminderId>,
        application_id: impl Into<ApplicationId>,
        remind_at: DateTime<Utc>,
        status: ReminderStatus,
    ) -> Self {
        Self {
            id: id.into(),
            application_id: application_id.into(),
            note: None,
            remind_at,
            status,
        }
    }

    /// Sets the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = (!note.trim().is_empty()).then_some(note);
        self
    }

    /// Returns the reminder ID.
    #[must_use]
    pub const fn id(&self) -> &ReminderId {
        &self.id
    }

    /// Returns the owning application ID.
    #[must_use]
    pub const fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    /// Returns the note.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the scheduled time.
    #[must_use]
    pub const fn remind_at(&self) -> DateTime<Utc> {
        self.remind_at
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> &ReminderStatus {
        &self.status
    }

    /// Only pending reminders can be dismissed.
    #[must_use]
    pub const fn can_dismiss(&self) -> bool {
        self.status.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_status_from_wire() {
        assert_eq!(ReminderStatus::from_wire("pending"), ReminderStatus::Pending);
        assert_eq!(ReminderStatus::from_wire("Dismissed"), ReminderStatus::Dismissed);
        assert_eq!(
            ReminderStatus::from_wire("sent"),
            ReminderStatus::Other("sent".to_string())
        );
    }

    #[test]
    fn test_only_pending_can_dismiss() {
        let pending = Reminder::new("1", "10", at(), ReminderStatus::Pending);
        let dismissed = Reminder::new("2", "10", at(), ReminderStatus::Dismissed);
        let other = Reminder::new("3", "10", at(), ReminderStatus::from_wire("sent"));

        assert!(pending.can_dismiss());
        assert!(!dismissed.can_dismiss());
        assert!(!other.can_dismiss());
    }

    #[test]
    fn test_blank_note_is_none() {
        let reminder = Reminder::new("1", "10", at(), ReminderStatus::Pending).with_note("  ");
        assert!(reminder.note().is_none());
    }
}
