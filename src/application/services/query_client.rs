//! Cache-invalidation layer over the tracker port.
//!
//! Reads are named by [`Query`]; writes by [`Mutation`]. Every mutation
//! declares which collections it invalidates, and [`QueryClient`] refetches
//! the visible ones after the write succeeds. The next read of an invalidated
//! collection therefore always reflects the mutation.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::entities::{
    Application, ApplicationId, Company, CompanyId, NoteId, Reminder, ReminderId, StatusSlice,
    TimelinePoint, UserProfile,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    ApplicationDraft, ApplicationFilter, CompanyDraft, ReminderDraft, TrackerPort,
};

/// Readable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Applications,
    Companies,
    Reminders,
    Profile,
    StatusStats,
    Timeline,
}

impl QueryKey {
    /// Every key.
    pub const ALL: [Self; 6] = [
        Self::Applications,
        Self::Companies,
        Self::Reminders,
        Self::Profile,
        Self::StatusStats,
        Self::Timeline,
    ];
}

/// A read request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Applications(ApplicationFilter),
    Companies,
    Reminders,
    Profile,
    StatusStats,
    Timeline,
}

impl Query {
    /// Returns the collection this query reads.
    #[must_use]
    pub const fn key(&self) -> QueryKey {
        match self {
            Self::Applications(_) => QueryKey::Applications,
            Self::Companies => QueryKey::Companies,
            Self::Reminders => QueryKey::Reminders,
            Self::Profile => QueryKey::Profile,
            Self::StatusStats => QueryKey::StatusStats,
            Self::Timeline => QueryKey::Timeline,
        }
    }

    /// Alert text when the read fails without a server message.
    #[must_use]
    pub const fn error_fallback(&self) -> &'static str {
        match self {
            Self::Applications(_) => "Error fetching applications",
            Self::Companies => "Error fetching companies",
            Self::Reminders => "Error fetching reminders",
            Self::Profile => "Error fetching profile",
            Self::StatusStats | Self::Timeline => "Error fetching statistics",
        }
    }
}

/// Result of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryData {
    Applications(Vec<Application>),
    Companies(Vec<Company>),
    Reminders(Vec<Reminder>),
    Profile(UserProfile),
    StatusStats(Vec<StatusSlice>),
    Timeline(Vec<TimelinePoint>),
}

/// A write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateApplication(ApplicationDraft),
    UpdateApplication {
        id: ApplicationId,
        draft: ApplicationDraft,
    },
    DeleteApplication(ApplicationId),
    AddNote {
        application_id: ApplicationId,
        content: String,
    },
    DeleteNote(NoteId),
    CreateCompany(CompanyDraft),
    UpdateCompany {
        id: CompanyId,
        draft: CompanyDraft,
    },
    DeleteCompany(CompanyId),
    CreateReminder(ReminderDraft),
    DeleteReminder(ReminderId),
    DismissReminder(ReminderId),
    UpdateProfile(UserProfile),
}

impl Mutation {
    /// Collections whose next read must reflect this mutation.
    #[must_use]
    pub const fn invalidates(&self) -> &'static [QueryKey] {
        match self {
            Self::CreateApplication(_)
            | Self::UpdateApplication { .. }
            | Self::DeleteApplication(_) => &[
                QueryKey::Applications,
                QueryKey::StatusStats,
                QueryKey::Timeline,
            ],
            Self::AddNote { .. } | Self::DeleteNote(_) => &[QueryKey::Applications],
            Self::CreateCompany(_) | Self::UpdateCompany { .. } | Self::DeleteCompany(_) => {
                &[QueryKey::Companies, QueryKey::Applications]
            }
            Self::CreateReminder(_) | Self::DeleteReminder(_) | Self::DismissReminder(_) => {
                &[QueryKey::Reminders]
            }
            Self::UpdateProfile(_) => &[QueryKey::Profile],
        }
    }

    /// Alert text when the write fails without a server message.
    #[must_use]
    pub const fn error_fallback(&self) -> &'static str {
        match self {
            Self::CreateApplication(_) | Self::UpdateApplication { .. } => {
                "Error saving application"
            }
            Self::AddNote { .. } => "Error adding note",
            Self::DeleteNote(_) => "Error deleting note",
            Self::CreateCompany(_) | Self::UpdateCompany { .. } => "Error saving company",
            Self::CreateReminder(_) => "Error creating reminder",
            Self::DismissReminder(_) => "Dismiss failed",
            Self::UpdateProfile(_) => "Error updating profile",
            Self::DeleteApplication(_) | Self::DeleteCompany(_) | Self::DeleteReminder(_) => {
                "Delete failed"
            }
        }
    }

    /// Alert text shown after the write succeeds, for writes that announce it.
    #[must_use]
    pub const fn success_message(&self) -> Option<&'static str> {
        match self {
            Self::CreateReminder(_) => Some("Reminder added"),
            Self::UpdateProfile(_) => Some("Profile updated successfully!"),
            _ => None,
        }
    }
}

/// Outcome of a mutation followed by its refetches.
#[derive(Debug)]
pub struct MutationOutcome {
    /// Keys the mutation invalidated.
    pub invalidated: Vec<QueryKey>,
    /// Refetch results, in request order.
    pub refetched: Vec<(Query, Result<QueryData, ApiError>)>,
}

/// Returns the visible queries an invalidation requires refetching, once each.
#[must_use]
pub fn plan_refetch(invalidated: &[QueryKey], visible: &[Query]) -> Vec<Query> {
    let mut seen = HashSet::new();
    visible
        .iter()
        .filter(|query| invalidated.contains(&query.key()) && seen.insert(query.key()))
        .cloned()
        .collect()
}

/// Executes queries and mutations, tracking which collections are stale.
pub struct QueryClient {
    port: Arc<dyn TrackerPort>,
    stale: Mutex<HashSet<QueryKey>>,
}

impl QueryClient {
    /// Creates a client; every collection starts stale.
    #[must_use]
    pub fn new(port: Arc<dyn TrackerPort>) -> Self {
        Self {
            port,
            stale: Mutex::new(QueryKey::ALL.into_iter().collect()),
        }
    }

    /// Returns whether the collection must be refetched before it is trusted.
    #[must_use]
    pub fn is_stale(&self, key: QueryKey) -> bool {
        self.stale.lock().contains(&key)
    }

    /// Performs a read; a successful read clears the key's stale mark.
    ///
    /// # Errors
    /// Returns the port error unchanged.
    pub async fn fetch(&self, query: &Query) -> Result<QueryData, ApiError> {
        debug!(?query, "Fetching");
        let data = match query {
            Query::Applications(filter) => {
                QueryData::Applications(self.port.list_applications(filter).await?)
            }
            Query::Companies => QueryData::Companies(self.port.list_companies().await?),
            Query::Reminders => QueryData::Reminders(self.port.list_reminders().await?),
            Query::Profile => QueryData::Profile(self.port.fetch_profile().await?),
            Query::StatusStats => QueryData::StatusStats(self.port.status_stats().await?),
            Query::Timeline => QueryData::Timeline(self.port.timeline_stats().await?),
        };
        self.stale.lock().remove(&query.key());
        Ok(data)
    }

    /// Performs a write; on success marks the declared keys stale.
    ///
    /// # Errors
    /// Returns the port error unchanged; nothing is invalidated on failure.
    pub async fn mutate(&self, mutation: &Mutation) -> Result<Vec<QueryKey>, ApiError> {
        debug!(?mutation, "Mutating");
        match mutation {
            Mutation::CreateApplication(draft) => self.port.create_application(draft).await,
            Mutation::UpdateApplication { id, draft } => {
                self.port.update_application(id, draft).await
            }
            Mutation::DeleteApplication(id) => self.port.delete_application(id).await,
            Mutation::AddNote {
                application_id,
                content,
            } => self.port.add_note(application_id, content).await,
            Mutation::DeleteNote(id) => self.port.delete_note(id).await,
            Mutation::CreateCompany(draft) => self.port.create_company(draft).await,
            Mutation::UpdateCompany { id, draft } => self.port.update_company(id, draft).await,
            Mutation::DeleteCompany(id) => self.port.delete_company(id).await,
            Mutation::CreateReminder(draft) => self.port.create_reminder(draft).await,
            Mutation::DeleteReminder(id) => self.port.delete_reminder(id).await,
            Mutation::DismissReminder(id) => self.port.dismiss_reminder(id).await,
            Mutation::UpdateProfile(profile) => self.port.update_profile(profile).await,
        }
        .inspect_err(|e| warn!(error = %e, ?mutation, "Mutation failed"))?;

        let invalidated = mutation.invalidates().to_vec();
        self.stale.lock().extend(invalidated.iter().copied());
        Ok(invalidated)
    }

    /// Performs a write, then refetches the visible queries it invalidated.
    ///
    /// # Errors
    /// Returns the write error; refetch errors are reported per query in the outcome.
    pub async fn mutate_and_refetch(
        &self,
        mutation: &Mutation,
        visible: &[Query],
    ) -> Result<MutationOutcome, ApiError> {
        let invalidated = self.mutate(mutation).await?;
        let mut refetched = Vec::new();
        for query in plan_refetch(&invalidated, visible) {
            let result = self.fetch(&query).await;
            refetched.push((query, result));
        }
        Ok(MutationOutcome {
            invalidated,
            refetched,
        })
    }
}
