//! Note entity.

use super::{ApplicationId, NoteId};

/// Free-text note attached to an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Note identifier.
    pub id: NoteId,
    /// Owning application, when the server reports it.
    pub application_id: Option<ApplicationId>,
    /// Note text.
    pub content: String,
}

impl Note {
    /// Creates a new note.
    #[must_use]
    pub fn new(id: impl Into<NoteId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            application_id: None,
            content: content.into(),
        }
    }
}
