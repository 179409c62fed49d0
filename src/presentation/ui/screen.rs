//! Contract between the App and its screens.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Frame, layout::Rect, widgets::TableState};

use crate::application::dto::Credentials;
use crate::application::services::{Mutation, Query, QueryData};

use super::Route;

/// Requests a screen hands back to the App after a key press.
///
/// Screens never perform I/O; the App dispatches these on tasks.
#[derive(Debug)]
pub enum ScreenCommand {
    None,
    /// Read the listed collections.
    Fetch(Vec<Query>),
    /// Perform a write, then refetch what it invalidates.
    Mutate(Mutation),
    /// Ask first; the mutation runs only if the user agrees.
    Confirm { prompt: String, mutation: Mutation },
    /// Show a validation message without touching the network.
    Invalid(String),
    /// Sign up or log in.
    Authenticate(Credentials),
    /// Open a URL with the system handler.
    Open(String),
    Navigate(Route),
}

impl ScreenCommand {
    /// Wraps a mutation in a yes/no prompt.
    #[must_use]
    pub fn confirm(prompt: &str, mutation: Mutation) -> Self {
        Self::Confirm {
            prompt: prompt.to_string(),
            mutation,
        }
    }
}

pub type KeyHints = &'static [(&'static str, &'static str)];

pub trait Screen {
    fn route(&self) -> Route;

    fn handle_key(&mut self, key: KeyEvent) -> ScreenCommand;

    /// Collections this screen shows; refetched on entry and after invalidation.
    fn queries(&self) -> Vec<Query> {
        Vec::new()
    }

    /// Replaces the screen's copy of a collection.
    fn apply(&mut self, _data: QueryData) {}

    /// Called once a mutation issued by this screen succeeded.
    fn mutation_succeeded(&mut self, _mutation: &Mutation) {}

    /// Whether a text field currently owns plain keys.
    fn is_editing(&self) -> bool {
        false
    }

    fn hints(&self) -> KeyHints;

    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Moves a table selection with Up/Down/j/k/Home/End. Returns whether the key
/// was a movement key.
pub fn step_selection(state: &mut TableState, len: usize, key: &KeyEvent) -> bool {
    if len == 0 {
        state.select(None);
        return matches!(
            key.code,
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j' | 'k') | KeyCode::Home | KeyCode::End
        );
    }
    let current = state.selected().unwrap_or(0).min(len - 1);
    let next = match key.code {
        KeyCode::Down | KeyCode::Char('j') => (current + 1).min(len - 1),
        KeyCode::Up | KeyCode::Char('k') => current.saturating_sub(1),
        KeyCode::Home => 0,
        KeyCode::End => len - 1,
        _ => return false,
    };
    state.select(Some(next));
    true
}

/// Keeps a table selection inside a list that just changed length.
pub fn clamp_selection(state: &mut TableState, len: usize) {
    match (state.selected(), len) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(i), _) if i >= len => state.select(Some(len - 1)),
        _ => {}
    }
}
