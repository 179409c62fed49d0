//! Applications list with filters, form and per-application notes.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use crate::application::services::{Mutation, Query, QueryData};
use crate::domain::entities::{Application, ApplicationId, ApplicationStatus, Company, CompanyId};
use crate::domain::ports::{ApplicationDraft, ApplicationFilter};
use crate::presentation::events::{cycle_focus, focus_move, is_cancel_event, is_submit_event};
use crate::presentation::widgets::{Selector, TextInput};

use super::Route;
use super::screen::{KeyHints, Screen, ScreenCommand, clamp_selection, step_selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppFocus {
    Search,
    StatusFilter,
    Title,
    Company,
    Location,
    Status,
    List,
    NoteInput,
    Notes,
}

const FOCUS_ORDER: [AppFocus; 9] = [
    AppFocus::Search,
    AppFocus::StatusFilter,
    AppFocus::Title,
    AppFocus::Company,
    AppFocus::Location,
    AppFocus::Status,
    AppFocus::List,
    AppFocus::NoteInput,
    AppFocus::Notes,
];

fn status_options() -> Vec<(ApplicationStatus, String)> {
    ApplicationStatus::ALL
        .into_iter()
        .map(|s| (s, s.label().to_string()))
        .collect()
}

fn company_options(companies: &[Company]) -> Vec<(CompanyId, String)> {
    companies
        .iter()
        .map(|c| (c.id.clone(), c.name.clone()))
        .collect()
}

pub struct ApplicationsScreen {
    applications: Vec<Application>,
    table: TableState,
    search: TextInput,
    status_filter: Selector<ApplicationStatus>,
    title: TextInput,
    company: Selector<CompanyId>,
    location: TextInput,
    status: Selector<ApplicationStatus>,
    editing: Option<ApplicationId>,
    note_input: TextInput,
    note_drafts: HashMap<ApplicationId, String>,
    notes: ListState,
    focus: AppFocus,
}

impl Default for ApplicationsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationsScreen {
    #[must_use]
    pub fn new() -> Self {
        let mut screen = Self {
            applications: Vec::new(),
            table: TableState::default(),
            search: TextInput::new("Search").placeholder("Search by title/company/location"),
            status_filter: Selector::with_placeholder("Filter", "All statuses", status_options()),
            title: TextInput::new("Title").placeholder("Job title"),
            company: Selector::with_placeholder("Company", "-- Select Company --", Vec::new()),
            location: TextInput::new("Location").placeholder("Location"),
            status: Selector::new("Status", status_options()),
            editing: None,
            note_input: TextInput::new("Note").placeholder("Add a note..."),
            note_drafts: HashMap::new(),
            notes: ListState::default(),
            focus: AppFocus::List,
        };
        screen.sync_focus();
        screen
    }

    #[must_use]
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// Current filter state.
    #[must_use]
    pub fn filter(&self) -> ApplicationFilter {
        ApplicationFilter {
            status: self.status_filter.selected().copied(),
            q: self.search.value().to_string(),
        }
    }

    fn refetch(&self) -> ScreenCommand {
        ScreenCommand::Fetch(vec![Query::Applications(self.filter())])
    }

    fn clear_filters(&mut self) -> ScreenCommand {
        self.search.clear();
        self.status_filter.reset();
        self.refetch()
    }

    fn selected(&self) -> Option<&Application> {
        self.table.selected().and_then(|i| self.applications.get(i))
    }

    fn selected_id(&self) -> Option<ApplicationId> {
        self.selected().map(|app| app.id().clone())
    }

    fn reset_form(&mut self) {
        self.title.clear();
        self.company.reset();
        self.location.clear();
        self.status.reset();
        self.editing = None;
    }

    fn edit_selected(&mut self) {
        let Some(app) = self.selected().cloned() else {
            return;
        };
        self.title.set_value(app.title());
        self.company.select(app.company_id());
        self.location.set_value(app.location().unwrap_or_default());
        self.status.select(Some(&app.status()));
        self.editing = Some(app.id().clone());
        self.focus = AppFocus::Title;
        self.sync_focus();
    }

    fn submit_form(&self) -> ScreenCommand {
        let title = self.title.value().trim();
        if title.is_empty() {
            return ScreenCommand::Invalid("Job title is required".to_string());
        }
        let Some(company_id) = self.company.selected() else {
            return ScreenCommand::Invalid("Select a company".to_string());
        };
        let draft = ApplicationDraft {
            title: title.to_string(),
            company_id: company_id.clone(),
            location: self.location.value().trim().to_string(),
            status: self.status.selected().copied().unwrap_or_default(),
        };
        match &self.editing {
            Some(id) => ScreenCommand::Mutate(Mutation::UpdateApplication {
                id: id.clone(),
                draft,
            }),
            None => ScreenCommand::Mutate(Mutation::CreateApplication(draft)),
        }
    }

    /// Loads the note draft kept for the selected application.
    fn load_note_draft(&mut self) {
        let draft = self
            .selected_id()
            .and_then(|id| self.note_drafts.get(&id).cloned())
            .unwrap_or_default();
        self.note_input.set_value(draft);
        let notes = self.selected().map_or(0, |app| app.notes().len());
        match (self.notes.selected(), notes) {
            (_, 0) => self.notes.select(None),
            (None, _) => self.notes.select(Some(0)),
            (Some(i), n) if i >= n => self.notes.select(Some(n - 1)),
            _ => {}
        }
    }

    fn store_note_draft(&mut self) {
        if let Some(id) = self.selected_id() {
            self.note_drafts
                .insert(id, self.note_input.value().to_string());
        }
    }

    fn add_note(&self) -> ScreenCommand {
        let Some(id) = self.selected_id() else {
            return ScreenCommand::Invalid("Select an application first".to_string());
        };
        let content = self.note_input.value().trim();
        if content.is_empty() {
            return ScreenCommand::Invalid("Note is empty".to_string());
        }
        ScreenCommand::Mutate(Mutation::AddNote {
            application_id: id,
            content: content.to_string(),
        })
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> ScreenCommand {
        if step_selection(&mut self.table, self.applications.len(), &key) {
            self.notes.select(None);
            self.load_note_draft();
            return ScreenCommand::None;
        }
        match key.code {
            KeyCode::Char('/') => {
                self.focus = AppFocus::Search;
                self.sync_focus();
                ScreenCommand::None
            }
            KeyCode::Char('s') => {
                self.status_filter.next();
                self.refetch()
            }
            KeyCode::Char('C') => self.clear_filters(),
            KeyCode::Char('n') => {
                self.focus = AppFocus::NoteInput;
                self.sync_focus();
                ScreenCommand::None
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                self.edit_selected();
                ScreenCommand::None
            }
            KeyCode::Char('d') => self.selected_id().map_or(ScreenCommand::None, |id| {
                ScreenCommand::confirm(
                    "Delete this application?",
                    Mutation::DeleteApplication(id),
                )
            }),
            _ => ScreenCommand::None,
        }
    }

    fn handle_notes_key(&mut self, key: KeyEvent) -> ScreenCommand {
        let Some(app) = self.selected() else {
            return ScreenCommand::None;
        };
        let count = app.notes().len();
        let highlighted = self
            .notes
            .selected()
            .and_then(|i| app.notes().get(i))
            .map(|note| note.id.clone());

        match key.code {
            KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                let next = self.notes.selected().map_or(0, |i| (i + 1).min(count - 1));
                self.notes.select(Some(next));
                ScreenCommand::None
            }
            KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                let prev = self.notes.selected().map_or(0, |i| i.saturating_sub(1));
                self.notes.select(Some(prev));
                ScreenCommand::None
            }
            KeyCode::Char('d') | KeyCode::Delete => highlighted
                .map_or(ScreenCommand::None, |id| {
                    ScreenCommand::Mutate(Mutation::DeleteNote(id))
                }),
            _ => ScreenCommand::None,
        }
    }

    fn sync_focus(&mut self) {
        self.search.set_focused(self.focus == AppFocus::Search);
        self.status_filter
            .set_focused(self.focus == AppFocus::StatusFilter);
        self.title.set_focused(self.focus == AppFocus::Title);
        self.company.set_focused(self.focus == AppFocus::Company);
        self.location.set_focused(self.focus == AppFocus::Location);
        self.status.set_focused(self.focus == AppFocus::Status);
        self.note_input
            .set_focused(self.focus == AppFocus::NoteInput);
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Your applications ")
            .border_style(focus_border(self.focus == AppFocus::List));

        if self.applications.is_empty() {
            frame.render_widget(Paragraph::new("No applications found").block(block), area);
            return;
        }

        let rows: Vec<Row> = self
            .applications
            .iter()
            .map(|app| {
                Row::new(vec![
                    Cell::from(app.title()),
                    Cell::from(app.company_name()),
                    Cell::from(app.location().unwrap_or("")),
                    Cell::from(Span::styled(
                        app.status().label(),
                        Style::default().add_modifier(Modifier::ITALIC),
                    )),
                    Cell::from(app.notes().len().to_string()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(25),
                Constraint::Percentage(20),
                Constraint::Percentage(15),
                Constraint::Length(5),
            ],
        )
        .header(
            Row::new(vec!["Title", "Company", "Location", "Status", "Notes"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray));

        frame.render_stateful_widget(table, area, &mut self.table);
    }

    fn render_notes(&mut self, frame: &mut Frame, area: Rect) {
        let [input_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(2)]).areas(area);
        frame.render_widget(&self.note_input, input_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Notes ")
            .border_style(focus_border(self.focus == AppFocus::Notes));

        let items: Vec<ListItem> = self
            .selected()
            .map(|app| {
                app.notes()
                    .iter()
                    .map(|note| ListItem::new(Line::from(note.content.clone())))
                    .collect()
            })
            .unwrap_or_default();

        if items.is_empty() {
            frame.render_widget(Paragraph::new("No notes").block(block), list_area);
            return;
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray));
        frame.render_stateful_widget(list, list_area, &mut self.notes);
    }
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

impl Screen for ApplicationsScreen {
    fn route(&self) -> Route {
        Route::Applications
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenCommand {
        if let Some(direction) = focus_move(&key) {
            self.focus = cycle_focus(&FOCUS_ORDER, self.focus, direction);
            self.sync_focus();
            return ScreenCommand::None;
        }

        if is_cancel_event(&key) {
            if matches!(
                self.focus,
                AppFocus::Title | AppFocus::Company | AppFocus::Location | AppFocus::Status
            ) {
                self.reset_form();
            }
            self.focus = AppFocus::List;
            self.sync_focus();
            return ScreenCommand::None;
        }

        match self.focus {
            AppFocus::List => self.handle_list_key(key),
            AppFocus::Notes => self.handle_notes_key(key),
            AppFocus::Search => {
                let previous = self.search.value().to_string();
                self.search.handle_key(key);
                if self.search.value() == previous {
                    ScreenCommand::None
                } else {
                    self.refetch()
                }
            }
            AppFocus::StatusFilter => {
                if self.status_filter.handle_key(key) {
                    self.refetch()
                } else {
                    ScreenCommand::None
                }
            }
            AppFocus::NoteInput => {
                if is_submit_event(&key) {
                    return self.add_note();
                }
                if self.note_input.handle_key(key) {
                    self.store_note_draft();
                }
                ScreenCommand::None
            }
            AppFocus::Title | AppFocus::Company | AppFocus::Location | AppFocus::Status => {
                if is_submit_event(&key) {
                    return self.submit_form();
                }
                match self.focus {
                    AppFocus::Title => self.title.handle_key(key),
                    AppFocus::Company => self.company.handle_key(key),
                    AppFocus::Location => self.location.handle_key(key),
                    _ => self.status.handle_key(key),
                };
                ScreenCommand::None
            }
        }
    }

    fn queries(&self) -> Vec<Query> {
        vec![Query::Applications(self.filter()), Query::Companies]
    }

    fn apply(&mut self, data: QueryData) {
        match data {
            QueryData::Applications(applications) => {
                self.applications = applications;
                clamp_selection(&mut self.table, self.applications.len());
                self.load_note_draft();
            }
            QueryData::Companies(companies) => {
                self.company.set_options(company_options(&companies));
            }
            _ => {}
        }
    }

    fn mutation_succeeded(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::CreateApplication(_) | Mutation::UpdateApplication { .. } => {
                self.reset_form();
            }
            Mutation::AddNote { application_id, .. } => {
                self.note_drafts.remove(application_id);
                if self.selected_id().as_ref() == Some(application_id) {
                    self.note_input.clear();
                }
            }
            _ => {}
        }
    }

    fn is_editing(&self) -> bool {
        matches!(
            self.focus,
            AppFocus::Search | AppFocus::Title | AppFocus::Location | AppFocus::NoteInput
        )
    }

    fn hints(&self) -> KeyHints {
        match self.focus {
            AppFocus::List => &[
                ("e", "edit"),
                ("d", "delete"),
                ("n", "note"),
                ("/", "search"),
                ("s", "status"),
                ("C", "clear filters"),
            ],
            AppFocus::Notes => &[("d", "delete note"), ("Esc", "list")],
            AppFocus::NoteInput => &[("Enter", "add note"), ("Esc", "list")],
            AppFocus::Search | AppFocus::StatusFilter => &[("Tab", "next"), ("Esc", "list")],
            _ => &[("Tab", "next field"), ("Enter", "save"), ("Esc", "reset")],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [filters, form, body] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Min(4),
        ])
        .areas(area);

        let [search_area, filter_area] =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                .areas(filters);
        frame.render_widget(&self.search, search_area);
        frame.render_widget(&self.status_filter, filter_area);

        let title = if self.editing.is_some() {
            " Update application "
        } else {
            " Add application "
        };
        let form_block = Block::default().borders(Borders::ALL).title(title);
        let form_inner = form_block.inner(form);
        frame.render_widget(form_block, form);
        let [top, bottom] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).areas(form_inner);
        let halves = || Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]);
        let [title_area, company_area] = halves().areas(top);
        let [location_area, status_area] = halves().areas(bottom);
        frame.render_widget(&self.title, title_area);
        frame.render_widget(&self.company, company_area);
        frame.render_widget(&self.location, location_area);
        frame.render_widget(&self.status, status_area);

        let [list_area, notes_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(body);
        self.render_list(frame, list_area);
        self.render_notes(frame, notes_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CompanyRef, Note};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn focus(screen: &mut ApplicationsScreen, target: AppFocus) {
        screen.focus = target;
        screen.sync_focus();
    }

    fn app(id: &str, title: &str, notes: Vec<Note>) -> Application {
        Application::new(id, title, ApplicationStatus::Phone)
            .with_company_id("1")
            .with_company(CompanyRef {
                id: Some("1".into()),
                name: "Acme".to_string(),
            })
            .with_location("NY")
            .with_notes(notes)
    }

    fn loaded() -> ApplicationsScreen {
        let mut screen = ApplicationsScreen::new();
        screen.apply(QueryData::Companies(vec![Company::new("1", "Acme")]));
        screen.apply(QueryData::Applications(vec![
            app("10", "Engineer", vec![Note::new("100", "Called back")]),
            app("11", "Designer", Vec::new()),
        ]));
        screen
    }

    fn fetched_filter(command: ScreenCommand) -> ApplicationFilter {
        match command {
            ScreenCommand::Fetch(queries) => match queries.as_slice() {
                [Query::Applications(filter)] => filter.clone(),
                other => panic!("unexpected queries {other:?}"),
            },
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_every_filter_change_refetches_with_current_state() {
        let mut screen = ApplicationsScreen::new();
        focus(&mut screen, AppFocus::Search);
        let filter = fetched_filter(screen.handle_key(key(KeyCode::Char('r'))));
        assert_eq!(filter, ApplicationFilter::default().with_query("r"));

        focus(&mut screen, AppFocus::StatusFilter);
        let filter = fetched_filter(screen.handle_key(key(KeyCode::Right)));
        assert_eq!(
            filter,
            ApplicationFilter::default()
                .with_status(ApplicationStatus::Applied)
                .with_query("r")
        );

        focus(&mut screen, AppFocus::List);
        let filter = fetched_filter(screen.handle_key(key(KeyCode::Char('C'))));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_search_cursor_moves_do_not_refetch() {
        let mut screen = ApplicationsScreen::new();
        focus(&mut screen, AppFocus::Search);
        fetched_filter(screen.handle_key(key(KeyCode::Char('r'))));

        for code in [KeyCode::Left, KeyCode::Home, KeyCode::End, KeyCode::Right] {
            assert!(matches!(screen.handle_key(key(code)), ScreenCommand::None));
        }

        let filter = fetched_filter(screen.handle_key(key(KeyCode::Backspace)));
        assert!(filter.is_empty());
        assert!(matches!(
            screen.handle_key(key(KeyCode::Backspace)),
            ScreenCommand::None
        ));
    }

    #[test]
    fn test_queries_carry_filter_and_companies() {
        let mut screen = ApplicationsScreen::new();
        screen.handle_key(key(KeyCode::Char('s')));
        assert_eq!(
            screen.queries(),
            vec![
                Query::Applications(
                    ApplicationFilter::default().with_status(ApplicationStatus::Applied)
                ),
                Query::Companies,
            ]
        );
    }

    #[test]
    fn test_create_requires_company_and_resets_after_save() {
        let mut screen = loaded();
        focus(&mut screen, AppFocus::Title);
        for c in "Engineer".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
        assert!(matches!(
            screen.handle_key(key(KeyCode::Enter)),
            ScreenCommand::Invalid(msg) if msg == "Select a company"
        ));

        focus(&mut screen, AppFocus::Company);
        screen.handle_key(key(KeyCode::Right));
        focus(&mut screen, AppFocus::Location);
        for c in "NY".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }

        let ScreenCommand::Mutate(mutation) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected mutation");
        };
        assert_eq!(
            mutation,
            Mutation::CreateApplication(ApplicationDraft {
                title: "Engineer".to_string(),
                company_id: CompanyId::from("1"),
                location: "NY".to_string(),
                status: ApplicationStatus::Applied,
            })
        );

        screen.mutation_succeeded(&mutation);
        assert!(screen.title.value().is_empty());
        assert_eq!(screen.status.selected(), Some(&ApplicationStatus::Applied));
        assert_eq!(screen.company.selected(), None);
    }

    #[test]
    fn test_edit_loads_record_and_submits_update() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('e')));
        assert_eq!(screen.title.value(), "Engineer");

        let ScreenCommand::Mutate(Mutation::UpdateApplication { id, draft }) =
            screen.handle_key(key(KeyCode::Enter))
        else {
            panic!("expected update");
        };
        assert_eq!(id, ApplicationId::from("10"));
        assert_eq!(draft.status, ApplicationStatus::Phone);
        assert_eq!(draft.company_id, CompanyId::from("1"));
    }

    #[test]
    fn test_delete_application_asks_first() {
        let mut screen = loaded();
        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('d'))),
            ScreenCommand::Confirm { ref prompt, .. } if prompt == "Delete this application?"
        ));
    }

    #[test]
    fn test_note_drafts_are_per_application() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('n')));
        screen.handle_key(key(KeyCode::Char('x')));

        focus(&mut screen, AppFocus::List);
        screen.handle_key(key(KeyCode::Down));
        assert!(screen.note_input.value().is_empty());

        screen.handle_key(key(KeyCode::Up));
        assert_eq!(screen.note_input.value(), "x");

        focus(&mut screen, AppFocus::NoteInput);
        let ScreenCommand::Mutate(mutation) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected note");
        };
        assert_eq!(
            mutation,
            Mutation::AddNote {
                application_id: ApplicationId::from("10"),
                content: "x".to_string(),
            }
        );
        screen.mutation_succeeded(&mutation);
        assert!(screen.note_input.value().is_empty());
    }

    #[test]
    fn test_note_delete_needs_no_confirmation() {
        let mut screen = loaded();
        focus(&mut screen, AppFocus::Notes);
        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('d'))),
            ScreenCommand::Mutate(Mutation::DeleteNote(id)) if id.as_str() == "100"
        ));
    }
}
