//! Reminders list and form.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::application::services::reminder_clock::INPUT_HINT;
use crate::application::services::{Mutation, Query, QueryData, ReminderClock};
use crate::domain::entities::{Application, ApplicationId, Reminder};
use crate::domain::ports::{ApplicationFilter, ReminderDraft};
use crate::presentation::events::{cycle_focus, focus_move, is_cancel_event, is_submit_event};
use crate::presentation::widgets::{Selector, TextInput};

use super::Route;
use super::screen::{KeyHints, Screen, ScreenCommand, clamp_selection, step_selection};

const UNKNOWN_COMPANY: &str = "Unknown Company";
const UNKNOWN_ROLE: &str = "Unknown Role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReminderFocus {
    Application,
    RemindAt,
    Note,
    List,
}

const FOCUS_ORDER: [ReminderFocus; 4] = [
    ReminderFocus::Application,
    ReminderFocus::RemindAt,
    ReminderFocus::Note,
    ReminderFocus::List,
];

/// Company and role of the application a reminder belongs to.
#[must_use]
pub fn owner_labels<'a>(
    application_id: &ApplicationId,
    applications: &'a [Application],
) -> (&'a str, &'a str) {
    let Some(app) = applications.iter().find(|a| a.id() == application_id) else {
        return (UNKNOWN_COMPANY, UNKNOWN_ROLE);
    };
    let company = app
        .company()
        .map(|c| c.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_COMPANY);
    let title = Some(app.title())
        .filter(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_ROLE);
    (company, title)
}

/// Table cells for one reminder.
#[must_use]
pub fn reminder_cells(
    reminder: &Reminder,
    applications: &[Application],
    clock: &ReminderClock,
) -> [String; 5] {
    let (company, title) = owner_labels(reminder.application_id(), applications);
    [
        company.to_string(),
        title.to_string(),
        reminder
            .note()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("—")
            .to_string(),
        clock.format(reminder.remind_at()),
        reminder.status().to_string(),
    ]
}

fn application_options(applications: &[Application]) -> Vec<(ApplicationId, String)> {
    applications
        .iter()
        .map(|app| {
            (
                app.id().clone(),
                format!("{} — {}", app.company_name(), app.title()),
            )
        })
        .collect()
}

pub struct RemindersScreen {
    clock: ReminderClock,
    reminders: Vec<Reminder>,
    applications: Vec<Application>,
    table: TableState,
    application: Selector<ApplicationId>,
    remind_at: TextInput,
    note: TextInput,
    focus: ReminderFocus,
}

impl RemindersScreen {
    #[must_use]
    pub fn new(clock: ReminderClock) -> Self {
        let mut screen = Self {
            clock,
            reminders: Vec::new(),
            applications: Vec::new(),
            table: TableState::default(),
            application: Selector::with_placeholder(
                "Application",
                "Select Application",
                Vec::new(),
            ),
            remind_at: TextInput::new("Remind at").placeholder(INPUT_HINT),
            note: TextInput::new("Note").placeholder("Reminder note"),
            focus: ReminderFocus::Application,
        };
        screen.sync_focus();
        screen
    }

    #[must_use]
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    fn reset_form(&mut self) {
        self.application.reset();
        self.remind_at.clear();
        self.note.clear();
    }

    fn submit(&self) -> ScreenCommand {
        let Some(application_id) = self.application.selected() else {
            return ScreenCommand::Invalid("Select an application".to_string());
        };
        let remind_at = match self.clock.parse_input(self.remind_at.value()) {
            Ok(at) => at,
            Err(e) => return ScreenCommand::Invalid(e.to_string()),
        };
        ScreenCommand::Mutate(Mutation::CreateReminder(ReminderDraft {
            application_id: application_id.clone(),
            note: self.note.value().trim().to_string(),
            remind_at,
        }))
    }

    fn selected(&self) -> Option<&Reminder> {
        self.table.selected().and_then(|i| self.reminders.get(i))
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> ScreenCommand {
        if step_selection(&mut self.table, self.reminders.len(), &key) {
            return ScreenCommand::None;
        }
        let Some(reminder) = self.selected() else {
            return ScreenCommand::None;
        };
        match key.code {
            KeyCode::Char('x') if reminder.can_dismiss() => {
                ScreenCommand::Mutate(Mutation::DismissReminder(reminder.id().clone()))
            }
            KeyCode::Char('d') => ScreenCommand::confirm(
                "Delete this reminder?",
                Mutation::DeleteReminder(reminder.id().clone()),
            ),
            _ => ScreenCommand::None,
        }
    }

    fn sync_focus(&mut self) {
        self.application
            .set_focused(self.focus == ReminderFocus::Application);
        self.remind_at
            .set_focused(self.focus == ReminderFocus::RemindAt);
        self.note.set_focused(self.focus == ReminderFocus::Note);
    }
}

impl Screen for RemindersScreen {
    fn route(&self) -> Route {
        Route::Reminders
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenCommand {
        if let Some(direction) = focus_move(&key) {
            self.focus = cycle_focus(&FOCUS_ORDER, self.focus, direction);
            self.sync_focus();
            return ScreenCommand::None;
        }

        if is_cancel_event(&key) {
            self.reset_form();
            return ScreenCommand::None;
        }

        match self.focus {
            ReminderFocus::List => self.handle_list_key(key),
            _ if is_submit_event(&key) => self.submit(),
            ReminderFocus::Application => {
                self.application.handle_key(key);
                ScreenCommand::None
            }
            ReminderFocus::RemindAt => {
                self.remind_at.handle_key(key);
                ScreenCommand::None
            }
            ReminderFocus::Note => {
                self.note.handle_key(key);
                ScreenCommand::None
            }
        }
    }

    fn queries(&self) -> Vec<Query> {
        vec![
            Query::Reminders,
            Query::Applications(ApplicationFilter::default()),
        ]
    }

    fn apply(&mut self, data: QueryData) {
        match data {
            QueryData::Reminders(reminders) => {
                self.reminders = reminders;
                clamp_selection(&mut self.table, self.reminders.len());
            }
            QueryData::Applications(applications) => {
                self.application
                    .set_options(application_options(&applications));
                self.applications = applications;
            }
            _ => {}
        }
    }

    fn mutation_succeeded(&mut self, mutation: &Mutation) {
        if matches!(mutation, Mutation::CreateReminder(_)) {
            self.reset_form();
        }
    }

    fn is_editing(&self) -> bool {
        matches!(self.focus, ReminderFocus::RemindAt | ReminderFocus::Note)
    }

    fn hints(&self) -> KeyHints {
        if self.focus == ReminderFocus::List {
            &[("x", "dismiss"), ("d", "delete"), ("Tab", "form")]
        } else {
            &[("Tab", "next field"), ("Enter", "add"), ("Esc", "reset")]
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [form_area, list_area] =
            Layout::vertical([Constraint::Length(5), Constraint::Min(3)]).areas(area);

        let form_block = Block::default()
            .borders(Borders::ALL)
            .title(" Add reminder ");
        let form_inner = form_block.inner(form_area);
        frame.render_widget(form_block, form_area);
        let [app_area, at_area, note_area] = Layout::horizontal([
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
        ])
        .areas(form_inner);
        frame.render_widget(&self.application, app_area);
        frame.render_widget(&self.remind_at, at_area);
        frame.render_widget(&self.note, note_area);

        let list_block = Block::default()
            .borders(Borders::ALL)
            .title(" Your reminders ")
            .border_style(if self.focus == ReminderFocus::List {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            });

        if self.reminders.is_empty() {
            frame.render_widget(Paragraph::new("No reminders set").block(list_block), list_area);
            return;
        }

        let rows: Vec<Row> = self
            .reminders
            .iter()
            .map(|reminder| {
                let [company, title, note, at, status] =
                    reminder_cells(reminder, &self.applications, &self.clock);
                let status_style = if reminder.status().is_pending() {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Row::new(vec![
                    Cell::from(company),
                    Cell::from(title),
                    Cell::from(note),
                    Cell::from(at),
                    Cell::from(status).style(status_style),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(25),
                Constraint::Percentage(22),
                Constraint::Percentage(13),
            ],
        )
        .header(
            Row::new(vec!["Company", "Role", "Note", "When", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(list_block)
        .row_highlight_style(Style::default().bg(Color::DarkGray));

        frame.render_stateful_widget(table, list_area, &mut self.table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ApplicationStatus, CompanyRef, ReminderStatus};
    use chrono::{TimeZone, Utc};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn utc_clock() -> ReminderClock {
        ReminderClock::fixed(0).unwrap()
    }

    fn engineer() -> Application {
        Application::new("10", "Engineer", ApplicationStatus::Applied).with_company(CompanyRef {
            id: Some("1".into()),
            name: "Acme".to_string(),
        })
    }

    fn reminder(id: &str, status: ReminderStatus) -> Reminder {
        Reminder::new(
            id,
            "10",
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
            status,
        )
    }

    fn list_screen(reminders: Vec<Reminder>) -> RemindersScreen {
        let mut screen = RemindersScreen::new(utc_clock());
        screen.apply(QueryData::Applications(vec![engineer()]));
        screen.apply(QueryData::Reminders(reminders));
        screen.handle_key(key(KeyCode::BackTab));
        screen
    }

    #[test]
    fn test_row_fallbacks() {
        let orphan = Reminder::new(
            "1",
            "99",
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
            ReminderStatus::Pending,
        );
        let cells = reminder_cells(&orphan, &[engineer()], &utc_clock());
        assert_eq!(cells[0], "Unknown Company");
        assert_eq!(cells[1], "Unknown Role");
        assert_eq!(cells[2], "—");
        assert_eq!(cells[3], "05 Mar 2024, 02:30 PM");
        assert_eq!(cells[4], "pending");

        let cells = reminder_cells(
            &reminder("2", ReminderStatus::Dismissed).with_note("Follow up"),
            &[engineer()],
            &utc_clock(),
        );
        assert_eq!(cells[0], "Acme");
        assert_eq!(cells[1], "Engineer");
        assert_eq!(cells[2], "Follow up");
    }

    #[test]
    fn test_only_pending_reminders_can_be_dismissed() {
        let mut screen = list_screen(vec![reminder("1", ReminderStatus::Dismissed)]);
        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('x'))),
            ScreenCommand::None
        ));

        let mut screen = list_screen(vec![reminder("1", ReminderStatus::Pending)]);
        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('x'))),
            ScreenCommand::Mutate(Mutation::DismissReminder(id)) if id.as_str() == "1"
        ));
    }

    #[test]
    fn test_delete_asks_first() {
        let mut screen = list_screen(vec![reminder("1", ReminderStatus::Pending)]);
        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('d'))),
            ScreenCommand::Confirm { ref prompt, mutation: Mutation::DeleteReminder(_) }
                if prompt == "Delete this reminder?"
        ));
    }

    #[test]
    fn test_submit_parses_time_in_display_offset() {
        let mut screen = RemindersScreen::new(ReminderClock::fixed(330).unwrap());
        screen.apply(QueryData::Applications(vec![engineer()]));

        assert!(matches!(
            screen.handle_key(key(KeyCode::Enter)),
            ScreenCommand::Invalid(msg) if msg == "Select an application"
        ));

        screen.handle_key(key(KeyCode::Right));
        screen.handle_key(key(KeyCode::Tab));
        assert!(matches!(
            screen.handle_key(key(KeyCode::Enter)),
            ScreenCommand::Invalid(msg) if msg == "Reminder time is required"
        ));

        for c in "2024-03-05 20:00".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
        let ScreenCommand::Mutate(mutation) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected reminder");
        };
        let Mutation::CreateReminder(draft) = &mutation else {
            panic!("expected create, got {mutation:?}");
        };
        assert_eq!(draft.application_id, ApplicationId::from("10"));
        assert_eq!(
            draft.remind_at,
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
        );

        screen.mutation_succeeded(&mutation);
        assert!(screen.application.selected().is_none());
        assert!(screen.remind_at.value().is_empty());
    }

    #[test]
    fn test_application_labels() {
        assert_eq!(
            application_options(&[engineer()]),
            vec![(ApplicationId::from("10"), "Acme — Engineer".to_string())]
        );
    }
}
