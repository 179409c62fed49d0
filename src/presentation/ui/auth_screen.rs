//! Sign-up / log-in screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::application::dto::{AuthMode, Credentials};
use crate::presentation::events::{cycle_focus, focus_move, is_submit_event};
use crate::presentation::widgets::{TextInput, centered};

use super::Route;
use super::screen::{KeyHints, Screen, ScreenCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
}

pub struct AuthScreen {
    mode: AuthMode,
    name: TextInput,
    email: TextInput,
    password: TextInput,
    focus: AuthField,
    submitting: bool,
}

impl Default for AuthScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthScreen {
    #[must_use]
    pub fn new() -> Self {
        let mut screen = Self {
            mode: AuthMode::default(),
            name: TextInput::new("Name").placeholder("Enter your name"),
            email: TextInput::new("Email").placeholder("Enter your email"),
            password: TextInput::new("Password")
                .password()
                .placeholder("Enter your password"),
            focus: AuthField::Name,
            submitting: false,
        };
        screen.sync_focus();
        screen
    }

    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Fields shown for the current mode, in focus order.
    #[must_use]
    pub fn visible_fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Signup => &[AuthField::Name, AuthField::Email, AuthField::Password],
            AuthMode::Login => &[AuthField::Email, AuthField::Password],
        }
    }

    /// Re-enables the form after a failed attempt.
    pub fn submission_failed(&mut self) {
        self.submitting = false;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        if !self.visible_fields().contains(&self.focus) {
            self.focus = AuthField::Email;
        }
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        self.name.set_focused(self.focus == AuthField::Name);
        self.email.set_focused(self.focus == AuthField::Email);
        self.password.set_focused(self.focus == AuthField::Password);
    }

    fn credentials(&self) -> Credentials {
        match self.mode {
            AuthMode::Signup => Credentials::signup(
                self.name.value(),
                self.email.value(),
                self.password.value(),
            ),
            AuthMode::Login => Credentials::login(self.email.value(), self.password.value()),
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            AuthField::Name => &mut self.name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }
}

impl Screen for AuthScreen {
    fn route(&self) -> Route {
        Route::Auth
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenCommand {
        if self.submitting {
            return ScreenCommand::None;
        }

        if key.code == KeyCode::Char('t') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.toggle_mode();
            return ScreenCommand::None;
        }

        if let Some(direction) = focus_move(&key) {
            self.focus = cycle_focus(self.visible_fields(), self.focus, direction);
            self.sync_focus();
            return ScreenCommand::None;
        }

        if is_submit_event(&key) {
            self.submitting = true;
            return ScreenCommand::Authenticate(self.credentials());
        }

        self.focused_input().handle_key(key);
        ScreenCommand::None
    }

    fn is_editing(&self) -> bool {
        true
    }

    fn hints(&self) -> KeyHints {
        &[
            ("Tab", "next field"),
            ("Enter", "submit"),
            ("^T", "switch sign up / log in"),
        ]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let fields = self.visible_fields();
        let height = u16::try_from(fields.len() * 3 + 5).unwrap_or(u16::MAX);
        let panel = centered(area, 50.min(area.width), height.min(area.height));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.mode.title()))
            .title_style(Style::default().add_modifier(Modifier::BOLD));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let mut constraints = vec![Constraint::Length(3); fields.len()];
        constraints.extend([Constraint::Length(1), Constraint::Length(1)]);
        let rows = Layout::vertical(constraints).split(inner);

        for (field, row) in fields.iter().zip(rows.iter()) {
            match field {
                AuthField::Name => frame.render_widget(&self.name, *row),
                AuthField::Email => frame.render_widget(&self.email, *row),
                AuthField::Password => frame.render_widget(&self.password, *row),
            }
        }

        let status = if self.submitting {
            Line::from(Span::styled(
                "Submitting...",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(Span::styled(
                format!("Enter: {}", self.mode.title()),
                Style::default().fg(Color::Green),
            ))
        };
        if let Some(row) = rows.get(fields.len()) {
            frame.render_widget(Paragraph::new(status), *row);
        }
        if let Some(row) = rows.get(fields.len() + 1) {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("{} (Ctrl+T)", self.mode.switch_hint()),
                    Style::default().fg(Color::Cyan),
                )),
                *row,
            );
        }
    }
}
