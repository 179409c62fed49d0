//! Profile editor.

use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::application::services::{Mutation, Query, QueryData};
use crate::domain::entities::UserProfile;
use crate::presentation::events::{cycle_focus, focus_move, is_submit_event};
use crate::presentation::widgets::TextInput;

use super::Route;
use super::screen::{KeyHints, Screen, ScreenCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileField {
    Name,
    Phone,
    Linkedin,
    CareerGoal,
}

const FOCUS_ORDER: [ProfileField; 4] = [
    ProfileField::Name,
    ProfileField::Phone,
    ProfileField::Linkedin,
    ProfileField::CareerGoal,
];

pub struct ProfileScreen {
    name: TextInput,
    email: TextInput,
    phone: TextInput,
    linkedin: TextInput,
    career_goal: TextInput,
    focus: ProfileField,
    loaded: bool,
}

impl Default for ProfileScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileScreen {
    #[must_use]
    pub fn new() -> Self {
        let mut screen = Self {
            name: TextInput::new("Name"),
            email: TextInput::new("Email").read_only(),
            phone: TextInput::new("Phone"),
            linkedin: TextInput::new("LinkedIn"),
            career_goal: TextInput::new("Career Goal"),
            focus: ProfileField::Name,
            loaded: false,
        };
        screen.sync_focus();
        screen
    }

    /// The record a save submits; email is passed back unchanged.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.value().to_string(),
            email: self.email.value().to_string(),
            phone: self.phone.value().to_string(),
            linkedin: self.linkedin.value().to_string(),
            career_goal: self.career_goal.value().to_string(),
        }
    }

    fn fill(&mut self, profile: UserProfile) {
        self.name.set_value(profile.name);
        self.email.set_value(profile.email);
        self.phone.set_value(profile.phone);
        self.linkedin.set_value(profile.linkedin);
        self.career_goal.set_value(profile.career_goal);
        self.loaded = true;
    }

    fn sync_focus(&mut self) {
        self.name.set_focused(self.focus == ProfileField::Name);
        self.phone.set_focused(self.focus == ProfileField::Phone);
        self.linkedin.set_focused(self.focus == ProfileField::Linkedin);
        self.career_goal
            .set_focused(self.focus == ProfileField::CareerGoal);
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            ProfileField::Name => &mut self.name,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Linkedin => &mut self.linkedin,
            ProfileField::CareerGoal => &mut self.career_goal,
        }
    }
}

impl Screen for ProfileScreen {
    fn route(&self) -> Route {
        Route::Profile
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenCommand {
        if let Some(direction) = focus_move(&key) {
            self.focus = cycle_focus(&FOCUS_ORDER, self.focus, direction);
            self.sync_focus();
            return ScreenCommand::None;
        }

        if is_submit_event(&key) {
            if !self.loaded {
                return ScreenCommand::Invalid("Profile is still loading".to_string());
            }
            return ScreenCommand::Mutate(Mutation::UpdateProfile(self.profile()));
        }

        self.focused_input().handle_key(key);
        ScreenCommand::None
    }

    fn queries(&self) -> Vec<Query> {
        vec![Query::Profile]
    }

    fn apply(&mut self, data: QueryData) {
        if let QueryData::Profile(profile) = data {
            self.fill(profile);
        }
    }

    fn is_editing(&self) -> bool {
        true
    }

    fn hints(&self) -> KeyHints {
        &[("Tab", "next field"), ("Enter", "Update Profile")]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" My Profile ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [name, email, phone, linkedin, goal, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(&self.name, name);
        frame.render_widget(&self.email, email);
        frame.render_widget(&self.phone, phone);
        frame.render_widget(&self.linkedin, linkedin);
        frame.render_widget(&self.career_goal, goal);

        if !self.loaded {
            frame.render_widget(
                Paragraph::new("Loading profile...").style(Style::default().fg(Color::Yellow)),
                status,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_save_sends_email_unchanged() {
        let mut screen = ProfileScreen::new();
        screen.apply(QueryData::Profile(UserProfile {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..UserProfile::default()
        }));

        screen.handle_key(key(KeyCode::End));
        screen.handle_key(key(KeyCode::Char('!')));

        let ScreenCommand::Mutate(Mutation::UpdateProfile(profile)) =
            screen.handle_key(key(KeyCode::Enter))
        else {
            panic!("expected profile update");
        };
        assert_eq!(profile.name, "Ada!");
        assert_eq!(profile.email, "ada@example.com");
    }

    #[test]
    fn test_submit_before_load_sends_nothing() {
        let mut screen = ProfileScreen::new();
        screen.handle_key(key(KeyCode::Char('x')));

        let ScreenCommand::Invalid(message) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected submit to be refused");
        };
        assert_eq!(message, "Profile is still loading");
    }

    #[test]
    fn test_focus_skips_read_only_email() {
        let mut screen = ProfileScreen::new();
        screen.handle_key(key(KeyCode::Tab));
        screen.handle_key(key(KeyCode::Char('5')));
        assert_eq!(screen.profile().phone, "5");
        assert!(screen.profile().email.is_empty());
    }
}
