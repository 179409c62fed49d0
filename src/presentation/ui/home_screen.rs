//! Landing screen.

use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::presentation::events::is_submit_event;
use crate::presentation::widgets::centered;

use super::Route;
use super::screen::{KeyHints, Screen, ScreenCommand};

pub struct HomeScreen {
    signed_in: bool,
}

impl HomeScreen {
    #[must_use]
    pub const fn new(signed_in: bool) -> Self {
        Self { signed_in }
    }
}

impl Screen for HomeScreen {
    fn route(&self) -> Route {
        Route::Home
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenCommand {
        if is_submit_event(&key) && !self.signed_in {
            return ScreenCommand::Navigate(Route::Auth);
        }
        ScreenCommand::None
    }

    fn hints(&self) -> KeyHints {
        if self.signed_in {
            &[]
        } else {
            &[("Enter", "sign up / log in")]
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let panel = centered(area, 72.min(area.width), 12.min(area.height));

        let text = vec![
            Line::from(Span::styled(
                "Welcome to Job Application Tracker",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(
                "Keep track of companies, applications, reminders and interview \
                 timelines in one place. The dashboard charts your progress \
                 through the search.",
            ),
            Line::default(),
            Line::from(Span::styled(
                "Start adding your applications and never miss a follow-up!",
                Style::default().fg(Color::Green),
            )),
        ];

        frame.render_widget(
            Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            panel,
        );
    }
}
