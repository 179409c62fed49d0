use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::alert_popup::centered;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Undecided,
    Confirmed,
    Cancelled,
}

/// Yes/no prompt guarding a pending action.
///
/// The payload is only released on confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmDialog<T> {
    prompt: String,
    payload: T,
}

impl<T> ConfirmDialog<T> {
    #[must_use]
    pub fn new(prompt: impl Into<String>, payload: T) -> Self {
        Self {
            prompt: prompt.into(),
            payload,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// `y`/Enter confirms, `n`/Esc cancels; everything else is ignored.
    #[must_use]
    pub fn choice(key: &KeyEvent) -> ConfirmChoice {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => ConfirmChoice::Confirmed,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => ConfirmChoice::Cancelled,
            _ => ConfirmChoice::Undecided,
        }
    }

    /// Resolves the dialog: `Some(payload)` when confirmed, `None` when cancelled,
    /// `Err(self)` while undecided.
    ///
    /// # Errors
    /// Returns the dialog back if the key neither confirms nor cancels.
    pub fn resolve(self, key: &KeyEvent) -> Result<Option<T>, Self> {
        match Self::choice(key) {
            ConfirmChoice::Confirmed => Ok(Some(self.payload)),
            ConfirmChoice::Cancelled => Ok(None),
            ConfirmChoice::Undecided => Err(self),
        }
    }
}

impl<T> Widget for &ConfirmDialog<T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = u16::try_from(self.prompt.width())
            .unwrap_or(u16::MAX)
            .saturating_add(6)
            .max(30)
            .min(area.width.saturating_sub(2));
        let popup_area = centered(area, width, 5);
        if popup_area.area() == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Confirm ")
            .border_style(Style::default().fg(Color::Yellow));

        let text = vec![
            Line::from(Span::styled(
                self.prompt.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("y", Style::default().fg(Color::Green)),
                Span::raw(": yes   "),
                Span::styled("n", Style::default().fg(Color::Red)),
                Span::raw(": no"),
            ]),
        ];

        Clear.render(popup_area, buf);
        Paragraph::new(text).block(block).render(popup_area, buf);
    }
}
