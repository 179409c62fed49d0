//! Single-choice selector, the terminal stand-in for a dropdown.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Cycles through labelled options with Left/Right.
///
/// With a placeholder, the first position means "nothing selected".
#[derive(Debug, Clone)]
pub struct Selector<T> {
    label: String,
    placeholder: Option<String>,
    options: Vec<(T, String)>,
    position: usize,
    focused: bool,
}

impl<T: Clone + PartialEq> Selector<T> {
    /// Creates a selector that always has a value.
    #[must_use]
    pub fn new(label: impl Into<String>, options: Vec<(T, String)>) -> Self {
        Self {
            label: label.into(),
            placeholder: None,
            options,
            position: 0,
            focused: false,
        }
    }

    /// Creates a selector whose first position selects nothing.
    #[must_use]
    pub fn with_placeholder(
        label: impl Into<String>,
        placeholder: impl Into<String>,
        options: Vec<(T, String)>,
    ) -> Self {
        Self {
            placeholder: Some(placeholder.into()),
            ..Self::new(label, options)
        }
    }

    fn offset(&self) -> usize {
        usize::from(self.placeholder.is_some())
    }

    fn positions(&self) -> usize {
        self.options.len() + self.offset()
    }

    /// Returns the selected value, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.position
            .checked_sub(self.offset())
            .and_then(|index| self.options.get(index))
            .map(|(value, _)| value)
    }

    /// Returns the label of the current position.
    #[must_use]
    pub fn selected_label(&self) -> &str {
        match self.position.checked_sub(self.offset()) {
            Some(index) => self.options.get(index).map_or("", |(_, l)| l.as_str()),
            None => self.placeholder.as_deref().unwrap_or(""),
        }
    }

    /// Selects `value`; an unknown value falls back to the first position.
    pub fn select(&mut self, value: Option<&T>) {
        self.position = value
            .and_then(|value| self.options.iter().position(|(v, _)| v == value))
            .map_or(0, |index| index + self.offset());
    }

    /// Returns to the first position.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Replaces the options, keeping the current selection when it still exists.
    pub fn set_options(&mut self, options: Vec<(T, String)>) {
        let current = self.selected().cloned();
        self.options = options;
        self.select(current.as_ref());
    }

    /// Moves to the next position, wrapping.
    pub fn next(&mut self) {
        let positions = self.positions();
        if positions > 0 {
            self.position = (self.position + 1) % positions;
        }
    }

    /// Moves to the previous position, wrapping.
    pub fn previous(&mut self) {
        let positions = self.positions();
        if positions > 0 {
            self.position = (self.position + positions - 1) % positions;
        }
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Applies Left/Right/Space. Returns whether the selection changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let before = self.position;
        match key.code {
            KeyCode::Right | KeyCode::Char(' ') => self.next(),
            KeyCode::Left => self.previous(),
            _ => return false,
        }
        before != self.position
    }
}

impl<T: Clone + PartialEq> Widget for &Selector<T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let value_style = if self.selected().is_some() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());

        let line = Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.selected_label(), value_style),
            Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        ]);

        Paragraph::new(line).block(block).render(area, buf);
    }
}
