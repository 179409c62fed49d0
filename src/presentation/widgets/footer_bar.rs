use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::domain::keybinding::{Keymap, key_label};

pub struct FooterBarStyle {
    pub label_style: Style,
    pub key_style: Style,
    pub hint_key: Style,
    pub hint_label: Style,
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self {
            label_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().fg(Color::White).bg(Color::DarkGray),
            hint_key: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Bottom bar: the active screen's keys, then the global ones.
pub struct FooterBar<'a> {
    keymap: &'a Keymap,
    hints: &'a [(&'static str, &'static str)],
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(keymap: &'a Keymap, hints: &'a [(&'static str, &'static str)]) -> Self {
        Self {
            keymap,
            hints,
            style: FooterBarStyle::default(),
        }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();

        for (key, label) in self.hints {
            spans.push(Span::styled(format!("{key} "), self.style.hint_key));
            spans.push(Span::styled(format!("{label}  "), self.style.hint_label));
        }

        for (i, binding) in self.keymap.visible().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {} ", binding.label),
                self.style.label_style,
            ));
            spans.push(Span::styled(
                format!(" {} ", key_label(&binding.key)),
                self.style.key_style,
            ));
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        Paragraph::new(Line::from(self.spans())).render(area, buf);
    }
}
