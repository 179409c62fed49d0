use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::presentation::ui::Route;

pub struct NavBarStyle {
    pub app_name: Style,
    pub route: Style,
    pub active_route: Style,
    pub session: Style,
    pub signed_out: Style,
}

impl Default for NavBarStyle {
    fn default() -> Self {
        Self {
            app_name: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            route: Style::default().fg(Color::Gray),
            active_route: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            session: Style::default().fg(Color::Green),
            signed_out: Style::default().fg(Color::Yellow),
        }
    }
}

/// Top bar: routes on the left, session state on the right.
pub struct NavBar<'a> {
    active: Route,
    session_label: Option<&'a str>,
    style: NavBarStyle,
}

impl<'a> NavBar<'a> {
    #[must_use]
    pub fn new(active: Route, session_label: Option<&'a str>) -> Self {
        Self {
            active,
            session_label,
            style: NavBarStyle::default(),
        }
    }

    fn route_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![Span::styled(" Job Tracker ", self.style.app_name), Span::raw(" ")];
        let routes = Route::NAV
            .into_iter()
            .chain(self.session_label.is_none().then_some(Route::Auth));
        for (i, route) in routes.enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if route == self.active {
                self.style.active_route
            } else {
                self.style.route
            };
            spans.push(Span::styled(route.title(), style));
        }
        spans
    }

    fn session_text(&self) -> String {
        self.session_label
            .map_or_else(|| "signed out ".to_string(), |label| format!("{label} | Logout "))
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let right = self.session_text();
        let right_width = u16::try_from(right.width()).unwrap_or(u16::MAX);
        let left_width = area.width.saturating_sub(right_width.saturating_add(1));

        Paragraph::new(Line::from(self.route_spans()))
            .render(Rect::new(area.x, area.y, left_width, 1), buf);

        if right_width < area.width {
            let style = if self.session_label.is_some() {
                self.style.session
            } else {
                self.style.signed_out
            };
            let right_area = Rect::new(area.right() - right_width, area.y, right_width, 1);
            Paragraph::new(Span::styled(right, style)).render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(bar: &NavBar<'_>) -> Vec<String> {
        bar.route_spans()
            .iter()
            .map(|s| s.content.to_string())
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    #[test]
    fn test_sign_up_only_when_signed_out() {
        let signed_out = NavBar::new(Route::Home, None);
        assert!(titles(&signed_out).contains(&"Sign Up".to_string()));
        assert_eq!(signed_out.session_text(), "signed out ");

        let signed_in = NavBar::new(Route::Home, Some("Ada"));
        assert!(!titles(&signed_in).contains(&"Sign Up".to_string()));
        assert_eq!(signed_in.session_text(), "Ada | Logout ");
    }
}
