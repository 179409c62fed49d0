//! Statistics dashboard.

use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::application::services::{Query, QueryData};
use crate::domain::entities::{ApplicationStatus, StatusSlice, TimelinePoint};

use super::Route;
use super::screen::{KeyHints, Screen, ScreenCommand};

const BAR_COLORS: [Color; 5] = [
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::LightRed,
    Color::Magenta,
];

/// Bar label and height per status, in server order.
#[must_use]
pub fn status_bars(slices: &[StatusSlice]) -> Vec<(String, u64)> {
    slices
        .iter()
        .map(|slice| {
            let label = slice
                .status
                .parse::<ApplicationStatus>()
                .map_or_else(|_| slice.status.clone(), |s| s.label().to_string());
            (label, slice.count)
        })
        .collect()
}

/// Line-chart points: x is the position in the series, y the count.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn timeline_points(points: &[TimelinePoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, point)| (i as f64, point.count as f64))
        .collect()
}

/// Upper y bound: the largest count, at least 1.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn timeline_ceiling(points: &[TimelinePoint]) -> f64 {
    points.iter().map(|p| p.count).max().unwrap_or(0).max(1) as f64
}

#[derive(Default)]
pub struct DashboardScreen {
    by_status: Option<Vec<StatusSlice>>,
    timeline: Option<Vec<TimelinePoint>>,
}

impl DashboardScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Applications by Status ");

        let Some(slices) = &self.by_status else {
            frame.render_widget(Paragraph::new("Loading...").block(block), area);
            return;
        };
        if slices.is_empty() {
            frame.render_widget(Paragraph::new("No applications yet").block(block), area);
            return;
        }

        let bars: Vec<Bar> = status_bars(slices)
            .into_iter()
            .enumerate()
            .map(|(i, (label, count))| {
                Bar::default()
                    .value(count)
                    .label(Line::from(label))
                    .style(Style::default().fg(BAR_COLORS[i % BAR_COLORS.len()]))
            })
            .collect();

        frame.render_widget(
            BarChart::default()
                .block(block)
                .data(BarGroup::default().bars(&bars))
                .bar_width(9)
                .bar_gap(2),
            area,
        );
    }

    fn render_timeline(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Applications Over Time ");

        let Some(timeline) = &self.timeline else {
            frame.render_widget(Paragraph::new("Loading...").block(block), area);
            return;
        };
        if timeline.is_empty() {
            frame.render_widget(Paragraph::new("No data yet").block(block), area);
            return;
        }

        let points = timeline_points(timeline);
        let ceiling = timeline_ceiling(timeline);
        let x_max = points.last().map_or(1.0, |(x, _)| x.max(1.0));
        let first = timeline.first().map_or("", |p| p.date.as_str());
        let last = timeline.last().map_or("", |p| p.date.as_str());

        let dataset = Dataset::default()
            .name("count")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .bounds([0.0, x_max])
                    .labels(vec![Line::from(first), Line::from(last)]),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, ceiling])
                    .labels(vec![Line::from("0"), Line::from(format!("{ceiling}"))]),
            );

        frame.render_widget(chart, area);
    }
}

impl Screen for DashboardScreen {
    fn route(&self) -> Route {
        Route::Dashboard
    }

    fn handle_key(&mut self, _key: KeyEvent) -> ScreenCommand {
        ScreenCommand::None
    }

    fn queries(&self) -> Vec<Query> {
        vec![Query::StatusStats, Query::Timeline]
    }

    fn apply(&mut self, data: QueryData) {
        match data {
            QueryData::StatusStats(slices) => self.by_status = Some(slices),
            QueryData::Timeline(points) => self.timeline = Some(points),
            _ => {}
        }
    }

    fn hints(&self) -> KeyHints {
        &[]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);
        self.render_status(frame, left);
        self.render_timeline(frame, right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, count: u64) -> TimelinePoint {
        TimelinePoint {
            date: date.to_string(),
            count,
        }
    }

    #[test]
    fn test_status_bars_use_labels() {
        let slices = vec![
            StatusSlice {
                status: "applied".to_string(),
                count: 3,
            },
            StatusSlice {
                status: "ghosted".to_string(),
                count: 1,
            },
        ];
        assert_eq!(
            status_bars(&slices),
            vec![("Applied".to_string(), 3), ("ghosted".to_string(), 1)]
        );
    }

    #[test]
    fn test_timeline_points_and_ceiling() {
        let timeline = vec![point("2024-01-01", 2), point("2024-01-02", 5)];
        assert_eq!(timeline_points(&timeline), vec![(0.0, 2.0), (1.0, 5.0)]);
        assert!((timeline_ceiling(&timeline) - 5.0).abs() < f64::EPSILON);
        assert!((timeline_ceiling(&[]) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_fills_both_charts() {
        let mut screen = DashboardScreen::new();
        screen.apply(QueryData::Timeline(vec![point("2024-01-01", 1)]));
        assert!(screen.by_status.is_none());
        assert_eq!(screen.timeline.as_ref().map(Vec::len), Some(1));
    }
}
