//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Direction of a focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    Next,
    Previous,
}

/// Key repeat and release events are dropped; only presses drive the UI.
#[must_use]
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

/// Checks if key is a submit event.
#[must_use]
pub fn is_submit_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Enter,
            ..
        }
    )
}

/// Checks if key cancels the current edit or dialog.
#[must_use]
pub fn is_cancel_event(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

/// Tab moves focus forward, Shift+Tab backward.
#[must_use]
pub fn focus_move(key: &KeyEvent) -> Option<FocusMove> {
    match key.code {
        KeyCode::BackTab => Some(FocusMove::Previous),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(FocusMove::Previous),
        KeyCode::Tab => Some(FocusMove::Next),
        _ => None,
    }
}

/// Returns the neighbour of `current` in `order`, wrapping. An element not in
/// `order` moves to the first one.
#[must_use]
pub fn cycle_focus<F: Copy + PartialEq>(order: &[F], current: F, direction: FocusMove) -> F {
    let Some(index) = order.iter().position(|f| *f == current) else {
        return order.first().copied().unwrap_or(current);
    };
    let len = order.len();
    let next = match direction {
        FocusMove::Next => (index + 1) % len,
        FocusMove::Previous => (index + len - 1) % len,
    };
    order[next]
}
