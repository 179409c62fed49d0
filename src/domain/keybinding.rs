use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use thiserror::Error;

/// Global actions, handled before the active screen sees the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Quit,
    Logout,
    Refresh,
    NextRoute,
    PreviousRoute,
    GoHome,
    GoDashboard,
    GoProfile,
    GoApplications,
    GoReminders,
    GoCompanies,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub visible_in_bar: bool,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            visible_in_bar: true,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        self.key.code == key.code && normalize_modifiers(&self.key) == normalize_modifiers(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key binding")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// Parses bindings such as `Ctrl+q`, `Alt+Enter` or `F5`.
///
/// # Errors
/// Returns error if a modifier or key name is not recognized.
pub fn parse_key(spec: &str) -> Result<KeyEvent, KeyParseError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(KeyParseError::Empty);
    }

    let mut parts: Vec<&str> = spec.split('+').collect();
    // "Ctrl++" binds the plus key itself.
    if spec.ends_with("++") {
        parts.truncate(parts.len() - 2);
        parts.push("+");
    }
    let key_part = parts.pop().ok_or(KeyParseError::Empty)?;

    let mut modifiers = KeyModifiers::NONE;
    for modifier in parts {
        modifiers |= match modifier.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "meta" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            other => return Err(KeyParseError::UnknownModifier(other.to_string())),
        };
    }

    let code = match key_part.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        lower => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                KeyCode::F(n)
            } else {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(KeyParseError::UnknownKey(key_part.to_string())),
                }
            }
        }
    };

    Ok(KeyEvent::new(code, modifiers))
}

fn normalize_modifiers(key: &KeyEvent) -> KeyModifiers {
    // Terminals report SHIFT alongside uppercase chars inconsistently.
    if matches!(key.code, KeyCode::Char(_)) {
        key.modifiers - KeyModifiers::SHIFT
    } else {
        key.modifiers
    }
}

/// Resolves key events to global actions.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<Keybind>,
}

impl Default for Keymap {
    fn default() -> Self {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        let f = |n| KeyEvent::new(KeyCode::F(n), KeyModifiers::NONE);
        Self {
            bindings: vec![
                Keybind::new(f(1), Action::GoHome, "Home"),
                Keybind::new(f(2), Action::GoDashboard, "Dashboard"),
                Keybind::new(f(3), Action::GoProfile, "Profile"),
                Keybind::new(f(4), Action::GoApplications, "Applications"),
                Keybind::new(f(5), Action::GoReminders, "Reminders"),
                Keybind::new(f(6), Action::GoCompanies, "Companies"),
                Keybind::new(ctrl('n'), Action::NextRoute, "Next").hidden(),
                Keybind::new(ctrl('p'), Action::PreviousRoute, "Previous").hidden(),
                Keybind::new(ctrl('r'), Action::Refresh, "Refresh"),
                Keybind::new(ctrl('l'), Action::Logout, "Logout"),
                Keybind::new(ctrl('c'), Action::Quit, "Quit"),
            ],
        }
    }
}

impl Keymap {
    /// Applies user overrides on top of the defaults.
    ///
    /// An override replaces every default binding of the same action.
    ///
    /// # Errors
    /// Returns error if an override key cannot be parsed.
    pub fn with_overrides(overrides: &HashMap<String, Action>) -> Result<Self, KeyParseError> {
        let mut keymap = Self::default();
        let mut parsed: Vec<(KeyEvent, Action)> = overrides
            .iter()
            .map(|(spec, action)| parse_key(spec).map(|key| (key, *action)))
            .collect::<Result<_, _>>()?;
        parsed.sort_by_key(|(key, _)| format!("{key:?}"));

        for (key, action) in parsed {
            let label = keymap
                .bindings
                .iter()
                .find(|b| b.action == action)
                .map_or_else(|| Cow::Owned(format!("{action:?}")), |b| b.label.clone());
            keymap
                .bindings
                .retain(|b| b.action != action && !b.matches(&key));
            keymap.bindings.push(Keybind::new(key, action, label));
        }

        Ok(keymap)
    }

    #[must_use]
    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings.iter().find(|b| b.matches(key)).map(|b| b.action)
    }

    pub fn visible(&self) -> impl Iterator<Item = &Keybind> {
        self.bindings.iter().filter(|b| b.visible_in_bar)
    }
}

/// Short display form, e.g. `^R` or `F4`.
#[must_use]
pub fn key_label(key: &KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        other => format!("{other:?}"),
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("^{base}")
    } else if key.modifiers.contains(KeyModifiers::ALT) {
        format!("M-{base}")
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Ctrl+q", KeyCode::Char('q'), KeyModifiers::CONTROL)]
    #[test_case("alt+enter", KeyCode::Enter, KeyModifiers::ALT)]
    #[test_case("F5", KeyCode::F(5), KeyModifiers::NONE)]
    #[test_case("Ctrl+Shift+Up", KeyCode::Up, KeyModifiers::CONTROL.union(KeyModifiers::SHIFT))]
    #[test_case("Ctrl++", KeyCode::Char('+'), KeyModifiers::CONTROL)]
    fn test_parse_key(spec: &str, code: KeyCode, modifiers: KeyModifiers) {
        assert_eq!(parse_key(spec).unwrap(), KeyEvent::new(code, modifiers));
    }

    #[test]
    fn test_parse_key_errors() {
        assert_eq!(parse_key(""), Err(KeyParseError::Empty));
        assert!(matches!(
            parse_key("Hyper+x"),
            Err(KeyParseError::UnknownModifier(_))
        ));
        assert!(matches!(parse_key("Ctrl+xyz"), Err(KeyParseError::UnknownKey(_))));
    }

    #[test]
    fn test_default_resolution() {
        let keymap = Keymap::default();
        let key = KeyEvent::new(KeyCode::F(4), KeyModifiers::NONE);
        assert_eq!(keymap.resolve(&key), Some(Action::GoApplications));

        let plain = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(keymap.resolve(&plain), None);
    }

    #[test]
    fn test_override_replaces_default() {
        let overrides = HashMap::from([("Ctrl+q".to_string(), Action::Quit)]);
        let keymap = Keymap::with_overrides(&overrides).unwrap();

        let old = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let new = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(keymap.resolve(&old), None);
        assert_eq!(keymap.resolve(&new), Some(Action::Quit));
    }

    #[test]
    fn test_key_label() {
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(key_label(&key), "^R");
        assert_eq!(key_label(&KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE)), "F2");
    }
}
