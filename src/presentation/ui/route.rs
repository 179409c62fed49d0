//! Route table.

use crate::domain::keybinding::Action;

/// Navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    Dashboard,
    Profile,
    Applications,
    Reminders,
    Companies,
    Auth,
}

impl Route {
    /// Navigation bar order.
    pub const NAV: [Self; 6] = [
        Self::Home,
        Self::Dashboard,
        Self::Profile,
        Self::Applications,
        Self::Reminders,
        Self::Companies,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Dashboard => "Dashboard",
            Self::Profile => "Profile",
            Self::Applications => "Applications",
            Self::Reminders => "Reminders",
            Self::Companies => "Companies",
            Self::Auth => "Sign Up",
        }
    }

    /// Stable name stored in `state.toml`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Dashboard => "dashboard",
            Self::Profile => "profile",
            Self::Applications => "applications",
            Self::Reminders => "reminders",
            Self::Companies => "companies",
            Self::Auth => "auth",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::NAV
            .into_iter()
            .chain([Self::Auth])
            .find(|route| route.slug() == slug)
    }

    /// Whether the route needs a signed-in session.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        !matches!(self, Self::Home | Self::Auth)
    }

    /// Where navigating to this route actually lands.
    #[must_use]
    pub const fn gate(self, signed_in: bool) -> Self {
        if self.requires_session() && !signed_in {
            Self::Auth
        } else {
            self
        }
    }

    /// Next route in the navigation bar, wrapping. Auth steps into the bar.
    #[must_use]
    pub fn next(self) -> Self {
        self.step(1)
    }

    /// Previous route in the navigation bar, wrapping.
    #[must_use]
    pub fn previous(self) -> Self {
        self.step(Self::NAV.len() - 1)
    }

    fn step(self, by: usize) -> Self {
        let index = Self::NAV.iter().position(|r| *r == self).unwrap_or(0);
        Self::NAV[(index + by) % Self::NAV.len()]
    }

    /// Route a global navigation action targets.
    #[must_use]
    pub const fn for_action(action: Action) -> Option<Self> {
        match action {
            Action::GoHome => Some(Self::Home),
            Action::GoDashboard => Some(Self::Dashboard),
            Action::GoProfile => Some(Self::Profile),
            Action::GoApplications => Some(Self::Applications),
            Action::GoReminders => Some(Self::Reminders),
            Action::GoCompanies => Some(Self::Companies),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_routes_redirect_to_auth() {
        assert_eq!(Route::Applications.gate(false), Route::Auth);
        assert_eq!(Route::Dashboard.gate(false), Route::Auth);
        assert_eq!(Route::Home.gate(false), Route::Home);
        assert_eq!(Route::Applications.gate(true), Route::Applications);
    }

    #[test]
    fn test_slug_round_trip() {
        for route in Route::NAV.into_iter().chain([Route::Auth]) {
            assert_eq!(Route::from_slug(route.slug()), Some(route));
        }
        assert_eq!(Route::from_slug("settings"), None);
    }

    #[test]
    fn test_stepping_wraps() {
        assert_eq!(Route::Companies.next(), Route::Home);
        assert_eq!(Route::Home.previous(), Route::Companies);
        assert_eq!(Route::Auth.next(), Route::Dashboard);
    }
}
