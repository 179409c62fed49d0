//! UI screens.

mod app;
mod applications_screen;
mod auth_screen;
mod companies_screen;
mod dashboard_screen;
mod home_screen;
mod profile_screen;
mod reminders_screen;
mod route;
pub mod screen;

pub use app::{App, AppSettings, TrackerFactory};
pub use applications_screen::ApplicationsScreen;
pub use auth_screen::{AuthField, AuthScreen};
pub use companies_screen::{CompaniesScreen, browser_url};
pub use dashboard_screen::{DashboardScreen, status_bars, timeline_ceiling, timeline_points};
pub use home_screen::HomeScreen;
pub use profile_screen::ProfileScreen;
pub use reminders_screen::{RemindersScreen, owner_labels, reminder_cells};
pub use route::Route;
pub use screen::{Screen, ScreenCommand};
