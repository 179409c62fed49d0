//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateful services shared by the presentation layer.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{AuthMode, AuthResponse, Credentials, TokenSource};
pub use services::{NotificationManager, QueryClient, ReminderClock};
pub use use_cases::{AuthenticateUseCase, ResolveSessionUseCase, ResolvedSession};
