//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Alert definitions.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use entities::{AuthToken, Session, User};
pub use errors::{ApiError, AuthError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{AuthPort, SessionStoragePort, TrackerPort};
