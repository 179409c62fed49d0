//! Infrastructure layer with external service adapters.

/// Tracker HTTP API client.
pub mod api;
/// Application configuration.
pub mod config;
/// Session storage adapters.
pub mod storage;

pub use api::{ApiSettings, AuthApiClient, TrackerApiClient};
pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StateConfig, StorageManager};
pub use storage::KeyringSessionStorage;
