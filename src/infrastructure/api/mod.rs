//! Tracker HTTP API client.

mod auth_client;
mod dto;
mod http;
mod tracker_client;

pub use auth_client::AuthApiClient;
pub use http::ApiSettings;
pub use tracker_client::TrackerApiClient;
