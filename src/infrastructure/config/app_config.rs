//! Application configuration.

use crate::domain::keybinding::Action;
use crate::infrastructure::api::ApiSettings;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

const APP_NAME: &str = "jobtrack";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "jobtrack";

/// API base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, from `config.toml` merged with the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Bearer token supplied on the command line or environment.
    #[serde(skip)]
    pub token: Option<String>,

    /// Base URL of the tracker API.
    #[serde(default = "default_api_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Custom keybindings.
    #[serde(default)]
    pub keybindings: HashMap<String, Action>,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Offset east of UTC, in minutes, for reminder times. Unset means the
    /// system timezone.
    #[serde(default)]
    pub display_utc_offset_minutes: Option<i32>,

    /// Ask before deleting records.
    #[serde(default = "default_true")]
    pub confirm_deletes: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            display_utc_offset_minutes: None,
            confirm_deletes: true,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_true() -> bool {
    true
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url {
            self.api_base_url = api_url;
        }
        if let Some(timeout) = args.timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(token) = args.token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
    }

    /// Connection settings for the API clients.
    #[must_use]
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings::new(
            self.api_base_url.clone(),
            Duration::from_secs(self.request_timeout_secs.max(1)),
        )
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("jobtrack.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            token: None,
            api_base_url: default_api_url(),
            request_timeout_secs: default_timeout_secs(),
            log_level: LogLevel::Info,
            keybindings: HashMap::new(),
            ui: UiConfig::default(),
        }
    }
}
