//! jobtrack - A terminal client for a job-application tracker.
//!
//! This crate provides a TUI over the tracker's HTTP API with clean
//! architecture: applications with notes, companies, reminders, a profile
//! and a statistics dashboard, backed by a keyring-persisted session.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "jobtrack";
