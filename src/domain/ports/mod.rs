mod auth_port;
mod session_storage_port;
mod tracker_port;

pub use auth_port::{AuthGrant, AuthPort, Password};
pub use session_storage_port::SessionStoragePort;
pub use tracker_port::{
    ApplicationDraft, ApplicationFilter, CompanyDraft, ReminderDraft, TrackerPort,
};

#[cfg(test)]
pub use tracker_port::MockTrackerPort;
