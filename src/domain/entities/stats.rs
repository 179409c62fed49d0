//! Aggregate statistics shown on the dashboard.

/// Number of applications in one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSlice {
    /// Status name as reported by the server.
    pub status: String,
    /// Number of applications.
    pub count: u64,
}

/// Number of applications created on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePoint {
    /// Date label as reported by the server.
    pub date: String,
    /// Number of applications.
    pub count: u64,
}

