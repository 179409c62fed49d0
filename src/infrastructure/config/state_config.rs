use serde::{Deserialize, Serialize};

/// UI state remembered between runs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Last visited route, by name.
    #[serde(default)]
    pub last_route: Option<String>,
}
