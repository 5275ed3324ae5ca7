//! Configuration types for a Starport host session

use serde::{Deserialize, Serialize};

fn default_tick_seconds() -> f64 {
    1.0
}

/// Host session configuration (starport.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Where the schedule is persisted between sessions
    pub save_path: String,

    /// Nominal period of the host heartbeat, in sim seconds
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: f64,

    /// Label substituted for blank profile name hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile_name: Option<String>,
}

impl SessionConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_path: "schedule.sp".to_string(),
            tick_seconds: default_tick_seconds(),
            default_profile_name: None,
        }
    }
}
