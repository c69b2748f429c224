use crate::EnlistResult;
use objtrack_identity::ResolverConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the enlistment tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Master switch; when off every enlistment is a no-op.
    pub enabled: bool,
    /// Configuration of the bookmark chain used to key snapshots.
    pub resolver: ResolverConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            resolver: ResolverConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Parses a JSON config fragment; missing fields take their defaults.
    pub fn from_json(json: &str) -> EnlistResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
