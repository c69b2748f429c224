use serde::{Deserialize, Serialize};

/// Local identifier shared by every service instance; services are
/// process-wide singletons scoped only by their type.
pub const SERVICE_ID: &str = "1";

/// Configuration for the identity and bookmark resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Local identifier used for services.
    pub service_id: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            service_id: SERVICE_ID.to_string(),
        }
    }
}
