use serde::{Deserialize, Serialize};
use shoprank_core::DEFAULT_PAGE_SIZE;

/// Tunables for the ranking engine.
///
/// Loaded from JSON; missing keys keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Shortlist size for selection-driven recommendations
    pub default_limit: usize,
    /// Shortlist size for trait-overlap matching
    pub overlap_top_n: usize,
    /// Listing page size
    pub page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_limit: 5,
            overlap_top_n: 3,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
