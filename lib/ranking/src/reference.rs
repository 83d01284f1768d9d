//! Reference tables
//!
//! Every hardcoded mapping the engine consults lives here as an immutable
//! value: trait keywords, dominant-trait recommendations, add-ons and their
//! images, and the category showcase. A built-in set is embedded in the
//! crate; deployments can load their own JSON with the same layout.

use crate::addons::AddOnTable;
use crate::personality::RecommendationTable;
use crate::showcase::Showcase;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_REFERENCE: &str = include_str!("../data/reference.json");

/// Errors raised while loading reference tables
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("Failed to read reference data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed reference data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All lookup tables consumed by the ranking engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    pub trait_keywords: TraitKeywordTable,
    #[serde(flatten)]
    pub recommendations: RecommendationTable,
    #[serde(flatten)]
    pub add_ons: AddOnTable,
    #[serde(default)]
    pub showcase: Showcase,
}

impl ReferenceData {
    /// Tables shipped with the crate
    pub fn builtin() -> Result<Self, ReferenceError> {
        Self::from_json_str(BUILTIN_REFERENCE)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ReferenceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Trait name to product-name keywords.
///
/// Keys and keywords are stored lowercase so lookups and name matching are
/// case-insensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "AHashMap<String, Vec<String>>", into = "AHashMap<String, Vec<String>>")]
pub struct TraitKeywordTable {
    keywords: AHashMap<String, Vec<String>>,
}

impl TraitKeywordTable {
    /// Keywords for a trait; empty if the trait is not in the table
    pub fn keywords_for(&self, trait_name: &str) -> &[String] {
        self.keywords
            .get(&trait_name.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl From<AHashMap<String, Vec<String>>> for TraitKeywordTable {
    fn from(raw: AHashMap<String, Vec<String>>) -> Self {
        let keywords = raw
            .into_iter()
            .map(|(name, words)| {
                let words = words
                    .into_iter()
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect();
                (name.trim().to_lowercase(), words)
            })
            .collect();
        Self { keywords }
    }
}

impl From<TraitKeywordTable> for AHashMap<String, Vec<String>> {
    fn from(table: TraitKeywordTable) -> Self {
        table.keywords
    }
}
