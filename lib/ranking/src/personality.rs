//! Dominant-trait recommendations
//!
//! Maps a five-factor personality profile to one canonical product.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The five personality dimensions, in scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalityDimension {
    Openness,
    Extraversion,
    Conscientiousness,
    Agreeableness,
    Neuroticism,
}

impl PersonalityDimension {
    pub const ALL: [PersonalityDimension; 5] = [
        PersonalityDimension::Openness,
        PersonalityDimension::Extraversion,
        PersonalityDimension::Conscientiousness,
        PersonalityDimension::Agreeableness,
        PersonalityDimension::Neuroticism,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityDimension::Openness => "openness",
            PersonalityDimension::Extraversion => "extraversion",
            PersonalityDimension::Conscientiousness => "conscientiousness",
            PersonalityDimension::Agreeableness => "agreeableness",
            PersonalityDimension::Neuroticism => "neuroticism",
        }
    }
}

impl fmt::Display for PersonalityDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dimension name outside the five-factor model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown personality dimension: {0}")]
pub struct UnknownDimension(pub String);

impl FromStr for PersonalityDimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        PersonalityDimension::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownDimension(s.to_string()))
    }
}

/// Intensities for each dimension. Missing values default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitValues {
    pub openness: f64,
    pub extraversion: f64,
    pub conscientiousness: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
}

impl TraitValues {
    pub fn get(&self, dimension: PersonalityDimension) -> f64 {
        match dimension {
            PersonalityDimension::Openness => self.openness,
            PersonalityDimension::Extraversion => self.extraversion,
            PersonalityDimension::Conscientiousness => self.conscientiousness,
            PersonalityDimension::Agreeableness => self.agreeableness,
            PersonalityDimension::Neuroticism => self.neuroticism,
        }
    }

    pub fn set(&mut self, dimension: PersonalityDimension, value: f64) {
        let slot = match dimension {
            PersonalityDimension::Openness => &mut self.openness,
            PersonalityDimension::Extraversion => &mut self.extraversion,
            PersonalityDimension::Conscientiousness => &mut self.conscientiousness,
            PersonalityDimension::Agreeableness => &mut self.agreeableness,
            PersonalityDimension::Neuroticism => &mut self.neuroticism,
        };
        *slot = value;
    }

    /// Build from loosely keyed values. Unknown keys are ignored.
    pub fn from_map(values: &HashMap<String, f64>) -> Self {
        let mut result = Self::default();
        for (key, value) in values {
            if let Ok(dimension) = key.parse::<PersonalityDimension>() {
                result.set(dimension, *value);
            }
        }
        result
    }

    /// The dimension with the highest intensity.
    ///
    /// Ties go to the dimension that comes first in [`PersonalityDimension::ALL`].
    /// NaN never wins.
    pub fn dominant(&self) -> PersonalityDimension {
        let mut best = PersonalityDimension::Openness;
        let mut best_value = f64::NEG_INFINITY;
        for dimension in PersonalityDimension::ALL {
            let value = self.get(dimension);
            if value > best_value {
                best = dimension;
                best_value = value;
            }
        }
        best
    }
}

/// A canonical product suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub image: String,
    pub category: String,
}

/// Dimension to recommendation, with an unconditional fallback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationTable {
    #[serde(rename = "dominant_trait_recommendations", default)]
    by_dimension: AHashMap<PersonalityDimension, Recommendation>,
    #[serde(rename = "fallback_recommendation")]
    fallback: Recommendation,
}

impl RecommendationTable {
    pub fn new(
        by_dimension: AHashMap<PersonalityDimension, Recommendation>,
        fallback: Recommendation,
    ) -> Self {
        Self { by_dimension, fallback }
    }

    pub fn get(&self, dimension: PersonalityDimension) -> Option<&Recommendation> {
        self.by_dimension.get(&dimension)
    }

    /// Recommendation for `dimension`, or the fallback when the table has none
    pub fn recommend(&self, dimension: PersonalityDimension) -> &Recommendation {
        self.get(dimension).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &Recommendation {
        &self.fallback
    }
}

/// Outcome of a dominant-trait lookup
#[derive(Debug, Clone, Serialize)]
pub struct DominantTraitRecommendation<'a> {
    pub dimension: PersonalityDimension,
    pub recommendation: &'a Recommendation,
}
