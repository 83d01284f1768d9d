use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use crate::error::{Error, Result};

/// Stable product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

/// Closed set of catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Fiction,
    Sports,
    Clothing,
    Home,
    Beauty,
    Toys,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Electronics,
        Category::Fiction,
        Category::Sports,
        Category::Clothing,
        Category::Home,
        Category::Beauty,
        Category::Toys,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fiction => "Fiction",
            Category::Sports => "Sports",
            Category::Clothing => "Clothing",
            Category::Home => "Home",
            Category::Beauty => "Beauty",
            Category::Toys => "Toys",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive parse. `"toys"` is not `Toys`.
impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// Personality traits attached to a product.
///
/// Keeps the original spelling and insertion order for display, but behaves
/// as a case-insensitive set: `"Curious"` and `"curious"` are the same trait.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TraitSet {
    traits: SmallVec<[String; 4]>,
}

impl TraitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the external comma-separated form, e.g. `"Curious, Active"`.
    /// Blank entries are dropped.
    pub fn parse(external: &str) -> Self {
        external.split(',').collect()
    }

    /// Insert a trait, returning false if it was blank or already present
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.traits.push(name.to_string());
        true
    }

    /// Case-insensitive membership test, folding with [`str::to_lowercase`]
    /// like [`TraitSet::to_lowercase_external`]
    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.traits.iter().any(|t| t.to_lowercase() == name)
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.traits.iter().map(String::as_str)
    }

    /// The external form: traits joined by `", "`.
    pub fn to_external(&self) -> String {
        self.traits.join(", ")
    }

    /// Lowercased external form, the haystack for substring trait matching
    pub fn to_lowercase_external(&self) -> String {
        self.to_external().to_lowercase()
    }
}

impl<'a> FromIterator<&'a str> for TraitSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = TraitSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl From<Vec<String>> for TraitSet {
    fn from(traits: Vec<String>) -> Self {
        traits.iter().map(String::as_str).collect()
    }
}

impl From<TraitSet> for Vec<String> {
    fn from(set: TraitSet) -> Self {
        set.traits.into_vec()
    }
}

impl PartialEq for TraitSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl Eq for TraitSet {}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Interest score in [0, 1]
    pub interest_score: f64,
    #[serde(default)]
    pub traits: TraitSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl Product {
    /// Create a new product, rejecting interest scores outside [0, 1]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        category: Category,
        interest_score: f64,
        traits: TraitSet,
    ) -> Result<Self> {
        let product = Self {
            id: ProductId(id),
            name: name.into(),
            category,
            interest_score,
            traits,
            image_path: None,
        };
        product.validate()?;
        Ok(product)
    }

    #[inline]
    #[must_use]
    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Check invariants that deserialization cannot enforce
    pub fn validate(&self) -> Result<()> {
        let score = self.interest_score;
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(Error::InvalidInterestScore { id: self.id.0, score });
        }
        Ok(())
    }

    /// Case-insensitive substring match on the product name.
    /// `needle` must already be lowercase.
    #[inline]
    pub fn name_contains_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    /// Rewrite backslashes in the image path to forward slashes.
    /// Returns true if the path changed.
    pub fn normalize_image_path(&mut self) -> bool {
        match &mut self.image_path {
            Some(path) if path.contains('\\') => {
                *path = path.replace('\\', "/");
                true
            }
            _ => false,
        }
    }
}
