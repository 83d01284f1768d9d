//! Category showcase
//!
//! A fixed, category-keyed list of featured items. Searching matches the
//! query against category keys; lookups match item names exactly.

use crate::addons::{AddOn, AddOnTable};
use serde::{Deserialize, Serialize};

/// At most this many items are returned per matching category
pub const MAX_ITEMS_PER_CATEGORY: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowcaseItem {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowcaseCategory {
    /// Lowercase category key, e.g. `"mobiles"`
    pub category: String,
    pub items: Vec<ShowcaseItem>,
}

/// A showcase item with its category and resolved add-ons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowcaseHit {
    pub name: String,
    pub image: String,
    pub category: String,
    pub add_ons: Vec<AddOn>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Showcase {
    categories: Vec<ShowcaseCategory>,
}

impl Showcase {
    pub fn new(categories: Vec<ShowcaseCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[ShowcaseCategory] {
        &self.categories
    }

    /// Items of every category whose key contains `query` (case-insensitive).
    /// A blank query matches every category.
    pub fn search(&self, query: &str, add_ons: &AddOnTable) -> Vec<ShowcaseHit> {
        let needle = query.trim().to_lowercase();
        self.categories
            .iter()
            .filter(|c| c.category.to_lowercase().contains(&needle))
            .flat_map(|c| {
                c.items
                    .iter()
                    .take(MAX_ITEMS_PER_CATEGORY)
                    .map(move |item| hit(item, &c.category, add_ons))
            })
            .collect()
    }

    /// Exact-name lookup; the first category holding the name wins
    pub fn find(&self, name: &str, add_ons: &AddOnTable) -> Option<ShowcaseHit> {
        self.categories.iter().find_map(|c| {
            c.items
                .iter()
                .find(|item| item.name == name)
                .map(|item| hit(item, &c.category, add_ons))
        })
    }
}

fn hit(item: &ShowcaseItem, category: &str, add_ons: &AddOnTable) -> ShowcaseHit {
    ShowcaseHit {
        name: item.name.clone(),
        image: item.image.clone(),
        category: capitalize(category),
        add_ons: add_ons.lookup(&item.name),
    }
}

/// `"mobiles"` -> `"Mobiles"`, `"SPORTS"` -> `"Sports"`
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
