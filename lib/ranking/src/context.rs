//! Selection context and filter precedence
//!
//! A session remembers the last search, category and trait the user picked.
//! [`SessionFilters::resolve`] turns that record into exactly one
//! [`SelectionContext`] using an explicit [`FilterPrecedence`], so sessions
//! that carry more than one filter still rank deterministically.

use serde::{Deserialize, Serialize};

/// The single active filter driving a ranking request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SelectionContext {
    #[default]
    None,
    Query(String),
    Category(String),
    Trait(String),
}

impl SelectionContext {
    /// A context whose value is blank behaves like no context at all
    pub fn is_blank(&self) -> bool {
        match self {
            SelectionContext::None => true,
            SelectionContext::Query(v) | SelectionContext::Category(v) | SelectionContext::Trait(v) => {
                v.trim().is_empty()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Query,
    Category,
    Trait,
}

/// Order in which simultaneous session filters are considered.
///
/// The default is query, then category, then trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPrecedence {
    order: [FilterKind; 3],
}

impl Default for FilterPrecedence {
    fn default() -> Self {
        Self {
            order: [FilterKind::Query, FilterKind::Category, FilterKind::Trait],
        }
    }
}

impl FilterPrecedence {
    /// Custom order; `None` unless every kind appears exactly once
    pub fn new(order: [FilterKind; 3]) -> Option<Self> {
        let distinct = order[0] != order[1] && order[1] != order[2] && order[0] != order[2];
        distinct.then_some(Self { order })
    }

    pub fn order(&self) -> &[FilterKind; 3] {
        &self.order
    }
}

/// Per-session record of the last filters used.
///
/// The setters keep at most one filter active. Fields stay public so callers
/// restoring older session state may populate several at once; resolution
/// then falls back on [`FilterPrecedence`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFilters {
    pub last_search: Option<String>,
    pub last_category: Option<String>,
    pub last_traits: Option<String>,
}

impl SessionFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: &str) {
        self.clear();
        self.last_search = Some(query.trim().to_string());
    }

    pub fn set_category(&mut self, category: &str) {
        self.clear();
        self.last_category = Some(category.to_string());
    }

    pub fn set_trait(&mut self, trait_name: &str) {
        self.clear();
        self.last_traits = Some(trait_name.to_string());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Non-blank value recorded for `kind`
    pub fn get(&self, kind: FilterKind) -> Option<&str> {
        let value = match kind {
            FilterKind::Query => &self.last_search,
            FilterKind::Category => &self.last_category,
            FilterKind::Trait => &self.last_traits,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    pub fn resolve(&self) -> SelectionContext {
        self.resolve_with(&FilterPrecedence::default())
    }

    /// Pick the first non-blank filter in `precedence` order
    pub fn resolve_with(&self, precedence: &FilterPrecedence) -> SelectionContext {
        for kind in precedence.order() {
            if let Some(value) = self.get(*kind) {
                let value = value.to_string();
                return match kind {
                    FilterKind::Query => SelectionContext::Query(value),
                    FilterKind::Category => SelectionContext::Category(value),
                    FilterKind::Trait => SelectionContext::Trait(value),
                };
            }
        }
        SelectionContext::None
    }
}
