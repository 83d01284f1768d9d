//! # shoprank
//!
//! Ranking and matching engine for a personality-aware product catalog.
//!
//! shoprank orders catalog products for display: it shortlists products
//! from the shopper's last search, category or trait, scores products by
//! overlap with requested personality traits, maps personality scores to a
//! recommendation, and looks up complementary add-ons.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! shoprank generate --count 50 --out seed.json --seed 7
//! shoprank seed --from seed.json
//! shoprank recommend --query smart
//! shoprank match --traits "creative, social"
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use shoprank::prelude::*;
//!
//! let catalog = InMemoryCatalog::new();
//! catalog.seed(vec![
//!     Product::new(1, "Smart ABC", Category::Electronics, 0.91, TraitSet::parse("Tech-savvy, Curious")).unwrap(),
//!     Product::new(2, "Yoga DEF", Category::Sports, 0.64, TraitSet::parse("Active, Relaxed")).unwrap(),
//! ]).unwrap();
//!
//! let ranker = Ranker::builtin().unwrap();
//! let mut session = SessionFilters::new();
//! session.set_query("yoga");
//!
//! let snapshot = catalog.products();
//! let selection = ranker.recommend(&snapshot, &session.resolve());
//! assert_eq!(selection.branch, RankingBranch::Query);
//! assert_eq!(selection.results[0].product.name, "Yoga DEF");
//! ```
//!
//! ## Crate Structure
//!
//! - `shoprank-core` - Product model, catalog snapshots, pagination, demo generator
//! - `shoprank-ranking` - Selection ranking, trait overlap, reference tables
//! - `shoprank-storage` - Seed files and on-disk catalog snapshots

// Re-export core types
pub use shoprank_core::{
    generate_catalog, paginate, CatalogProvider, Category, Error, InMemoryCatalog, Page, Product, ProductId,
    Result, TraitSet,
};

// Re-export the engine
pub use shoprank_ranking::{
    AddOn, EngineConfig, ExplainedResult, FilterPrecedence, PersonalityDimension, RankedResult, RankedSelection,
    Ranker, RankingBranch, RecommendationResponse, ReferenceData, SelectionContext, SessionFilters, TraitValues,
};

// Re-export storage
pub use shoprank_storage::{CatalogStore, StartupReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        paginate, CatalogProvider, CatalogStore, Category, EngineConfig, Error, InMemoryCatalog, Page,
        PersonalityDimension, Product, ProductId, RankedResult, Ranker, RankingBranch, ReferenceData, Result,
        SelectionContext, SessionFilters, TraitSet, TraitValues,
    };
}
