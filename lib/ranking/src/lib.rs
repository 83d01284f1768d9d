//! # shoprank Ranking
//!
//! The ranking and matching engine for a product catalog.
//!
//! ## Operations
//!
//! - **Selection ranking**: shortlist by free-text query, category or trait,
//!   falling back to the highest interest scores
//! - **Trait overlap**: order the catalog by interest score, then by how many
//!   requested traits each product carries
//! - **Dominant trait**: one canonical suggestion for a personality profile
//! - **Add-ons**: complementary items for a product, with images
//!
//! ## Example
//!
//! ```rust
//! use shoprank_core::{Category, Product, TraitSet};
//! use shoprank_ranking::{Ranker, RankingBranch, SessionFilters};
//!
//! let catalog = vec![
//!     Product::new(1, "Smart QRS", Category::Electronics, 0.71, TraitSet::parse("Tech-savvy")).unwrap(),
//!     Product::new(2, "Yoga TUV", Category::Sports, 0.88, TraitSet::parse("Active, Relaxed")).unwrap(),
//! ];
//!
//! let ranker = Ranker::builtin().unwrap();
//!
//! let mut session = SessionFilters::new();
//! session.set_category("Sports");
//! let shortlist = ranker.recommend(&catalog, &session.resolve());
//! assert_eq!(shortlist.branch, RankingBranch::Category);
//! assert_eq!(shortlist.results[0].product.name, "Yoga TUV");
//!
//! let add_ons = ranker.lookup_add_ons("iPhone 15");
//! assert_eq!(add_ons.len(), 3);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Session    │────>│  Selection  │────>│   Ranker    │
//! │  filters    │     │  context    │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//! ┌─────────────┐                                │
//! │  Reference  │───────────────────────────────>│
//! │  tables     │                                │
//! └─────────────┘                         ┌─────────────┐
//!                                         │  Explain    │
//!                                         │  (views)    │
//!                                         └─────────────┘
//! ```

pub mod addons;
pub mod config;
pub mod context;
pub mod explain;
pub mod personality;
pub mod ranker;
pub mod reference;
pub mod showcase;

pub use addons::{AddOn, AddOnTable};
pub use config::EngineConfig;
pub use context::{FilterKind, FilterPrecedence, SelectionContext, SessionFilters};
pub use explain::{ExplainedResult, RankingStats, RecommendationResponse, TraitMatchResponse};
pub use personality::{
    DominantTraitRecommendation, PersonalityDimension, Recommendation, RecommendationTable, TraitValues,
    UnknownDimension,
};
pub use ranker::{parse_requested_traits, trait_overlap, RankedResult, RankedSelection, Ranker, RankingBranch};
pub use reference::{ReferenceData, ReferenceError, TraitKeywordTable};
pub use showcase::{Showcase, ShowcaseCategory, ShowcaseHit, ShowcaseItem, MAX_ITEMS_PER_CATEGORY};
