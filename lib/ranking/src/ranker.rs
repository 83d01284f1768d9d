//! Ranking engine
//!
//! Orders catalog products for display. All operations are pure over the
//! catalog slice they are given: match scores are attached to the returned
//! [`RankedResult`] values and never written back to products.

use crate::addons::AddOn;
use crate::config::EngineConfig;
use crate::context::SelectionContext;
use crate::personality::{DominantTraitRecommendation, TraitValues};
use crate::reference::{ReferenceData, ReferenceError};
use crate::showcase::ShowcaseHit;
use ordered_float::OrderedFloat;
use serde::Serialize;
use shoprank_core::{Category, Product};
use std::cmp::Ordering;
use tracing::debug;

/// A product with the score that placed it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedResult<'a> {
    pub product: &'a Product,
    /// Request-local ordering score, >= 0
    pub match_score: f64,
}

/// Which branch of the selection policy produced a shortlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingBranch {
    Query,
    Category,
    Trait,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedSelection<'a> {
    pub branch: RankingBranch,
    /// Products the branch considered before the limit was applied
    pub candidates: usize,
    pub results: Vec<RankedResult<'a>>,
}

/// Split the external comma-separated trait form into lowercase tokens.
/// Blank tokens are dropped; duplicates are kept and count twice.
pub fn parse_requested_traits(external: &str) -> Vec<String> {
    external
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Fraction of `requested` tokens found as substrings of the product's
/// lowercase trait string. Tokens must already be lowercase.
pub fn trait_overlap(product: &Product, requested: &[String]) -> f64 {
    if requested.is_empty() {
        return 0.0;
    }
    let haystack = product.traits.to_lowercase_external();
    let hits = requested.iter().filter(|t| haystack.contains(t.as_str())).count();
    hits as f64 / requested.len() as f64
}

/// Stable descending sort on interest score
fn by_interest_desc(a: &Product, b: &Product) -> Ordering {
    OrderedFloat(b.interest_score).cmp(&OrderedFloat(a.interest_score))
}

/// Ranking engine owning its reference tables
#[derive(Debug, Clone)]
pub struct Ranker {
    reference: ReferenceData,
    config: EngineConfig,
}

impl Ranker {
    pub fn new(reference: ReferenceData, config: EngineConfig) -> Self {
        Self { reference, config }
    }

    /// Ranker over the built-in tables with default configuration
    pub fn builtin() -> Result<Self, ReferenceError> {
        Ok(Self::new(ReferenceData::builtin()?, EngineConfig::default()))
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// [`Ranker::rank_by_selection`] with the configured default limit
    pub fn recommend<'a>(&self, catalog: &'a [Product], context: &SelectionContext) -> RankedSelection<'a> {
        self.rank_by_selection(catalog, context, self.config.default_limit)
    }

    /// Shortlist products for the active selection.
    ///
    /// Exactly one branch applies, in this order:
    /// 1. query: names containing the query, case-insensitive
    /// 2. category: exact category match
    /// 3. trait: names containing any keyword mapped from the trait
    /// 4. fallback: the whole catalog, when the chosen branch matched nothing
    ///
    /// Every branch orders by interest score descending; equal scores keep
    /// catalog order. Filter hits score 1.0, fallback entries 0.0.
    pub fn rank_by_selection<'a>(
        &self,
        catalog: &'a [Product],
        context: &SelectionContext,
        limit: usize,
    ) -> RankedSelection<'a> {
        let context = if context.is_blank() { &SelectionContext::None } else { context };

        let (branch, matches): (RankingBranch, Vec<&'a Product>) = match context {
            SelectionContext::Query(query) => {
                let needle = query.trim().to_lowercase();
                let matches = catalog.iter().filter(|p| p.name_contains_lowercase(&needle)).collect();
                (RankingBranch::Query, matches)
            }
            SelectionContext::Category(name) => {
                let matches = match name.parse::<Category>() {
                    Ok(category) => catalog.iter().filter(|p| p.category == category).collect(),
                    Err(_) => Vec::new(),
                };
                (RankingBranch::Category, matches)
            }
            SelectionContext::Trait(name) => {
                let keywords = self.reference.trait_keywords.keywords_for(name);
                let matches = catalog
                    .iter()
                    .filter(|p| {
                        let lowered = p.name.to_lowercase();
                        keywords.iter().any(|k| lowered.contains(k.as_str()))
                    })
                    .collect();
                (RankingBranch::Trait, matches)
            }
            SelectionContext::None => (RankingBranch::Fallback, Vec::new()),
        };

        if matches.is_empty() {
            if branch != RankingBranch::Fallback {
                debug!(?branch, "Selection matched nothing, falling back to top interest");
            }
            return RankedSelection {
                branch: RankingBranch::Fallback,
                candidates: catalog.len(),
                results: top_by_interest(catalog.iter().collect(), limit, 0.0),
            };
        }

        debug!(?branch, candidates = matches.len(), limit, "Ranked selection");
        RankedSelection {
            branch,
            candidates: matches.len(),
            results: top_by_interest(matches, limit, 1.0),
        }
    }

    /// [`Ranker::rank_by_trait_overlap`] on the external comma-separated form,
    /// with the configured shortlist size
    pub fn match_traits<'a>(&self, catalog: &'a [Product], external: &str) -> Vec<RankedResult<'a>> {
        let requested = parse_requested_traits(external);
        self.rank_by_trait_overlap(catalog, &requested, self.config.overlap_top_n)
    }

    /// Score every product by trait overlap and return the best `top_n`.
    ///
    /// Ordering is by interest score, then match score, both descending.
    /// With no requested traits every match score is 0 and the ordering is
    /// interest score alone.
    pub fn rank_by_trait_overlap<'a>(
        &self,
        catalog: &'a [Product],
        requested_traits: &[String],
        top_n: usize,
    ) -> Vec<RankedResult<'a>> {
        let requested: Vec<String> = requested_traits
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let mut results: Vec<RankedResult<'a>> = catalog
            .iter()
            .map(|product| RankedResult {
                product,
                match_score: trait_overlap(product, &requested),
            })
            .collect();

        results.sort_by(|a, b| {
            let key_a = (OrderedFloat(a.product.interest_score), OrderedFloat(a.match_score));
            let key_b = (OrderedFloat(b.product.interest_score), OrderedFloat(b.match_score));
            key_b.cmp(&key_a)
        });
        results.truncate(top_n);

        debug!(requested = requested.len(), returned = results.len(), "Ranked by trait overlap");
        results
    }

    /// Canonical recommendation for the strongest personality dimension
    pub fn recommend_by_dominant_trait(&self, values: &TraitValues) -> DominantTraitRecommendation<'_> {
        let dimension = values.dominant();
        DominantTraitRecommendation {
            dimension,
            recommendation: self.reference.recommendations.recommend(dimension),
        }
    }

    /// Complementary items for a product, with images resolved
    pub fn lookup_add_ons(&self, product_name: &str) -> Vec<AddOn> {
        self.reference.add_ons.lookup(product_name)
    }

    pub fn search_showcase(&self, query: &str) -> Vec<ShowcaseHit> {
        self.reference.showcase.search(query, &self.reference.add_ons)
    }

    pub fn find_showcase_item(&self, name: &str) -> Option<ShowcaseHit> {
        self.reference.showcase.find(name, &self.reference.add_ons)
    }
}

fn top_by_interest(mut products: Vec<&Product>, limit: usize, match_score: f64) -> Vec<RankedResult<'_>> {
    products.sort_by(|a, b| by_interest_desc(a, b));
    products
        .into_iter()
        .take(limit)
        .map(|product| RankedResult { product, match_score })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SessionFilters;
    use shoprank_core::TraitSet;

    fn product(id: u64, name: &str, category: Category, score: f64, traits: &str) -> Product {
        Product::new(id, name, category, score, TraitSet::parse(traits)).unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Smart Speaker", Category::Electronics, 0.70, "Tech-savvy, Social"),
            product(2, "Home Decor Lamp", Category::Home, 0.90, "Creative, Relaxed"),
            product(3, "Yoga Mat", Category::Sports, 0.80, "Active, Relaxed"),
            product(4, "Wireless Bluetooth Speaker", Category::Electronics, 0.60, "Social, Adventurous"),
            product(5, "Art Supplies Kit", Category::Toys, 0.90, "Creative, Curious"),
            product(6, "Smart Watch", Category::Electronics, 0.95, "Tech-savvy, Organized"),
            product(7, "Mystery Novel", Category::Fiction, 0.55, "Curious, Analytical"),
        ]
    }

    fn ids(results: &[RankedResult<'_>]) -> Vec<u64> {
        results.iter().map(|r| r.product.id.0).collect()
    }

    #[test]
    fn test_query_branch() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        let ranked = ranker.rank_by_selection(&catalog, &SelectionContext::Query("SPEAKER".into()), 5);
        assert_eq!(ranked.branch, RankingBranch::Query);
        assert_eq!(ids(&ranked.results), vec![1, 4]);
        assert!(ranked.results.iter().all(|r| r.match_score == 1.0));
    }

    #[test]
    fn test_category_branch_is_exact() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        let ranked = ranker.rank_by_selection(&catalog, &SelectionContext::Category("Electronics".into()), 2);
        assert_eq!(ranked.branch, RankingBranch::Category);
        assert_eq!(ids(&ranked.results), vec![6, 1]);

        let ranked = ranker.rank_by_selection(&catalog, &SelectionContext::Category("electronics".into()), 2);
        assert_eq!(ranked.branch, RankingBranch::Fallback);
    }

    #[test]
    fn test_trait_branch_uses_keywords() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();

        let ranked = ranker.rank_by_selection(&catalog, &SelectionContext::Trait("Openness".into()), 5);
        assert_eq!(ranked.branch, RankingBranch::Trait);
        // equal scores keep catalog order
        assert_eq!(ids(&ranked.results), vec![2, 5]);

        let ranked = ranker.rank_by_selection(&catalog, &SelectionContext::Trait("extraversion".into()), 5);
        assert_eq!(ids(&ranked.results), vec![4]);
    }

    #[test]
    fn test_unknown_trait_falls_back() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        let ranked = ranker.rank_by_selection(&catalog, &SelectionContext::Trait("grit".into()), 3);
        assert_eq!(ranked.branch, RankingBranch::Fallback);
        assert_eq!(ids(&ranked.results), vec![6, 2, 5]);
        assert!(ranked.results.iter().all(|r| r.match_score == 0.0));
    }

    #[test]
    fn test_no_context_and_blank_context() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        let none = ranker.recommend(&catalog, &SelectionContext::None);
        assert_eq!(none.branch, RankingBranch::Fallback);
        assert_eq!(none.results.len(), 5);

        let blank = ranker.recommend(&catalog, &SelectionContext::Query("  ".into()));
        assert_eq!(blank, none);
    }

    #[test]
    fn test_query_beats_category_and_trait() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        let filters = SessionFilters {
            last_search: Some("yoga".into()),
            last_category: Some("Electronics".into()),
            last_traits: Some("openness".into()),
        };
        let ranked = ranker.recommend(&catalog, &filters.resolve());
        assert_eq!(ranked.branch, RankingBranch::Query);
        assert_eq!(ids(&ranked.results), vec![3]);
    }

    #[test]
    fn test_unmatched_query_ignores_stale_filters() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        let filters = SessionFilters {
            last_search: Some("zzz".into()),
            last_category: Some("Fiction".into()),
            last_traits: Some("openness".into()),
        };
        let ranked = ranker.recommend(&catalog, &filters.resolve());
        assert_eq!(ranked.branch, RankingBranch::Fallback);
        assert_eq!(ranked.candidates, catalog.len());
        // top interest across the whole catalog, not the Fiction shelf
        assert_eq!(ids(&ranked.results), vec![6, 2, 5, 3, 1]);
        assert!(ranked.results.iter().all(|r| r.match_score == 0.0));
    }

    #[test]
    fn test_candidates_count_before_limit() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        let ranked = ranker.rank_by_selection(&catalog, &SelectionContext::Category("Electronics".into()), 1);
        assert_eq!(ranked.candidates, 3);
        assert_eq!(ranked.results.len(), 1);
    }

    #[test]
    fn test_limit_and_sort_order() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        for limit in 0..10 {
            let ranked = ranker.rank_by_selection(&catalog, &SelectionContext::None, limit);
            assert_eq!(ranked.results.len(), limit.min(catalog.len()));
            assert!(ranked
                .results
                .windows(2)
                .all(|w| w[0].product.interest_score >= w[1].product.interest_score));
        }
    }

    #[test]
    fn test_empty_catalog() {
        let ranker = Ranker::builtin().unwrap();
        let ranked = ranker.rank_by_selection(&[], &SelectionContext::Query("x".into()), 5);
        assert_eq!(ranked.branch, RankingBranch::Fallback);
        assert!(ranked.results.is_empty());
        assert!(ranker.match_traits(&[], "curious").is_empty());
    }

    #[test]
    fn test_trait_overlap_scores() {
        let catalog = catalog();
        let requested = parse_requested_traits("Curious, relaxed, ");
        assert_eq!(requested, vec!["curious", "relaxed"]);
        assert_eq!(trait_overlap(&catalog[4], &requested), 0.5);
        assert_eq!(trait_overlap(&catalog[0], &requested), 0.0);
        assert_eq!(trait_overlap(&catalog[0], &[]), 0.0);
        // substring semantics: "tech" hits "tech-savvy"
        assert_eq!(trait_overlap(&catalog[0], &["tech".to_string()]), 1.0);
    }

    #[test]
    fn test_non_ascii_traits_fold_like_set_membership() {
        let item = product(8, "Puzzle", Category::Toys, 0.7, "Ärgerlich, Neugierig");
        assert!(item.traits.contains("ärgerlich"));
        let requested = parse_requested_traits("ÄRGERLICH");
        assert_eq!(trait_overlap(&item, &requested), 1.0);
    }

    #[test]
    fn test_trait_overlap_orders_interest_first() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        let ranked = ranker.match_traits(&catalog, "creative");
        // 6 (0.95) first despite no overlap; 2 and 5 tie on both keys
        assert_eq!(ids(&ranked), vec![6, 2, 5]);
        assert_eq!(ranked[0].match_score, 0.0);
        assert_eq!(ranked[1].match_score, 1.0);
    }

    #[test]
    fn test_trait_overlap_breaks_interest_ties() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = vec![
            product(1, "A", Category::Home, 0.8, "Caring"),
            product(2, "B", Category::Home, 0.8, "Curious, Social"),
            product(3, "C", Category::Home, 0.8, "Curious"),
        ];
        let requested = parse_requested_traits("curious, social");
        let ranked = ranker.rank_by_trait_overlap(&catalog, &requested, 3);
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn test_empty_traits_matches_interest_order() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        let by_traits = ranker.rank_by_trait_overlap(&catalog, &[], catalog.len());
        let by_interest = ranker.rank_by_selection(&catalog, &SelectionContext::None, catalog.len());
        assert_eq!(ids(&by_traits), ids(&by_interest.results));
    }

    #[test]
    fn test_ranking_does_not_touch_catalog() {
        let ranker = Ranker::builtin().unwrap();
        let catalog = catalog();
        let before = catalog.clone();
        let _ = ranker.match_traits(&catalog, "creative, curious");
        let _ = ranker.recommend(&catalog, &SelectionContext::Query("smart".into()));
        assert_eq!(catalog, before);
    }
}
