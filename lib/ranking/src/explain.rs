//! Serializable views of ranking output
//!
//! Ranked results borrow from the catalog; these types own their data so
//! they can be rendered or returned by the presentation layer.

use crate::ranker::{RankedResult, RankedSelection, RankingBranch};
use serde::Serialize;
use shoprank_core::{Category, ProductId};

/// A ranked product with the score that placed it
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedResult {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub interest_score: f64,
    pub match_score: f64,
    pub traits: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl ExplainedResult {
    pub fn from_ranked(ranked: &RankedResult<'_>) -> Self {
        let product = ranked.product;
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category,
            interest_score: product.interest_score,
            match_score: ranked.match_score,
            traits: product.traits.iter().map(str::to_string).collect(),
            image_path: product.image_path.clone(),
        }
    }

    pub fn from_ranked_list(ranked: &[RankedResult<'_>]) -> Vec<Self> {
        ranked.iter().map(Self::from_ranked).collect()
    }
}

/// Response for a recommendation request
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub branch: RankingBranch,
    pub stats: RankingStats,
    pub result: Vec<ExplainedResult>,
}

impl RecommendationResponse {
    pub fn from_selection(selection: &RankedSelection<'_>) -> Self {
        Self {
            branch: selection.branch,
            stats: RankingStats::compute(&selection.results, selection.candidates),
            result: ExplainedResult::from_ranked_list(&selection.results),
        }
    }
}

/// Response for a trait-overlap request
#[derive(Debug, Clone, Serialize)]
pub struct TraitMatchResponse {
    /// Normalized traits the products were scored against
    pub requested: Vec<String>,
    pub stats: RankingStats,
    pub result: Vec<ExplainedResult>,
}

impl TraitMatchResponse {
    /// Every catalog product is scored, so `catalog_len` is the candidate count
    pub fn from_ranked(requested: &[String], ranked: &[RankedResult<'_>], catalog_len: usize) -> Self {
        Self {
            requested: requested.to_vec(),
            stats: RankingStats::compute(ranked, catalog_len),
            result: ExplainedResult::from_ranked_list(ranked),
        }
    }
}

/// Summary statistics for a shortlist
#[derive(Debug, Clone, Serialize)]
pub struct RankingStats {
    pub candidates_count: usize,
    pub results_count: usize,
    pub avg_interest: f64,
    pub best_interest: f64,
    pub avg_match: f64,
}

impl RankingStats {
    pub fn compute(results: &[RankedResult<'_>], candidates_count: usize) -> Self {
        if results.is_empty() {
            return Self {
                candidates_count,
                results_count: 0,
                avg_interest: 0.0,
                best_interest: 0.0,
                avg_match: 0.0,
            };
        }

        let n = results.len() as f64;
        let avg_interest = results.iter().map(|r| r.product.interest_score).sum::<f64>() / n;
        let avg_match = results.iter().map(|r| r.match_score).sum::<f64>() / n;
        let best_interest = results
            .iter()
            .map(|r| r.product.interest_score)
            .fold(0.0, f64::max);

        Self {
            candidates_count,
            results_count: results.len(),
            avg_interest,
            best_interest,
            avg_match,
        }
    }
}
