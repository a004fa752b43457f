//! Diversity re-ranking using Maximal Marginal Relevance (MMR)
//!
//! Balances relevance with diversity so a list is not filled with near-copies
//! of the same kind of book.

use crate::ranking::sort_ranked;
use crate::types::{ItemFeatures, ItemId, ScoredRecommendation};
use std::collections::HashMap;

/// Default balance between relevance and diversity
pub const DEFAULT_LAMBDA: f64 = 0.7;

/// Apply diversity filter using MMR
///
/// MMR formula: score = λ * relevance - (1-λ) * max_similarity_to_selected
///
/// Steps:
/// 1. Sort candidates into ranking order
/// 2. Iteratively select the item that maximizes the MMR score
/// 3. Ties go to the candidate that ranked earlier
///
/// Output keeps each item's original score; list order is selection order.
/// Candidates without features count as dissimilar to everything.
pub struct ApplyDiversityFilter;

impl ApplyDiversityFilter {
    pub fn execute(
        mut candidates: Vec<ScoredRecommendation>,
        features: &HashMap<ItemId, ItemFeatures>,
        lambda: f64,
        limit: usize,
        similarity: impl Fn(&ItemFeatures, &ItemFeatures) -> f64,
    ) -> Vec<ScoredRecommendation> {
        sort_ranked(&mut candidates);

        let mut selected: Vec<ScoredRecommendation> = Vec::new();
        let mut remaining = candidates;

        while selected.len() < limit && !remaining.is_empty() {
            let mut best_score = f64::NEG_INFINITY;
            let mut best_index = 0;

            for (index, candidate) in remaining.iter().enumerate() {
                let max_similarity = match features.get(&candidate.item_id) {
                    Some(candidate_features) => selected
                        .iter()
                        .filter_map(|s| features.get(&s.item_id))
                        .map(|selected_features| similarity(candidate_features, selected_features))
                        .fold(0.0, f64::max),
                    None => 0.0,
                };

                let mmr_score = lambda * candidate.score - (1.0 - lambda) * max_similarity;

                if mmr_score > best_score {
                    best_score = mmr_score;
                    best_index = index;
                }
            }

            selected.push(remaining.remove(best_index));
        }

        selected
    }
}
