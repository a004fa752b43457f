//! Deterministic ordering shared by every recommender
//!
//! Ranked lists are sorted by score descending with ties broken by item id
//! ascending, so identical inputs always produce identical output.

use crate::types::{ItemId, ScoredRecommendation};
use std::cmp::Ordering;

/// Ranking order: higher score first, then lower item id
pub fn rank_order(a: &ScoredRecommendation, b: &ScoredRecommendation) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.item_id.cmp(&b.item_id))
}

pub fn sort_ranked(recommendations: &mut [ScoredRecommendation]) {
    recommendations.sort_by(rank_order);
}

/// Turn raw item scores into a ranked, truncated list sharing one reason
pub fn rank_top_n<I>(scores: I, n: usize, reason: &str) -> Vec<ScoredRecommendation>
where
    I: IntoIterator<Item = (ItemId, f64)>,
{
    let mut ranked: Vec<ScoredRecommendation> = scores
        .into_iter()
        .map(|(item_id, score)| ScoredRecommendation::new(item_id, score, reason))
        .collect();

    sort_ranked(&mut ranked);
    ranked.truncate(n);
    ranked
}
