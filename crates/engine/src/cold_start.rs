//! Cold Start Handling
//!
//! Recommendations for readers with no interaction history.
//!
//! Steps:
//! 1. Use categories picked at signup, if any, ranked by popularity
//! 2. Fall back to the overall popular list when nothing matches

use crate::popularity::{PopularityCandidate, PopularityScorer};
use crate::ranking::sort_ranked;
use crate::types::ScoredRecommendation;
use serde::{Deserialize, Serialize};

pub const POPULAR_REASON: &str = "Popular with all readers";

/// Preferences captured when the reader signed up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupPreferences {
    #[serde(default)]
    pub categories: Vec<String>,
}

pub struct HandleColdStartUser;

impl HandleColdStartUser {
    pub fn execute(
        signup: Option<&SignupPreferences>,
        candidates: &[PopularityCandidate],
        n: usize,
    ) -> Vec<ScoredRecommendation> {
        if let Some(preferences) = signup.filter(|p| !p.categories.is_empty()) {
            let recommendations =
                Self::category_recommendations(&preferences.categories, candidates, n);
            if !recommendations.is_empty() {
                return recommendations;
            }
        }

        PopularityScorer::rank_popular(candidates, n, None, POPULAR_REASON)
    }

    fn category_recommendations(
        categories: &[String],
        candidates: &[PopularityCandidate],
        n: usize,
    ) -> Vec<ScoredRecommendation> {
        let mut recommendations: Vec<ScoredRecommendation> = candidates
            .iter()
            .filter(|c| categories.contains(&c.category))
            .map(|c| {
                ScoredRecommendation::new(
                    c.item_id,
                    PopularityScorer::popularity(&c.metrics),
                    format!("Popular in {}", c.category),
                )
            })
            .collect();

        sort_ranked(&mut recommendations);
        recommendations.truncate(n);
        recommendations
    }
}
