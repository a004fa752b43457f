//! Recommendation explanations
//!
//! Human-readable reasons why an item suits a reader, with a rough strength
//! score. Independent of the ranking scores.

use crate::profile::UserPreferenceProfile;
use crate::scoring::SCORING_V1;
use crate::types::ItemFeatures;
use serde::{Deserialize, Serialize};

pub const FALLBACK_REASON: &str = "Recommended for you";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub reasons: Vec<String>,
    pub score: f64,
}

/// Explain why `item` may appeal to the reader behind `profile`
///
/// `view_count` is the item's lifetime view count, when known.
pub fn explain(
    profile: &UserPreferenceProfile,
    item: &ItemFeatures,
    view_count: u64,
) -> Explanation {
    let rules = SCORING_V1.explanation;
    let mut reasons = Vec::new();
    let mut score = 0.0;

    if item.has_category() && profile.top_categories.contains(&item.category) {
        reasons.push(format!("You enjoy {} stories", item.category));
        score += rules.favourite_category;
    }

    if item.has_rating() && item.rating >= rules.high_rating_threshold {
        reasons.push("Highly rated by readers".to_string());
        score += rules.high_rating;
    }

    if view_count >= rules.popular_views_threshold {
        reasons.push("Popular with readers".to_string());
        score += rules.popular;
    }

    if item.status.as_deref() == Some(rules.ongoing_status) {
        reasons.push("Still being updated".to_string());
        score += rules.ongoing;
    }

    if reasons.is_empty() {
        return Explanation {
            reasons: vec![FALLBACK_REASON.to_string()],
            score: rules.fallback_score,
        };
    }

    Explanation {
        reasons,
        score: score.min(1.0),
    }
}
