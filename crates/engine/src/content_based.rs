//! Content-based filtering implementation
//!
//! Scores candidate items against a reader's preference profile with an
//! additive rule set. Unlike item-to-item similarity, inapplicable criteria
//! simply add nothing; scores are never renormalized.

use crate::profile::UserPreferenceProfile;
use crate::ranking::sort_ranked;
use crate::scoring::SCORING_V1;
use crate::types::{ItemFeatures, ScoredRecommendation};
use tracing::debug;

pub const CONTENT_REASON: &str = "Matches your reading preferences";

/// Feature-match recommender over a candidate pool
pub struct ContentRecommender;

impl ContentRecommender {
    /// Additive match score of one item, in [0, 1]
    pub fn score_item(profile: &UserPreferenceProfile, item: &ItemFeatures) -> f64 {
        let weights = SCORING_V1.content;
        let mut score = 0.0;

        if profile.top_categories.iter().any(|c| *c == item.category) {
            score += weights.category;
        }

        if !profile.top_tags.is_empty() && !item.tags.is_empty() {
            let matched = profile
                .top_tags
                .iter()
                .filter(|tag| item.tags.contains(*tag))
                .count();
            score += matched as f64 / profile.top_tags.len() as f64 * weights.tag_overlap;
        }

        if let Some(author_id) = item.author_id {
            if profile.top_authors.contains(&author_id) {
                score += weights.author;
            }
        }

        if item.rating >= profile.min_rating {
            score += weights.rating;
        }

        if profile.preferred_length.matches(item.word_count) {
            score += weights.length;
        }

        let status_matches = match &item.status {
            Some(status) => profile.preferred_status.contains(status),
            None => false,
        };
        if profile.preferred_status.is_empty() || status_matches {
            score += weights.status;
        }

        score
    }

    /// Rank `candidates` for `profile`, dropping zero scores, truncated to `n`
    pub fn recommend(
        profile: &UserPreferenceProfile,
        candidates: &[ItemFeatures],
        n: usize,
    ) -> Vec<ScoredRecommendation> {
        let mut recommendations: Vec<ScoredRecommendation> = candidates
            .iter()
            .filter_map(|item| {
                let score = Self::score_item(profile, item);
                (score > 0.0)
                    .then(|| ScoredRecommendation::new(item.item_id, score, CONTENT_REASON))
            })
            .collect();

        debug!(
            candidates = candidates.len(),
            matched = recommendations.len(),
            "Content candidates scored"
        );

        sort_ranked(&mut recommendations);
        recommendations.truncate(n);
        recommendations
    }
}
