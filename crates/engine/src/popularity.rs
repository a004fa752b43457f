//! Popularity and trending scores
//!
//! Two stateless scorers: a lifetime popularity score built from log-scaled
//! engagement counts with linear time decay, and a short-window trending
//! score driven by recent activity and growth. Both are clamped to [0, 1].

use crate::ranking::sort_ranked;
use crate::scoring::SCORING_V1;
use crate::types::{ItemId, ScoredRecommendation};
use chrono::{DateTime, Utc};
use novelrec_core::{validate_finite, validate_metric, validate_range, RecError};
use serde::{Deserialize, Serialize};

/// Lifetime engagement metrics of one item
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PopularityMetrics {
    pub view_count: u64,
    pub favorite_count: u64,
    pub comment_count: u64,
    pub rating: f64,
    pub rating_count: u64,
    pub update_frequency_per_week: f64,
    pub days_since_last_update: f64,
}

impl PopularityMetrics {
    /// Fill `days_since_last_update` from the last update timestamp
    pub fn updated_at(mut self, last_update: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let seconds = (now - last_update).num_seconds().max(0) as f64;
        self.days_since_last_update = seconds / 86_400.0;
        self
    }

    pub fn validate(&self) -> Result<(), RecError> {
        validate_range(self.rating, 0.0, SCORING_V1.rating_scale, "rating")?;
        validate_metric(self.update_frequency_per_week, "update_frequency_per_week")?;
        validate_metric(self.days_since_last_update, "days_since_last_update")?;
        Ok(())
    }
}

/// Recent-window activity metrics of one item
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendingMetrics {
    pub recent_views: u64,
    pub recent_favorites: u64,
    pub recent_comments: u64,
    /// Relative growth versus the previous window (0.5 = +50%)
    pub growth_rate: f64,
}

impl TrendingMetrics {
    pub fn validate(&self) -> Result<(), RecError> {
        validate_finite(self.growth_rate, "growth_rate")
    }
}

/// An item with its lifetime metrics, for popularity ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularityCandidate {
    pub item_id: ItemId,
    pub category: String,
    pub metrics: PopularityMetrics,
}

/// An item with its recent metrics, for trending ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCandidate {
    pub item_id: ItemId,
    pub category: String,
    pub metrics: TrendingMetrics,
}

/// log10(max(x, 1)) scaled by a log cap
fn log_component(count: u64, log_cap: f64) -> f64 {
    (count.max(1) as f64).log10() / log_cap
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub struct PopularityScorer;

impl PopularityScorer {
    /// Decayed, log-scaled lifetime popularity in [0, 1]
    pub fn popularity(metrics: &PopularityMetrics) -> f64 {
        let weights = SCORING_V1.popularity;
        let mut score = 0.0;

        score += log_component(metrics.view_count, weights.view_log_cap) * weights.views;
        score +=
            log_component(metrics.favorite_count, weights.favorite_log_cap) * weights.favorites;
        score += log_component(metrics.comment_count, weights.comment_log_cap) * weights.comments;

        if metrics.rating_count > 0 {
            let rating = finite_or_zero(metrics.rating) / SCORING_V1.rating_scale;
            let confidence = log_component(metrics.rating_count, weights.rating_count_log_cap);
            score += rating * confidence * weights.rating;
        }

        let frequency = finite_or_zero(metrics.update_frequency_per_week).max(0.0);
        score += (frequency / weights.full_update_frequency).min(1.0) * weights.update_frequency;

        let days = finite_or_zero(metrics.days_since_last_update).max(0.0);
        let decay = (1.0 - days / weights.decay_horizon_days).max(weights.min_decay);

        (score * decay).clamp(0.0, 1.0)
    }

    /// Growth-weighted recent activity in [0, 1]
    ///
    /// A zero-hour window has no activity rate and scores 0.
    pub fn trending(metrics: &TrendingMetrics, window_hours: u32) -> f64 {
        if window_hours == 0 {
            return 0.0;
        }
        let weights = SCORING_V1.trending;

        let activity = (metrics.recent_views as f64 * weights.view
            + metrics.recent_favorites as f64 * weights.favorite
            + metrics.recent_comments as f64 * weights.comment)
            / window_hours as f64;

        let growth = finite_or_zero(metrics.growth_rate).min(weights.max_growth);
        let trending = activity * (1.0 + growth) / weights.normalizer;

        trending.clamp(0.0, 1.0)
    }

    /// Relative change between two periods
    ///
    /// From nothing to something counts as +100%; nothing to nothing is 0.
    pub fn growth_rate(current: f64, previous: f64) -> f64 {
        if previous == 0.0 {
            return if current > 0.0 { 1.0 } else { 0.0 };
        }
        (current - previous) / previous
    }

    /// Rank candidates by popularity after an optional category pre-filter
    pub fn rank_popular(
        candidates: &[PopularityCandidate],
        n: usize,
        category: Option<&str>,
        reason: &str,
    ) -> Vec<ScoredRecommendation> {
        let scored = candidates
            .iter()
            .filter(|c| category.map_or(true, |wanted| c.category == wanted))
            .map(|c| ScoredRecommendation::new(c.item_id, Self::popularity(&c.metrics), reason));
        Self::finish(scored, n)
    }

    /// Rank candidates by trending score after an optional category pre-filter
    pub fn rank_trending(
        candidates: &[TrendingCandidate],
        n: usize,
        window_hours: u32,
        category: Option<&str>,
        reason: &str,
    ) -> Vec<ScoredRecommendation> {
        let scored = candidates
            .iter()
            .filter(|c| category.map_or(true, |wanted| c.category == wanted))
            .map(|c| {
                let score = Self::trending(&c.metrics, window_hours);
                ScoredRecommendation::new(c.item_id, score, reason)
            });
        Self::finish(scored, n)
    }

    fn finish(
        scored: impl Iterator<Item = ScoredRecommendation>,
        n: usize,
    ) -> Vec<ScoredRecommendation> {
        let mut ranked: Vec<ScoredRecommendation> = scored.collect();
        sort_ranked(&mut ranked);
        ranked.truncate(n);
        ranked
    }
}
