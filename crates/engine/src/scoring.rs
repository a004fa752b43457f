//! Fixed scoring constants
//!
//! Every weight, cap and threshold used by the scorers lives here. These are
//! versioned behaviour, not runtime configuration: changing any value changes
//! rankings, so a change must ship as a new `ScoringConstants` version.
//!
//! The popularity caps (10^6 views, 10^5 favorites, 10^4 comments) and the
//! trending normalizer are empirically chosen and still need product-side
//! calibration.

/// Item-to-item similarity weights (sum = 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSimilarityWeights {
    pub category: f64,
    pub tags: f64,
    pub author: f64,
    pub rating: f64,
    pub length: f64,
}

impl ItemSimilarityWeights {
    pub fn total(&self) -> f64 {
        self.category + self.tags + self.author + self.rating + self.length
    }
}

/// Additive content-match increments (max attainable = 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentMatchWeights {
    pub category: f64,
    pub tag_overlap: f64,
    pub author: f64,
    pub rating: f64,
    pub length: f64,
    pub status: f64,
}

impl ContentMatchWeights {
    pub fn max_score(&self) -> f64 {
        self.category + self.tag_overlap + self.author + self.rating + self.length + self.status
    }
}

/// Lifetime popularity weights, log caps and decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopularityWeights {
    pub views: f64,
    pub favorites: f64,
    pub comments: f64,
    pub rating: f64,
    pub update_frequency: f64,
    /// log10 of the view count treated as saturation
    pub view_log_cap: f64,
    pub favorite_log_cap: f64,
    pub comment_log_cap: f64,
    pub rating_count_log_cap: f64,
    /// Updates per week that earn the full update-frequency component
    pub full_update_frequency: f64,
    pub decay_horizon_days: f64,
    pub min_decay: f64,
}

/// Short-window trending coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendingWeights {
    pub view: f64,
    pub favorite: f64,
    pub comment: f64,
    pub max_growth: f64,
    pub normalizer: f64,
    pub default_window_hours: u32,
}

/// Preference profile limits and thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileLimits {
    pub top_categories: usize,
    pub top_tags: usize,
    pub top_authors: usize,
    pub top_statuses: usize,
    /// Subtracted from the mean liked rating to form the inclusion threshold
    pub rating_margin: f64,
    /// Word counts below this are "short"
    pub short_below: u64,
    /// Average word counts above this make a "long" preference
    pub long_above: u64,
}

/// Rules behind recommendation explanations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplanationRules {
    pub favourite_category: f64,
    pub high_rating_threshold: f64,
    pub high_rating: f64,
    pub popular_views_threshold: u64,
    pub popular: f64,
    pub ongoing_status: &'static str,
    pub ongoing: f64,
    pub fallback_score: f64,
}

/// Single source of truth for all scoring constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConstants {
    pub version: u32,
    /// Upper bound of the item rating scale
    pub rating_scale: f64,
    pub similarity: ItemSimilarityWeights,
    pub content: ContentMatchWeights,
    pub popularity: PopularityWeights,
    pub trending: TrendingWeights,
    pub profile: ProfileLimits,
    pub explanation: ExplanationRules,
}

pub const SCORING_V1: ScoringConstants = ScoringConstants {
    version: 1,
    rating_scale: 5.0,
    similarity: ItemSimilarityWeights {
        category: 0.3,
        tags: 0.2,
        author: 0.1,
        rating: 0.2,
        length: 0.2,
    },
    content: ContentMatchWeights {
        category: 0.3,
        tag_overlap: 0.2,
        author: 0.2,
        rating: 0.1,
        length: 0.1,
        status: 0.1,
    },
    popularity: PopularityWeights {
        views: 0.30,
        favorites: 0.25,
        comments: 0.15,
        rating: 0.20,
        update_frequency: 0.10,
        view_log_cap: 6.0,
        favorite_log_cap: 5.0,
        comment_log_cap: 4.0,
        rating_count_log_cap: 3.0,
        full_update_frequency: 7.0,
        decay_horizon_days: 365.0,
        min_decay: 0.1,
    },
    trending: TrendingWeights {
        view: 0.5,
        favorite: 3.0,
        comment: 2.0,
        max_growth: 2.0,
        normalizer: 100.0,
        default_window_hours: 24,
    },
    profile: ProfileLimits {
        top_categories: 3,
        top_tags: 5,
        top_authors: 3,
        top_statuses: 2,
        rating_margin: 0.5,
        short_below: 100_000,
        long_above: 500_000,
    },
    explanation: ExplanationRules {
        favourite_category: 0.3,
        high_rating_threshold: 4.0,
        high_rating: 0.2,
        popular_views_threshold: 10_000,
        popular: 0.2,
        ongoing_status: "serializing",
        ongoing: 0.1,
        fallback_score: 0.5,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_similarity_weights_sum_to_one() {
        assert!((SCORING_V1.similarity.total() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_content_max_score_is_one() {
        assert!((SCORING_V1.content.max_score() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_popularity_weights_sum_to_one() {
        let p = SCORING_V1.popularity;
        let sum = p.views + p.favorites + p.comments + p.rating + p.update_frequency;
        assert!((sum - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_version_one_caps() {
        assert_eq!(SCORING_V1.version, 1);
        assert_eq!(SCORING_V1.popularity.view_log_cap, 6.0);
        assert_eq!(SCORING_V1.trending.max_growth, 2.0);
        assert_eq!(SCORING_V1.trending.default_window_hours, 24);
        assert_eq!(SCORING_V1.profile.short_below, 100_000);
    }
}
