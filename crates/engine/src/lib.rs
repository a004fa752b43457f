//! Novel Recommendation Engine
//!
//! Stateless recommendation pipeline for a web-novel platform: collaborative
//! filtering over reader histories, content matching against a derived
//! preference profile, weighted hybrid fusion, and popularity/trending lists.
//!
//! Every operation is a pure function of its inputs. The only shared state is
//! an optional [`SimilarityCache`], safe to use from many threads at once.

pub mod cache;
pub mod catalog;
pub mod cold_start;
pub mod collaborative;
pub mod config;
pub mod content_based;
pub mod diversity;
pub mod explanation;
pub mod hybrid;
pub mod popularity;
pub mod profile;
pub mod ranking;
pub mod scoring;
pub mod similarity;
pub mod types;

// Re-export key types
pub use cache::{CacheStats, SimilarityCache};
pub use catalog::{CatalogEntry, CatalogRanker};
pub use cold_start::{HandleColdStartUser, SignupPreferences};
pub use collaborative::CollaborativeFilter;
pub use config::EngineConfig;
pub use content_based::ContentRecommender;
pub use diversity::ApplyDiversityFilter;
pub use explanation::Explanation;
pub use hybrid::{BlendWeights, HybridBlender};
pub use popularity::{
    PopularityCandidate, PopularityMetrics, PopularityScorer, TrendingCandidate, TrendingMetrics,
};
pub use profile::{PreferenceProfiler, UserPreferenceProfile};
pub use scoring::{ScoringConstants, SCORING_V1};
pub use types::*;

use novelrec_core::{validate_count, validate_range, ConfigLoader, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const SIMILAR_REASON: &str = "Similar to a story you are reading";

/// Recommendation engine instance
///
/// Construct once per process and share by reference or `Arc`.
pub struct RecommendationEngine {
    config: EngineConfig,
    cache: Option<Arc<SimilarityCache>>,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let cache = config.cache_enabled.then(|| Arc::new(SimilarityCache::new()));
        info!(
            k_neighbors = config.k_neighbors,
            cache_enabled = config.cache_enabled,
            scoring_version = SCORING_V1.version,
            "Recommendation engine initialized"
        );

        Ok(Self { config, cache })
    }

    pub fn with_default_config() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    /// Build from `NOVELREC_*` environment variables and the optional config file
    pub fn from_env() -> Result<Self> {
        Self::new(EngineConfig::from_env()?)
    }

    /// Share an existing cache between engines
    pub fn with_cache(mut self, cache: Arc<SimilarityCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&Arc<SimilarityCache>> {
        self.cache.as_ref()
    }

    fn collaborative_filter(&self) -> CollaborativeFilter<'_> {
        match self.cache.as_deref() {
            Some(cache) => CollaborativeFilter::with_cache(cache),
            None => CollaborativeFilter::new(),
        }
    }

    /// Preference profile of one reader's history
    pub fn profile(&self, history: &[InteractionRecord]) -> UserPreferenceProfile {
        PreferenceProfiler::profile(history)
    }

    /// Items enjoyed by the `k` readers most similar to `target`
    #[instrument(skip(self, behaviors), fields(users = behaviors.len()))]
    pub fn collaborative(
        &self,
        target: UserId,
        behaviors: &BehaviorSnapshot,
        k: usize,
        n: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(k, "k")?;
        validate_count(n, "n")?;

        Ok(self.collaborative_filter().recommend(target, behaviors, k, n))
    }

    /// Candidates matching the preference profile derived from `history`
    #[instrument(skip_all, fields(history = history.len(), candidates = candidates.len()))]
    pub fn content_based(
        &self,
        history: &[InteractionRecord],
        candidates: &[ItemFeatures],
        n: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(n, "n")?;

        let profile = PreferenceProfiler::profile(history);
        Ok(ContentRecommender::recommend(&profile, candidates, n))
    }

    /// Weighted fusion of collaborative and content results for `target`
    ///
    /// Both strategies are asked for twice `n` results before fusion; `k`
    /// bounds the collaborative neighbourhood.
    #[instrument(
        skip(self, behaviors, candidates),
        fields(users = behaviors.len(), candidates = candidates.len())
    )]
    pub fn hybrid(
        &self,
        target: UserId,
        behaviors: &BehaviorSnapshot,
        candidates: &[ItemFeatures],
        weights: BlendWeights,
        k: usize,
        n: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(k, "k")?;
        validate_count(n, "n")?;
        weights.validate()?;
        if weights.collaborative == 0.0 && weights.content == 0.0 {
            warn!("Both blend weights are zero, hybrid result will be empty");
        }

        let pool = n.saturating_mul(hybrid::CANDIDATE_POOL_FACTOR);
        let collaborative = self
            .collaborative_filter()
            .recommend(target, behaviors, k, pool);

        let history = behaviors.get(&target).map(Vec::as_slice).unwrap_or_default();
        let profile = PreferenceProfiler::profile(history);
        let content = ContentRecommender::recommend(&profile, candidates, pool);

        debug!(
            collaborative = collaborative.len(),
            content = content.len(),
            "Blending strategy results"
        );

        Ok(HybridBlender::blend(&collaborative, &content, weights, n))
    }

    /// [`Self::hybrid`] with the configured weights, neighbourhood and list length
    pub fn hybrid_with_defaults(
        &self,
        target: UserId,
        behaviors: &BehaviorSnapshot,
        candidates: &[ItemFeatures],
    ) -> Result<Vec<ScoredRecommendation>> {
        self.hybrid(
            target,
            behaviors,
            candidates,
            self.config.blend_weights(),
            self.config.k_neighbors,
            self.config.n_recommendations,
        )
    }

    /// Rank candidates by trending score over a window of `window_days`
    ///
    /// `category` filters the pool before scoring.
    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub fn trending_list(
        &self,
        candidates: &[TrendingCandidate],
        n: usize,
        window_days: u32,
        category: Option<&str>,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(n, "n")?;
        validate_count(window_days as usize, "window_days")?;
        for candidate in candidates {
            candidate.metrics.validate()?;
        }

        let window_hours = window_days.saturating_mul(24);
        let reason = format!("Trending over the last {} days", window_days);
        Ok(PopularityScorer::rank_trending(
            candidates,
            n,
            window_hours,
            category,
            &reason,
        ))
    }

    /// Rank candidates by lifetime popularity
    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub fn popular_list(
        &self,
        candidates: &[PopularityCandidate],
        n: usize,
        category: Option<&str>,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(n, "n")?;
        for candidate in candidates {
            candidate.metrics.validate()?;
        }

        let reason = match category {
            Some(category) => format!("Popular in {}", category),
            None => cold_start::POPULAR_REASON.to_string(),
        };
        Ok(PopularityScorer::rank_popular(candidates, n, category, &reason))
    }

    pub fn popularity_score(&self, metrics: &PopularityMetrics) -> Result<f64> {
        metrics.validate()?;
        Ok(PopularityScorer::popularity(metrics))
    }

    /// Trending score over the configured window
    pub fn trending_score(&self, metrics: &TrendingMetrics) -> Result<f64> {
        metrics.validate()?;
        Ok(PopularityScorer::trending(metrics, self.config.window_hours))
    }

    /// Candidates most similar to `target`, excluding `target` itself
    #[instrument(skip_all, fields(item_id = %target.item_id, candidates = candidates.len()))]
    pub fn similar_items(
        &self,
        target: &ItemFeatures,
        candidates: &[ItemFeatures],
        n: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(n, "n")?;

        let scores = candidates
            .iter()
            .filter(|candidate| candidate.item_id != target.item_id)
            .map(|candidate| {
                let compute = || similarity::item_similarity(target, candidate);
                let score = match self.cache.as_deref() {
                    Some(cache) => {
                        cache.get_or_compute_item(target.item_id, candidate.item_id, compute)
                    }
                    None => compute(),
                };
                (candidate.item_id, score)
            })
            .filter(|(_, score)| *score > 0.0);

        Ok(ranking::rank_top_n(scores, n, SIMILAR_REASON))
    }

    /// Items created within `window_days` of `now`, newest first
    #[instrument(skip(self, entries), fields(entries = entries.len()))]
    pub fn new_arrivals(
        &self,
        entries: &[CatalogEntry],
        window_days: u32,
        now: DateTime<Utc>,
        n: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(n, "n")?;
        validate_count(window_days as usize, "window_days")?;
        Self::validate_entries(entries)?;

        Ok(CatalogRanker::new_arrivals(entries, window_days, now, n))
    }

    /// Other items by the same author, optionally excluding the one on display
    #[instrument(skip(self, entries), fields(entries = entries.len()))]
    pub fn author_list(
        &self,
        entries: &[CatalogEntry],
        author_id: AuthorId,
        exclude: Option<ItemId>,
        n: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(n, "n")?;
        Self::validate_entries(entries)?;

        Ok(CatalogRanker::by_author(entries, author_id, exclude, n))
    }

    /// Category shelf without the items in `history`
    ///
    /// Anonymous readers pass an empty history.
    #[instrument(skip(self, entries, history), fields(entries = entries.len()))]
    pub fn category_list(
        &self,
        entries: &[CatalogEntry],
        category: &str,
        history: &[InteractionRecord],
        n: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(n, "n")?;
        Self::validate_entries(entries)?;

        let read = item_set(history);
        Ok(CatalogRanker::by_category(entries, category, &read, n))
    }

    fn validate_entries(entries: &[CatalogEntry]) -> Result<()> {
        entries.iter().try_for_each(CatalogEntry::validate)
    }

    /// Recommendations for a reader without history
    pub fn cold_start(
        &self,
        signup: Option<&SignupPreferences>,
        candidates: &[PopularityCandidate],
        n: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(n, "n")?;
        for candidate in candidates {
            candidate.metrics.validate()?;
        }

        Ok(HandleColdStartUser::execute(signup, candidates, n))
    }

    /// Re-rank `candidates` with MMR using the configured lambda
    pub fn diversified(
        &self,
        candidates: Vec<ScoredRecommendation>,
        features: &HashMap<ItemId, ItemFeatures>,
        n: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        self.diversified_with_lambda(candidates, features, self.config.diversity_lambda, n)
    }

    pub fn diversified_with_lambda(
        &self,
        candidates: Vec<ScoredRecommendation>,
        features: &HashMap<ItemId, ItemFeatures>,
        lambda: f64,
        n: usize,
    ) -> Result<Vec<ScoredRecommendation>> {
        validate_count(n, "n")?;
        validate_range(lambda, 0.0, 1.0, "lambda")?;

        Ok(ApplyDiversityFilter::execute(
            candidates,
            features,
            lambda,
            n,
            similarity::item_similarity,
        ))
    }

    pub fn explain(
        &self,
        profile: &UserPreferenceProfile,
        item: &ItemFeatures,
        view_count: u64,
    ) -> Explanation {
        explanation::explain(profile, item, view_count)
    }

    /// Drop cached similarities for a reader whose history changed
    pub fn invalidate_user(&self, user_id: UserId) -> usize {
        let removed = self
            .cache
            .as_ref()
            .map_or(0, |cache| cache.invalidate_user(user_id));
        info!(%user_id, removed, "User similarity cache invalidated");
        removed
    }

    /// Drop cached similarities for an item whose features changed
    pub fn invalidate_item(&self, item_id: ItemId) -> usize {
        let removed = self
            .cache
            .as_ref()
            .map_or(0, |cache| cache.invalidate_item(item_id));
        info!(%item_id, removed, "Item similarity cache invalidated");
        removed
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.stats())
    }
}

#[cfg(test)]
mod tests;
