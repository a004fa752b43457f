//! Hybrid Recommendation Blending
//!
//! Fuses collaborative and content-based results by weighted score sum. The
//! weights are relative, not probabilities, and need not sum to one.

use crate::ranking::rank_top_n;
use crate::types::{ItemId, ScoredRecommendation};
use novelrec_core::{validate_weight, RecError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const HYBRID_REASON: &str = "Blended from similar readers and your preferences";

/// Multiplier applied to `n` when fetching each strategy's candidates
pub const CANDIDATE_POOL_FACTOR: usize = 2;

/// Relative weights of the two strategies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub collaborative: f64,
    pub content: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            collaborative: 0.6,
            content: 0.4,
        }
    }
}

impl BlendWeights {
    pub fn new(collaborative: f64, content: f64) -> Self {
        Self {
            collaborative,
            content,
        }
    }

    /// Both weights must be finite and non-negative
    pub fn validate(&self) -> Result<(), RecError> {
        validate_weight(self.collaborative, "cf_weight")?;
        validate_weight(self.content, "cb_weight")?;
        Ok(())
    }
}

/// Weighted fusion of two ranked lists
pub struct HybridBlender;

impl HybridBlender {
    /// Combine `collaborative` and `content` results into one ranking
    ///
    /// An item missing from one strategy gets zero from it. Items whose
    /// combined score is zero are dropped, so a zero weight removes that
    /// strategy's exclusive items entirely.
    pub fn blend(
        collaborative: &[ScoredRecommendation],
        content: &[ScoredRecommendation],
        weights: BlendWeights,
        n: usize,
    ) -> Vec<ScoredRecommendation> {
        let mut combined: HashMap<ItemId, f64> = HashMap::new();

        for rec in collaborative {
            *combined.entry(rec.item_id).or_insert(0.0) += rec.score * weights.collaborative;
        }
        for rec in content {
            *combined.entry(rec.item_id).or_insert(0.0) += rec.score * weights.content;
        }

        combined.retain(|_, score| *score > 0.0);
        rank_top_n(combined, n, HYBRID_REASON)
    }
}
