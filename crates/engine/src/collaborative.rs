//! Neighbourhood Collaborative Filtering
//!
//! Recommends items read by the users whose interaction history overlaps most
//! with the target user. Each neighbour contributes its similarity to every
//! item it has touched that the target has not.
//!
//! Cost is O(U log U + U·I) for U users with I items each, which keeps the
//! ranking auditable without a matrix factorization.

use crate::cache::SimilarityCache;
use crate::ranking::rank_top_n;
use crate::similarity::user_similarity;
use crate::types::{item_set, BehaviorSnapshot, ItemId, ScoredRecommendation, UserId};
use std::collections::HashMap;
use tracing::debug;

pub const COLLABORATIVE_REASON: &str = "Readers with similar history also enjoyed this";

/// Neighbourhood-based recommender over a behavior snapshot
pub struct CollaborativeFilter<'a> {
    cache: Option<&'a SimilarityCache>,
}

impl<'a> CollaborativeFilter<'a> {
    pub fn new() -> Self {
        Self { cache: None }
    }

    /// Read user-pair similarities through `cache`
    pub fn with_cache(cache: &'a SimilarityCache) -> Self {
        Self { cache: Some(cache) }
    }

    /// Top `k` neighbours of `target`, similarity descending then user id ascending
    ///
    /// Users without interactions and users with zero similarity are skipped.
    pub fn neighbours(
        &self,
        target: UserId,
        behaviors: &BehaviorSnapshot,
        k: usize,
    ) -> Vec<(UserId, f64)> {
        let Some(target_records) = behaviors.get(&target).filter(|r| !r.is_empty()) else {
            return Vec::new();
        };
        let target_items = item_set(target_records);

        let mut similarities: Vec<(UserId, f64)> = behaviors
            .iter()
            .filter(|(user_id, records)| **user_id != target && !records.is_empty())
            .filter_map(|(user_id, records)| {
                let compute = || user_similarity(&target_items, &item_set(records));
                let similarity = match self.cache {
                    Some(cache) => cache.get_or_compute_user(target, *user_id, compute),
                    None => compute(),
                };
                (similarity > 0.0).then_some((*user_id, similarity))
            })
            .collect();

        similarities.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        similarities.truncate(k);
        similarities
    }

    /// Recommend up to `n` items for `target` from its `k` nearest neighbours
    ///
    /// A target with no history gets an empty list. Items the target has
    /// already interacted with are never returned.
    pub fn recommend(
        &self,
        target: UserId,
        behaviors: &BehaviorSnapshot,
        k: usize,
        n: usize,
    ) -> Vec<ScoredRecommendation> {
        let Some(target_records) = behaviors.get(&target).filter(|r| !r.is_empty()) else {
            debug!(%target, "No history for target user");
            return Vec::new();
        };
        let target_items = item_set(target_records);

        let neighbours = self.neighbours(target, behaviors, k);

        let mut item_scores: HashMap<ItemId, f64> = HashMap::new();
        for (neighbour_id, similarity) in &neighbours {
            let Some(records) = behaviors.get(neighbour_id) else {
                continue;
            };
            for item_id in item_set(records) {
                if !target_items.contains(&item_id) {
                    *item_scores.entry(item_id).or_insert(0.0) += similarity;
                }
            }
        }

        debug!(
            %target,
            neighbours = neighbours.len(),
            candidates = item_scores.len(),
            "Collaborative candidates scored"
        );

        rank_top_n(item_scores, n, COLLABORATIVE_REASON)
    }
}

impl Default for CollaborativeFilter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InteractionKind, InteractionRecord};
    use uuid::Uuid;

    fn snapshot(entries: &[(u128, &[u128])]) -> BehaviorSnapshot {
        entries
            .iter()
            .map(|(user, items)| {
                let user_id = Uuid::from_u128(*user);
                let records = items
                    .iter()
                    .map(|item| {
                        let item_id = Uuid::from_u128(*item);
                        InteractionRecord::new(user_id, item_id, InteractionKind::View)
                    })
                    .collect();
                (user_id, records)
            })
            .collect()
    }

    #[test]
    fn test_recommends_unseen_items_from_neighbour() {
        let behaviors = snapshot(&[(1, &[1, 2, 3]), (2, &[2, 3, 4])]);
        let recs = CollaborativeFilter::new().recommend(Uuid::from_u128(1), &behaviors, 10, 10);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].item_id, Uuid::from_u128(4));
        assert!((recs[0].score - 0.5).abs() < 1e-9);
        assert_eq!(recs[0].reason, COLLABORATIVE_REASON);
    }

    #[test]
    fn test_unknown_target_returns_empty() {
        let behaviors = snapshot(&[(2, &[2, 3, 4])]);
        assert!(CollaborativeFilter::new()
            .recommend(Uuid::from_u128(1), &behaviors, 10, 10)
            .is_empty());
    }

    #[test]
    fn test_neighbour_ties_broken_by_user_id() {
        let behaviors = snapshot(&[(1, &[1, 2]), (3, &[1, 2, 9]), (2, &[1, 2, 8])]);
        let neighbours = CollaborativeFilter::new().neighbours(Uuid::from_u128(1), &behaviors, 1);

        assert_eq!(neighbours.len(), 1);
        assert_eq!(neighbours[0].0, Uuid::from_u128(2));
    }

    #[test]
    fn test_scores_accumulate_across_neighbours() {
        // user 2: {1,2,5} -> 2/3 ; user 3: {1,5} -> 1/3 relative to {1,2}
        let behaviors = snapshot(&[(1, &[1, 2]), (2, &[1, 2, 5]), (3, &[1, 5])]);
        let recs = CollaborativeFilter::new().recommend(Uuid::from_u128(1), &behaviors, 10, 10);

        assert_eq!(recs.len(), 1);
        assert!((recs[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cache_is_populated() {
        let cache = SimilarityCache::new();
        let behaviors = snapshot(&[(1, &[1, 2, 3]), (2, &[2, 3, 4]), (3, &[9])]);

        CollaborativeFilter::with_cache(&cache).recommend(Uuid::from_u128(1), &behaviors, 10, 10);

        assert_eq!(
            cache.user_similarity(Uuid::from_u128(2), Uuid::from_u128(1)),
            Some(0.5)
        );
        assert_eq!(
            cache.user_similarity(Uuid::from_u128(1), Uuid::from_u128(3)),
            Some(0.0)
        );
    }
}
