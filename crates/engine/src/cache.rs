//! Read-through similarity cache
//!
//! Concurrent map of user-pair and item-pair similarities shared by every
//! request served by one engine. Entries never expire; the caller invalidates
//! them when behavior or feature data changes.

use crate::types::{ItemId, UserId};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;
use uuid::Uuid;

/// Order-normalized pair key so (a, b) and (b, a) share an entry
fn pair_key(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Point-in-time cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub user_entries: usize,
    pub item_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

#[derive(Debug, Default)]
pub struct SimilarityCache {
    users: DashMap<(UserId, UserId), f64>,
    items: DashMap<(ItemId, ItemId), f64>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SimilarityCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_or_compute(
        map: &DashMap<(Uuid, Uuid), f64>,
        hits: &AtomicU64,
        misses: &AtomicU64,
        key: (Uuid, Uuid),
        compute: impl FnOnce() -> f64,
    ) -> f64 {
        // Copy out before inserting; holding the shard guard across insert deadlocks.
        if let Some(value) = map.get(&key).map(|entry| *entry.value()) {
            hits.fetch_add(1, Ordering::Relaxed);
            return value;
        }

        misses.fetch_add(1, Ordering::Relaxed);
        let value = compute();
        map.insert(key, value);
        value
    }

    /// Cached user-pair similarity, computed on miss
    pub fn get_or_compute_user(
        &self,
        a: UserId,
        b: UserId,
        compute: impl FnOnce() -> f64,
    ) -> f64 {
        Self::get_or_compute(&self.users, &self.hits, &self.misses, pair_key(a, b), compute)
    }

    /// Cached item-pair similarity, computed on miss
    pub fn get_or_compute_item(
        &self,
        a: ItemId,
        b: ItemId,
        compute: impl FnOnce() -> f64,
    ) -> f64 {
        Self::get_or_compute(&self.items, &self.hits, &self.misses, pair_key(a, b), compute)
    }

    pub fn user_similarity(&self, a: UserId, b: UserId) -> Option<f64> {
        self.users.get(&pair_key(a, b)).map(|entry| *entry.value())
    }

    pub fn item_similarity(&self, a: ItemId, b: ItemId) -> Option<f64> {
        self.items.get(&pair_key(a, b)).map(|entry| *entry.value())
    }

    /// Drop every pair involving `user_id`; returns the number of entries removed
    pub fn invalidate_user(&self, user_id: UserId) -> usize {
        let before = self.users.len();
        self.users.retain(|(a, b), _| *a != user_id && *b != user_id);
        let removed = before.saturating_sub(self.users.len());
        debug!(%user_id, removed, "Invalidated user similarity entries");
        removed
    }

    /// Drop every pair involving `item_id`; returns the number of entries removed
    pub fn invalidate_item(&self, item_id: ItemId) -> usize {
        let before = self.items.len();
        self.items.retain(|(a, b), _| *a != item_id && *b != item_id);
        let removed = before.saturating_sub(self.items.len());
        debug!(%item_id, removed, "Invalidated item similarity entries");
        removed
    }

    pub fn clear(&self) {
        self.users.clear();
        self.items.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            user_entries: self.users.len(),
            item_entries: self.items.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
