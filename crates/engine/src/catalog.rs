//! Catalog listings
//!
//! Plain ordered lists over a catalog snapshot: new arrivals, more from one
//! author, and a category shelf that hides what the reader already read.
//! Scores only carry the list order; they are not comparable with the
//! personalised strategies.

use crate::scoring::SCORING_V1;
use crate::types::{AuthorId, ItemFeatures, ItemId, ScoredRecommendation};
use chrono::{DateTime, Utc};
use novelrec_core::{validate_range, RecError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

pub const NEW_ARRIVAL_REASON: &str = "New arrival";
pub const AUTHOR_REASON: &str = "More from this author";

/// An item with the catalog fields listings sort on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub features: ItemFeatures,
    #[serde(default)]
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
}

impl CatalogEntry {
    pub fn new(features: ItemFeatures, created_at: DateTime<Utc>) -> Self {
        Self {
            features,
            view_count: 0,
            created_at,
        }
    }

    pub fn with_views(mut self, view_count: u64) -> Self {
        self.view_count = view_count;
        self
    }

    pub fn item_id(&self) -> ItemId {
        self.features.item_id
    }

    pub fn validate(&self) -> Result<(), RecError> {
        validate_range(self.features.rating, 0.0, SCORING_V1.rating_scale, "rating")
    }

    fn rating_score(&self) -> f64 {
        (self.features.rating / SCORING_V1.rating_scale).clamp(0.0, 1.0)
    }
}

/// Rating descending, then views descending, then item id ascending
fn quality_order(a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    b.features
        .rating
        .total_cmp(&a.features.rating)
        .then_with(|| b.view_count.cmp(&a.view_count))
        .then_with(|| a.item_id().cmp(&b.item_id()))
}

pub struct CatalogRanker;

impl CatalogRanker {
    /// Items created within `window_days` of `now`, newest first
    ///
    /// Same-instant releases go by rating. Score is the remaining freshness,
    /// 1.0 for an item created at `now` down to 0.0 at the window edge.
    pub fn new_arrivals(
        entries: &[CatalogEntry],
        window_days: u32,
        now: DateTime<Utc>,
        n: usize,
    ) -> Vec<ScoredRecommendation> {
        let window_seconds = f64::from(window_days) * 86_400.0;
        if window_seconds <= 0.0 {
            return Vec::new();
        }

        let mut fresh: Vec<(&CatalogEntry, f64)> = entries
            .iter()
            .filter_map(|entry| {
                let age = (now - entry.created_at).num_seconds().max(0) as f64;
                (age <= window_seconds).then(|| (entry, 1.0 - age / window_seconds))
            })
            .collect();

        fresh.sort_by(|(a, _), (b, _)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.features.rating.total_cmp(&a.features.rating))
                .then_with(|| a.item_id().cmp(&b.item_id()))
        });
        fresh.truncate(n);

        fresh
            .into_iter()
            .map(|(entry, freshness)| {
                ScoredRecommendation::new(entry.item_id(), freshness, NEW_ARRIVAL_REASON)
            })
            .collect()
    }

    /// Other items by `author_id`, best rated first
    pub fn by_author(
        entries: &[CatalogEntry],
        author_id: AuthorId,
        exclude: Option<ItemId>,
        n: usize,
    ) -> Vec<ScoredRecommendation> {
        let matching = entries.iter().filter(|entry| {
            entry.features.author_id == Some(author_id) && Some(entry.item_id()) != exclude
        });
        Self::quality_list(matching, n, |_| AUTHOR_REASON.to_string())
    }

    /// Items in `category` the reader has not read yet, best rated first
    pub fn by_category(
        entries: &[CatalogEntry],
        category: &str,
        read: &HashSet<ItemId>,
        n: usize,
    ) -> Vec<ScoredRecommendation> {
        let matching = entries.iter().filter(|entry| {
            entry.features.category == category && !read.contains(&entry.item_id())
        });
        Self::quality_list(matching, n, |entry| {
            format!("You enjoy {} stories", entry.features.category)
        })
    }

    fn quality_list<'a>(
        entries: impl Iterator<Item = &'a CatalogEntry>,
        n: usize,
        reason: impl Fn(&CatalogEntry) -> String,
    ) -> Vec<ScoredRecommendation> {
        let mut ordered: Vec<&CatalogEntry> = entries.collect();
        ordered.sort_by(|a, b| quality_order(a, b));
        ordered.truncate(n);

        ordered
            .into_iter()
            .map(|entry| {
                ScoredRecommendation::new(entry.item_id(), entry.rating_score(), reason(entry))
            })
            .collect()
    }
}
