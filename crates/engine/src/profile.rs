//! User Preference Profile
//!
//! Derives a structured preference profile from a reader's interaction
//! history: favourite categories, tags and authors by frequency, a rating
//! inclusion threshold, a preferred length bucket and preferred statuses.
//! Profiles are rebuilt per request and never persisted here.

use crate::scoring::SCORING_V1;
use crate::types::{AuthorId, InteractionRecord, LengthPreference};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Preference profile inferred from interaction history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferenceProfile {
    pub top_categories: Vec<String>,
    pub top_tags: Vec<String>,
    pub top_authors: Vec<AuthorId>,
    pub min_rating: f64,
    pub preferred_length: LengthPreference,
    pub preferred_status: Vec<String>,
}

impl UserPreferenceProfile {
    /// Whether the profile carries any signal beyond the defaults
    pub fn is_empty(&self) -> bool {
        self.top_categories.is_empty()
            && self.top_tags.is_empty()
            && self.top_authors.is_empty()
            && self.preferred_status.is_empty()
    }
}

/// Multiset counter that remembers first-seen order for tie-breaking
struct FrequencyCounter<K> {
    counts: HashMap<K, (usize, usize)>,
}

impl<K: Eq + Hash + Clone> FrequencyCounter<K> {
    fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    fn add(&mut self, key: K) {
        let first_seen = self.counts.len();
        self.counts.entry(key).or_insert((0, first_seen)).0 += 1;
    }

    /// Top `limit` keys by count, ties in first-seen order
    fn most_common(&self, limit: usize) -> Vec<K> {
        let mut entries: Vec<(&K, &(usize, usize))> = self.counts.iter().collect();
        entries.sort_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
            count_b.cmp(count_a).then_with(|| seen_a.cmp(seen_b))
        });
        entries
            .into_iter()
            .take(limit)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|v| !v.trim().is_empty())
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Build a preference profile from interaction history
///
/// Steps:
/// 1. Tally category, tag, author and status frequency across all records
/// 2. Keep the top 3 categories, 5 tags, 3 authors and 2 statuses
/// 3. Set the rating threshold half a point below the mean observed rating
/// 4. Bucket the mean observed word count into short/medium/long
///
/// Records with missing snapshot fields simply contribute nothing for that
/// field. Zero records yield the default profile.
pub struct PreferenceProfiler;

impl PreferenceProfiler {
    pub fn profile(interactions: &[InteractionRecord]) -> UserPreferenceProfile {
        let limits = SCORING_V1.profile;

        let mut categories = FrequencyCounter::new();
        let mut tags = FrequencyCounter::new();
        let mut authors = FrequencyCounter::new();
        let mut statuses = FrequencyCounter::new();
        let mut ratings = Vec::new();
        let mut word_counts = Vec::new();

        for record in interactions {
            let snapshot = &record.item_snapshot;

            if let Some(category) = non_blank(&snapshot.category) {
                categories.add(category.clone());
            }

            for tag in snapshot.tags.iter().filter(|t| !t.trim().is_empty()) {
                tags.add(tag.clone());
            }

            if let Some(author_id) = snapshot.author_id {
                authors.add(author_id);
            }

            if let Some(rating) = snapshot.rating.filter(|r| r.is_finite() && *r > 0.0) {
                ratings.push(rating);
            }

            if let Some(word_count) = snapshot.word_count.filter(|w| *w > 0) {
                word_counts.push(word_count as f64);
            }

            if let Some(status) = non_blank(&snapshot.status) {
                statuses.add(status.clone());
            }
        }

        let min_rating = mean(&ratings)
            .map(|avg| (avg - limits.rating_margin).max(0.0))
            .unwrap_or(0.0);

        let preferred_length = mean(&word_counts)
            .map(LengthPreference::from_average)
            .unwrap_or_default();

        UserPreferenceProfile {
            top_categories: categories.most_common(limits.top_categories),
            top_tags: tags.most_common(limits.top_tags),
            top_authors: authors.most_common(limits.top_authors),
            min_rating,
            preferred_length,
            preferred_status: statuses.most_common(limits.top_statuses),
        }
    }
}
