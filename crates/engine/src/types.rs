//! Core data model for the recommendation engine

use crate::scoring::SCORING_V1;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use uuid::Uuid;

pub type UserId = Uuid;
pub type ItemId = Uuid;
pub type AuthorId = Uuid;

/// Behavior history for every user, keyed by user
pub type BehaviorSnapshot = HashMap<UserId, Vec<InteractionRecord>>;

/// Kind of user action recorded against an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    View,
    Favorite,
    Comment,
    Rating,
}

/// Denormalized item fields captured at interaction time
///
/// Every field is optional; missing values are skipped by the profiler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author_id: Option<AuthorId>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub word_count: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One user's touch of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub kind: InteractionKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub item_snapshot: ItemSnapshot,
}

impl InteractionRecord {
    pub fn new(user_id: UserId, item_id: ItemId, kind: InteractionKind) -> Self {
        Self {
            user_id,
            item_id,
            kind,
            timestamp: Utc::now(),
            item_snapshot: ItemSnapshot::default(),
        }
    }

    pub fn with_snapshot(mut self, snapshot: ItemSnapshot) -> Self {
        self.item_snapshot = snapshot;
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Distinct items a user has interacted with
pub fn item_set(records: &[InteractionRecord]) -> HashSet<ItemId> {
    records.iter().map(|r| r.item_id).collect()
}

/// Candidate item features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFeatures {
    pub item_id: ItemId,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub author_id: Option<AuthorId>,
    /// Average rating on a 0-5 scale, 0 when unrated
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub status: Option<String>,
}

impl ItemFeatures {
    pub fn new(item_id: ItemId, category: impl Into<String>) -> Self {
        Self {
            item_id,
            category: category.into(),
            tags: BTreeSet::new(),
            author_id: None,
            rating: 0.0,
            rating_count: 0,
            word_count: 0,
            status: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_author(mut self, author_id: AuthorId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn with_rating(mut self, rating: f64, rating_count: u32) -> Self {
        self.rating = rating;
        self.rating_count = rating_count;
        self
    }

    pub fn with_word_count(mut self, word_count: u64) -> Self {
        self.word_count = word_count;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Whether the item carries a usable rating (non-positive means unrated)
    pub fn has_rating(&self) -> bool {
        self.rating.is_finite() && self.rating > 0.0
    }

    pub fn has_category(&self) -> bool {
        !self.category.trim().is_empty()
    }
}

/// Word-count bucket preferred by a reader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPreference {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthPreference {
    /// Classify an average word count
    ///
    /// Exactly `long_above` words still counts as medium.
    pub fn from_average(average_word_count: f64) -> Self {
        let limits = SCORING_V1.profile;
        if average_word_count < limits.short_below as f64 {
            Self::Short
        } else if average_word_count > limits.long_above as f64 {
            Self::Long
        } else {
            Self::Medium
        }
    }

    /// Whether an item's word count falls in this bucket
    pub fn matches(&self, word_count: u64) -> bool {
        let limits = SCORING_V1.profile;
        match self {
            Self::Short => word_count < limits.short_below,
            Self::Medium => (limits.short_below..limits.long_above).contains(&word_count),
            Self::Long => word_count >= limits.long_above,
        }
    }
}

/// The engine's sole output unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecommendation {
    pub item_id: ItemId,
    pub score: f64,
    pub reason: String,
}

impl ScoredRecommendation {
    pub fn new(item_id: ItemId, score: f64, reason: impl Into<String>) -> Self {
        Self {
            item_id,
            score,
            reason: reason.into(),
        }
    }
}
