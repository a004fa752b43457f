//! Pairwise similarity between users and between items
//!
//! User similarity is the Jaccard index over interacted item sets. Item
//! similarity is a weighted average over the feature dimensions that are
//! applicable to both items; a dimension whose data is missing on either side
//! drops out of both numerator and denominator.

use crate::scoring::SCORING_V1;
use crate::types::{ItemFeatures, ItemId};
use std::collections::HashSet;

/// |A∩B| / |A∪B| given the intersection size and both set sizes
fn jaccard_from_counts(intersection: usize, a_len: usize, b_len: usize) -> f64 {
    let union = a_len + b_len - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Jaccard similarity between two users' item sets
///
/// Returns 0.0 when both sets are empty.
pub fn user_similarity(a: &HashSet<ItemId>, b: &HashSet<ItemId>) -> f64 {
    let intersection = a.intersection(b).count();
    jaccard_from_counts(intersection, a.len(), b.len())
}

/// Feature similarity between two items, in [0, 1]
pub fn item_similarity(a: &ItemFeatures, b: &ItemFeatures) -> f64 {
    let weights = SCORING_V1.similarity;
    let mut score = 0.0;
    let mut total_weight = 0.0;

    let mut apply = |sub_score: Option<f64>, weight: f64| {
        if let Some(value) = sub_score {
            score += value * weight;
            total_weight += weight;
        }
    };

    apply(category_score(a, b), weights.category);
    apply(tag_score(a, b), weights.tags);
    apply(author_score(a, b), weights.author);
    apply(rating_score(a, b), weights.rating);
    apply(length_score(a, b), weights.length);

    if total_weight <= 0.0 {
        return 0.0;
    }

    (score / total_weight).clamp(0.0, 1.0)
}

fn category_score(a: &ItemFeatures, b: &ItemFeatures) -> Option<f64> {
    if !a.has_category() || !b.has_category() {
        return None;
    }
    Some(if a.category == b.category { 1.0 } else { 0.0 })
}

fn tag_score(a: &ItemFeatures, b: &ItemFeatures) -> Option<f64> {
    if a.tags.is_empty() || b.tags.is_empty() {
        return None;
    }
    let intersection = a.tags.intersection(&b.tags).count();
    Some(jaccard_from_counts(intersection, a.tags.len(), b.tags.len()))
}

fn author_score(a: &ItemFeatures, b: &ItemFeatures) -> Option<f64> {
    match (a.author_id, b.author_id) {
        (Some(x), Some(y)) => Some(if x == y { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn rating_score(a: &ItemFeatures, b: &ItemFeatures) -> Option<f64> {
    if !a.has_rating() || !b.has_rating() {
        return None;
    }
    let diff = (a.rating - b.rating).abs() / SCORING_V1.rating_scale;
    Some((1.0 - diff).max(0.0))
}

fn length_score(a: &ItemFeatures, b: &ItemFeatures) -> Option<f64> {
    if a.word_count == 0 || b.word_count == 0 {
        return None;
    }
    let shorter = a.word_count.min(b.word_count) as f64;
    let longer = a.word_count.max(b.word_count) as f64;
    Some(shorter / longer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const EPSILON: f64 = 1e-9;

    fn ids(values: &[u128]) -> HashSet<ItemId> {
        values.iter().map(|v| Uuid::from_u128(*v)).collect()
    }

    #[test]
    fn test_user_similarity_overlap() {
        let u = ids(&[1, 2, 3]);
        let v = ids(&[2, 3, 4]);
        assert!((user_similarity(&u, &v) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_user_similarity_identical_and_disjoint() {
        let u = ids(&[1, 2, 3]);
        assert_eq!(user_similarity(&u, &u), 1.0);
        assert_eq!(user_similarity(&u, &ids(&[7, 8])), 0.0);
    }

    #[test]
    fn test_user_similarity_empty_union() {
        assert_eq!(user_similarity(&HashSet::new(), &HashSet::new()), 0.0);
    }

    #[test]
    fn test_item_similarity_all_dimensions() {
        let a = ItemFeatures::new(Uuid::from_u128(1), "fantasy")
            .with_tags(["magic"])
            .with_author(Uuid::from_u128(100))
            .with_rating(4.0, 10)
            .with_word_count(200_000);
        let b = ItemFeatures::new(Uuid::from_u128(2), "fantasy")
            .with_tags(["romance"])
            .with_author(Uuid::from_u128(200))
            .with_rating(4.0, 12)
            .with_word_count(200_000);

        // 1.0*0.3 + 0*0.2 + 0*0.1 + 1.0*0.2 + 1.0*0.2
        assert!((item_similarity(&a, &b) - 0.7).abs() < EPSILON);
    }

    #[test]
    fn test_item_similarity_renormalizes_missing_dimensions() {
        // Only category and length apply: (0.3*1 + 0.2*0.5) / 0.5
        let a = ItemFeatures::new(Uuid::from_u128(1), "scifi").with_word_count(100_000);
        let b = ItemFeatures::new(Uuid::from_u128(2), "scifi").with_word_count(200_000);
        assert!((item_similarity(&a, &b) - 0.8).abs() < EPSILON);
    }

    #[test]
    fn test_item_similarity_nothing_applicable() {
        let a = ItemFeatures::new(Uuid::from_u128(1), "");
        let b = ItemFeatures::new(Uuid::from_u128(2), "");
        assert_eq!(item_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_item_similarity_rating_gap() {
        let a = ItemFeatures::new(Uuid::from_u128(1), "").with_rating(5.0, 3);
        let b = ItemFeatures::new(Uuid::from_u128(2), "").with_rating(2.5, 3);
        assert!((item_similarity(&a, &b) - 0.5).abs() < EPSILON);
    }
}
