//! Randomized property checks over seeded inputs
//!
//! Every loop uses a fixed seed so failures reproduce exactly.

use crate::hybrid::BlendWeights;
use crate::popularity::{PopularityMetrics, PopularityScorer, TrendingMetrics};
use crate::similarity::{item_similarity, user_similarity};
use crate::types::*;
use crate::{EngineConfig, RecommendationEngine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

const ROUNDS: usize = 200;
const CATEGORIES: [&str; 4] = ["fantasy", "romance", "mystery", ""];
const TAGS: [&str; 6] = ["magic", "school", "revenge", "system", "slow-burn", "cultivation"];

fn random_item(rng: &mut StdRng, id: u128) -> ItemFeatures {
    let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
    let tags: Vec<&str> = TAGS.iter().copied().filter(|_| rng.gen_bool(0.3)).collect();

    let mut item = ItemFeatures::new(Uuid::from_u128(id), category).with_tags(tags);
    if rng.gen_bool(0.6) {
        item = item.with_author(Uuid::from_u128(1_000 + rng.gen_range(0..3)));
    }
    if rng.gen_bool(0.7) {
        item = item.with_rating(rng.gen_range(0.0..=5.0), rng.gen_range(1..500));
    }
    if rng.gen_bool(0.8) {
        item = item.with_word_count(rng.gen_range(1..2_000_000));
    }
    item
}

fn random_behaviors(rng: &mut StdRng, users: u128, items: u128) -> BehaviorSnapshot {
    (1..=users)
        .map(|user| {
            let user_id = Uuid::from_u128(user);
            let records = (1..=items)
                .filter(|_| rng.gen_bool(0.25))
                .map(|item| {
                    let item_id = Uuid::from_u128(10_000 + item);
                    InteractionRecord::new(user_id, item_id, InteractionKind::View)
                })
                .collect();
            (user_id, records)
        })
        .collect()
}

fn random_id_set(rng: &mut StdRng) -> HashSet<ItemId> {
    (0..20u128)
        .filter(|_| rng.gen_bool(0.3))
        .map(Uuid::from_u128)
        .collect()
}

#[test]
fn test_user_similarity_bounds_and_symmetry() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..ROUNDS {
        let a = random_id_set(&mut rng);
        let b = random_id_set(&mut rng);

        let ab = user_similarity(&a, &b);
        assert_eq!(ab, user_similarity(&b, &a));
        assert!((0.0..=1.0).contains(&ab));

        if !a.is_empty() {
            assert_eq!(user_similarity(&a, &a), 1.0);
        }
        if a.is_disjoint(&b) {
            assert_eq!(ab, 0.0);
        }
    }
}

#[test]
fn test_item_similarity_bounds_and_symmetry() {
    let mut rng = StdRng::seed_from_u64(11);

    for round in 0..ROUNDS as u128 {
        let a = random_item(&mut rng, round * 2);
        let b = random_item(&mut rng, round * 2 + 1);

        let ab = item_similarity(&a, &b);
        assert_eq!(ab, item_similarity(&b, &a), "asymmetric for {:?} / {:?}", a, b);
        assert!((0.0..=1.0).contains(&ab));
    }
}

#[test]
fn test_popularity_and_trending_bounds() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..ROUNDS {
        let popularity = PopularityMetrics {
            view_count: rng.gen_range(0..100_000_000),
            favorite_count: rng.gen_range(0..10_000_000),
            comment_count: rng.gen_range(0..1_000_000),
            rating: rng.gen_range(0.0..=5.0),
            rating_count: rng.gen_range(0..100_000),
            update_frequency_per_week: rng.gen_range(0.0..50.0),
            days_since_last_update: rng.gen_range(0.0..2_000.0),
        };
        let score = PopularityScorer::popularity(&popularity);
        assert!((0.0..=1.0).contains(&score), "popularity {} out of range", score);

        let trending = TrendingMetrics {
            recent_views: rng.gen_range(0..1_000_000),
            recent_favorites: rng.gen_range(0..100_000),
            recent_comments: rng.gen_range(0..100_000),
            growth_rate: rng.gen_range(0.0..10.0),
        };
        let window = rng.gen_range(1..=24 * 30);
        let score = PopularityScorer::trending(&trending, window);
        assert!((0.0..=1.0).contains(&score), "trending {} out of range", score);
    }
}

#[test]
fn test_collaborative_never_returns_seen_items() {
    let mut rng = StdRng::seed_from_u64(31);

    for _ in 0..20 {
        let behaviors = random_behaviors(&mut rng, 30, 40);
        let engine = RecommendationEngine::with_default_config().unwrap();

        for (user_id, records) in &behaviors {
            let seen = item_set(records);
            let recs = engine.collaborative(*user_id, &behaviors, 5, 10).unwrap();

            assert!(recs.iter().all(|r| !seen.contains(&r.item_id)));
            assert!(recs.iter().all(|r| r.score > 0.0));
            assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}

#[test]
fn test_recommenders_are_idempotent() {
    let mut rng = StdRng::seed_from_u64(43);
    let behaviors = random_behaviors(&mut rng, 25, 30);
    let candidates: Vec<ItemFeatures> =
        (0..50).map(|i| random_item(&mut rng, 10_000 + i)).collect();
    let target = Uuid::from_u128(1);

    let engine = RecommendationEngine::new(EngineConfig {
        cache_enabled: true,
        ..EngineConfig::default()
    })
    .unwrap();
    let uncached = RecommendationEngine::with_default_config().unwrap();

    let first = engine
        .hybrid(target, &behaviors, &candidates, BlendWeights::default(), 10, 10)
        .unwrap();
    let second = engine
        .hybrid(target, &behaviors, &candidates, BlendWeights::default(), 10, 10)
        .unwrap();
    let third = uncached
        .hybrid(target, &behaviors, &candidates, BlendWeights::default(), 10, 10)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, third);

    let similar_first = engine.similar_items(&candidates[0], &candidates, 10).unwrap();
    let similar_second = engine.similar_items(&candidates[0], &candidates, 10).unwrap();
    assert_eq!(similar_first, similar_second);
}

#[test]
fn test_collaborative_only_blend_reproduces_collaborative_ranking() {
    let mut rng = StdRng::seed_from_u64(59);

    for _ in 0..20 {
        let behaviors = random_behaviors(&mut rng, 30, 40);
        let engine = RecommendationEngine::with_default_config().unwrap();
        let k = rng.gen_range(1..=12);
        let candidates: Vec<ItemFeatures> =
            (1..=40).map(|i| random_item(&mut rng, 10_000 + i)).collect();
        let target = Uuid::from_u128(rng.gen_range(1..=30));

        let collaborative = engine.collaborative(target, &behaviors, k, 8).unwrap();
        let blended = engine
            .hybrid(target, &behaviors, &candidates, BlendWeights::new(1.0, 0.0), k, 8)
            .unwrap();

        let as_pairs = |recs: &[ScoredRecommendation]| -> Vec<(ItemId, f64)> {
            recs.iter().map(|r| (r.item_id, r.score)).collect()
        };
        assert_eq!(as_pairs(&collaborative), as_pairs(&blended));
    }
}

#[test]
fn test_similar_items_exclude_target() {
    let mut rng = StdRng::seed_from_u64(67);
    let engine = RecommendationEngine::with_default_config().unwrap();
    let candidates: Vec<ItemFeatures> = (0..30).map(|i| random_item(&mut rng, i)).collect();
    let features: HashMap<ItemId, ItemFeatures> =
        candidates.iter().map(|c| (c.item_id, c.clone())).collect();

    for target in &candidates {
        let similar = engine.similar_items(target, &candidates, 5).unwrap();
        assert!(similar.iter().all(|r| r.item_id != target.item_id));
        assert!(similar.iter().all(|r| features.contains_key(&r.item_id)));
        assert!(similar.iter().all(|r| r.score > 0.0 && r.score <= 1.0));
    }
}
