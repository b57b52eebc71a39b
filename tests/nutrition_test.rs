// ABOUTME: Integration tests for nutrition estimation and recipe aggregation
// ABOUTME: Exercises lookup fallback, timeouts, scaling, and order independence of totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fakes::{sample_recipe, FailingLookup, FixedLookup, SlowLookup};
use mealvista_core::models::{NutritionProfile, PerHundredGram};
use mealvista_intelligence::{NutritionHeuristicsConfig, UnitWeights};
use mealvista_server::external::MockUsdaClient;
use mealvista_server::nutrition::{EstimateSource, NutritionAggregator, NutritionEstimator};
use std::sync::Arc;
use std::time::Duration;

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn fixed(calories: f64, protein: f64) -> PerHundredGram {
    PerHundredGram::from_array([calories, protein, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
}

fn heuristic() -> NutritionAggregator {
    NutritionAggregator::new(NutritionEstimator::heuristic_only(), 4)
}

#[tokio::test]
async fn test_authoritative_values_scaled_by_grams() {
    let estimator = NutritionEstimator::new(
        Arc::new(FixedLookup(fixed(200.0, 10.0))),
        Duration::from_secs(1),
    );
    let aggregator = NutritionAggregator::new(estimator, 4);

    let profile = aggregator.aggregate(&lines(&["100g lentils", "50 g rice"])).await;

    assert_eq!(profile.calories, 300);
    assert_eq!(profile.protein, 15);
    assert_eq!(profile.fat, 0);
}

#[tokio::test]
async fn test_failing_lookup_matches_heuristics() {
    let estimator = NutritionEstimator::new(Arc::new(FailingLookup), Duration::from_secs(1));
    let with_failures = NutritionAggregator::new(estimator, 4);
    let recipe = lines(&["2 cups rice", "1 onion", "200g chicken breast", "1 tbsp olive oil"]);

    assert_eq!(
        with_failures.aggregate(&recipe).await,
        heuristic().aggregate(&recipe).await
    );
}

#[tokio::test]
async fn test_slow_lookup_times_out_to_heuristics() {
    let slow = SlowLookup {
        delay: Duration::from_millis(300),
        values: fixed(999.0, 99.0),
    };
    let estimator = NutritionEstimator::new(Arc::new(slow), Duration::from_millis(50));

    let estimate = estimator.estimate("rice").await;

    assert_eq!(estimate.source, EstimateSource::Heuristic);
    assert!(estimate.per_100g.calories < 999.0);
}

#[tokio::test]
async fn test_mock_usda_lookup() {
    let mock = Arc::new(MockUsdaClient::new());
    let estimator = NutritionEstimator::new(mock.clone(), Duration::from_secs(1));
    let aggregator = NutritionAggregator::new(estimator, 2);

    let profile = aggregator.aggregate(&lines(&["200g chicken breast"])).await;

    assert_eq!(profile.calories, 330);
    assert_eq!(profile.protein, 62);
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_unknown_food_in_mock_uses_heuristics() {
    let estimator = NutritionEstimator::new(Arc::new(MockUsdaClient::new()), Duration::from_secs(1));
    let estimate = estimator.estimate("quinoa").await;
    assert_eq!(estimate.source, EstimateSource::Heuristic);
}

#[tokio::test]
async fn test_permutation_invariance() {
    let forward = lines(&[
        "2 cups rice",
        "1 1/2 tbsp olive oil",
        "3 eggs",
        "250g beef",
        "1/2 tsp salt",
        "Fresh herbs to taste",
    ]);
    let mut reversed = forward.clone();
    reversed.reverse();

    let aggregator = heuristic();
    let narrow = NutritionAggregator::new(NutritionEstimator::heuristic_only(), 1);

    let expected = aggregator.aggregate(&forward).await;
    assert_eq!(aggregator.aggregate(&reversed).await, expected);
    assert_eq!(narrow.aggregate(&forward).await, expected);
}

#[tokio::test]
async fn test_repeated_aggregation_is_deterministic() {
    let recipe = lines(&["500g potatoes", "2 tbsp butter", "1 cup milk"]);
    let aggregator = heuristic();
    let first = aggregator.aggregate(&recipe).await;
    for _ in 0..5 {
        assert_eq!(aggregator.aggregate(&recipe).await, first);
    }
}

#[tokio::test]
async fn test_blank_lines_contribute_nothing() {
    let aggregator = heuristic();
    let with_blanks = lines(&["", "200 g rice", "   "]);
    assert_eq!(
        aggregator.aggregate(&with_blanks).await,
        aggregator.aggregate(&lines(&["200 g rice"])).await
    );
}

#[tokio::test]
async fn test_ensure_nutrition_keeps_provider_values() {
    let aggregator = heuristic();
    let mut recipe = sample_recipe("spoon-1", "Salad", &["100g lettuce"]);
    recipe.nutrition = NutritionProfile {
        calories: 123,
        ..NutritionProfile::default()
    };

    aggregator.ensure_nutrition(&mut recipe).await;

    assert_eq!(recipe.nutrition.calories, 123);
}

#[tokio::test]
async fn test_ensure_all_fills_empty_recipes() {
    let aggregator = heuristic();
    let mut recipes = vec![
        sample_recipe("recipe-1", "Rice", &["200 g rice"]),
        sample_recipe("recipe-2", "Beans", &["1 cup black beans"]),
    ];

    aggregator.ensure_all(&mut recipes).await;

    assert_eq!(recipes[0].nutrition.calories, 260);
    assert!(recipes[1].nutrition.calories > 0);
}

#[tokio::test]
async fn test_custom_gram_weights() {
    let weights = UnitWeights {
        cup: 100.0,
        ..UnitWeights::default()
    };
    let aggregator = heuristic().with_weights(weights);

    assert_eq!(
        aggregator.aggregate(&lines(&["2 cups rice"])).await,
        heuristic().aggregate(&lines(&["200 g rice"])).await
    );
}

#[tokio::test]
async fn test_custom_heuristic_table() {
    let mut table = NutritionHeuristicsConfig::default();
    table.default_per_100g = fixed(50.0, 2.0);
    let estimator = NutritionEstimator::heuristic_only().with_heuristics(table);
    let aggregator = NutritionAggregator::new(estimator, 4);

    let profile = aggregator.aggregate(&lines(&["200 g lemon"])).await;

    assert_eq!(profile.calories, 100);
    assert_eq!(profile.protein, 4);
}
