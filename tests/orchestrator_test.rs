// ABOUTME: Integration tests for the category orchestrator
// ABOUTME: Covers provider fallback order, cache hits and expiry, single-flight fills, and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fakes::{orchestrator, sample_recipe, FakeProvider, Script};
use mealvista_core::models::RecipeSource;
use mealvista_providers::RecipeProvider;
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(60);

fn pasta() -> Vec<mealvista_core::models::RawRecipe> {
    vec![
        sample_recipe("recipe-1", "Penne Arrabbiata", &["400g penne", "2 tbsp olive oil"]),
        sample_recipe("recipe-2", "Risotto", &["1 cup arborio rice", "1 onion"]),
    ]
}

#[tokio::test]
async fn test_first_provider_success_is_served() {
    let primary = Arc::new(FakeProvider::returning("primary", pasta()));
    let secondary = Arc::new(FakeProvider::returning("secondary", pasta()));
    let orch = orchestrator(vec![primary.clone(), secondary.clone()], TTL);

    let batch = orch.get_recipes("italian").await.unwrap();

    assert_eq!(batch.source, RecipeSource::Provider("primary".to_owned()));
    assert_eq!(batch.recipes.len(), 2);
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 0);
}

#[tokio::test]
async fn test_falls_back_in_order() {
    let failing = Arc::new(FakeProvider::failing("primary"));
    let empty = Arc::new(FakeProvider::new("secondary", Script::Empty));
    let last = Arc::new(FakeProvider::returning("tertiary", pasta()));
    let orch = orchestrator(vec![failing.clone(), empty.clone(), last.clone()], TTL);

    let batch = orch.get_recipes("Italian").await.unwrap();

    assert_eq!(batch.source.as_str(), "tertiary");
    assert_eq!((failing.calls(), empty.calls(), last.calls()), (1, 1, 1));
}

#[tokio::test]
async fn test_slow_provider_times_out_and_falls_back() {
    let slow = Arc::new(FakeProvider::returning("slow", pasta()).with_delay(Duration::from_secs(2)));
    let fast = Arc::new(FakeProvider::returning("fast", pasta()));
    let orch = orchestrator(vec![slow.clone(), fast.clone()], TTL);

    let batch = orch.get_recipes("italian").await.unwrap();

    assert_eq!(batch.source.as_str(), "fast");
    assert_eq!(slow.calls(), 1);
}

#[tokio::test]
async fn test_nutrition_filled_before_serving() {
    let provider = Arc::new(FakeProvider::returning("primary", pasta()));
    let orch = orchestrator(vec![provider], TTL);

    let batch = orch.get_recipes("italian").await.unwrap();

    assert!(batch.recipes.iter().all(|r| r.nutrition.calories > 0));
}

#[tokio::test]
async fn test_cache_hit_returns_identical_recipes() {
    let provider = Arc::new(FakeProvider::returning("primary", pasta()));
    let orch = orchestrator(vec![provider.clone()], TTL);

    let first = orch.get_recipes("italian").await.unwrap();
    let second = orch.get_recipes("ITALIAN ").await.unwrap();

    assert_eq!(second.source, RecipeSource::Cache);
    assert_eq!(provider.calls(), 1);
    assert_eq!(
        serde_json::to_vec(&first.recipes).unwrap(),
        serde_json::to_vec(&second.recipes).unwrap()
    );
}

#[tokio::test]
async fn test_expired_entry_refetches() {
    let provider = Arc::new(FakeProvider::returning("primary", pasta()));
    let orch = orchestrator(vec![provider.clone()], Duration::from_millis(50));

    orch.get_recipes("italian").await.unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;
    let batch = orch.get_recipes("italian").await.unwrap();

    assert_eq!(batch.source.as_str(), "primary");
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_all_providers_failed_is_bad_gateway() {
    let orch = orchestrator(
        vec![
            Arc::new(FakeProvider::failing("primary")),
            Arc::new(FakeProvider::new("secondary", Script::Empty)),
        ],
        TTL,
    );

    let error = orch.get_recipes("thai").await.unwrap_err();

    assert_eq!(error.http_status(), 502);
    assert!(error.message.contains("thai"));
    assert_eq!(error.details["attempted"], serde_json::json!(["primary", "secondary"]));
    assert!(orch.cache().is_empty().await);
}

#[tokio::test]
async fn test_unknown_cuisine_lists_available_categories() {
    let provider = Arc::new(FakeProvider::returning("primary", pasta()));
    let orch = orchestrator(vec![provider.clone()], TTL);

    let error = orch.get_recipes("martian").await.unwrap_err();

    assert_eq!(error.http_status(), 404);
    assert_eq!(error.details["availableCategories"][0], "italian");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_concurrent_requests_share_one_fill() {
    let provider = Arc::new(
        FakeProvider::returning("primary", pasta()).with_delay(Duration::from_millis(100)),
    );
    let orch = Arc::new(orchestrator(vec![provider.clone()], TTL));

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let orch = orch.clone();
            tokio::spawn(async move { orch.get_recipes("mexican").await })
        })
        .collect();

    let mut sources = Vec::new();
    for handle in handles {
        sources.push(handle.await.unwrap().unwrap().source);
    }

    assert_eq!(provider.calls(), 1);
    assert_eq!(
        sources.iter().filter(|s| **s == RecipeSource::Cache).count(),
        4
    );
}

#[tokio::test]
async fn test_find_recipe_after_category_fill() {
    let provider = Arc::new(FakeProvider::returning("primary", pasta()));
    let orch = orchestrator(vec![provider], TTL);

    assert_eq!(orch.find_recipe("recipe-2").await.unwrap_err().http_status(), 404);

    orch.get_recipes("italian").await.unwrap();
    let (category, recipe) = orch.find_recipe("recipe-2").await.unwrap();

    assert_eq!(category, "italian");
    assert_eq!(recipe.name, "Risotto");
}

#[test]
fn test_provider_names_preserve_order() {
    let providers: Vec<Arc<dyn RecipeProvider>> = vec![
        Arc::new(FakeProvider::failing("spoonacular")),
        Arc::new(FakeProvider::failing("themealdb")),
    ];
    let orch = orchestrator(providers, TTL);
    assert_eq!(orch.provider_names(), vec!["spoonacular", "themealdb"]);
}
