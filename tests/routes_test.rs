// ABOUTME: HTTP route tests for the recipe API using in-process axum requests
// ABOUTME: Checks response envelopes, status codes, provenance labels, and profile personalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::Router;
use helpers::axum_test::AxumTestRequest;
use helpers::fakes::{
    orchestrator, sample_recipe, template_generator, FakeProvider, StaticProfileResolver,
};
use mealvista_core::models::{HealthGoal, UserHealthProfile};
use mealvista_providers::RecipeProvider;
use mealvista_server::config::ServerConfig;
use mealvista_server::resources::ServerResources;
use mealvista_server::routes;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const TOKEN: &str = "token-vegetarian";

fn app_with(providers: Vec<Arc<dyn RecipeProvider>>) -> Router {
    let resources = ServerResources::new(
        orchestrator(providers, Duration::from_secs(60)),
        template_generator(),
        3,
    )
    .with_profile_resolver(Arc::new(StaticProfileResolver {
        token: TOKEN.to_owned(),
        profile: UserHealthProfile {
            dietary_preferences: vec!["vegetarian".to_owned()],
            allergens: vec!["garlic".to_owned()],
            health_goal: Some(HealthGoal::WeightLoss),
            ..UserHealthProfile::default()
        },
    }));
    routes::router(Arc::new(resources))
}

fn app() -> Router {
    app_with(vec![Arc::new(FakeProvider::returning(
        "themealdb",
        vec![
            sample_recipe("recipe-52772", "Teriyaki Chicken", &["500g chicken thighs"]),
            sample_recipe("recipe-52773", "Fried Rice", &["2 cups rice", "2 eggs"]),
        ],
    ))])
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = AxumTestRequest::get("/health").send(app()).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ready_endpoint() {
    let app = app();
    let response = AxumTestRequest::get("/ready").send(app.clone()).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["providers"][0], "themealdb");
    assert_eq!(body["cachedCategories"], 0);

    AxumTestRequest::get("/api/recipes/category/thai")
        .send(app.clone())
        .await;
    let body: Value = AxumTestRequest::get("/ready").send(app).await.json();
    assert_eq!(body["cachedCategories"], 1);
}

#[tokio::test]
async fn test_categories_listing() {
    let body: Value = AxumTestRequest::get("/api/recipes/categories")
        .send(app())
        .await
        .json();

    assert_eq!(body["success"], true);
    assert_eq!(body["categories"][0], "italian");
    assert_eq!(
        body["count"].as_u64().unwrap() as usize,
        body["categories"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn test_category_envelope_and_cache_label() {
    let app = app();

    let response = AxumTestRequest::get("/api/recipes/category/Italian")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["category"], "italian");
    assert_eq!(body["source"], "themealdb");
    assert_eq!(body["count"], 2);
    assert_eq!(body["recipes"][0]["id"], "recipe-52772");
    assert!(body["recipes"][0]["nutrition"]["calories"].as_u64().unwrap() > 0);

    let cached: Value = AxumTestRequest::get("/api/recipes/category/italian")
        .send(app)
        .await
        .json();
    assert_eq!(cached["source"], "cache");
    assert_eq!(cached["recipes"], body["recipes"]);
}

#[tokio::test]
async fn test_unknown_category_is_not_found() {
    let response = AxumTestRequest::get("/api/recipes/category/atlantean")
        .send(app())
        .await;
    assert_eq!(response.status(), 404);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["availableCategories"]
        .as_array()
        .unwrap()
        .contains(&Value::from("thai")));
}

#[tokio::test]
async fn test_all_providers_failed_is_bad_gateway() {
    let app = app_with(vec![
        Arc::new(FakeProvider::failing("spoonacular")),
        Arc::new(FakeProvider::failing("themealdb")),
    ]);

    let response = AxumTestRequest::get("/api/recipes/category/indian")
        .send(app)
        .await;
    assert_eq!(response.status(), 502);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to fetch indian recipes from all sources");
}

#[tokio::test]
async fn test_search_rejects_short_query() {
    let response = AxumTestRequest::get("/api/recipes/search/a").send(app()).await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Search query must be at least 2 characters");
}

#[tokio::test]
async fn test_anonymous_search() {
    let response = AxumTestRequest::get("/api/recipes/search/chicken")
        .send(app())
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["query"], "chicken");
    assert_eq!(body["source"], "ai-generated");
    assert_eq!(body["personalized"], false);
    assert_eq!(body["userProfile"]["bmiCategory"], "Normal");
    assert_eq!(body["recipes"][0]["isAIGenerated"], true);
    assert_eq!(body["recipes"][0]["name"], "Herb-Roasted Chicken");
    assert_eq!(
        body["count"].as_u64().unwrap() as usize,
        body["recipes"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn test_personalized_search() {
    let body: Value = AxumTestRequest::get("/api/recipes/search/chicken")
        .bearer(TOKEN)
        .send(app())
        .await
        .json();

    assert_eq!(body["personalized"], true);
    assert_eq!(body["userProfile"]["dietaryPreferences"][0], "vegetarian");
    assert_eq!(body["userProfile"]["healthGoal"], "weight_loss");

    let recipe = &body["recipes"][0];
    assert_eq!(recipe["name"], "Light Herb-Roasted Chicken");
    for line in recipe["ingredients"].as_array().unwrap() {
        let line = line.as_str().unwrap().to_lowercase();
        assert!(!line.contains("chicken"));
        assert!(!line.contains("garlic"));
    }
    assert_eq!(recipe["personalizedFor"]["healthGoal"], "Weight Loss");
}

#[tokio::test]
async fn test_unknown_token_is_anonymous() {
    let body: Value = AxumTestRequest::get("/api/recipes/search/pad%20thai")
        .bearer("someone-else")
        .send(app())
        .await
        .json();

    assert_eq!(body["personalized"], false);
    assert_eq!(body["query"], "pad thai");
}

#[tokio::test]
async fn test_recipe_by_id_after_category_fill() {
    let app = app();

    let missing = AxumTestRequest::get("/api/recipes/recipe-52773")
        .send(app.clone())
        .await;
    assert_eq!(missing.status(), 404);

    AxumTestRequest::get("/api/recipes/category/italian")
        .send(app.clone())
        .await;

    let response = AxumTestRequest::get("/api/recipes/recipe-52773").send(app).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["category"], "italian");
    assert_eq!(body["recipe"]["name"], "Fried Rice");
}

#[test]
fn test_resources_from_default_config() {
    let resources = ServerResources::from_config(&ServerConfig::default());

    assert_eq!(resources.orchestrator.provider_names(), vec!["themealdb"]);
    assert_eq!(resources.search_results, 3);
}

#[test]
fn test_resources_honor_provider_order() {
    let mut config = ServerConfig::default();
    config.providers.order = vec!["themealdb".to_owned(), "spoonacular".to_owned()];
    config.providers.spoonacular_api_key = Some("key".to_owned());

    let resources = ServerResources::from_config(&config);

    assert_eq!(
        resources.orchestrator.provider_names(),
        vec!["themealdb", "spoonacular"]
    );
}
