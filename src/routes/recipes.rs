// ABOUTME: Recipe HTTP routes: category listing, category recipes, free-text search, lookup by id
// ABOUTME: Thin handlers that validate input, resolve the profile, and wrap results in envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe routes mounted under `/api/recipes`

use crate::profiles::bearer_token;
use crate::resources::ServerResources;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use mealvista_core::constants::limits::SEARCH_QUERY_MIN_CHARS;
use mealvista_core::errors::{AppError, AppResult};
use mealvista_core::models::{RecipeSource, UserHealthProfile};
use mealvista_providers::cuisines;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create the recipe router (relative paths, nest under `/api/recipes`)
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/categories", get(Self::handle_categories))
            .route("/category/:cuisine", get(Self::handle_category))
            .route("/search/:query", get(Self::handle_search))
            .route("/:id", get(Self::handle_recipe))
            .with_state(resources)
    }

    async fn handle_categories() -> Json<Value> {
        let categories = cuisines::keys();
        Json(json!({
            "success": true,
            "count": categories.len(),
            "categories": categories,
        }))
    }

    async fn handle_category(
        State(resources): State<Arc<ServerResources>>,
        Path(cuisine): Path<String>,
    ) -> AppResult<Json<Value>> {
        let batch = resources.orchestrator.get_recipes(&cuisine).await?;
        Ok(Json(json!({
            "success": true,
            "category": cuisine.trim().to_lowercase(),
            "count": batch.recipes.len(),
            "source": batch.source,
            "recipes": batch.recipes,
        })))
    }

    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Path(query): Path<String>,
        headers: HeaderMap,
    ) -> AppResult<Json<Value>> {
        let query = query.trim();
        if query.chars().count() < SEARCH_QUERY_MIN_CHARS {
            return Err(AppError::invalid_input(format!(
                "Search query must be at least {SEARCH_QUERY_MIN_CHARS} characters"
            )));
        }

        let resolved = match bearer_token(&headers) {
            Some(token) => resources.profiles.resolve(token).await,
            None => None,
        };
        let personalized = resolved.is_some();
        let profile = resolved.unwrap_or_default();
        info!(query, personalized, "recipe search");

        let recipes = resources
            .generator
            .generate_many(query, &profile, resources.search_results)
            .await;

        Ok(Json(json!({
            "success": true,
            "query": query,
            "count": recipes.len(),
            "source": RecipeSource::AiGenerated,
            "personalized": personalized,
            "userProfile": profile_summary(&profile),
            "recipes": recipes,
        })))
    }

    async fn handle_recipe(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> AppResult<Json<Value>> {
        let (category, recipe) = resources.orchestrator.find_recipe(&id).await?;
        Ok(Json(json!({
            "success": true,
            "category": category,
            "recipe": recipe,
        })))
    }
}

/// Profile fields echoed back to the client
fn profile_summary(profile: &UserHealthProfile) -> Value {
    json!({
        "dietaryPreferences": profile.dietary_preferences,
        "allergens": profile.allergens,
        "bmi": profile.bmi,
        "bmiCategory": profile.effective_bmi_category().map(|c| c.label()),
        "healthGoal": profile.goal(),
    })
}
