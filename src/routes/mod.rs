// ABOUTME: HTTP route assembly for the recipe server
// ABOUTME: Merges health and recipe routes and applies request tracing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route modules and the top-level router

/// Liveness and readiness
pub mod health;

/// Recipe endpoints
pub mod recipes;

pub use health::HealthRoutes;
pub use recipes::RecipeRoutes;

use crate::resources::ServerResources;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .nest("/api/recipes", RecipeRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
}
