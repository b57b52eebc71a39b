// ABOUTME: Liveness and readiness probes for the recipe server
// ABOUTME: Readiness reports the provider chain and how many cuisines are cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use mealvista_core::constants::service_names;
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// `/health` and `/ready`
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .route("/ready", get(Self::ready))
            .with_state(resources)
    }

    async fn health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": service_names::MEALVISTA_SERVER,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339(),
        }))
    }

    async fn ready(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let orchestrator = &resources.orchestrator;
        Json(json!({
            "status": "ready",
            "providers": orchestrator.provider_names(),
            "cachedCategories": orchestrator.cache().len().await,
            "timestamp": Utc::now().to_rfc3339(),
        }))
    }
}
