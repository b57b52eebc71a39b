// ABOUTME: Category recipe orchestration: cache check, provider fallback chain, nutrition fill
// ABOUTME: Serializes fills per cuisine key and surfaces a 502 only when every provider fails
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Fallback Orchestrator
//!
//! For a cuisine key the orchestrator answers from the cache when a fresh
//! entry exists. Otherwise it walks the configured providers in order, each
//! under its own timeout, and stores the first non-empty result after
//! filling in nutrition. Concurrent requests for the same key wait on one
//! fill instead of racing to the providers.

use crate::cache::RecipeCache;
use crate::nutrition::NutritionAggregator;
use mealvista_core::errors::{AppError, AppResult, PipelineError};
use mealvista_core::models::{RawRecipe, RecipeSource};
use mealvista_providers::{cuisines, RecipeProvider};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Recipes for one request with their provenance
#[derive(Debug, Clone)]
pub struct RecipeBatch {
    /// Recipes in provider order
    pub recipes: Vec<RawRecipe>,
    /// Cache or the provider that produced them
    pub source: RecipeSource,
}

/// Cache-first provider fallback chain
#[derive(Clone)]
pub struct RecipeOrchestrator {
    providers: Vec<Arc<dyn RecipeProvider>>,
    cache: RecipeCache,
    aggregator: NutritionAggregator,
    call_timeout: Duration,
}

impl RecipeOrchestrator {
    /// Create an orchestrator over providers in fallback order
    #[must_use]
    pub fn new(
        providers: Vec<Arc<dyn RecipeProvider>>,
        cache: RecipeCache,
        aggregator: NutritionAggregator,
        call_timeout: Duration,
    ) -> Self {
        Self {
            providers,
            cache,
            aggregator,
            call_timeout,
        }
    }

    /// Provider names in fallback order
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// The shared recipe cache
    #[must_use]
    pub const fn cache(&self) -> &RecipeCache {
        &self.cache
    }

    /// Recipes for a cuisine category
    ///
    /// # Errors
    ///
    /// Returns a 404 `AppError` listing available categories for an unknown
    /// cuisine, and a 502 `AppError` when every provider fails.
    pub async fn get_recipes(&self, cuisine: &str) -> AppResult<RecipeBatch> {
        let key = RecipeCache::key_for(cuisine);
        if cuisines::lookup(&key).is_none() {
            return Err(AppError::not_found("Category")
                .with_details(json!({ "availableCategories": cuisines::keys() })));
        }

        let lock = self.cache.fill_lock(&key);
        let _guard = lock.lock().await;

        if let Some(cached) = self.cache.get(&key).await? {
            info!(
                cuisine = %key,
                count = cached.recipes.len(),
                stored_at = %cached.stored_at.to_rfc3339(),
                "serving recipes from cache"
            );
            return Ok(RecipeBatch {
                recipes: cached.recipes,
                source: RecipeSource::Cache,
            });
        }

        let mut attempted = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            attempted.push(provider.name().to_owned());
            match self.fetch_from(provider.as_ref(), &key).await {
                Ok(mut recipes) => {
                    self.aggregator.ensure_all(&mut recipes).await;
                    if let Err(e) = self.cache.put(&key, &recipes).await {
                        warn!(cuisine = %key, error = %e, "failed to cache recipes");
                    }
                    return Ok(RecipeBatch {
                        recipes,
                        source: RecipeSource::Provider(provider.name().to_owned()),
                    });
                }
                Err(e) => warn!(cuisine = %key, "{e}"),
            }
        }

        Err(PipelineError::AllProvidersFailed {
            cuisine: key,
            attempted,
        }
        .into())
    }

    /// A recipe previously served on the category path, with its cuisine key
    ///
    /// # Errors
    ///
    /// Returns a 404 `AppError` when no fresh cache entry holds the id
    pub async fn find_recipe(&self, id: &str) -> AppResult<(String, RawRecipe)> {
        self.cache
            .find_cached(id)
            .await
            .ok_or_else(|| AppError::not_found("Recipe"))
    }

    async fn fetch_from(
        &self,
        provider: &dyn RecipeProvider,
        cuisine: &str,
    ) -> Result<Vec<RawRecipe>, PipelineError> {
        let started = Instant::now();
        let unavailable = |reason: String| PipelineError::ProviderUnavailable {
            provider: provider.name().to_owned(),
            reason,
        };

        let recipes = tokio::time::timeout(self.call_timeout, provider.fetch_by_category(cuisine))
            .await
            .map_err(|_| {
                unavailable(format!(
                    "timed out after {}s",
                    self.call_timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| unavailable(e.to_string()))?;

        if recipes.is_empty() {
            return Err(unavailable("returned no recipes".to_owned()));
        }
        info!(
            provider = provider.name(),
            cuisine,
            count = recipes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "provider succeeded"
        );
        Ok(recipes)
    }
}
