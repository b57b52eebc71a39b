// ABOUTME: Shared server resources built once at startup and handed to every route
// ABOUTME: Wires providers, nutrient lookup, text generation, cache, and profile resolution
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Server Resources
//!
//! Everything a request handler needs lives here behind `Arc`s. Production
//! code builds it from `ServerConfig`; tests assemble it from fakes with
//! [`ServerResources::new`].

use crate::cache::RecipeCache;
use crate::config::ServerConfig;
use crate::external::UsdaClient;
use crate::generator::RecipeGenerator;
use crate::llm::{HuggingFaceProvider, TextGenerator};
use crate::nutrition::{NutritionAggregator, NutritionEstimator};
use crate::orchestrator::RecipeOrchestrator;
use crate::profiles::{AnonymousProfileResolver, ProfileResolver};
use mealvista_providers::{
    initialize_shared_client, spoonacular, themealdb, RecipeProvider, SpoonacularProvider,
    TheMealDbProvider,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Shared state for the HTTP layer
#[derive(Clone)]
pub struct ServerResources {
    /// Category path
    pub orchestrator: Arc<RecipeOrchestrator>,
    /// Search path
    pub generator: Arc<RecipeGenerator>,
    /// Bearer token to profile lookup
    pub profiles: Arc<dyn ProfileResolver>,
    /// Recipes generated per search
    pub search_results: usize,
}

impl ServerResources {
    /// Assemble resources from prebuilt components
    #[must_use]
    pub fn new(
        orchestrator: RecipeOrchestrator,
        generator: RecipeGenerator,
        search_results: usize,
    ) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            generator: Arc::new(generator),
            profiles: Arc::new(AnonymousProfileResolver),
            search_results: search_results.max(1),
        }
    }

    /// Replace the profile resolver
    #[must_use]
    pub fn with_profile_resolver(mut self, profiles: Arc<dyn ProfileResolver>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Build production resources from configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        initialize_shared_client(
            config.http.client_timeout_secs,
            config.http.client_connect_timeout_secs,
        );

        let estimator = if config.nutrition.lookup_enabled {
            NutritionEstimator::new(
                Arc::new(UsdaClient::new(config.usda.clone())),
                Duration::from_secs(config.usda.timeout_secs),
            )
        } else {
            NutritionEstimator::heuristic_only()
        }
        .with_heuristics(config.nutrition.heuristics.clone());
        let aggregator = NutritionAggregator::new(estimator, config.nutrition.lookup_concurrency)
            .with_weights(config.nutrition.unit_weights.clone());

        let themealdb: Arc<dyn RecipeProvider> =
            Arc::new(TheMealDbProvider::new(&config.providers.themealdb_base_url));

        let mut providers: Vec<Arc<dyn RecipeProvider>> = Vec::new();
        for name in &config.providers.order {
            match name.as_str() {
                spoonacular::NAME => match &config.providers.spoonacular_api_key {
                    Some(key) => providers.push(Arc::new(SpoonacularProvider::new(
                        &config.providers.spoonacular_base_url,
                        key,
                    ))),
                    None => info!("Skipping spoonacular: no API key configured"),
                },
                themealdb::NAME => providers.push(Arc::clone(&themealdb)),
                other => warn!(provider = other, "Unknown recipe provider in RECIPE_PROVIDER_ORDER"),
            }
        }
        info!(
            providers = ?providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            "recipe provider chain configured"
        );

        let orchestrator = RecipeOrchestrator::new(
            providers,
            RecipeCache::new(&config.cache),
            aggregator.clone(),
            config.providers.call_timeout(),
        );

        let text_generator: Option<Arc<dyn TextGenerator>> =
            config.generator.huggingface_api_key.as_ref().map(|_| {
                Arc::new(HuggingFaceProvider::from_config(&config.generator))
                    as Arc<dyn TextGenerator>
            });
        let generator = RecipeGenerator::from_config(
            &config.generator,
            aggregator,
            text_generator,
            Some(themealdb),
        );

        Self::new(orchestrator, generator, config.generator.search_results)
    }
}
