// ABOUTME: Environment-based configuration for the server and every pipeline stage
// ABOUTME: ServerConfig::from_env builds nested configs, each with documented defaults
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Configuration
//!
//! All settings come from environment variables. Every nested config also
//! implements `Default`, which tests use to build components without touching
//! the process environment.

use anyhow::{Context, Result};
use mealvista_core::constants::{cache, limits, timeouts};
use mealvista_intelligence::{NutritionHeuristicsConfig, UnitWeights};
use mealvista_providers::{spoonacular, themealdb};
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default `FoodData` Central base URL
pub const DEFAULT_USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// Public rate-limited `FoodData` Central key
pub const DEFAULT_USDA_API_KEY: &str = "DEMO_KEY";

/// Default Inference API base URL
pub const DEFAULT_HUGGINGFACE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Primary text-generation model
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "EleutherAI/gpt-neo-125M";

/// Fallback text-generation model
pub const DEFAULT_HUGGINGFACE_FALLBACK_MODEL: &str = "gpt2";

/// Providers tried for category requests, in order
pub const DEFAULT_PROVIDER_ORDER: &str = "spoonacular,themealdb";

/// Top-level server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// HTTP listener and outbound client settings
    pub http: HttpConfig,
    /// Recipe provider chain
    pub providers: ProviderConfig,
    /// Authoritative nutrient lookup
    pub usda: UsdaClientConfig,
    /// Nutrition aggregation
    pub nutrition: NutritionConfig,
    /// Category recipe cache
    pub cache: CacheConfig,
    /// Recipe generator
    pub generator: GeneratorConfig,
}

/// HTTP listener and shared client settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Listener port
    pub port: u16,
    /// Shared client request timeout
    pub client_timeout_secs: u64,
    /// Shared client connect timeout
    pub client_connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            client_timeout_secs: 30,
            client_connect_timeout_secs: 10,
        }
    }
}

/// Recipe provider chain settings
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider names in fallback order
    pub order: Vec<String>,
    /// Spoonacular key; the adapter is skipped when absent
    pub spoonacular_api_key: Option<String>,
    /// Spoonacular base URL
    pub spoonacular_base_url: String,
    /// `TheMealDB` base URL
    pub themealdb_base_url: String,
    /// Budget for one provider's whole category fetch
    pub call_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            order: parse_list(DEFAULT_PROVIDER_ORDER),
            spoonacular_api_key: None,
            spoonacular_base_url: spoonacular::DEFAULT_BASE_URL.to_owned(),
            themealdb_base_url: themealdb::DEFAULT_BASE_URL.to_owned(),
            call_timeout_secs: timeouts::PROVIDER_CALL_SECS,
        }
    }
}

impl ProviderConfig {
    /// Per-provider call budget
    #[must_use]
    pub const fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

/// `FoodData` Central client settings
#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Per-lookup timeout
    pub timeout_secs: u64,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_USDA_API_KEY.to_owned(),
            base_url: DEFAULT_USDA_BASE_URL.to_owned(),
            timeout_secs: timeouts::NUTRIENT_LOOKUP_SECS,
        }
    }
}

/// Nutrition aggregation settings
#[derive(Debug, Clone)]
pub struct NutritionConfig {
    /// Concurrent lookups per recipe
    pub lookup_concurrency: usize,
    /// Use the authoritative lookup at all
    pub lookup_enabled: bool,
    /// Gram conversions; `NUTRITION_UNIT_WEIGHTS` holds partial JSON overrides
    pub unit_weights: UnitWeights,
    /// Food-group fallback table; `NUTRITION_HEURISTICS` holds partial JSON overrides
    pub heuristics: NutritionHeuristicsConfig,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            lookup_concurrency: limits::NUTRITION_LOOKUP_CONCURRENCY,
            lookup_enabled: true,
            unit_weights: UnitWeights::default(),
            heuristics: NutritionHeuristicsConfig::default(),
        }
    }
}

/// Category cache settings
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Entry lifetime
    pub ttl_secs: u64,
    /// Keys kept before LRU eviction
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: cache::RECIPE_TTL_SECS,
            max_entries: cache::RECIPE_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Entry lifetime as a duration
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Recipe generator settings
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Inference API token; the model tier is skipped when absent
    pub huggingface_api_key: Option<String>,
    /// Inference API base URL
    pub huggingface_base_url: String,
    /// Primary model id
    pub model: String,
    /// Fallback model id
    pub fallback_model: String,
    /// Budget for the whole model tier
    pub timeout_secs: u64,
    /// Recipes generated per search
    pub search_results: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            huggingface_api_key: None,
            huggingface_base_url: DEFAULT_HUGGINGFACE_BASE_URL.to_owned(),
            model: DEFAULT_HUGGINGFACE_MODEL.to_owned(),
            fallback_model: DEFAULT_HUGGINGFACE_FALLBACK_MODEL.to_owned(),
            timeout_secs: timeouts::GENERATION_SECS,
            search_results: limits::SEARCH_RESULT_COUNT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http: HttpConfig {
                port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())?
                    .parse()
                    .context("Invalid HTTP_PORT value")?,
                client_timeout_secs: env_var_or("HTTP_CLIENT_TIMEOUT_SECS", "30")?
                    .parse()
                    .context("Invalid HTTP_CLIENT_TIMEOUT_SECS value")?,
                client_connect_timeout_secs: env_var_or("HTTP_CLIENT_CONNECT_TIMEOUT_SECS", "10")?
                    .parse()
                    .context("Invalid HTTP_CLIENT_CONNECT_TIMEOUT_SECS value")?,
            },

            providers: ProviderConfig {
                order: parse_list(&env_var_or("RECIPE_PROVIDER_ORDER", DEFAULT_PROVIDER_ORDER)?),
                spoonacular_api_key: optional_env("SPOONACULAR_API_KEY"),
                spoonacular_base_url: env_var_or(
                    "SPOONACULAR_BASE_URL",
                    spoonacular::DEFAULT_BASE_URL,
                )?,
                themealdb_base_url: env_var_or("THEMEALDB_BASE_URL", themealdb::DEFAULT_BASE_URL)?,
                call_timeout_secs: env_var_or(
                    "RECIPE_PROVIDER_TIMEOUT_SECS",
                    &timeouts::PROVIDER_CALL_SECS.to_string(),
                )?
                .parse()
                .context("Invalid RECIPE_PROVIDER_TIMEOUT_SECS value")?,
            },

            usda: UsdaClientConfig {
                api_key: env_var_or("USDA_API_KEY", DEFAULT_USDA_API_KEY)?,
                base_url: env_var_or("USDA_BASE_URL", DEFAULT_USDA_BASE_URL)?,
                timeout_secs: env_var_or(
                    "USDA_TIMEOUT_SECS",
                    &timeouts::NUTRIENT_LOOKUP_SECS.to_string(),
                )?
                .parse()
                .context("Invalid USDA_TIMEOUT_SECS value")?,
            },

            nutrition: NutritionConfig {
                lookup_concurrency: env_var_or(
                    "NUTRITION_LOOKUP_CONCURRENCY",
                    &limits::NUTRITION_LOOKUP_CONCURRENCY.to_string(),
                )?
                .parse()
                .context("Invalid NUTRITION_LOOKUP_CONCURRENCY value")?,
                lookup_enabled: env_var_or("NUTRITION_LOOKUP_ENABLED", "true")?
                    .parse()
                    .context("Invalid NUTRITION_LOOKUP_ENABLED value")?,
                unit_weights: json_env_or_default("NUTRITION_UNIT_WEIGHTS")?,
                heuristics: json_env_or_default("NUTRITION_HEURISTICS")?,
            },

            cache: CacheConfig {
                ttl_secs: env_var_or("RECIPE_CACHE_TTL_SECS", &cache::RECIPE_TTL_SECS.to_string())?
                    .parse()
                    .context("Invalid RECIPE_CACHE_TTL_SECS value")?,
                max_entries: env_var_or(
                    "RECIPE_CACHE_MAX_ENTRIES",
                    &cache::RECIPE_MAX_ENTRIES.to_string(),
                )?
                .parse()
                .context("Invalid RECIPE_CACHE_MAX_ENTRIES value")?,
            },

            generator: GeneratorConfig {
                huggingface_api_key: optional_env("HUGGINGFACE_API_KEY"),
                huggingface_base_url: env_var_or(
                    "HUGGINGFACE_BASE_URL",
                    DEFAULT_HUGGINGFACE_BASE_URL,
                )?,
                model: env_var_or("HUGGINGFACE_MODEL", DEFAULT_HUGGINGFACE_MODEL)?,
                fallback_model: env_var_or(
                    "HUGGINGFACE_FALLBACK_MODEL",
                    DEFAULT_HUGGINGFACE_FALLBACK_MODEL,
                )?,
                timeout_secs: env_var_or(
                    "GENERATION_TIMEOUT_SECS",
                    &timeouts::GENERATION_SECS.to_string(),
                )?
                .parse()
                .context("Invalid GENERATION_TIMEOUT_SECS value")?,
                search_results: env_var_or(
                    "SEARCH_RESULT_COUNT",
                    &limits::SEARCH_RESULT_COUNT.to_string(),
                )?
                .parse()
                .context("Invalid SEARCH_RESULT_COUNT value")?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error when a value would stall the pipeline
    pub fn validate(&self) -> Result<()> {
        if self.nutrition.lookup_concurrency == 0 {
            return Err(anyhow::anyhow!(
                "NUTRITION_LOOKUP_CONCURRENCY must be at least 1"
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(anyhow::anyhow!("RECIPE_CACHE_MAX_ENTRIES must be at least 1"));
        }
        if self.generator.search_results == 0 {
            return Err(anyhow::anyhow!("SEARCH_RESULT_COUNT must be at least 1"));
        }
        if self.providers.order.is_empty() {
            warn!("RECIPE_PROVIDER_ORDER is empty; category requests will always fail");
        }
        if self
            .providers
            .order
            .iter()
            .any(|name| name == spoonacular::NAME)
            && self.providers.spoonacular_api_key.is_none()
        {
            warn!("Spoonacular is listed in RECIPE_PROVIDER_ORDER but SPOONACULAR_API_KEY is not set");
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Mealvista Server Configuration:\n\
             - HTTP Port: {}\n\
             - Providers: {}\n\
             - Spoonacular: {}\n\
             - Cache TTL: {}s ({} entries)\n\
             - Nutrient lookup: {} (concurrency {})\n\
             - Text generation: {}",
            self.http.port,
            self.providers.order.join(" -> "),
            if self.providers.spoonacular_api_key.is_some() {
                "Configured"
            } else {
                "Not configured"
            },
            self.cache.ttl_secs,
            self.cache.max_entries,
            if self.nutrition.lookup_enabled {
                "Enabled"
            } else {
                "Disabled"
            },
            self.nutrition.lookup_concurrency,
            if self.generator.huggingface_api_key.is_some() {
                "Configured"
            } else {
                "Templates only"
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_owned()))
}

/// Non-blank environment variable
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Deserialize a JSON environment variable, or the type's default when unset
fn json_env_or_default<T: DeserializeOwned + Default>(key: &str) -> Result<T> {
    optional_env(key).map_or_else(
        || Ok(T::default()),
        |raw| serde_json::from_str(&raw).with_context(|| format!("Invalid {key} value")),
    )
}

/// Parse a comma-separated list, lowercased
fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
