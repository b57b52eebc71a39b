// ABOUTME: Pipeline constants for timeouts, result limits, and cache lifetimes
// ABOUTME: Shared defaults consumed by configuration, adapters, and the generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Outbound call timeouts
pub mod timeouts {
    /// Authoritative nutrient lookup timeout
    pub const NUTRIENT_LOOKUP_SECS: u64 = 3;

    /// Generative text endpoint timeout (whole model tier)
    pub const GENERATION_SECS: u64 = 20;

    /// Fallback generative model timeout
    pub const GENERATION_FALLBACK_SECS: u64 = 15;

    /// Recipe search call timeout for metadata providers
    pub const PROVIDER_SEARCH_SECS: u64 = 10;

    /// Meal filter/search call timeout for `TheMealDB`
    pub const MEALDB_QUERY_SECS: u64 = 8;

    /// Per-recipe detail lookup timeout
    pub const PROVIDER_DETAIL_SECS: u64 = 5;

    /// Image lookup timeout for generated recipes
    pub const IMAGE_LOOKUP_SECS: u64 = 3;

    /// Budget for one provider's whole `fetch_by_category` call
    pub const PROVIDER_CALL_SECS: u64 = 45;
}

/// Result-size limits
pub mod limits {
    /// Recipes returned per category request
    pub const CATEGORY_TARGET: usize = 8;

    /// Meals taken from an area filter
    pub const AREA_FILTER_TAKE: usize = 15;

    /// Meals taken from a category filter
    pub const CATEGORY_FILTER_TAKE: usize = 10;

    /// Cuisine search terms tried per request
    pub const SEARCH_TERMS_TRIED: usize = 6;

    /// Ingredient slots in a `TheMealDB` meal record
    pub const MEALDB_INGREDIENT_SLOTS: usize = 20;

    /// Max items kept from a parsed model section
    pub const MODEL_SECTION_ITEMS: usize = 15;

    /// Minimum raw model output length considered usable
    pub const MODEL_OUTPUT_MIN_CHARS: usize = 50;

    /// Minimum query length for free-text search
    pub const SEARCH_QUERY_MIN_CHARS: usize = 2;

    /// Recipes generated per free-text search
    pub const SEARCH_RESULT_COUNT: usize = 3;

    /// Concurrent nutrient lookups per recipe
    pub const NUTRITION_LOOKUP_CONCURRENCY: usize = 4;

    /// Concurrent provider detail lookups per request
    pub const DETAIL_LOOKUP_CONCURRENCY: usize = 4;
}

/// Recipe cache defaults
pub mod cache {
    /// Category cache lifetime (1 hour)
    pub const RECIPE_TTL_SECS: u64 = 3_600;

    /// Maximum cached keys before LRU eviction
    pub const RECIPE_MAX_ENTRIES: usize = 256;
}

/// Defaults applied to canonical recipes
pub mod recipe_defaults {
    /// Rating used when a source supplies none
    pub const RATING: f64 = 4.5;

    /// Servings used when a source supplies none
    pub const SERVINGS: u32 = 2;

    /// Ready-in minutes assumed when a source supplies none
    pub const READY_IN_MINUTES: u32 = 30;
}

/// Provenance labels reported in response envelopes
pub mod sources {
    /// Result served from the recipe cache
    pub const CACHE: &str = "cache";

    /// Result produced by the recipe generator
    pub const AI_GENERATED: &str = "ai-generated";
}

/// Service identity used by logging
pub mod service_names {
    /// Server binary/service name
    pub const MEALVISTA_SERVER: &str = "mealvista-server";
}
