// ABOUTME: Service Provider Interface implemented by every recipe adapter
// ABOUTME: The orchestrator and generator only ever see providers through this trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Provider SPI
//!
//! Adapters normalize their payloads into `RawRecipe` before returning.
//! Nutrition may be left at zero; the server's aggregator fills it in.
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use mealvista_core::errors::ProviderError;
//! use mealvista_core::models::RawRecipe;
//! use mealvista_providers::RecipeProvider;
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl RecipeProvider for EmptyProvider {
//!     fn name(&self) -> &'static str {
//!         "empty"
//!     }
//!
//!     async fn fetch_by_category(&self, cuisine: &str) -> Result<Vec<RawRecipe>, ProviderError> {
//!         Err(ProviderError::no_results(self.name(), cuisine))
//!     }
//!
//!     async fn fetch_by_query(&self, query: &str) -> Result<Vec<RawRecipe>, ProviderError> {
//!         Err(ProviderError::no_results(self.name(), query))
//!     }
//! }
//! ```

use async_trait::async_trait;
use mealvista_core::errors::ProviderError;
use mealvista_core::models::RawRecipe;

/// External recipe source
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Stable provider name, also used as the response `source` label
    fn name(&self) -> &'static str;

    /// Recipes for a cuisine category
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the cuisine is unsupported, the provider
    /// fails, or nothing usable comes back.
    async fn fetch_by_category(&self, cuisine: &str) -> Result<Vec<RawRecipe>, ProviderError>;

    /// Recipes matching a free-text query
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the provider fails or finds nothing.
    async fn fetch_by_query(&self, query: &str) -> Result<Vec<RawRecipe>, ProviderError>;
}
