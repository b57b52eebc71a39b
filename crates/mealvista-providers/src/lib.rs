// ABOUTME: Recipe provider adapters for TheMealDB and Spoonacular
// ABOUTME: Provider trait, shared HTTP client, and per-cuisine query mappings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! Recipe provider implementations and core abstractions.
//!
//! Each adapter knows how to query one external source and normalize its
//! payloads into the canonical `RawRecipe`. Adapters never fabricate
//! instructions and never fail a whole call because one sub-item failed.

/// Cuisine to provider query mappings
pub mod cuisines;
/// Shared HTTP client for provider API calls
pub mod http_client;
/// Provider trait implemented by every adapter
pub mod spi;
/// Spoonacular complex-search adapter
pub mod spoonacular;
/// TheMealDB adapter with a prioritized sub-strategy chain
pub mod themealdb;

pub use cuisines::{CuisineMapping, SUPPORTED_CUISINES};
pub use http_client::{initialize_shared_client, shared_client};
pub use mealvista_core::errors::ProviderError;
pub use spi::RecipeProvider;
pub use spoonacular::SpoonacularProvider;
pub use themealdb::TheMealDbProvider;
