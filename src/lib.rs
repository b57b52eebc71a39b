// ABOUTME: Main library entry point for the Mealvista recipe server
// ABOUTME: Aggregates provider recipes, computes nutrition, and synthesizes personalized recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealvista Server
//!
//! Recipe aggregation and nutrition pipeline behind a small HTTP API.
//!
//! ## Features
//!
//! - **Category recipes**: cache-first fallback across external recipe providers
//! - **Nutrition**: per-ingredient lookup with a heuristic fallback, summed per recipe
//! - **Search**: personalized recipe synthesis honoring diet and allergen constraints
//!
//! ## Architecture
//!
//! - **orchestrator**: cache check and provider fallback chain for categories
//! - **nutrition**: estimator and aggregator over ingredient lines
//! - **generator**: three-tier recipe synthesis for free-text search
//! - **routes**: axum handlers and response envelopes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealvista_server::config::ServerConfig;
//! use mealvista_server::resources::ServerResources;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! let resources = Arc::new(ServerResources::from_config(&config));
//! let app = mealvista_server::routes::router(resources);
//! # Ok(())
//! # }
//! ```

/// Category recipe cache
pub mod cache;

/// Environment configuration
pub mod config;

/// External API clients
pub mod external;

/// Personalized recipe synthesis
pub mod generator;

/// Text generation providers and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Nutrition estimation and aggregation
pub mod nutrition;

/// Category provider fallback chain
pub mod orchestrator;

/// Request credential to health profile resolution
pub mod profiles;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

pub use mealvista_core::errors;
pub use mealvista_core::models;
