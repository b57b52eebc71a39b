// ABOUTME: Core types and constants for the Mealvista recipe pipeline
// ABOUTME: Foundation crate with error handling, canonical recipe models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealvista Core
//!
//! Foundation crate providing shared types and constants for the recipe
//! aggregation and nutrition pipeline. Every other workspace crate depends on
//! it, so it is kept free of I/O.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, `ProviderError`, and the pipeline taxonomy
//! - **models**: canonical `RawRecipe`, nutrition, ingredient, and health profile types
//! - **constants**: timeouts, limits, and cache defaults

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Pipeline-wide constants organized by domain
pub mod constants;

/// Canonical data models shared by every pipeline stage
pub mod models;
