// ABOUTME: Nutrition estimation and recipe-level aggregation
// ABOUTME: Wires the authoritative lookup and heuristic tiers to ingredient lines

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Recipe-level aggregation with bounded concurrency
pub mod aggregator;

/// Per-ingredient two-tier estimation
pub mod estimator;

pub use aggregator::NutritionAggregator;
pub use estimator::{Estimate, EstimateSource, NutritionEstimator};
