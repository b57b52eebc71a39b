// ABOUTME: Aggregates per-ingredient estimates into a recipe nutrition profile
// ABOUTME: Bounded concurrent lookups summed in fixed point so completion order is irrelevant

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Recipe nutrition aggregation
//!
//! Each ingredient line is parsed, converted to grams, estimated per 100 g,
//! and scaled. Contributions are accumulated as integer milli-units, so the
//! total is the same for any completion order and any permutation of the
//! input. The only nondeterminism left is the authoritative lookup itself,
//! whose answers (or timeouts) can differ between calls.

use super::estimator::NutritionEstimator;
use futures_util::stream::{self, StreamExt};
use mealvista_core::models::{Nutrient, NutritionProfile, ParsedIngredient, RawRecipe};
use mealvista_intelligence::{parse_ingredient, UnitWeights};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Fixed-point scale for accumulated contributions
const MILLI: f64 = 1000.0;

type Totals = [i64; Nutrient::ALL.len()];

/// Recipe-level nutrition calculator
#[derive(Clone)]
pub struct NutritionAggregator {
    estimator: NutritionEstimator,
    weights: Arc<UnitWeights>,
    concurrency: usize,
}

impl NutritionAggregator {
    /// Create an aggregator with default gram weights
    #[must_use]
    pub fn new(estimator: NutritionEstimator, concurrency: usize) -> Self {
        Self {
            estimator,
            weights: Arc::new(UnitWeights::default()),
            concurrency: concurrency.max(1),
        }
    }

    /// Replace the gram weight table
    #[must_use]
    pub fn with_weights(mut self, weights: UnitWeights) -> Self {
        self.weights = Arc::new(weights);
        self
    }

    /// Total nutrition for a list of raw ingredient lines
    pub async fn aggregate(&self, lines: &[String]) -> NutritionProfile {
        let started = Instant::now();
        let parsed: Vec<ParsedIngredient> = lines
            .iter()
            .map(|line| parse_ingredient(line))
            .filter(|ingredient| !ingredient.name.is_empty())
            .collect();
        let count = parsed.len();

        let mut contributions = stream::iter(parsed)
            .map(|ingredient| self.contribution(ingredient))
            .buffer_unordered(self.concurrency);

        let mut totals: Totals = [0; Nutrient::ALL.len()];
        while let Some(contribution) = contributions.next().await {
            for (total, value) in totals.iter_mut().zip(contribution) {
                *total = total.saturating_add(value);
            }
        }

        let profile = NutritionProfile::from_totals(totals.map(|milli| milli as f64 / MILLI));
        debug!(
            ingredients = count,
            calories = profile.calories,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "nutrition aggregated"
        );
        profile
    }

    /// Fill nutrition for a recipe whose provider left it empty
    pub async fn ensure_nutrition(&self, recipe: &mut RawRecipe) {
        if recipe.nutrition.is_empty() {
            recipe.nutrition = self.aggregate(&recipe.ingredients).await;
        }
    }

    /// Fill nutrition for every recipe in a batch
    pub async fn ensure_all(&self, recipes: &mut [RawRecipe]) {
        futures_util::future::join_all(
            recipes
                .iter_mut()
                .map(|recipe| self.ensure_nutrition(recipe)),
        )
        .await;
    }

    async fn contribution(&self, ingredient: ParsedIngredient) -> Totals {
        let grams = self.weights.grams_for(&ingredient);
        let estimate = self.estimator.estimate(&ingredient.name).await;
        let scale = grams / 100.0;
        estimate
            .per_100g
            .to_array()
            .map(|per_100g| to_milli(per_100g * scale))
    }
}

fn to_milli(value: f64) -> i64 {
    if value.is_finite() {
        (value * MILLI).round() as i64
    } else {
        0
    }
}
