// ABOUTME: Recipe intelligence: ingredient parsing, nutrition heuristics, personalization rules
// ABOUTME: I/O-free algorithms shared by the aggregation and generation paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealvista Intelligence
//!
//! Deterministic building blocks of the recipe pipeline. Nothing in this crate
//! performs I/O; the server crate wires these functions to providers, the
//! nutrient lookup, and the text generator.

/// Ingredient line parser producing `(quantity, unit, name)` triples
pub mod ingredient_parser;

/// Unit and per-item gram weight table
pub mod unit_weights;

/// Food-group classification and representative per-100g values
pub mod nutrition_heuristics;

/// Per-meal calorie window from a health profile
pub mod calorie_target;

/// Allergen and diet-type exclusion and substitution
pub mod constraint_filter;

/// Shared keyword vocabularies (meat, dairy, eggs)
pub mod keywords;

/// Allergen detection and diet-type labelling of ingredient lists
pub mod recipe_traits;

/// Generation templates and model-output parsing
pub mod generation;

pub use calorie_target::target as calorie_target;
pub use constraint_filter::filter as filter_ingredients;
pub use ingredient_parser::{parse as parse_ingredient, try_parse as try_parse_ingredient};
pub use nutrition_heuristics::{FoodGroup, NutritionHeuristicsConfig};
pub use unit_weights::UnitWeights;
