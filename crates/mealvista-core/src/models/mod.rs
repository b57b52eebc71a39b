// ABOUTME: Canonical data models shared by every pipeline stage
// ABOUTME: Re-exports recipe, nutrition, ingredient, and health profile types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Parsed ingredient lines and the unit vocabulary
pub mod ingredient;

/// Recipe-level and per-100g nutrition figures
pub mod nutrition;

/// User health profile and calorie windows
pub mod profile;

/// Canonical recipe record and provenance labels
pub mod recipe;

pub use ingredient::{IngredientUnit, ParsedIngredient};
pub use nutrition::{Nutrient, NutritionProfile, PerHundredGram};
pub use profile::{BmiCategory, CalorieTarget, HealthGoal, UserHealthProfile};
pub use recipe::{Difficulty, InstructionStep, PersonalizationSummary, RawRecipe, RecipeSource};
