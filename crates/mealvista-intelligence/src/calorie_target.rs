// ABOUTME: Maps a user health profile to a per-meal calorie window
// ABOUTME: Pure and deterministic; recomputed on every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mealvista_core::models::{BmiCategory, CalorieTarget, HealthGoal, UserHealthProfile};

/// Per-meal calories when the BMI category is unknown
const DEFAULT_BASE_CALORIES: i32 = 500;

/// Window floor
const MIN_CALORIES: i32 = 200;

/// Window ceiling
const MAX_CALORIES: i32 = 800;

/// Window extends this far below the base
const WINDOW_BELOW: i32 = 100;

/// Window extends this far above the base
const WINDOW_ABOVE: i32 = 150;

/// Base per-meal calories for a BMI category
#[must_use]
pub const fn base_calories(category: Option<BmiCategory>) -> i32 {
    match category {
        Some(BmiCategory::Underweight) => 600,
        Some(BmiCategory::Overweight) => 400,
        Some(BmiCategory::Obese) => 350,
        Some(BmiCategory::Normal) | None => DEFAULT_BASE_CALORIES,
    }
}

/// Shift applied for a health goal
#[must_use]
pub const fn goal_shift(goal: HealthGoal) -> i32 {
    match goal {
        HealthGoal::WeightLoss => -100,
        HealthGoal::WeightGain => 150,
        HealthGoal::Maintenance => 0,
    }
}

/// Calorie window for a profile
///
/// The category comes from `bmiCategory`, or from the numeric BMI when the
/// label is missing or unrecognized.
#[must_use]
pub fn target(profile: &UserHealthProfile) -> CalorieTarget {
    let base = base_calories(profile.effective_bmi_category()) + goal_shift(profile.goal());
    let min = (base - WINDOW_BELOW).max(MIN_CALORIES);
    let max = (base + WINDOW_ABOVE).min(MAX_CALORIES);
    CalorieTarget {
        min: min.unsigned_abs(),
        max: max.unsigned_abs(),
    }
}
