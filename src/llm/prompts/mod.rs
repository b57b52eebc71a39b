// ABOUTME: Recipe generation prompt loaded at compile time and filled per request
// ABOUTME: Renders the query, calorie window, BMI category, goal, and dietary requirements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompt text lives in markdown next to this module so wording changes do
//! not touch code.

use mealvista_core::models::{BmiCategory, CalorieTarget, UserHealthProfile};

/// Recipe generation prompt template
pub const RECIPE_PROMPT_TEMPLATE: &str = include_str!("recipe_prompt.md");

/// Preferences echoed into the prompt, with their prompt wording
const PROMPT_PREFERENCES: &[(&str, &str)] = &[
    ("vegetarian", "vegetarian"),
    ("vegan", "vegan"),
    ("keto", "keto (low carb, high fat)"),
    ("low-carb", "low-carb"),
    ("high-protein", "high-protein"),
];

/// Dietary requirement phrases for a profile, in a fixed order
#[must_use]
pub fn dietary_requirements(profile: &UserHealthProfile) -> Vec<String> {
    let mut requirements: Vec<String> = PROMPT_PREFERENCES
        .iter()
        .filter(|(preference, _)| profile.has_preference(preference))
        .map(|(_, wording)| (*wording).to_owned())
        .collect();

    let allergens = profile.normalized_allergens();
    if !allergens.is_empty() {
        requirements.push(format!("allergen-free: no {}", allergens.join(", ")));
    }
    requirements
}

/// Render the recipe prompt for a query and profile
#[must_use]
pub fn recipe_prompt(query: &str, target: CalorieTarget, profile: &UserHealthProfile) -> String {
    let bmi_category = profile
        .effective_bmi_category()
        .unwrap_or(BmiCategory::Normal)
        .label();
    let requirements = dietary_requirements(profile);
    let requirements_line = if requirements.is_empty() {
        String::new()
    } else {
        format!("- Dietary requirements: {}\n", requirements.join(", "))
    };

    RECIPE_PROMPT_TEMPLATE
        .replace("{query}", query.trim())
        .replace("{calorie_min}", &target.min.to_string())
        .replace("{calorie_max}", &target.max.to_string())
        .replace("{bmi_category}", bmi_category)
        .replace("{health_goal}", profile.goal().label())
        .replace("{dietary_requirements}", &requirements_line)
}
