// ABOUTME: Building blocks for synthesized recipes: drafts, templates, and model-output parsing
// ABOUTME: Shared by all three generator tiers before filtering and nutrition aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Parses free-form model text into a draft recipe
pub mod output_parser;

/// Knowledge-base templates and the minimal generic template
pub mod templates;

pub use output_parser::parse_model_output;
pub use templates::{match_template, minimal_template, RecipeTemplate, KNOWLEDGE_BASE};

use crate::constraint_filter;
use mealvista_core::models::{HealthGoal, UserHealthProfile};

/// Fallback ingredients used when filtering leaves a draft empty
pub const SAFE_STAPLES: &[&str] = &[
    "1 cup cooked rice",
    "200g mixed vegetables",
    "1 cup red lentils",
    "2 tbsp olive oil",
    "1 tsp salt",
    "1 bunch fresh herbs",
    "2 cups water",
];

/// Staples appended when a filtered draft has no ingredients left
const STAPLES_TAKEN: usize = 3;

/// Unfiltered recipe produced by one generator tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRecipe {
    /// Recipe name before personalization
    pub name: String,
    /// Ingredient lines
    pub ingredients: Vec<String>,
    /// Instruction texts in order
    pub instructions: Vec<String>,
}

impl DraftRecipe {
    /// Apply the constraint filter, refilling from safe staples if nothing survives
    ///
    /// Staples pass through the same filter, so allergen safety holds even when
    /// a pathological allergen list leaves the result empty.
    #[must_use]
    pub fn constrained(mut self, profile: &UserHealthProfile) -> Self {
        self.ingredients = constraint_filter::filter(&self.ingredients, profile);
        if self.ingredients.is_empty() {
            let staples: Vec<String> = SAFE_STAPLES.iter().map(|s| (*s).to_owned()).collect();
            self.ingredients = constraint_filter::filter(&staples, profile)
                .into_iter()
                .take(STAPLES_TAKEN)
                .collect();
        }
        self
    }
}

/// Prefix a recipe name with goal and diet qualifiers
#[must_use]
pub fn personalize_name(base: &str, profile: &UserHealthProfile) -> String {
    let mut name = match profile.health_goal {
        Some(HealthGoal::WeightLoss) => format!("Light {base}"),
        Some(HealthGoal::WeightGain) => format!("Nutritious {base}"),
        Some(HealthGoal::Maintenance) | None => base.to_owned(),
    };
    if profile.has_preference("keto") {
        name = format!("Keto {name}");
    } else if profile.has_preference("high-protein") {
        name = format!("High-Protein {name}");
    }
    name
}

/// Uppercase the first character of a query
#[must_use]
pub fn capitalize(text: &str) -> String {
    let text = text.trim();
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
