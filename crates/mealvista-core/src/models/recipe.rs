// ABOUTME: Canonical recipe record returned by every pipeline path
// ABOUTME: Defines RawRecipe, instruction steps, difficulty, and provenance labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrition::NutritionProfile;
use super::profile::CalorieTarget;
use crate::constants::sources;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Recipe difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Few steps
    Easy,
    /// Moderate
    Medium,
    /// Many steps or long cook time
    Hard,
}

impl Difficulty {
    /// Classify a synthesized recipe by instruction count
    #[must_use]
    pub const fn from_step_count(steps: usize) -> Self {
        if steps < 5 {
            Self::Easy
        } else if steps < 10 {
            Self::Medium
        } else {
            Self::Hard
        }
    }
}

/// One instruction step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    /// 1-based step number
    pub id: u32,
    /// Step text
    pub text: String,
    /// Optional duration, e.g. "10 minutes"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Optional cook's note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl InstructionStep {
    /// Number a list of step texts from 1
    #[must_use]
    pub fn numbered<I, S>(texts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .zip(1u32..)
            .map(|(text, id)| Self {
                id,
                text: text.into(),
                time: None,
                note: None,
            })
            .collect()
    }
}

/// Personalization context attached to generated recipes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationSummary {
    /// Calorie window the recipe was sized against
    pub calorie_target: CalorieTarget,
    /// BMI category label used in the prompt
    pub bmi_category: String,
    /// Health goal label used in the prompt
    pub health_goal: String,
    /// Dietary preferences honored
    pub dietary_preferences: Vec<String>,
    /// Allergens excluded
    pub allergens_excluded: Vec<String>,
}

/// Canonical recipe shape every path normalizes into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipe {
    /// Stable identifier (`recipe-<id>`, `spoon-<id>`, `ai-<uuid>`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Image URL
    pub image: String,
    /// Servings produced
    pub servings: u32,
    /// Preparation time in minutes
    pub prep_time_min: u32,
    /// Cooking time in minutes
    pub cook_time_min: u32,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Rating, 0 to 5
    pub rating: f64,
    /// Nutrition as produced
    pub nutrition: NutritionProfile,
    /// Raw ingredient lines, never rewritten after normalization
    pub ingredients: Vec<String>,
    /// Ordered instruction steps
    pub instructions: Vec<InstructionStep>,
    /// Detected allergens
    pub allergens: Vec<String>,
    /// Diet labels (`omnivore`, `vegetarian`, `vegan`, ...)
    pub diet_types: Vec<String>,
    /// True for recipes produced by the generator
    #[serde(rename = "isAIGenerated")]
    pub is_ai_generated: bool,
    /// Personalization context for generated recipes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalized_for: Option<PersonalizationSummary>,
}

/// Where a batch of recipes came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeSource {
    /// Served from the recipe cache
    Cache,
    /// Fetched from the named provider
    Provider(String),
    /// Produced by the recipe generator
    AiGenerated,
}

impl RecipeSource {
    /// Label reported in response envelopes
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cache => sources::CACHE,
            Self::Provider(name) => name,
            Self::AiGenerated => sources::AI_GENERATED,
        }
    }
}

impl fmt::Display for RecipeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecipeSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_step_count() {
        assert_eq!(Difficulty::from_step_count(0), Difficulty::Easy);
        assert_eq!(Difficulty::from_step_count(4), Difficulty::Easy);
        assert_eq!(Difficulty::from_step_count(5), Difficulty::Medium);
        assert_eq!(Difficulty::from_step_count(9), Difficulty::Medium);
        assert_eq!(Difficulty::from_step_count(10), Difficulty::Hard);
    }

    #[test]
    fn test_numbered_steps_start_at_one() {
        let steps = InstructionStep::numbered(["Boil water", "Add pasta"]);
        assert_eq!(steps[0].id, 1);
        assert_eq!(steps[1].id, 2);
        assert_eq!(steps[1].text, "Add pasta");
    }

    #[test]
    fn test_source_serializes_as_label() {
        let json = serde_json::to_string(&RecipeSource::Provider("themealdb".into())).unwrap();
        assert_eq!(json, "\"themealdb\"");
        assert_eq!(RecipeSource::Cache.to_string(), "cache");
    }
}
