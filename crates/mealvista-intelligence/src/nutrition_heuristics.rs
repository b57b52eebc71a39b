// ABOUTME: Food-group classification of ingredient names with representative nutrition
// ABOUTME: Fallback tier used when the authoritative nutrient lookup is unavailable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Category Heuristics
//!
//! Ingredient names are classified by substring membership in keyword sets,
//! checked in a fixed order (the first matching group wins). Each group maps
//! to one representative per-100g profile. Values are configurable defaults
//! and known approximations.

use mealvista_core::models::PerHundredGram;
use serde::{Deserialize, Serialize};

/// Food groups used for heuristic estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodGroup {
    /// Meat, fish, poultry
    Protein,
    /// Vegetables and aromatics
    Vegetable,
    /// Grains and starches
    Grain,
    /// Fats and oils
    Fat,
    /// Dairy
    Dairy,
    /// Spices and seasonings
    Spice,
    /// Anything else
    Other,
}

/// One food group with its keywords and representative values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodGroupProfile {
    /// Group
    pub group: FoodGroup,
    /// Lowercase name substrings
    pub keywords: Vec<String>,
    /// Representative nutrition per 100 g
    pub per_100g: PerHundredGram,
}

impl FoodGroupProfile {
    fn new(group: FoodGroup, keywords: &[&str], values: [f64; 9]) -> Self {
        Self {
            group,
            keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
            per_100g: PerHundredGram::from_array(values),
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| name.contains(k.as_str()))
    }
}

/// Ordered food-group table plus the generic default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NutritionHeuristicsConfig {
    /// Groups in priority order
    pub groups: Vec<FoodGroupProfile>,
    /// Low-impact values for unclassified ingredients
    pub default_per_100g: PerHundredGram,
}

impl Default for NutritionHeuristicsConfig {
    // Columns: calories, protein, carbs, fat, fiber, calcium, iron, vitamin A, vitamin C
    fn default() -> Self {
        Self {
            groups: vec![
                FoodGroupProfile::new(
                    FoodGroup::Protein,
                    &[
                        "chicken", "meat", "beef", "fish", "lamb", "mutton", "pork", "turkey",
                        "salmon", "tuna", "prawn", "shrimp",
                    ],
                    [165.0, 26.0, 0.0, 7.0, 0.0, 11.0, 1.0, 6.0, 0.0],
                ),
                FoodGroupProfile::new(
                    FoodGroup::Vegetable,
                    &[
                        "tomato", "onion", "garlic", "pepper", "carrot", "spinach", "greens",
                        "vegetable", "cabbage", "peas",
                    ],
                    [18.0, 1.0, 4.0, 0.0, 1.0, 10.0, 0.0, 42.0, 13.0],
                ),
                FoodGroupProfile::new(
                    FoodGroup::Grain,
                    &[
                        "rice", "wheat", "flour", "bread", "pasta", "noodle", "spaghetti", "oat",
                        "potato",
                    ],
                    [130.0, 3.0, 28.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0],
                ),
                FoodGroupProfile::new(
                    FoodGroup::Fat,
                    &["oil", "butter", "ghee", "lard", "peanut"],
                    [120.0, 0.0, 0.0, 14.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
                FoodGroupProfile::new(
                    FoodGroup::Dairy,
                    &["milk", "cheese", "cream", "yogurt", "paneer"],
                    [61.0, 3.0, 5.0, 3.0, 0.0, 113.0, 0.0, 28.0, 0.0],
                ),
                FoodGroupProfile::new(
                    FoodGroup::Spice,
                    &[
                        "spice", "salt", "cumin", "turmeric", "masala", "paprika", "cinnamon",
                        "oregano", "thyme", "rosemary",
                    ],
                    [3.0, 0.0, 1.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0],
                ),
            ],
            default_per_100g: PerHundredGram::from_array([
                25.0, 1.0, 5.0, 0.0, 1.0, 25.0, 0.0, 50.0, 10.0,
            ]),
        }
    }
}

impl NutritionHeuristicsConfig {
    /// Classify an ingredient name
    #[must_use]
    pub fn classify(&self, name: &str) -> FoodGroup {
        let name = name.to_lowercase();
        self.groups
            .iter()
            .find(|profile| profile.matches(&name))
            .map_or(FoodGroup::Other, |profile| profile.group)
    }

    /// Representative per-100g values for an ingredient name
    #[must_use]
    pub fn estimate(&self, name: &str) -> PerHundredGram {
        let name = name.to_lowercase();
        self.groups
            .iter()
            .find(|profile| profile.matches(&name))
            .map_or(self.default_per_100g, |profile| profile.per_100g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_order() {
        let config = NutritionHeuristicsConfig::default();
        assert_eq!(config.classify("Chicken Breast"), FoodGroup::Protein);
        assert_eq!(config.classify("black pepper"), FoodGroup::Vegetable);
        assert_eq!(config.classify("basmati rice"), FoodGroup::Grain);
        assert_eq!(config.classify("olive oil"), FoodGroup::Fat);
        assert_eq!(config.classify("parmesan cheese"), FoodGroup::Dairy);
        assert_eq!(config.classify("sea salt"), FoodGroup::Spice);
        assert_eq!(config.classify("water"), FoodGroup::Other);
    }

    #[test]
    fn test_override_from_json() {
        let config: NutritionHeuristicsConfig = serde_json::from_str(
            r#"{"groups": [{"group": "grain", "keywords": ["quinoa"], "per100g": {
                "calories": 120.0, "protein": 4.4, "carbs": 21.3, "fat": 1.9, "fiber": 2.8,
                "calcium": 17.0, "iron": 1.5, "vitaminA": 0.0, "vitaminC": 0.0}}]}"#,
        )
        .unwrap();

        assert_eq!(config.classify("red quinoa"), FoodGroup::Grain);
        assert_eq!(config.classify("chicken"), FoodGroup::Other);
        assert_eq!(
            config.default_per_100g,
            NutritionHeuristicsConfig::default().default_per_100g
        );
    }

    #[test]
    fn test_peanut_and_peach_are_not_peas() {
        let config = NutritionHeuristicsConfig::default();
        assert_eq!(config.classify("peanut butter"), FoodGroup::Fat);
        assert_eq!(config.classify("roasted peanuts"), FoodGroup::Fat);
        assert_eq!(config.classify("peach"), FoodGroup::Other);
        assert_eq!(config.classify("frozen peas"), FoodGroup::Vegetable);
    }

    #[test]
    fn test_default_values_for_unknown() {
        let config = NutritionHeuristicsConfig::default();
        let estimate = config.estimate("lemon");
        assert!((estimate.calories - 25.0).abs() < f64::EPSILON);
        assert!((estimate.vitamin_a - 50.0).abs() < f64::EPSILON);
    }
}
