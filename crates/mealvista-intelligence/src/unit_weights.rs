// ABOUTME: Converts parsed ingredient quantities to estimated gram weights
// ABOUTME: Fixed unit-to-gram table plus per-item weights for bare counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gram Weight Estimation
//!
//! Every value here is a hand-picked approximation, not reference data.
//! Volumes are treated as water-dense (1 ml ≈ 1 g). The table deserializes
//! from partial JSON: any field left out keeps its default.

use mealvista_core::models::{IngredientUnit, ParsedIngredient};
use serde::{Deserialize, Serialize};

/// Volume conversion constants (to grams, water density)
const GRAMS_PER_CUP: f64 = 240.0;
const GRAMS_PER_TBSP: f64 = 15.0;
const GRAMS_PER_TSP: f64 = 5.0;

/// Weight conversion constants (to grams)
const GRAMS_PER_OZ: f64 = 28.35;
const GRAMS_PER_LB: f64 = 453.59;
const GRAMS_PER_KG: f64 = 1000.0;

/// Per-item weight keyed by a name substring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemWeight {
    /// Substring matched against the ingredient name
    pub keyword: String,
    /// Grams per item
    pub grams: f64,
}

impl ItemWeight {
    fn new(keyword: &str, grams: f64) -> Self {
        Self {
            keyword: keyword.to_owned(),
            grams,
        }
    }
}

/// Unit and per-item gram weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitWeights {
    /// Grams per cup
    pub cup: f64,
    /// Grams per tablespoon
    pub tablespoon: f64,
    /// Grams per teaspoon
    pub teaspoon: f64,
    /// Grams per ounce
    pub ounce: f64,
    /// Grams per pound
    pub pound: f64,
    /// Grams per kilogram
    pub kilogram: f64,
    /// Grams per milliliter
    pub milliliter: f64,
    /// Grams per liter
    pub liter: f64,
    /// Grams per pinch
    pub pinch: f64,
    /// Grams per dash
    pub dash: f64,
    /// Grams per slice
    pub slice: f64,
    /// Grams per clove
    pub clove: f64,
    /// Per-item weights for bare counts, first match wins
    pub items: Vec<ItemWeight>,
    /// Grams for a counted item matching no keyword
    pub default_item: f64,
}

impl Default for UnitWeights {
    fn default() -> Self {
        Self {
            cup: GRAMS_PER_CUP,
            tablespoon: GRAMS_PER_TBSP,
            teaspoon: GRAMS_PER_TSP,
            ounce: GRAMS_PER_OZ,
            pound: GRAMS_PER_LB,
            kilogram: GRAMS_PER_KG,
            milliliter: 1.0,
            liter: 1000.0,
            pinch: 0.36,
            dash: 0.6,
            slice: 30.0,
            clove: 3.0,
            items: vec![
                ItemWeight::new("garlic", 3.0),
                ItemWeight::new("clove", 3.0),
                ItemWeight::new("egg", 50.0),
                ItemWeight::new("onion", 150.0),
                ItemWeight::new("tomato", 150.0),
                ItemWeight::new("potato", 200.0),
            ],
            default_item: 100.0,
        }
    }
}

impl UnitWeights {
    /// Estimated grams for a parsed ingredient
    #[must_use]
    pub fn grams_for(&self, ingredient: &ParsedIngredient) -> f64 {
        let per_unit = match ingredient.unit {
            Some(IngredientUnit::Cup) => self.cup,
            Some(IngredientUnit::Tablespoon) => self.tablespoon,
            Some(IngredientUnit::Teaspoon) => self.teaspoon,
            Some(IngredientUnit::Gram) => 1.0,
            Some(IngredientUnit::Kilogram) => self.kilogram,
            Some(IngredientUnit::Ounce) => self.ounce,
            Some(IngredientUnit::Pound) => self.pound,
            Some(IngredientUnit::Milliliter) => self.milliliter,
            Some(IngredientUnit::Liter) => self.liter,
            Some(IngredientUnit::Pinch) => self.pinch,
            Some(IngredientUnit::Dash) => self.dash,
            Some(IngredientUnit::Slice) => self.slice,
            Some(IngredientUnit::Clove) => self.clove,
            Some(IngredientUnit::Piece) | None => self.item_weight(&ingredient.name),
        };
        (ingredient.quantity * per_unit).max(0.0)
    }

    /// Grams per counted item of the named ingredient
    #[must_use]
    pub fn item_weight(&self, name: &str) -> f64 {
        let name = name.to_lowercase();
        self.items
            .iter()
            .find(|item| name.contains(&item.keyword))
            .map_or(self.default_item, |item| item.grams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_parser::parse;

    fn grams(line: &str) -> f64 {
        UnitWeights::default().grams_for(&parse(line))
    }

    #[test]
    fn test_unit_table() {
        assert!((grams("2 cups rice") - 480.0).abs() < 1e-9);
        assert!((grams("1 tbsp olive oil") - 15.0).abs() < 1e-9);
        assert!((grams("500g chicken") - 500.0).abs() < 1e-9);
        assert!((grams("1 lb beef") - 453.59).abs() < 1e-9);
        assert!((grams("2 l water") - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_bare_counts_use_item_weights() {
        assert!((grams("4 large eggs") - 200.0).abs() < 1e-9);
        assert!((grams("1 onion, diced") - 150.0).abs() < 1e-9);
        assert!((grams("2 potatoes") - 400.0).abs() < 1e-9);
        assert!((grams("1 lemon, halved") - 100.0).abs() < 1e-9);
        assert!((grams("2 cloves garlic, minced") - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let weights: UnitWeights = serde_json::from_str(
            r#"{"cup": 250.0, "items": [{"keyword": "lemon", "grams": 60.0}]}"#,
        )
        .unwrap();

        assert!((weights.grams_for(&parse("2 cups rice")) - 500.0).abs() < 1e-9);
        assert!((weights.grams_for(&parse("1 tbsp oil")) - 15.0).abs() < 1e-9);
        assert!((weights.grams_for(&parse("1 lemon")) - 60.0).abs() < 1e-9);
        assert!((weights.grams_for(&parse("1 onion")) - 100.0).abs() < 1e-9);
    }
}
