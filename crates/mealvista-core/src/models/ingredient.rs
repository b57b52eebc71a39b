// ABOUTME: Structured ingredient triple produced by the ingredient line parser
// ABOUTME: Defines the fixed unit vocabulary and its token spellings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Units recognized in ingredient lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientUnit {
    /// US cup
    #[serde(rename = "cup")]
    Cup,
    /// Tablespoon
    #[serde(rename = "tbsp")]
    Tablespoon,
    /// Teaspoon
    #[serde(rename = "tsp")]
    Teaspoon,
    /// Gram
    #[serde(rename = "g")]
    Gram,
    /// Kilogram
    #[serde(rename = "kg")]
    Kilogram,
    /// Ounce (weight)
    #[serde(rename = "oz")]
    Ounce,
    /// Pound
    #[serde(rename = "lb")]
    Pound,
    /// Milliliter
    #[serde(rename = "ml")]
    Milliliter,
    /// Liter
    #[serde(rename = "l")]
    Liter,
    /// Pinch
    #[serde(rename = "pinch")]
    Pinch,
    /// Dash
    #[serde(rename = "dash")]
    Dash,
    /// Slice
    #[serde(rename = "slice")]
    Slice,
    /// Garlic clove and similar
    #[serde(rename = "clove")]
    Clove,
    /// Whole piece
    #[serde(rename = "piece")]
    Piece,
}

impl IngredientUnit {
    /// Resolve a unit token (case-insensitive; plural and spelled-out forms accepted)
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "cup" | "cups" => Some(Self::Cup),
            "tbsp" | "tbsps" | "tbs" | "tablespoon" | "tablespoons" => Some(Self::Tablespoon),
            "tsp" | "tsps" | "teaspoon" | "teaspoons" => Some(Self::Teaspoon),
            "g" | "gram" | "grams" => Some(Self::Gram),
            "kg" | "kilogram" | "kilograms" => Some(Self::Kilogram),
            "oz" | "ounce" | "ounces" => Some(Self::Ounce),
            "lb" | "lbs" | "pound" | "pounds" => Some(Self::Pound),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Some(Self::Milliliter)
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Some(Self::Liter),
            "pinch" | "pinches" => Some(Self::Pinch),
            "dash" | "dashes" => Some(Self::Dash),
            "slice" | "slices" => Some(Self::Slice),
            "clove" | "cloves" => Some(Self::Clove),
            "piece" | "pieces" => Some(Self::Piece),
            _ => None,
        }
    }

    /// Canonical short token
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cup => "cup",
            Self::Tablespoon => "tbsp",
            Self::Teaspoon => "tsp",
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Ounce => "oz",
            Self::Pound => "lb",
            Self::Milliliter => "ml",
            Self::Liter => "l",
            Self::Pinch => "pinch",
            Self::Dash => "dash",
            Self::Slice => "slice",
            Self::Clove => "clove",
            Self::Piece => "piece",
        }
    }
}

/// Structured `(quantity, unit, name)` triple derived from one ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Leading quantity (1 when the line had none)
    pub quantity: f64,
    /// Recognized unit, if any
    pub unit: Option<IngredientUnit>,
    /// Lowercased ingredient name
    pub name: String,
}

impl ParsedIngredient {
    /// Default triple for a line without a leading quantity
    #[must_use]
    pub fn unquantified(line: &str) -> Self {
        Self {
            quantity: 1.0,
            unit: None,
            name: line.trim().to_lowercase(),
        }
    }
}
