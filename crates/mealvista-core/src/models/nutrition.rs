// ABOUTME: Nutrition figures for recipes and per-100g ingredient estimates
// ABOUTME: NutritionProfile holds rounded non-negative totals; PerHundredGram holds raw estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// The nine tracked nutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Nutrient {
    /// Energy (kcal)
    Calories,
    /// Protein (g)
    Protein,
    /// Carbohydrates (g)
    Carbs,
    /// Total fat (g)
    Fat,
    /// Dietary fiber (g)
    Fiber,
    /// Calcium (mg)
    Calcium,
    /// Iron (mg)
    Iron,
    /// Vitamin A
    VitaminA,
    /// Vitamin C (mg)
    VitaminC,
}

impl Nutrient {
    /// Every nutrient, in canonical field order
    pub const ALL: [Self; 9] = [
        Self::Calories,
        Self::Protein,
        Self::Carbs,
        Self::Fat,
        Self::Fiber,
        Self::Calcium,
        Self::Iron,
        Self::VitaminA,
        Self::VitaminC,
    ];

    /// Position in [`Nutrient::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Estimated nutrition per 100 g of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerHundredGram {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Total fat (g)
    pub fat: f64,
    /// Dietary fiber (g)
    pub fiber: f64,
    /// Calcium (mg)
    pub calcium: f64,
    /// Iron (mg)
    pub iron: f64,
    /// Vitamin A
    pub vitamin_a: f64,
    /// Vitamin C (mg)
    pub vitamin_c: f64,
}

impl PerHundredGram {
    /// Build from values listed in [`Nutrient::ALL`] order
    #[must_use]
    pub const fn from_array(values: [f64; 9]) -> Self {
        Self {
            calories: values[0],
            protein: values[1],
            carbs: values[2],
            fat: values[3],
            fiber: values[4],
            calcium: values[5],
            iron: values[6],
            vitamin_a: values[7],
            vitamin_c: values[8],
        }
    }

    /// Values in [`Nutrient::ALL`] order
    #[must_use]
    pub const fn to_array(&self) -> [f64; 9] {
        [
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
            self.fiber,
            self.calcium,
            self.iron,
            self.vitamin_a,
            self.vitamin_c,
        ]
    }

    /// Read one nutrient
    #[must_use]
    pub const fn get(&self, nutrient: Nutrient) -> f64 {
        self.to_array()[nutrient.index()]
    }

    /// Overwrite one nutrient
    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        let mut values = self.to_array();
        values[nutrient.index()] = value;
        *self = Self::from_array(values);
    }
}

/// Recipe nutrition as produced by the pipeline (never per 100 g)
///
/// Fields are unsigned, so the non-negative invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionProfile {
    /// Energy (kcal)
    pub calories: u32,
    /// Protein (g)
    pub protein: u32,
    /// Carbohydrates (g)
    pub carbs: u32,
    /// Total fat (g)
    pub fat: u32,
    /// Dietary fiber (g)
    pub fiber: u32,
    /// Calcium (mg)
    pub calcium: u32,
    /// Iron (mg)
    pub iron: u32,
    /// Vitamin A
    pub vitamin_a: u32,
    /// Vitamin C (mg)
    pub vitamin_c: u32,
}

impl NutritionProfile {
    /// Clamp to ≥ 0 and round each value, in [`Nutrient::ALL`] order
    #[must_use]
    pub fn from_totals(totals: [f64; 9]) -> Self {
        let [calories, protein, carbs, fat, fiber, calcium, iron, vitamin_a, vitamin_c] =
            totals.map(round_non_negative);
        Self {
            calories,
            protein,
            carbs,
            fat,
            fiber,
            calcium,
            iron,
            vitamin_a,
            vitamin_c,
        }
    }

    /// True when no nutrient has been filled in
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn round_non_negative(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.round().min(f64::from(u32::MAX)) as u32
    }
}
