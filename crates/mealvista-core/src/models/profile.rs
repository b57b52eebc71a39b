// ABOUTME: Read-only user health profile consumed by the personalization path
// ABOUTME: HealthGoal and BmiCategory parsing plus the per-meal CalorieTarget window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// BMI assumed for anonymous requests
pub const DEFAULT_BMI: f64 = 22.0;

/// User's stated health goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthGoal {
    /// Lose weight
    WeightLoss,
    /// Gain weight
    WeightGain,
    /// Keep current weight
    #[default]
    Maintenance,
}

impl HealthGoal {
    /// Human-readable label used in prompts
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WeightLoss => "Weight Loss",
            Self::WeightGain => "Weight Gain",
            Self::Maintenance => "Weight Maintenance",
        }
    }
}

/// BMI classification bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// BMI 18.5 to 25
    Normal,
    /// BMI 25 to 30
    Overweight,
    /// BMI 30 and above
    Obese,
}

impl BmiCategory {
    /// Parse a category label (case-insensitive); unknown labels yield `None`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "underweight" => Some(Self::Underweight),
            "normal" | "normal weight" => Some(Self::Normal),
            "overweight" => Some(Self::Overweight),
            "obese" | "obesity" => Some(Self::Obese),
            _ => None,
        }
    }

    /// Classify a numeric BMI
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Option<Self> {
        if !bmi.is_finite() || bmi <= 0.0 {
            return None;
        }
        Some(if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        })
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

/// Dietary profile supplied by the auth subsystem; never mutated by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHealthProfile {
    /// Diet labels such as `vegetarian`, `vegan`, `keto`, `high-protein`
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    /// Allergen substrings to exclude
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Body mass index
    #[serde(default)]
    pub bmi: Option<f64>,
    /// BMI category label
    #[serde(default)]
    pub bmi_category: Option<String>,
    /// Health goal
    #[serde(default)]
    pub health_goal: Option<HealthGoal>,
}

impl Default for UserHealthProfile {
    /// Anonymous profile used when no user is resolved
    fn default() -> Self {
        Self {
            dietary_preferences: Vec::new(),
            allergens: Vec::new(),
            bmi: Some(DEFAULT_BMI),
            bmi_category: Some(BmiCategory::Normal.label().to_owned()),
            health_goal: Some(HealthGoal::Maintenance),
        }
    }
}

impl UserHealthProfile {
    /// Case-insensitive check for a dietary preference
    #[must_use]
    pub fn has_preference(&self, preference: &str) -> bool {
        self.dietary_preferences
            .iter()
            .any(|p| p.trim().eq_ignore_ascii_case(preference))
    }

    /// Whether meat must be excluded
    #[must_use]
    pub fn is_vegetarian(&self) -> bool {
        self.has_preference("vegetarian") || self.is_vegan()
    }

    /// Whether animal products must be excluded or substituted
    #[must_use]
    pub fn is_vegan(&self) -> bool {
        self.has_preference("vegan")
    }

    /// Category from the label, falling back to the numeric BMI
    #[must_use]
    pub fn effective_bmi_category(&self) -> Option<BmiCategory> {
        self.bmi_category
            .as_deref()
            .and_then(BmiCategory::from_label)
            .or_else(|| self.bmi.and_then(BmiCategory::from_bmi))
    }

    /// Health goal, defaulting to maintenance
    #[must_use]
    pub fn goal(&self) -> HealthGoal {
        self.health_goal.unwrap_or_default()
    }

    /// Allergens with blank entries removed, lowercased
    #[must_use]
    pub fn normalized_allergens(&self) -> Vec<String> {
        self.allergens
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect()
    }
}

/// Per-serving calorie window derived from a health profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieTarget {
    /// Lower bound (kcal)
    pub min: u32,
    /// Upper bound (kcal)
    pub max: u32,
}

impl CalorieTarget {
    /// Midpoint of the window
    #[must_use]
    pub const fn midpoint(self) -> u32 {
        (self.min + self.max) / 2
    }
}
