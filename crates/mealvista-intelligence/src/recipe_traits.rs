// ABOUTME: Derives allergen labels and diet types from a recipe's ingredient lines
// ABOUTME: Best-effort substring heuristics shared by provider adapters and the generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::keywords;
use regex::Regex;
use std::sync::LazyLock;

/// Allergen label with its trigger substrings
struct AllergenRule {
    label: &'static str,
    triggers: &'static [&'static str],
}

const ALLERGEN_RULES: &[AllergenRule] = &[
    AllergenRule {
        label: "gluten",
        triggers: &["wheat", "flour", "bread", "pasta", "noodle", "spaghetti", "barley"],
    },
    AllergenRule {
        label: "peanuts",
        triggers: &["peanut"],
    },
    AllergenRule {
        label: "nuts",
        triggers: &["almond", "cashew", "walnut", "pecan", "pistachio", "hazelnut"],
    },
    AllergenRule {
        label: "soy",
        triggers: &["soy", "tofu", "tempeh", "edamame"],
    },
    AllergenRule {
        label: "fish",
        triggers: &["fish", "salmon", "tuna", "cod", "anchov"],
    },
    AllergenRule {
        label: "shellfish",
        triggers: &["shrimp", "prawn", "crab", "lobster"],
    },
];

/// Bare "nut"/"nuts" as a word (not coconut, nutmeg)
static NUT_WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)\bnuts?\b").ok());

/// Allergen labels present in an ingredient list, in a stable order
#[must_use]
pub fn detect_allergens(ingredients: &[String]) -> Vec<String> {
    let lowered: Vec<String> = ingredients.iter().map(|i| i.to_lowercase()).collect();
    let mut found = Vec::new();

    if lowered.iter().any(|l| keywords::contains_dairy(l)) {
        found.push("dairy".to_owned());
    }
    if lowered.iter().any(|l| keywords::contains_egg(l)) {
        found.push("eggs".to_owned());
    }
    for rule in ALLERGEN_RULES {
        if lowered
            .iter()
            .any(|l| rule.triggers.iter().any(|t| l.contains(t)))
        {
            found.push(rule.label.to_owned());
        }
    }
    if !found.iter().any(|label| label == "nuts")
        && lowered
            .iter()
            .any(|l| NUT_WORD.as_ref().is_some_and(|re| re.is_match(l)))
    {
        found.push("nuts".to_owned());
    }
    found
}

/// Diet labels for an ingredient list, followed by any extra user preferences
#[must_use]
pub fn diet_types(ingredients: &[String], preferences: &[String]) -> Vec<String> {
    let lowered: Vec<String> = ingredients.iter().map(|i| i.to_lowercase()).collect();
    let has_meat = lowered.iter().any(|l| keywords::contains_meat(l));
    let has_animal_product = lowered
        .iter()
        .any(|l| keywords::contains_dairy(l) || keywords::contains_egg(l) || l.contains("honey"));

    let mut types: Vec<String> = if has_meat {
        vec!["omnivore".to_owned()]
    } else if has_animal_product {
        vec!["vegetarian".to_owned()]
    } else {
        vec!["vegan".to_owned(), "vegetarian".to_owned()]
    };

    for preference in preferences {
        let preference = preference.trim().to_lowercase();
        if !preference.is_empty() && !types.contains(&preference) {
            types.push(preference);
        }
    }
    types
}
