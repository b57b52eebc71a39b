// ABOUTME: Removes or substitutes ingredients that violate allergens or diet type
// ABOUTME: Single source of truth for what may appear in a recipe for a given user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constraint Filter
//!
//! Steps, in order:
//!
//! 1. vegan: words containing a dairy keyword are replaced in place by vegan
//!    equivalents, eggs dropped
//! 2. vegetarian or vegan: lines with a meat keyword are dropped
//! 3. lines containing any allergen (case-insensitive substring) are dropped
//!
//! Allergens are checked last so a substitute can never reintroduce one
//! (an `almond` allergy removes "almond milk" produced in step 1). Matching is
//! substring based and deliberately fuzzy; the guarantee is only that no
//! exact allergen substring survives.

use crate::keywords::{self, DAIRY_SUBSTITUTES, DAIRY_TOKEN};
use mealvista_core::models::UserHealthProfile;
use regex::Captures;

/// Apply the profile's constraints to an ingredient list
#[must_use]
pub fn filter(ingredients: &[String], profile: &UserHealthProfile) -> Vec<String> {
    let allergens = profile.normalized_allergens();
    let vegan = profile.is_vegan();
    let vegetarian = profile.is_vegetarian();

    ingredients
        .iter()
        .filter_map(|line| {
            let line = if vegan {
                let lower = line.to_lowercase();
                if keywords::contains_egg(&lower) {
                    return None;
                }
                substitute_dairy(line)
            } else {
                line.clone()
            };

            let lower = line.to_lowercase();
            if vegetarian && keywords::contains_meat(&lower) {
                return None;
            }
            if contains_allergen(&lower, &allergens) {
                return None;
            }
            Some(line)
        })
        .collect()
}

/// Whether a lowercased line contains any of the (lowercased) allergens
#[must_use]
pub fn contains_allergen(lower: &str, allergens: &[String]) -> bool {
    allergens.iter().any(|a| lower.contains(a.as_str()))
}

/// Replace dairy words with vegan equivalents, leaving non-dairy phrases alone
///
/// A bare keyword takes its named substitute ("milk" becomes "almond milk");
/// a compound such as "buttermilk" is marked "vegan buttermilk" in place.
#[must_use]
pub fn substitute_dairy(line: &str) -> String {
    let Some(pattern) = DAIRY_TOKEN.as_ref() else {
        return line.to_owned();
    };
    pattern
        .replace_all(line, |caps: &Captures<'_>| {
            let Some(token) = caps.name("dairy") else {
                return caps[0].to_owned();
            };
            let word = token.as_str().to_lowercase();
            DAIRY_SUBSTITUTES
                .iter()
                .find(|(dairy, _)| *dairy == word)
                .map_or_else(
                    || format!("vegan {}", token.as_str()),
                    |(_, vegan)| (*vegan).to_owned(),
                )
        })
        .into_owned()
}
