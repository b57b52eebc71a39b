// ABOUTME: Parses free-text ingredient lines such as "2 cups rice" or "500g chicken"
// ABOUTME: Single regex pass; total over all inputs with a lowercased-name fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ingredient Line Parser
//!
//! A line is split into a leading quantity, an optional unit from a fixed
//! vocabulary, and the remaining name. Quantities may be integers, decimals,
//! simple fractions (`1/2`), or mixed numbers (`1 1/2`).
//!
//! ```
//! use mealvista_core::models::IngredientUnit;
//! use mealvista_intelligence::ingredient_parser::parse;
//!
//! let parsed = parse("1/2 tsp cinnamon");
//! assert!((parsed.quantity - 0.5).abs() < f64::EPSILON);
//! assert_eq!(parsed.unit, Some(IngredientUnit::Teaspoon));
//! assert_eq!(parsed.name, "cinnamon");
//! ```

use mealvista_core::errors::PipelineError;
use mealvista_core::models::{IngredientUnit, ParsedIngredient};
use regex::Regex;
use std::sync::LazyLock;

/// Leading quantity, optional unit token (ending on a word boundary), remainder
static LINE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<qty>\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?|\.\d+)\s*(?:(?P<unit>cups?|tbsp|tsp|kg|g|oz|ml|l|pinch|dash|slices?|cloves?|pieces?|lbs?|pounds?)\b)?\s*(?P<name>.*)$",
    )
    .ok()
});

/// Parse a line, absorbing ambiguity into the `{1, None, line}` default
///
/// Never panics and never fails; repeated calls on the same line always
/// produce the same triple.
#[must_use]
pub fn parse(line: &str) -> ParsedIngredient {
    try_parse(line).unwrap_or_else(|_| ParsedIngredient::unquantified(line))
}

/// Parse a line, reporting lines without a usable leading quantity
///
/// # Errors
///
/// Returns `PipelineError::ParseAmbiguous` when the line has no leading
/// numeric token or the token does not evaluate to a finite quantity
/// (for example a zero denominator).
pub fn try_parse(line: &str) -> Result<ParsedIngredient, PipelineError> {
    let trimmed = line.trim();
    let ambiguous = || PipelineError::ParseAmbiguous {
        line: trimmed.to_owned(),
    };

    let captures = LINE_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.captures(trimmed))
        .ok_or_else(ambiguous)?;

    let quantity = captures
        .name("qty")
        .and_then(|m| evaluate_quantity(m.as_str()))
        .ok_or_else(ambiguous)?;

    let unit = captures
        .name("unit")
        .and_then(|m| IngredientUnit::from_token(m.as_str()));

    let name = captures
        .name("name")
        .map(|m| m.as_str().trim().to_lowercase())
        .unwrap_or_default();

    Ok(ParsedIngredient {
        quantity,
        unit,
        name,
    })
}

/// Evaluate `"2"`, `"2.5"`, `".5"`, `"3/4"`, or `"1 1/2"`
fn evaluate_quantity(token: &str) -> Option<f64> {
    let value = token
        .split_whitespace()
        .map(evaluate_simple)
        .try_fold(0.0, |total, part| part.map(|p| total + p))?;
    value.is_finite().then_some(value)
}

fn evaluate_simple(token: &str) -> Option<f64> {
    match token.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().ok()?;
            let denominator: f64 = denominator.parse().ok()?;
            if denominator.abs() < f64::EPSILON {
                None
            } else {
                Some(numerator / denominator)
            }
        }
        None => token.parse().ok(),
    }
}
