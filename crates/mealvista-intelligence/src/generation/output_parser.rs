// ABOUTME: Extracts name, ingredients, and instructions from free-form model text
// ABOUTME: Locates labeled sections by regex and rejects output with an empty section
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{capitalize, DraftRecipe};
use mealvista_core::constants::limits::{MODEL_OUTPUT_MIN_CHARS, MODEL_SECTION_ITEMS};
use mealvista_core::errors::PipelineError;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const TIER: &str = "model";

/// Shortest ingredient line kept
const MIN_INGREDIENT_CHARS: usize = 3;

/// Instruction lines must be longer than this
const MIN_INSTRUCTION_CHARS: usize = 10;

/// Longest name accepted from model output
const MAX_NAME_CHARS: usize = 80;

static NAME_LABEL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)recipe(?:\s+name)?\s*:\s*([^\n]+?)\s*(?:\n|ingredients|\z)").ok()
});

static NAME_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(.+?)\s+recipe\b").ok());

static INGREDIENTS_SECTION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?is)(?:^|\n)[\s#*]*ingredients?[:\s*]+(.*?)(?:\n\s*\n|\n[\s#*]*(?:instructions?|method|steps?|directions)\b|\z)",
    )
    .ok()
});

static INSTRUCTIONS_SECTION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?is)(?:^|\n)[\s#*]*(?:instructions?|method|steps?|directions)[:\s*]+(.*)\z")
        .ok()
});

static BULLET: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:[-•*]+|\d+[.)])\s*").ok());

/// Parse model output into a draft recipe
///
/// # Errors
///
/// Returns `PipelineError::GenerationUnusable` when the text is too short or
/// either the ingredients or the instructions section yields no usable lines.
pub fn parse_model_output(text: &str, query: &str) -> Result<DraftRecipe, PipelineError> {
    let text = text.trim();
    if text.chars().count() <= MODEL_OUTPUT_MIN_CHARS {
        return Err(unusable(format!(
            "output too short ({} chars)",
            text.chars().count()
        )));
    }

    let ingredients = section_lines(&INGREDIENTS_SECTION, text, MIN_INGREDIENT_CHARS - 1);
    if ingredients.is_empty() {
        return Err(unusable("no ingredients section"));
    }

    let instructions = section_lines(&INSTRUCTIONS_SECTION, text, MIN_INSTRUCTION_CHARS);
    if instructions.is_empty() {
        return Err(unusable("no instructions section"));
    }

    let name = extract_name(text).unwrap_or_else(|| capitalize(query));
    debug!(
        name = %name,
        ingredients = ingredients.len(),
        instructions = instructions.len(),
        "parsed model output"
    );

    Ok(DraftRecipe {
        name,
        ingredients,
        instructions,
    })
}

fn unusable(reason: impl Into<String>) -> PipelineError {
    PipelineError::GenerationUnusable {
        tier: TIER,
        reason: reason.into(),
    }
}

/// Cleaned lines of a section, each longer than `min_exclusive` chars
fn section_lines(
    pattern: &LazyLock<Option<Regex>>,
    text: &str,
    min_exclusive: usize,
) -> Vec<String> {
    let Some(body) = pattern
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
    else {
        return Vec::new();
    };

    body.as_str()
        .lines()
        .map(clean_line)
        .filter(|line| line.chars().count() > min_exclusive)
        .take(MODEL_SECTION_ITEMS)
        .collect()
}

fn clean_line(line: &str) -> String {
    let line = line.trim();
    let stripped = BULLET
        .as_ref()
        .map_or_else(|| line.to_owned(), |re| re.replace(line, "").into_owned());
    stripped.trim().to_owned()
}

fn extract_name(text: &str) -> Option<String> {
    let labelled = NAME_LABEL
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned());

    let suffixed = || {
        let first_line = text.lines().next()?;
        NAME_SUFFIX
            .as_ref()
            .and_then(|re| re.captures(first_line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned())
    };

    labelled
        .or_else(suffixed)
        .map(|name| {
            name.trim_matches(|c: char| c == '"' || c == '*' || c == '#' || c.is_whitespace())
                .to_owned()
        })
        .filter(|name| !name.is_empty() && name.chars().count() <= MAX_NAME_CHARS)
}
