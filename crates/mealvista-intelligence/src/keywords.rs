// ABOUTME: Keyword vocabularies for meat, dairy, eggs, and non-dairy look-alikes
// ABOUTME: Single definition shared by the constraint filter and recipe trait detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use regex::Regex;
use std::sync::LazyLock;

/// Substrings that mark an ingredient as meat or fish
pub const MEAT: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "mutton", "fish", "meat", "bacon", "turkey", "sausage",
    "salmon", "tuna", "shrimp", "prawn", "anchov",
];

/// Dairy words paired with their vegan substitutes
pub const DAIRY_SUBSTITUTES: &[(&str, &str)] = &[
    ("milk", "almond milk"),
    ("cheese", "vegan cheese"),
    ("butter", "vegan butter"),
    ("cream", "coconut cream"),
    ("yogurt", "coconut yogurt"),
];

/// Phrases that contain a dairy word but are not dairy
pub const NON_DAIRY_PHRASES: &[&str] = &[
    "almond milk",
    "oat milk",
    "soy milk",
    "rice milk",
    "coconut milk",
    "coconut cream",
    "coconut yogurt",
    "peanut butter",
    "almond butter",
    "cocoa butter",
    "cream of tartar",
    "butternut",
    "butterhead",
    "butterfl",
    "creamy",
];

/// Dairy occurrences: the `dairy` group is set for any word containing a dairy
/// keyword ("milk", "buttermilk", "milkshake"); the other branch consumes
/// non-dairy look-alikes and anything already marked "vegan"
pub static DAIRY_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let look_alikes = NON_DAIRY_PHRASES
        .iter()
        .map(|phrase| regex::escape(phrase))
        .collect::<Vec<_>>()
        .join("|");
    let dairy = DAIRY_SUBSTITUTES
        .iter()
        .map(|(word, _)| *word)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)\b(?:vegan\s+\w+|{look_alikes})|(?P<dairy>\w*(?:{dairy})\w*)"
    ))
    .ok()
});

/// Whole-word egg terms (not "eggplant")
pub static EGG_WORD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\beggs?\b").ok());

/// Whether a lowercased line contains a meat keyword
#[must_use]
pub fn contains_meat(lower: &str) -> bool {
    MEAT.iter().any(|k| lower.contains(k))
}

/// Whether a line contains dairy outside any non-dairy look-alike
#[must_use]
pub fn contains_dairy(line: &str) -> bool {
    DAIRY_TOKEN.as_ref().is_some_and(|re| {
        re.captures_iter(line)
            .any(|caps| caps.name("dairy").is_some())
    })
}

/// Whether a lowercased line contains eggs
#[must_use]
pub fn contains_egg(lower: &str) -> bool {
    EGG_WORD.as_ref().is_some_and(|re| re.is_match(lower))
}
