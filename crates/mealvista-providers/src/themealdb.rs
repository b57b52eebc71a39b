// ABOUTME: TheMealDB adapter running area, category, and search-term queries concurrently
// ABOUTME: De-duplicates by meal id in priority order and details each meal with bounded concurrency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `TheMealDB` Adapter
//!
//! `fetch_by_category` runs the sub-strategies (area filter, category filter,
//! then each search term) concurrently through `FuturesOrdered`. Results are
//! consumed in priority order by a single loop, which owns the seen-id set,
//! so de-duplication needs no lock. Once the target count is reached the
//! remaining in-flight queries are dropped, which cancels them.
//!
//! Filter endpoints return summaries only; those meals are detailed through
//! `lookup.php`. A failed lookup drops that one meal.

use crate::cuisines::{self, CuisineMapping};
use crate::http_client::{get_json, shared_client};
use crate::spi::RecipeProvider;
use async_trait::async_trait;
use futures_util::stream::{self, FuturesOrdered, StreamExt};
use mealvista_core::constants::limits::{
    AREA_FILTER_TAKE, CATEGORY_FILTER_TAKE, CATEGORY_TARGET, DETAIL_LOOKUP_CONCURRENCY,
    MEALDB_INGREDIENT_SLOTS, SEARCH_TERMS_TRIED,
};
use mealvista_core::constants::recipe_defaults;
use mealvista_core::constants::timeouts::{MEALDB_QUERY_SECS, PROVIDER_DETAIL_SECS};
use mealvista_core::errors::ProviderError;
use mealvista_core::models::{Difficulty, InstructionStep, NutritionProfile, RawRecipe};
use mealvista_intelligence::recipe_traits::{detect_allergens, diet_types};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Provider name
pub const NAME: &str = "themealdb";

/// Public API base URL
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Instruction fragments must be longer than this
const MIN_STEP_CHARS: usize = 10;

static STEP_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:step\s*\d+[.):]?|\d+[.)])\s*").ok());

/// One meal as returned by `TheMealDB`; summaries carry only id, name, and thumbnail
#[derive(Debug, Clone, Deserialize)]
pub struct MealDbMeal {
    /// Provider-native id
    #[serde(rename = "idMeal")]
    pub id: String,
    /// Meal name
    #[serde(rename = "strMeal")]
    pub name: String,
    /// Thumbnail URL
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    /// Free-text instructions, absent on filter summaries
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    /// Numbered `strIngredientN` and `strMeasureN` slots
    #[serde(flatten)]
    pub slots: HashMap<String, Value>,
}

impl MealDbMeal {
    /// Whether this record already has the detail fields
    #[must_use]
    pub fn is_detailed(&self) -> bool {
        self.instructions
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    fn slot(&self, field: &str, index: usize) -> Option<&str> {
        self.slots
            .get(&format!("{field}{index}"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// `"measure ingredient"` lines from the numbered slots
    #[must_use]
    pub fn ingredient_lines(&self) -> Vec<String> {
        (1..=MEALDB_INGREDIENT_SLOTS)
            .filter_map(|index| {
                let ingredient = self.slot("strIngredient", index)?;
                Some(self.slot("strMeasure", index).map_or_else(
                    || ingredient.to_owned(),
                    |measure| format!("{measure} {ingredient}"),
                ))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct MealsEnvelope {
    #[serde(default)]
    meals: Option<Vec<MealDbMeal>>,
}

/// `TheMealDB` recipe provider
#[derive(Clone)]
pub struct TheMealDbProvider {
    client: Client,
    base_url: String,
    query_timeout: Duration,
    detail_timeout: Duration,
    target: usize,
}

impl TheMealDbProvider {
    /// Create an adapter against the given base URL using the shared client
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(shared_client().clone(), base_url)
    }

    /// Create an adapter with an explicit HTTP client
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            query_timeout: Duration::from_secs(MEALDB_QUERY_SECS),
            detail_timeout: Duration::from_secs(PROVIDER_DETAIL_SECS),
            target: CATEGORY_TARGET,
        }
    }

    /// Override the number of recipes collected per category
    #[must_use]
    pub const fn with_target(mut self, target: usize) -> Self {
        self.target = target;
        self
    }

    /// Run one filter or search query; failures yield an empty list
    async fn query(
        &self,
        endpoint: &'static str,
        key: &'static str,
        value: &str,
        take: usize,
    ) -> Vec<MealDbMeal> {
        let request = self
            .client
            .get(format!("{}/{endpoint}", self.base_url))
            .query(&[(key, value)]);

        match get_json::<MealsEnvelope>(NAME, request, self.query_timeout).await {
            Ok(envelope) => {
                let meals: Vec<MealDbMeal> =
                    envelope.meals.unwrap_or_default().into_iter().take(take).collect();
                debug!(endpoint, key, value, count = meals.len(), "themealdb query");
                meals
            }
            Err(e) => {
                warn!(endpoint, key, value, error = %e, "themealdb query failed");
                Vec::new()
            }
        }
    }

    /// Collect up to `target` unique meals from the sub-strategy chain
    async fn collect_meals(&self, mapping: &CuisineMapping) -> Vec<MealDbMeal> {
        let mut strategies = FuturesOrdered::new();
        if let Some(area) = mapping.area {
            strategies.push_back(self.query("filter.php", "a", area, AREA_FILTER_TAKE));
        }
        if let Some(category) = mapping.category {
            strategies.push_back(self.query("filter.php", "c", category, CATEGORY_FILTER_TAKE));
        }
        for term in mapping.search_terms.iter().take(SEARCH_TERMS_TRIED) {
            strategies.push_back(self.query("search.php", "s", term, usize::MAX));
        }

        let mut seen = HashSet::new();
        let mut meals = Vec::with_capacity(self.target);
        'strategies: while let Some(batch) = strategies.next().await {
            for meal in batch {
                if seen.insert(meal.id.clone()) {
                    meals.push(meal);
                    if meals.len() >= self.target {
                        break 'strategies;
                    }
                }
            }
        }
        meals
    }

    /// Full record for a meal id
    async fn lookup(&self, id: &str) -> Result<MealDbMeal, ProviderError> {
        let request = self
            .client
            .get(format!("{}/lookup.php", self.base_url))
            .query(&[("i", id)]);
        get_json::<MealsEnvelope>(NAME, request, self.detail_timeout)
            .await?
            .meals
            .and_then(|meals| meals.into_iter().next())
            .ok_or_else(|| ProviderError::no_results(NAME, id))
    }

    /// Detail and convert meals, preserving order and dropping failed lookups
    async fn detail_all(&self, meals: Vec<MealDbMeal>) -> Vec<RawRecipe> {
        stream::iter(meals)
            .map(|meal| async move {
                if meal.is_detailed() {
                    return Some(convert_meal(&meal));
                }
                match self.lookup(&meal.id).await {
                    Ok(detailed) => Some(convert_meal(&detailed)),
                    Err(e) => {
                        warn!(meal_id = %meal.id, error = %e, "themealdb detail lookup failed");
                        None
                    }
                }
            })
            .buffered(DETAIL_LOOKUP_CONCURRENCY)
            .filter_map(|recipe| async move { recipe })
            .collect()
            .await
    }
}

#[async_trait]
impl RecipeProvider for TheMealDbProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch_by_category(&self, cuisine: &str) -> Result<Vec<RawRecipe>, ProviderError> {
        let mapping =
            cuisines::lookup(cuisine).ok_or_else(|| ProviderError::unsupported_cuisine(NAME, cuisine))?;

        let meals = self.collect_meals(mapping).await;
        let recipes = self.detail_all(meals).await;
        if recipes.is_empty() {
            return Err(ProviderError::no_results(NAME, cuisine));
        }
        info!(cuisine = mapping.key, count = recipes.len(), "themealdb recipes fetched");
        Ok(recipes)
    }

    async fn fetch_by_query(&self, query: &str) -> Result<Vec<RawRecipe>, ProviderError> {
        let meals = self.query("search.php", "s", query, self.target).await;
        let recipes = self.detail_all(meals).await;
        if recipes.is_empty() {
            return Err(ProviderError::no_results(NAME, query));
        }
        Ok(recipes)
    }
}

/// Normalize a detailed meal into a `RawRecipe` with zero nutrition
#[must_use]
pub fn convert_meal(meal: &MealDbMeal) -> RawRecipe {
    let ingredients = meal.ingredient_lines();
    let steps = meal
        .instructions
        .as_deref()
        .map(split_instructions)
        .unwrap_or_default();
    let count = u32::try_from(steps.len()).unwrap_or(u32::MAX);

    RawRecipe {
        id: format!("recipe-{}", meal.id),
        name: meal.name.trim().to_owned(),
        image: meal.thumbnail.clone().unwrap_or_default(),
        servings: recipe_defaults::SERVINGS,
        prep_time_min: count.saturating_mul(2).clamp(5, 30),
        cook_time_min: count.saturating_mul(5).clamp(15, 90),
        difficulty: difficulty_for(steps.len()),
        rating: recipe_defaults::RATING,
        nutrition: NutritionProfile::default(),
        allergens: detect_allergens(&ingredients),
        diet_types: diet_types(&ingredients, &[]),
        instructions: InstructionStep::numbered(steps),
        ingredients,
        is_ai_generated: false,
        personalized_for: None,
    }
}

const fn difficulty_for(steps: usize) -> Difficulty {
    if steps > 8 {
        Difficulty::Hard
    } else if steps > 5 {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    }
}

/// Split free-text instructions into steps
///
/// Splits on line breaks and on sentence ends followed by a capital letter,
/// strips leading step numbers, and drops short fragments.
#[must_use]
pub fn split_instructions(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(split_sentences)
        .map(strip_step_number)
        .filter(|step| step.chars().count() > MIN_STEP_CHARS)
        .collect()
}

fn split_sentences(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (idx, ch) in line.char_indices() {
        if ch != '.' {
            continue;
        }
        let rest = &line[idx + 1..];
        let trimmed = rest.trim_start();
        if trimmed.len() < rest.len() && trimmed.chars().next().is_some_and(char::is_uppercase) {
            parts.push(&line[start..=idx]);
            start = idx + 1;
        }
    }
    parts.push(&line[start..]);
    parts
}

fn strip_step_number(step: &str) -> String {
    let step = step.trim();
    STEP_NUMBER
        .as_ref()
        .map_or_else(|| step.to_owned(), |re| re.replace(step, "").trim().to_owned())
}
