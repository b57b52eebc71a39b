// ABOUTME: Spoonacular complex-search adapter with nutrition and analyzed instructions
// ABOUTME: Falls back to the per-recipe information endpoint when steps are missing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cuisines;
use crate::http_client::{get_json, shared_client};
use crate::spi::RecipeProvider;
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use mealvista_core::constants::limits::{CATEGORY_TARGET, DETAIL_LOOKUP_CONCURRENCY};
use mealvista_core::constants::recipe_defaults;
use mealvista_core::constants::timeouts::{PROVIDER_DETAIL_SECS, PROVIDER_SEARCH_SECS};
use mealvista_core::errors::ProviderError;
use mealvista_core::models::{
    Difficulty, IngredientUnit, InstructionStep, Nutrient, NutritionProfile, RawRecipe,
};
use mealvista_intelligence::recipe_traits::detect_allergens;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Provider name
pub const NAME: &str = "spoonacular";

/// Public API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/recipes";

/// Spoonacular nutrient names mapped to canonical fields
const NUTRIENT_NAMES: &[(&str, Nutrient)] = &[
    ("Calories", Nutrient::Calories),
    ("Protein", Nutrient::Protein),
    ("Carbohydrates", Nutrient::Carbs),
    ("Fat", Nutrient::Fat),
    ("Fiber", Nutrient::Fiber),
    ("Calcium", Nutrient::Calcium),
    ("Iron", Nutrient::Iron),
    ("Vitamin A", Nutrient::VitaminA),
    ("Vitamin C", Nutrient::VitaminC),
];

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SpoonacularRecipe>,
}

/// Recipe as returned by `complexSearch` or `/{id}/information`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpoonacularRecipe {
    /// Provider-native id
    pub id: u64,
    /// Recipe title
    pub title: String,
    /// Image URL
    pub image: Option<String>,
    /// Servings
    pub servings: Option<u32>,
    /// Total time in minutes
    pub ready_in_minutes: Option<u32>,
    /// Score from 0 to 100
    pub spoonacular_score: Option<f64>,
    /// Vegetarian flag
    pub vegetarian: bool,
    /// Vegan flag
    pub vegan: bool,
    /// Ingredients with amounts
    pub extended_ingredients: Vec<SpoonacularIngredient>,
    /// Structured instruction groups
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
    /// Nutrition block when requested
    pub nutrition: Option<SpoonacularNutrition>,
}

/// One ingredient entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpoonacularIngredient {
    /// Amount in the recipe's own units
    pub amount: Option<f64>,
    /// Short unit label
    pub unit_short: Option<String>,
    /// Normalized ingredient name
    pub name: Option<String>,
    /// Name as written in the source recipe
    pub original_name: Option<String>,
    /// Unit-system conversions
    pub measures: Option<Measures>,
}

/// Unit-system conversions of an ingredient amount
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Measures {
    /// Metric measure
    pub metric: Option<Measure>,
}

/// A single measure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Measure {
    /// Amount
    pub amount: Option<f64>,
    /// Short unit label
    pub unit_short: Option<String>,
}

/// Instruction group
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzedInstruction {
    /// Ordered steps
    pub steps: Vec<InstructionStepPayload>,
}

/// Step inside an instruction group
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstructionStepPayload {
    /// Step text
    pub step: String,
    /// Optional duration
    pub length: Option<StepLength>,
}

/// Step duration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StepLength {
    /// Quantity
    pub number: u32,
    /// Unit label, usually "minutes"
    pub unit: String,
}

/// Nutrition block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpoonacularNutrition {
    /// Named nutrient amounts
    pub nutrients: Vec<SpoonacularNutrient>,
}

/// Named nutrient amount
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpoonacularNutrient {
    /// Nutrient name
    pub name: String,
    /// Amount in the nutrient's unit
    pub amount: f64,
}

/// Spoonacular recipe provider; requires an API key
#[derive(Clone)]
pub struct SpoonacularProvider {
    client: Client,
    base_url: String,
    api_key: String,
    search_timeout: Duration,
    detail_timeout: Duration,
}

impl SpoonacularProvider {
    /// Create an adapter using the shared client
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(shared_client().clone(), base_url, api_key)
    }

    /// Create an adapter with an explicit HTTP client
    #[must_use]
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            search_timeout: Duration::from_secs(PROVIDER_SEARCH_SECS),
            detail_timeout: Duration::from_secs(PROVIDER_DETAIL_SECS),
        }
    }

    async fn search(&self, params: &[(&str, &str)]) -> Result<Vec<SpoonacularRecipe>, ProviderError> {
        let number = CATEGORY_TARGET.to_string();
        let request = self
            .client
            .get(format!("{}/complexSearch", self.base_url))
            .query(params)
            .query(&[
                ("number", number.as_str()),
                ("addRecipeInformation", "true"),
                ("fillIngredients", "true"),
                ("addRecipeNutrition", "true"),
                ("apiKey", self.api_key.as_str()),
            ]);
        let response: SearchResponse = get_json(NAME, request, self.search_timeout).await?;
        Ok(response.results)
    }

    /// Analyzed steps from the information endpoint
    async fn fetch_steps(&self, id: u64) -> Result<Vec<AnalyzedInstruction>, ProviderError> {
        let request = self
            .client
            .get(format!("{}/{id}/information", self.base_url))
            .query(&[("includeNutrition", "false"), ("apiKey", self.api_key.as_str())]);
        let detail: SpoonacularRecipe = get_json(NAME, request, self.detail_timeout).await?;
        Ok(detail.analyzed_instructions)
    }

    /// Fill missing instructions and convert, preserving order
    async fn convert_all(&self, results: Vec<SpoonacularRecipe>) -> Vec<RawRecipe> {
        stream::iter(results)
            .map(|mut recipe| async move {
                if !has_steps(&recipe) {
                    match self.fetch_steps(recipe.id).await {
                        Ok(steps) => recipe.analyzed_instructions = steps,
                        Err(e) => {
                            warn!(recipe_id = recipe.id, error = %e, "spoonacular detail lookup failed");
                        }
                    }
                }
                convert_recipe(&recipe)
            })
            .buffered(DETAIL_LOOKUP_CONCURRENCY)
            .collect()
            .await
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch_by_category(&self, cuisine: &str) -> Result<Vec<RawRecipe>, ProviderError> {
        let mapping =
            cuisines::lookup(cuisine).ok_or_else(|| ProviderError::unsupported_cuisine(NAME, cuisine))?;
        let results = self.search(&[("cuisine", mapping.spoonacular)]).await?;
        debug!(cuisine = mapping.key, count = results.len(), "spoonacular search");
        if results.is_empty() {
            return Err(ProviderError::no_results(NAME, cuisine));
        }
        let recipes = self.convert_all(results).await;
        info!(cuisine = mapping.key, count = recipes.len(), "spoonacular recipes fetched");
        Ok(recipes)
    }

    async fn fetch_by_query(&self, query: &str) -> Result<Vec<RawRecipe>, ProviderError> {
        let results = self.search(&[("query", query)]).await?;
        if results.is_empty() {
            return Err(ProviderError::no_results(NAME, query));
        }
        Ok(self.convert_all(results).await)
    }
}

fn has_steps(recipe: &SpoonacularRecipe) -> bool {
    recipe
        .analyzed_instructions
        .first()
        .is_some_and(|group| !group.steps.is_empty())
}

/// Normalize a Spoonacular recipe into a `RawRecipe`
#[must_use]
pub fn convert_recipe(recipe: &SpoonacularRecipe) -> RawRecipe {
    let ingredients: Vec<String> = recipe
        .extended_ingredients
        .iter()
        .map(ingredient_line)
        .filter(|line| !line.is_empty())
        .collect();

    let instructions: Vec<InstructionStep> = recipe
        .analyzed_instructions
        .first()
        .map(|group| {
            group
                .steps
                .iter()
                .filter(|step| !step.step.trim().is_empty())
                .zip(1u32..)
                .map(|(step, id)| InstructionStep {
                    id,
                    text: step.step.trim().to_owned(),
                    time: step
                        .length
                        .as_ref()
                        .map(|length| format!("{} {}", length.number, length.unit)),
                    note: None,
                })
                .collect()
        })
        .unwrap_or_default();

    let total = recipe
        .ready_in_minutes
        .unwrap_or(recipe_defaults::READY_IN_MINUTES);
    let prep = (total.saturating_mul(3) / 10).max(5);
    let cook = total.saturating_sub(prep);

    let diet_types = if recipe.vegan {
        vec!["vegan".to_owned(), "vegetarian".to_owned()]
    } else if recipe.vegetarian {
        vec!["vegetarian".to_owned()]
    } else {
        vec!["omnivore".to_owned()]
    };

    RawRecipe {
        id: format!("spoon-{}", recipe.id),
        name: recipe.title.trim().to_owned(),
        image: recipe.image.clone().unwrap_or_default(),
        servings: recipe.servings.unwrap_or(recipe_defaults::SERVINGS).max(1),
        prep_time_min: prep,
        cook_time_min: cook,
        difficulty: difficulty_for(total),
        rating: rating_for(recipe.spoonacular_score),
        nutrition: nutrition_for(recipe.nutrition.as_ref()),
        allergens: detect_allergens(&ingredients),
        diet_types,
        ingredients,
        instructions,
        is_ai_generated: false,
        personalized_for: None,
    }
}

/// `"{amount} {unit} {name}"`, preferring metric measures; known units are
/// rewritten to the parser's canonical token ("Tbsps" becomes "tbsp")
fn ingredient_line(ingredient: &SpoonacularIngredient) -> String {
    let metric = ingredient.measures.as_ref().and_then(|m| m.metric.as_ref());
    let amount = metric
        .and_then(|m| m.amount)
        .or(ingredient.amount)
        .unwrap_or(1.0);
    let unit = metric
        .and_then(|m| m.unit_short.as_deref())
        .or(ingredient.unit_short.as_deref())
        .unwrap_or_default();
    let name = ingredient
        .name
        .as_deref()
        .or(ingredient.original_name.as_deref())
        .unwrap_or_default();
    if name.trim().is_empty() {
        return String::new();
    }

    let unit = match IngredientUnit::from_token(unit) {
        Some(known) => known.as_str(),
        None => unit,
    };
    let amount = (amount * 100.0).round() / 100.0;
    format!("{amount} {unit} {name}")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn nutrition_for(nutrition: Option<&SpoonacularNutrition>) -> NutritionProfile {
    let mut totals = [0.0; 9];
    if let Some(nutrition) = nutrition {
        for (label, nutrient) in NUTRIENT_NAMES {
            if let Some(found) = nutrition.nutrients.iter().find(|n| n.name == *label) {
                totals[nutrient.index()] = found.amount;
            }
        }
    }
    NutritionProfile::from_totals(totals)
}

fn rating_for(score: Option<f64>) -> f64 {
    score
        .filter(|s| s.is_finite())
        .map_or(recipe_defaults::RATING, |s| {
            ((s / 20.0) * 10.0).round().clamp(0.0, 50.0) / 10.0
        })
}

const fn difficulty_for(total_minutes: u32) -> Difficulty {
    if total_minutes > 60 {
        Difficulty::Hard
    } else if total_minutes > 30 {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    }
}
