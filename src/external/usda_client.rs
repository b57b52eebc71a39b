// ABOUTME: USDA FoodData Central client used as the authoritative nutrient lookup
// ABOUTME: Maps the top search hit's nutrients onto per-100g values; includes a mock for tests

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! USDA `FoodData` Central nutrient lookup
//!
//! Each ingredient name is searched with `pageSize=1` and the first hit's
//! nutrients are mapped by case-insensitive name substring. `FoodData`
//! Central reports search-result nutrients per 100 g, so no scaling happens
//! here.
//!
//! # Example
//! ```rust,no_run
//! use mealvista_server::config::UsdaClientConfig;
//! use mealvista_server::external::{NutrientLookup, UsdaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = UsdaClient::new(UsdaClientConfig::default());
//! let per_100g = client.lookup("chicken breast").await?;
//! println!("{} kcal", per_100g.calories);
//! # Ok(())
//! # }
//! ```

use crate::config::UsdaClientConfig;
use async_trait::async_trait;
use mealvista_core::errors::AppError;
use mealvista_core::models::{Nutrient, PerHundredGram};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

const SERVICE: &str = "USDA API";

/// Authoritative per-100g nutrient source
#[async_trait]
pub trait NutrientLookup: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &'static str;

    /// Per-100g nutrients for an ingredient name
    ///
    /// # Errors
    ///
    /// Returns `AppError` on transport failure or when nothing matches
    async fn lookup(&self, ingredient: &str) -> Result<PerHundredGram, AppError>;
}

/// One nutrient row from a search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    /// Nutrient name (e.g., "Protein", "Energy")
    #[serde(default)]
    pub nutrient_name: String,
    /// Nutrient unit (e.g., "g", "KCAL", "mg")
    #[serde(default)]
    pub unit_name: String,
    /// Amount per 100g
    #[serde(default)]
    pub value: f64,
}

impl FoodNutrient {
    /// Build a nutrient row
    #[must_use]
    pub fn new(name: &str, unit: &str, value: f64) -> Self {
        Self {
            nutrient_name: name.to_owned(),
            unit_name: unit.to_owned(),
            value,
        }
    }
}

/// One food from a search response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    /// `FoodData` Central ID
    #[serde(default)]
    pub fdc_id: u64,
    /// Food description
    #[serde(default)]
    pub description: String,
    /// Nutrients per 100g
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodSearchResult>,
}

/// Map nutrient rows onto the tracked fields; the first matching row wins
#[must_use]
pub fn map_nutrients(nutrients: &[FoodNutrient]) -> PerHundredGram {
    let mut values = PerHundredGram::default();
    let mut filled = [false; Nutrient::ALL.len()];

    for row in nutrients {
        let Some(nutrient) = classify(&row.nutrient_name, &row.unit_name) else {
            continue;
        };
        if !filled[nutrient.index()] && row.value.is_finite() {
            values.set(nutrient, row.value.max(0.0));
            filled[nutrient.index()] = true;
        }
    }
    values
}

fn classify(name: &str, unit: &str) -> Option<Nutrient> {
    let name = name.to_lowercase();
    let unit = unit.to_lowercase();

    if name.contains("energy") {
        return (name.contains("kcal") || unit.contains("kcal")).then_some(Nutrient::Calories);
    }
    if name.contains("protein") {
        Some(Nutrient::Protein)
    } else if name.contains("carbohydrate") {
        Some(Nutrient::Carbs)
    } else if name.contains("total lipid") || name.contains("fat,") {
        Some(Nutrient::Fat)
    } else if name.contains("fiber") {
        Some(Nutrient::Fiber)
    } else if name.contains("calcium") {
        Some(Nutrient::Calcium)
    } else if name.contains("iron") {
        Some(Nutrient::Iron)
    } else if name.contains("vitamin a") {
        Some(Nutrient::VitaminA)
    } else if name.contains("vitamin c") {
        Some(Nutrient::VitaminC)
    } else {
        None
    }
}

/// USDA `FoodData` Central API client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
}

impl UsdaClient {
    /// Create a client using the shared provider HTTP client
    #[must_use]
    pub fn new(config: UsdaClientConfig) -> Self {
        Self::with_client(mealvista_providers::shared_client().clone(), config)
    }

    /// Create a client with an explicit HTTP client
    #[must_use]
    pub fn with_client(http_client: reqwest::Client, config: UsdaClientConfig) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Top search hit for a query
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response cannot be parsed,
    /// or the search has no hits
    pub async fn search_top(&self, query: &str) -> Result<FoodSearchResult, AppError> {
        if query.trim().is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }

        let url = format!("{}/foods/search", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("query", query),
                ("pageSize", "1"),
                ("api_key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                SERVICE,
                format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let search_response: SearchResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("JSON parse error: {e}"))
        })?;

        search_response
            .foods
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("USDA food for '{query}'")))
    }
}

#[async_trait]
impl NutrientLookup for UsdaClient {
    fn name(&self) -> &'static str {
        "usda"
    }

    async fn lookup(&self, ingredient: &str) -> Result<PerHundredGram, AppError> {
        let food = self.search_top(ingredient).await?;
        debug!(
            ingredient,
            fdc_id = food.fdc_id,
            description = %food.description,
            "usda match"
        );
        Ok(map_nutrients(&food.food_nutrients))
    }
}

/// Mock USDA client for testing (no API calls)
pub struct MockUsdaClient {
    foods: Vec<FoodSearchResult>,
    calls: AtomicUsize,
}

impl MockUsdaClient {
    /// Create a mock with chicken breast and apple entries
    #[must_use]
    pub fn new() -> Self {
        Self::empty()
            .with_food(
                "Chicken, breast, meat only, cooked, roasted",
                vec![
                    FoodNutrient::new("Protein", "G", 31.02),
                    FoodNutrient::new("Total lipid (fat)", "G", 3.57),
                    FoodNutrient::new("Carbohydrate, by difference", "G", 0.0),
                    FoodNutrient::new("Energy", "KCAL", 165.0),
                    FoodNutrient::new("Iron, Fe", "MG", 1.04),
                ],
            )
            .with_food(
                "Apples, raw, with skin",
                vec![
                    FoodNutrient::new("Protein", "G", 0.26),
                    FoodNutrient::new("Total lipid (fat)", "G", 0.17),
                    FoodNutrient::new("Carbohydrate, by difference", "G", 13.81),
                    FoodNutrient::new("Energy", "KCAL", 52.0),
                    FoodNutrient::new("Fiber, total dietary", "G", 2.4),
                    FoodNutrient::new("Vitamin C, total ascorbic acid", "MG", 4.6),
                ],
            )
    }

    /// Create a mock with no foods; every lookup fails
    #[must_use]
    pub fn empty() -> Self {
        Self {
            foods: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Add a food matched when its description contains the query's first word
    #[must_use]
    pub fn with_food(mut self, description: &str, food_nutrients: Vec<FoodNutrient>) -> Self {
        let fdc_id = 100_000 + self.foods.len() as u64;
        self.foods.push(FoodSearchResult {
            fdc_id,
            description: description.to_owned(),
            food_nutrients,
        });
        self
    }

    /// Lookups served so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockUsdaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NutrientLookup for MockUsdaClient {
    fn name(&self) -> &'static str {
        "usda-mock"
    }

    async fn lookup(&self, ingredient: &str) -> Result<PerHundredGram, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let query = ingredient.trim().to_lowercase();
        let Some(word) = query.split_whitespace().next() else {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        };

        self.foods
            .iter()
            .find(|food| food.description.to_lowercase().contains(word))
            .map(|food| map_nutrients(&food.food_nutrients))
            .ok_or_else(|| AppError::not_found(format!("USDA food for '{ingredient}'")))
    }
}
