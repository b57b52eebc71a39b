// ABOUTME: Scripted fakes for recipe providers, nutrient lookup, text generation, and profiles
// ABOUTME: Each fake counts its calls so tests can assert on fallback and caching behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use mealvista_core::errors::{AppError, ProviderError};
use mealvista_core::models::{
    Difficulty, InstructionStep, NutritionProfile, PerHundredGram, RawRecipe, UserHealthProfile,
};
use mealvista_providers::RecipeProvider;
use mealvista_server::cache::RecipeCache;
use mealvista_server::external::NutrientLookup;
use mealvista_server::generator::RecipeGenerator;
use mealvista_server::llm::TextGenerator;
use mealvista_server::nutrition::{NutritionAggregator, NutritionEstimator};
use mealvista_server::orchestrator::RecipeOrchestrator;
use mealvista_server::profiles::ProfileResolver;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A provider-shaped recipe with empty nutrition
pub fn sample_recipe(id: &str, name: &str, ingredients: &[&str]) -> RawRecipe {
    RawRecipe {
        id: id.to_owned(),
        name: name.to_owned(),
        image: format!("https://images.test/{id}.jpg"),
        servings: 4,
        prep_time_min: 15,
        cook_time_min: 30,
        difficulty: Difficulty::Medium,
        rating: 4.5,
        nutrition: NutritionProfile::default(),
        ingredients: ingredients.iter().map(|s| (*s).to_owned()).collect(),
        instructions: InstructionStep::numbered(["Combine everything", "Cook until done"]),
        allergens: Vec::new(),
        diet_types: vec!["omnivore".to_owned()],
        is_ai_generated: false,
        personalized_for: None,
    }
}

/// Aggregator backed only by food-group heuristics
pub fn heuristic_aggregator() -> NutritionAggregator {
    NutritionAggregator::new(NutritionEstimator::heuristic_only(), 4)
}

/// Orchestrator over the given providers with a fresh cache
pub fn orchestrator(providers: Vec<Arc<dyn RecipeProvider>>, ttl: Duration) -> RecipeOrchestrator {
    RecipeOrchestrator::new(
        providers,
        RecipeCache::with_ttl(ttl, 32),
        heuristic_aggregator(),
        Duration::from_millis(500),
    )
}

/// Template-only generator
pub fn template_generator() -> RecipeGenerator {
    RecipeGenerator::new(heuristic_aggregator())
}

/// Scripted provider behavior
#[derive(Clone)]
pub enum Script {
    /// Return these recipes
    Recipes(Vec<RawRecipe>),
    /// Fail with a network error
    Fail,
    /// Succeed with nothing
    Empty,
}

/// Recipe provider returning scripted results after an optional delay
pub struct FakeProvider {
    name: &'static str,
    script: Script,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(name: &'static str, script: Script) -> Self {
        Self {
            name,
            script,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning(name: &'static str, recipes: Vec<RawRecipe>) -> Self {
        Self::new(name, Script::Recipes(recipes))
    }

    pub fn failing(name: &'static str) -> Self {
        Self::new(name, Script::Fail)
    }

    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn run(&self, query: &str) -> Result<Vec<RawRecipe>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.script {
            Script::Recipes(recipes) => Ok(recipes.clone()),
            Script::Empty => Ok(Vec::new()),
            Script::Fail => Err(ProviderError::Network {
                provider: self.name.to_owned(),
                message: format!("connection refused for '{query}'"),
            }),
        }
    }
}

#[async_trait]
impl RecipeProvider for FakeProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_by_category(&self, cuisine: &str) -> Result<Vec<RawRecipe>, ProviderError> {
        self.run(cuisine).await
    }

    async fn fetch_by_query(&self, query: &str) -> Result<Vec<RawRecipe>, ProviderError> {
        self.run(query).await
    }
}

/// Lookup answering every ingredient with the same values
pub struct FixedLookup(pub PerHundredGram);

#[async_trait]
impl NutrientLookup for FixedLookup {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn lookup(&self, _ingredient: &str) -> Result<PerHundredGram, AppError> {
        Ok(self.0)
    }
}

/// Lookup that always errors
pub struct FailingLookup;

#[async_trait]
impl NutrientLookup for FailingLookup {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn lookup(&self, ingredient: &str) -> Result<PerHundredGram, AppError> {
        Err(AppError::external_service("failing", format!("no data for {ingredient}")))
    }
}

/// Lookup that answers only after a delay
pub struct SlowLookup {
    pub delay: Duration,
    pub values: PerHundredGram,
}

#[async_trait]
impl NutrientLookup for SlowLookup {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn lookup(&self, _ingredient: &str) -> Result<PerHundredGram, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.values)
    }
}

/// Text generator returning a fixed response after an optional delay
pub struct FakeTextGenerator {
    response: Result<String, String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeTextGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            response: Ok(text.to_owned()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_owned()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeTextGenerator {
    fn name(&self) -> &'static str {
        "fake-model"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response
            .clone()
            .map_err(|message| AppError::external_service("fake-model", message))
    }
}

/// Well-formed model output for a lentil soup containing shrimp and milk
pub const LENTIL_SOUP_OUTPUT: &str = "Recipe Name: Hearty Lentil Soup
Ingredients:
- 1 cup red lentils
- 1 onion, diced
- 200g shrimp
- 1 cup milk
- 2 cloves garlic, minced

Instructions:
1. Rinse the lentils under cold water
2. Saute the onion and garlic until soft
3. Simmer everything for twenty minutes
";

/// Resolves one known token to a fixed profile
pub struct StaticProfileResolver {
    pub token: String,
    pub profile: UserHealthProfile,
}

#[async_trait]
impl ProfileResolver for StaticProfileResolver {
    async fn resolve(&self, bearer_token: &str) -> Option<UserHealthProfile> {
        (bearer_token == self.token).then(|| self.profile.clone())
    }
}
