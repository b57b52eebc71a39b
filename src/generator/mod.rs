// ABOUTME: Personalized recipe synthesis for free-text search with three fallback tiers
// ABOUTME: Model output, knowledge-base template, then a minimal template that always succeeds
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Recipe Generator
//!
//! `generate` is total. Each tier produces a draft, and every draft then
//! goes through the same finishing steps:
//! 1. constraint filtering with a safe-staples refill
//! 2. nutrition aggregation
//! 3. sizing, naming, trait detection, and image lookup
//!
//! Allergen exclusion is applied to the final ingredient list, so it holds
//! whichever tier produced the draft.

use crate::config::GeneratorConfig;
use crate::llm::{prompts, TextGenerator};
use crate::nutrition::NutritionAggregator;
use futures_util::future::join_all;
use mealvista_core::constants::{recipe_defaults, timeouts};
use mealvista_core::errors::PipelineError;
use mealvista_core::models::{
    BmiCategory, CalorieTarget, Difficulty, InstructionStep, NutritionProfile,
    PersonalizationSummary, RawRecipe, UserHealthProfile,
};
use mealvista_intelligence::generation::{
    match_template, minimal_template, parse_model_output, personalize_name, DraftRecipe,
};
use mealvista_intelligence::{calorie_target, recipe_traits};
use mealvista_providers::RecipeProvider;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

/// Generator tier that produced a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationTier {
    /// Parsed from text-generation output
    Model,
    /// Matched knowledge-base template
    KnowledgeBase,
    /// Generic template built from the query
    MinimalTemplate,
}

impl GenerationTier {
    /// Tier label for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::KnowledgeBase => "knowledge_base",
            Self::MinimalTemplate => "minimal_template",
        }
    }
}

impl fmt::Display for GenerationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated recipe with the tier that produced it
#[derive(Debug, Clone)]
pub struct GeneratedRecipe {
    /// Finished recipe
    pub recipe: RawRecipe,
    /// Producing tier
    pub tier: GenerationTier,
}

/// Three-tier personalized recipe generator
#[derive(Clone)]
pub struct RecipeGenerator {
    aggregator: NutritionAggregator,
    text_generator: Option<Arc<dyn TextGenerator>>,
    image_source: Option<Arc<dyn RecipeProvider>>,
    generation_timeout: Duration,
    image_timeout: Duration,
}

impl RecipeGenerator {
    /// Template-only generator
    #[must_use]
    pub fn new(aggregator: NutritionAggregator) -> Self {
        Self {
            aggregator,
            text_generator: None,
            image_source: None,
            generation_timeout: Duration::from_secs(timeouts::GENERATION_SECS),
            image_timeout: Duration::from_secs(timeouts::IMAGE_LOOKUP_SECS),
        }
    }

    /// Generator configured from settings, with optional collaborators
    #[must_use]
    pub fn from_config(
        config: &GeneratorConfig,
        aggregator: NutritionAggregator,
        text_generator: Option<Arc<dyn TextGenerator>>,
        image_source: Option<Arc<dyn RecipeProvider>>,
    ) -> Self {
        let mut generator = Self::new(aggregator)
            .with_generation_timeout(Duration::from_secs(config.timeout_secs));
        generator.text_generator = text_generator;
        generator.image_source = image_source;
        generator
    }

    /// Enable the model tier
    #[must_use]
    pub fn with_text_generator(mut self, text_generator: Arc<dyn TextGenerator>) -> Self {
        self.text_generator = Some(text_generator);
        self
    }

    /// Prefer thumbnails from a provider's query search
    #[must_use]
    pub fn with_image_source(mut self, image_source: Arc<dyn RecipeProvider>) -> Self {
        self.image_source = Some(image_source);
        self
    }

    /// Bound the whole model tier
    #[must_use]
    pub const fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Bound the image lookup
    #[must_use]
    pub const fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    /// A personalized recipe for a query; never fails
    pub async fn generate(&self, query: &str, profile: &UserHealthProfile) -> RawRecipe {
        self.generate_with_tier(query, profile).await.recipe
    }

    /// `count` recipes generated concurrently, de-duplicated by name
    pub async fn generate_many(
        &self,
        query: &str,
        profile: &UserHealthProfile,
        count: usize,
    ) -> Vec<RawRecipe> {
        let generated = join_all((0..count).map(|_| self.generate(query, profile))).await;
        let mut seen = HashSet::new();
        generated
            .into_iter()
            .filter(|recipe| seen.insert(recipe.name.to_lowercase()))
            .collect()
    }

    /// A personalized recipe together with the tier that produced it
    pub async fn generate_with_tier(
        &self,
        query: &str,
        profile: &UserHealthProfile,
    ) -> GeneratedRecipe {
        let started = Instant::now();
        let target = calorie_target(profile);
        let (draft, tier) = self.draft(query, profile, target).await;
        let draft = draft.constrained(profile);

        let nutrition = self.aggregator.aggregate(&draft.ingredients).await;
        let image = self.image_for(query).await;
        let recipe = finish(draft, profile, target, nutrition, image);

        info!(
            query,
            tier = %tier,
            name = %recipe.name,
            calories = recipe.nutrition.calories,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "recipe generated"
        );
        GeneratedRecipe { recipe, tier }
    }

    async fn draft(
        &self,
        query: &str,
        profile: &UserHealthProfile,
        target: CalorieTarget,
    ) -> (DraftRecipe, GenerationTier) {
        match self.try_model(query, profile, target).await {
            Ok(draft) => return (draft, GenerationTier::Model),
            Err(e) => debug!(query, "{e}"),
        }
        if let Some(draft) = match_template(query) {
            return (draft, GenerationTier::KnowledgeBase);
        }
        (minimal_template(query, profile), GenerationTier::MinimalTemplate)
    }

    async fn try_model(
        &self,
        query: &str,
        profile: &UserHealthProfile,
        target: CalorieTarget,
    ) -> Result<DraftRecipe, PipelineError> {
        let unusable = |reason: String| PipelineError::GenerationUnusable {
            tier: GenerationTier::Model.as_str(),
            reason,
        };
        let Some(text_generator) = &self.text_generator else {
            return Err(unusable("no text generator configured".to_owned()));
        };

        let prompt = prompts::recipe_prompt(query, target, profile);
        let text = tokio::time::timeout(self.generation_timeout, text_generator.generate(&prompt))
            .await
            .map_err(|_| {
                unusable(format!(
                    "{} timed out after {}s",
                    text_generator.name(),
                    self.generation_timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| unusable(e.to_string()))?;

        parse_model_output(&text, query)
    }

    async fn image_for(&self, query: &str) -> String {
        if let Some(source) = &self.image_source {
            match tokio::time::timeout(self.image_timeout, source.fetch_by_query(query)).await {
                Ok(Ok(recipes)) => {
                    if let Some(image) = recipes
                        .into_iter()
                        .map(|recipe| recipe.image)
                        .find(|image| !image.is_empty())
                    {
                        return image;
                    }
                }
                Ok(Err(e)) => debug!(query, error = %e, "image lookup failed"),
                Err(_) => debug!(query, "image lookup timed out"),
            }
        }
        placeholder_image(query)
    }
}

/// Unsplash query URL used when no thumbnail is found
#[must_use]
pub fn placeholder_image(query: &str) -> String {
    format!(
        "https://source.unsplash.com/400x300/?{},food",
        urlencoding::encode(query.trim())
    )
}

/// Servings that bring one serving close to the calorie window's midpoint
#[must_use]
pub fn servings_for(calories: u32, target: CalorieTarget) -> u32 {
    let midpoint = target.midpoint().max(1);
    let servings = (f64::from(calories) / f64::from(midpoint)).round() as u32;
    servings.max(1)
}

fn finish(
    draft: DraftRecipe,
    profile: &UserHealthProfile,
    target: CalorieTarget,
    nutrition: NutritionProfile,
    image: String,
) -> RawRecipe {
    let step_count = draft.instructions.len();
    let step_minutes = u32::try_from(step_count).unwrap_or(u32::MAX);
    let diet_preferences: Vec<String> = ["vegetarian", "vegan"]
        .iter()
        .filter(|preference| profile.has_preference(preference))
        .map(|preference| (*preference).to_owned())
        .collect();

    RawRecipe {
        id: format!("ai-{}", Uuid::new_v4()),
        name: personalize_name(&draft.name, profile),
        image,
        servings: servings_for(nutrition.calories, target),
        prep_time_min: step_minutes.saturating_mul(2).max(10),
        cook_time_min: step_minutes.saturating_mul(3).max(15),
        difficulty: Difficulty::from_step_count(step_count),
        rating: recipe_defaults::RATING,
        nutrition,
        allergens: recipe_traits::detect_allergens(&draft.ingredients),
        diet_types: recipe_traits::diet_types(&draft.ingredients, &diet_preferences),
        instructions: InstructionStep::numbered(draft.instructions),
        ingredients: draft.ingredients,
        is_ai_generated: true,
        personalized_for: Some(PersonalizationSummary {
            calorie_target: target,
            bmi_category: profile
                .effective_bmi_category()
                .unwrap_or(BmiCategory::Normal)
                .label()
                .to_owned(),
            health_goal: profile.goal().label().to_owned(),
            dietary_preferences: profile.dietary_preferences.clone(),
            allergens_excluded: profile.normalized_allergens(),
        }),
    }
}
