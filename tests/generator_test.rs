// ABOUTME: Integration tests for the three-tier recipe generator
// ABOUTME: Verifies tier fallback, allergen and diet safety, personalization, and image selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fakes::{
    heuristic_aggregator, sample_recipe, template_generator, FakeProvider, FakeTextGenerator,
    LENTIL_SOUP_OUTPUT,
};
use mealvista_core::models::{HealthGoal, UserHealthProfile};
use mealvista_server::generator::{placeholder_image, GenerationTier, RecipeGenerator};
use std::sync::Arc;
use std::time::Duration;

fn profile(preferences: &[&str], allergens: &[&str], goal: HealthGoal) -> UserHealthProfile {
    UserHealthProfile {
        dietary_preferences: preferences.iter().map(|s| (*s).to_owned()).collect(),
        allergens: allergens.iter().map(|s| (*s).to_owned()).collect(),
        health_goal: Some(goal),
        ..UserHealthProfile::default()
    }
}

fn model_generator(text_generator: FakeTextGenerator) -> RecipeGenerator {
    RecipeGenerator::new(heuristic_aggregator()).with_text_generator(Arc::new(text_generator))
}

#[tokio::test]
async fn test_knowledge_base_tier_without_model() {
    let generated = template_generator()
        .generate_with_tier("roast chicken", &UserHealthProfile::default())
        .await;

    assert_eq!(generated.tier, GenerationTier::KnowledgeBase);
    assert_eq!(generated.recipe.name, "Herb-Roasted Chicken");
    assert!(generated.recipe.nutrition.calories > 0);
}

#[tokio::test]
async fn test_minimal_template_for_unknown_query() {
    let generated = template_generator()
        .generate_with_tier("quinoa bowl", &UserHealthProfile::default())
        .await;

    assert_eq!(generated.tier, GenerationTier::MinimalTemplate);
    assert!(generated
        .recipe
        .ingredients
        .iter()
        .any(|line| line.contains("quinoa bowl")));
}

#[tokio::test]
async fn test_model_tier_parses_output() {
    let text_generator = FakeTextGenerator::replying(LENTIL_SOUP_OUTPUT);
    let generated = model_generator(text_generator)
        .generate_with_tier("lentil soup", &UserHealthProfile::default())
        .await;

    assert_eq!(generated.tier, GenerationTier::Model);
    assert_eq!(generated.recipe.name, "Hearty Lentil Soup");
    assert_eq!(generated.recipe.instructions.len(), 3);
    assert_eq!(generated.recipe.instructions[0].id, 1);
}

#[tokio::test]
async fn test_model_error_falls_back_to_templates() {
    let generated = model_generator(FakeTextGenerator::failing("model is loading"))
        .generate_with_tier("creamy pasta", &UserHealthProfile::default())
        .await;

    assert_eq!(generated.tier, GenerationTier::KnowledgeBase);
    assert_eq!(generated.recipe.name, "Creamy Pasta");
}

#[tokio::test]
async fn test_unusable_model_output_falls_back() {
    let generated = model_generator(FakeTextGenerator::replying("Sorry, I cannot help."))
        .generate_with_tier("quinoa bowl", &UserHealthProfile::default())
        .await;

    assert_eq!(generated.tier, GenerationTier::MinimalTemplate);
}

#[tokio::test]
async fn test_slow_model_times_out() {
    let text_generator =
        FakeTextGenerator::replying(LENTIL_SOUP_OUTPUT).with_delay(Duration::from_millis(500));
    let generator = model_generator(text_generator)
        .with_generation_timeout(Duration::from_millis(50));

    let generated = generator
        .generate_with_tier("lentil soup", &UserHealthProfile::default())
        .await;

    assert_ne!(generated.tier, GenerationTier::Model);
}

#[tokio::test]
async fn test_allergens_removed_from_model_output() {
    let user = profile(&[], &["Shrimp", " "], HealthGoal::Maintenance);
    let recipe = model_generator(FakeTextGenerator::replying(LENTIL_SOUP_OUTPUT))
        .generate("lentil soup", &user)
        .await;

    assert!(recipe
        .ingredients
        .iter()
        .all(|line| !line.to_lowercase().contains("shrimp")));
    assert!(!recipe.ingredients.is_empty());
    assert_eq!(
        recipe.personalized_for.unwrap().allergens_excluded,
        vec!["shrimp".to_owned()]
    );
}

#[tokio::test]
async fn test_allergen_safety_across_tiers() {
    let user = profile(&[], &["egg", "butter", "garlic"], HealthGoal::Maintenance);
    let generator = template_generator();

    for query in ["scrambled eggs", "chicken", "pasta", "stir fry"] {
        let recipe = generator.generate(query, &user).await;
        for line in &recipe.ingredients {
            let lower = line.to_lowercase();
            for allergen in ["egg", "butter", "garlic"] {
                assert!(!lower.contains(allergen), "{query}: '{line}' contains {allergen}");
            }
        }
    }
}

#[tokio::test]
async fn test_everything_filtered_refills_from_staples() {
    let user = profile(&[], &["egg", "butter", "milk", "salt", "pepper", "chives"], HealthGoal::Maintenance);
    let recipe = template_generator().generate("scrambled eggs", &user).await;

    assert!(!recipe.ingredients.is_empty());
    assert!(recipe
        .ingredients
        .iter()
        .all(|line| !line.to_lowercase().contains("egg")));
}

#[tokio::test]
async fn test_vegetarian_drops_meat_and_labels_recipe() {
    let user = profile(&["vegetarian"], &[], HealthGoal::Maintenance);
    let recipe = template_generator().generate("chicken", &user).await;

    assert!(recipe
        .ingredients
        .iter()
        .all(|line| !line.to_lowercase().contains("chicken")));
    assert!(recipe.diet_types.contains(&"vegetarian".to_owned()));
}

#[tokio::test]
async fn test_vegan_substitutes_dairy_in_model_output() {
    let user = profile(&["vegan"], &[], HealthGoal::Maintenance);
    let recipe = model_generator(FakeTextGenerator::replying(LENTIL_SOUP_OUTPUT))
        .generate("lentil soup", &user)
        .await;

    let lines: Vec<String> = recipe.ingredients.iter().map(|l| l.to_lowercase()).collect();
    assert!(lines.iter().all(|line| !line.contains("shrimp")));
    assert!(lines.iter().any(|line| line.contains("almond milk")));
}

#[tokio::test]
async fn test_generated_recipe_shape() {
    let user = profile(&["keto"], &[], HealthGoal::WeightLoss);
    let recipe = template_generator().generate("pasta", &user).await;

    assert!(recipe.id.starts_with("ai-"));
    assert!(recipe.is_ai_generated);
    assert_eq!(recipe.name, "Keto Light Creamy Pasta");
    assert!(recipe.prep_time_min >= 10);
    assert!(recipe.cook_time_min >= 15);
    assert!(recipe.servings >= 1);
    assert!((recipe.rating - 4.5).abs() < f64::EPSILON);
    assert_eq!(recipe.image, placeholder_image("pasta"));

    let summary = recipe.personalized_for.unwrap();
    assert_eq!(summary.health_goal, "Weight Loss");
    assert_eq!(summary.bmi_category, "Normal");
    assert!(summary.calorie_target.min <= summary.calorie_target.max);
}

#[tokio::test]
async fn test_image_from_provider_thumbnail() {
    let source = Arc::new(FakeProvider::returning(
        "themealdb",
        vec![sample_recipe("recipe-9", "Pad Thai", &["200g noodles"])],
    ));
    let generator = template_generator().with_image_source(source.clone());

    let recipe = generator.generate("pad thai", &UserHealthProfile::default()).await;

    assert_eq!(recipe.image, "https://images.test/recipe-9.jpg");
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_image_falls_back_when_source_fails() {
    let source = Arc::new(FakeProvider::failing("themealdb"));
    let generator = template_generator().with_image_source(source);

    let recipe = generator.generate("pad thai", &UserHealthProfile::default()).await;

    assert_eq!(recipe.image, placeholder_image("pad thai"));
}

#[tokio::test]
async fn test_generate_many_dedupes_by_name() {
    let recipes = template_generator()
        .generate_many("chicken", &UserHealthProfile::default(), 3)
        .await;

    assert_eq!(recipes.len(), 1);
}

#[tokio::test]
async fn test_generate_many_calls_model_per_recipe() {
    let text_generator = Arc::new(FakeTextGenerator::replying(LENTIL_SOUP_OUTPUT));
    let generator =
        RecipeGenerator::new(heuristic_aggregator()).with_text_generator(text_generator.clone());

    let recipes = generator
        .generate_many("lentil soup", &UserHealthProfile::default(), 3)
        .await;

    assert_eq!(text_generator.calls(), 3);
    assert_eq!(recipes.len(), 1);
    assert_ne!(recipes[0].id, String::new());
}
