// ABOUTME: Fixed knowledge-base recipes and the minimal generic recipe template
// ABOUTME: Second and third generator tiers; the minimal template always succeeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{capitalize, DraftRecipe};
use mealvista_core::models::UserHealthProfile;

/// Named template recipe matched by query keyword
#[derive(Debug)]
pub struct RecipeTemplate {
    /// Query substrings that select this template
    pub keywords: &'static [&'static str],
    /// Recipe name
    pub name: &'static str,
    /// Ingredient lines
    pub ingredients: &'static [&'static str],
    /// Ordered instructions
    pub instructions: &'static [&'static str],
}

impl RecipeTemplate {
    fn draft(&self) -> DraftRecipe {
        DraftRecipe {
            name: self.name.to_owned(),
            ingredients: self.ingredients.iter().map(|s| (*s).to_owned()).collect(),
            instructions: self.instructions.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

/// Knowledge base, checked in order
pub const KNOWLEDGE_BASE: &[RecipeTemplate] = &[
    RecipeTemplate {
        keywords: &["egg"],
        name: "Perfect Scrambled Eggs",
        ingredients: &[
            "4 large eggs",
            "2 tbsp butter",
            "2 tbsp milk or cream",
            "Salt and pepper to taste",
            "Fresh chives, chopped (optional)",
        ],
        instructions: &[
            "Crack eggs into a bowl and whisk until yolks and whites are combined",
            "Add milk, salt, and pepper, and whisk again",
            "Heat butter in a non-stick pan over medium-low heat",
            "Pour in the egg mixture and let it sit for 30 seconds",
            "Gently push the eggs from the edges toward the center with a spatula",
            "Continue cooking, stirring occasionally, until eggs are creamy and just set (2-3 minutes)",
            "Remove from heat while still slightly runny (they will continue cooking)",
            "Garnish with chives and serve immediately",
        ],
    },
    RecipeTemplate {
        keywords: &["chicken"],
        name: "Herb-Roasted Chicken",
        ingredients: &[
            "1 whole chicken (1.5-2kg)",
            "2 tbsp olive oil",
            "1 lemon, halved",
            "4 cloves garlic, minced",
            "1 tsp dried rosemary",
            "1 tsp dried thyme",
            "Salt and pepper to taste",
            "1 onion, quartered",
        ],
        instructions: &[
            "Preheat oven to 200°C (400°F)",
            "Pat chicken dry and place in a roasting pan",
            "Mix olive oil, garlic, rosemary, thyme, salt, and pepper",
            "Rub the mixture all over the chicken, including under the skin",
            "Place lemon halves and onion quarters inside the chicken cavity",
            "Roast for 60-75 minutes until internal temperature reaches 75°C (165°F)",
            "Let rest for 10 minutes before carving",
            "Serve with roasted vegetables",
        ],
    },
    RecipeTemplate {
        keywords: &["pasta", "spaghetti", "penne"],
        name: "Creamy Pasta",
        ingredients: &[
            "300g pasta (penne or fettuccine)",
            "200ml heavy cream",
            "100g parmesan cheese, grated",
            "2 cloves garlic, minced",
            "2 tbsp butter",
            "Salt and pepper to taste",
            "Fresh basil leaves",
        ],
        instructions: &[
            "Cook pasta according to package directions until al dente",
            "Meanwhile, heat butter in a large pan over medium heat",
            "Add garlic and cook for 1 minute until fragrant",
            "Pour in cream and bring to a gentle simmer",
            "Add grated parmesan and stir until melted and smooth",
            "Drain pasta, reserving 1/2 cup of pasta water",
            "Add pasta to the sauce and toss to combine",
            "Add pasta water if needed to thin the sauce",
            "Season with salt and pepper, garnish with basil, and serve",
        ],
    },
];

/// First knowledge-base template whose keyword appears in the query
#[must_use]
pub fn match_template(query: &str) -> Option<DraftRecipe> {
    let query = query.to_lowercase();
    KNOWLEDGE_BASE
        .iter()
        .find(|template| template.keywords.iter().any(|k| query.contains(k)))
        .map(RecipeTemplate::draft)
}

/// Generic aromatics-plus-main-ingredient recipe for any query
#[must_use]
pub fn minimal_template(query: &str, profile: &UserHealthProfile) -> DraftRecipe {
    let query = query.trim();
    let subject = if query.is_empty() { "vegetables" } else { query };

    let mut ingredients = vec![
        "2 tbsp olive oil".to_owned(),
        "1 onion, diced".to_owned(),
        "2 cloves garlic, minced".to_owned(),
        "Salt and pepper to taste".to_owned(),
        format!("500g {subject}"),
    ];
    if profile.has_preference("high-protein") {
        ingredients.push("200g protein source (chicken/tofu/tempeh)".to_owned());
    }
    if profile.has_preference("keto") {
        ingredients.extend(
            ["2 tbsp butter", "100g leafy greens", "50g nuts"]
                .iter()
                .map(|s| (*s).to_owned()),
        );
    }
    if profile.has_preference("low-carb") {
        ingredients.push("200g vegetables".to_owned());
    }

    DraftRecipe {
        name: format!("{} Delight", capitalize(subject)),
        ingredients,
        instructions: vec![
            format!("Prepare {subject} by cleaning and cutting as needed"),
            "Heat oil in a pan over medium heat".to_owned(),
            "Add onions and garlic, sauté until fragrant".to_owned(),
            format!("Add {subject} and cook until tender"),
            "Season with salt, pepper, and herbs".to_owned(),
            "Cook for 10-15 minutes until done".to_owned(),
            "Serve hot and enjoy!".to_owned(),
        ],
    }
}
