// ABOUTME: External API client modules (USDA FoodData Central)
// ABOUTME: Provides the authoritative nutrient lookup behind the NutrientLookup trait

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! External API Clients

/// USDA `FoodData` Central client and mock
pub mod usda_client;

pub use usda_client::{
    map_nutrients, FoodNutrient, FoodSearchResult, MockUsdaClient, NutrientLookup, UsdaClient,
};
