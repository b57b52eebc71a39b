// ABOUTME: Two-tier per-100g nutrient estimation for a single ingredient name
// ABOUTME: Authoritative lookup under a timeout, falling back to food-group heuristics

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::external::NutrientLookup;
use mealvista_core::errors::PipelineError;
use mealvista_core::models::PerHundredGram;
use mealvista_intelligence::NutritionHeuristicsConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Which tier produced an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateSource {
    /// The authoritative nutrient lookup
    Authoritative,
    /// The food-group heuristic table
    Heuristic,
}

/// Per-100g estimate with its provenance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Nutrients per 100 g
    pub per_100g: PerHundredGram,
    /// Tier that produced the values
    pub source: EstimateSource,
}

/// Ingredient nutrient estimator; `estimate` never fails
#[derive(Clone)]
pub struct NutritionEstimator {
    lookup: Option<Arc<dyn NutrientLookup>>,
    heuristics: Arc<NutritionHeuristicsConfig>,
    timeout: Duration,
}

impl NutritionEstimator {
    /// Estimator backed by an authoritative lookup
    #[must_use]
    pub fn new(lookup: Arc<dyn NutrientLookup>, timeout: Duration) -> Self {
        Self {
            lookup: Some(lookup),
            heuristics: Arc::new(NutritionHeuristicsConfig::default()),
            timeout,
        }
    }

    /// Estimator using only the heuristic table
    #[must_use]
    pub fn heuristic_only() -> Self {
        Self {
            lookup: None,
            heuristics: Arc::new(NutritionHeuristicsConfig::default()),
            timeout: Duration::ZERO,
        }
    }

    /// Replace the heuristic table
    #[must_use]
    pub fn with_heuristics(mut self, heuristics: NutritionHeuristicsConfig) -> Self {
        self.heuristics = Arc::new(heuristics);
        self
    }

    /// Per-100g nutrients for an ingredient name
    pub async fn estimate(&self, name: &str) -> Estimate {
        if let Some(lookup) = &self.lookup {
            match self.authoritative(lookup.as_ref(), name).await {
                Ok(per_100g) => {
                    return Estimate {
                        per_100g,
                        source: EstimateSource::Authoritative,
                    }
                }
                Err(e) => debug!(ingredient = name, reason = %e, "falling back to heuristics"),
            }
        }

        Estimate {
            per_100g: self.heuristics.estimate(name),
            source: EstimateSource::Heuristic,
        }
    }

    async fn authoritative(
        &self,
        lookup: &dyn NutrientLookup,
        name: &str,
    ) -> Result<PerHundredGram, String> {
        let result = tokio::time::timeout(self.timeout, lookup.lookup(name))
            .await
            .map_err(|_| {
                let timeout = PipelineError::NutritionLookupTimeout {
                    ingredient: name.to_owned(),
                    timeout_secs: self.timeout.as_secs(),
                };
                warn!(source = lookup.name(), "{timeout}");
                timeout.to_string()
            })?;

        match result {
            Ok(values) if values == PerHundredGram::default() => {
                Err(format!("{} returned no tracked nutrients", lookup.name()))
            }
            Ok(values) => Ok(values),
            Err(e) => {
                debug!(source = lookup.name(), ingredient = name, error = %e, "nutrient lookup failed");
                Err(e.to_string())
            }
        }
    }
}
