// ABOUTME: Error taxonomy for the recipe aggregation and generation pipeline
// ABOUTME: Only AllProvidersFailed reaches callers; the rest are absorbed by fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::AppError;
use thiserror::Error;

/// Conditions raised inside the pipeline
///
/// Each stage that can degrade reports one of these and the next fallback
/// tier takes over. `AllProvidersFailed` on the category path is the single
/// variant that becomes a caller-visible error.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Ingredient line had no recognizable quantity; absorbed into the default triple
    #[error("ingredient line has no leading quantity: {line:?}")]
    ParseAmbiguous {
        /// Offending line
        line: String,
    },

    /// A single provider failed; triggers the next provider in the chain
    #[error("provider '{provider}' unavailable: {reason}")]
    ProviderUnavailable {
        /// Provider name
        provider: String,
        /// Failure description
        reason: String,
    },

    /// Every configured provider failed for a category
    #[error("all recipe providers failed for '{cuisine}' (tried: {})", .attempted.join(", "))]
    AllProvidersFailed {
        /// Requested cuisine
        cuisine: String,
        /// Providers attempted, in order
        attempted: Vec<String>,
    },

    /// A generation tier produced nothing usable; triggers the next tier
    #[error("generation tier '{tier}' unusable: {reason}")]
    GenerationUnusable {
        /// Tier that failed
        tier: &'static str,
        /// Failure description
        reason: String,
    },

    /// Authoritative nutrient lookup timed out; absorbed by the heuristic tier
    #[error("nutrient lookup for '{ingredient}' exceeded {timeout_secs}s")]
    NutritionLookupTimeout {
        /// Ingredient name
        ingredient: String,
        /// Timeout that elapsed
        timeout_secs: u64,
    },
}

impl From<PipelineError> for AppError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::AllProvidersFailed {
                ref cuisine,
                ref attempted,
            } => Self::external_unavailable(format!(
                "Failed to fetch {cuisine} recipes from all sources"
            ))
            .with_details(serde_json::json!({ "attempted": attempted })),
            other => Self::internal(other.to_string()),
        }
    }
}
