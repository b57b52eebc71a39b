// ABOUTME: Text generation abstraction used by the recipe generator's model tier
// ABOUTME: Defines the TextGenerator contract and the Hugging Face Inference API provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Text Generation Providers
//!
//! The recipe generator only needs raw completion text for a prompt, so the
//! contract is a single async call. Output quality is not relied upon: the
//! generator parses the text defensively and falls back to templates.
//!
//! ```rust,no_run
//! use mealvista_server::llm::TextGenerator;
//!
//! async fn example(generator: &dyn TextGenerator) {
//!     let text = generator.generate("Create a detailed recipe for \"dal\"").await;
//! }
//! ```

mod huggingface;
pub mod prompts;

pub use huggingface::{HuggingFaceProvider, ModelSpec};
pub use prompts::recipe_prompt;

use async_trait::async_trait;
use mealvista_core::errors::AppError;

/// Generative text endpoint
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Completion text for a prompt
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the endpoint fails or returns nothing usable
    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}
