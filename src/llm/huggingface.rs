// ABOUTME: Hugging Face Inference API text generator with a primary and fallback model
// ABOUTME: Tries each model in order under its own timeout and returns the first usable text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Hugging Face Provider
//!
//! Calls `POST {base}/{model}` with `{inputs, parameters}` and reads
//! `[{"generated_text": ...}]`. A loading or failing model yields an
//! `{"error": ...}` object, which is treated like any other failure and moves
//! on to the next model.

use super::TextGenerator;
use crate::config::GeneratorConfig;
use async_trait::async_trait;
use mealvista_core::constants::{limits, timeouts};
use mealvista_core::errors::AppError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

const SERVICE: &str = "Hugging Face";

/// Longest error body excerpt logged
const ERROR_BODY_CHARS: usize = 200;

/// One model in the fallback chain
#[derive(Debug, Clone)]
pub struct ModelSpec {
    /// Model id, e.g. `EleutherAI/gpt-neo-125M`
    pub id: String,
    /// Generation length cap
    pub max_new_tokens: u32,
    /// Request timeout
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    #[serde(default)]
    generated_text: String,
}

/// Inference API client
#[derive(Clone)]
pub struct HuggingFaceProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    models: Vec<ModelSpec>,
}

impl HuggingFaceProvider {
    /// Create a provider from generator configuration
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let models = vec![
            ModelSpec {
                id: config.model.clone(),
                max_new_tokens: 600,
                timeout: Duration::from_secs(config.timeout_secs),
            },
            ModelSpec {
                id: config.fallback_model.clone(),
                max_new_tokens: 500,
                timeout: Duration::from_secs(timeouts::GENERATION_FALLBACK_SECS),
            },
        ];
        Self::new(
            mealvista_providers::shared_client().clone(),
            &config.huggingface_base_url,
            config.huggingface_api_key.clone(),
            models,
        )
    }

    /// Create a provider with an explicit client and model chain
    #[must_use]
    pub fn new(
        client: Client,
        base_url: &str,
        api_key: Option<String>,
        models: Vec<ModelSpec>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
            models,
        }
    }

    async fn call_model(&self, model: &ModelSpec, prompt: &str) -> Result<String, AppError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: model.max_new_tokens,
                temperature: 0.7,
                top_p: 0.9,
                return_full_text: false,
            },
        };

        let mut request = self
            .client
            .post(format!("{}/{}", self.base_url, model.id))
            .timeout(model.timeout)
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::external_service(
                    SERVICE,
                    format!("{} timed out after {}s", model.id, model.timeout.as_secs()),
                )
            } else {
                AppError::external_service(SERVICE, format!("Failed to connect: {e}"))
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;
        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE,
                format!(
                    "{} returned HTTP {status}: {}",
                    model.id,
                    text.chars().take(ERROR_BODY_CHARS).collect::<String>()
                ),
            ));
        }

        extract_generated_text(&text)
    }
}

/// Text of the first generation in an Inference API response body
///
/// # Errors
///
/// Returns an error for `{"error": ...}` bodies and unexpected shapes
pub fn extract_generated_text(body: &str) -> Result<String, AppError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::external_service(SERVICE, format!("JSON parse error: {e}")))?;

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(AppError::external_service(SERVICE, message.to_owned()));
    }

    let generations: Vec<GeneratedText> = serde_json::from_value(value)
        .map_err(|e| AppError::external_service(SERVICE, format!("Unexpected response: {e}")))?;
    generations
        .into_iter()
        .next()
        .map(|g| g.generated_text)
        .ok_or_else(|| AppError::external_service(SERVICE, "Empty generation list"))
}

#[async_trait]
impl TextGenerator for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        for model in &self.models {
            match self.call_model(model, prompt).await {
                Ok(text) if text.trim().chars().count() > limits::MODEL_OUTPUT_MIN_CHARS => {
                    info!(model = %model.id, chars = text.len(), "model generation succeeded");
                    return Ok(text);
                }
                Ok(text) => {
                    debug!(model = %model.id, chars = text.trim().len(), "model output too short");
                }
                Err(e) => warn!(model = %model.id, error = %e, "model generation failed"),
            }
        }
        Err(AppError::external_service(
            SERVICE,
            "No model produced usable output",
        ))
    }
}
