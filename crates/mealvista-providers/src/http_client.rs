// ABOUTME: Shared HTTP client with connection pooling for provider API calls
// ABOUTME: Singleton with startup-configured timeouts plus a JSON GET helper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mealvista_core::errors::ProviderError;
use reqwest::{Client, ClientBuilder, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Longest response body excerpt kept in an HTTP error
const ERROR_BODY_CHARS: usize = 200;

/// Configured timeout values for the shared client
static CLIENT_TIMEOUTS: OnceLock<(u64, u64)> = OnceLock::new();

/// Global shared HTTP client with configured timeouts
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Initialize the shared HTTP client timeout configuration
///
/// Call once at server startup before any adapter is built. Without it the
/// defaults apply (30s timeout, 10s connect timeout).
pub fn initialize_shared_client(timeout_secs: u64, connect_timeout_secs: u64) {
    let _ = CLIENT_TIMEOUTS.set((timeout_secs, connect_timeout_secs));
}

/// Get the shared HTTP client for provider API calls
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let (timeout, connect_timeout) = CLIENT_TIMEOUTS
            .get()
            .copied()
            .unwrap_or((DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS));

        ClientBuilder::new()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Send a GET request with a per-request timeout and decode the JSON body
///
/// # Errors
///
/// Returns `ProviderError::Timeout` or `ProviderError::Network` for transport
/// failures, `ProviderError::Http` for non-success statuses, and
/// `ProviderError::Parse` when the body is not the expected JSON.
pub async fn get_json<T>(
    provider: &str,
    request: RequestBuilder,
    timeout: Duration,
) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let timeout_secs = timeout.as_secs();
    let response = request
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, &e, timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!(provider, status = status.as_u16(), "provider request failed");
        return Err(ProviderError::Http {
            provider: provider.to_owned(),
            status: status.as_u16(),
            message: body.chars().take(ERROR_BODY_CHARS).collect(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::parse(provider, e.to_string()))
}
