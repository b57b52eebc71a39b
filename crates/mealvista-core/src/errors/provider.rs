// ABOUTME: Structured error types for recipe provider adapters
// ABOUTME: Captures HTTP, timeout, parse, and empty-result failures per provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Provider Error Types
//!
//! Every adapter reports failures through `ProviderError`. The orchestrator
//! treats any of them as "try the next provider"; only the final
//! exhaustion is surfaced to callers.

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by recipe provider adapters
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Provider answered with a non-success HTTP status
    #[error("{provider} returned HTTP {status}: {message}")]
    Http {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Connection or transport failure
    #[error("{provider} request failed: {message}")]
    Network {
        /// Provider name
        provider: String,
        /// Transport error description
        message: String,
    },

    /// Call exceeded its timeout
    #[error("{provider} did not respond within {timeout_secs}s")]
    Timeout {
        /// Provider name
        provider: String,
        /// Timeout that elapsed
        timeout_secs: u64,
    },

    /// Response body did not match the expected shape
    #[error("{provider} response could not be parsed: {message}")]
    Parse {
        /// Provider name
        provider: String,
        /// Parse error description
        message: String,
    },

    /// Provider succeeded but returned nothing usable
    #[error("{provider} returned no recipes for '{query}'")]
    NoResults {
        /// Provider name
        provider: String,
        /// Cuisine or query that produced no results
        query: String,
    },

    /// Cuisine has no mapping for this provider
    #[error("{provider} does not support cuisine '{cuisine}'")]
    UnsupportedCuisine {
        /// Provider name
        provider: String,
        /// Requested cuisine
        cuisine: String,
    },

    /// Provider does not implement the requested operation
    #[error("{provider} does not support {operation}")]
    Unsupported {
        /// Provider name
        provider: String,
        /// Operation name
        operation: String,
    },
}

impl ProviderError {
    /// Create a "no results" error
    #[must_use]
    pub fn no_results(provider: impl Into<String>, query: impl Into<String>) -> Self {
        Self::NoResults {
            provider: provider.into(),
            query: query.into(),
        }
    }

    /// Create an "unsupported cuisine" error
    #[must_use]
    pub fn unsupported_cuisine(provider: impl Into<String>, cuisine: impl Into<String>) -> Self {
        Self::UnsupportedCuisine {
            provider: provider.into(),
            cuisine: cuisine.into(),
        }
    }

    /// Create a "parse" error
    #[must_use]
    pub fn parse(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Get the provider name associated with this error
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::Http { provider, .. }
            | Self::Network { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::Parse { provider, .. }
            | Self::NoResults { provider, .. }
            | Self::UnsupportedCuisine { provider, .. }
            | Self::Unsupported { provider, .. } => provider,
        }
    }

    /// Convert a transport error, distinguishing timeouts
    #[cfg(feature = "provider-errors")]
    #[must_use]
    pub fn from_reqwest(provider: impl Into<String>, error: &reqwest::Error, timeout_secs: u64) -> Self {
        let provider = provider.into();
        if error.is_timeout() {
            Self::Timeout {
                provider,
                timeout_secs,
            }
        } else if error.is_decode() {
            Self::Parse {
                provider,
                message: error.to_string(),
            }
        } else {
            Self::Network {
                provider,
                message: error.to_string(),
            }
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match &error {
            ProviderError::NoResults { .. } | ProviderError::UnsupportedCuisine { .. } => {
                ErrorCode::ResourceNotFound
            }
            _ => ErrorCode::ExternalServiceError,
        };
        Self::new(code, error.to_string())
    }
}
