// ABOUTME: Seam between request credentials and the read-only user health profile
// ABOUTME: The default resolver is anonymous; deployments plug in their own auth-backed lookup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use mealvista_core::models::UserHealthProfile;

/// Maps a bearer token to a user's health profile
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    /// Profile for a token; `None` means the request is treated as anonymous
    async fn resolve(&self, bearer_token: &str) -> Option<UserHealthProfile>;
}

/// Resolver that never recognizes a token
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousProfileResolver;

#[async_trait]
impl ProfileResolver for AnonymousProfileResolver {
    async fn resolve(&self, _bearer_token: &str) -> Option<UserHealthProfile> {
        None
    }
}

/// Bearer token from an `Authorization` header, if present and non-blank
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
