// ABOUTME: Category recipe cache with LRU eviction, TTL expiry, and per-key fill locks
// ABOUTME: Stores serialized recipe lists so cache hits return byte-identical recipes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Recipe Cache
//!
//! Entries hold the serialized recipe list for one normalized cuisine key.
//! There is no background sweeper: a stale entry is ignored on read and
//! overwritten by the next successful fetch. The per-key async mutex lets the
//! orchestrator serialize check-fetch-write for one key while other keys
//! proceed in parallel.

use crate::config::CacheConfig;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use lru::LruCache;
use mealvista_core::errors::{AppError, AppResult};
use mealvista_core::models::RawRecipe;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Stored recipe list with its freshness metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    stored_at: DateTime<Utc>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data,
            stored_at: Utc::now(),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Fresh cached recipes for one key
#[derive(Debug, Clone)]
pub struct CachedRecipes {
    /// Recipes as stored
    pub recipes: Vec<RawRecipe>,
    /// When the entry was written
    pub stored_at: DateTime<Utc>,
}

/// In-memory recipe cache shared by every request
#[derive(Clone)]
pub struct RecipeCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    fill_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    ttl: Duration,
}

impl RecipeCache {
    /// Capacity used when the configured size is zero
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache from configuration
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_ttl(config.ttl(), config.max_entries)
    }

    /// Create a cache with an explicit TTL
    #[must_use]
    pub fn with_ttl(ttl: Duration, max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            fill_locks: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Normalized key for a cuisine
    #[must_use]
    pub fn key_for(cuisine: &str) -> String {
        cuisine.trim().to_lowercase()
    }

    /// Async mutex serializing fills of one key
    #[must_use]
    pub fn fill_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.fill_locks
            .entry(key.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Serialized bytes of a fresh entry
    pub async fn get_bytes(&self, key: &str) -> Option<Vec<u8>> {
        let mut store = self.store.write().await;
        store
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.data.clone())
    }

    /// Fresh recipes for a key; stale and missing entries both yield `None`
    ///
    /// # Errors
    ///
    /// Returns an error if a stored entry cannot be deserialized
    pub async fn get(&self, key: &str) -> AppResult<Option<CachedRecipes>> {
        let entry = {
            let mut store = self.store.write().await;
            match store.get(key) {
                Some(entry) if !entry.is_expired() => entry.clone(),
                Some(_) => {
                    debug!(key, "cache entry stale");
                    return Ok(None);
                }
                None => return Ok(None),
            }
        };

        let recipes = serde_json::from_slice(&entry.data).map_err(|e| {
            AppError::serialization(format!("Cached recipes for '{key}' are unreadable"))
                .with_source(e)
        })?;
        Ok(Some(CachedRecipes {
            recipes,
            stored_at: entry.stored_at,
        }))
    }

    /// Store recipes under a key, replacing any previous entry
    ///
    /// # Errors
    ///
    /// Returns an error if the recipes cannot be serialized
    pub async fn put(&self, key: &str, recipes: &[RawRecipe]) -> AppResult<()> {
        let data = serde_json::to_vec(recipes).map_err(|e| {
            AppError::serialization(format!("Recipes for '{key}' could not be encoded"))
                .with_source(e)
        })?;
        let entry = CacheEntry::new(data, self.ttl);
        self.store.write().await.put(key.to_owned(), entry);
        debug!(key, count = recipes.len(), "cache entry stored");
        Ok(())
    }

    /// Recipe with the given id from any fresh entry, with that entry's key
    pub async fn find_cached(&self, id: &str) -> Option<(String, RawRecipe)> {
        let fresh: Vec<(String, Vec<u8>)> = {
            let store = self.store.read().await;
            store
                .iter()
                .filter(|(_, entry)| !entry.is_expired())
                .map(|(key, entry)| (key.clone(), entry.data.clone()))
                .collect()
        };

        fresh.into_iter().find_map(|(key, data)| {
            serde_json::from_slice::<Vec<RawRecipe>>(&data)
                .ok()?
                .into_iter()
                .find(|recipe| recipe.id == id)
                .map(|recipe| (key, recipe))
        })
    }

    /// Number of stored entries, stale ones included
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}
