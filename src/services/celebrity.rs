// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Celebrity portrait lookup with an in-process TTL cache.
//!
//! Thumbnails come from the French Wikipedia `pageimages` API. Results
//! (including "no image found") are memoized per name with a fixed
//! expiry; staleness is tolerable and there is no cross-process
//! sharing. Lookup failures degrade to `None` and never propagate to
//! the request that asked for the image.

use crate::error::AppError;
use anyhow::Context;
use dashmap::DashMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};

const WIKIPEDIA_API_URL: &str = "https://fr.wikipedia.org/w/api.php";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);
const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const THUMBNAIL_SIZE: u32 = 400;

struct CacheEntry {
    image_url: Option<String>,
    expires_at: Instant,
}

/// Wikipedia thumbnail lookup client.
pub struct CelebrityImageService {
    http: reqwest::Client,
    cache: DashMap<String, CacheEntry>,
}

impl CelebrityImageService {
    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .context("failed building Wikipedia HTTP client")?;

        Ok(Self {
            http,
            cache: DashMap::new(),
        })
    }

    /// Look up a portrait thumbnail URL for a name.
    ///
    /// Returns `None` when no image exists or when the lookup fails;
    /// failures are logged but not cached, so a later request retries.
    pub async fn lookup(&self, name: &str) -> Option<String> {
        if let Some(entry) = self.cache.get(name) {
            if entry.expires_at > Instant::now() {
                return entry.image_url.clone();
            }
        }

        let image_url = match self.fetch_thumbnail(name).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, name, "Celebrity image lookup failed");
                return None;
            }
        };

        self.cache.insert(
            name.to_string(),
            CacheEntry {
                image_url: image_url.clone(),
                expires_at: Instant::now() + CACHE_TTL,
            },
        );

        image_url
    }

    async fn fetch_thumbnail(&self, name: &str) -> Result<Option<String>, AppError> {
        let thumbnail_size = THUMBNAIL_SIZE.to_string();
        let response = self
            .http
            .get(WIKIPEDIA_API_URL)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "pageimages"),
                ("piprop", "thumbnail"),
                ("pithumbsize", thumbnail_size.as_str()),
                ("redirects", "1"),
                ("titles", name),
            ])
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Wikipedia request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Wikipedia returned status {}",
                response.status()
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid Wikipedia JSON: {}", e)))?;

        Ok(extract_thumbnail(body))
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

/// Pull the first thumbnail URL out of a pageimages response.
fn extract_thumbnail(body: QueryResponse) -> Option<String> {
    body.query?
        .pages
        .into_values()
        .find_map(|page| page.thumbnail.map(|t| t.source))
}
