//! Versioned static-asset cache.
//!
//! Mirrors an offline-first asset worker: documents, scripts, styles and
//! JSON are served network-first so updates land promptly, everything
//! else is served cache-first. Caches are named by version; activating a
//! new version drops the old ones.

use crate::Result;
use std::collections::BTreeMap;

/// Name of the cache owned by this release
pub const CACHE_NAME: &str = "cindy-v1";

/// What kind of resource a request is for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Document,
    Script,
    Style,
    Image,
    Font,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRequest {
    pub url: String,
    pub destination: Destination,
}

impl AssetRequest {
    pub fn new(url: impl Into<String>, destination: Destination) -> Self {
        Self {
            url: url.into(),
            destination,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl AssetResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Only complete 200 responses are worth caching
    pub fn is_cacheable(&self) -> bool {
        self.status == 200
    }
}

/// Network access seam
pub trait Fetcher {
    fn fetch(&mut self, request: &AssetRequest) -> Result<AssetResponse>;
}

/// How a request is answered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheStrategy {
    /// Try the network, fall back to the cache when offline
    NetworkFirst,
    /// Answer from the cache, fetch and store on a miss
    CacheFirst,
}

impl CacheStrategy {
    pub fn for_request(request: &AssetRequest) -> Self {
        let url = request.url.as_str();
        if request.destination == Destination::Document
            || url.contains(".js")
            || url.contains(".css")
            || url.contains(".json")
        {
            CacheStrategy::NetworkFirst
        } else {
            CacheStrategy::CacheFirst
        }
    }
}

/// Named caches of responses keyed by URL
#[derive(Debug, Default)]
pub struct AssetCache {
    current: String,
    caches: BTreeMap<String, BTreeMap<String, AssetResponse>>,
}

impl AssetCache {
    /// Cache set whose current version is `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            current: name.into(),
            caches: BTreeMap::new(),
        }
    }

    /// Adopt caches left behind by an earlier version
    pub fn with_existing(mut self, name: &str, entries: Vec<(String, AssetResponse)>) -> Self {
        self.caches
            .entry(name.to_string())
            .or_default()
            .extend(entries);
        self
    }

    pub fn current_name(&self) -> &str {
        &self.current
    }

    pub fn cache_names(&self) -> Vec<&str> {
        self.caches.keys().map(String::as_str).collect()
    }

    pub fn install(&mut self) {
        tracing::info!("Asset cache {} installing", self.current);
        self.caches.entry(self.current.clone()).or_default();
    }

    /// Delete every cache but the current one, returning the dropped names
    pub fn activate(&mut self) -> Vec<String> {
        tracing::info!("Asset cache {} activating", self.current);
        let stale: Vec<String> = self
            .caches
            .keys()
            .filter(|name| **name != self.current)
            .cloned()
            .collect();

        for name in &stale {
            self.caches.remove(name);
            tracing::debug!("Deleted stale asset cache {}", name);
        }
        stale
    }

    /// Look a URL up in any cache, current version first
    pub fn lookup(&self, url: &str) -> Option<&AssetResponse> {
        self.caches
            .get(&self.current)
            .and_then(|cache| cache.get(url))
            .or_else(|| self.caches.values().find_map(|cache| cache.get(url)))
    }

    fn put(&mut self, url: &str, response: &AssetResponse) {
        self.caches
            .entry(self.current.clone())
            .or_default()
            .insert(url.to_string(), response.clone());
    }

    /// Answer a request using its cache strategy
    pub fn serve(
        &mut self,
        request: &AssetRequest,
        fetcher: &mut dyn Fetcher,
    ) -> Result<AssetResponse> {
        match CacheStrategy::for_request(request) {
            CacheStrategy::NetworkFirst => match fetcher.fetch(request) {
                Ok(response) => {
                    if response.is_cacheable() {
                        self.put(&request.url, &response);
                    }
                    Ok(response)
                }
                Err(e) => {
                    tracing::warn!("Fetch of {} failed: {}. Trying cache.", request.url, e);
                    self.lookup(&request.url).cloned().ok_or(e)
                }
            },
            CacheStrategy::CacheFirst => {
                if let Some(hit) = self.lookup(&request.url) {
                    return Ok(hit.clone());
                }
                let response = fetcher.fetch(request)?;
                if response.is_cacheable() {
                    self.put(&request.url, &response);
                }
                Ok(response)
            }
        }
    }
}
