//! Fetcher registry for format-agnostic image resolution
//!
//! An image reference is a path, a `file://` URL or an `http(s)://` URL.
//! The registry hands it to the first fetcher that claims it, so callers
//! never need to know where the bytes come from.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::Duration;

use crate::error::FetchError;

/// Trait for resolving an image reference to encoded bytes
pub trait ImageFetcher: Send + Sync {
    /// Fetch the encoded image bytes
    fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, FetchError>;

    /// Check if this fetcher understands the given reference
    fn can_fetch(&self, image_ref: &str) -> bool;

    /// Short name used in logs
    fn scheme_name(&self) -> &'static str;
}

/// Reads images from the local filesystem
#[derive(Debug, Default, Clone)]
pub struct FileFetcher;

impl FileFetcher {
    /// Strip an optional `file://` prefix
    pub fn path_of(image_ref: &str) -> PathBuf {
        PathBuf::from(image_ref.strip_prefix("file://").unwrap_or(image_ref))
    }
}

impl ImageFetcher for FileFetcher {
    fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, FetchError> {
        let path = Self::path_of(image_ref);
        if !path.is_file() {
            return Err(FetchError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Ok(std::fs::read(&path)?)
    }

    fn can_fetch(&self, image_ref: &str) -> bool {
        image_ref.starts_with("file://") || !image_ref.contains("://")
    }

    fn scheme_name(&self) -> &'static str {
        "file"
    }
}

/// Downloads images over HTTP(S).
///
/// Uses the blocking client, so `fetch` must run on a thread that may block.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(image_ref).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: image_ref.to_string(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }

    fn can_fetch(&self, image_ref: &str) -> bool {
        image_ref.starts_with("http://") || image_ref.starts_with("https://")
    }

    fn scheme_name(&self) -> &'static str {
        "http"
    }
}

/// Serves images from memory under `mem://<name>` references
#[derive(Default)]
pub struct MemoryFetcher {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` as `mem://<name>` and return the reference
    pub fn insert(&self, name: &str, bytes: Vec<u8>) -> String {
        let image_ref = format!("mem://{}", name);
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(image_ref.clone(), bytes);
        }
        image_ref
    }
}

impl ImageFetcher for MemoryFetcher {
    fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, FetchError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| FetchError::Network("memory store poisoned".to_string()))?;
        entries.get(image_ref).cloned().ok_or_else(|| FetchError::FileNotFound {
            path: image_ref.to_string(),
        })
    }

    fn can_fetch(&self, image_ref: &str) -> bool {
        image_ref.starts_with("mem://")
    }

    fn scheme_name(&self) -> &'static str {
        "memory"
    }
}

/// Ordered set of fetchers
#[derive(Default)]
pub struct FetcherRegistry {
    fetchers: Vec<Box<dyn ImageFetcher>>,
}

impl FetcherRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Filesystem plus HTTP(S) with the given request timeout
    pub fn with_defaults(http_timeout: Duration) -> Result<Self, FetchError> {
        let mut registry = Self::new();
        registry.register(Box::new(HttpFetcher::new(http_timeout)?));
        registry.register(Box::new(FileFetcher));
        Ok(registry)
    }

    /// Add a fetcher. Earlier registrations win when several claim a reference.
    pub fn register(&mut self, fetcher: Box<dyn ImageFetcher>) {
        self.fetchers.push(fetcher);
    }

    /// Find the fetcher responsible for `image_ref`
    pub fn fetcher_for(&self, image_ref: &str) -> Option<&dyn ImageFetcher> {
        self.fetchers
            .iter()
            .find(|f| f.can_fetch(image_ref))
            .map(|f| f.as_ref())
    }

    /// Fetch `image_ref` with whichever fetcher claims it
    pub fn fetch(&self, image_ref: &str) -> Result<Vec<u8>, FetchError> {
        let fetcher = self
            .fetcher_for(image_ref)
            .ok_or_else(|| FetchError::UnsupportedScheme {
                image_ref: image_ref.to_string(),
            })?;
        log::debug!("Fetching {} via {}", image_ref, fetcher.scheme_name());
        fetcher.fetch(image_ref)
    }

    /// Number of registered fetchers
    pub fn len(&self) -> usize {
        self.fetchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fetchers.is_empty()
    }
}
