//! Asynchronous image fetch and decode
//!
//! [`TextureLoader`] does the slow part of loading an image (fetching bytes
//! and decoding them) on tokio's blocking pool and posts a [`LoadCompletion`]
//! on a channel. The UI thread drains the channel and hands each completion
//! to its session, which checks the ticket before touching any state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use photoplane_core::{Error, ImageData, Result};
use photoplane_io::{load_image, FetcherRegistry};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one texture request. Tickets are unique for the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn next() -> Self {
        Self(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Result of one texture request
#[derive(Debug)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub image_ref: String,
    pub result: Result<ImageData>,
}

/// Anything that can start loading an image for a session
pub trait TextureSource {
    /// Start loading `image_ref`. The completion must carry `ticket`.
    fn request(&self, ticket: LoadTicket, image_ref: &str);
}

/// Options for [`TextureLoader`]
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Larger images are downscaled to fit
    pub max_texture_dimension: u32,
    pub http_timeout: Duration,
    pub worker_threads: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_texture_dimension: 8192,
            http_timeout: Duration::from_secs(30),
            worker_threads: 2,
        }
    }
}

/// Called after each completion is queued, e.g. to wake an event loop
pub type LoadWaker = Arc<dyn Fn() + Send + Sync>;

pub struct TextureLoader {
    /// Taken on drop so in-flight fetches are abandoned rather than awaited
    runtime: Option<tokio::runtime::Runtime>,
    registry: Arc<FetcherRegistry>,
    config: LoaderConfig,
    sender: flume::Sender<LoadCompletion>,
    receiver: flume::Receiver<LoadCompletion>,
    waker: Option<LoadWaker>,
}

impl TextureLoader {
    pub fn new(registry: FetcherRegistry, config: LoaderConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .thread_name("photoplane-loader")
            .build()?;
        let (sender, receiver) = flume::unbounded();
        Ok(Self {
            runtime: Some(runtime),
            registry: Arc::new(registry),
            config,
            sender,
            receiver,
            waker: None,
        })
    }

    /// Loader with the file and http(s) fetchers registered
    pub fn with_defaults(config: LoaderConfig) -> Result<Self> {
        let registry = FetcherRegistry::with_defaults(config.http_timeout)?;
        Self::new(registry, config)
    }

    pub fn set_waker(&mut self, waker: LoadWaker) {
        self.waker = Some(waker);
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Every completion queued so far
    pub fn drain(&self) -> Vec<LoadCompletion> {
        self.receiver.try_iter().collect()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoadCompletion> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

impl Drop for TextureLoader {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            log::debug!("Shutting down texture loader");
            runtime.shutdown_background();
        }
    }
}

impl TextureSource for TextureLoader {
    fn request(&self, ticket: LoadTicket, image_ref: &str) {
        let Some(runtime) = self.runtime.as_ref() else {
            return;
        };
        let registry = Arc::clone(&self.registry);
        let sender = self.sender.clone();
        let waker = self.waker.clone();
        let image_ref = image_ref.to_string();
        let max_dimension = self.config.max_texture_dimension;

        log::debug!("Loading {} ({:?})", image_ref, ticket);
        runtime.spawn(async move {
            let task_ref = image_ref.clone();
            let result = match tokio::task::spawn_blocking(move || {
                load_image(&registry, &task_ref, max_dimension)
            })
            .await
            {
                Ok(loaded) => loaded.map_err(Error::from),
                Err(e) => Err(Error::ImageLoad(format!("loader task failed: {}", e))),
            };

            if sender.send(LoadCompletion { ticket, image_ref, result }).is_err() {
                log::debug!("Loader channel closed, dropping {:?}", ticket);
                return;
            }
            if let Some(wake) = waker {
                wake();
            }
        });
    }
}
