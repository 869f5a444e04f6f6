//! Mock backends for testing.
//!
//! Provides [`MockFetcher`] and [`MockResources`], which serve canned responses
//! and record every request in order so tests can assert probe sequences.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use crate::fetcher::{FetchError, Fetcher, ImageLoad, ResourceLoader, strip_query};

#[derive(Clone, Debug)]
enum MockResponse {
    Body(String),
    Status(u16),
    Transport(String),
}

/// In-memory fetcher.
///
/// Paths without a configured response return [`FetchError::NotFound`].
///
/// # Example
///
/// ```ignore
/// use bw_fetch::{Fetcher, MockFetcher};
///
/// let fetcher = MockFetcher::new()
///     .with_page("/en/theme-configurator.plain.html", "<div></div>")
///     .with_status("/theme-configurator.plain.html", 500);
///
/// let body = fetcher.fetch("/en/theme-configurator.plain.html").await?;
/// assert_eq!(fetcher.probes(), vec!["/en/theme-configurator.plain.html"]);
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: RwLock<HashMap<String, MockResponse>>,
    probes: RwLock<Vec<String>>,
}

impl MockFetcher {
    /// Create a fetcher with no responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(path.into(), MockResponse::Body(body.into()));
        self
    }

    /// Answer `path` with an HTTP error status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_status(self, path: impl Into<String>, status: u16) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(path.into(), MockResponse::Status(status));
        self
    }

    /// Fail `path` with a transport error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_transport_error(self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(path.into(), MockResponse::Transport(message.into()));
        self
    }

    /// Every requested path, in request order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn probes(&self) -> Vec<String> {
        self.probes.read().unwrap().clone()
    }

    /// Number of requests for `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn probe_count(&self, path: &str) -> usize {
        self.probes
            .read()
            .unwrap()
            .iter()
            .filter(|p| *p == path)
            .count()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.probes.write().unwrap().push(path.to_owned());
        // Yield so callers observe a real suspension point.
        tokio::task::yield_now().await;

        let response = {
            let responses = self.responses.read().unwrap();
            responses
                .get(path)
                .or_else(|| responses.get(strip_query(path)))
                .cloned()
        };
        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Status(status)) => {
                Err(FetchError::from_status(path, status).unwrap_or(FetchError::Status {
                    path: path.to_owned(),
                    status,
                }))
            }
            Some(MockResponse::Transport(message)) => Err(FetchError::Transport {
                path: path.to_owned(),
                message,
            }),
            None => Err(FetchError::NotFound {
                path: path.to_owned(),
            }),
        }
    }
}

/// Resource loader with scripted outcomes and optional latency.
///
/// Images without a configured outcome load successfully.
#[derive(Debug, Default)]
pub struct MockResources {
    outcomes: RwLock<HashMap<String, ImageLoad>>,
    delay: Option<Duration>,
    loads: RwLock<Vec<String>>,
}

impl MockResources {
    /// Create a loader where every image loads immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome for `src`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_outcome(self, src: impl Into<String>, outcome: ImageLoad) -> Self {
        self.outcomes.write().unwrap().insert(src.into(), outcome);
        self
    }

    /// Sleep for `delay` before reporting any outcome.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every awaited image source, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn loads(&self) -> Vec<String> {
        self.loads.read().unwrap().clone()
    }
}

impl ResourceLoader for MockResources {
    async fn load_image(&self, src: &str) -> ImageLoad {
        self.loads.write().unwrap().push(src.to_owned());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.outcomes
            .read()
            .unwrap()
            .get(src)
            .copied()
            .unwrap_or(ImageLoad::Loaded)
    }
}
