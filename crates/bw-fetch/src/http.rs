//! HTTP backend.

use tracing::debug;
use ureq::Agent;
use url::Url;

use crate::fetcher::{FetchError, Fetcher, ImageLoad, ResourceLoader};

/// Fetches site paths from a content origin over HTTP.
///
/// Requests run on the blocking thread pool so the single-threaded event loop
/// keeps making progress while a probe is in flight.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    agent: Agent,
    origin: Url,
}

impl HttpFetcher {
    /// Create a fetcher for `origin` (e.g. `https://main--site--org.aem.page`).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPath`] if `origin` is not an absolute URL.
    pub fn new(origin: &str) -> Result<Self, FetchError> {
        let origin =
            Url::parse(origin).map_err(|e| FetchError::InvalidPath(format!("{origin}: {e}")))?;
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Ok(Self { agent, origin })
    }

    /// Content origin.
    #[must_use]
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolve a site path (or absolute URL) against the origin.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPath`] if the path cannot be joined.
    pub fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.origin
            .join(path)
            .map_err(|e| FetchError::InvalidPath(format!("{path}: {e}")))
    }

    async fn run_blocking<T, F>(&self, path: &str, f: F) -> Result<T, FetchError>
    where
        T: Send + 'static,
        F: FnOnce(Agent) -> Result<T, FetchError> + Send + 'static,
    {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || f(agent))
            .await
            .map_err(|e| FetchError::Transport {
                path: path.to_owned(),
                message: e.to_string(),
            })?
    }
}

fn get_text(agent: &Agent, url: &Url, path: &str) -> Result<String, FetchError> {
    let response = agent
        .get(url.as_str())
        .call()
        .map_err(|e| transport_error(path, &e))?;

    let status = response.status().as_u16();
    if let Some(err) = FetchError::from_status(path, status) {
        return Err(err);
    }

    let mut body = response.into_body();
    body.read_to_string()
        .map_err(|e| transport_error(path, &e))
}

fn head_status(agent: &Agent, url: &Url) -> Result<u16, ureq::Error> {
    let response = agent.head(url.as_str()).call()?;
    Ok(response.status().as_u16())
}

fn transport_error(path: &str, err: &ureq::Error) -> FetchError {
    FetchError::Transport {
        path: path.to_owned(),
        message: err.to_string(),
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self.resolve(path)?;
        debug!(url = %url, "Fetching");
        let owned = path.to_owned();
        self.run_blocking(path, move |agent| get_text(&agent, &url, &owned))
            .await
    }
}

impl ResourceLoader for HttpFetcher {
    async fn load_image(&self, src: &str) -> ImageLoad {
        if src.is_empty() {
            return ImageLoad::Skipped;
        }
        if src.starts_with("data:") {
            return ImageLoad::Loaded;
        }
        let Ok(url) = self.resolve(src) else {
            return ImageLoad::Failed;
        };
        let result = self
            .run_blocking(src, move |agent| {
                Ok(head_status(&agent, &url).map_err(|e| e.to_string()))
            })
            .await;
        match result {
            Ok(Ok(status)) if status < 400 => ImageLoad::Loaded,
            Ok(Ok(status)) => {
                debug!(src, status, "Image failed to load");
                ImageLoad::Failed
            }
            Ok(Err(message)) | Err(FetchError::Transport { message, .. }) => {
                debug!(src, error = %message, "Image request failed");
                ImageLoad::Failed
            }
            Err(_) => ImageLoad::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_site_path() {
        let fetcher = HttpFetcher::new("https://main--site--org.aem.page/").unwrap();
        let url = fetcher
            .resolve("/en/theme-configurator.plain.html")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://main--site--org.aem.page/en/theme-configurator.plain.html"
        );
    }

    #[test]
    fn test_resolve_keeps_absolute_urls() {
        let fetcher = HttpFetcher::new("https://example.com").unwrap();
        let url = fetcher.resolve("https://cdn.example.net/a.png").unwrap();
        assert_eq!(url.host_str(), Some("cdn.example.net"));
    }

    #[test]
    fn test_invalid_origin() {
        let err = HttpFetcher::new("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidPath(_)));
    }

    #[tokio::test]
    async fn test_data_uri_images_are_loaded() {
        let fetcher = HttpFetcher::new("https://example.com").unwrap();
        assert_eq!(
            fetcher.load_image("data:image/png;base64,AAAA").await,
            ImageLoad::Loaded
        );
        assert_eq!(fetcher.load_image("").await, ImageLoad::Skipped);
    }
}
