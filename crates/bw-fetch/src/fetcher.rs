//! Fetcher and resource-loader traits and error types.
//!
//! # Path Convention
//!
//! All paths passed to a [`Fetcher`] are **site paths**: absolute URL paths on
//! the content origin, optionally with a query string:
//! - `"/en/theme-configurator.plain.html"` - rendered page fragment
//! - `"/en/placeholders.json"` - spreadsheet JSON
//! - `"/nav.plain.html"` - header fragment
//!
//! Implementations map site paths to their own backend (HTTP origin, local
//! directory, in-memory map).

use std::future::Future;

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Server answered with a non-success status.
    Status,
    /// Network-level failure.
    Transport,
    /// Path cannot be mapped to the backend.
    InvalidPath,
    /// Local I/O failure.
    Io,
}

/// Error fetching a site resource.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Resource does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// Site path that was requested.
        path: String,
    },

    /// Server answered with an error status other than 404.
    #[error("HTTP {status} for {path}")]
    Status {
        /// Site path that was requested.
        path: String,
        /// HTTP status code.
        status: u16,
    },

    /// Request failed before a response was received.
    #[error("request for {path} failed: {message}")]
    Transport {
        /// Site path that was requested.
        path: String,
        /// Transport error description.
        message: String,
    },

    /// Path cannot be resolved against the backend.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Local I/O error.
    #[error("I/O error for {path}")]
    Io {
        /// Site path that was requested.
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Semantic category of this error.
    #[must_use]
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::NotFound { .. } => FetchErrorKind::NotFound,
            Self::Status { .. } => FetchErrorKind::Status,
            Self::Transport { .. } => FetchErrorKind::Transport,
            Self::InvalidPath(_) => FetchErrorKind::InvalidPath,
            Self::Io { .. } => FetchErrorKind::Io,
        }
    }

    /// Whether the resource simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == FetchErrorKind::NotFound
    }

    /// Map an HTTP status to an error, or `None` for success statuses.
    #[must_use]
    pub fn from_status(path: &str, status: u16) -> Option<Self> {
        match status {
            200..=399 => None,
            404 => Some(Self::NotFound {
                path: path.to_owned(),
            }),
            _ => Some(Self::Status {
                path: path.to_owned(),
                status,
            }),
        }
    }
}

/// Source of site content.
///
/// Futures returned by implementations are awaited on a single-threaded
/// runtime, so they need not be `Send`.
pub trait Fetcher {
    /// Fetch a site path as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] if the resource does not exist, or another
    /// variant if it could not be retrieved.
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>>;
}

impl<F: Fetcher> Fetcher for &F {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> {
        (**self).fetch(path)
    }
}

/// Outcome of waiting for an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageLoad {
    /// Image loaded.
    Loaded,
    /// Image failed to load.
    Failed,
    /// Nothing to wait for (no source, or the loader does not check).
    Skipped,
}

/// Readiness signal for page resources.
///
/// Used by the page assembler to suspend until the largest above-the-fold image
/// has loaded or failed.
pub trait ResourceLoader {
    /// Wait until the image at `src` has loaded or failed.
    fn load_image(&self, src: &str) -> impl Future<Output = ImageLoad>;
}

impl<R: ResourceLoader> ResourceLoader for &R {
    fn load_image(&self, src: &str) -> impl Future<Output = ImageLoad> {
        (**self).load_image(src)
    }
}

/// Resource loader that never waits.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateResources;

impl ResourceLoader for ImmediateResources {
    fn load_image(&self, _src: &str) -> impl Future<Output = ImageLoad> {
        std::future::ready(ImageLoad::Skipped)
    }
}

/// Split a site path into its path part, dropping query and fragment.
#[must_use]
pub fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}
