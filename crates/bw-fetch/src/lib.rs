//! Content fetching for Blockwork.
//!
//! This crate abstracts where page fragments, configuration tables and images
//! come from, so decoration and page assembly can be tested without a network.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Fetcher`] trait with an async `fetch()` of a site path
//! - [`ResourceLoader`] trait with an async `load_image()` readiness signal
//! - [`HttpFetcher`] for a live content origin (both traits)
//! - [`DirFetcher`] for an exported content directory (both traits)
//! - [`ImmediateResources`] when image readiness is not checked
//! - [`MockFetcher`] and [`MockResources`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use bw_fetch::{Fetcher, HttpFetcher};
//!
//! let fetcher = HttpFetcher::new("https://main--site--org.aem.page")?;
//! let nav = fetcher.fetch("/nav.plain.html").await?;
//! ```

mod dir;
mod fetcher;
mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use dir::DirFetcher;
pub use fetcher::{
    FetchError, FetchErrorKind, Fetcher, ImageLoad, ImmediateResources, ResourceLoader,
    strip_query,
};
pub use http::HttpFetcher;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockFetcher, MockResources};
