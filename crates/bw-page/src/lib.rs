//! Page assembly for Blockwork.
//!
//! Takes an authored page (a `main` of `div` sections holding default
//! content and block tables) and assembles it in three phases:
//!
//! - [`sections`]: section wrappers, section metadata and block marking
//! - [`PageAssembler`]: the Eager → Lazy → Delayed orchestration, backed by a
//!   [`Fetcher`](bw_fetch::Fetcher) for content and a
//!   [`ResourceLoader`](bw_fetch::ResourceLoader) for image readiness
//! - [`PageReport`]: the resulting timeline of [`PhaseEvent`]s
//!
//! # Example
//!
//! ```ignore
//! use bw_dom::Document;
//! use bw_fetch::{HttpFetcher, ImmediateResources};
//! use bw_page::{PageAssembler, PageSettings};
//!
//! let fetcher = HttpFetcher::new("https://main--site--org.aem.page")?;
//! let assembler = PageAssembler::new(fetcher, ImmediateResources, PageSettings::default());
//! let mut doc = Document::parse(&html);
//! let report = assembler.load_page(&mut doc, url).await;
//! ```

mod assembler;
mod data_layer;
mod error;
mod fragments;
mod head;
mod metadata;
mod phase;
mod placeholders;
mod section_images;
pub mod sections;

pub use assembler::{PageAssembler, PageSettings, PageState};
pub use data_layer::{DATA_LAYER_ID, PageInfo, render_data_layer};
pub use error::PageError;
pub use fragments::{Fragment, fragment_document};
pub use head::{add_preconnect, load_css};
pub use metadata::{decorate_template_and_theme, language_from_path, metadata, set_page_language};
pub use phase::{DelayedTask, PageReport, Phase, PhaseEvent, TimedEvent};
pub use placeholders::{Placeholders, fetch_placeholders};
pub use section_images::decorate_section_images;
