//! Block decoration for Blockwork.
//!
//! An authored block is a `div` whose first class names its type and whose
//! other classes (marker classes) pick a presentational variant. This crate
//! turns authored blocks into their final markup:
//!
//! - [`VariantTable`]: ordered marker-class → variant resolution with a
//!   validated default
//! - [`BlockDecorator`]: the idempotent, instrumentation-preserving transform
//!   contract every block implements
//! - [`BlockRegistry`]: name → decorator dispatch with per-block failure
//!   isolation and `data-block-status` tracking
//! - [`blocks`]: the built-in block set
//! - [`tabs`]: the tabs state machine and cross-block accordion relocation
//!
//! # Example
//!
//! ```
//! use bw_blocks::{BlockRegistry, DecorateContext, Outcome};
//! use bw_dom::Document;
//! use url::Url;
//!
//! let mut doc = Document::parse(
//!     r#"<div class="track-record-container"><div class="track-record type-2" data-block-name="track-record">
//!          <div>Intro</div><div>10 years</div></div></div>"#,
//! );
//! let block = doc.find(doc.root(), |e| e.has_attr("data-block-name")).unwrap();
//! let mut ctx = DecorateContext::new(Url::parse("https://example.com/").unwrap());
//!
//! let registry = BlockRegistry::with_defaults();
//! assert_eq!(registry.decorate(&mut doc, block, &mut ctx), Outcome::Decorated);
//! assert_eq!(registry.decorate(&mut doc, block, &mut ctx), Outcome::AlreadyDecorated);
//! ```

pub mod blocks;
mod content;
mod context;
mod decorator;
pub mod picture;
mod registry;
pub mod tabs;
mod variant;

pub use content::{BlockContent, ContentSources, ImageRef, LinkRef, Viewport};
pub use context::{DecorateContext, IdGenerator};
pub use decorator::{BlockDecorator, DecorateError, Outcome, has_child_with_class};
pub use registry::{BLOCK_NAME_ATTR, BLOCK_STATUS_ATTR, BlockRegistry, block_name};
pub use variant::{Variant, VariantTable, VariantTableError, apply_container_class};
