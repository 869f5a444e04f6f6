//! Document model for Blockwork.
//!
//! This crate provides the mutable HTML document every other Blockwork crate
//! operates on:
//!
//! - [`Document`]: an arena-backed tree addressed by [`NodeId`], with DOM-style
//!   navigation (`closest`, predicate queries) and mutation (`append`,
//!   `replace_with`, deep clone and cross-document import)
//! - HTML parsing ([`Document::parse`]) and serialization ([`Document::to_html`])
//! - [`builder`]: declarative [`ElementSpec`] construction used by block renderers
//! - [`instrumentation`]: transfer of authoring attributes during DOM replacement
//! - naming helpers and [`read_block_config`] for key/value blocks

pub mod builder;
mod document;
pub mod instrumentation;
mod node;
mod parser;
mod serializer;
mod util;

pub use builder::{ChildSpec, ElementSpec};
pub use document::Document;
pub use indextree::NodeId;
pub use instrumentation::{move_attributes, move_instrumentation};
pub use node::{ElementData, NodeData};
pub use serializer::{escape_attr, escape_text};
pub use util::{BlockConfig, ConfigValue, read_block_config, to_camel_case, to_class_name};
