//! Block decoration protocol.

use bw_dom::{Document, NodeId};

use crate::context::DecorateContext;
use crate::tabs::TabsError;

/// Error raised by a decorator.
///
/// Missing authored content is not an error: decorators render partial output
/// instead. These variants cover structural surprises that make a transform
/// impossible; the registry logs them and marks the block as failed.
#[derive(Debug, thiserror::Error)]
pub enum DecorateError {
    /// The block node is not an element.
    #[error("block node is not an element")]
    NotAnElement,

    /// A required structural ancestor is missing.
    #[error("block has no `{0}` ancestor")]
    MissingAncestor(String),

    /// Tabs construction failed.
    #[error("tabs error")]
    Tabs(#[from] TabsError),

    /// JSON serialization of block settings failed.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

/// A block transform.
///
/// Implementations must be idempotent: [`decorate`](Self::decorate) is only
/// called when [`is_decorated`](Self::is_decorated) returns `false`, and after
/// a successful call `is_decorated` must return `true`. Whenever an authored
/// element is replaced by a generated one, its instrumentation attributes must
/// move to the replacement (see [`bw_dom::move_instrumentation`]).
pub trait BlockDecorator {
    /// Block name (the first class of the authored block element).
    fn name(&self) -> &'static str;

    /// Whether the block already carries this decorator's finished structure.
    fn is_decorated(&self, doc: &Document, block: NodeId) -> bool;

    /// Transform the block in place.
    fn decorate(
        &self,
        doc: &mut Document,
        block: NodeId,
        ctx: &mut DecorateContext,
    ) -> Result<(), DecorateError>;
}

/// Result of running one block through the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The decorator ran and succeeded.
    Decorated,
    /// The sentinel was present; nothing changed.
    AlreadyDecorated,
    /// No decorator is registered for the block name.
    Unregistered,
    /// The decorator returned an error; siblings are unaffected.
    Failed,
}

/// Whether `block` has a direct element child carrying `class`.
///
/// Most decorators use a generated wrapper as their sentinel.
#[must_use]
pub fn has_child_with_class(doc: &Document, block: NodeId, class: &str) -> bool {
    doc.children(block)
        .into_iter()
        .any(|c| doc.has_class(c, class))
}
