//! Block name → decorator dispatch.

use std::collections::HashMap;

use bw_dom::{Document, NodeId};

use crate::blocks;
use crate::context::DecorateContext;
use crate::decorator::{BlockDecorator, Outcome};

/// Attribute carrying the block lifecycle status.
pub const BLOCK_STATUS_ATTR: &str = "data-block-status";

/// Attribute carrying the block name.
pub const BLOCK_NAME_ATTR: &str = "data-block-name";

/// Registered block decorators.
///
/// [`decorate`](Self::decorate) is the failure boundary of the protocol: each
/// block is one decoration unit, and an error in one unit is logged and
/// recorded on the block without affecting any other block.
pub struct BlockRegistry {
    decorators: HashMap<&'static str, Box<dyn BlockDecorator>>,
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.decorators.keys().collect();
        names.sort();
        f.debug_struct("BlockRegistry")
            .field("decorators", &names)
            .finish()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BlockRegistry {
    /// Registry with no decorators.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            decorators: HashMap::new(),
        }
    }

    /// Registry with every built-in block.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(blocks::Accordion);
        registry.register(blocks::Banner);
        registry.register(blocks::BenefitsSection);
        registry.register(blocks::Cards);
        registry.register(blocks::CtaBanner);
        registry.register(blocks::PromotionalBanner);
        registry.register(crate::tabs::Tabs);
        registry.register(blocks::ThemeConfigurator);
        registry.register(blocks::TrackRecord);
        registry
    }

    /// Register a decorator, replacing any existing one with the same name.
    pub fn register(&mut self, decorator: impl BlockDecorator + 'static) {
        self.decorators.insert(decorator.name(), Box::new(decorator));
    }

    /// Whether a decorator exists for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.decorators.contains_key(name)
    }

    /// Decorate one block.
    ///
    /// The block name is read from `data-block-name`, falling back to the
    /// first class. Status moves `loading` → `loaded` (or `failed`).
    pub fn decorate(
        &self,
        doc: &mut Document,
        block: NodeId,
        ctx: &mut DecorateContext,
    ) -> Outcome {
        let Some(name) = block_name(doc, block) else {
            return Outcome::Unregistered;
        };
        let Some(decorator) = self.decorators.get(name.as_str()) else {
            tracing::debug!(block = %name, "No decorator registered");
            doc.set_attr(block, BLOCK_STATUS_ATTR, "loaded");
            return Outcome::Unregistered;
        };

        if decorator.is_decorated(doc, block) {
            tracing::debug!(block = %name, "Block already decorated");
            return Outcome::AlreadyDecorated;
        }

        doc.set_attr(block, BLOCK_STATUS_ATTR, "loading");
        match decorator.decorate(doc, block, ctx) {
            Ok(()) => {
                doc.set_attr(block, BLOCK_STATUS_ATTR, "loaded");
                Outcome::Decorated
            }
            Err(e) => {
                tracing::warn!(block = %name, error = %e, "Block decoration failed");
                doc.set_attr(block, BLOCK_STATUS_ATTR, "failed");
                Outcome::Failed
            }
        }
    }

    /// Decorate every marked block below `scope`, in document order.
    pub fn decorate_all(
        &self,
        doc: &mut Document,
        scope: NodeId,
        ctx: &mut DecorateContext,
    ) -> Vec<(NodeId, Outcome)> {
        let blocks = doc.find_all(scope, |e| e.has_attr(BLOCK_NAME_ATTR));
        blocks
            .into_iter()
            .map(|block| (block, self.decorate(doc, block, ctx)))
            .collect()
    }
}

/// Name of a block element.
#[must_use]
pub fn block_name(doc: &Document, block: NodeId) -> Option<String> {
    let el = doc.element(block)?;
    el.attr(BLOCK_NAME_ATTR)
        .filter(|n| !n.is_empty())
        .or_else(|| el.first_class())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use bw_dom::builder::div;
    use pretty_assertions::assert_eq;
    use url::Url;

    use super::*;
    use crate::decorator::DecorateError;

    struct Exploding;

    impl BlockDecorator for Exploding {
        fn name(&self) -> &'static str {
            "exploding"
        }

        fn is_decorated(&self, _doc: &Document, _block: NodeId) -> bool {
            false
        }

        fn decorate(
            &self,
            _doc: &mut Document,
            _block: NodeId,
            _ctx: &mut DecorateContext,
        ) -> Result<(), DecorateError> {
            Err(DecorateError::MissingAncestor("main".to_owned()))
        }
    }

    fn ctx() -> DecorateContext {
        DecorateContext::new(Url::parse("https://example.com/en/").unwrap())
    }

    #[test]
    fn test_failure_does_not_stop_siblings() {
        let mut doc = Document::skeleton();
        let body = doc.body().unwrap();
        let bad = doc.build_into(body, div().class("exploding").attr(BLOCK_NAME_ATTR, "exploding"));
        let good = doc.build_into(
            body,
            div()
                .class("theme-configurator")
                .attr(BLOCK_NAME_ATTR, "theme-configurator"),
        );

        let mut registry = BlockRegistry::with_defaults();
        registry.register(Exploding);
        let outcomes = registry.decorate_all(&mut doc, body, &mut ctx());

        assert_eq!(
            outcomes,
            vec![(bad, Outcome::Failed), (good, Outcome::Decorated)]
        );
        assert_eq!(doc.attr(bad, BLOCK_STATUS_ATTR), Some("failed"));
        assert_eq!(doc.attr(good, BLOCK_STATUS_ATTR), Some("loaded"));
    }

    #[test]
    fn test_unregistered_block_is_marked_loaded() {
        let mut doc = Document::skeleton();
        let body = doc.body().unwrap();
        let block = doc.build_into(body, div().class("quote").attr(BLOCK_NAME_ATTR, "quote"));

        let outcome = BlockRegistry::with_defaults().decorate(&mut doc, block, &mut ctx());
        assert_eq!(outcome, Outcome::Unregistered);
        assert_eq!(doc.attr(block, BLOCK_STATUS_ATTR), Some("loaded"));
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut doc = Document::skeleton();
        let body = doc.body().unwrap();
        let block = doc.build_into(
            body,
            div()
                .class("theme-configurator")
                .attr(BLOCK_NAME_ATTR, "theme-configurator"),
        );
        let registry = BlockRegistry::with_defaults();
        let mut ctx = ctx();

        assert_eq!(registry.decorate(&mut doc, block, &mut ctx), Outcome::Decorated);
        let once = doc.to_html();
        assert_eq!(
            registry.decorate(&mut doc, block, &mut ctx),
            Outcome::AlreadyDecorated
        );
        assert_eq!(doc.to_html(), once);
    }

    #[test]
    fn test_block_name_falls_back_to_first_class() {
        let mut doc = Document::new();
        let block = doc.build(div().class("cards blog"));
        assert_eq!(block_name(&doc, block).as_deref(), Some("cards"));
    }
}
