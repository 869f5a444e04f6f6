//! Banner: container theming only.
//!
//! The banner's authored content is rendered as-is; the marker class only
//! selects a container variant.

use std::sync::LazyLock;

use bw_dom::{Document, NodeId};

use crate::context::DecorateContext;
use crate::decorator::{BlockDecorator, DecorateError};
use crate::variant::{Variant, VariantTable, apply_container_class};

use super::container_has_variant;

const NAME: &str = "banner";

static VARIANTS: LazyLock<VariantTable<()>> = LazyLock::new(|| {
    VariantTable::new(
        vec![
            Variant::new("notification-banner-type-1", "notification-banner-varient1", ()),
            Variant::new("notification-banner-type-2", "notification-banner-varient2", ()),
            Variant::new("notification-banner-type-3", "notification-banner-varient3", ()),
            Variant::new("simple-banner-type-1", "simple-banner-varient1", ()),
            Variant::new("simple-banner-type-2", "simple-banner-varient2", ()),
            Variant::new("simple-banner-type-3", "simple-banner-varient3", ()),
            Variant::new("simple-banner-type-4", "simple-banner-varient4", ()),
        ],
        "notification-banner-type-1",
    )
    .unwrap()
});

/// `banner` block.
#[derive(Clone, Copy, Debug, Default)]
pub struct Banner;

impl BlockDecorator for Banner {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_decorated(&self, doc: &Document, block: NodeId) -> bool {
        container_has_variant(doc, block, NAME, &VARIANTS)
    }

    fn decorate(
        &self,
        doc: &mut Document,
        block: NodeId,
        _ctx: &mut DecorateContext,
    ) -> Result<(), DecorateError> {
        let variant = VARIANTS.resolve_block(doc, block);
        if let Some(class) = variant.container_class {
            apply_container_class(doc, block, NAME, class);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::decorator::Outcome;
    use crate::registry::BlockRegistry;
    use crate::blocks::test_support::{assert_idempotent, ctx, parse_block};

    const HTML: &str = r#"<main><div class="section banner-container"><div class="banner-wrapper">
        <div class="banner simple-banner-type-3"><div><div><p>Hello</p></div></div></div>
    </div></div></main>"#;

    #[test]
    fn test_variant_table_is_valid() {
        assert_eq!(VARIANTS.len(), 7);
    }

    #[test]
    fn test_marker_selects_container_variant() {
        let (mut doc, block) = parse_block(HTML, "banner");
        Banner.decorate(&mut doc, block, &mut ctx()).unwrap();

        let container = doc.closest_with_class(block, "banner-container").unwrap();
        assert!(doc.has_class(container, "simple-banner-varient3"));
        assert!(Banner.is_decorated(&doc, block));
        assert_eq!(doc.trimmed_text(block), "Hello");
    }

    #[test]
    fn test_missing_marker_uses_notification_default() {
        let (mut doc, block) = parse_block(
            r#"<div class="banner-container"><div class="banner"></div></div>"#,
            "banner",
        );
        Banner.decorate(&mut doc, block, &mut ctx()).unwrap();

        let container = doc.closest_with_class(block, "banner-container").unwrap();
        assert!(doc.has_class(container, "notification-banner-varient1"));
    }

    #[test]
    fn test_each_banner_in_shared_container_gets_its_variant() {
        let html = r#"<main><div class="section banner-container"><div class="banner-wrapper">
            <div class="banner simple-banner-type-1" data-block-name="banner"><div><div>One</div></div></div>
            <div class="banner simple-banner-type-2" data-block-name="banner"><div><div>Two</div></div></div>
        </div></div></main>"#;
        let mut doc = Document::parse(html);
        let root = doc.root();
        let mut ctx = ctx();
        let outcomes: Vec<Outcome> = BlockRegistry::with_defaults()
            .decorate_all(&mut doc, root, &mut ctx)
            .into_iter()
            .map(|(_, outcome)| outcome)
            .collect();
        assert_eq!(outcomes, vec![Outcome::Decorated, Outcome::Decorated]);

        let container = doc.find(doc.root(), |e| e.has_class("banner-container")).unwrap();
        assert!(doc.has_class(container, "simple-banner-varient1"));
        assert!(doc.has_class(container, "simple-banner-varient2"));
    }

    #[test]
    fn test_decorated_check_uses_own_variant() {
        let html = r#"<div class="banner-container simple-banner-varient1">
            <div class="banner simple-banner-type-1" id="a"></div>
            <div class="banner simple-banner-type-4" id="b"></div>
        </div>"#;
        let doc = Document::parse(html);
        let a = doc.get_element_by_id("a").unwrap();
        let b = doc.get_element_by_id("b").unwrap();
        assert!(Banner.is_decorated(&doc, a));
        assert!(!Banner.is_decorated(&doc, b));
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&Banner, HTML, "banner");
    }
}
