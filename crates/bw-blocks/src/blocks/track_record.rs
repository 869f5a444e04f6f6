//! Track record: the first row stays as the intro, the rest are grouped.

use std::sync::LazyLock;

use bw_dom::{Document, NodeId};

use crate::context::DecorateContext;
use crate::decorator::{BlockDecorator, DecorateError, has_child_with_class};
use crate::variant::{Variant, VariantTable, apply_container_class};

const NAME: &str = "track-record";
const WRAPPER_CLASS: &str = "track-record-wrapper";

static VARIANTS: LazyLock<VariantTable<()>> = LazyLock::new(|| {
    VariantTable::new(
        vec![
            Variant::new("type-1", "track-record-varient1", ()),
            Variant::new("type-2", "track-record-varient2", ()),
            Variant::new("type-3", "track-record-varient3", ()),
            Variant::new("type-4", "track-record-varient4", ()),
            Variant::plain("default", ()),
        ],
        "default",
    )
    .unwrap()
});

/// `track-record` block.
///
/// A block with fewer than two rows has nothing to group and is left alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrackRecord;

impl BlockDecorator for TrackRecord {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_decorated(&self, doc: &Document, block: NodeId) -> bool {
        doc.children(block).len() < 2 || has_child_with_class(doc, block, WRAPPER_CLASS)
    }

    fn decorate(
        &self,
        doc: &mut Document,
        block: NodeId,
        _ctx: &mut DecorateContext,
    ) -> Result<(), DecorateError> {
        let rows = doc.children(block);
        if rows.len() < 2 {
            return Ok(());
        }

        let wrapper = doc.create_element("div");
        doc.add_class(wrapper, WRAPPER_CLASS);
        for row in &rows[1..] {
            doc.append(wrapper, *row);
        }
        doc.append(block, wrapper);

        if let Some(class) = VARIANTS.resolve_block(doc, block).container_class {
            apply_container_class(doc, block, NAME, class);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::blocks::test_support::{assert_idempotent, ctx, parse_block};

    const HTML: &str = r#"<div class="section track-record-container"><div class="track-record type-3"><div>Intro</div><div>10 years</div><div>5M users</div></div></div>"#;

    #[test]
    fn test_rows_after_first_are_wrapped() {
        let (mut doc, block) = parse_block(HTML, NAME);
        TrackRecord.decorate(&mut doc, block, &mut ctx()).unwrap();

        assert_eq!(
            doc.inner_html(block),
            r#"<div>Intro</div><div class="track-record-wrapper"><div>10 years</div><div>5M users</div></div>"#
        );
        let container = doc.closest_with_class(block, "track-record-container").unwrap();
        assert!(doc.has_class(container, "track-record-varient3"));
    }

    #[test]
    fn test_single_row_is_untouched() {
        let html = r#"<div class="track-record-container"><div class="track-record type-1"><div>Intro</div></div></div>"#;
        let (mut doc, block) = parse_block(html, NAME);
        assert!(TrackRecord.is_decorated(&doc, block));

        TrackRecord.decorate(&mut doc, block, &mut ctx()).unwrap();
        let container = doc.closest_with_class(block, "track-record-container").unwrap();
        assert!(!doc.has_class(container, "track-record-varient1"));
        assert_eq!(doc.inner_html(block), "<div>Intro</div>");
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&TrackRecord, HTML, NAME);
    }
}
