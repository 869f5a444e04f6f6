//! Benefits section: a single icon card.

use std::sync::LazyLock;

use bw_dom::builder::{a, div, h2, img, p};
use bw_dom::{Document, NodeId};

use crate::content::{BlockContent, Viewport};
use crate::context::DecorateContext;
use crate::decorator::{BlockDecorator, DecorateError, has_child_with_class};
use crate::variant::{Variant, VariantTable};

use super::{Rendered, Renderer, render_variant};

const NAME: &str = "benefits-section";
const CARD_CLASS: &str = "benefits-card";

static VARIANTS: LazyLock<VariantTable<Renderer>> = LazyLock::new(|| {
    VariantTable::new(
        vec![
            Variant::new("type-1", "benefits-section1", render_card as Renderer),
            Variant::new("type-2", "benefits-section2", render_card),
            Variant::plain("default", render_card),
        ],
        "default",
    )
    .unwrap()
});

/// `benefits-section` block.
#[derive(Clone, Copy, Debug, Default)]
pub struct BenefitsSection;

impl BlockDecorator for BenefitsSection {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_decorated(&self, doc: &Document, block: NodeId) -> bool {
        has_child_with_class(doc, block, CARD_CLASS)
    }

    fn decorate(
        &self,
        doc: &mut Document,
        block: NodeId,
        ctx: &mut DecorateContext,
    ) -> Result<(), DecorateError> {
        render_variant(doc, block, NAME, &VARIANTS, ctx.viewport);
        Ok(())
    }
}

fn render_card(content: &BlockContent, _viewport: Viewport) -> Rendered {
    let icon = content.images.first().map(|image| {
        div().class("benefits-icon").child(
            img()
                .attr("loading", "eager")
                .attr("fetchpriority", "high")
                .attr("alt", "")
                .attr("src", image.src.as_str()),
        )
    });
    let cta = content.links.first().filter(|l| !l.href.is_empty()).map(|link| {
        p().class("cta").child(
            a().class("button")
                .attr("href", link.href.as_str())
                .attr("title", if link.title.is_empty() { &link.text } else { &link.title })
                .text(link.text.as_str()),
        )
    });

    Rendered::new(vec![
        div().class(CARD_CLASS).child_opt(icon).child(
            div()
                .class("benefits-content")
                .child_opt(content.heading.as_deref().map(|h| h2().text(h)))
                .child_opt(content.description.as_deref().map(|d| p().text(d)))
                .child_opt(cta),
        ),
    ])
}
