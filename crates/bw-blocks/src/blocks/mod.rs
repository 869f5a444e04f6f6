//! Built-in blocks.
//!
//! Each block is a thin marker-class table plus renderer over the shared
//! protocol in [`crate::decorator`].

mod accordion;
mod banner;
mod benefits_section;
mod cards;
mod cta_banner;
mod promotional_banner;
mod theme_configurator;
mod track_record;

pub use accordion::Accordion;
pub use banner::Banner;
pub use benefits_section::BenefitsSection;
pub use cards::{Cards, Carousel};
pub use cta_banner::CtaBanner;
pub use promotional_banner::PromotionalBanner;
pub use theme_configurator::ThemeConfigurator;
pub use track_record::TrackRecord;

use bw_dom::{Document, ElementData, ElementSpec, NodeId, move_instrumentation};

use crate::content::{BlockContent, Viewport};
use crate::variant::{VariantTable, apply_container_class};

/// Output of a pure block renderer.
#[derive(Debug, Default)]
pub struct Rendered {
    /// New block children, replacing the authored rows.
    pub children: Vec<ElementSpec>,
    /// Inline style declarations for the enclosing container.
    pub container_style: Vec<(&'static str, String)>,
}

impl Rendered {
    fn new(children: Vec<ElementSpec>) -> Self {
        Self {
            children,
            container_style: Vec::new(),
        }
    }
}

/// Pure renderer from extracted content to target markup.
pub type Renderer = fn(&BlockContent, Viewport) -> Rendered;

/// Resolve the block's variant, theme its container and replace the authored
/// rows with the variant's rendering.
///
/// Instrumentation on the authored rows, heading, description, images and
/// links moves to the generated elements that take their place.
pub(crate) fn render_variant(
    doc: &mut Document,
    block: NodeId,
    name: &str,
    table: &VariantTable<Renderer>,
    viewport: Viewport,
) {
    let variant = table.resolve_block(doc, block);
    let container = variant
        .container_class
        .and_then(|class| apply_container_class(doc, block, name, class));

    let content = BlockContent::extract(doc, block);
    let rendered = (variant.render)(&content, viewport);

    let generated: Vec<NodeId> = rendered
        .children
        .into_iter()
        .map(|spec| doc.build(spec))
        .collect();
    transfer_instrumentation(doc, &content, &generated);

    doc.clear_children(block);
    for node in generated {
        doc.append(block, node);
    }

    if !rendered.container_style.is_empty() {
        let container =
            container.or_else(|| doc.closest_with_class(block, &format!("{name}-container")));
        if let Some(el) = container.and_then(|c| doc.element_mut(c)) {
            for (property, value) in &rendered.container_style {
                el.set_style_property(property, value);
            }
        }
    }
}

/// Pair each authored source in `content` with the generated element playing
/// the same role and move its instrumentation across.
///
/// Rows map to the first generated root. Each generated element takes at
/// most one source; authored pieces without a counterpart keep their
/// attributes.
fn transfer_instrumentation(doc: &mut Document, content: &BlockContent, generated: &[NodeId]) {
    let Some(&root) = generated.first() else {
        return;
    };
    let sources = &content.sources;
    for row in &sources.rows {
        move_instrumentation(doc, *row, root);
    }

    let mut claimed: Vec<NodeId> = Vec::new();
    let mut pair = |doc: &mut Document, from: NodeId, pred: &dyn Fn(&ElementData) -> bool| {
        let target = generated
            .iter()
            .flat_map(|g| std::iter::once(*g).chain(doc.descendants(*g)))
            .find(|id| !claimed.contains(id) && doc.element(*id).is_some_and(pred));
        if let Some(target) = target {
            claimed.push(target);
            move_instrumentation(doc, from, target);
        }
    };

    if let Some(heading) = sources.heading {
        pair(doc, heading, &ElementData::is_heading);
    }
    if let (Some(node), Some(text)) = (sources.description, content.description.as_deref()) {
        let matches = |e: &ElementData| e.is("p") && e.attr("class").is_none();
        let target = generated
            .iter()
            .flat_map(|g| std::iter::once(*g).chain(doc.descendants(*g)))
            .find(|id| doc.element(*id).is_some_and(matches) && doc.trimmed_text(*id) == text);
        if let Some(target) = target {
            move_instrumentation(doc, node, target);
        }
    }
    for (node, image) in sources.images.iter().zip(&content.images) {
        let is_image = |e: &ElementData| e.is("img") && e.attr("src") == Some(image.src.as_str());
        pair(doc, *node, &is_image);
    }
    for (node, link) in sources.links.iter().zip(&content.links) {
        let is_link = |e: &ElementData| e.is("a") && e.attr("href") == Some(link.href.as_str());
        pair(doc, *node, &is_link);
    }
}

/// Whether the container around `block` already carries the container class
/// this block resolves to.
///
/// Blocks of the same kind share a container, so a class applied for one
/// block says nothing about another block resolving to a different variant.
pub(crate) fn container_has_variant<R>(
    doc: &Document,
    block: NodeId,
    name: &str,
    table: &VariantTable<R>,
) -> bool {
    let Some(class) = table.resolve_block(doc, block).container_class else {
        return false;
    };
    doc.closest_with_class(block, &format!("{name}-container"))
        .is_some_and(|container| doc.has_class(container, class))
}

#[cfg(test)]
pub(crate) mod test_support {
    use bw_dom::{Document, NodeId};
    use url::Url;

    use crate::context::DecorateContext;
    use crate::decorator::BlockDecorator;

    /// Parse `html`, returning the document and the first element with `class`.
    pub(crate) fn parse_block(html: &str, class: &str) -> (Document, NodeId) {
        let doc = Document::parse(html);
        let block = doc.find(doc.root(), |e| e.has_class(class)).unwrap();
        (doc, block)
    }

    pub(crate) fn ctx() -> DecorateContext {
        DecorateContext::new(Url::parse("https://example.com/en/products/").unwrap())
    }

    /// Decorate twice through the sentinel check and assert the second pass is
    /// a no-op.
    pub(crate) fn assert_idempotent(decorator: &dyn BlockDecorator, html: &str, class: &str) {
        let (mut doc, block) = parse_block(html, class);
        let mut ctx = ctx();
        decorator.decorate(&mut doc, block, &mut ctx).unwrap();
        let once = doc.to_html();
        if !decorator.is_decorated(&doc, block) {
            decorator.decorate(&mut doc, block, &mut ctx).unwrap();
        }
        assert_eq!(doc.to_html(), once);
    }
}
