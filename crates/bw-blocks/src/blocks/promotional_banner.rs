//! Promotional banner: image + heading + description + up to two links.

use std::sync::LazyLock;

use bw_dom::builder::{a, div, h2, img, p};
use bw_dom::{Document, ElementSpec, NodeId, to_class_name};

use crate::content::{BlockContent, ImageRef, Viewport};
use crate::context::DecorateContext;
use crate::decorator::{BlockDecorator, DecorateError, has_child_with_class};
use crate::variant::{Variant, VariantTable};

use super::{Rendered, Renderer, render_variant};

const NAME: &str = "promotional-banner";
const CONTENT_CLASS: &str = "promotional-banner-content";

static VARIANTS: LazyLock<VariantTable<Renderer>> = LazyLock::new(|| {
    VariantTable::new(
        vec![
            Variant::new("type-1", "banner-varient1", render_stacked as Renderer),
            Variant::new("type-2", "banner-varient2", render_stacked),
            Variant::new("type-3", "banner-varient3", render_split),
            Variant::new("type-4", "banner-varient4", render_backdrop),
            Variant::plain("default", render_stacked),
        ],
        "default",
    )
    .unwrap()
});

/// `promotional-banner` block.
#[derive(Clone, Copy, Debug, Default)]
pub struct PromotionalBanner;

impl BlockDecorator for PromotionalBanner {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_decorated(&self, doc: &Document, block: NodeId) -> bool {
        has_child_with_class(doc, block, CONTENT_CLASS)
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

fn banner_image(image: Option<&ImageRef>, extra_class: &str) -> Option<ElementSpec> {
    let image = image?;
    Some(
        div().class("banner-image").class(extra_class).child(
            div().child(
                img()
                    .attr("loading", "eager")
                    .attr("fetchpriority", "high")
                    .attr("alt", image.alt.as_str())
                    .attr("src", image.src.as_str()),
            ),
        ),
    )
}

fn heading(content: &BlockContent) -> Option<ElementSpec> {
    let text = content.heading.as_deref()?;
    let id = to_class_name(text);
    Some(h2().attr_opt("id", (!id.is_empty()).then_some(id)).text(text))
}

fn redirections(content: &BlockContent) -> Option<ElementSpec> {
    let links: Vec<ElementSpec> = content
        .links
        .iter()
        .take(2)
        .filter(|l| !l.href.is_empty())
        .map(|l| {
            a().attr("href", l.href.as_str())
                .attr("title", l.title.as_str())
                .text(l.text.as_str())
        })
        .collect();
    if links.is_empty() {
        return None;
    }
    Some(p().class("redirections").children(links))
}

fn description(content: &BlockContent) -> Option<ElementSpec> {
    content.description.as_deref().map(|d| p().text(d))
}

/// Image above a content column.
fn render_stacked(content: &BlockContent, viewport: Viewport) -> Rendered {
    let body = div()
        .class("grid-content")
        .child_opt(heading(content))
        .child_opt(description(content))
        .child_opt(redirections(content));
    Rendered::new(vec![
        div()
            .class(CONTENT_CLASS)
            .child_opt(banner_image(content.image_for(viewport), ""))
            .child(div().class("banner-content").child(body)),
    ])
}

/// Heading, then image (mobile copy), then text and links.
fn render_split(content: &BlockContent, viewport: Viewport) -> Rendered {
    let image = content.image_for(viewport);
    let body = div()
        .class("grid-content")
        .child(div().child_opt(heading(content)))
        .child_opt(banner_image(image, "mob-img"))
        .child(
            div()
                .class("bottom-content")
                .child_opt(description(content))
                .child_opt(redirections(content)),
        );
    Rendered::new(vec![
        div()
            .class(CONTENT_CLASS)
            .child_opt(banner_image(image, "desktop-img"))
            .child(div().class("banner-content").child(body)),
    ])
}

/// Content only; the image becomes the container background.
fn render_backdrop(content: &BlockContent, viewport: Viewport) -> Rendered {
    let body = div()
        .class("grid-content")
        .child_opt(heading(content))
        .child_opt(description(content))
        .child_opt(redirections(content));
    let mut rendered = Rendered::new(vec![
        div()
            .class(CONTENT_CLASS)
            .child(div().class("banner-content").child(body)),
    ]);
    if let Some(image) = content.image_for(viewport) {
        rendered.container_style.push((
            "background",
            format!("url({}) center / cover no-repeat", image.src),
        ));
    }
    rendered
}
