//! Cards: rows become list items, optionally arranged as a carousel.
//!
//! Each authored row has up to four cells: image, body, card style and CTA
//! style. The two style cells stay in the markup (hidden) so authors can still
//! edit them in place.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use bw_dom::builder::{div, ul};
use bw_dom::{Document, NodeId, move_instrumentation};
use serde::Serialize;

use crate::context::DecorateContext;
use crate::decorator::{BlockDecorator, DecorateError, has_child_with_class};
use crate::picture::{Breakpoint, optimized_picture};
use crate::variant::{Variant, VariantTable};

const NAME: &str = "cards";

/// Attribute carrying the serialized [`Carousel`] settings.
pub const CAROUSEL_ATTR: &str = "data-carousel";

/// CTA classes an author may have left on a button container.
const CTA_CLASSES: &[&str] = &[
    "default",
    "cta-button",
    "cta-button-secondary",
    "cta-button-dark",
    "cta-default",
];

const CARD_IMAGE_BREAKPOINTS: &[Breakpoint] = &[Breakpoint::any(750)];

/// Carousel variants keyed by a class on the section container.
static CAROUSELS: LazyLock<VariantTable<fn() -> Carousel>> = LazyLock::new(|| {
    VariantTable::new(
        vec![
            Variant::plain("blog-cards", Carousel::blog_cards as fn() -> Carousel),
            Variant::plain("blog-cards2", Carousel::blog_cards2),
            Variant::plain("product-variant1", Carousel::product),
        ],
        "blog-cards",
    )
    .unwrap()
});

/// Slider settings handed to the client-side carousel.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    pub slides_per_view: f64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub observer: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub observe_parents: bool,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub breakpoints: BTreeMap<u32, SlidesPerView>,
}

/// Pagination settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub el: String,
    pub clickable: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            el: ".swiper-pagination".to_owned(),
            clickable: true,
            kind: "bullets".to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidesPerView {
    pub slides_per_view: f64,
}

impl Carousel {
    fn responsive(widest: f64) -> BTreeMap<u32, SlidesPerView> {
        [(0, 1.0), (375, 1.5), (767, 2.0), (1024, widest)]
            .into_iter()
            .map(|(min, slides_per_view)| (min, SlidesPerView { slides_per_view }))
            .collect()
    }

    /// Three cards on desktop.
    #[must_use]
    pub fn blog_cards() -> Self {
        Self {
            slides_per_view: 3.0,
            observer: true,
            observe_parents: true,
            pagination: Pagination::default(),
            breakpoints: Self::responsive(3.0),
        }
    }

    /// Two and a half cards on desktop.
    #[must_use]
    pub fn blog_cards2() -> Self {
        Self {
            slides_per_view: 2.5,
            observer: false,
            observe_parents: false,
            pagination: Pagination::default(),
            breakpoints: Self::responsive(2.5),
        }
    }

    /// One product per slide at every width.
    #[must_use]
    pub fn product() -> Self {
        Self {
            slides_per_view: 1.0,
            observer: false,
            observe_parents: false,
            pagination: Pagination::default(),
            breakpoints: BTreeMap::new(),
        }
    }

    /// Carousel selected by the classes of the block's section container.
    #[must_use]
    pub fn for_block(doc: &Document, block: NodeId) -> Option<Self> {
        let container = doc.closest_with_class(block, "cards-container")?;
        let classes = doc.element(container)?.classes();
        CAROUSELS.matched(classes).map(|v| (v.render)())
    }
}

/// `cards` block.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cards;

impl BlockDecorator for Cards {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_decorated(&self, doc: &Document, block: NodeId) -> bool {
        doc.children(block).iter().any(|c| doc.is_tag(*c, "ul"))
    }

    fn decorate(
        &self,
        doc: &mut Document,
        block: NodeId,
        ctx: &mut DecorateContext,
    ) -> Result<(), DecorateError> {
        let list = doc.build(ul());
        for row in doc.children(block) {
            let item = decorate_row(doc, row);
            doc.append(list, item);
        }
        optimize_pictures(doc, list, ctx);

        doc.clear_children(block);
        doc.append(block, list);

        if let Some(carousel) = Carousel::for_block(doc, block) {
            doc.add_class(block, "swiper");
            doc.add_class(list, "swiper-wrapper");
            for item in doc.children(list) {
                doc.add_class(item, "swiper-slide");
            }
            if !has_child_with_class(doc, block, "swiper-pagination") {
                doc.build_into(block, div().class("swiper-pagination"));
            }
            doc.set_attr(block, CAROUSEL_ATTR, serde_json::to_string(&carousel)?);
        }
        Ok(())
    }
}

fn cell_setting(doc: &Document, cell: Option<NodeId>) -> String {
    cell.and_then(|c| doc.find(c, |e| e.is("p")))
        .map(|p| doc.trimmed_text(p))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "default".to_owned())
}

fn decorate_row(doc: &mut Document, row: NodeId) -> NodeId {
    let cells = doc.children(row);
    let card_style = cell_setting(doc, cells.get(2).copied());
    let cta_style = cell_setting(doc, cells.get(3).copied());

    let item = doc.create_element("li");
    if card_style != "default" {
        doc.set_attr(item, "class", card_style);
    }
    move_instrumentation(doc, row, item);

    for (index, cell) in cells.into_iter().enumerate() {
        doc.append(item, cell);
        let class = match index {
            0 => "cards-card-image",
            2 | 3 => "cards-config",
            _ => "cards-card-body",
        };
        doc.set_attr(cell, "class", class);
        if class == "cards-config" {
            if let Some(p) = doc.find(cell, |e| e.is("p")) {
                doc.hide(p);
            }
        }
    }

    for container in doc.find_all(item, |e| e.is("p") && e.has_class("button-container")) {
        for class in CTA_CLASSES {
            doc.remove_class(container, class);
        }
        doc.add_class(container, &cta_style);
    }
    item
}

fn optimize_pictures(doc: &mut Document, list: NodeId, ctx: &DecorateContext) {
    let images = doc.find_all(list, |e| e.is("img"));
    for img in images {
        let Some(picture) = doc.parent(img).filter(|p| doc.is_tag(*p, "picture")) else {
            continue;
        };
        let src = doc.attr(img, "src").unwrap_or_default().to_owned();
        let alt = doc.attr(img, "alt").unwrap_or_default().to_owned();
        let optimized = doc.build(optimized_picture(
            &ctx.page_url,
            &src,
            &alt,
            false,
            CARD_IMAGE_BREAKPOINTS,
        ));
        if let Some(new_img) = doc.find(optimized, |e| e.is("img")) {
            move_instrumentation(doc, img, new_img);
        }
        doc.replace_with(picture, optimized);
    }
}
