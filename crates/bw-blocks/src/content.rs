//! Authored content extracted from a block before rendering.
//!
//! Renderers never read the DOM directly: the decorator extracts a
//! [`BlockContent`] snapshot, clears the block and hands the snapshot to a pure
//! renderer. Missing pieces are simply absent, so renderers degrade to empty
//! output instead of failing.

use bw_dom::{Document, NodeId};

/// Viewport the page is rendered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: u32,
}

impl Viewport {
    /// Widths above this are treated as desktop.
    pub const DESKTOP_MIN_WIDTH: u32 = 1024;

    #[must_use]
    pub const fn new(width: u32) -> Self {
        Self { width }
    }

    #[must_use]
    pub const fn is_desktop(self) -> bool {
        self.width > Self::DESKTOP_MIN_WIDTH
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1440)
    }
}

/// An authored image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

/// An authored link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkRef {
    pub href: String,
    pub title: String,
    pub text: String,
}

/// Snapshot of the authored pieces of a block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockContent {
    /// Images in document order.
    pub images: Vec<ImageRef>,
    /// Text of the first heading.
    pub heading: Option<String>,
    /// Text of the first paragraph that is not a link or picture holder.
    pub description: Option<String>,
    /// Links in document order.
    pub links: Vec<LinkRef>,
    /// Authored nodes the pieces above were read from.
    pub sources: ContentSources,
}

/// Authored nodes behind a [`BlockContent`].
///
/// `images` and `links` are index-aligned with their counterparts in
/// [`BlockContent`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentSources {
    pub rows: Vec<NodeId>,
    pub heading: Option<NodeId>,
    pub description: Option<NodeId>,
    pub images: Vec<NodeId>,
    pub links: Vec<NodeId>,
}

impl BlockContent {
    /// Extract content from the subtree of `block`.
    #[must_use]
    pub fn extract(doc: &Document, block: NodeId) -> Self {
        let (image_nodes, images): (Vec<NodeId>, Vec<ImageRef>) = doc
            .find_all(block, |e| e.is("img"))
            .into_iter()
            .map(|img| {
                let image = ImageRef {
                    src: doc.attr(img, "src").unwrap_or_default().trim().to_owned(),
                    alt: doc.attr(img, "alt").unwrap_or_default().to_owned(),
                };
                (img, image)
            })
            .filter(|(_, image)| !image.src.is_empty())
            .unzip();

        let heading = doc
            .find(block, bw_dom::ElementData::is_heading)
            .map(|h| (h, doc.trimmed_text(h)))
            .filter(|(_, text)| !text.is_empty());

        let description = doc
            .find_all(block, |e| e.is("p"))
            .into_iter()
            .filter(|p| doc.find(*p, |e| e.is("a") || e.is("picture")).is_none())
            .map(|p| (p, doc.trimmed_text(p)))
            .find(|(_, text)| !text.is_empty());

        let (link_nodes, links): (Vec<NodeId>, Vec<LinkRef>) = doc
            .find_all(block, |e| e.is("a"))
            .into_iter()
            .map(|a| {
                let link = LinkRef {
                    href: doc.attr(a, "href").unwrap_or_default().trim().to_owned(),
                    title: doc.attr(a, "title").unwrap_or_default().trim().to_owned(),
                    text: doc.trimmed_text(a),
                };
                (a, link)
            })
            .unzip();

        Self {
            images,
            heading: heading.as_ref().map(|(_, text)| text.clone()),
            description: description.as_ref().map(|(_, text)| text.clone()),
            links,
            sources: ContentSources {
                rows: doc.children(block),
                heading: heading.map(|(node, _)| node),
                description: description.map(|(node, _)| node),
                images: image_nodes,
                links: link_nodes,
            },
        }
    }

    /// Image for the viewport: the first on desktop, the second (when
    /// authored) on smaller screens.
    #[must_use]
    pub fn image_for(&self, viewport: Viewport) -> Option<&ImageRef> {
        if viewport.is_desktop() {
            self.images.first()
        } else {
            self.images.get(1).or_else(|| self.images.first())
        }
    }

    /// Link at `index`, or an empty link.
    #[must_use]
    pub fn link(&self, index: usize) -> LinkRef {
        self.links.get(index).cloned().unwrap_or_default()
    }

    /// Heading text, or empty.
    #[must_use]
    pub fn heading_text(&self) -> &str {
        self.heading.as_deref().unwrap_or_default()
    }

    /// Description text, or empty.
    #[must_use]
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}
