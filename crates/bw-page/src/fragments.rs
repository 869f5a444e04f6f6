//! Header and footer fragments.

use bw_blocks::{BLOCK_NAME_ATTR, BLOCK_STATUS_ATTR};
use bw_config::PageConfig;
use bw_dom::builder::div;
use bw_dom::{Document, NodeId};
use url::Url;

use crate::metadata::metadata;
use crate::sections::{decorate_blocks, decorate_sections};

/// A page region filled from a separately authored document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fragment {
    Header,
    Footer,
}

impl Fragment {
    /// Block name, also the tag of the container element.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
        }
    }

    fn meta_name(self) -> &'static str {
        match self {
            Self::Header => "nav",
            Self::Footer => "footer",
        }
    }

    /// Site path of the fragment: the page's `nav`/`footer` metadata, or the
    /// configured default.
    #[must_use]
    pub fn path(self, doc: &Document, page_url: &Url, config: &PageConfig) -> String {
        metadata(doc, self.meta_name())
            .and_then(|m| page_url.join(m.trim()).ok())
            .map(|u| u.path().to_owned())
            .unwrap_or_else(|| match self {
                Self::Header => config.nav.clone(),
                Self::Footer => config.footer.clone(),
            })
    }

    /// The container element (`<header>` or `<footer>`).
    #[must_use]
    pub fn container(self, doc: &Document) -> Option<NodeId> {
        doc.first_by_tag(self.name())
    }

    /// The mounted fragment block inside `container`, if any.
    #[must_use]
    pub fn mounted(self, doc: &Document, container: NodeId) -> Option<NodeId> {
        doc.children_matching(container, |e| e.attr(BLOCK_NAME_ATTR) == Some(self.name()))
            .into_iter()
            .next()
    }

    /// Mount fragment HTML into `container` as a block whose content is
    /// marked into sections and blocks, ready for decoration.
    pub fn mount(self, doc: &mut Document, container: NodeId, html: &str) -> NodeId {
        let block = doc.build_into(
            container,
            div()
                .class(self.name())
                .class("block")
                .attr(BLOCK_NAME_ATTR, self.name())
                .attr(BLOCK_STATUS_ATTR, "loading"),
        );
        doc.append_html(block, html);
        decorate_sections(doc, block);
        decorate_blocks(doc, block);
        block
    }
}

/// Rendered-fragment location of a site path.
#[must_use]
pub fn fragment_document(path: &str) -> String {
    format!("{}.plain.html", path.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_path_from_metadata_or_config() {
        let url = Url::parse("https://example.com/en/cards").unwrap();
        let config = PageConfig::default();

        let doc = Document::parse(r#"<html><head><meta name="nav" content="/en/nav"></head></html>"#);
        assert_eq!(Fragment::Header.path(&doc, &url, &config), "/en/nav");
        assert_eq!(Fragment::Footer.path(&doc, &url, &config), "/footer");

        let doc = Document::parse(
            r#"<html><head><meta name="footer" content="https://example.com/fr/footer?x=1"></head></html>"#,
        );
        assert_eq!(Fragment::Footer.path(&doc, &url, &config), "/fr/footer");
        assert_eq!(fragment_document("/fr/footer/"), "/fr/footer.plain.html");
    }

    #[test]
    fn test_mount_marks_content() {
        let mut doc = Document::parse("<html><body><header></header></body></html>");
        let header = Fragment::Header.container(&doc).unwrap();
        let block = Fragment::Header.mount(
            &mut doc,
            header,
            r#"<div><p>Logo</p></div><div><div class="tabs"><div><div>A</div></div></div></div>"#,
        );

        assert_eq!(Fragment::Header.mounted(&doc, header), Some(block));
        assert_eq!(doc.attr(block, "class"), Some("header block"));
        let tabs = doc.find(block, |e| e.has_class("tabs")).unwrap();
        assert_eq!(doc.attr(tabs, BLOCK_STATUS_ATTR), Some("initialized"));
        assert_eq!(doc.find_all(block, |e| e.has_class("section")).len(), 2);
    }
}
