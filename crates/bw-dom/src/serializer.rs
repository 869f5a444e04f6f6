//! HTML serialization.

use std::fmt::Write;

use indextree::NodeId;

use crate::document::Document;
use crate::node::NodeData;

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Escape text content for HTML.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for a double-quoted attribute.
#[must_use]
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

impl Document {
    /// Serialize the whole document, including the doctype.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(name) = self.doctype() {
            let _ = write!(out, "<!DOCTYPE {name}>");
        }
        for child in self.child_nodes(self.root()) {
            self.write_node(child, false, &mut out);
        }
        out
    }

    /// Serialize a node including its own tag.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, false, &mut out);
        out
    }

    /// Serialize the children of a node.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let raw = self
            .element(id)
            .is_some_and(|e| RAW_TEXT_ELEMENTS.contains(&e.tag()));
        let mut out = String::new();
        for child in self.child_nodes(id) {
            self.write_node(child, raw, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, raw_parent: bool, out: &mut String) {
        match self.data(id) {
            NodeData::Document => {
                for child in self.child_nodes(id) {
                    self.write_node(child, false, out);
                }
            }
            NodeData::Text(text) => {
                if raw_parent {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            NodeData::Comment(text) => {
                let _ = write!(out, "<!--{text}-->");
            }
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(el.tag());
                for (name, value) in el.attrs() {
                    let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&el.tag()) {
                    return;
                }
                let raw = RAW_TEXT_ELEMENTS.contains(&el.tag());
                for child in self.child_nodes(id) {
                    self.write_node(child, raw, out);
                }
                let _ = write!(out, "</{}>", el.tag());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let mut doc = Document::new();
        let picture = doc.create_element("picture");
        let img = doc.create_element("img");
        doc.set_attr(img, "src", "/a.png");
        doc.set_attr(img, "alt", "");
        doc.append(picture, img);

        assert_eq!(
            doc.outer_html(picture),
            "<picture><img src=\"/a.png\" alt=\"\"></picture>"
        );
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.set_attr(p, "title", "a \"b\" & c");
        let text = doc.create_text("1 < 2 & 3");
        doc.append(p, text);

        assert_eq!(
            doc.outer_html(p),
            "<p title=\"a &quot;b&quot; &amp; c\">1 &lt; 2 &amp; 3</p>"
        );
    }

    #[test]
    fn test_style_content_is_raw() {
        let mut doc = Document::new();
        let style = doc.create_element("style");
        doc.set_text_content(style, ":root {\n  --a: \"x\" > y;\n}");

        assert_eq!(
            doc.outer_html(style),
            "<style>:root {\n  --a: \"x\" > y;\n}</style>"
        );
    }

    #[test]
    fn test_parse_serialize_round_trip() {
        let html = "<!DOCTYPE html><html><head></head><body><main><div><p>Hi</p></div></main></body></html>";
        assert_eq!(Document::parse(html).to_html(), html);
    }
}
