//! HTML parsing into the arena document.

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use indextree::NodeId;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::document::Document;
use crate::node::ElementData;

impl Document {
    /// Parse a full HTML document.
    ///
    /// Parsing follows the HTML5 tree construction algorithm, so fragments such
    /// as `.plain.html` bodies are wrapped into `html`/`head`/`body`.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        let mut doc = Self::new();
        let root = doc.root();
        for child in dom.document.children.borrow().iter() {
            convert_node(&mut doc, child, root);
        }
        doc
    }

    /// Parse an HTML fragment and append its body content to `parent`.
    ///
    /// Returns the appended top-level nodes in order.
    pub fn append_html(&mut self, parent: NodeId, html: &str) -> Vec<NodeId> {
        let fragment = Self::parse(html);
        let Some(body) = fragment.body() else {
            return Vec::new();
        };
        fragment
            .child_nodes(body)
            .into_iter()
            .map(|child| {
                let imported = self.import(&fragment, child);
                self.append(parent, imported);
                imported
            })
            .collect()
    }
}

fn convert_node(doc: &mut Document, handle: &Handle, parent: NodeId) {
    match &handle.data {
        RcNodeData::Doctype { name, .. } => {
            doc.set_doctype(Some(name.to_string()));
        }
        RcNodeData::Text { contents } => {
            let text = doc.create_text(contents.borrow().to_string());
            doc.append(parent, text);
        }
        RcNodeData::Comment { contents } => {
            let comment = doc.create_comment(contents.to_string());
            doc.append(parent, comment);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let mut data = ElementData::new(&name.local);
            for attr in attrs.borrow().iter() {
                data.set_attr(&attr.name.local, attr.value.to_string());
            }
            let node = doc.create_element_with(data);
            doc.append(parent, node);
            for child in handle.children.borrow().iter() {
                convert_node(doc, child, node);
            }
        }
        RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => {}
    }
}
