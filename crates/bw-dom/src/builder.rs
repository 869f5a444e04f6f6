//! Declarative element construction.
//!
//! Renderers describe the tree they want as an [`ElementSpec`] and the caller
//! attaches it with [`Document::build`]. Existing nodes (authored pictures,
//! moved rows) are embedded with [`ElementSpec::node`] so they are moved rather
//! than copied.
//!
//! ```
//! use bw_dom::{Document, builder::{div, p}};
//!
//! let mut doc = Document::new();
//! let id = doc.build(div().class("banner-content").child(p().text("Hello")));
//! assert_eq!(doc.outer_html(id), r#"<div class="banner-content"><p>Hello</p></div>"#);
//! ```

use indextree::NodeId;

use crate::document::Document;
use crate::node::ElementData;

/// A child entry of an [`ElementSpec`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChildSpec {
    /// A new element.
    Element(ElementSpec),
    /// A new text node.
    Text(String),
    /// An existing node, moved into place when built.
    Node(NodeId),
}

/// Description of an element to create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementSpec {
    data: ElementData,
    children: Vec<ChildSpec>,
}

impl ElementSpec {
    /// Start a spec for `tag`.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            data: ElementData::new(tag),
            children: Vec::new(),
        }
    }

    /// Add a class (ignored when empty).
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        for token in class.split_ascii_whitespace() {
            self.data.add_class(token);
        }
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.data.set_attr(name, value);
        self
    }

    /// Set an attribute only when `value` is present.
    #[must_use]
    pub fn attr_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Set one inline style declaration.
    #[must_use]
    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.data.set_style_property(property, value);
        self
    }

    /// Append a text child (ignored when empty).
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(ChildSpec::Text(text));
        }
        self
    }

    /// Append an element child.
    #[must_use]
    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(ChildSpec::Element(child));
        self
    }

    /// Append an element child when present.
    #[must_use]
    pub fn child_opt(self, child: Option<ElementSpec>) -> Self {
        match child {
            Some(c) => self.child(c),
            None => self,
        }
    }

    /// Append several element children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children
            .extend(children.into_iter().map(ChildSpec::Element));
        self
    }

    /// Move an existing node into this element when built.
    #[must_use]
    pub fn node(mut self, node: NodeId) -> Self {
        self.children.push(ChildSpec::Node(node));
        self
    }

    /// Move an existing node into this element when present.
    #[must_use]
    pub fn node_opt(self, node: Option<NodeId>) -> Self {
        match node {
            Some(n) => self.node(n),
            None => self,
        }
    }

    /// Move several existing nodes into this element.
    #[must_use]
    pub fn nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.children.extend(nodes.into_iter().map(ChildSpec::Node));
        self
    }

    /// Tag of the element to create.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.data.tag()
    }

    /// Element payload (tag and attributes) to create.
    #[must_use]
    pub fn data(&self) -> &ElementData {
        &self.data
    }
}

impl Document {
    /// Create the element tree described by `spec`. The new root is detached.
    pub fn build(&mut self, spec: ElementSpec) -> NodeId {
        let ElementSpec { data, children } = spec;
        let node = self.create_element_with(data);
        for child in children {
            let child = match child {
                ChildSpec::Element(spec) => self.build(spec),
                ChildSpec::Text(text) => self.create_text(text),
                ChildSpec::Node(existing) => existing,
            };
            self.append(node, child);
        }
        node
    }

    /// Build `spec` and append it to `parent`.
    pub fn build_into(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let node = self.build(spec);
        self.append(parent, node);
        node
    }
}

/// Start a spec for an arbitrary tag.
#[must_use]
pub fn el(tag: &str) -> ElementSpec {
    ElementSpec::new(tag)
}

macro_rules! tag_helpers {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Start a `<", stringify!($name), ">` spec.")]
            #[must_use]
            pub fn $name() -> ElementSpec {
                ElementSpec::new(stringify!($name))
            }
        )*
    };
}

tag_helpers!(
    a, button, details, div, h2, h3, img, li, p, picture, section, source, span, strong, summary,
    ul,
);
