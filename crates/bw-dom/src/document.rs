//! Arena-backed document tree.
//!
//! [`Document`] owns every node in an [`indextree::Arena`]. Nodes are addressed
//! by [`NodeId`], which stays valid while the node is detached, so transforms can
//! move authored content between elements without cloning it.

use indextree::{Arena, NodeId};

use crate::node::{ElementData, NodeData};

/// A mutable HTML document.
#[derive(Clone, Debug)]
pub struct Document {
    arena: Arena<NodeData>,
    root: NodeId,
    doctype: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::Document);
        Self {
            arena,
            root,
            doctype: None,
        }
    }

    /// Create a minimal `html`/`head`/`body` skeleton.
    #[must_use]
    pub fn skeleton() -> Self {
        let mut doc = Self::new();
        doc.doctype = Some("html".to_owned());
        let html = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.append(doc.root, html);
        doc.append(html, head);
        doc.append(html, body);
        doc
    }

    /// The document root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Doctype name, if the source declared one.
    #[must_use]
    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    pub(crate) fn set_doctype(&mut self, name: Option<String>) {
        self.doctype = name;
    }

    // ---------------------------------------------------------------------
    // Node creation and access
    // ---------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena
            .new_node(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a detached element from an existing payload.
    pub fn create_element_with(&mut self, data: ElementData) -> NodeId {
        self.arena.new_node(NodeData::Element(data))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.arena.new_node(NodeData::Text(text.into()))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.arena.new_node(NodeData::Comment(text.into()))
    }

    /// Payload of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    #[must_use]
    pub fn data(&self, id: NodeId) -> &NodeData {
        self.arena[id].get()
    }

    /// Element payload of a node, or `None` for non-elements.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.arena.get(id).and_then(|n| n.get().as_element())
    }

    /// Mutable element payload of a node, or `None` for non-elements.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.arena
            .get_mut(id)
            .and_then(|n| n.get_mut().as_element_mut())
    }

    /// Whether `id` is an element with the given tag.
    #[must_use]
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.element(id).is_some_and(|e| e.is(tag))
    }

    /// Lowercase tag name of an element node.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::tag)
    }

    // ---------------------------------------------------------------------
    // Attributes and classes
    // ---------------------------------------------------------------------

    /// Attribute value on an element.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Set an attribute on an element. No-op for non-elements.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    /// Remove an attribute from an element.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id)?.remove_attr(name)
    }

    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Add a class to an element.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.add_class(class);
        }
    }

    /// Remove a class from an element.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.remove_class(class);
        }
    }

    /// Hide an element without removing it (`display: none`).
    pub fn hide(&mut self, id: NodeId) {
        if let Some(el) = self.element_mut(id) {
            el.set_style_property("display", "none");
        }
    }

    /// Undo [`hide`](Self::hide).
    pub fn show(&mut self, id: NodeId) {
        if let Some(el) = self.element_mut(id) {
            el.set_style_property("display", "");
        }
    }

    /// Whether the element is hidden through its inline style.
    #[must_use]
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.element(id)
            .and_then(|e| e.style_property("display"))
            .is_some_and(|d| d == "none")
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id)?.parent()
    }

    /// All child nodes, including text and comments.
    #[must_use]
    pub fn child_nodes(&self, id: NodeId) -> Vec<NodeId> {
        id.children(&self.arena).collect()
    }

    /// Element children in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        id.children(&self.arena)
            .filter(|c| self.element(*c).is_some())
            .collect()
    }

    /// First element child.
    #[must_use]
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        id.children(&self.arena).find(|c| self.element(*c).is_some())
    }

    /// Element child at `index`, counting only elements.
    #[must_use]
    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        id.children(&self.arena)
            .filter(|c| self.element(*c).is_some())
            .nth(index)
    }

    /// Descendant nodes of `scope` in document order, excluding `scope`.
    pub fn descendants(&self, scope: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        scope.descendants(&self.arena).skip(1)
    }

    /// First descendant element of `scope` matching `pred`.
    pub fn find(&self, scope: NodeId, pred: impl Fn(&ElementData) -> bool) -> Option<NodeId> {
        self.descendants(scope)
            .find(|id| self.element(*id).is_some_and(&pred))
    }

    /// All descendant elements of `scope` matching `pred`, in document order.
    pub fn find_all(&self, scope: NodeId, pred: impl Fn(&ElementData) -> bool) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|id| self.element(*id).is_some_and(&pred))
            .collect()
    }

    /// Element children of `scope` matching `pred`.
    pub fn children_matching(
        &self,
        scope: NodeId,
        pred: impl Fn(&ElementData) -> bool,
    ) -> Vec<NodeId> {
        id_children_matching(self, scope, pred)
    }

    /// Nearest inclusive ancestor element matching `pred` (DOM `closest`).
    pub fn closest(&self, id: NodeId, pred: impl Fn(&ElementData) -> bool) -> Option<NodeId> {
        id.ancestors(&self.arena)
            .find(|a| self.element(*a).is_some_and(&pred))
    }

    /// Nearest inclusive ancestor carrying `class`.
    #[must_use]
    pub fn closest_with_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.closest(id, |e| e.has_class(class))
    }

    /// Whether `ancestor` is an inclusive ancestor of `id`.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        id.ancestors(&self.arena).any(|a| a == ancestor)
    }

    /// Whether the node is connected to the document root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    /// Element with the given `id` attribute.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find(self.root, |e| e.id() == Some(id))
    }

    /// First element with the given tag anywhere in the document.
    #[must_use]
    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find(self.root, |e| e.is(tag))
    }

    /// The `<html>` element.
    #[must_use]
    pub fn html(&self) -> Option<NodeId> {
        self.first_by_tag("html")
    }

    /// The `<head>` element.
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.first_by_tag("head")
    }

    /// The `<body>` element.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.first_by_tag("body")
    }

    /// The `<main>` element.
    #[must_use]
    pub fn main(&self) -> Option<NodeId> {
        self.first_by_tag("main")
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in id.descendants(&self.arena) {
            if let NodeData::Text(text) = self.arena[node].get() {
                out.push_str(text);
            }
        }
        out
    }

    /// Trimmed text content.
    #[must_use]
    pub fn trimmed_text(&self, id: NodeId) -> String {
        self.text_content(id).trim().to_owned()
    }

    // ---------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        child.detach(&mut self.arena);
        parent.append(child, &mut self.arena);
    }

    /// Insert `child` as the first child of `parent`, detaching it first.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) {
        child.detach(&mut self.arena);
        parent.prepend(child, &mut self.arena);
    }

    /// Insert `node` immediately before `reference`.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        if reference == node {
            return;
        }
        node.detach(&mut self.arena);
        reference.insert_before(node, &mut self.arena);
    }

    /// Detach a node (and its subtree) from its parent, keeping it alive.
    pub fn detach(&mut self, id: NodeId) {
        id.detach(&mut self.arena);
    }

    /// Remove a node and its subtree from the document.
    pub fn remove(&mut self, id: NodeId) {
        id.remove_subtree(&mut self.arena);
    }

    /// Put `replacement` where `old` was and detach `old`.
    pub fn replace_with(&mut self, old: NodeId, replacement: NodeId) {
        if old == replacement {
            return;
        }
        if self.parent(old).is_some() {
            self.insert_before(old, replacement);
        }
        old.detach(&mut self.arena);
    }

    /// Remove every child node of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.child_nodes(id) {
            child.remove_subtree(&mut self.arena);
        }
    }

    /// Replace every child node of `parent` with `children`, in order.
    ///
    /// Nodes listed in `children` that currently live under `parent` are kept
    /// alive and reattached; all other former children are removed.
    pub fn replace_children(&mut self, parent: NodeId, children: &[NodeId]) {
        for child in children {
            child.detach(&mut self.arena);
        }
        self.clear_children(parent);
        for child in children {
            parent.append(*child, &mut self.arena);
        }
    }

    /// Move every child node of `from` to the end of `to`.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        for child in self.child_nodes(from) {
            self.append(to, child);
        }
    }

    /// Replace all children of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: impl Into<String>) {
        self.clear_children(id);
        let text = text.into();
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append(id, node);
        }
    }

    /// Deep copy a subtree within this document. The copy is detached.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let data = self.arena[id].get().clone();
        let copy = self.arena.new_node(data);
        for child in self.child_nodes(id) {
            let child_copy = self.clone_subtree(child);
            copy.append(child_copy, &mut self.arena);
        }
        copy
    }

    /// Deep copy a subtree from another document into this one. The copy is detached.
    pub fn import(&mut self, other: &Self, id: NodeId) -> NodeId {
        let copy = self.arena.new_node(other.data(id).clone());
        for child in other.child_nodes(id) {
            let child_copy = self.import(other, child);
            copy.append(child_copy, &mut self.arena);
        }
        copy
    }

    pub(crate) fn arena(&self) -> &Arena<NodeData> {
        &self.arena
    }
}

fn id_children_matching(
    doc: &Document,
    scope: NodeId,
    pred: impl Fn(&ElementData) -> bool,
) -> Vec<NodeId> {
    doc.child_nodes(scope)
        .into_iter()
        .filter(|c| doc.element(*c).is_some_and(&pred))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with_items(doc: &mut Document, n: usize) -> (NodeId, Vec<NodeId>) {
        let ul = doc.create_element("ul");
        let items = (0..n)
            .map(|i| {
                let li = doc.create_element("li");
                let text = doc.create_text(format!("item {i}"));
                doc.append(li, text);
                doc.append(ul, li);
                li
            })
            .collect();
        (ul, items)
    }

    #[test]
    fn test_skeleton_has_head_and_body() {
        let doc = Document::skeleton();
        assert!(doc.head().is_some());
        assert!(doc.body().is_some());
        assert!(doc.main().is_none());
    }

    #[test]
    fn test_append_moves_existing_node() {
        let mut doc = Document::new();
        let (ul, items) = list_with_items(&mut doc, 3);
        doc.append(ul, items[0]);

        let order: Vec<String> = doc
            .children(ul)
            .into_iter()
            .map(|c| doc.text_content(c))
            .collect();
        assert_eq!(order, vec!["item 1", "item 2", "item 0"]);
    }

    #[test]
    fn test_replace_with_keeps_position() {
        let mut doc = Document::new();
        let (ul, items) = list_with_items(&mut doc, 3);
        let replacement = doc.create_element("details");
        doc.replace_with(items[1], replacement);

        let children = doc.children(ul);
        assert_eq!(children[1], replacement);
        assert!(doc.parent(items[1]).is_none());
    }

    #[test]
    fn test_closest_is_inclusive() {
        let mut doc = Document::new();
        let (ul, items) = list_with_items(&mut doc, 1);
        doc.add_class(ul, "cards");
        assert_eq!(doc.closest_with_class(items[0], "cards"), Some(ul));
        assert_eq!(doc.closest_with_class(ul, "cards"), Some(ul));
        assert_eq!(doc.closest_with_class(ul, "missing"), None);
    }

    #[test]
    fn test_replace_children_reuses_nodes() {
        let mut doc = Document::new();
        let (ul, items) = list_with_items(&mut doc, 3);
        doc.replace_children(ul, &[items[2], items[0]]);

        assert_eq!(doc.children(ul), vec![items[2], items[0]]);
        assert!(items[1].is_removed(doc.arena()));
    }

    #[test]
    fn test_clone_subtree_is_deep_and_detached() {
        let mut doc = Document::new();
        let (ul, _) = list_with_items(&mut doc, 2);
        let copy = doc.clone_subtree(ul);

        assert!(doc.parent(copy).is_none());
        assert_eq!(doc.text_content(copy), doc.text_content(ul));
        assert_ne!(doc.children(copy), doc.children(ul));
    }

    #[test]
    fn test_hide_sets_display_none() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.hide(div);
        assert!(doc.is_hidden(div));

        doc.show(div);
        assert!(!doc.is_hidden(div));
        assert_eq!(doc.attr(div, "style"), None);
    }

    #[test]
    fn test_is_attached() {
        let mut doc = Document::skeleton();
        let body = doc.body().unwrap();
        let div = doc.create_element("div");
        assert!(!doc.is_attached(div));
        doc.append(body, div);
        assert!(doc.is_attached(div));
    }
}
