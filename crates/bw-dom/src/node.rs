//! Node payloads stored in the document arena.

/// Payload of a single arena node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    /// The document root. Exactly one per [`Document`](crate::Document).
    Document,
    /// An element with its tag and attributes.
    Element(ElementData),
    /// A text run.
    Text(String),
    /// An HTML comment.
    Comment(String),
}

impl NodeData {
    /// Element payload, if this node is an element.
    #[must_use]
    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutable element payload, if this node is an element.
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// Tag name and ordered attribute list of an element.
///
/// Tag names are stored lowercase. Attribute order is preserved so that
/// serialized output stays stable across decoration passes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
}

impl ElementData {
    /// Create an element payload with no attributes.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the tag name equals `tag` (ASCII case-insensitive).
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Whether the tag is one of `h1`..`h6`.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        matches!(self.tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the attribute is present (with any value, including empty).
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_owned(), value));
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k == name)?;
        Some(self.attrs.remove(pos).1)
    }

    /// Attributes in source order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attribute names in source order.
    #[must_use]
    pub fn attr_names(&self) -> Vec<String> {
        self.attrs.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Value of the `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Class tokens in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// First class token, which names the block for authored block elements.
    #[must_use]
    pub fn first_class(&self) -> Option<&str> {
        self.classes().next()
    }

    /// Append `class` to the class list unless already present.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_owned(),
        };
        self.set_attr("class", joined);
    }

    /// Remove every occurrence of `class` from the class list.
    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let kept: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        let joined = kept.join(" ");
        self.set_attr("class", joined);
    }

    /// Replace the whole class list.
    pub fn set_class(&mut self, classes: &str) {
        self.set_attr("class", classes);
    }

    /// Set one declaration inside the inline `style` attribute.
    ///
    /// An empty `value` removes the property.
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        let mut decls: Vec<(String, String)> = self
            .attr("style")
            .unwrap_or("")
            .split(';')
            .filter_map(|decl| {
                let (k, v) = decl.split_once(':')?;
                Some((k.trim().to_owned(), v.trim().to_owned()))
            })
            .filter(|(k, _)| !k.is_empty() && k != property)
            .collect();
        if !value.is_empty() {
            decls.push((property.to_owned(), value.to_owned()));
        }
        if decls.is_empty() {
            self.remove_attr("style");
        } else {
            let style = decls
                .iter()
                .map(|(k, v)| format!("{k}: {v};"))
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attr("style", style);
        }
    }

    /// Value of one declaration inside the inline `style` attribute.
    #[must_use]
    pub fn style_property(&self, property: &str) -> Option<String> {
        self.attr("style")?.split(';').find_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            (k.trim() == property).then(|| v.trim().to_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_is_lowercased() {
        let el = ElementData::new("DIV");
        assert_eq!(el.tag(), "div");
        assert!(el.is("Div"));
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut el = ElementData::new("a");
        el.set_attr("href", "/one");
        el.set_attr("title", "One");
        el.set_attr("href", "/two");

        let attrs: Vec<_> = el.attrs().collect();
        assert_eq!(attrs, vec![("href", "/two"), ("title", "One")]);
    }

    #[test]
    fn test_add_class_is_idempotent() {
        let mut el = ElementData::new("div");
        el.add_class("section");
        el.add_class("section");
        el.add_class("dark");
        assert_eq!(el.attr("class"), Some("section dark"));
    }

    #[test]
    fn test_remove_class() {
        let mut el = ElementData::new("p");
        el.set_class("button-container default cta-button");
        el.remove_class("default");
        assert_eq!(el.attr("class"), Some("button-container cta-button"));
        assert!(!el.has_class("default"));
    }

    #[test]
    fn test_first_class() {
        let mut el = ElementData::new("div");
        el.set_class("cards blog-cards");
        assert_eq!(el.first_class(), Some("cards"));
    }

    #[test]
    fn test_set_style_property() {
        let mut el = ElementData::new("div");
        el.set_attr("style", "color: red;");
        el.set_style_property("display", "none");
        assert_eq!(el.attr("style"), Some("color: red; display: none;"));
        assert_eq!(el.style_property("display").as_deref(), Some("none"));

        el.set_style_property("display", "");
        el.set_style_property("color", "");
        assert!(!el.has_attr("style"));
    }
}
