//! Transfer of authoring attributes between elements.
//!
//! The authoring tool maps DOM elements back to content through attributes in a
//! reserved namespace. When a transform replaces an authored element with a
//! generated one, those attributes must travel with it.

use indextree::NodeId;

use crate::document::Document;

/// Attribute name prefixes owned by the authoring tool.
pub const INSTRUMENTATION_PREFIXES: &[&str] = &["data-aue-", "data-richtext-"];

/// Whether an attribute belongs to the authoring namespace.
#[must_use]
pub fn is_instrumentation_attr(name: &str) -> bool {
    INSTRUMENTATION_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Move attributes from `from` to `to`.
///
/// With `names` set, only those attributes are considered; otherwise every
/// attribute on `from` is. Attributes with an empty value are left in place.
/// Moved attributes overwrite existing values on `to` and are removed from
/// `from`. Returns the names that were moved.
pub fn move_attributes(
    doc: &mut Document,
    from: NodeId,
    to: NodeId,
    names: Option<&[&str]>,
) -> Vec<String> {
    let Some(source) = doc.element(from) else {
        return Vec::new();
    };
    if doc.element(to).is_none() {
        return Vec::new();
    }
    let candidates: Vec<(String, String)> = source
        .attrs()
        .filter(|(name, _)| names.is_none_or(|wanted| wanted.contains(name)))
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect();

    for (name, value) in &candidates {
        doc.set_attr(to, name, value.clone());
        doc.remove_attr(from, name);
    }
    candidates.into_iter().map(|(name, _)| name).collect()
}

/// Move every instrumentation attribute from `from` to `to`.
pub fn move_instrumentation(doc: &mut Document, from: NodeId, to: NodeId) -> Vec<String> {
    let names: Vec<String> = doc
        .element(from)
        .map(|e| {
            e.attrs()
                .map(|(name, _)| name)
                .filter(|name| is_instrumentation_attr(name))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    if names.is_empty() {
        return names;
    }
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    move_attributes(doc, from, to, Some(&refs))
}
