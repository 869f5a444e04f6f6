//! Marker-class variant resolution.
//!
//! A block's marker classes (`type-1`, `simple-banner-type-2`, ...) select one
//! [`Variant`] from a per-block [`VariantTable`]. Resolution scans the table in
//! declaration order and picks the first variant whose marker is present on the
//! block; when none is present the table's default variant is used. Marker
//! classes are mutually exclusive by convention, so declaration order is the
//! tie-break when an author applies several.

use bw_dom::{Document, NodeId};
use tracing::debug;

/// One presentational mode of a block.
#[derive(Clone, Copy, Debug)]
pub struct Variant<R> {
    /// Marker class that selects this variant.
    pub marker: &'static str,
    /// Class added to the enclosing `{block}-container`, if any.
    pub container_class: Option<&'static str>,
    /// Renderer (or any per-variant payload).
    pub render: R,
}

impl<R> Variant<R> {
    /// Variant with a container class.
    pub const fn new(marker: &'static str, container_class: &'static str, render: R) -> Self {
        Self {
            marker,
            container_class: Some(container_class),
            render,
        }
    }

    /// Variant that leaves the container untouched.
    pub const fn plain(marker: &'static str, render: R) -> Self {
        Self {
            marker,
            container_class: None,
            render,
        }
    }
}

/// Error constructing a [`VariantTable`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum VariantTableError {
    /// The table has no variants.
    #[error("variant table is empty")]
    Empty,
    /// The default marker is not one of the table's markers.
    #[error("default marker `{0}` is not in the variant table")]
    UnknownDefault(String),
    /// Two variants share a marker.
    #[error("marker `{0}` appears more than once")]
    DuplicateMarker(String),
}

/// Ordered marker-class → variant table with a validated default.
#[derive(Clone, Debug)]
pub struct VariantTable<R> {
    variants: Vec<Variant<R>>,
    default_index: usize,
}

impl<R> VariantTable<R> {
    /// Build a table, checking that `default_marker` is one of its markers.
    ///
    /// # Errors
    ///
    /// Returns [`VariantTableError`] if the table is empty, has duplicate
    /// markers, or does not contain `default_marker`.
    pub fn new(variants: Vec<Variant<R>>, default_marker: &str) -> Result<Self, VariantTableError> {
        if variants.is_empty() {
            return Err(VariantTableError::Empty);
        }
        for (i, variant) in variants.iter().enumerate() {
            if variants[..i].iter().any(|v| v.marker == variant.marker) {
                return Err(VariantTableError::DuplicateMarker(variant.marker.to_owned()));
            }
        }
        let default_index = variants
            .iter()
            .position(|v| v.marker == default_marker)
            .ok_or_else(|| VariantTableError::UnknownDefault(default_marker.to_owned()))?;
        Ok(Self {
            variants,
            default_index,
        })
    }

    /// First variant (in table order) whose marker is in `classes`.
    pub fn matched<'a>(&self, classes: impl IntoIterator<Item = &'a str>) -> Option<&Variant<R>> {
        let classes: Vec<&str> = classes.into_iter().collect();
        self.variants.iter().find(|v| classes.contains(&v.marker))
    }

    /// Variant for `classes`, falling back to the default.
    pub fn resolve<'a>(&self, classes: impl IntoIterator<Item = &'a str>) -> &Variant<R> {
        self.matched(classes).unwrap_or_else(|| self.default_variant())
    }

    /// Variant for a block element's class list.
    pub fn resolve_block(&self, doc: &Document, block: NodeId) -> &Variant<R> {
        match doc.element(block) {
            Some(el) => self.resolve(el.classes()),
            None => self.default_variant(),
        }
    }

    /// The designated default variant.
    #[must_use]
    pub fn default_variant(&self) -> &Variant<R> {
        &self.variants[self.default_index]
    }

    /// Markers in declaration order.
    pub fn markers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().map(|v| v.marker)
    }

    /// Container classes in declaration order.
    pub fn container_classes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().filter_map(|v| v.container_class)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Add `class` to the nearest `.{block_name}-container` around `block`.
///
/// Returns the container, or `None` when the block is not inside one.
pub fn apply_container_class(
    doc: &mut Document,
    block: NodeId,
    block_name: &str,
    class: &str,
) -> Option<NodeId> {
    let container_class = format!("{block_name}-container");
    let Some(container) = doc.closest_with_class(block, &container_class) else {
        debug!(block = block_name, "No container to apply variant class to");
        return None;
    };
    doc.add_class(container, class);
    Some(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> VariantTable<u8> {
        VariantTable::new(
            vec![
                Variant::new("type-1", "varient1", 1),
                Variant::new("type-2", "varient2", 2),
                Variant::plain("default", 0),
            ],
            "default",
        )
        .unwrap()
    }

    #[test]
    fn test_single_marker_selects_its_variant() {
        let table = table();
        assert_eq!(table.resolve(["block", "type-2"]).render, 2);
        assert_eq!(
            table.resolve(["type-1"]).container_class,
            Some("varient1")
        );
    }

    #[test]
    fn test_no_marker_selects_default() {
        let table = table();
        let variant = table.resolve(["promotional-banner", "block"]);
        assert_eq!(variant.marker, "default");
        assert!(table.matched(["promotional-banner"]).is_none());
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let table = table();
        assert_eq!(table.resolve(["type-2", "type-1"]).render, 1);
    }

    #[test]
    fn test_unknown_default_is_rejected() {
        let err = VariantTable::new(vec![Variant::plain("type-1", ())], "type-9").unwrap_err();
        assert_eq!(err, VariantTableError::UnknownDefault("type-9".to_owned()));
    }

    #[test]
    fn test_empty_and_duplicate_tables_are_rejected() {
        assert_eq!(
            VariantTable::<()>::new(Vec::new(), "x").unwrap_err(),
            VariantTableError::Empty
        );
        let err = VariantTable::new(
            vec![Variant::plain("type-1", ()), Variant::plain("type-1", ())],
            "type-1",
        )
        .unwrap_err();
        assert_eq!(err, VariantTableError::DuplicateMarker("type-1".to_owned()));
    }

    #[test]
    fn test_apply_container_class() {
        let mut doc = Document::parse(
            r#"<div class="section banner-container"><div class="banner-wrapper"><div class="banner"></div></div></div>"#,
        );
        let block = doc.find(doc.root(), |e| e.has_class("banner")).unwrap();
        let container = apply_container_class(&mut doc, block, "banner", "simple-banner-varient1");

        assert!(container.is_some_and(|c| doc.has_class(c, "simple-banner-varient1")));
    }

    #[test]
    fn test_apply_container_class_without_container() {
        let mut doc = Document::parse(r#"<div class="banner"></div>"#);
        let block = doc.find(doc.root(), |e| e.has_class("banner")).unwrap();
        assert!(apply_container_class(&mut doc, block, "banner", "x").is_none());
    }
}
