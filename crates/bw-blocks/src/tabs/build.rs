//! Build transition: authored rows to tablist and panels.

use bw_dom::builder::{button, div};
use bw_dom::instrumentation::is_instrumentation_attr;
use bw_dom::{Document, ElementData, NodeId};

use super::instance::{TabItem, TabsInstance};
use super::TabsError;
use crate::context::IdGenerator;

/// Class that switches panels to the image + content card layout.
pub const CARD_STYLE: &str = "card-style-tab";

const ID_SCOPE: &str = "tabs";

fn is_style_config(e: &ElementData) -> bool {
    e.is("p") && e.attr("data-aue-prop") == Some("tabsstyle")
}

fn is_title(e: &ElementData) -> bool {
    e.is("p") && e.attr("data-aue-prop") == Some("title")
}

/// Turn the rows of `block` into a tablist and panels.
///
/// Rows whose first cell (or `title` field) yields no text are hidden in
/// place instead of becoming tabs.
pub(crate) fn build(
    doc: &mut Document,
    block: NodeId,
    ids: &mut IdGenerator,
) -> Result<TabsInstance, TabsError> {
    apply_style(doc, block);
    let card_style = doc.has_class(block, CARD_STYLE);

    let n = ids.next(ID_SCOPE);
    let tablist = doc.build(
        div()
            .class("tabs-list")
            .attr("role", "tablist")
            .id(format!("tablist-{n}")),
    );
    let panels = doc.build(div().class("tabs-panels-wrapper"));

    let rows: Vec<(NodeId, NodeId)> = doc
        .children(block)
        .into_iter()
        .filter_map(|row| {
            let heading = doc.first_element_child(row)?;
            let label_source = doc.find(row, is_title).unwrap_or(heading);
            (!doc.trimmed_text(label_source).is_empty()).then_some((row, heading))
        })
        .collect();
    for child in doc.children(block) {
        if !rows.iter().any(|(row, _)| *row == child) {
            doc.hide(child);
        }
    }

    let mut items = Vec::with_capacity(rows.len());
    for (i, (panel, heading)) in rows.into_iter().enumerate() {
        let id = format!("tabpanel-{n}-tab-{}", i + 1);
        let title = doc.find(panel, is_title);

        let label_nodes = match title {
            Some(title) => doc
                .child_nodes(title)
                .into_iter()
                .map(|c| doc.clone_subtree(c))
                .collect(),
            None => doc.child_nodes(heading),
        };
        let button = doc.build(
            button()
                .class("tabs-tab")
                .id(format!("tab-{id}"))
                .attr("role", "tab")
                .attr("type", "button")
                .attr("aria-controls", id.as_str())
                .nodes(label_nodes),
        );
        strip_label_instrumentation(doc, button);

        let title = title.filter(|t| !doc.contains(heading, *t));
        doc.remove(heading);
        if card_style {
            apply_card_layout(doc, panel, title);
        } else if let Some(title) = title {
            doc.hide(title);
        }

        doc.set_attr(panel, "class", "tabs-panel");
        doc.set_attr(panel, "id", id.as_str());
        doc.set_attr(panel, "role", "tabpanel");
        doc.set_attr(panel, "aria-labelledby", format!("tab-{id}"));

        doc.append(tablist, button);
        doc.append(panels, panel);
        items.push(TabItem { button, panel });
    }

    let nav = doc.build(div().class("tabs-nav-wrapper").node(tablist));
    doc.prepend(block, panels);
    doc.prepend(block, nav);

    let instance = TabsInstance::new(n, block, tablist, items)?;
    instance.sync(doc);
    Ok(instance)
}

/// Read the style field (or the legacy `card-style-tab` row) into a block
/// class and drop the configuration rows.
fn apply_style(doc: &mut Document, block: NodeId) {
    let style = doc
        .find(block, is_style_config)
        .map(|p| doc.trimmed_text(p))
        .unwrap_or_default();
    if !style.is_empty() && style != "default" {
        for class in style.split_ascii_whitespace() {
            doc.add_class(block, class);
        }
    }

    if !doc.has_class(block, CARD_STYLE) {
        let legacy = doc.children(block).into_iter().find(|row| {
            doc.find_all(*row, |e| e.is("p"))
                .into_iter()
                .any(|p| doc.trimmed_text(p) == CARD_STYLE)
        });
        if let Some(row) = legacy {
            doc.add_class(block, CARD_STYLE);
            doc.remove(row);
        }
    }

    for field in doc.find_all(block, is_style_config) {
        let row = std::iter::successors(Some(field), |n| doc.parent(*n))
            .find(|n| doc.parent(*n) == Some(block));
        if let Some(row) = row {
            doc.remove(row);
        }
    }

    for stray in doc.children_matching(block, is_title) {
        doc.remove(stray);
    }
}

/// The button label is a copy of authored content; the authored field keeps
/// the instrumentation.
fn strip_label_instrumentation(doc: &mut Document, button: NodeId) {
    let Some(first) = doc.first_element_child(button) else {
        return;
    };
    let names: Vec<String> = doc
        .element(first)
        .map(|e| {
            e.attr_names()
                .into_iter()
                .filter(|name| is_instrumentation_attr(name))
                .collect()
        })
        .unwrap_or_default();
    for name in names {
        doc.remove_attr(first, &name);
    }
}

/// Card layout: every remaining panel child (plus the picture, in its own
/// wrapper) moves into `.tabs-panel-content`.
fn apply_card_layout(doc: &mut Document, panel: NodeId, title: Option<NodeId>) {
    if let Some(picture) = doc.find(panel, |e| e.is("picture")) {
        let moved = doc
            .parent(picture)
            .filter(|p| doc.is_tag(*p, "p"))
            .unwrap_or(picture);
        let image = doc.build(div().class("tabs-panel-image").node(moved));
        doc.append(panel, image);
    }

    let kept: Vec<NodeId> = doc
        .children(panel)
        .into_iter()
        .filter(|c| Some(*c) != title)
        .collect();
    let content = doc.build(div().class("tabs-panel-content").nodes(kept));
    doc.replace_children(panel, &[content]);
}
