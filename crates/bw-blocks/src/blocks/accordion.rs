//! Accordion: each row becomes a native `details`/`summary` disclosure.
//!
//! After the rows are converted, the enclosing `.accordion-container` is
//! regrouped once per container: its accordion wrappers move into a shared
//! `.accordion-item-wrapper`, and the second and third `div` children are
//! paired inside a `.combined-wrapper`.

use bw_dom::builder::{details, div, summary};
use bw_dom::{Document, NodeId, move_instrumentation};

use crate::context::DecorateContext;
use crate::decorator::{BlockDecorator, DecorateError};

const NAME: &str = "accordion";
const ITEM_CLASS: &str = "accordion-item";

/// `accordion` block.
#[derive(Clone, Copy, Debug, Default)]
pub struct Accordion;

impl BlockDecorator for Accordion {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_decorated(&self, doc: &Document, block: NodeId) -> bool {
        let rows = doc.children(block);
        rows.is_empty()
            || rows
                .iter()
                .any(|r| doc.is_tag(*r, "details") && doc.has_class(*r, ITEM_CLASS))
    }

    fn decorate(
        &self,
        doc: &mut Document,
        block: NodeId,
        _ctx: &mut DecorateContext,
    ) -> Result<(), DecorateError> {
        for row in doc.children(block) {
            let item = decorate_row(doc, row);
            doc.replace_with(row, item);
        }
        if let Some(container) = doc.closest_with_class(block, "accordion-container") {
            group_container(doc, container);
        }
        Ok(())
    }
}

fn decorate_row(doc: &mut Document, row: NodeId) -> NodeId {
    let cells = doc.children(row);
    let label_nodes = cells.first().map(|l| doc.child_nodes(*l)).unwrap_or_default();
    let body = match cells.get(1) {
        Some(body) => *body,
        None => doc.create_element("div"),
    };
    doc.set_attr(body, "class", "accordion-item-body");
    wrap_lists(doc, body);

    let item = doc.build(
        details()
            .class(ITEM_CLASS)
            .child(summary().class("accordion-item-label").nodes(label_nodes))
            .node(body),
    );
    move_instrumentation(doc, row, item);
    item
}

/// Gather the body's top-level lists into one `.accordion-ul-wrapper`, placed
/// where the first list was.
fn wrap_lists(doc: &mut Document, body: NodeId) {
    let lists: Vec<NodeId> = doc
        .find_all(body, |e| e.is("ul"))
        .into_iter()
        .filter(|ul| {
            doc.parent(*ul)
                .and_then(|p| doc.closest(p, |e| e.is("ul")))
                .is_none_or(|outer| !doc.contains(body, outer))
        })
        .collect();
    let Some(first) = lists.first().copied() else {
        return;
    };
    let wrapper = doc.build(div().class("accordion-ul-wrapper"));
    doc.insert_before(first, wrapper);
    for ul in lists {
        doc.append(wrapper, ul);
    }
}

fn group_container(doc: &mut Document, container: NodeId) {
    if doc
        .find(container, |e| e.has_class("accordion-item-wrapper"))
        .is_some()
    {
        return;
    }
    let accordions = doc.children_matching(container, |e| e.has_class("accordion-wrapper"));
    if accordions.is_empty() {
        return;
    }

    let item_wrapper = doc.build_into(container, div().class("accordion-item-wrapper"));
    for wrapper in accordions {
        doc.append(item_wrapper, wrapper);
    }

    let pair: Vec<NodeId> = doc
        .children_matching(container, |e| e.is("div"))
        .into_iter()
        .skip(1)
        .take(2)
        .collect();
    let Some(first) = pair.first().copied() else {
        return;
    };
    let combined = doc.build(div().class("combined-wrapper"));
    doc.insert_before(first, combined);
    for item in pair {
        doc.append(combined, item);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::blocks::test_support::{assert_idempotent, ctx, parse_block};

    const HTML: &str = r#"<main><div class="section accordion-container">
        <div class="default-content-wrapper"><h2>FAQ</h2></div><div class="accordion-wrapper"><div class="accordion">
          <div data-aue-resource="urn:item-1" data-aue-type="component"><div><p>Who can apply?</p></div><div><p>Anyone.</p><ul><li>Salaried</li></ul><p>Also:</p><ul><li>Self-employed</li></ul></div></div>
          <div><div>Fees</div><div><p>None.</p></div></div>
        </div></div>
    </div></main>"#;

    #[test]
    fn test_rows_become_details() {
        let (mut doc, block) = parse_block(HTML, NAME);
        Accordion.decorate(&mut doc, block, &mut ctx()).unwrap();

        let items = doc.children(block);
        assert_eq!(items.len(), 2);
        assert_eq!(
            doc.outer_html(items[0]),
            concat!(
                r#"<details class="accordion-item" data-aue-resource="urn:item-1" data-aue-type="component">"#,
                r#"<summary class="accordion-item-label"><p>Who can apply?</p></summary>"#,
                r#"<div class="accordion-item-body"><p>Anyone.</p>"#,
                r#"<div class="accordion-ul-wrapper"><ul><li>Salaried</li></ul><ul><li>Self-employed</li></ul></div>"#,
                "<p>Also:</p></div></details>"
            )
        );
        assert_eq!(
            doc.outer_html(items[1]),
            r#"<details class="accordion-item"><summary class="accordion-item-label">Fees</summary><div class="accordion-item-body"><p>None.</p></div></details>"#
        );
    }

    #[test]
    fn test_container_is_grouped_once() {
        let (mut doc, block) = parse_block(HTML, NAME);
        Accordion.decorate(&mut doc, block, &mut ctx()).unwrap();

        let container = doc.closest_with_class(block, "accordion-container").unwrap();
        let top: Vec<String> = doc
            .children(container)
            .into_iter()
            .map(|c| doc.attr(c, "class").unwrap_or_default().to_owned())
            .collect();
        assert_eq!(top, vec!["default-content-wrapper", "combined-wrapper"]);

        let combined = doc.children(container)[1];
        let inner = doc.children(combined);
        assert_eq!(inner.len(), 1);
        assert!(doc.has_class(inner[0], "accordion-item-wrapper"));
        assert!(doc.contains(inner[0], block));
    }

    #[test]
    fn test_row_without_body_gets_empty_body() {
        let (mut doc, block) = parse_block(
            r#"<div class="accordion"><div><div>Lonely label</div></div></div>"#,
            NAME,
        );
        Accordion.decorate(&mut doc, block, &mut ctx()).unwrap();
        assert_eq!(
            doc.inner_html(block),
            r#"<details class="accordion-item"><summary class="accordion-item-label">Lonely label</summary><div class="accordion-item-body"></div></details>"#
        );
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&Accordion, HTML, NAME);
    }
}
