//! Tabs block.
//!
//! Authored rows (first cell = label, remaining cells = body) are turned into
//! an accessible tablist plus panels:
//!
//! ```html
//! <div class="tabs block">
//!   <div class="tabs-nav-wrapper">
//!     <div class="tabs-list" role="tablist" id="tablist-1">
//!       <button class="tabs-tab" id="tab-tabpanel-1-tab-1" role="tab" type="button"
//!               aria-controls="tabpanel-1-tab-1" aria-selected="true" tabindex="0">Cards</button>
//!       <button class="tabs-tab" id="tab-tabpanel-1-tab-2" role="tab" type="button"
//!               aria-controls="tabpanel-1-tab-2" aria-selected="false" tabindex="-1">Loans</button>
//!     </div>
//!   </div>
//!   <div class="tabs-panels-wrapper">
//!     <div class="tabs-panel" id="tabpanel-1-tab-1" role="tabpanel"
//!          aria-labelledby="tab-tabpanel-1-tab-1" aria-hidden="false">...</div>
//!     <div class="tabs-panel" id="tabpanel-1-tab-2" role="tabpanel"
//!          aria-labelledby="tab-tabpanel-1-tab-2" aria-hidden="true">...</div>
//!   </div>
//! </div>
//! ```
//!
//! The numeric part of every id comes from the page's
//! [`IdGenerator`](crate::context::IdGenerator), so several tabs blocks on one
//! page never share ids.

mod build;
mod instance;
mod relocate;
mod state;

pub use build::CARD_STYLE;
pub use instance::{TabItem, TabsInstance};
pub use relocate::{ACCORDION_VARIANT_MARKER, relocate_accordions};
pub use state::TabsState;

use bw_dom::{Document, NodeId};

use crate::context::DecorateContext;
use crate::decorator::{BlockDecorator, DecorateError};

const NAME: &str = "tabs";

/// Error from the tabs state machine.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TabsError {
    /// Build was attempted on a block that is already built.
    #[error("tabs block is already built")]
    AlreadyBuilt,
    /// Activation before build.
    #[error("tabs block is not built")]
    NotBuilt,
    /// Activation of a tab that does not exist.
    #[error("tab {index} out of range (block has {count} tabs)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// `tabs` block.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tabs;

impl BlockDecorator for Tabs {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_decorated(&self, doc: &Document, block: NodeId) -> bool {
        doc.find(block, |e| e.has_class("tabs-nav-wrapper")).is_some()
    }

    fn decorate(
        &self,
        doc: &mut Document,
        block: NodeId,
        ctx: &mut DecorateContext,
    ) -> Result<(), DecorateError> {
        let instance = build::build(doc, block, &mut ctx.ids)?;
        relocate_accordions(doc, &instance);
        ctx.tabs.push(instance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::blocks::test_support::{assert_idempotent, ctx, parse_block};

    const HTML: &str = r#"<main><div class="section"><div class="tabs">
        <div><div><p data-aue-prop="tabsstyle">default</p></div></div>
        <div data-aue-resource="urn:tab-1"><div><strong data-aue-prop="label">Cards</strong></div><div><p>Card offers</p></div></div>
        <div><div></div><div><p>No label, hidden</p></div></div>
        <div><div>Loans</div><div><p>Loan offers</p></div></div>
    </div></div></main>"#;

    fn decorated(html: &str) -> (Document, NodeId, DecorateContext) {
        let (mut doc, block) = parse_block(html, NAME);
        let mut ctx = ctx();
        Tabs.decorate(&mut doc, block, &mut ctx).unwrap();
        (doc, block, ctx)
    }

    #[test]
    fn test_build_structure() {
        let (doc, block, ctx) = decorated(HTML);
        let instance = &ctx.tabs[0];
        assert_eq!(instance.len(), 2);
        assert_eq!(instance.state(), TabsState::Active { index: 0, count: 2 });

        let top = doc.children(block);
        assert!(doc.has_class(top[0], "tabs-nav-wrapper"));
        assert!(doc.has_class(top[1], "tabs-panels-wrapper"));
        assert_eq!(top.len(), 3, "unlabelled row stays in place");
        assert!(doc.is_hidden(top[2]));

        let first = instance.items()[0];
        assert_eq!(
            doc.outer_html(first.button),
            concat!(
                r#"<button class="tabs-tab" id="tab-tabpanel-1-tab-1" role="tab" type="button" "#,
                r#"aria-controls="tabpanel-1-tab-1" aria-selected="true" tabindex="0">"#,
                "<strong>Cards</strong></button>"
            )
        );
        assert_eq!(doc.attr(first.panel, "id"), Some("tabpanel-1-tab-1"));
        assert_eq!(doc.attr(first.panel, "aria-labelledby"), Some("tab-tabpanel-1-tab-1"));
        assert_eq!(doc.attr(first.panel, "data-aue-resource"), Some("urn:tab-1"));
        assert_eq!(doc.inner_html(first.panel), "<div><p>Card offers</p></div>");

        let second = instance.items()[1];
        assert_eq!(doc.attr(second.button, "aria-selected"), Some("false"));
        assert_eq!(doc.attr(second.panel, "aria-hidden"), Some("true"));
        assert!(doc.find(block, |e| e.attr("data-aue-prop") == Some("tabsstyle")).is_none());
    }

    #[test]
    fn test_activation_is_exclusive() {
        let (mut doc, _, mut ctx) = decorated(HTML);
        let instance = &mut ctx.tabs[0];

        instance.activate(&mut doc, 1).unwrap();
        assert_eq!(instance.selected_in(&doc), vec![1]);
        assert_eq!(instance.visible_in(&doc), vec![1]);

        let before = doc.to_html();
        assert_eq!(
            instance.activate(&mut doc, 5),
            Err(TabsError::IndexOutOfRange { index: 5, count: 2 })
        );
        assert_eq!(doc.to_html(), before);
        assert_eq!(instance.state().active(), Some(1));
    }

    #[test]
    fn test_ids_are_unique_per_block() {
        let html = r#"<main>
            <div class="tabs" id="a"><div><div>One</div><div>1</div></div></div>
            <div class="tabs" id="b"><div><div>Two</div><div>2</div></div></div>
        </main>"#;
        let mut doc = Document::parse(html);
        let blocks = doc.find_all(doc.root(), |e| e.has_class("tabs"));
        let mut ctx = ctx();
        for block in blocks {
            Tabs.decorate(&mut doc, block, &mut ctx).unwrap();
        }

        let lists: Vec<&str> = ctx
            .tabs
            .iter()
            .map(|t| doc.attr(t.tablist(), "id").unwrap())
            .collect();
        assert_eq!(lists, vec!["tablist-1", "tablist-2"]);
        assert_eq!(
            doc.attr(ctx.tabs[1].items()[0].panel, "id"),
            Some("tabpanel-2-tab-1")
        );
    }

    #[test]
    fn test_card_style_from_legacy_row() {
        let html = r#"<div class="tabs">
            <div><div><p>card-style-tab</p></div></div>
            <div><div><p data-aue-prop="title">Travel</p></div><div><p>Fly more</p><p><picture><img src="/t.png"></picture></p></div></div>
        </div>"#;
        let (doc, block, ctx) = decorated(html);
        assert!(doc.has_class(block, CARD_STYLE));

        let item = ctx.tabs[0].items()[0];
        assert_eq!(doc.trimmed_text(item.button), "Travel");
        assert_eq!(
            doc.inner_html(item.panel),
            concat!(
                r#"<div class="tabs-panel-content"><div><p>Fly more</p></div>"#,
                r#"<div class="tabs-panel-image"><p><picture><img src="/t.png"></picture></p></div></div>"#
            )
        );
    }

    #[test]
    fn test_title_field_labels_tab_and_is_hidden() {
        let html = r#"<div class="tabs"><div><div>Heading</div><div><p data-aue-prop="title" data-aue-type="text">Savings</p></div><div>Body</div></div></div>"#;
        let (doc, _, ctx) = decorated(html);
        let item = ctx.tabs[0].items()[0];
        assert_eq!(doc.inner_html(item.button), "Savings");

        let title = doc.find(item.panel, |e| e.attr("data-aue-prop") == Some("title")).unwrap();
        assert!(doc.is_hidden(title));
        assert_eq!(doc.attr(title, "data-aue-type"), Some("text"));
    }

    #[test]
    fn test_title_inside_heading_goes_with_it() {
        let html = r#"<div class="tabs"><div><div><p data-aue-prop="title">Savings</p></div><div>Body</div></div></div>"#;
        let (doc, _, ctx) = decorated(html);
        let item = ctx.tabs[0].items()[0];
        assert_eq!(doc.inner_html(item.button), "Savings");
        assert_eq!(doc.inner_html(item.panel), "<div>Body</div>");
    }

    #[test]
    fn test_accordions_relocate_into_panels() {
        let html = r#"<main>
            <div class="section"><div class="tabs"><div><div>A</div><div>a</div></div><div><div>B</div><div>b</div></div></div></div>
            <div class="section accordion-container accordion-varient1" id="acc-1"></div>
            <div class="section accordion-container accordion-varient2" id="acc-2"></div>
            <div class="section accordion-container accordion-varient1" id="acc-3"></div>
        </main>"#;
        let (doc, _, ctx) = decorated(html);
        let items = ctx.tabs[0].items();
        let first = doc.get_element_by_id("acc-1").unwrap();
        let second = doc.get_element_by_id("acc-2").unwrap();
        let third = doc.get_element_by_id("acc-3").unwrap();
        assert_eq!(doc.parent(first), Some(items[0].panel));
        assert_eq!(doc.parent(second), Some(items[1].panel));
        assert!(!doc.contains(items[1].panel, third));
    }

    #[test]
    fn test_block_without_labels() {
        let (doc, block, ctx) = decorated(r#"<div class="tabs"><div><div></div></div></div>"#);
        assert_eq!(ctx.tabs[0].state(), TabsState::Built);
        assert!(Tabs.is_decorated(&doc, block));
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&Tabs, HTML, NAME);
    }
}
