//! Call-to-action banner built from key/value rows.
//!
//! ```text
//! | Heading          | We're here when you need us. |
//! | Description      | Talk to an advisor.          |
//! | CTA              | [Get in touch](/contact)     |
//! | Background Image | <picture>                    |
//! ```

use bw_dom::builder::{button, div, h2, p};
use bw_dom::{Document, NodeId, move_instrumentation};
use tracing::warn;

use crate::context::DecorateContext;
use crate::decorator::{BlockDecorator, DecorateError, has_child_with_class};
use crate::picture::{Breakpoint, optimized_picture};

const NAME: &str = "cta-banner";
const CONTAINER_CLASS: &str = "cta-banner-container";
const ERROR_CLASS: &str = "cta-banner-error";

const DEFAULT_HEADING: &str = "We're here when you need us.";
const DEFAULT_DESCRIPTION: &str = "Work with advisors who understand your goals, simplify the complex, and guide you toward long-term financial growth with clarity and confidence.";
const DEFAULT_CTA: &str = "Get in Touch";
const DEFAULT_BACKGROUND_ALT: &str = "Background decoration";

const BACKGROUND_BREAKPOINTS: &[Breakpoint] = &[
    Breakpoint::new("(min-width: 1200px)", 2000),
    Breakpoint::new("(min-width: 768px)", 1500),
    Breakpoint::any(750),
];

/// `cta-banner` block.
#[derive(Clone, Copy, Debug, Default)]
pub struct CtaBanner;

impl BlockDecorator for CtaBanner {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_decorated(&self, doc: &Document, block: NodeId) -> bool {
        has_child_with_class(doc, block, CONTAINER_CLASS)
            || has_child_with_class(doc, block, ERROR_CLASS)
    }

    fn decorate(
        &self,
        doc: &mut Document,
        block: NodeId,
        ctx: &mut DecorateContext,
    ) -> Result<(), DecorateError> {
        let rows = read_rows(doc, block);
        if rows.is_empty() {
            warn!(block = NAME, "No configuration rows; rendering error placeholder");
            doc.clear_children(block);
            doc.build_into(
                block,
                p().class(ERROR_CLASS).text("Unable to load CTA banner"),
            );
            return Ok(());
        }
        let lookup = |key: &str| rows.iter().find(|(k, _)| k == key).map(|(_, cell)| *cell);

        let heading = lookup("heading").map(|cell| {
            let source = doc
                .find(cell, bw_dom::ElementData::is_heading)
                .or_else(|| doc.find(cell, |e| e.is("p")))
                .unwrap_or(cell);
            text_or(doc, source, DEFAULT_HEADING)
        });
        let description = lookup("description").map(|cell| {
            let source = doc.find(cell, |e| e.is("p")).unwrap_or(cell);
            text_or(doc, source, DEFAULT_DESCRIPTION)
        });
        let cta = lookup("cta").map(|cell| {
            let link = doc.find(cell, |e| e.is("a"));
            let label = text_or(doc, link.unwrap_or(cell), DEFAULT_CTA);
            let href = link
                .and_then(|a| doc.attr(a, "href"))
                .map(|href| {
                    ctx.page_url
                        .join(href.trim())
                        .map_or_else(|_| href.trim().to_owned(), String::from)
                });
            (label, href)
        });
        let background = ["background-image", "background"]
            .into_iter()
            .filter_map(lookup)
            .find_map(|cell| doc.find(cell, |e| e.is("img")))
            .or_else(|| doc.find(block, |e| e.is("img")))
            .map(|img| {
                let src = doc.attr(img, "src").unwrap_or_default().to_owned();
                let alt = doc
                    .attr(img, "alt")
                    .filter(|alt| !alt.is_empty())
                    .unwrap_or(DEFAULT_BACKGROUND_ALT)
                    .to_owned();
                (src, alt)
            });

        let text = div()
            .class("cta-banner-text")
            .child_opt(heading.map(|h| h2().class("cta-banner-heading").text(h)))
            .child_opt(description.map(|d| p().class("cta-banner-description").text(d)));
        let content = div().class("cta-banner-content").child(text).child_opt(cta.map(
            |(label, href)| {
                div().class("cta-banner-cta").child(
                    button()
                        .class("cta-banner-button")
                        .attr("aria-label", label.as_str())
                        .attr("type", "button")
                        .attr_opt("data-href", href)
                        .text(label),
                )
            },
        ));
        let container_spec = div()
            .class(CONTAINER_CLASS)
            .class(if ctx.author_mode { "author-mode" } else { "" })
            .attr("role", "region")
            .attr("aria-label", "Call to action banner")
            .child_opt(background.map(|(src, alt)| {
                div().class("cta-banner-background").child(optimized_picture(
                    &ctx.page_url,
                    &src,
                    &alt,
                    false,
                    BACKGROUND_BREAKPOINTS,
                ))
            }))
            .child(content);

        let container = doc.build(container_spec);
        move_instrumentation(doc, block, container);
        doc.replace_children(block, &[container]);
        Ok(())
    }
}

/// Key/value rows: the key is the first cell's text, lowercased, with runs of
/// whitespace turned into `-`.
fn read_rows(doc: &Document, block: NodeId) -> Vec<(String, NodeId)> {
    doc.children(block)
        .into_iter()
        .filter_map(|row| {
            let cells = doc.children(row);
            let [key, value, ..] = cells.as_slice() else {
                return None;
            };
            let key = doc
                .trimmed_text(*key)
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-");
            Some((key, *value))
        })
        .collect()
}

fn text_or(doc: &Document, node: NodeId, fallback: &str) -> String {
    let text = doc.trimmed_text(node);
    if text.is_empty() { fallback.to_owned() } else { text }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::blocks::test_support::{assert_idempotent, ctx, parse_block};

    const HTML: &str = r#"<div class="cta-banner" data-aue-resource="urn:cta" data-aue-type="component">
        <div><div>Heading</div><div><h3>Talk to us</h3></div></div>
        <div><div>Description</div><div><p>Advisors on call.</p></div></div>
        <div><div>CTA</div><div><p><a href="/contact">Contact</a></p></div></div>
        <div><div>Background   Image</div><div><picture><img src="/bg.jpg"></picture></div></div>
    </div>"#;

    #[test]
    fn test_banner_markup() {
        let (mut doc, block) = parse_block(HTML, NAME);
        CtaBanner.decorate(&mut doc, block, &mut ctx()).unwrap();

        let children = doc.children(block);
        assert_eq!(children.len(), 1);
        let container = children[0];
        assert_eq!(doc.attr(container, "data-aue-resource"), Some("urn:cta"));
        assert_eq!(doc.attr(block, "data-aue-resource"), None);
        assert_eq!(doc.attr(container, "role"), Some("region"));
        assert!(!doc.has_class(container, "author-mode"));

        let heading = doc.find(container, |e| e.has_class("cta-banner-heading")).unwrap();
        assert_eq!(doc.outer_html(heading), r#"<h2 class="cta-banner-heading">Talk to us</h2>"#);

        let button = doc.find(container, |e| e.has_class("cta-banner-button")).unwrap();
        assert_eq!(
            doc.outer_html(button),
            r#"<button class="cta-banner-button" aria-label="Contact" type="button" data-href="https://example.com/contact">Contact</button>"#
        );

        let background = doc.find(container, |e| e.has_class("cta-banner-background")).unwrap();
        let img = doc.find(background, |e| e.is("img")).unwrap();
        assert_eq!(doc.attr(img, "alt"), Some("Background decoration"));
        assert_eq!(doc.find_all(background, |e| e.is("source")).len(), 5);
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let (mut doc, block) = parse_block(
            r#"<div class="cta-banner"><div><div>Heading</div><div></div></div><div><div>CTA</div><div>Call us</div></div></div>"#,
            NAME,
        );
        let mut ctx = ctx().with_author_mode(true);
        CtaBanner.decorate(&mut doc, block, &mut ctx).unwrap();

        let container = doc.children(block)[0];
        assert!(doc.has_class(container, "author-mode"));
        assert_eq!(doc.trimmed_text(container), "We're here when you need us.Call us");
        let button = doc.find(container, |e| e.is("button")).unwrap();
        assert_eq!(doc.attr(button, "data-href"), None);
        assert!(doc.find(container, |e| e.has_class("cta-banner-description")).is_none());
    }

    #[test]
    fn test_no_rows_renders_error() {
        let (mut doc, block) = parse_block(r#"<div class="cta-banner"><div>stray</div></div>"#, NAME);
        CtaBanner.decorate(&mut doc, block, &mut ctx()).unwrap();
        assert_eq!(
            doc.inner_html(block),
            r#"<p class="cta-banner-error">Unable to load CTA banner</p>"#
        );
        assert!(CtaBanner.is_decorated(&doc, block));
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&CtaBanner, HTML, NAME);
    }
}
