//! Resource hints and stylesheets in `<head>`.

use bw_dom::builder::el;
use bw_dom::{Document, ElementSpec};

/// Add `<link rel="preconnect">` for `origin`.
///
/// Only `http(s)` origins are accepted and an origin is never added twice.
/// Returns whether a link was added.
pub fn add_preconnect(doc: &mut Document, origin: &str) -> bool {
    if !origin.starts_with("http") {
        return false;
    }
    add_link(doc, "preconnect", origin, |spec| spec.attr("crossorigin", ""))
}

/// Add `<link rel="stylesheet">` for `href` unless it is already present.
pub fn load_css(doc: &mut Document, href: &str) -> bool {
    add_link(doc, "stylesheet", href, |spec| spec)
}

fn add_link(
    doc: &mut Document,
    rel: &str,
    href: &str,
    extra: impl FnOnce(ElementSpec) -> ElementSpec,
) -> bool {
    let Some(head) = doc.head() else {
        return false;
    };
    let exists = doc
        .find(head, |e| {
            e.is("link") && e.attr("rel") == Some(rel) && e.attr("href") == Some(href)
        })
        .is_some();
    if exists {
        return false;
    }
    doc.build_into(head, extra(el("link").attr("rel", rel).attr("href", href)));
    true
}
