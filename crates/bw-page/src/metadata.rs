//! Page metadata, language and body classes.

use std::sync::LazyLock;

use bw_dom::{Document, to_class_name};
use regex::Regex;

static LANGUAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[a-z]{2})?$").unwrap());

/// Content of the `<meta>` elements named `name`.
///
/// Names containing `:` are matched against `property` (Open Graph style),
/// others against `name`. Several matching elements are joined with `, `.
/// Returns `None` when nothing non-blank is found.
#[must_use]
pub fn metadata(doc: &Document, name: &str) -> Option<String> {
    let attr = if name.contains(':') { "property" } else { "name" };
    let scope = doc.head().unwrap_or_else(|| doc.root());
    let values: Vec<&str> = doc
        .find_all(scope, |e| e.is("meta") && e.attr(attr) == Some(name))
        .into_iter()
        .filter_map(|m| doc.attr(m, "content"))
        .collect();
    let joined = values.join(", ");
    (!joined.trim().is_empty()).then_some(joined)
}

/// Language of a page: its first path segment when that looks like a
/// language code (`en`, `fr`, `pt-br`), otherwise `default`.
#[must_use]
pub fn language_from_path(path: &str, default: &str) -> String {
    path.split('/')
        .find(|s| !s.is_empty())
        .map(str::to_ascii_lowercase)
        .filter(|s| LANGUAGE_RE.is_match(s))
        .unwrap_or_else(|| default.to_owned())
}

/// Write the page language to `<html lang>`.
pub fn set_page_language(doc: &mut Document, language: &str) {
    if let Some(html) = doc.html() {
        doc.set_attr(html, "lang", language);
    }
}

/// Add the `template` and `theme` metadata as body classes.
pub fn decorate_template_and_theme(doc: &mut Document) {
    let Some(body) = doc.body() else {
        return;
    };
    let mut classes = Vec::new();
    if let Some(template) = metadata(doc, "template") {
        classes.push(to_class_name(&template));
    }
    if let Some(theme) = metadata(doc, "theme") {
        classes.extend(theme.split(',').map(to_class_name));
    }
    for class in classes.iter().filter(|c| !c.is_empty()) {
        doc.add_class(body, class);
    }
}
