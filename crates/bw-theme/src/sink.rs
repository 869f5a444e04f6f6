//! Style injection target.

use bw_dom::Document;
use bw_dom::builder::el;

/// Destination for serialized theme variables.
///
/// Writers replace the whole content of the addressed element; repeated
/// writes never produce a second element.
pub trait StyleSink {
    /// Create or replace the style element `id` with `css`.
    fn replace_style(&mut self, id: &str, css: &str);
}

impl StyleSink for Document {
    fn replace_style(&mut self, id: &str, css: &str) {
        let style = match self.get_element_by_id(id) {
            Some(existing) if self.is_tag(existing, "style") => existing,
            other => {
                if let Some(stale) = other {
                    self.remove(stale);
                }
                let parent = self.head().or_else(|| self.html()).unwrap_or(self.root());
                self.build_into(parent, el("style").id(id))
            }
        };
        self.set_text_content(style, css);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_replace_creates_once() {
        let mut doc = Document::parse("<html><head><title>t</title></head><body></body></html>");
        doc.replace_style("theme", ":root {\n  --a: 1;\n}");
        doc.replace_style("theme", ":root {\n  --a: 2;\n}");

        let styles = doc.find_all(doc.root(), |e| e.id() == Some("theme"));
        assert_eq!(styles.len(), 1);
        assert_eq!(doc.parent(styles[0]), doc.head());
        assert_eq!(doc.text_content(styles[0]), ":root {\n  --a: 2;\n}");
    }

    #[test]
    fn test_non_style_element_with_id_is_replaced() {
        let mut doc = Document::parse(r#"<html><head><div id="theme">x</div></head></html>"#);
        doc.replace_style("theme", ":root {\n}");
        let theme = doc.get_element_by_id("theme").unwrap();
        assert!(doc.is_tag(theme, "style"));
        assert_eq!(doc.find_all(doc.root(), |e| e.id() == Some("theme")).len(), 1);
    }
}
