//! Naming helpers and block configuration reading.

use std::sync::LazyLock;

use indextree::NodeId;
use regex::Regex;

use crate::document::Document;

static NON_CLASS_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-z]+").unwrap());

static DASH_LETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-([a-z])").unwrap());

/// Normalize free text into a CSS class name.
///
/// Lowercases, collapses runs of non-alphanumerics into `-` and trims dashes.
///
/// ```
/// assert_eq!(bw_dom::to_class_name("Section Metadata!"), "section-metadata");
/// ```
#[must_use]
pub fn to_class_name(name: &str) -> String {
    let lower = name.to_lowercase();
    NON_CLASS_CHARS_RE
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_owned()
}

/// Normalize free text into a camel-case identifier (`data-*` dataset key style).
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let class = to_class_name(name);
    DASH_LETTER_RE
        .replace_all(&class, |caps: &regex::Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

/// One value read from a configuration row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ConfigValue {
    /// The value as a single string; multiple values are joined with `, `.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Single(v) => v.clone(),
            Self::Multiple(vs) => vs.join(", "),
        }
    }

    /// The first value.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(v) => Some(v),
            Self::Multiple(vs) => vs.first().map(String::as_str),
        }
    }
}

/// Key/value configuration read from two-cell block rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockConfig {
    entries: Vec<(String, ConfigValue)>,
}

impl BlockConfig {
    /// Insert a value; a repeated key replaces the earlier value in place.
    pub fn insert(&mut self, key: String, value: ConfigValue) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Single-string view of a value.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(ConfigValue::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Read key/value configuration from the rows of a block.
///
/// Each row with at least two cells contributes one entry: the key is the
/// class-name form of the first cell's text. The value is taken from the second
/// cell's links (`href`), else its images (`src`), else its paragraphs, else its
/// text content.
#[must_use]
pub fn read_block_config(doc: &Document, block: NodeId) -> BlockConfig {
    let mut config = BlockConfig::default();
    for row in doc.children(block) {
        let cells = doc.children(row);
        let (Some(key_cell), Some(value_cell)) = (cells.first(), cells.get(1)) else {
            continue;
        };
        let key = to_class_name(&doc.text_content(*key_cell));
        if key.is_empty() {
            continue;
        }
        config.insert(key, cell_value(doc, *value_cell));
    }
    config
}

fn cell_value(doc: &Document, cell: NodeId) -> ConfigValue {
    let collect = |tag: &str, attr: &str| -> Vec<String> {
        doc.find_all(cell, |e| e.is(tag))
            .into_iter()
            .filter_map(|n| doc.attr(n, attr).map(str::to_owned))
            .collect()
    };
    let texts = |tag: &str| -> Vec<String> {
        doc.find_all(cell, |e| e.is(tag))
            .into_iter()
            .map(|n| doc.trimmed_text(n))
            .collect()
    };

    for values in [collect("a", "href"), collect("img", "src"), texts("p")] {
        match values.len() {
            0 => {}
            1 => return ConfigValue::Single(values.into_iter().next().unwrap_or_default()),
            _ => return ConfigValue::Multiple(values),
        }
    }
    ConfigValue::Single(doc.trimmed_text(cell))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_to_class_name() {
        assert_eq!(to_class_name("Promotional Banner"), "promotional-banner");
        assert_eq!(to_class_name("  --Type 4!! "), "type-4");
        assert_eq!(to_class_name("section_metadata"), "section-metadata");
        assert_eq!(to_class_name("***"), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("Background Image"), "backgroundImage");
        assert_eq!(to_camel_case("id"), "id");
    }

    #[test]
    fn test_read_block_config() {
        let doc = Document::parse(
            r#"<div class="cta-banner">
                <div><div>Title</div><div>Get started</div></div>
                <div><div>Link</div><div><a href="/start">Start</a></div></div>
                <div><div>Image</div><div><img src="/hero.png"></div></div>
                <div><div>Items</div><div><p>One</p><p>Two</p></div></div>
                <div><div>lonely</div></div>
                <div><div>Title</div><div>Again</div></div>
            </div>"#,
        );
        let block = doc.find(doc.root(), |e| e.has_class("cta-banner")).unwrap();
        let config = read_block_config(&doc, block);

        assert_eq!(config.len(), 4);
        assert_eq!(config.text("title").as_deref(), Some("Again"));
        assert_eq!(config.text("link").as_deref(), Some("/start"));
        assert_eq!(config.text("image").as_deref(), Some("/hero.png"));
        assert_eq!(
            config.get("items"),
            Some(&ConfigValue::Multiple(vec!["One".to_owned(), "Two".to_owned()]))
        );
        let keys: Vec<_> = config.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["title", "link", "image", "items"]);
    }
}
