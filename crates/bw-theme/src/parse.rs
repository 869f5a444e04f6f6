//! Tabular theme formats.

use bw_dom::{Document, NodeId};
use serde::Deserialize;

use crate::variables::ThemeVariables;

const ROW_CLASS: &str = "css-variable";

/// Parse a rendered page fragment.
///
/// Every `.css-variable` element is a row; its first child `div` holds the
/// key and its second child `div` the value.
#[must_use]
pub fn parse_page(html: &str) -> ThemeVariables {
    let doc = Document::parse(html);
    let mut vars = ThemeVariables::new();
    for row in doc.find_all(doc.root(), |e| e.has_class(ROW_CLASS)) {
        let cell = |index| {
            doc.child_at(row, index)
                .filter(|c: &NodeId| doc.is_tag(*c, "div"))
                .map(|c| doc.trimmed_text(c))
        };
        if let (Some(key), Some(value)) = (cell(0), cell(1)) {
            vars.insert(&key, &value);
        }
    }
    vars
}

#[derive(Deserialize)]
struct Sheet {
    data: Vec<SheetRow>,
}

#[derive(Deserialize)]
struct SheetRow {
    #[serde(default, alias = "Key")]
    key: String,
    #[serde(default, alias = "Value")]
    value: String,
}

/// Parse spreadsheet JSON (`{"data": [{"key": .., "value": ..}]}`).
///
/// # Errors
///
/// Returns an error when the document is not JSON or has no `data` array.
pub fn parse_sheet(json: &str) -> Result<ThemeVariables, serde_json::Error> {
    let sheet: Sheet = serde_json::from_str(json)?;
    Ok(sheet
        .data
        .iter()
        .map(|row| (row.key.as_str(), row.value.as_str()))
        .collect())
}
