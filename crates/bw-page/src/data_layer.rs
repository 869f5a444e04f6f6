//! Analytics data layer rendered from page metadata.

use bw_dom::builder::el;
use bw_dom::{Document, NodeId};
use serde::Serialize;

use crate::error::PageError;
use crate::metadata::metadata;
use crate::placeholders::Placeholders;

/// `id` of the JSON script element holding the data layer.
pub const DATA_LAYER_ID: &str = "wbg-data";

/// Page description exposed to analytics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page_category: String,
    pub channel: String,
    #[serde(rename = "themecfreference")]
    pub theme_cf_reference: String,
    pub content_type: String,
    pub page_uid: String,
    pub page_name: String,
    pub host_name: String,
    pub page_first_pub: String,
    pub page_last_mod: String,
    pub webpackage: String,
}

impl PageInfo {
    /// Read the page description from metadata.
    ///
    /// The host name prefers the `hostname` placeholder over metadata. The
    /// first publication date falls back to the last modification date.
    #[must_use]
    pub fn from_document(doc: &Document, placeholders: &Placeholders) -> Self {
        let meta = |name: &str| metadata(doc, name).unwrap_or_default();
        let last_mod = meta("published-time");
        let first_pub = metadata(doc, "content_date").unwrap_or_else(|| last_mod.clone());
        Self {
            page_category: meta("pagecategory"),
            channel: meta("channel"),
            theme_cf_reference: meta("theme_cf_reference"),
            content_type: meta("content_type"),
            page_uid: meta("pageuid"),
            page_name: meta("pagename"),
            host_name: placeholders
                .get("hostname")
                .filter(|h| !h.is_empty())
                .map_or_else(|| meta("hostname"), str::to_owned),
            page_first_pub: first_pub,
            page_last_mod: last_mod,
            webpackage: String::new(),
        }
    }
}

#[derive(Serialize)]
struct DataLayer<'a> {
    page: PageData<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageData<'a> {
    page_info: &'a PageInfo,
}

/// Write `info` into the `<script type="application/json">` data layer,
/// replacing an earlier one.
///
/// # Errors
///
/// Returns [`PageError::MissingElement`] when the document has no `<head>`.
pub fn render_data_layer(doc: &mut Document, info: &PageInfo) -> Result<NodeId, PageError> {
    let json = serde_json::to_string(&DataLayer {
        page: PageData { page_info: info },
    })?
    .replace("</", "<\\/");

    if let Some(existing) = doc.get_element_by_id(DATA_LAYER_ID) {
        doc.set_text_content(existing, json);
        return Ok(existing);
    }
    let head = doc.head().ok_or(PageError::MissingElement("head"))?;
    Ok(doc.build_into(
        head,
        el("script")
            .attr("type", "application/json")
            .id(DATA_LAYER_ID)
            .text(json),
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const HEAD: &str = r#"<html><head>
        <meta name="pagecategory" content="products">
        <meta name="pagename" content="cards">
        <meta name="hostname" content="meta.example.com">
        <meta name="published-time" content="2024-05-01">
        <meta name="theme_cf_reference" content="/content/dam/theme">
    </head><body></body></html>"#;

    #[test]
    fn test_page_info_from_metadata() {
        let doc = Document::parse(HEAD);
        let info = PageInfo::from_document(&doc, &Placeholders::default());
        assert_eq!(info.page_category, "products");
        assert_eq!(info.host_name, "meta.example.com");
        assert_eq!(info.page_first_pub, "2024-05-01");
        assert_eq!(info.page_last_mod, "2024-05-01");
        assert_eq!(info.channel, "");
    }

    #[test]
    fn test_placeholder_host_name_wins() {
        let doc = Document::parse(HEAD);
        let placeholders =
            Placeholders::parse(r#"{"data": [{"Key": "hostname", "Text": "www.example.com"}]}"#)
                .unwrap();
        let info = PageInfo::from_document(&doc, &placeholders);
        assert_eq!(info.host_name, "www.example.com");
    }

    #[test]
    fn test_render_replaces_script() {
        let mut doc = Document::parse(HEAD);
        let info = PageInfo {
            page_name: "</script>".to_owned(),
            ..PageInfo::default()
        };
        render_data_layer(&mut doc, &PageInfo::default()).unwrap();
        let script = render_data_layer(&mut doc, &info).unwrap();

        assert_eq!(doc.find_all(doc.root(), |e| e.is("script")).len(), 1);
        let json = doc.text_content(script);
        assert!(json.starts_with(r#"{"page":{"pageInfo":{"pageCategory":"","channel":"","themecfreference":"""#));
        assert!(json.contains(r#""pageName":"<\/script>""#));
    }
}
