//! Localized placeholder strings.

use std::collections::BTreeMap;

use bw_dom::to_camel_case;
use bw_fetch::Fetcher;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::PageError;

/// Placeholder strings keyed by the camel-case form of their `Key` column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placeholders {
    entries: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct Sheet {
    data: Vec<Row>,
}

#[derive(Deserialize)]
struct Row {
    #[serde(default, rename = "Key", alias = "key")]
    key: String,
    #[serde(default, rename = "Text", alias = "text")]
    text: String,
}

impl Placeholders {
    /// Parse spreadsheet JSON with `Key` and `Text` columns.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is not JSON or has no `data` array.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let sheet: Sheet = serde_json::from_str(json)?;
        let entries = sheet
            .data
            .into_iter()
            .filter(|row| !row.key.trim().is_empty())
            .map(|row| (to_camel_case(&row.key), row.text))
            .collect();
        Ok(Self { entries })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetch the placeholders of `language`, falling back to `default_language`
/// and then to an empty set.
pub async fn fetch_placeholders<F: Fetcher>(
    fetcher: &F,
    language: &str,
    default_language: &str,
    sheet: &str,
) -> Placeholders {
    let mut languages = vec![language];
    if language != default_language {
        languages.push(default_language);
    }
    for lang in languages {
        match load(fetcher, &format!("/{lang}/{sheet}")).await {
            Ok(placeholders) => {
                debug!(language = lang, count = placeholders.len(), "Placeholders loaded");
                return placeholders;
            }
            Err(e) => warn!(language = lang, error = %e, "Failed to load placeholders"),
        }
    }
    Placeholders::default()
}

async fn load<F: Fetcher>(fetcher: &F, path: &str) -> Result<Placeholders, PageError> {
    let body = fetcher.fetch(path).await?;
    Placeholders::parse(&body).map_err(|source| PageError::Placeholders {
        path: path.to_owned(),
        source,
    })
}
