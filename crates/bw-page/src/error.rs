//! Page assembly error types.

use bw_fetch::FetchError;

/// Failure of one page assembly step.
///
/// Steps never abort a phase; the assembler logs the error and records it in
/// the [`PageReport`](crate::PageReport).
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid placeholder sheet at {path}")]
    Placeholders {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize data layer: {0}")]
    DataLayer(#[from] serde_json::Error),

    #[error("document has no <{0}> element")]
    MissingElement(&'static str),
}
