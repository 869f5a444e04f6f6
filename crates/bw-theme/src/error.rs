//! Theme error types.

use bw_fetch::FetchError;

/// Error resolving a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme document could not be fetched.
    #[error("failed to fetch theme configuration")]
    Fetch(#[from] FetchError),

    /// The spreadsheet JSON is malformed.
    #[error("invalid theme sheet at {path}")]
    Sheet {
        /// Site path of the sheet.
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
