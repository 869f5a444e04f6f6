//! CLI error types.

use bw_config::ConfigError;
use bw_fetch::FetchError;
use bw_theme::ThemeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Theme(#[from] ThemeError),

    #[error("Invalid page URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Validation(String),
}
