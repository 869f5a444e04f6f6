//! `bw theme-candidates` command implementation.

use std::io::Write;
use std::path::PathBuf;

use bw_config::{CliSettings, Config, ThemeConfig};
use bw_fetch::{DirFetcher, Fetcher, HttpFetcher};
use bw_page::language_from_path;
use bw_theme::{ResolvedTheme, ThemeRequest, ThemeResolver, candidate_paths};
use clap::Args;

use crate::error::CliError;
use crate::output::{Status, Tone, theme_line};

/// Arguments for the theme-candidates command.
#[derive(Args)]
pub(crate) struct ThemeCandidatesArgs {
    /// Site path of the page (e.g. `/en/products/cards`).
    path: String,

    /// Path to configuration file (default: auto-discover bw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Probe the cascade and print the winning theme as CSS.
    #[arg(long)]
    resolve: bool,

    /// Probe this directory instead of the origin (overrides config).
    #[arg(short = 'd', long)]
    content_dir: Option<PathBuf>,

    /// Content origin (overrides config).
    #[arg(long, env = "BW_ORIGIN")]
    origin: Option<String>,

    /// Enable verbose output (log every probe).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ThemeCandidatesArgs {
    /// Execute the theme-candidates command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or, with `--resolve`, when no
    /// theme location can be fetched.
    pub(crate) async fn execute(self) -> Result<(), CliError> {

        let cli_settings = CliSettings {
            origin: self.origin,
            content_dir: self.content_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let mut stdout = std::io::stdout().lock();
        for line in cascade(&self.path, &config.theme) {
            writeln!(stdout, "{line}")?;
        }
        if !self.resolve {
            return Ok(());
        }

        let language = language_from_path(&self.path, &config.site.default_language);
        let theme = if let Some(dir) = &config.content_dir {
            resolve(DirFetcher::new(dir.clone()), &config.theme, &self.path, &language).await?
        } else {
            let fetcher = HttpFetcher::new(&config.site.origin)?;
            resolve(fetcher, &config.theme, &self.path, &language).await?
        };
        Status::stderr().line(Tone::Done, &theme_line(&theme));
        writeln!(stdout, "{}", theme.variables.to_css())?;
        Ok(())
    }
}

/// The cascade for `path` in probe order, then the fallback.
///
/// An explicit location in the configuration replaces the cascade.
fn cascade(path: &str, theme: &ThemeConfig) -> Vec<String> {
    if let Some(explicit) = &theme.path {
        return vec![format!("{explicit} (explicit)")];
    }
    candidate_paths(path, &theme.suffix)
        .into_iter()
        .chain(std::iter::once(format!("{} (fallback)", theme.fallback)))
        .collect()
}

async fn resolve<F: Fetcher>(
    fetcher: F,
    theme: &ThemeConfig,
    path: &str,
    language: &str,
) -> Result<ResolvedTheme, CliError> {
    let resolver = ThemeResolver::new(fetcher, theme.clone());
    Ok(resolver.resolve(&ThemeRequest::new(path, language)).await?)
}
