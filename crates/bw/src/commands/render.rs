//! `bw render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use bw_config::{CliSettings, Config};
use bw_dom::Document;
use bw_fetch::{DirFetcher, Fetcher, HttpFetcher, ImmediateResources, ResourceLoader};
use bw_page::{PageAssembler, PageReport, PageSettings};
use clap::Args;
use url::Url;

use crate::error::CliError;
use crate::output::{Status, Tone, report_lines};

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Authored page HTML to assemble.
    file: PathBuf,

    /// Write the decorated HTML here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover bw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve fragments and themes from this directory (overrides config).
    #[arg(short = 'd', long)]
    content_dir: Option<PathBuf>,

    /// Content origin (overrides config).
    #[arg(long, env = "BW_ORIGIN")]
    origin: Option<String>,

    /// Site path of the page (default: derived from the file name).
    #[arg(long)]
    path: Option<String>,

    /// Explicit theme location (overrides config).
    #[arg(long)]
    theme: Option<String>,

    /// Simulated viewport width in pixels (overrides config).
    #[arg(long)]
    viewport_width: Option<u32>,

    /// Keep authoring instrumentation visible.
    #[arg(long)]
    author_mode: bool,

    /// Do not wait for the first image before finishing the eager phase.
    #[arg(long)]
    no_image_wait: bool,

    /// Enable verbose output (phase and block logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the page cannot be read or
    /// the output cannot be written. Failures inside page assembly are
    /// reported as warnings.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let status = Status::stderr();

        let cli_settings = CliSettings {
            origin: self.origin,
            content_dir: self.content_dir,
            author_mode: self.author_mode.then_some(true),
            theme_path: self.theme,
            viewport_width: self.viewport_width,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let path = match self.path {
            Some(path) if path.starts_with('/') => path,
            Some(path) => {
                return Err(CliError::Validation(format!(
                    "--path must start with /: {path}"
                )));
            }
            None => page_path(&self.file, config.content_dir.as_deref()),
        };
        let url = page_url(&config.site.origin, &path)?;

        let html = std::fs::read_to_string(&self.file)?;
        let mut doc = Document::parse(&html);
        let settings = PageSettings::from(&config);

        let report = if let Some(dir) = &config.content_dir {
            status.line(Tone::Plain, &format!("Content directory: {}", dir.display()));
            let fetcher = DirFetcher::new(dir.clone());
            assemble(&fetcher, settings, &mut doc, url, self.no_image_wait).await
        } else {
            status.line(Tone::Plain, &format!("Content origin: {}", config.site.origin));
            let fetcher = HttpFetcher::new(&config.site.origin)?;
            assemble(&fetcher, settings, &mut doc, url, self.no_image_wait).await
        };
        status.lines(&report_lines(&report));

        let rendered = doc.to_html();
        match &self.output {
            Some(file) => {
                std::fs::write(file, rendered)?;
                status.line(Tone::Done, &format!("Wrote {}", file.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

async fn assemble<S>(
    source: &S,
    settings: PageSettings,
    doc: &mut Document,
    url: Url,
    no_image_wait: bool,
) -> PageReport
where
    S: Fetcher + ResourceLoader,
{
    if no_image_wait {
        PageAssembler::new(source, ImmediateResources, settings)
            .load_page(doc, url)
            .await
    } else {
        PageAssembler::new(source, source, settings)
            .load_page(doc, url)
            .await
    }
}

/// Derive a page's site path from its file location.
///
/// Files inside the content directory map to their relative path without
/// the `.plain.html`/`.html` extension; `index` maps to its folder. Anything
/// else is treated as the home page.
fn page_path(file: &Path, content_dir: Option<&Path>) -> String {
    let Some(relative) = content_dir.and_then(|dir| file.strip_prefix(dir).ok()) else {
        return "/".to_owned();
    };
    let mut segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let Some(last) = segments.pop() else {
        return "/".to_owned();
    };
    let stem = last
        .strip_suffix(".plain.html")
        .or_else(|| last.strip_suffix(".html"))
        .unwrap_or(&last);
    if stem == "index" {
        if segments.is_empty() {
            return "/".to_owned();
        }
        return format!("/{}/", segments.join("/"));
    }
    segments.push(stem.to_owned());
    format!("/{}", segments.join("/"))
}

fn page_url(origin: &str, path: &str) -> Result<Url, CliError> {
    Ok(Url::parse(origin)?.join(path)?)
}
