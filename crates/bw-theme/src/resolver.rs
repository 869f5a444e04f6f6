//! Candidate probing and theme application.

use bw_config::{ThemeConfig, ThemeFormat};
use bw_fetch::Fetcher;
use tracing::{debug, info, warn};

use crate::candidates::candidate_paths;
use crate::error::ThemeError;
use crate::parse::{parse_page, parse_sheet};
use crate::sink::StyleSink;
use crate::variables::ThemeVariables;

const PAGE_EXTENSION: &str = ".plain.html";
const SHEET_EXTENSION: &str = ".json";
const SHEET_NAME: &str = "theme-configuration";

/// How the theme document was located.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeSource {
    /// Page metadata or configuration named the location.
    Explicit,
    /// A cascade candidate resolved.
    Candidate,
    /// No candidate resolved; the fallback did.
    Fallback,
    /// Per-language spreadsheet.
    Language,
}

/// Inputs describing the page a theme is resolved for.
#[derive(Clone, Copy, Debug)]
pub struct ThemeRequest<'a> {
    /// Page path the cascade starts from.
    pub path: &'a str,
    /// Page language, used by the spreadsheet format.
    pub language: &'a str,
    /// Location from page metadata; overrides the configured path.
    pub explicit: Option<&'a str>,
}

impl<'a> ThemeRequest<'a> {
    #[must_use]
    pub fn new(path: &'a str, language: &'a str) -> Self {
        Self {
            path,
            language,
            explicit: None,
        }
    }

    #[must_use]
    pub fn with_explicit(mut self, explicit: Option<&'a str>) -> Self {
        self.explicit = explicit.filter(|p| !p.trim().is_empty());
        self
    }
}

/// A theme that was found and parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTheme {
    /// Site path of the fetched document.
    pub path: String,
    pub source: ThemeSource,
    pub variables: ThemeVariables,
}

/// Locates, parses and injects theme variables.
#[derive(Debug)]
pub struct ThemeResolver<F> {
    fetcher: F,
    config: ThemeConfig,
}

impl<F: Fetcher> ThemeResolver<F> {
    pub fn new(fetcher: F, config: ThemeConfig) -> Self {
        Self { fetcher, config }
    }

    #[must_use]
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Name of the `<meta>` element that carries an explicit location.
    #[must_use]
    pub fn meta_name(&self) -> &'static str {
        match self.config.format {
            ThemeFormat::Page => "theme-configurator",
            ThemeFormat::Sheet => SHEET_NAME,
        }
    }

    /// Candidate locations for `path`, without the fallback.
    #[must_use]
    pub fn candidates(&self, path: &str) -> Vec<String> {
        candidate_paths(path, &self.config.suffix)
    }

    /// Find and parse the theme for `request`.
    ///
    /// Page format: an explicit location is fetched directly. Otherwise the
    /// candidates are probed strictly in order and the first successful fetch
    /// wins; when none succeeds the fallback is fetched once.
    ///
    /// Sheet format: the explicit location or `/{language}/theme-configuration`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Fetch`] when the final location cannot be fetched
    /// and [`ThemeError::Sheet`] when spreadsheet JSON is malformed.
    pub async fn resolve(&self, request: &ThemeRequest<'_>) -> Result<ResolvedTheme, ThemeError> {
        let explicit = request.explicit.or(self.config.path.as_deref());
        match self.config.format {
            ThemeFormat::Page => self.resolve_page(request.path, explicit).await,
            ThemeFormat::Sheet => self.resolve_sheet(request.language, explicit).await,
        }
    }

    async fn resolve_page(
        &self,
        path: &str,
        explicit: Option<&str>,
    ) -> Result<ResolvedTheme, ThemeError> {
        if let Some(location) = explicit {
            let doc = page_document(location);
            let body = self.fetcher.fetch(&doc).await?;
            return Ok(resolved(doc, ThemeSource::Explicit, parse_page(&body)));
        }

        for candidate in self.candidates(path) {
            let doc = page_document(&candidate);
            match self.fetcher.fetch(&doc).await {
                Ok(body) => return Ok(resolved(doc, ThemeSource::Candidate, parse_page(&body))),
                Err(e) => debug!(candidate = %doc, error = %e, "Theme candidate not available"),
            }
        }

        let doc = page_document(&self.config.fallback);
        debug!(fallback = %doc, "No theme candidate resolved, trying fallback");
        let body = self.fetcher.fetch(&doc).await?;
        Ok(resolved(doc, ThemeSource::Fallback, parse_page(&body)))
    }

    async fn resolve_sheet(
        &self,
        language: &str,
        explicit: Option<&str>,
    ) -> Result<ResolvedTheme, ThemeError> {
        let (location, source) = match explicit {
            Some(location) => (location.to_owned(), ThemeSource::Explicit),
            None => (format!("/{language}/{SHEET_NAME}"), ThemeSource::Language),
        };
        let doc = if location.ends_with(SHEET_EXTENSION) {
            location
        } else {
            format!("{location}{SHEET_EXTENSION}")
        };
        let body = self.fetcher.fetch(&doc).await?;
        match parse_sheet(&body) {
            Ok(variables) => Ok(resolved(doc, source, variables)),
            Err(err) => Err(ThemeError::Sheet {
                path: doc,
                source: err,
            }),
        }
    }

    /// Resolve and write the variables into `sink`.
    ///
    /// Failures are logged and leave the sink untouched, so the page keeps its
    /// default styling.
    pub async fn apply<S: StyleSink>(
        &self,
        sink: &mut S,
        request: &ThemeRequest<'_>,
    ) -> Option<ResolvedTheme> {
        match self.resolve(request).await {
            Ok(theme) => {
                sink.replace_style(&self.config.style_id, &theme.variables.to_css());
                info!(
                    path = %theme.path,
                    source = ?theme.source,
                    variables = theme.variables.len(),
                    "Theme applied"
                );
                Some(theme)
            }
            Err(e) => {
                warn!(page = request.path, error = %e, "Theme resolution failed, using default styling");
                None
            }
        }
    }
}

fn resolved(path: String, source: ThemeSource, variables: ThemeVariables) -> ResolvedTheme {
    ResolvedTheme {
        path,
        source,
        variables,
    }
}

/// Rendered-fragment location for a theme path.
fn page_document(location: &str) -> String {
    if location.ends_with(PAGE_EXTENSION) {
        return location.to_owned();
    }
    match location.trim_end_matches('/') {
        "" => format!("/index{PAGE_EXTENSION}"),
        trimmed => format!("{trimmed}{PAGE_EXTENSION}"),
    }
}

#[cfg(test)]
mod tests {
    use bw_dom::Document;
    use bw_fetch::MockFetcher;
    use pretty_assertions::assert_eq;

    use super::*;

    const THEME: &str = r#"<div class="theme-configurator">
        <div class="css-variable"><div>accent</div><div>#ff0000</div></div>
        <div class="css-variable"><div>radius</div><div>8px</div></div>
        <div class="css-variable"><div>accent</div><div>#00ff00</div></div>
    </div>"#;

    const CASCADE: [&str; 4] = [
        "/en/products/cards/theme-configurator.plain.html",
        "/en/products/theme-configurator.plain.html",
        "/en/theme-configurator.plain.html",
        "/theme-configurator.plain.html",
    ];

    fn request(path: &str) -> ThemeRequest<'_> {
        ThemeRequest::new(path, "en")
    }

    fn sheet_config() -> ThemeConfig {
        ThemeConfig {
            format: ThemeFormat::Sheet,
            ..ThemeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_first_resolving_candidate_wins() {
        let fetcher = MockFetcher::new()
            .with_page(CASCADE[2], THEME)
            .with_page(CASCADE[3], "<div></div>");
        let resolver = ThemeResolver::new(&fetcher, ThemeConfig::default());

        let theme = resolver.resolve(&request("/en/products/cards")).await.unwrap();

        assert_eq!(theme.path, CASCADE[2]);
        assert_eq!(theme.source, ThemeSource::Candidate);
        assert_eq!(fetcher.probes(), CASCADE[..3].to_vec());
    }

    #[tokio::test]
    async fn test_failures_advance_to_fallback() {
        let fetcher = MockFetcher::new()
            .with_status(CASCADE[1], 500)
            .with_transport_error(CASCADE[3], "connection reset")
            .with_page("/theme-configurator-root.plain.html", THEME);
        let resolver = ThemeResolver::new(&fetcher, ThemeConfig::default());

        let theme = resolver.resolve(&request("/en/products/cards")).await.unwrap();

        assert_eq!(theme.source, ThemeSource::Fallback);
        let mut expected = CASCADE.to_vec();
        expected.push("/theme-configurator-root.plain.html");
        assert_eq!(fetcher.probes(), expected);
    }

    #[tokio::test]
    async fn test_nothing_resolves() {
        let fetcher = MockFetcher::new();
        let resolver = ThemeResolver::new(&fetcher, ThemeConfig::default());
        let mut doc = Document::skeleton();

        let err = resolver.resolve(&request("/en")).await.unwrap_err();
        assert!(matches!(err, ThemeError::Fetch(ref e) if e.is_not_found()));

        assert!(resolver.apply(&mut doc, &request("/en")).await.is_none());
        assert!(doc.get_element_by_id("theme-configuration-styles").is_none());
        assert_eq!(fetcher.probe_count("/theme-configurator-root.plain.html"), 2);
    }

    #[tokio::test]
    async fn test_apply_injects_single_style() {
        let fetcher = MockFetcher::new().with_page("/theme-configurator.plain.html", THEME);
        let resolver = ThemeResolver::new(&fetcher, ThemeConfig::default());
        let mut doc = Document::skeleton();

        resolver.apply(&mut doc, &request("/")).await.unwrap();
        resolver.apply(&mut doc, &request("/")).await.unwrap();

        let styles = doc.find_all(doc.root(), |e| e.id() == Some("theme-configuration-styles"));
        assert_eq!(styles.len(), 1);
        assert!(doc.is_tag(styles[0], "style"));
        assert_eq!(
            doc.text_content(styles[0]),
            ":root {\n  --accent: #00ff00;\n  --radius: 8px;\n}"
        );
    }

    #[tokio::test]
    async fn test_explicit_location_skips_cascade() {
        let fetcher = MockFetcher::new().with_page("/themes/dark.plain.html", THEME);
        let resolver = ThemeResolver::new(&fetcher, ThemeConfig::default());

        let req = request("/en/products").with_explicit(Some("/themes/dark"));
        let theme = resolver.resolve(&req).await.unwrap();

        assert_eq!(theme.source, ThemeSource::Explicit);
        assert_eq!(fetcher.probes(), vec!["/themes/dark.plain.html"]);
    }

    #[tokio::test]
    async fn test_configured_path_and_blank_meta() {
        let fetcher = MockFetcher::new().with_page("/brand/theme.plain.html", THEME);
        let config = ThemeConfig {
            path: Some("/brand/theme/".to_owned()),
            ..ThemeConfig::default()
        };
        let resolver = ThemeResolver::new(&fetcher, config);

        let req = request("/en").with_explicit(Some("  "));
        assert_eq!(resolver.resolve(&req).await.unwrap().path, "/brand/theme.plain.html");
    }

    #[tokio::test]
    async fn test_sheet_per_language() {
        let fetcher = MockFetcher::new().with_page(
            "/fr/theme-configuration.json",
            r#"{"data": [{"key": "accent", "value": "blue"}]}"#,
        );
        let resolver = ThemeResolver::new(&fetcher, sheet_config());
        assert_eq!(resolver.meta_name(), "theme-configuration");

        let theme = resolver.resolve(&ThemeRequest::new("/fr/offres", "fr")).await.unwrap();
        assert_eq!(theme.source, ThemeSource::Language);
        assert_eq!(theme.variables.get("accent"), Some("blue"));
    }

    #[tokio::test]
    async fn test_malformed_sheet() {
        let fetcher = MockFetcher::new().with_page("/custom.json", r#"{"rows": []}"#);
        let resolver = ThemeResolver::new(&fetcher, sheet_config());
        let req = request("/en").with_explicit(Some("/custom.json"));

        let err = resolver.resolve(&req).await.unwrap_err();
        assert!(matches!(err, ThemeError::Sheet { ref path, .. } if path == "/custom.json"));
    }

    #[test]
    fn test_page_document() {
        assert_eq!(page_document("/en/theme-configurator"), "/en/theme-configurator.plain.html");
        assert_eq!(page_document("/a/b.plain.html"), "/a/b.plain.html");
        assert_eq!(page_document("/"), "/index.plain.html");
    }
}
