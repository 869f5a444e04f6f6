//! Configuration management for Blockwork.
//!
//! Parses `bw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.origin`
//! - `theme.path`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content origin.
    pub origin: Option<String>,
    /// Override local content directory.
    pub content_dir: Option<PathBuf>,
    /// Override authoring mode.
    pub author_mode: Option<bool>,
    /// Override explicit theme path.
    pub theme_path: Option<String>,
    /// Override simulated viewport width.
    pub viewport_width: Option<u32>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "bw.toml";

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content site configuration.
    pub site: SiteConfig,
    /// Theme resolution configuration.
    pub theme: ThemeConfig,
    /// Page assembly configuration.
    pub page: PageConfig,

    /// Local content directory, resolved against the config file directory.
    #[serde(skip)]
    pub content_dir: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Content site configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Content origin pages and fragments are fetched from.
    pub origin: String,
    /// Prefix for code assets such as `styles/lazy-styles.css`.
    pub code_base_path: String,
    /// Language used when the page path carries none.
    pub default_language: String,
    /// Whether pages are rendered for the authoring environment.
    pub author_mode: bool,
    /// Local content directory (relative to the config file).
    content_dir: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:3000".to_owned(),
            code_base_path: String::new(),
            default_language: "en".to_owned(),
            author_mode: false,
            content_dir: None,
        }
    }
}

/// Tabular format of the theme configuration document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeFormat {
    /// Rendered page fragment with `.css-variable` rows (`.plain.html`).
    #[default]
    Page,
    /// Spreadsheet JSON with `key`/`value` columns (`.json`).
    Sheet,
}

/// Theme resolution configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Path segment appended to each candidate location.
    pub suffix: String,
    /// Location tried when no candidate resolves.
    pub fallback: String,
    /// `id` of the injected style element.
    pub style_id: String,
    /// Explicit theme location; skips the candidate cascade.
    pub path: Option<String>,
    /// Tabular format of the theme document.
    pub format: ThemeFormat,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            suffix: "theme-configurator".to_owned(),
            fallback: "/theme-configurator-root".to_owned(),
            style_id: "theme-configuration-styles".to_owned(),
            path: None,
            format: ThemeFormat::Page,
        }
    }
}

/// Page assembly configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Minimum delay before the delayed phase runs, in milliseconds.
    pub delayed_ms: u64,
    /// Simulated viewport width used by responsive decisions.
    pub viewport_width: u32,
    /// Viewport width from which fonts load during the eager phase.
    pub eager_fonts_min_width: u32,
    /// Placeholder sheet name below the language folder.
    pub placeholders: String,
    /// Default header fragment path.
    pub nav: String,
    /// Default footer fragment path.
    pub footer: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            delayed_ms: 3000,
            viewport_width: 1440,
            eager_fonts_min_width: 900,
            placeholders: "placeholders.json".to_owned(),
            nav: "/nav".to_owned(),
            footer: "/footer".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.origin`").
        field: String,
        /// Error message (e.g., "${`SITE_ORIGIN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a site path field to start with `/`.
fn require_site_path(path: &str, field: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with /"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `bw.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The result is validated again
    /// after overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(origin) = &settings.origin {
            self.site.origin.clone_from(origin);
        }
        if let Some(content_dir) = &settings.content_dir {
            self.content_dir = Some(content_dir.clone());
        }
        if let Some(author_mode) = settings.author_mode {
            self.site.author_mode = author_mode;
        }
        if let Some(theme_path) = &settings.theme_path {
            self.theme.path = Some(theme_path.clone());
        }
        if let Some(width) = settings.viewport_width {
            self.page.viewport_width = width;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_theme()?;
        self.validate_page()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.origin, "site.origin")?;
        require_http_url(&self.site.origin, "site.origin")?;
        require_non_empty(&self.site.default_language, "site.default_language")?;
        Ok(())
    }

    fn validate_theme(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.theme.suffix, "theme.suffix")?;
        if self.theme.suffix.contains('/') {
            return Err(ConfigError::Validation(
                "theme.suffix must be a single path segment".to_owned(),
            ));
        }
        require_site_path(&self.theme.fallback, "theme.fallback")?;
        require_non_empty(&self.theme.style_id, "theme.style_id")?;
        if let Some(path) = &self.theme.path {
            require_site_path(path, "theme.path")?;
        }
        Ok(())
    }

    fn validate_page(&self) -> Result<(), ConfigError> {
        if self.page.viewport_width == 0 {
            return Err(ConfigError::Validation(
                "page.viewport_width cannot be 0".to_owned(),
            ));
        }
        require_non_empty(&self.page.placeholders, "page.placeholders")?;
        require_site_path(&self.page.nav, "page.nav")?;
        require_site_path(&self.page.footer, "page.footer")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.origin = expand::expand_env(&self.site.origin, "site.origin")?;
        if let Some(ref path) = self.theme.path {
            self.theme.path = Some(expand::expand_env(path, "theme.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_dir = self
            .site
            .content_dir
            .as_deref()
            .map(|dir| config_dir.join(dir));
    }
}
