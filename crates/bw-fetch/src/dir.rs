//! Local directory backend.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::fetcher::{FetchError, Fetcher, ImageLoad, ResourceLoader, strip_query};

/// Serves site paths from a local content directory.
///
/// `/en/nav.plain.html` maps to `<root>/en/nav.plain.html`. Query strings are
/// ignored and parent-directory components are rejected.
#[derive(Clone, Debug)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    /// Create a fetcher rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a site path to a file below the root.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPath`] for absolute URLs or paths that
    /// escape the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = strip_query(path).trim_start_matches('/');
        if relative.contains("://") {
            return Err(FetchError::InvalidPath(path.to_owned()));
        }
        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(FetchError::InvalidPath(path.to_owned()));
        }
        Ok(self.root.join(relative))
    }
}

impl Fetcher for DirFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let file = self.resolve(path)?;
        debug!(file = %file.display(), "Reading");
        let owned = path.to_owned();
        tokio::task::spawn_blocking(move || {
            std::fs::read_to_string(&file).map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    FetchError::NotFound { path: owned }
                } else {
                    FetchError::Io { path: owned, source }
                }
            })
        })
        .await
        .map_err(|e| FetchError::Transport {
            path: path.to_owned(),
            message: e.to_string(),
        })?
    }
}

impl ResourceLoader for DirFetcher {
    async fn load_image(&self, src: &str) -> ImageLoad {
        if src.is_empty() {
            return ImageLoad::Skipped;
        }
        match self.resolve(src) {
            Ok(file) if file.is_file() => ImageLoad::Loaded,
            Ok(_) => ImageLoad::Failed,
            // Remote images are not checked offline.
            Err(_) => ImageLoad::Skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn content_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("en")).unwrap();
        std::fs::write(dir.path().join("en/nav.plain.html"), "<ul></ul>").unwrap();
        std::fs::write(dir.path().join("hero.png"), [0u8; 4]).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_fetch_existing_file() {
        let dir = content_dir();
        let fetcher = DirFetcher::new(dir.path());
        let body = fetcher.fetch("/en/nav.plain.html?x=1").await.unwrap();
        assert_eq!(body, "<ul></ul>");
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_not_found() {
        let dir = content_dir();
        let fetcher = DirFetcher::new(dir.path());
        let err = fetcher.fetch("/fr/nav.plain.html").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_parent_components_are_rejected() {
        let dir = content_dir();
        let fetcher = DirFetcher::new(dir.path());
        let err = fetcher.fetch("/../etc/passwd").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidPath(_)));
    }

    #[tokio::test]
    async fn test_load_image() {
        let dir = content_dir();
        let fetcher = DirFetcher::new(dir.path());
        assert_eq!(fetcher.load_image("/hero.png").await, ImageLoad::Loaded);
        assert_eq!(fetcher.load_image("/missing.png").await, ImageLoad::Failed);
        assert_eq!(
            fetcher.load_image("https://cdn.example.com/a.png").await,
            ImageLoad::Skipped
        );
    }
}
