//! Candidate cascade.

use bw_fetch::strip_query;

/// Candidate theme locations for `current_path`, most specific first.
///
/// The page's own location comes first, then every ancestor, then the site
/// root. Empty segments are ignored, so `/en//products/` and `/en/products`
/// produce the same cascade. The configured fallback is not part of the list.
#[must_use]
pub fn candidate_paths(current_path: &str, suffix: &str) -> Vec<String> {
    let suffix = suffix.trim_matches('/');
    let segments: Vec<&str> = strip_query(current_path)
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    (0..=segments.len())
        .rev()
        .map(|depth| match depth {
            0 => format!("/{suffix}"),
            _ => format!("/{}/{suffix}", segments[..depth].join("/")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cascade_for_nested_page() {
        assert_eq!(
            candidate_paths("/en/products/cards", "theme-configurator"),
            vec![
                "/en/products/cards/theme-configurator",
                "/en/products/theme-configurator",
                "/en/theme-configurator",
                "/theme-configurator",
            ]
        );
    }

    #[test]
    fn test_trailing_slash_and_query() {
        assert_eq!(
            candidate_paths("/en/?utm=x", "theme-configurator"),
            vec!["/en/theme-configurator", "/theme-configurator"]
        );
    }

    #[test]
    fn test_root_page() {
        assert_eq!(candidate_paths("/", "/theme/"), vec!["/theme"]);
        assert_eq!(candidate_paths("", "theme"), vec!["/theme"]);
    }
}
