//! Responsive picture markup for media-bus images.

use bw_dom::ElementSpec;
use bw_dom::builder::{img, picture, source};
use url::Url;

/// One responsive breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    /// Media query, or `None` for the catch-all breakpoint.
    pub media: Option<&'static str>,
    /// Requested rendition width.
    pub width: u32,
}

impl Breakpoint {
    #[must_use]
    pub const fn new(media: &'static str, width: u32) -> Self {
        Self {
            media: Some(media),
            width,
        }
    }

    #[must_use]
    pub const fn any(width: u32) -> Self {
        Self { media: None, width }
    }
}

/// Breakpoints used when a block does not specify its own.
pub const DEFAULT_BREAKPOINTS: &[Breakpoint] = &[
    Breakpoint::new("(min-width: 600px)", 2000),
    Breakpoint::any(750),
];

/// Build a `<picture>` with WebP sources per breakpoint, original-format
/// sources for all but the last breakpoint and a fallback `<img>` at the last
/// breakpoint's width.
///
/// `src` is resolved against `base`; only its path is kept so renditions come
/// from the page's own origin. A source that cannot be resolved yields a
/// picture with a plain `<img src>`.
#[must_use]
pub fn optimized_picture(
    base: &Url,
    src: &str,
    alt: &str,
    eager: bool,
    breakpoints: &[Breakpoint],
) -> ElementSpec {
    let loading = if eager { "eager" } else { "lazy" };
    let (Ok(url), Some(last)) = (base.join(src), breakpoints.last()) else {
        return picture().child(img().attr("loading", loading).attr("alt", alt).attr("src", src));
    };
    let path = url.path();
    let ext = path.rsplit_once('.').map_or("", |(_, ext)| ext);

    let webp = breakpoints.iter().map(|br| {
        source()
            .attr_opt("media", br.media)
            .attr("type", "image/webp")
            .attr(
                "srcset",
                format!("{path}?width={}&format=webply&optimize=medium", br.width),
            )
    });
    let fallback_sources = breakpoints[..breakpoints.len() - 1].iter().map(|br| {
        source().attr_opt("media", br.media).attr(
            "srcset",
            format!("{path}?width={}&format={ext}&optimize=medium", br.width),
        )
    });

    picture()
        .children(webp)
        .children(fallback_sources)
        .child(
            img()
                .attr("loading", loading)
                .attr("alt", alt)
                .attr(
                    "src",
                    format!("{path}?width={}&format={ext}&optimize=medium", last.width),
                ),
        )
}

#[cfg(test)]
mod tests {
    use bw_dom::Document;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_breakpoints() {
        let base = Url::parse("https://example.com/en/page").unwrap();
        let mut doc = Document::new();
        let pic = doc.build(optimized_picture(
            &base,
            "./media_1.png?width=100",
            "Alt",
            false,
            DEFAULT_BREAKPOINTS,
        ));

        assert_eq!(
            doc.outer_html(pic),
            concat!(
                "<picture>",
                "<source media=\"(min-width: 600px)\" type=\"image/webp\" srcset=\"/en/media_1.png?width=2000&amp;format=webply&amp;optimize=medium\">",
                "<source type=\"image/webp\" srcset=\"/en/media_1.png?width=750&amp;format=webply&amp;optimize=medium\">",
                "<source media=\"(min-width: 600px)\" srcset=\"/en/media_1.png?width=2000&amp;format=png&amp;optimize=medium\">",
                "<img loading=\"lazy\" alt=\"Alt\" src=\"/en/media_1.png?width=750&amp;format=png&amp;optimize=medium\">",
                "</picture>"
            )
        );
    }

    #[test]
    fn test_single_breakpoint_eager() {
        let base = Url::parse("https://example.com/").unwrap();
        let mut doc = Document::new();
        let pic = doc.build(optimized_picture(
            &base,
            "https://example.com/card.jpg",
            "",
            true,
            &[Breakpoint::any(750)],
        ));

        let img = doc.find(pic, |e| e.is("img")).unwrap();
        assert_eq!(doc.attr(img, "loading"), Some("eager"));
        assert_eq!(
            doc.attr(img, "src"),
            Some("/card.jpg?width=750&format=jpg&optimize=medium")
        );
        assert_eq!(doc.find_all(pic, |e| e.is("source")).len(), 1);
    }
}
