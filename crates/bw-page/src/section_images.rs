//! Section background pictures from `data-image` metadata.

use bw_dom::builder::{img, picture, source};
use bw_dom::{Document, NodeId};
use url::Url;

const BACKGROUND_CLASS: &str = "section-bg";

/// (attribute, rendition width, media query), widest first.
const RENDITIONS: [(&str, u32, &str); 3] = [
    ("data-image", 1400, "(min-width: 992px)"),
    ("data-tab-image", 1024, "(min-width: 768px)"),
    ("data-mob-image", 768, "(min-width: 320px)"),
];

/// Prepend a responsive `picture.section-bg` to every section below `main`
/// that has a `data-image`.
///
/// Tablet and mobile images fall back to the next wider one. Sections that
/// already have a background picture are skipped. Returns the number of
/// sections enhanced.
pub fn decorate_section_images(doc: &mut Document, main: NodeId, base: &Url) -> usize {
    let sections = doc.find_all(main, |e| e.has_class("section") && e.has_attr("data-image"));
    let mut enhanced = 0;
    for section in sections {
        let already = doc
            .find(section, |e| e.is("picture") && e.has_class(BACKGROUND_CLASS))
            .is_some();
        if already {
            continue;
        }

        let mut candidates: Vec<String> = Vec::with_capacity(RENDITIONS.len());
        for (attr, _, _) in RENDITIONS {
            let own = doc
                .attr(section, attr)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned);
            match own.or_else(|| candidates.last().cloned()) {
                Some(src) => candidates.push(src),
                None => break,
            }
        }
        let Some(desktop) = candidates.first().cloned() else {
            continue;
        };

        let sources = RENDITIONS.iter().zip(&candidates).filter_map(|((_, width, media), src)| {
            let url = base.join(src).ok()?;
            Some(
                source()
                    .attr(
                        "srcset",
                        format!("{}?width={width}&format=webply&optimize=medium", url.path()),
                    )
                    .attr("type", "image/webp")
                    .attr("media", *media),
            )
        });
        let background = doc.build(
            picture()
                .class(BACKGROUND_CLASS)
                .children(sources)
                .child(
                    img()
                        .attr("src", desktop)
                        .attr("alt", "")
                        .class("sec-img")
                        .attr("loading", "lazy"),
                ),
        );
        doc.add_class(section, "section-has-bg");
        doc.prepend(section, background);
        enhanced += 1;
    }
    enhanced
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/en/page").unwrap()
    }

    #[test]
    fn test_fallback_chain() {
        let mut doc = Document::parse(
            r#"<main><div class="section" data-image="/media/desk.jpg?x=1" data-mob-image="mob.jpg"><p>Hi</p></div></main>"#,
        );
        let main = doc.main().unwrap();
        assert_eq!(decorate_section_images(&mut doc, main, &base()), 1);

        let section = doc.find(main, |e| e.has_class("section")).unwrap();
        assert!(doc.has_class(section, "section-has-bg"));
        let picture = doc.first_element_child(section).unwrap();
        assert_eq!(
            doc.outer_html(picture),
            concat!(
                r#"<picture class="section-bg">"#,
                r#"<source srcset="/media/desk.jpg?width=1400&amp;format=webply&amp;optimize=medium" type="image/webp" media="(min-width: 992px)">"#,
                r#"<source srcset="/media/desk.jpg?width=1024&amp;format=webply&amp;optimize=medium" type="image/webp" media="(min-width: 768px)">"#,
                r#"<source srcset="/en/mob.jpg?width=768&amp;format=webply&amp;optimize=medium" type="image/webp" media="(min-width: 320px)">"#,
                r#"<img src="/media/desk.jpg?x=1" alt="" class="sec-img" loading="lazy">"#,
                "</picture>"
            )
        );
    }

    #[test]
    fn test_idempotent_and_blank() {
        let mut doc = Document::parse(
            r#"<main><div class="section" data-image="/a.jpg"></div><div class="section" data-image="  "></div></main>"#,
        );
        let main = doc.main().unwrap();
        assert_eq!(decorate_section_images(&mut doc, main, &base()), 1);
        assert_eq!(decorate_section_images(&mut doc, main, &base()), 0);
        assert_eq!(doc.find_all(main, |e| e.is("picture")).len(), 1);
    }
}
