//! Section and block marking.
//!
//! Authored pages arrive as `main > div` sections holding default content
//! and block tables. Marking turns them into the structure decoration and
//! styling rely on:
//!
//! ```html
//! <main>
//!   <div class="section cards-container" data-section-status="initialized" style="display: none;">
//!     <div class="default-content-wrapper"><h2>Offers</h2></div>
//!     <div class="cards-wrapper">
//!       <div class="cards block" data-block-name="cards" data-block-status="initialized">...</div>
//!     </div>
//!   </div>
//! </main>
//! ```
//!
//! Block decoration itself happens later, one section at a time.

use bw_blocks::{BLOCK_NAME_ATTR, BLOCK_STATUS_ATTR};
use bw_dom::builder::img;
use bw_dom::{Document, NodeId, read_block_config, to_class_name};

pub const SECTION_STATUS_ATTR: &str = "data-section-status";

const SECTION_CLASS: &str = "section";
const BLOCK_CLASS: &str = "block";
const DEFAULT_CONTENT_WRAPPER: &str = "default-content-wrapper";
const SECTION_METADATA: &str = "section-metadata";

/// Load state of a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionStatus {
    Initialized,
    Loading,
    Loaded,
}

impl SectionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "initialized" => Some(Self::Initialized),
            "loading" => Some(Self::Loading),
            "loaded" => Some(Self::Loaded),
            _ => None,
        }
    }
}

#[must_use]
pub fn section_status(doc: &Document, section: NodeId) -> Option<SectionStatus> {
    doc.attr(section, SECTION_STATUS_ATTR)
        .and_then(SectionStatus::parse)
}

pub fn set_section_status(doc: &mut Document, section: NodeId, status: SectionStatus) {
    doc.set_attr(section, SECTION_STATUS_ATTR, status.as_str());
}

/// Sections of `main` in document order, including sections that were moved
/// into other blocks.
#[must_use]
pub fn sections(doc: &Document, main: NodeId) -> Vec<NodeId> {
    doc.find_all(main, |e| e.is("div") && e.has_class(SECTION_CLASS))
}

/// Mark every unmarked `main > div` as a hidden, initialized section.
///
/// Returns the newly marked sections.
pub fn decorate_sections(doc: &mut Document, main: NodeId) -> Vec<NodeId> {
    let sections =
        doc.children_matching(main, |e| e.is("div") && !e.has_attr(SECTION_STATUS_ATTR));
    for section in &sections {
        decorate_section(doc, *section);
    }
    sections
}

fn decorate_section(doc: &mut Document, section: NodeId) {
    let mut wrappers: Vec<NodeId> = Vec::new();
    let mut in_default_content = false;
    for child in doc.children(section) {
        let is_block = doc
            .element(child)
            .is_some_and(|e| e.is("div") && e.first_class().is_some());
        if is_block || !in_default_content {
            let wrapper = doc.create_element("div");
            in_default_content = !is_block;
            if in_default_content {
                doc.add_class(wrapper, DEFAULT_CONTENT_WRAPPER);
            }
            wrappers.push(wrapper);
        }
        if let Some(wrapper) = wrappers.last() {
            doc.append(*wrapper, child);
        }
    }
    for wrapper in wrappers {
        doc.append(section, wrapper);
    }

    doc.add_class(section, SECTION_CLASS);
    set_section_status(doc, section, SectionStatus::Initialized);
    doc.hide(section);

    if let Some(meta) = doc.find(section, |e| e.is("div") && e.has_class(SECTION_METADATA)) {
        apply_section_metadata(doc, section, meta);
        let wrapper = doc.parent(meta).filter(|w| *w != section).unwrap_or(meta);
        doc.remove(wrapper);
    }
}

/// `style` becomes section classes; every other key becomes a `data-*`
/// attribute.
fn apply_section_metadata(doc: &mut Document, section: NodeId, meta: NodeId) {
    let config = read_block_config(doc, meta);
    for (key, value) in config.iter() {
        let value = value.as_text();
        if key == "style" {
            for style in value.split(',').map(to_class_name).filter(|s| !s.is_empty()) {
                doc.add_class(section, &style);
            }
        } else {
            doc.set_attr(section, &format!("data-{key}"), value);
        }
    }
}

/// Mark the blocks (`div.section > div > div[class]`) below `main`.
///
/// Returns the newly marked blocks.
pub fn decorate_blocks(doc: &mut Document, main: NodeId) -> Vec<NodeId> {
    let mut candidates = Vec::new();
    for section in sections(doc, main) {
        for wrapper in doc.children_matching(section, |e| e.is("div")) {
            candidates.extend(doc.children_matching(wrapper, |e| e.is("div")));
        }
    }
    candidates
        .into_iter()
        .filter(|block| decorate_block(doc, *block))
        .collect()
}

/// Mark one block: `block` class, name and status attributes, plus the
/// `{name}-wrapper` and `{name}-container` classes on its ancestors.
///
/// Returns `false` for elements without a class or already marked.
pub fn decorate_block(doc: &mut Document, block: NodeId) -> bool {
    let Some(name) = doc
        .element(block)
        .and_then(|e| e.first_class())
        .map(str::to_owned)
    else {
        return false;
    };
    if doc.has_class(block, BLOCK_CLASS) {
        return false;
    }

    doc.add_class(block, BLOCK_CLASS);
    doc.set_attr(block, BLOCK_NAME_ATTR, name.as_str());
    doc.set_attr(block, BLOCK_STATUS_ATTR, "initialized");
    if let Some(wrapper) = doc.parent(block) {
        doc.add_class(wrapper, &format!("{name}-wrapper"));
    }
    if let Some(section) = doc.closest_with_class(block, SECTION_CLASS) {
        doc.add_class(section, &format!("{name}-container"));
    }
    true
}

/// Append an `<img>` to every `span.icon-{name}` that has none yet.
pub fn decorate_icons(doc: &mut Document, scope: NodeId, code_base_path: &str) {
    let base = code_base_path.trim_end_matches('/');
    for span in doc.find_all(scope, |e| e.is("span") && e.has_class("icon")) {
        if doc.find(span, |e| e.is("img")).is_some() {
            continue;
        }
        let Some(name) = doc.element(span).and_then(|e| {
            e.classes()
                .find_map(|c| c.strip_prefix("icon-"))
                .map(str::to_owned)
        }) else {
            continue;
        };
        doc.build_into(
            span,
            img()
                .attr("data-icon-name", name.as_str())
                .attr("src", format!("{base}/icons/{name}.svg"))
                .attr("alt", "")
                .attr("loading", "lazy"),
        );
    }
}
