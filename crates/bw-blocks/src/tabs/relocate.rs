//! Post-build composition: accordion sections move into tab panels.

use bw_dom::{Document, NodeId};
use tracing::debug;

use super::TabsInstance;

/// Class fragment that marks an accordion variant anywhere in the page.
pub const ACCORDION_VARIANT_MARKER: &str = "accordion-varient";

/// Move accordion-variant elements into the panels of `tabs`, pairing the
/// i-th element with the i-th panel.
///
/// Elements are searched in the block's `main` (or the whole document when
/// there is none). Elements that contain the tabs block, or already sit inside
/// it, are not candidates. Extra elements or panels are left alone. Returns
/// the number of elements moved.
pub fn relocate_accordions(doc: &mut Document, tabs: &TabsInstance) -> usize {
    let block = tabs.block();
    let scope = doc
        .closest(block, |e| e.is("main"))
        .unwrap_or_else(|| doc.root());
    let candidates: Vec<NodeId> = doc
        .find_all(scope, |e| {
            e.attr("class")
                .is_some_and(|c| c.contains(ACCORDION_VARIANT_MARKER))
        })
        .into_iter()
        .filter(|c| !doc.contains(*c, block) && !doc.contains(block, *c))
        .collect();
    if candidates.is_empty() {
        return 0;
    }
    if candidates.len() != tabs.len() {
        debug!(
            tabs = tabs.len(),
            accordions = candidates.len(),
            "Accordion count does not match tab count; pairing by index"
        );
    }

    let mut moved = 0;
    for (item, candidate) in tabs.items().iter().zip(candidates) {
        // An earlier move may have carried this candidate along already.
        if doc.contains(block, candidate) {
            continue;
        }
        doc.append(item.panel, candidate);
        moved += 1;
    }
    moved
}
