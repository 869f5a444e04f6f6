//! Page-scoped state shared by block decorators.

use std::collections::HashMap;

use url::Url;

use crate::content::Viewport;
use crate::tabs::TabsInstance;

/// Page-wide counters for generated identifiers.
///
/// Each scope counts independently from 1, so the first tabs block on a page
/// gets `tablist-1` regardless of how many accordions came before it.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    counters: HashMap<String, usize>,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next number in `scope`, starting at 1.
    pub fn next(&mut self, scope: &str) -> usize {
        let counter = self.counters.entry(scope.to_owned()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// How many numbers `scope` has handed out.
    #[must_use]
    pub fn issued(&self, scope: &str) -> usize {
        self.counters.get(scope).copied().unwrap_or(0)
    }
}

/// State owned by the page orchestrator and lent to every decorator.
#[derive(Clone, Debug)]
pub struct DecorateContext {
    /// Identifier generator for document-wide ids.
    pub ids: IdGenerator,
    /// Viewport used for responsive choices.
    pub viewport: Viewport,
    /// Page URL; relative image sources resolve against it.
    pub page_url: Url,
    /// Whether the page renders inside the authoring environment.
    pub author_mode: bool,
    /// Tabs instances built on this page, in build order.
    pub tabs: Vec<TabsInstance>,
}

impl DecorateContext {
    /// Context for `page_url` with a desktop viewport.
    #[must_use]
    pub fn new(page_url: Url) -> Self {
        Self {
            ids: IdGenerator::new(),
            viewport: Viewport::default(),
            page_url,
            author_mode: false,
            tabs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_author_mode(mut self, author_mode: bool) -> Self {
        self.author_mode = author_mode;
        self
    }

    /// Tabs instance whose block is `block`.
    pub fn tabs_for(&mut self, block: bw_dom::NodeId) -> Option<&mut TabsInstance> {
        self.tabs.iter_mut().find(|t| t.block() == block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generator_scopes_are_independent() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next("tabs"), 1);
        assert_eq!(ids.next("tabs"), 2);
        assert_eq!(ids.next("accordion"), 1);
        assert_eq!(ids.issued("tabs"), 2);
        assert_eq!(ids.issued("cards"), 0);
    }
}
