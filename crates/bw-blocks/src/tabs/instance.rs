//! A built tabs block and its activation.

use bw_dom::{Document, NodeId};

use super::{TabsError, TabsState};

/// One tab: its control and the panel it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabItem {
    pub button: NodeId,
    pub panel: NodeId,
}

/// A tabs block after build.
///
/// The instance owns the state; the DOM attributes are derived from it by
/// [`sync`](Self::sync), so the document never shows two visible panels or
/// zero selected controls.
#[derive(Clone, Debug)]
pub struct TabsInstance {
    id: usize,
    block: NodeId,
    tablist: NodeId,
    items: Vec<TabItem>,
    state: TabsState,
}

impl TabsInstance {
    pub(crate) fn new(
        id: usize,
        block: NodeId,
        tablist: NodeId,
        items: Vec<TabItem>,
    ) -> Result<Self, TabsError> {
        let state = TabsState::Uninitialized.build(items.len())?;
        Ok(Self {
            id,
            block,
            tablist,
            items,
            state,
        })
    }

    /// Page-unique number of this tabs block (1-based).
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn block(&self) -> NodeId {
        self.block
    }

    #[must_use]
    pub fn tablist(&self) -> NodeId {
        self.tablist
    }

    #[must_use]
    pub fn items(&self) -> &[TabItem] {
        &self.items
    }

    #[must_use]
    pub fn state(&self) -> TabsState {
        self.state
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Select tab `index`, hiding every other panel.
    ///
    /// # Errors
    ///
    /// Returns [`TabsError::IndexOutOfRange`] for an unknown tab; the document
    /// is left unchanged.
    pub fn activate(&mut self, doc: &mut Document, index: usize) -> Result<(), TabsError> {
        self.state = self.state.activate(index)?;
        self.sync(doc);
        Ok(())
    }

    /// Write the current state to the controls and panels.
    pub fn sync(&self, doc: &mut Document) {
        let active = self.state.active();
        for (i, item) in self.items.iter().enumerate() {
            let selected = active == Some(i);
            doc.set_attr(item.button, "aria-selected", selected.to_string());
            doc.set_attr(item.button, "tabindex", if selected { "0" } else { "-1" });
            doc.set_attr(item.panel, "aria-hidden", (!selected).to_string());
        }
    }

    /// Indices whose control is marked selected in the document.
    #[must_use]
    pub fn selected_in(&self, doc: &Document) -> Vec<usize> {
        self.indices_where(|i| doc.attr(i.button, "aria-selected") == Some("true"))
    }

    /// Indices whose panel is visible in the document.
    #[must_use]
    pub fn visible_in(&self, doc: &Document) -> Vec<usize> {
        self.indices_where(|i| doc.attr(i.panel, "aria-hidden") == Some("false"))
    }

    fn indices_where(&self, pred: impl Fn(&TabItem) -> bool) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| pred(item))
            .map(|(i, _)| i)
            .collect()
    }
}
