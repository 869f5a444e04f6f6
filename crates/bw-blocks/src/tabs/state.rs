//! Tabs lifecycle.

use super::TabsError;

/// Lifecycle of one tabs block.
///
/// ```text
/// Uninitialized --build(n > 0)--> Active { index: 0, count: n }
/// Uninitialized --build(0)------> Built
/// Active { .. } --activate(i)---> Active { index: i, count }   (i < count)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TabsState {
    /// Nothing has been generated yet.
    #[default]
    Uninitialized,
    /// Built, but no row yielded a usable label.
    Built,
    /// Built with `count` tabs; tab `index` is selected and visible.
    Active { index: usize, count: usize },
}

impl TabsState {
    /// State after building `count` tab items.
    ///
    /// # Errors
    ///
    /// Returns [`TabsError::AlreadyBuilt`] unless the state is
    /// [`Uninitialized`](Self::Uninitialized).
    pub fn build(self, count: usize) -> Result<Self, TabsError> {
        match self {
            Self::Uninitialized if count == 0 => Ok(Self::Built),
            Self::Uninitialized => Ok(Self::Active { index: 0, count }),
            Self::Built | Self::Active { .. } => Err(TabsError::AlreadyBuilt),
        }
    }

    /// State after activating tab `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TabsError::NotBuilt`] before a successful build with at least
    /// one tab, and [`TabsError::IndexOutOfRange`] for an unknown tab.
    pub fn activate(self, index: usize) -> Result<Self, TabsError> {
        match self {
            Self::Active { count, .. } if index < count => Ok(Self::Active { index, count }),
            Self::Active { count, .. } => Err(TabsError::IndexOutOfRange { index, count }),
            Self::Built => Err(TabsError::IndexOutOfRange { index, count: 0 }),
            Self::Uninitialized => Err(TabsError::NotBuilt),
        }
    }

    /// Index of the active tab.
    #[must_use]
    pub fn active(self) -> Option<usize> {
        match self {
            Self::Active { index, .. } => Some(index),
            Self::Uninitialized | Self::Built => None,
        }
    }

    /// Number of tabs, once built.
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Self::Active { count, .. } => count,
            Self::Uninitialized | Self::Built => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_activates_first_tab() {
        let state = TabsState::default().build(3).unwrap();
        assert_eq!(state, TabsState::Active { index: 0, count: 3 });
        assert_eq!(state.active(), Some(0));
    }

    #[test]
    fn test_build_without_tabs() {
        let state = TabsState::Uninitialized.build(0).unwrap();
        assert_eq!(state, TabsState::Built);
        assert_eq!(state.active(), None);
        assert!(matches!(
            state.activate(0),
            Err(TabsError::IndexOutOfRange { index: 0, count: 0 })
        ));
    }

    #[test]
    fn test_build_runs_once() {
        let state = TabsState::Uninitialized.build(2).unwrap();
        assert!(matches!(state.build(2), Err(TabsError::AlreadyBuilt)));
        assert!(matches!(TabsState::Built.build(1), Err(TabsError::AlreadyBuilt)));
    }

    #[test]
    fn test_activate() {
        let state = TabsState::Uninitialized.build(2).unwrap();
        assert_eq!(
            state.activate(1).unwrap(),
            TabsState::Active { index: 1, count: 2 }
        );
        assert!(matches!(
            state.activate(2),
            Err(TabsError::IndexOutOfRange { index: 2, count: 2 })
        ));
        assert!(matches!(
            TabsState::Uninitialized.activate(0),
            Err(TabsError::NotBuilt)
        ));
    }
}
