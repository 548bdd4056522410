//! Closing open dropdowns when the user interacts elsewhere.

use std::fmt;

use rxpad_types::InteractionTarget;
use tracing::debug;

use crate::row_store::RowStore;

type InsideDropdown = dyn Fn(InteractionTarget, &RowStore) -> bool + Send + Sync;

/// Watches boundary interactions and closes every open dropdown when one
/// lands outside all of them.
///
/// Whether an interaction counts as "inside" is decided by an injectable
/// predicate. The default treats only presses on a rendered dropdown (open
/// and non-empty) as inside.
pub struct DismissalWatcher {
    inside_dropdown: Box<InsideDropdown>,
}

impl DismissalWatcher {
    pub fn new<F>(inside_dropdown: F) -> Self
    where
        F: Fn(InteractionTarget, &RowStore) -> bool + Send + Sync + 'static,
    {
        Self {
            inside_dropdown: Box::new(inside_dropdown),
        }
    }

    /// Report an interaction. Returns `true` when it dismissed the dropdowns.
    pub fn observe(&self, store: &mut RowStore, target: InteractionTarget) -> bool {
        if (self.inside_dropdown)(target, store) {
            return false;
        }
        let closed = store.close_all_dropdowns();
        debug!(?target, closed, "dropdowns dismissed");
        true
    }
}

impl Default for DismissalWatcher {
    fn default() -> Self {
        Self::new(is_rendered_dropdown)
    }
}

impl fmt::Debug for DismissalWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissalWatcher").finish_non_exhaustive()
    }
}

fn is_rendered_dropdown(target: InteractionTarget, store: &RowStore) -> bool {
    match target {
        InteractionTarget::Dropdown(row_id) => store
            .get(row_id)
            .is_some_and(|row| row.dropdown_open && !row.suggestions.is_empty()),
        InteractionTarget::SearchField(_) | InteractionTarget::Elsewhere => false,
    }
}
