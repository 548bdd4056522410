//! Keyed collection of medicine rows.
//!
//! Rows are kept in insertion order and addressed by [`RowId`] only, never by
//! position, so removing one row cannot disturb lookups of the others. Every
//! field change goes through [`RowStore::update`], which is also where the
//! row invariants are enforced:
//!
//! - `highlighted_index` always points inside `suggestions` (or is `None`);
//!   when the suggestion list shrinks the highlight is dropped.
//! - `pending_request_seq` only moves forward.

use indexmap::IndexMap;
use rxpad_types::{Row, RowId, RowPatch};
use tracing::debug;

#[derive(Debug, Default)]
pub struct RowStore {
    rows: IndexMap<RowId, Row>,
    last_id: u64,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row with default state and return its id.
    ///
    /// Ids start at 1 and are never handed out twice, even after removal.
    pub fn add(&mut self) -> RowId {
        self.last_id += 1;
        let id = RowId(self.last_id);
        self.rows.insert(id, Row::new(id));
        debug!(row_id = %id, "row added");
        id
    }

    /// Remove a row. Returns `false` when the row was already gone.
    pub fn remove(&mut self, id: RowId) -> bool {
        let removed = self.rows.shift_remove(&id).is_some();
        debug!(row_id = %id, removed, "row remove");
        removed
    }

    /// Apply `patch` to the row with `id`, leaving every other row untouched.
    ///
    /// Returns `false` (and changes nothing) when no such row exists.
    pub fn update(&mut self, id: RowId, patch: RowPatch) -> bool {
        let Some(row) = self.rows.get_mut(&id) else {
            debug!(row_id = %id, "update for unknown row ignored");
            return false;
        };
        apply_patch(row, patch);
        true
    }

    /// Close every open dropdown. Returns how many rows were open.
    pub fn close_all_dropdowns(&mut self) -> usize {
        let mut closed = 0;
        for row in self.rows.values_mut().filter(|row| row.dropdown_open) {
            row.dropdown_open = false;
            closed += 1;
        }
        closed
    }

    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.get(&id)
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn apply_patch(row: &mut Row, patch: RowPatch) {
    let RowPatch {
        query_text,
        resolved_generic,
        suggestions,
        dropdown_open,
        highlighted_index,
        pending_request_seq,
        phase,
        details,
    } = patch;

    if let Some(text) = query_text {
        row.query_text = text;
    }
    if let Some(generic) = resolved_generic {
        row.resolved_generic = generic;
    }
    if let Some(suggestions) = suggestions {
        if suggestions.len() < row.suggestions.len() {
            row.highlighted_index = None;
        }
        row.suggestions = suggestions;
    }
    if let Some(open) = dropdown_open {
        row.dropdown_open = open;
    }
    if let Some(index) = highlighted_index {
        row.highlighted_index = index;
    }
    if let Some(seq) = pending_request_seq {
        if seq > row.pending_request_seq {
            row.pending_request_seq = seq;
        } else {
            debug!(row_id = %row.id, seq, current = row.pending_request_seq, "non-increasing request sequence ignored");
        }
    }
    if let Some(phase) = phase {
        row.phase = phase;
    }
    if let Some(details) = details {
        row.details = details;
    }

    if row.highlighted_index.is_some_and(|index| index >= row.suggestions.len()) {
        row.highlighted_index = None;
    }
}
