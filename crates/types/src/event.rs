use crate::{PrescriptionDetails, RowId};

/// Arrow-key direction for suggestion navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
}

/// Where a boundary interaction (pointer press) landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionTarget {
    /// Inside the rendered suggestion list of a row
    Dropdown(RowId),
    /// On a row's search field
    SearchField(RowId),
    /// Anywhere else
    Elsewhere,
}

/// Inputs a session feeds into the autocomplete controller.
///
/// Every user action on the rows arrives as one of these, in order, on the
/// session's single logical thread.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Append a new row
    AddRow,
    /// Remove a row; unknown ids are ignored
    RemoveRow(RowId),
    /// Text typed into a row's search field
    Input { row_id: RowId, text: String },
    /// Arrow key in a row's search field
    Navigate { row_id: RowId, direction: NavDirection },
    /// Enter in a row's search field
    CommitKey(RowId),
    /// Pointer click on the suggestion at `index`
    Click { row_id: RowId, index: usize },
    /// Escape in a row's search field
    Escape(RowId),
    /// Pointer hovering the suggestion at `index`
    Hover { row_id: RowId, index: usize },
    /// Pointer press somewhere in the form
    Interaction(InteractionTarget),
    /// Replace the dosing fields of a row
    UpdateDetails { row_id: RowId, details: PrescriptionDetails },
}
