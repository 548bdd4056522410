use serde::{Deserialize, Serialize};

use crate::{RowId, Suggestion};

/// Last committed generic name of a row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolvedGeneric {
    #[default]
    Unresolved,
    Resolved(String),
}

impl ResolvedGeneric {
    /// Placeholder written to documents for rows without a committed generic.
    pub const UNRESOLVED_LABEL: &'static str = "---";

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::Unresolved => None,
            Self::Resolved(name) => Some(name.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        self.as_deref().unwrap_or(Self::UNRESOLVED_LABEL)
    }
}

/// Controller state of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPhase {
    /// No query, or a query below the minimum length
    #[default]
    Idle,
    /// A lookup is outstanding for the current query
    AwaitingResult,
    /// Suggestions are populated for the current query
    Showing,
    /// A suggestion was committed into the row
    Committed,
}

/// Dosing fields of a prescription line. The autocomplete core never reads these;
/// they travel with the row to the document request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionDetails {
    pub dosage: String,
    pub frequency: String,
    /// Number of days, rendered as "<n> Days" in documents
    pub duration: String,
    pub timing: String,
    #[serde(default)]
    pub remarks: String,
}

impl Default for PrescriptionDetails {
    fn default() -> Self {
        Self {
            dosage: "1 Tablet".to_string(),
            frequency: "1-0-1".to_string(),
            duration: "5".to_string(),
            timing: "After Food".to_string(),
            remarks: String::new(),
        }
    }
}

/// One prescription line and its suggestion/selection state.
///
/// Rows are only ever handed out by reference from the row store; every
/// mutation goes through a [`RowPatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    /// Free text currently in the row's search field
    pub query_text: String,
    pub resolved_generic: ResolvedGeneric,
    /// Suggestions in the order the lookup returned them
    pub suggestions: Vec<Suggestion>,
    pub dropdown_open: bool,
    /// Keyboard/pointer highlight; `None` means nothing is highlighted.
    /// When `Some(i)`, `i < suggestions.len()`.
    pub highlighted_index: Option<usize>,
    /// Sequence number of the most recent lookup issued for this row (0 = none yet)
    pub pending_request_seq: u64,
    pub phase: RowPhase,
    pub details: PrescriptionDetails,
}

impl Row {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            query_text: String::new(),
            resolved_generic: ResolvedGeneric::Unresolved,
            suggestions: Vec::new(),
            dropdown_open: false,
            highlighted_index: None,
            pending_request_seq: 0,
            phase: RowPhase::Idle,
            details: PrescriptionDetails::default(),
        }
    }

    /// The suggestion currently under the highlight, if any.
    pub fn highlighted_suggestion(&self) -> Option<&Suggestion> {
        self.highlighted_index.and_then(|index| self.suggestions.get(index))
    }
}

/// Partial update for a single row. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowPatch {
    pub query_text: Option<String>,
    pub resolved_generic: Option<ResolvedGeneric>,
    pub suggestions: Option<Vec<Suggestion>>,
    pub dropdown_open: Option<bool>,
    pub highlighted_index: Option<Option<usize>>,
    pub pending_request_seq: Option<u64>,
    pub phase: Option<RowPhase>,
    pub details: Option<PrescriptionDetails>,
}

impl RowPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_text(mut self, text: impl Into<String>) -> Self {
        self.query_text = Some(text.into());
        self
    }

    pub fn resolved_generic(mut self, generic: ResolvedGeneric) -> Self {
        self.resolved_generic = Some(generic);
        self
    }

    pub fn suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    pub fn dropdown_open(mut self, open: bool) -> Self {
        self.dropdown_open = Some(open);
        self
    }

    pub fn highlighted_index(mut self, index: Option<usize>) -> Self {
        self.highlighted_index = Some(index);
        self
    }

    pub fn pending_request_seq(mut self, seq: u64) -> Self {
        self.pending_request_seq = Some(seq);
        self
    }

    pub fn phase(mut self, phase: RowPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn details(mut self, details: PrescriptionDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
