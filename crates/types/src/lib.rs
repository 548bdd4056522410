//! Shared domain types for the prescription row autocomplete core.
//!
//! The engine, API client and CLI all speak in terms of these types:
//! rows and their suggestion state, the suggestions returned by a lookup,
//! and the events a session feeds into the controller.

mod event;
mod row;

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use event::{InteractionTarget, NavDirection, SessionEvent};
pub use row::{PrescriptionDetails, ResolvedGeneric, Row, RowPatch, RowPhase};

/// Queries shorter than this never reach a lookup.
pub const MIN_QUERY_CHARS: usize = 2;

/// Stable identity of a medicine row.
///
/// Identifiers are assigned on creation and never reused within a session,
/// even after the row is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RowId {
    type Err = ParseRowIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(RowId).map_err(|_| ParseRowIdError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRowIdError(String);

impl fmt::Display for ParseRowIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid row id '{}'; expected a non-negative integer", self.0)
    }
}

impl Error for ParseRowIdError {}

/// A single lookup match as returned by the search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Brand name shown in the dropdown and written to the row on commit
    pub display_name: String,
    /// Generic name recorded as the row's resolved generic on commit
    pub generic_name: String,
    /// Match confidence reported by the lookup; passed through untouched
    #[serde(default)]
    pub confidence: f64,
}

impl Suggestion {
    pub fn new(display_name: impl Into<String>, generic_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            display_name: display_name.into(),
            generic_name: generic_name.into(),
            confidence,
        }
    }
}
