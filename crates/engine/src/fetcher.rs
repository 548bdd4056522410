//! Fire-and-forget lookups tagged with per-row sequence numbers.
//!
//! [`SuggestionFetcher::request`] allocates the next sequence number for the
//! row synchronously, spawns the lookup on the current Tokio runtime and
//! returns immediately. When the lookup finishes, a [`LookupCompletion`]
//! carrying the same `(row_id, seq)` pair is sent on the completion channel.
//! Nothing is ever aborted: a superseded lookup still completes, and it is up
//! to the receiver to ignore results whose sequence is no longer current.

use std::collections::HashMap;
use std::sync::Arc;

use rxpad_types::{RowId, Suggestion};
use tokio::sync::mpsc;
use tracing::debug;

use crate::lookup::SuggestionLookup;

/// Result of one lookup, tagged with the row and sequence that issued it.
#[derive(Debug)]
pub struct LookupCompletion {
    pub row_id: RowId,
    pub seq: u64,
    pub outcome: anyhow::Result<Vec<Suggestion>>,
}

impl LookupCompletion {
    pub fn new(row_id: RowId, seq: u64, outcome: anyhow::Result<Vec<Suggestion>>) -> Self {
        Self { row_id, seq, outcome }
    }
}

#[derive(Debug)]
pub struct SuggestionFetcher {
    lookup: Arc<dyn SuggestionLookup>,
    sequences: HashMap<RowId, u64>,
    completions: mpsc::UnboundedSender<LookupCompletion>,
    outstanding: usize,
}

impl SuggestionFetcher {
    /// Build a fetcher and the receiver its completions arrive on.
    pub fn new(lookup: Arc<dyn SuggestionLookup>) -> (Self, mpsc::UnboundedReceiver<LookupCompletion>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        let fetcher = Self {
            lookup,
            sequences: HashMap::new(),
            completions,
            outstanding: 0,
        };
        (fetcher, receiver)
    }

    /// Start a lookup for `query` on behalf of `row_id` and return its sequence number.
    ///
    /// Sequence numbers start at 1 and strictly increase per row. Must be
    /// called from within a Tokio runtime.
    pub fn request(&mut self, row_id: RowId, query: &str) -> u64 {
        let counter = self.sequences.entry(row_id).or_insert(0);
        *counter += 1;
        let seq = *counter;
        self.outstanding += 1;

        debug!(row_id = %row_id, seq, query, "lookup dispatch");
        let lookup = Arc::clone(&self.lookup);
        let completions = self.completions.clone();
        let query = query.to_string();
        tokio::spawn(async move {
            let outcome = lookup.lookup(&query).await;
            if completions.send(LookupCompletion::new(row_id, seq, outcome)).is_err() {
                debug!(row_id = %row_id, seq, "completion receiver dropped");
            }
        });
        seq
    }

    /// Record that one completion has been received.
    pub fn settle_one(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    /// Lookups dispatched whose completion has not been received yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Last sequence number issued for `row_id` (0 if none).
    pub fn last_seq(&self, row_id: RowId) -> u64 {
        self.sequences.get(&row_id).copied().unwrap_or(0)
    }

    /// Drop the counter of a removed row. Row ids are never reused, so the
    /// counter is not needed again.
    pub fn forget(&mut self, row_id: RowId) {
        self.sequences.remove(&row_id);
    }
}
