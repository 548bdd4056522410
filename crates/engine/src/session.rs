//! Single-task event loop around the autocomplete controller.
//!
//! Lookups run on spawned tasks, but their completions come back through a
//! channel and are applied here, on the same task that applies user events.
//! Row state is therefore only ever mutated from one place.

use std::sync::Arc;

use rxpad_types::SessionEvent;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::controller::AutocompleteController;
use crate::fetcher::{LookupCompletion, SuggestionFetcher};
use crate::lookup::SuggestionLookup;

#[derive(Debug)]
pub struct Session {
    controller: AutocompleteController,
    completions: mpsc::UnboundedReceiver<LookupCompletion>,
}

impl Session {
    pub fn new(lookup: Arc<dyn SuggestionLookup>) -> Self {
        let (fetcher, completions) = SuggestionFetcher::new(lookup);
        Self {
            controller: AutocompleteController::new(fetcher),
            completions,
        }
    }

    pub fn controller(&self) -> &AutocompleteController {
        &self.controller
    }

    /// Apply one user event. Must be called inside a Tokio runtime, since
    /// input may spawn a lookup.
    pub fn handle(&mut self, event: SessionEvent) {
        debug!(?event, "session event");
        self.controller.apply(event);
    }

    /// Apply every completion that has already arrived, without waiting.
    /// Returns how many were applied.
    pub fn drain_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.controller.on_result(completion);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion and apply it. Returns `false` when no
    /// lookup is outstanding.
    pub async fn next_completion(&mut self) -> bool {
        if self.controller.outstanding_lookups() == 0 {
            return false;
        }
        match self.completions.recv().await {
            Some(completion) => {
                self.controller.on_result(completion);
                true
            }
            None => false,
        }
    }

    /// Wait until every dispatched lookup has completed.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    /// Drive the session until `events` closes, then settle outstanding lookups.
    pub async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) -> Self {
        info!("session started");
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
                Some(completion) = self.completions.recv() => {
                    self.controller.on_result(completion);
                }
            }
        }
        self.settle().await;
        info!(rows = self.controller.rows().len(), "session finished");
        self
    }
}
