//! Per-row autocomplete state machine.
//!
//! Each row moves independently through
//! `Idle -> AwaitingResult -> Showing -> Committed` and back to
//! `Idle`/`AwaitingResult` on the next edit. The controller owns the
//! [`RowStore`] and the [`SuggestionFetcher`]; every transition is expressed as
//! a single-row [`RowPatch`].
//!
//! Guarantees:
//! - Typed text is written to the row before any lookup is dispatched.
//! - Only a completion whose sequence equals the row's `pending_request_seq`
//!   can change its suggestions, whatever order completions arrive in.
//! - Keyboard and pointer commits share one code path ([`AutocompleteController::on_select`]).
//! - Keyboard and pointer highlighting write the same field; the latest event wins.

use rxpad_types::{
    InteractionTarget, MIN_QUERY_CHARS, NavDirection, PrescriptionDetails, ResolvedGeneric, Row, RowId, RowPatch,
    RowPhase, SessionEvent, Suggestion,
};
use tracing::{debug, info, warn};

use crate::dismissal::DismissalWatcher;
use crate::fetcher::{LookupCompletion, SuggestionFetcher};
use crate::row_store::RowStore;

#[derive(Debug)]
pub struct AutocompleteController {
    store: RowStore,
    fetcher: SuggestionFetcher,
    dismissal: DismissalWatcher,
}

impl AutocompleteController {
    pub fn new(fetcher: SuggestionFetcher) -> Self {
        Self {
            store: RowStore::new(),
            fetcher,
            dismissal: DismissalWatcher::default(),
        }
    }

    /// Replace the default dismissal watcher.
    pub fn with_dismissal(mut self, dismissal: DismissalWatcher) -> Self {
        self.dismissal = dismissal;
        self
    }

    pub fn rows(&self) -> &RowStore {
        &self.store
    }

    pub fn row(&self, row_id: RowId) -> Option<&Row> {
        self.store.get(row_id)
    }

    /// Lookups dispatched whose completion has not been handled yet.
    pub fn outstanding_lookups(&self) -> usize {
        self.fetcher.outstanding()
    }

    pub fn add_row(&mut self) -> RowId {
        self.store.add()
    }

    /// Remove a row. Completions still in flight for it are discarded on arrival.
    pub fn remove_row(&mut self, row_id: RowId) -> bool {
        let removed = self.store.remove(row_id);
        if removed {
            self.fetcher.forget(row_id);
        }
        removed
    }

    pub fn update_details(&mut self, row_id: RowId, details: PrescriptionDetails) -> bool {
        self.store.update(row_id, RowPatch::new().details(details))
    }

    /// Text typed into a row. Returns the sequence number of the lookup it
    /// started, or `None` when no lookup was needed.
    pub fn on_input(&mut self, row_id: RowId, text: &str) -> Option<u64> {
        let echoed = self.store.update(
            row_id,
            RowPatch::new().query_text(text).dropdown_open(true).highlighted_index(None),
        );
        if !echoed {
            return None;
        }

        if text.chars().count() < MIN_QUERY_CHARS {
            self.store.update(
                row_id,
                RowPatch::new()
                    .suggestions(Vec::new())
                    .resolved_generic(ResolvedGeneric::Unresolved)
                    .phase(RowPhase::Idle),
            );
            return None;
        }

        let seq = self.fetcher.request(row_id, text);
        self.store.update(
            row_id,
            RowPatch::new().pending_request_seq(seq).phase(RowPhase::AwaitingResult),
        );
        Some(seq)
    }

    /// Apply a lookup completion. Returns `true` when it changed the row.
    ///
    /// Completions for removed rows or superseded sequences are dropped.
    /// Empty or failed lookups leave the row exactly as it was.
    pub fn on_result(&mut self, completion: LookupCompletion) -> bool {
        self.fetcher.settle_one();
        let LookupCompletion { row_id, seq, outcome } = completion;

        let Some(row) = self.store.get(row_id) else {
            debug!(row_id = %row_id, seq, "completion for removed row discarded");
            return false;
        };
        if row.pending_request_seq != seq {
            debug!(
                row_id = %row_id,
                seq,
                current = row.pending_request_seq,
                "stale completion discarded"
            );
            return false;
        }

        match outcome {
            Ok(suggestions) if !suggestions.is_empty() => {
                info!(row_id = %row_id, seq, item_count = suggestions.len(), "lookup completed");
                self.store.update(
                    row_id,
                    RowPatch::new().suggestions(suggestions).phase(RowPhase::Showing),
                )
            }
            Ok(_) => {
                debug!(row_id = %row_id, seq, "lookup returned no matches");
                false
            }
            Err(error) => {
                warn!(row_id = %row_id, seq, error = %error, "lookup failed");
                false
            }
        }
    }

    /// Arrow-key navigation. The highlight is clamped to the list; once it is
    /// set, arrows never clear it again.
    pub fn on_navigate(&mut self, row_id: RowId, direction: NavDirection) -> bool {
        let Some(row) = self.store.get(row_id) else {
            return false;
        };
        if !row.dropdown_open || row.suggestions.is_empty() {
            return false;
        }

        let last = row.suggestions.len() - 1;
        let next = match (direction, row.highlighted_index) {
            (NavDirection::Down, None) => 0,
            (NavDirection::Down, Some(index)) => (index + 1).min(last),
            (NavDirection::Up, None) => 0,
            (NavDirection::Up, Some(index)) => index.saturating_sub(1).min(last),
        };
        self.store.update(row_id, RowPatch::new().highlighted_index(Some(next)))
    }

    /// Enter: commit the highlighted suggestion, if the dropdown shows one.
    pub fn on_commit_key(&mut self, row_id: RowId) -> bool {
        let Some(row) = self.store.get(row_id) else {
            return false;
        };
        if !row.dropdown_open {
            return false;
        }
        let Some(suggestion) = row.highlighted_suggestion().cloned() else {
            return false;
        };
        self.on_select(row_id, &suggestion)
    }

    /// Pointer click on the suggestion at `index` of a rendered dropdown.
    pub fn on_click(&mut self, row_id: RowId, index: usize) -> bool {
        let Some(row) = self.store.get(row_id) else {
            return false;
        };
        if !row.dropdown_open {
            return false;
        }
        let Some(suggestion) = row.suggestions.get(index).cloned() else {
            return false;
        };
        self.on_select(row_id, &suggestion)
    }

    /// Commit `suggestion` into the row and close its dropdown.
    pub fn on_select(&mut self, row_id: RowId, suggestion: &Suggestion) -> bool {
        let committed = self.store.update(
            row_id,
            RowPatch::new()
                .query_text(suggestion.display_name.clone())
                .resolved_generic(ResolvedGeneric::Resolved(suggestion.generic_name.clone()))
                .dropdown_open(false)
                .suggestions(Vec::new())
                .highlighted_index(None)
                .phase(RowPhase::Committed),
        );
        if committed {
            debug!(row_id = %row_id, generic = %suggestion.generic_name, "suggestion committed");
        }
        committed
    }

    /// Escape closes the dropdown and nothing else.
    pub fn on_escape(&mut self, row_id: RowId) -> bool {
        self.store.update(row_id, RowPatch::new().dropdown_open(false))
    }

    /// Pointer hover over the suggestion at `index`.
    pub fn on_pointer_hover(&mut self, row_id: RowId, index: usize) -> bool {
        let in_range = self
            .store
            .get(row_id)
            .is_some_and(|row| index < row.suggestions.len());
        if !in_range {
            return false;
        }
        self.store.update(row_id, RowPatch::new().highlighted_index(Some(index)))
    }

    /// Boundary interaction; returns `true` when it dismissed the dropdowns.
    pub fn on_interaction(&mut self, target: InteractionTarget) -> bool {
        self.dismissal.observe(&mut self.store, target)
    }

    /// Dispatch one session event.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::AddRow => {
                self.add_row();
            }
            SessionEvent::RemoveRow(row_id) => {
                self.remove_row(row_id);
            }
            SessionEvent::Input { row_id, text } => {
                self.on_input(row_id, &text);
            }
            SessionEvent::Navigate { row_id, direction } => {
                self.on_navigate(row_id, direction);
            }
            SessionEvent::CommitKey(row_id) => {
                self.on_commit_key(row_id);
            }
            SessionEvent::Click { row_id, index } => {
                // The press reaches the watcher before the click lands, while
                // the dropdown is still rendered.
                self.on_interaction(InteractionTarget::Dropdown(row_id));
                self.on_click(row_id, index);
            }
            SessionEvent::Escape(row_id) => {
                self.on_escape(row_id);
            }
            SessionEvent::Hover { row_id, index } => {
                self.on_pointer_hover(row_id, index);
            }
            SessionEvent::Interaction(target) => {
                self.on_interaction(target);
            }
            SessionEvent::UpdateDetails { row_id, details } => {
                self.update_details(row_id, details);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::SuggestionLookup;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    /// Lookup that never answers; completions are fed by hand.
    #[derive(Debug)]
    struct SilentLookup;

    #[async_trait]
    impl SuggestionLookup for SilentLookup {
        async fn lookup(&self, _query: &str) -> anyhow::Result<Vec<Suggestion>> {
            std::future::pending().await
        }
    }

    fn controller() -> (AutocompleteController, mpsc::UnboundedReceiver<LookupCompletion>) {
        let (fetcher, receiver) = SuggestionFetcher::new(Arc::new(SilentLookup));
        (AutocompleteController::new(fetcher), receiver)
    }

    fn amlip() -> Suggestion {
        Suggestion::new("Amlip", "Amlodipine", 90.0)
    }

    fn amoxyclav() -> Suggestion {
        Suggestion::new("Amoxyclav", "Amoxicillin", 88.0)
    }

    fn found(row_id: RowId, seq: u64, suggestions: Vec<Suggestion>) -> LookupCompletion {
        LookupCompletion::new(row_id, seq, Ok(suggestions))
    }

    fn showing(controller: &mut AutocompleteController, row_id: RowId, suggestions: Vec<Suggestion>) {
        let seq = controller.on_input(row_id, "amo").expect("lookup dispatched");
        assert!(controller.on_result(found(row_id, seq, suggestions)));
    }

    #[tokio::test]
    async fn short_input_clears_without_lookup() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        showing(&mut controller, id, vec![amlip()]);

        assert_eq!(controller.on_input(id, "a"), None);

        let row = controller.row(id).expect("row");
        assert_eq!(row.query_text, "a");
        assert!(row.suggestions.is_empty());
        assert!(row.dropdown_open);
        assert_eq!(row.resolved_generic, ResolvedGeneric::Unresolved);
        assert_eq!(row.phase, RowPhase::Idle);
        assert_eq!(controller.outstanding_lookups(), 0);
    }

    #[tokio::test]
    async fn input_echoes_text_and_records_sequence() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();

        let first = controller.on_input(id, "am").expect("seq");
        let second = controller.on_input(id, "amo").expect("seq");
        assert!(second > first);

        let row = controller.row(id).expect("row");
        assert_eq!(row.query_text, "amo");
        assert_eq!(row.pending_request_seq, second);
        assert!(row.dropdown_open);
        assert_eq!(row.highlighted_index, None);
        assert_eq!(row.phase, RowPhase::AwaitingResult);
    }

    #[tokio::test]
    async fn input_for_unknown_row_dispatches_nothing() {
        let (mut controller, _receiver) = controller();
        assert_eq!(controller.on_input(RowId(12), "amox"), None);
        assert_eq!(controller.outstanding_lookups(), 0);
    }

    #[tokio::test]
    async fn stale_completions_never_overwrite_newer_queries() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        let s1 = controller.on_input(id, "am").expect("seq");
        let s2 = controller.on_input(id, "amo").expect("seq");
        let s3 = controller.on_input(id, "amox").expect("seq");

        assert!(!controller.on_result(found(id, s2, vec![amlip()])));
        assert!(controller.on_result(found(id, s3, vec![amoxyclav()])));
        assert!(!controller.on_result(found(id, s1, vec![amlip()])));

        let row = controller.row(id).expect("row");
        assert_eq!(row.suggestions, vec![amoxyclav()]);
        assert_eq!(row.phase, RowPhase::Showing);
    }

    #[tokio::test]
    async fn typing_then_arrow_and_enter_commits_latest_match() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();

        assert_eq!(controller.on_input(id, "a"), None);
        assert_eq!(controller.outstanding_lookups(), 0);
        assert_eq!(controller.on_input(id, "am"), Some(1));
        assert_eq!(controller.on_input(id, "amo"), Some(2));

        assert!(!controller.on_result(found(id, 1, vec![amlip()])));
        assert!(controller.row(id).is_some_and(|row| row.suggestions.is_empty()));
        assert!(controller.on_result(found(id, 2, vec![amoxyclav()])));

        assert!(controller.on_navigate(id, NavDirection::Down));
        assert_eq!(controller.row(id).and_then(|row| row.highlighted_index), Some(0));
        assert!(controller.on_commit_key(id));

        let row = controller.row(id).expect("row");
        assert_eq!(row.query_text, "Amoxyclav");
        assert_eq!(row.resolved_generic.as_deref(), Some("Amoxicillin"));
        assert!(!row.dropdown_open);
        assert_eq!(controller.outstanding_lookups(), 0);
    }

    #[tokio::test]
    async fn failed_and_empty_lookups_keep_previous_suggestions() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        showing(&mut controller, id, vec![amlip()]);

        let seq = controller.on_input(id, "amlx").expect("seq");
        assert!(!controller.on_result(LookupCompletion::new(id, seq, Err(anyhow::anyhow!("502")))));
        assert_eq!(controller.row(id).map(|row| row.suggestions.clone()), Some(vec![amlip()]));

        let seq = controller.on_input(id, "amlxx").expect("seq");
        assert!(!controller.on_result(found(id, seq, Vec::new())));
        let row = controller.row(id).expect("row");
        assert_eq!(row.suggestions, vec![amlip()]);
        assert_eq!(row.phase, RowPhase::AwaitingResult);
    }

    #[tokio::test]
    async fn completion_for_removed_row_is_ignored() {
        let (mut controller, _receiver) = controller();
        let keep = controller.add_row();
        let gone = controller.add_row();
        showing(&mut controller, keep, vec![amlip()]);
        let before = controller.row(keep).cloned();

        let seq = controller.on_input(gone, "amox").expect("seq");
        assert!(controller.remove_row(gone));
        assert!(!controller.on_result(found(gone, seq, vec![amoxyclav()])));

        assert!(controller.row(gone).is_none());
        assert_eq!(controller.row(keep).cloned(), before);
    }

    #[tokio::test]
    async fn navigation_clamps_at_both_ends() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        showing(&mut controller, id, vec![amlip(), amoxyclav()]);
        let highlight = |c: &AutocompleteController| c.row(id).and_then(|row| row.highlighted_index);

        assert!(controller.on_navigate(id, NavDirection::Up));
        assert_eq!(highlight(&controller), Some(0));
        controller.on_navigate(id, NavDirection::Down);
        controller.on_navigate(id, NavDirection::Down);
        controller.on_navigate(id, NavDirection::Down);
        assert_eq!(highlight(&controller), Some(1));
        controller.on_navigate(id, NavDirection::Up);
        controller.on_navigate(id, NavDirection::Up);
        assert_eq!(highlight(&controller), Some(0));
    }

    #[tokio::test]
    async fn navigation_requires_open_nonempty_dropdown() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        assert!(!controller.on_navigate(id, NavDirection::Down));

        showing(&mut controller, id, vec![amlip()]);
        controller.on_escape(id);
        assert!(!controller.on_navigate(id, NavDirection::Down));
        assert_eq!(controller.row(id).and_then(|row| row.highlighted_index), None);
    }

    #[tokio::test]
    async fn commit_key_without_highlight_is_noop() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        showing(&mut controller, id, vec![amlip()]);
        let before = controller.row(id).cloned();

        assert!(!controller.on_commit_key(id));
        assert_eq!(controller.row(id).cloned(), before);
    }

    #[tokio::test]
    async fn keyboard_and_pointer_commits_converge() {
        let (mut controller, _receiver) = controller();
        let by_key = controller.add_row();
        let by_click = controller.add_row();
        for id in [by_key, by_click] {
            showing(&mut controller, id, vec![amlip(), amoxyclav()]);
        }

        controller.on_navigate(by_key, NavDirection::Down);
        controller.on_navigate(by_key, NavDirection::Down);
        assert!(controller.on_commit_key(by_key));
        assert!(controller.on_click(by_click, 1));

        let key_row = controller.row(by_key).expect("row");
        let click_row = controller.row(by_click).expect("row");
        for row in [key_row, click_row] {
            assert_eq!(row.query_text, "Amoxyclav");
            assert_eq!(row.resolved_generic.as_deref(), Some("Amoxicillin"));
            assert!(!row.dropdown_open);
            assert!(row.suggestions.is_empty());
            assert_eq!(row.highlighted_index, None);
            assert_eq!(row.phase, RowPhase::Committed);
        }
    }

    #[tokio::test]
    async fn select_round_trips_into_row() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        assert!(controller.on_select(id, &amlip()));

        let row = controller.row(id).expect("row");
        assert_eq!(row.query_text, "Amlip");
        assert_eq!(row.resolved_generic.as_deref(), Some("Amlodipine"));
        assert!(!row.dropdown_open);
    }

    #[tokio::test]
    async fn escape_keeps_text_and_generic() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        controller.on_select(id, &amlip());
        controller.on_input(id, "Amlipx");

        assert!(controller.on_escape(id));
        let row = controller.row(id).expect("row");
        assert!(!row.dropdown_open);
        assert_eq!(row.query_text, "Amlipx");
        assert_eq!(row.resolved_generic.as_deref(), Some("Amlodipine"));
    }

    #[tokio::test]
    async fn hover_and_arrows_share_one_highlight() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        showing(
            &mut controller,
            id,
            vec![amlip(), amoxyclav(), Suggestion::new("Amoxil", "Amoxicillin", 80.0)],
        );
        let highlight = |c: &AutocompleteController| c.row(id).and_then(|row| row.highlighted_index);

        controller.on_navigate(id, NavDirection::Down);
        assert!(controller.on_pointer_hover(id, 2));
        assert_eq!(highlight(&controller), Some(2));
        controller.on_navigate(id, NavDirection::Up);
        assert_eq!(highlight(&controller), Some(1));
        assert!(!controller.on_pointer_hover(id, 3));
        assert_eq!(highlight(&controller), Some(1));
    }

    #[tokio::test]
    async fn click_inside_dropdown_selects_instead_of_dismissing() {
        let (mut controller, _receiver) = controller();
        let clicked = controller.add_row();
        let other = controller.add_row();
        showing(&mut controller, clicked, vec![amlip()]);
        showing(&mut controller, other, vec![amoxyclav()]);

        controller.apply(SessionEvent::Click { row_id: clicked, index: 0 });

        assert_eq!(controller.row(clicked).map(|row| row.query_text.as_str()), Some("Amlip"));
        assert_eq!(controller.row(other).map(|row| row.dropdown_open), Some(true));
    }

    #[tokio::test]
    async fn outside_interaction_closes_all_rows() {
        let (mut controller, _receiver) = controller();
        let first = controller.add_row();
        let second = controller.add_row();
        showing(&mut controller, first, vec![amlip()]);
        showing(&mut controller, second, vec![amoxyclav()]);

        assert!(controller.on_interaction(InteractionTarget::Elsewhere));
        assert!(controller.rows().iter().all(|row| !row.dropdown_open));
        assert_eq!(controller.row(first).map(|row| row.suggestions.len()), Some(1));
    }

    #[tokio::test]
    async fn commit_and_click_need_an_open_dropdown() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        showing(&mut controller, id, vec![amlip(), amoxyclav()]);
        controller.on_navigate(id, NavDirection::Down);
        controller.on_escape(id);
        let before = controller.row(id).cloned();

        assert!(!controller.on_commit_key(id));
        assert!(!controller.on_click(id, 1));
        assert_eq!(controller.row(id).cloned(), before);
        assert_eq!(controller.row(id).and_then(|row| row.highlighted_index), Some(0));
    }

    #[tokio::test]
    async fn result_after_escape_fills_suggestions_but_stays_closed() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();
        let seq = controller.on_input(id, "amo").expect("seq");
        controller.on_escape(id);

        assert!(controller.on_result(found(id, seq, vec![amoxyclav()])));

        let row = controller.row(id).expect("row");
        assert!(!row.dropdown_open);
        assert_eq!(row.suggestions, vec![amoxyclav()]);
        assert_eq!(row.phase, RowPhase::Showing);
        assert!(!controller.on_navigate(id, NavDirection::Down));
    }

    #[tokio::test]
    async fn minimum_length_counts_characters_not_bytes() {
        let (mut controller, _receiver) = controller();
        let id = controller.add_row();

        assert_eq!(controller.on_input(id, "é"), None);
        assert_eq!(controller.row(id).map(|row| row.phase), Some(RowPhase::Idle));
        assert_eq!(controller.outstanding_lookups(), 0);

        assert_eq!(controller.on_input(id, "éa"), Some(1));
    }

    #[tokio::test]
    async fn custom_dismissal_predicate_is_used() {
        let (fetcher, _receiver) = SuggestionFetcher::new(Arc::new(SilentLookup));
        // Presses on any search field count as inside, so focusing another row keeps dropdowns open.
        let watcher = DismissalWatcher::new(|target, _| !matches!(target, InteractionTarget::Elsewhere));
        let mut controller = AutocompleteController::new(fetcher).with_dismissal(watcher);
        let first = controller.add_row();
        let second = controller.add_row();
        showing(&mut controller, first, vec![amlip()]);

        assert!(!controller.on_interaction(InteractionTarget::SearchField(second)));
        assert_eq!(controller.row(first).map(|row| row.dropdown_open), Some(true));

        assert!(controller.on_interaction(InteractionTarget::Elsewhere));
        assert_eq!(controller.row(first).map(|row| row.dropdown_open), Some(false));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Input(String),
        Result { back: u64, count: usize },
        Navigate(bool),
        Hover(usize),
        Commit,
        Escape,
        Dismiss,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[a-z]{0,4}".prop_map(Op::Input),
            (0u64..3, 0usize..5).prop_map(|(back, count)| Op::Result { back, count }),
            any::<bool>().prop_map(Op::Navigate),
            (0usize..6).prop_map(Op::Hover),
            Just(Op::Commit),
            Just(Op::Escape),
            Just(Op::Dismiss),
        ]
    }

    proptest! {
        #[test]
        fn highlight_stays_in_bounds(ops in proptest::collection::vec(op_strategy(), 1..60)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("tokio runtime");
            let _guard = runtime.enter();
            let (mut controller, _receiver) = controller();
            let id = controller.add_row();
            let mut last_seq = 0;

            for op in ops {
                match op {
                    Op::Input(text) => {
                        controller.on_input(id, &text);
                    }
                    Op::Result { back, count } => {
                        let current = controller.row(id).map(|row| row.pending_request_seq).unwrap_or(0);
                        let seq = current.saturating_sub(back);
                        let suggestions = (0..count)
                            .map(|index| Suggestion::new(format!("B{index}"), format!("G{index}"), 50.0))
                            .collect();
                        controller.on_result(found(id, seq, suggestions));
                    }
                    Op::Navigate(down) => {
                        let direction = if down { NavDirection::Down } else { NavDirection::Up };
                        controller.on_navigate(id, direction);
                    }
                    Op::Hover(index) => {
                        controller.on_pointer_hover(id, index);
                    }
                    Op::Commit => {
                        controller.on_commit_key(id);
                    }
                    Op::Escape => {
                        controller.on_escape(id);
                    }
                    Op::Dismiss => {
                        controller.on_interaction(InteractionTarget::Elsewhere);
                    }
                }

                let row = controller.row(id).expect("row");
                if let Some(index) = row.highlighted_index {
                    prop_assert!(index < row.suggestions.len());
                }
                prop_assert!(row.pending_request_seq >= last_seq);
                last_seq = row.pending_request_seq;
            }
        }
    }
}
