//! # Rxpad Engine
//!
//! The engine keeps any number of independent medicine rows in sync with an
//! asynchronous drug lookup. Each row's typed text drives a remote search whose
//! results are shown, keyboard- or pointer-navigated, and committed into the
//! row, while guaranteeing that a slow or reordered response never overwrites a
//! row with stale data.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rxpad_engine::{DrugCatalog, Session};
//! use rxpad_types::SessionEvent;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let catalog = DrugCatalog::from_json_str(r#"{"Amoxyclav": "Amoxicillin"}"#)?;
//! let mut session = Session::new(Arc::new(catalog));
//! session.handle(SessionEvent::AddRow);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`row_store`**: Keyed row collection; the only place row fields change
//! - **`fetcher`**: Issues lookups tagged with per-row sequence numbers
//! - **`controller`**: Turns input, results, navigation and commits into row patches
//! - **`dismissal`**: Closes open dropdowns on interactions outside them
//! - **`lookup`** / **`catalog`**: Lookup seam plus the HTTP and offline backends
//! - **`payload`**: Document request built from committed rows
//! - **`session`**: Single-task event loop tying events and lookup completions together

pub mod catalog;
pub mod controller;
pub mod dismissal;
pub mod fetcher;
pub mod lookup;
pub mod payload;
pub mod row_store;
pub mod session;

pub use catalog::{CatalogError, DrugCatalog};
pub use controller::AutocompleteController;
pub use dismissal::DismissalWatcher;
pub use fetcher::{LookupCompletion, SuggestionFetcher};
pub use lookup::SuggestionLookup;
pub use payload::{MedicineLine, PatientDetails, PrescriptionRequest};
pub use row_store::RowStore;
pub use session::Session;
