//! Shared helpers for the Rxpad crates: fuzzy scoring, path handling and the
//! settings store.

pub mod fuzzy;
pub mod path_processing;
pub mod settings;

pub use fuzzy::{fuzzy_score, match_confidence};
pub use path_processing::expand_tilde;
pub use settings::{Settings, SettingsError, SettingsPayload};
