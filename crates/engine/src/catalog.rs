//! Offline drug catalog.
//!
//! Answers lookups from a local `drugs.json` (a flat `{"Brand": "Generic"}`
//! object) so the engine can run without the search service. Ranking follows
//! the service: fuzzy-match every brand name, keep matches scoring above
//! [`MIN_CONFIDENCE`], return the best [`DEFAULT_RESULT_LIMIT`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rxpad_types::{MIN_QUERY_CHARS, Suggestion};
use rxpad_util::{fuzzy_score, match_confidence};
use thiserror::Error;
use tracing::{debug, info};

use crate::lookup::SuggestionLookup;

/// Matches must score strictly above this confidence.
pub const MIN_CONFIDENCE: u8 = 50;
pub const DEFAULT_RESULT_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read drug catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("drug catalog is not a brand -> generic JSON object: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct DrugCatalog {
    entries: BTreeMap<String, String>,
    result_limit: usize,
}

impl DrugCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self {
            entries,
            result_limit: DEFAULT_RESULT_LIMIT,
        })
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), entries = catalog.len(), "drug catalog loaded");
        Ok(catalog)
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank brands against `query`, best first. Ties keep alphabetical order.
    pub fn search(&self, query: &str) -> Vec<Suggestion> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &String, &String)> = self
            .entries
            .iter()
            .filter_map(|(brand, generic)| {
                let confidence = match_confidence(fuzzy_score(brand, query)?);
                (confidence > MIN_CONFIDENCE).then_some((confidence, brand, generic))
            })
            .collect();
        matches.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        matches.truncate(self.result_limit);

        debug!(query, count = matches.len(), "catalog search");
        matches
            .into_iter()
            .map(|(confidence, brand, generic)| Suggestion::new(brand.as_str(), generic.as_str(), f64::from(confidence)))
            .collect()
    }
}

#[async_trait]
impl SuggestionLookup for DrugCatalog {
    async fn lookup(&self, query: &str) -> anyhow::Result<Vec<Suggestion>> {
        Ok(self.search(query))
    }
}
