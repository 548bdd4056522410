//! Lookup seam between the fetcher and whatever answers drug searches.

use std::fmt::Debug;

use async_trait::async_trait;
use rxpad_api::SearchClient;
use rxpad_types::Suggestion;

/// Source of suggestions for a free-text query.
///
/// Results are returned in the order they should be displayed. An empty list
/// means "no matches"; an error means the lookup itself failed.
#[async_trait]
pub trait SuggestionLookup: Send + Sync + Debug {
    async fn lookup(&self, query: &str) -> anyhow::Result<Vec<Suggestion>>;
}

#[async_trait]
impl SuggestionLookup for SearchClient {
    async fn lookup(&self, query: &str) -> anyhow::Result<Vec<Suggestion>> {
        Ok(self.search(query).await?)
    }
}
