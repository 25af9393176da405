//! Passage retrieval collaborator.
//!
//! A [`Retriever`] returns the passages most relevant to a query, best
//! match first. The orchestrator only sees this trait; the shipped
//! implementation is [`SqliteRetriever`] over an FTS5 index.

pub mod sqlite;

use async_trait::async_trait;

pub use sqlite::SqliteRetriever;

use crate::error::RetrievalError;

/// Source of passages relevant to a query.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retriever name for logging.
    fn name(&self) -> &'static str;

    /// Returns up to `k` passages ranked by relevance.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] when the index is unavailable or the
    /// search fails.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, RetrievalError>;
}
