//! SQLite FTS5 passage retriever.
//!
//! Expects a table created as
//! `CREATE VIRTUAL TABLE passages USING fts5(content)` and ranks matches
//! with `bm25`. The index is opened read-only for every search so that a
//! rebuilt index is picked up without restarting.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{Connection, OpenFlags, params};
use tracing::debug;

use super::Retriever;
use crate::error::RetrievalError;

/// Minimum word length (in characters) kept in the match expression.
const MIN_TERM_CHARS: usize = 3;

/// Retriever backed by an FTS5 table in a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteRetriever {
    path: PathBuf,
    timeout: Duration,
}

impl SqliteRetriever {
    /// Creates a retriever for the index at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    /// Builds an FTS5 match expression that ORs the query's words.
    ///
    /// Terms are lowercased and quoted so FTS operators in user text are
    /// treated literally. Returns `None` when no usable term remains.
    #[must_use]
    pub fn match_expression(query: &str) -> Option<String> {
        let mut terms: Vec<String> = Vec::new();
        for word in query.split(|c: char| !c.is_alphanumeric()) {
            if word.chars().count() < MIN_TERM_CHARS {
                continue;
            }
            let term = format!("\"{}\"", word.to_lowercase());
            if !terms.contains(&term) {
                terms.push(term);
            }
        }

        if terms.is_empty() {
            None
        } else {
            Some(terms.join(" OR "))
        }
    }

    fn search_blocking(path: &Path, expression: &str, k: usize) -> Result<Vec<String>, RetrievalError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| RetrievalError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let query_err = |e: rusqlite::Error| RetrievalError::Query {
            message: e.to_string(),
        };

        let mut stmt = conn
            .prepare(
                "SELECT content FROM passages WHERE passages MATCH ?1 \
                 ORDER BY bm25(passages) LIMIT ?2",
            )
            .map_err(query_err)?;

        let limit = i64::try_from(k).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![expression, limit], |row| row.get::<_, String>(0))
            .map_err(query_err)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(query_err)
    }
}

#[async_trait]
impl Retriever for SqliteRetriever {
    fn name(&self) -> &'static str {
        "sqlite-fts5"
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, RetrievalError> {
        let Some(expression) = Self::match_expression(query) else {
            debug!(query, "no searchable terms");
            return Ok(Vec::new());
        };

        let path = self.path.clone();
        let task = tokio::task::spawn_blocking(move || Self::search_blocking(&path, &expression, k));

        let passages = tokio::time::timeout(self.timeout, task)
            .await
            .map_err(|_| RetrievalError::Timeout {
                limit: self.timeout,
            })?
            .map_err(|e| RetrievalError::Join {
                message: e.to_string(),
            })??;

        debug!(count = passages.len(), k, "passages retrieved");
        Ok(passages)
    }
}
