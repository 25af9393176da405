//! Workflow routes and answer intents.
//!
//! A [`Route`] decides which fetch strategy serves a query. The router
//! agent only ever yields [`Route::Retrieval`] or [`Route::Tool`];
//! [`Route::Unknown`] exists so free-form tokens can be parsed without
//! losing information, and the analyzer refuses it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reply tokens accepted for the structural (document tool) route.
const TOOL_TOKENS: &[&str] = &["TOOL", "MCP"];
/// Reply tokens accepted for the semantic retrieval route.
const RETRIEVAL_TOKENS: &[&str] = &["RETRIEVAL", "RAG"];

/// Workflow path selected for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Route {
    /// Semantic passage retrieval over the indexed regulations.
    Retrieval,
    /// Table-of-contents extraction from a selected PDF.
    Tool,
    /// A token that matched neither route.
    Unknown,
}

/// What the final answer stage is expected to do with an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Answer the user's question directly.
    AnswerQuestion,
    /// Present a document summary as a bulleted list.
    PresentSummary,
}

impl Route {
    /// Parses a single route token (case-insensitive, surrounding whitespace ignored).
    ///
    /// Both the descriptive names (`TOOL`, `RETRIEVAL`) and the short
    /// forms (`MCP`, `RAG`) are accepted.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let upper = token.trim().to_uppercase();
        if TOOL_TOKENS.contains(&upper.as_str()) {
            Self::Tool
        } else if RETRIEVAL_TOKENS.contains(&upper.as_str()) {
            Self::Retrieval
        } else {
            Self::Unknown
        }
    }

    /// Interprets a free-text model reply as a route.
    ///
    /// The reply is split on non-alphanumeric characters so punctuation
    /// and markdown (`**TOOL**`, `RAG.`) are ignored. Returns `None` when
    /// no route token is present or when tokens for both routes appear.
    #[must_use]
    pub fn from_reply(reply: &str) -> Option<Self> {
        let mut found: Option<Self> = None;
        for word in reply.split(|c: char| !c.is_alphanumeric()) {
            match Self::parse(word) {
                Self::Unknown => {}
                route => match found {
                    None => found = Some(route),
                    Some(prev) if prev != route => return None,
                    Some(_) => {}
                },
            }
        }
        found
    }

    /// The answer intent implied by this route.
    #[must_use]
    pub const fn intent(self) -> Option<Intent> {
        match self {
            Self::Retrieval => Some(Intent::AnswerQuestion),
            Self::Tool => Some(Intent::PresentSummary),
            Self::Unknown => None,
        }
    }

    /// Returns the canonical token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retrieval => "RETRIEVAL",
            Self::Tool => "TOOL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
