//! Orchestrator for the routed analyze-then-answer workflow.
//!
//! Coordinates the full query pipeline: route → fetch (passages or table
//! of contents) → short-circuit on not-found → analyze → answer. Every
//! collaborator failure is turned into user-safe text; a run never
//! returns an error.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::analyzer::AnalyzerAgent;
use super::answer::AnswerAgent;
use super::client::create_provider;
use super::config::AgentConfig;
use super::outcome::{Stage, WorkflowOutcome};
use super::prompt::PromptSet;
use super::provider::LlmProvider;
use super::router::RouterAgent;
use super::selector::{DocumentSelectorAgent, Selection};
use crate::core::sentinel::{
    EMPTY_QUERY, NO_DOCUMENTS, NO_PASSAGES, NO_TABLE_OF_CONTENTS, PROCESSING_FAILED,
    QUERY_TOO_LONG, RETRIEVAL_FAILED,
};
use crate::core::{Route, is_not_found};
use crate::error::AgentError;
use crate::retrieval::{Retriever, SqliteRetriever};
use crate::tools::{DocumentTools, McpDocumentTools};

/// Longest accepted query, in bytes.
pub const MAX_QUERY_LEN: usize = 10_000;

/// Raw content gathered by the fetch stage.
///
/// `not_found` is set only where a sentinel message is produced, never by
/// inspecting the fetched text.
#[derive(Debug)]
struct Fetched {
    raw: String,
    not_found: bool,
    selection: Option<Selection>,
}

impl Fetched {
    fn content(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            not_found: false,
            selection: None,
        }
    }

    fn not_found(message: &str) -> Self {
        debug_assert!(is_not_found(message));
        Self {
            raw: message.to_string(),
            not_found: true,
            selection: None,
        }
    }
}

/// Failure of a bounded collaborator call.
enum FetchFailure<E> {
    Failed(E),
    TimedOut(Duration),
}

impl<E: std::fmt::Display> std::fmt::Display for FetchFailure<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(e) => e.fmt(f),
            Self::TimedOut(limit) => write!(f, "timed out after {limit:?}"),
        }
    }
}

/// Awaits `call`, giving up after `limit`.
async fn bounded<T, E>(
    limit: Duration,
    call: impl Future<Output = Result<T, E>>,
) -> Result<T, FetchFailure<E>> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(FetchFailure::Failed),
        Err(_) => Err(FetchFailure::TimedOut(limit)),
    }
}

/// Orchestrates the regulation question workflow.
///
/// Holds only shared handles to immutable collaborators, so one instance
/// can serve many concurrent runs.
pub struct Orchestrator {
    provider: Arc<dyn LlmProvider>,
    retriever: Arc<dyn Retriever>,
    tools: Arc<dyn DocumentTools>,
    search_top_k: usize,
    fetch_timeout: Duration,
    router: RouterAgent,
    selector: DocumentSelectorAgent,
    analyzer: AnalyzerAgent,
    answerer: AnswerAgent,
}

impl Orchestrator {
    /// Creates an orchestrator over the given collaborators.
    ///
    /// Loads prompt templates from the directory specified in
    /// [`AgentConfig::prompt_dir`], falling back to compiled-in defaults.
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        retriever: Arc<dyn Retriever>,
        tools: Arc<dyn DocumentTools>,
        config: &AgentConfig,
    ) -> Self {
        let prompts = PromptSet::load(config.prompt_dir.as_deref());
        Self::with_prompts(provider, retriever, tools, config, prompts)
    }

    /// Creates an orchestrator with an explicit prompt set.
    pub fn with_prompts(
        provider: Arc<dyn LlmProvider>,
        retriever: Arc<dyn Retriever>,
        tools: Arc<dyn DocumentTools>,
        config: &AgentConfig,
        prompts: PromptSet,
    ) -> Self {
        Self {
            provider,
            retriever,
            tools,
            search_top_k: config.search_top_k,
            fetch_timeout: config.tool_timeout,
            router: RouterAgent::new(config, prompts.router.clone()),
            selector: DocumentSelectorAgent::new(config, prompts.selector.clone()),
            answerer: AnswerAgent::new(config, prompts.answer.clone()),
            analyzer: AnalyzerAgent::new(config, prompts),
        }
    }

    /// Wires the configured provider, the SQLite passage index and the
    /// MCP document tool server.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnsupportedProvider`] for an unknown provider.
    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let provider: Arc<dyn LlmProvider> = Arc::from(create_provider(config)?);
        let retriever = Arc::new(SqliteRetriever::new(
            config.index_path.clone(),
            config.tool_timeout,
        ));
        let tools = Arc::new(McpDocumentTools::from_config(config));
        Ok(Self::new(provider, retriever, tools, config))
    }

    /// Answers `query`, returning only the user-facing text.
    pub async fn run(&self, query: &str) -> String {
        self.run_detailed(query).await.answer
    }

    /// Answers `query` and reports how the run went.
    ///
    /// # Steps
    ///
    /// 1. Route the query (router failure degrades to retrieval)
    /// 2. Fetch passages, or list documents, select one and read its outline
    /// 3. Return not-found text unchanged
    /// 4. Analyze the raw content
    /// 5. Phrase the final answer
    pub async fn run_detailed(&self, query: &str) -> WorkflowOutcome {
        let start = Instant::now();

        if query.trim().is_empty() {
            return WorkflowOutcome::rejected(EMPTY_QUERY, start.elapsed());
        }
        if query.len() > MAX_QUERY_LEN {
            warn!(len = query.len(), max = MAX_QUERY_LEN, "query too long");
            return WorkflowOutcome::rejected(QUERY_TOO_LONG, start.elapsed());
        }

        let route = self.classify(query).await;

        let fetched = match route {
            Route::Tool => self.fetch_table_of_contents(query).await,
            Route::Retrieval | Route::Unknown => self.fetch_passages(query).await,
        };
        let document = fetched.selection.as_ref().map(|s| s.document.clone());
        let selection_fallback = fetched.selection.as_ref().is_some_and(|s| s.fallback);

        let outcome = |answer: String, stage: Stage| WorkflowOutcome {
            answer,
            route: Some(route),
            stage,
            document: document.clone(),
            selection_fallback,
            elapsed: start.elapsed(),
        };

        if fetched.not_found {
            info!(%route, "nothing found, short-circuiting");
            return outcome(fetched.raw, Stage::ShortCircuit);
        }

        let analysis = match self
            .analyzer
            .analyze(self.provider.as_ref(), &fetched.raw, route, query)
            .await
        {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(%route, error = %e, "analysis failed");
                return outcome(PROCESSING_FAILED.to_string(), Stage::Degraded);
            }
        };

        if analysis.intent.is_none() {
            return outcome(analysis.text, Stage::Degraded);
        }

        match self.answerer.answer(self.provider.as_ref(), &analysis.text).await {
            Ok(answer) => {
                let result = outcome(answer, Stage::Answered);
                info!(
                    %route,
                    document = result.document.as_deref().unwrap_or("-"),
                    elapsed_ms = u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX),
                    "query answered"
                );
                result
            }
            Err(e) => {
                warn!(%route, error = %e, "answer failed");
                outcome(PROCESSING_FAILED.to_string(), Stage::Degraded)
            }
        }
    }

    /// Routes `query`, degrading to [`Route::Retrieval`] when the router fails.
    pub async fn classify(&self, query: &str) -> Route {
        match self.router.route(self.provider.as_ref(), query).await {
            Ok(route) => route,
            Err(e) => {
                warn!(error = %e, "router failed, defaulting to retrieval");
                Route::Retrieval
            }
        }
    }

    async fn fetch_passages(&self, query: &str) -> Fetched {
        let search = self.retriever.search(query, self.search_top_k);
        let passages = match bounded(self.fetch_timeout, search).await {
            Ok(passages) => passages,
            Err(e) => {
                warn!(retriever = self.retriever.name(), error = %e, "passage retrieval failed");
                return Fetched::not_found(RETRIEVAL_FAILED);
            }
        };

        let joined = passages
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        debug!(count = passages.len(), "passages fetched");
        if joined.is_empty() {
            Fetched::not_found(NO_PASSAGES)
        } else {
            Fetched::content(joined)
        }
    }

    async fn fetch_table_of_contents(&self, query: &str) -> Fetched {
        let candidates = match bounded(self.fetch_timeout, self.tools.list_pdfs(None)).await {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "document listing failed");
                return Fetched::not_found(NO_DOCUMENTS);
            }
        };
        if candidates.is_empty() {
            return Fetched::not_found(NO_DOCUMENTS);
        }

        let selection = self.choose_document(query, &candidates).await;
        debug!(
            document = %selection.document,
            candidates = candidates.len(),
            fallback = selection.fallback,
            "document chosen"
        );

        let outline = self.tools.get_table_of_contents(&selection.document);
        let mut fetched = match bounded(self.fetch_timeout, outline).await {
            Ok(toc) if !toc.trim().is_empty() => Fetched::content(toc),
            Ok(_) => Fetched::not_found(NO_TABLE_OF_CONTENTS),
            Err(e) => {
                warn!(document = %selection.document, error = %e, "table of contents unavailable");
                Fetched::not_found(NO_TABLE_OF_CONTENTS)
            }
        };
        fetched.selection = Some(selection);
        fetched
    }

    /// Picks one of a non-empty candidate list.
    async fn choose_document(&self, query: &str, candidates: &[String]) -> Selection {
        if let [only] = candidates {
            return Selection {
                document: only.clone(),
                fallback: false,
            };
        }

        match self
            .selector
            .select(self.provider.as_ref(), query, candidates)
            .await
        {
            Ok(selection) => selection,
            Err(e) => {
                warn!(error = %e, "selector failed, using first document");
                Selection {
                    document: candidates[0].clone(),
                    fallback: true,
                }
            }
        }
    }
}
