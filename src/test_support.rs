//! In-crate test doubles for the provider, retriever and document tools.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::agent::message::{ChatRequest, ChatResponse, TokenUsage};
use crate::agent::provider::LlmProvider;
use crate::error::{AgentError, RetrievalError, ToolError};
use crate::retrieval::Retriever;
use crate::tools::{DocumentTools, ToolResponse};

type Responder = Arc<dyn Fn(&ChatRequest) -> String + Send + Sync>;

enum Script {
    Reply(Responder),
    Fail,
}

/// Provider that answers per model name and records every request.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: HashMap<String, Script>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies with fixed text for `model`.
    pub fn reply(self, model: &str, text: &str) -> Self {
        let text = text.to_string();
        self.respond_with(model, move |_| text.clone())
    }

    /// Replies with a function of the request for `model`.
    pub fn respond_with<F>(mut self, model: &str, f: F) -> Self
    where
        F: Fn(&ChatRequest) -> String + Send + Sync + 'static,
    {
        self.scripts
            .insert(model.to_string(), Script::Reply(Arc::new(f)));
        self
    }

    /// Fails every request for `model`.
    pub fn fail(mut self, model: &str) -> Self {
        self.scripts.insert(model.to_string(), Script::Fail);
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn calls_for(&self, model: &str) -> usize {
        self.requests().iter().filter(|r| r.model == model).count()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        match self.scripts.get(&request.model) {
            Some(Script::Reply(f)) => Ok(ChatResponse {
                content: f(request),
                usage: TokenUsage::default(),
                finish_reason: Some("stop".to_string()),
            }),
            Some(Script::Fail) => Err(AgentError::ApiRequest {
                message: "scripted failure".to_string(),
                status: Some(500),
            }),
            None => Err(AgentError::ApiRequest {
                message: format!("no script for model {}", request.model),
                status: None,
            }),
        }
    }
}

/// Provider that sleeps before answering.
pub struct SlowProvider {
    delay: Duration,
}

impl SlowProvider {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl LlmProvider for SlowProvider {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        tokio::time::sleep(self.delay).await;
        Ok(ChatResponse {
            content: "late".to_string(),
            usage: TokenUsage::default(),
            finish_reason: None,
        })
    }
}

/// Retriever returning fixed passages, or failing.
pub struct StaticRetriever {
    passages: Option<Vec<String>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StaticRetriever {
    pub fn with_passages(passages: &[&str]) -> Self {
        Self {
            passages: Some(passages.iter().map(|p| (*p).to_string()).collect()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            passages: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleeps for `delay` before every search.
    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Retriever for StaticRetriever {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn search(&self, _query: &str, k: usize) -> Result<Vec<String>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.passages.as_ref().map_or_else(
            || {
                Err(RetrievalError::Query {
                    message: "index unavailable".to_string(),
                })
            },
            |p| Ok(p.iter().take(k).cloned().collect()),
        )
    }
}

/// Document tools answering from canned JSON bodies.
#[derive(Default)]
pub struct FakeDocumentTools {
    bodies: HashMap<String, Option<Value>>,
    delay: Duration,
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl FakeDocumentTools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `tool` with `body`.
    pub fn respond(mut self, tool: &str, body: Value) -> Self {
        self.bodies.insert(tool.to_string(), Some(body));
        self
    }

    /// Makes `tool` fail at the transport level.
    pub fn fail(mut self, tool: &str) -> Self {
        self.bodies.insert(tool.to_string(), None);
        self
    }

    /// Sleeps for `delay` before answering any tool.
    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DocumentTools for FakeDocumentTools {
    async fn call(&self, tool: &str, args: Map<String, Value>) -> Result<ToolResponse, ToolError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((tool.to_string(), args));
        tokio::time::sleep(self.delay).await;

        match self.bodies.get(tool) {
            Some(Some(body)) => Ok(ToolResponse::new(tool, body.clone())),
            Some(None) | None => Err(ToolError::Call {
                tool: tool.to_string(),
                message: "tool server unavailable".to_string(),
            }),
        }
    }
}
