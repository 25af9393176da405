//! Shared doubles for workflow integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use regdesk::agent::{AgentConfig, ChatRequest, ChatResponse, LlmProvider, Orchestrator, PromptSet, Role, TokenUsage};
use regdesk::error::{AgentError, RetrievalError, ToolError};
use regdesk::retrieval::Retriever;
use regdesk::tools::{DocumentTools, ToolResponse};
use serde_json::{Map, Value};

/// Completion stub keyed by model name; counts calls per model.
pub struct StubProvider {
    replies: HashMap<String, String>,
    calls: Mutex<Vec<ChatRequest>>,
}

impl StubProvider {
    pub fn new(replies: &[(&str, &str)]) -> Self {
        Self {
            replies: replies
                .iter()
                .map(|(model, reply)| ((*model).to_string(), (*reply).to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls_for(&self, model: &str) -> usize {
        self.requests().iter().filter(|r| r.model == model).count()
    }

    pub fn input_for(&self, model: &str) -> Option<String> {
        self.requests()
            .into_iter()
            .find(|r| r.model == model)
            .and_then(|r| r.content_of(Role::User).map(str::to_string))
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        self.replies
            .get(&request.model)
            .map(|content| ChatResponse {
                content: content.clone(),
                usage: TokenUsage::default(),
                finish_reason: Some("stop".to_string()),
            })
            .ok_or_else(|| AgentError::ApiRequest {
                message: format!("unexpected model {}", request.model),
                status: None,
            })
    }
}

/// Retriever returning fixed passages.
pub struct FixedRetriever {
    passages: Vec<String>,
    pub calls: AtomicUsize,
}

impl FixedRetriever {
    pub fn new(passages: &[&str]) -> Self {
        Self {
            passages: passages.iter().map(|p| (*p).to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Retriever for FixedRetriever {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn search(&self, _query: &str, k: usize) -> Result<Vec<String>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.passages.iter().take(k).cloned().collect())
    }
}

/// Document tool server stand-in answering canned bodies.
pub struct CannedTools {
    bodies: HashMap<String, Value>,
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl CannedTools {
    pub fn new(bodies: &[(&str, Value)]) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|(tool, body)| ((*tool).to_string(), body.clone()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DocumentTools for CannedTools {
    async fn call(&self, tool: &str, args: Map<String, Value>) -> Result<ToolResponse, ToolError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((tool.to_string(), args));

        self.bodies
            .get(tool)
            .map(|body| ToolResponse::new(tool, body.clone()))
            .ok_or_else(|| ToolError::Call {
                tool: tool.to_string(),
                message: "not scripted".to_string(),
            })
    }
}

/// Configuration with one distinct model name per agent role.
pub fn role_config() -> AgentConfig {
    AgentConfig::builder()
        .api_key("test-key")
        .router_model("router")
        .selector_model("selector")
        .analyzer_model("analyzer")
        .answer_model("answer")
        .build()
        .unwrap_or_else(|_| unreachable!())
}

pub fn orchestrator(
    provider: &Arc<StubProvider>,
    retriever: &Arc<FixedRetriever>,
    tools: &Arc<CannedTools>,
) -> Orchestrator {
    Orchestrator::with_prompts(
        Arc::clone(provider) as Arc<dyn LlmProvider>,
        Arc::clone(retriever) as Arc<dyn Retriever>,
        Arc::clone(tools) as Arc<dyn DocumentTools>,
        &role_config(),
        PromptSet::defaults(),
    )
}
