//! Analyzer agent.
//!
//! Reduces raw fetched content (passages or a table of contents) to a
//! focused analysis that ends with a forwarding directive for the answer
//! agent.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::config::AgentConfig;
use super::prompt::{DIRECTIVE_MARKER, PromptSet, build_analyzer_prompt, default_directive};
use super::provider::LlmProvider;
use super::traits::Agent;
use crate::core::sentinel::UNKNOWN_ROUTE;
use crate::core::{Intent, Route};
use crate::error::AgentError;

/// Analyzer output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Analysis text, always carrying a directive for a known route.
    pub text: String,
    /// What the answer stage should do; `None` for an unknown route.
    pub intent: Option<Intent>,
}

/// Agent that analyzes fetched content for a route.
pub struct AnalyzerAgent {
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    prompts: PromptSet,
}

impl AnalyzerAgent {
    /// Creates an analyzer with the given configuration and prompts.
    #[must_use]
    pub fn new(config: &AgentConfig, prompts: PromptSet) -> Self {
        Self {
            model: config.analyzer_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.timeout,
            prompts,
        }
    }

    /// Analyzes `raw` content fetched for `query` along `route`.
    ///
    /// [`Route::Unknown`] yields a fixed refusal without a model call.
    ///
    /// # Errors
    ///
    /// Returns the completion error when the model call fails.
    pub async fn analyze(
        &self,
        provider: &dyn LlmProvider,
        raw: &str,
        route: Route,
        query: &str,
    ) -> Result<Analysis, AgentError> {
        let Some(instructions) = build_analyzer_prompt(&self.prompts, route, query) else {
            return Ok(Analysis {
                text: UNKNOWN_ROUTE.to_string(),
                intent: None,
            });
        };

        let response = self.think(provider, &instructions, raw).await?;
        let text = ensure_directive(response.content, route, query);

        debug!(%route, chars = text.len(), "analysis produced");
        Ok(Analysis {
            text,
            intent: route.intent(),
        })
    }
}

/// Appends the route's default directive when the model left it out.
fn ensure_directive(text: String, route: Route, query: &str) -> String {
    if text.contains(DIRECTIVE_MARKER) {
        return text;
    }
    match default_directive(route, query) {
        Some(directive) if text.is_empty() => directive,
        Some(directive) => format!("{text}\n\n{directive}"),
        None => text,
    }
}

#[async_trait]
impl Agent for AnalyzerAgent {
    fn name(&self) -> &'static str {
        "analyzer"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
