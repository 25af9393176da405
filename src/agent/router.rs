//! Router agent.
//!
//! Classifies a query as structural (table of contents) or content
//! (passage retrieval).

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::config::AgentConfig;
use super::provider::LlmProvider;
use super::traits::Agent;
use crate::core::Route;
use crate::error::AgentError;

/// Agent that picks the retrieval strategy for a query.
pub struct RouterAgent {
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    instructions: String,
}

impl RouterAgent {
    /// Creates a router with the given configuration and instructions.
    #[must_use]
    pub fn new(config: &AgentConfig, instructions: String) -> Self {
        Self {
            model: config.router_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.timeout,
            instructions,
        }
    }

    /// Classifies `query`.
    ///
    /// Never returns [`Route::Unknown`]: a reply naming neither route, or
    /// both, falls back to [`Route::Retrieval`].
    ///
    /// # Errors
    ///
    /// Returns the completion error when the model call fails.
    pub async fn route(&self, provider: &dyn LlmProvider, query: &str) -> Result<Route, AgentError> {
        let response = self.think(provider, &self.instructions, query).await?;

        let route = Route::from_reply(&response.content).unwrap_or_else(|| {
            warn!(reply = %response.content, "ambiguous router reply, defaulting to retrieval");
            Route::Retrieval
        });

        debug!(%route, "query routed");
        Ok(route)
    }
}

#[async_trait]
impl Agent for RouterAgent {
    fn name(&self) -> &'static str {
        "router"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::message::Role;
    use crate::agent::prompt::ROUTER_PROMPT;
    use crate::test_support::ScriptedProvider;
    use test_case::test_case;

    const STRUCTURAL: [&str; 5] = ["sumário", "índice", "estrutura", "seções", "capítulos"];

    fn router() -> RouterAgent {
        let config = AgentConfig::builder()
            .api_key("k")
            .router_model("router")
            .build()
            .unwrap_or_else(|_| unreachable!());
        RouterAgent::new(&config, ROUTER_PROMPT.to_string())
    }

    fn classifying_provider() -> ScriptedProvider {
        ScriptedProvider::new().respond_with("router", |request| {
            let query = request.content_of(Role::User).unwrap_or_default().to_lowercase();
            if STRUCTURAL.iter().any(|k| query.contains(k)) {
                "TOOL".to_string()
            } else {
                "RETRIEVAL".to_string()
            }
        })
    }

    #[test_case("Qual o sumário do regulamento?", Route::Tool; "sumario")]
    #[test_case("Mostre o índice do documento", Route::Tool; "indice")]
    #[test_case("Qual a estrutura do regimento?", Route::Tool; "estrutura")]
    #[test_case("Quais são as seções?", Route::Tool; "secoes")]
    #[test_case("Liste os capítulos", Route::Tool; "capitulos")]
    #[test_case("Como faço o trancamento de matrícula?", Route::Retrieval; "trancamento")]
    #[test_case("Qual a frequência mínima exigida?", Route::Retrieval; "frequencia")]
    #[tokio::test]
    async fn test_route_by_keyword(query: &str, expected: Route) {
        let provider = classifying_provider();
        let route = router().route(&provider, query).await;
        assert!(matches!(route, Ok(r) if r == expected));
    }

    #[test_case("tool"; "lowercase")]
    #[test_case("**TOOL**"; "markdown")]
    #[test_case("MCP."; "legacy token")]
    #[tokio::test]
    async fn test_route_parses_decorated_tool_reply(reply: &str) {
        let provider = ScriptedProvider::new().reply("router", reply);
        let route = router().route(&provider, "x").await;
        assert!(matches!(route, Ok(Route::Tool)));
    }

    #[test_case("não sei"; "neither")]
    #[test_case("TOOL ou RETRIEVAL"; "both")]
    #[test_case(""; "empty")]
    #[tokio::test]
    async fn test_ambiguous_reply_defaults_to_retrieval(reply: &str) {
        let provider = ScriptedProvider::new().reply("router", reply);
        let route = router().route(&provider, "x").await;
        assert!(matches!(route, Ok(Route::Retrieval)));
    }

    #[tokio::test]
    async fn test_route_propagates_failure() {
        let provider = ScriptedProvider::new().fail("router");
        let route = router().route(&provider, "x").await;
        assert!(route.is_err());
    }
}
