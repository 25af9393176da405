//! Agent trait definition.
//!
//! All agents (router, selector, analyzer, answer) implement this trait.
//! They share a single capability, [`Agent::think`], and differ only in
//! how they build instructions and interpret the reply.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::message::{ChatRequest, ChatResponse, TokenUsage, system_message, user_message};
use super::provider::LlmProvider;
use crate::error::AgentError;

/// Response from an agent execution.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// The agent's trimmed text output.
    pub content: String,
    /// Token usage for this call.
    pub usage: TokenUsage,
    /// Why the model stopped generating (e.g. `"stop"`, `"length"`).
    pub finish_reason: Option<String>,
}

/// Trait implemented by all agents in the system.
///
/// Each agent carries its model, sampling temperature and call timeout.
/// There are no retries at this layer: a failed or timed-out completion
/// is returned to the caller as an [`AgentError`].
#[async_trait]
pub trait Agent: Send + Sync {
    /// Agent name for logging and identification.
    fn name(&self) -> &'static str;

    /// Model identifier to use for this agent.
    fn model(&self) -> &str;

    /// Sampling temperature (0.0 = deterministic, higher = more creative).
    fn temperature(&self) -> f32 {
        0.1
    }

    /// Maximum tokens for the response.
    fn max_tokens(&self) -> u32 {
        2048
    }

    /// Upper bound on a single completion round-trip.
    fn timeout(&self) -> Duration {
        Duration::from_secs(60)
    }

    /// Sends `instructions` plus `input` to the provider and returns the
    /// trimmed reply.
    ///
    /// Instructions travel as the system message and input as the user
    /// message. When `input` is blank the instructions are sent alone as
    /// the user message, since some compatible endpoints reject
    /// conversations without one.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Timeout`] when the call exceeds
    /// [`Agent::timeout`], or the provider's error.
    async fn think(
        &self,
        provider: &dyn LlmProvider,
        instructions: &str,
        input: &str,
    ) -> Result<AgentResponse, AgentError> {
        let messages = if input.trim().is_empty() {
            vec![user_message(instructions)]
        } else {
            vec![system_message(instructions), user_message(input)]
        };

        let request = ChatRequest {
            model: self.model().to_string(),
            messages,
            temperature: Some(self.temperature()),
            max_tokens: Some(self.max_tokens()),
        };

        let limit = self.timeout();
        let response: ChatResponse = tokio::time::timeout(limit, provider.chat(&request))
            .await
            .map_err(|_| AgentError::Timeout {
                agent: self.name(),
                limit,
            })??;

        debug!(
            agent = self.name(),
            model = self.model(),
            total_tokens = response.usage.total_tokens,
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            "completion received"
        );

        Ok(AgentResponse {
            content: response.content.trim().to_string(),
            usage: response.usage,
            finish_reason: response.finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::message::Role;
    use crate::test_support::{ScriptedProvider, SlowProvider};

    struct EchoAgent {
        timeout: Duration,
    }

    #[async_trait]
    impl Agent for EchoAgent {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-model"
        }

        fn timeout(&self) -> Duration {
            self.timeout
        }
    }

    #[tokio::test]
    async fn test_think_trims_and_sends_both_messages() {
        let provider = ScriptedProvider::new().reply("echo-model", "  resposta \n");
        let agent = EchoAgent {
            timeout: Duration::from_secs(5),
        };

        let response = agent
            .think(&provider, "instruções", "entrada")
            .await
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(response.content, "resposta");
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].content_of(Role::System), Some("instruções"));
        assert_eq!(requests[0].content_of(Role::User), Some("entrada"));
        assert_eq!(requests[0].temperature, Some(0.1));
    }

    #[tokio::test]
    async fn test_think_blank_input_sends_instructions_as_user() {
        let provider = ScriptedProvider::new().reply("echo-model", "ok");
        let agent = EchoAgent {
            timeout: Duration::from_secs(5),
        };

        agent
            .think(&provider, "só instruções", "  ")
            .await
            .unwrap_or_else(|_| unreachable!());

        let requests = provider.requests();
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[0].content_of(Role::User), Some("só instruções"));
    }

    #[tokio::test]
    async fn test_think_times_out() {
        let provider = SlowProvider::new(Duration::from_millis(200));
        let agent = EchoAgent {
            timeout: Duration::from_millis(20),
        };

        let result = agent.think(&provider, "instr", "input").await;
        assert!(matches!(
            result,
            Err(AgentError::Timeout { agent: "echo", .. })
        ));
    }

    #[tokio::test]
    async fn test_think_propagates_provider_error() {
        let provider = ScriptedProvider::new();
        let agent = EchoAgent {
            timeout: Duration::from_secs(5),
        };

        let result = agent.think(&provider, "instr", "input").await;
        assert!(matches!(result, Err(AgentError::ApiRequest { .. })));
    }
}
