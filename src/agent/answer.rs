//! Answer agent.
//!
//! Follows the directive embedded in an analysis and phrases the final
//! markdown answer for the student.

use std::time::Duration;

use async_trait::async_trait;

use super::config::AgentConfig;
use super::provider::LlmProvider;
use super::traits::Agent;
use crate::error::AgentError;

/// Agent that writes the final answer.
pub struct AnswerAgent {
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    instructions: String,
}

impl AnswerAgent {
    /// Creates an answer agent with the given configuration and instructions.
    #[must_use]
    pub fn new(config: &AgentConfig, instructions: String) -> Self {
        Self {
            model: config.answer_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.timeout,
            instructions,
        }
    }

    /// Produces the final answer from an analysis.
    ///
    /// # Errors
    ///
    /// Returns the completion error when the model call fails.
    pub async fn answer(&self, provider: &dyn LlmProvider, analysis: &str) -> Result<String, AgentError> {
        let response = self.think(provider, &self.instructions, analysis).await?;
        Ok(response.content)
    }
}

#[async_trait]
impl Agent for AnswerAgent {
    fn name(&self) -> &'static str {
        "answer"
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
