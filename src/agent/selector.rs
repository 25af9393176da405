//! Document selector agent.
//!
//! Picks the most relevant document out of several candidates by file
//! name. The result is always one of the candidates.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use super::config::AgentConfig;
use super::prompt::build_selector_prompt;
use super::provider::LlmProvider;
use super::traits::Agent;
use crate::error::AgentError;

/// Outcome of a document selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Chosen candidate (full path).
    pub document: String,
    /// Whether the first candidate was taken because the reply matched none.
    pub fallback: bool,
}

impl Selection {
    /// The first candidate, marked as a fallback.
    fn first_of(candidates: &[String]) -> Result<Self, AgentError> {
        candidates
            .first()
            .map(|first| Self {
                document: first.clone(),
                fallback: true,
            })
            .ok_or(AgentError::NoCandidates)
    }
}

/// Agent that chooses one document for a query.
pub struct DocumentSelectorAgent {
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    template: String,
}

impl DocumentSelectorAgent {
    /// Creates a selector with the given configuration and prompt template.
    #[must_use]
    pub fn new(config: &AgentConfig, template: String) -> Self {
        Self {
            model: config.selector_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.timeout,
            template,
        }
    }

    /// Selects the candidate best matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoCandidates`] for an empty list, or the
    /// completion error when the model call fails.
    pub async fn select(
        &self,
        provider: &dyn LlmProvider,
        query: &str,
        candidates: &[String],
    ) -> Result<Selection, AgentError> {
        if candidates.is_empty() {
            return Err(AgentError::NoCandidates);
        }

        let instructions = build_selector_prompt(&self.template, query, candidates);
        let response = self.think(provider, &instructions, "").await?;

        let selection = Self::match_reply(&response.content, candidates)?;
        if selection.fallback {
            warn!(
                reply = %response.content,
                fallback = %selection.document,
                "selector reply matched no candidate"
            );
        } else {
            debug!(document = %selection.document, "document selected");
        }
        Ok(selection)
    }

    /// Maps a model reply to a candidate.
    ///
    /// The first candidate whose path contains the normalized reply wins.
    /// A blank reply, or one contained in no path, yields the first
    /// candidate with `fallback` set.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoCandidates`] for an empty list.
    pub fn match_reply(reply: &str, candidates: &[String]) -> Result<Selection, AgentError> {
        let name = normalize_reply(reply);
        if name.is_empty() {
            return Selection::first_of(candidates);
        }

        candidates
            .iter()
            .find(|candidate| candidate.contains(name))
            .map_or_else(
                || Selection::first_of(candidates),
                |candidate| {
                    Ok(Selection {
                        document: candidate.clone(),
                        fallback: false,
                    })
                },
            )
    }
}

/// Reduces a reply to the bare file name the model was asked for.
fn normalize_reply(reply: &str) -> &str {
    let line = reply
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    line.trim_start_matches("- ")
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*') || c.is_whitespace())
}

#[async_trait]
impl Agent for DocumentSelectorAgent {
    fn name(&self) -> &'static str {
        "selector"
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
    use crate::agent::prompt::SELECTOR_PROMPT;
    use crate::test_support::ScriptedProvider;
    use proptest::prelude::*;
    use test_case::test_case;

    fn candidates() -> Vec<String> {
        vec![
            "/srv/Documentos/regulamento_graduacao.pdf".to_string(),
            "/srv/Documentos/regimento_geral.pdf".to_string(),
        ]
    }

    fn selector() -> DocumentSelectorAgent {
        let config = AgentConfig::builder()
            .api_key("k")
            .selector_model("selector")
            .build()
            .unwrap_or_else(|_| unreachable!());
        DocumentSelectorAgent::new(&config, SELECTOR_PROMPT.to_string())
    }

    #[test_case("regimento_geral.pdf", 1, false; "exact basename")]
    #[test_case("`regimento_geral.pdf`", 1, false; "backticks")]
    #[test_case("\"regimento_geral.pdf\"", 1, false; "quotes")]
    #[test_case("- **regimento_geral.pdf**", 1, false; "bullet and bold")]
    #[test_case("\n  regimento_geral.pdf\nporque trata do regimento", 1, false; "first line only")]
    #[test_case("regulamento_graduacao.pdf", 0, false; "first candidate matched")]
    #[test_case("calendario.pdf", 0, true; "no match")]
    #[test_case("", 0, true; "empty reply")]
    #[test_case("  \n ", 0, true; "blank reply")]
    fn test_match_reply(reply: &str, expected: usize, fallback: bool) {
        let candidates = candidates();
        let selection = DocumentSelectorAgent::match_reply(reply, &candidates)
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(selection.document, candidates[expected]);
        assert_eq!(selection.fallback, fallback);
    }

    #[test]
    fn test_match_reply_empty_candidates() {
        let result = DocumentSelectorAgent::match_reply("a.pdf", &[]);
        assert!(matches!(result, Err(AgentError::NoCandidates)));
    }

    #[tokio::test]
    async fn test_select_sends_basenames_without_input() {
        let provider = ScriptedProvider::new().reply("selector", "regimento_geral.pdf");
        let selection = selector()
            .select(&provider, "Qual o sumário do regimento?", &candidates())
            .await
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(selection.document, "/srv/Documentos/regimento_geral.pdf");
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let prompt = requests[0].content_of(Role::User).unwrap_or_default();
        assert!(prompt.contains("- regulamento_graduacao.pdf"));
        assert!(!prompt.contains("/srv/"));
    }

    #[tokio::test]
    async fn test_select_empty_candidates_makes_no_call() {
        let provider = ScriptedProvider::new().reply("selector", "a.pdf");
        let result = selector().select(&provider, "q", &[]).await;
        assert!(matches!(result, Err(AgentError::NoCandidates)));
        assert!(provider.requests().is_empty());
    }

    proptest! {
        #[test]
        fn prop_selection_is_always_a_candidate(
            reply in ".{0,40}",
            names in prop::collection::vec("[a-z_]{1,12}\\.pdf", 1..6),
        ) {
            let candidates: Vec<String> = names.iter().map(|n| format!("/docs/{n}")).collect();
            let selection = DocumentSelectorAgent::match_reply(&reply, &candidates)
                .unwrap_or_else(|_| unreachable!());
            prop_assert!(candidates.contains(&selection.document));
            if selection.fallback {
                prop_assert_eq!(&selection.document, &candidates[0]);
            }
        }
    }
}
