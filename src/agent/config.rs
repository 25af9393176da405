//! Agent configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.
//! The resolved [`AgentConfig`] is passed to each collaborator client at
//! construction; nothing reads process-wide state after startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AgentError;

/// Default model for every agent role.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default sampling temperature (near-deterministic).
const DEFAULT_TEMPERATURE: f32 = 0.1;
/// Default maximum tokens per agent response.
const DEFAULT_MAX_TOKENS: u32 = 2048;
/// Default completion request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Default document tool call timeout in seconds.
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;
/// Default number of passages retrieved per query.
const DEFAULT_SEARCH_TOP_K: usize = 3;
/// Default location of the passage index.
const DEFAULT_INDEX_PATH: &str = "vector_db/passages.db";
/// Default command that starts the document tool server.
const DEFAULT_TOOL_COMMAND: &str = "python";
/// Default arguments for the document tool server command.
const DEFAULT_TOOL_ARGS: &[&str] = &["mcp_tools/pdf_server.py"];

/// Configuration for the agent system and its collaborators.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// LLM provider name (e.g., "openai").
    pub provider: String,
    /// API key for the provider.
    pub api_key: String,
    /// Optional base URL override (for proxies or compatible APIs).
    pub base_url: Option<String>,
    /// Model for the router agent.
    pub router_model: String,
    /// Model for the document selector agent.
    pub selector_model: String,
    /// Model for the analyzer agent.
    pub analyzer_model: String,
    /// Model for the answer agent.
    pub answer_model: String,
    /// Sampling temperature shared by all agents.
    pub temperature: f32,
    /// Maximum tokens per agent response.
    pub max_tokens: u32,
    /// Timeout for each completion call.
    pub timeout: Duration,
    /// Timeout for each document tool call (session start to teardown).
    pub tool_timeout: Duration,
    /// Number of passages requested from the retrieval collaborator.
    pub search_top_k: usize,
    /// Path to the SQLite passage index.
    pub index_path: PathBuf,
    /// Program that starts the document tool server.
    pub tool_command: String,
    /// Arguments passed to [`AgentConfig::tool_command`].
    pub tool_args: Vec<String>,
    /// Directory containing prompt template files.
    ///
    /// When set, agent instructions are loaded from markdown files in this
    /// directory, falling back to compiled-in defaults for any missing file.
    pub prompt_dir: Option<PathBuf>,
}

impl AgentConfig {
    /// Creates a new builder for `AgentConfig`.
    #[must_use]
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if no API key is found.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::builder().from_env().build()
    }
}

/// Builder for [`AgentConfig`].
#[derive(Debug, Clone, Default)]
pub struct AgentConfigBuilder {
    provider: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    router_model: Option<String>,
    selector_model: Option<String>,
    analyzer_model: Option<String>,
    answer_model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Option<Duration>,
    tool_timeout: Option<Duration>,
    search_top_k: Option<usize>,
    index_path: Option<PathBuf>,
    tool_command: Option<String>,
    tool_args: Option<Vec<String>>,
    prompt_dir: Option<PathBuf>,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl AgentConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.provider.is_none() {
            self.provider = std::env::var("REGDESK_PROVIDER").ok();
        }
        if self.api_key.is_none() {
            self.api_key = std::env::var("OPENAI_API_KEY")
                .or_else(|_| std::env::var("REGDESK_API_KEY"))
                .ok();
        }
        if self.base_url.is_none() {
            self.base_url = std::env::var("OPENAI_BASE_URL")
                .or_else(|_| std::env::var("REGDESK_BASE_URL"))
                .ok();
        }
        if self.model.is_none() {
            self.model = std::env::var("REGDESK_MODEL").ok();
        }
        if self.router_model.is_none() {
            self.router_model = std::env::var("REGDESK_ROUTER_MODEL").ok();
        }
        if self.selector_model.is_none() {
            self.selector_model = std::env::var("REGDESK_SELECTOR_MODEL").ok();
        }
        if self.analyzer_model.is_none() {
            self.analyzer_model = std::env::var("REGDESK_ANALYZER_MODEL").ok();
        }
        if self.answer_model.is_none() {
            self.answer_model = std::env::var("REGDESK_ANSWER_MODEL").ok();
        }
        if self.temperature.is_none() {
            self.temperature = env_parse("REGDESK_TEMPERATURE");
        }
        if self.timeout.is_none() {
            self.timeout = env_parse("REGDESK_TIMEOUT_SECS").map(Duration::from_secs);
        }
        if self.tool_timeout.is_none() {
            self.tool_timeout = env_parse("REGDESK_TOOL_TIMEOUT_SECS").map(Duration::from_secs);
        }
        if self.search_top_k.is_none() {
            self.search_top_k = env_parse("REGDESK_SEARCH_TOP_K");
        }
        if self.index_path.is_none() {
            self.index_path = std::env::var("REGDESK_INDEX_PATH").ok().map(PathBuf::from);
        }
        if self.tool_command.is_none() {
            self.tool_command = std::env::var("REGDESK_TOOL_COMMAND").ok();
        }
        if self.tool_args.is_none() {
            self.tool_args = std::env::var("REGDESK_TOOL_ARGS")
                .ok()
                .map(|v| v.split_whitespace().map(String::from).collect());
        }
        if self.prompt_dir.is_none() {
            self.prompt_dir = std::env::var("REGDESK_PROMPT_DIR").ok().map(PathBuf::from);
        }
        self
    }

    /// Sets the LLM provider name.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL override.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model used by every role without an explicit override.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the router model.
    #[must_use]
    pub fn router_model(mut self, model: impl Into<String>) -> Self {
        self.router_model = Some(model.into());
        self
    }

    /// Sets the document selector model.
    #[must_use]
    pub fn selector_model(mut self, model: impl Into<String>) -> Self {
        self.selector_model = Some(model.into());
        self
    }

    /// Sets the analyzer model.
    #[must_use]
    pub fn analyzer_model(mut self, model: impl Into<String>) -> Self {
        self.analyzer_model = Some(model.into());
        self
    }

    /// Sets the answer model.
    #[must_use]
    pub fn answer_model(mut self, model: impl Into<String>) -> Self {
        self.answer_model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum tokens per response.
    #[must_use]
    pub const fn max_tokens(mut self, n: u32) -> Self {
        self.max_tokens = Some(n);
        self
    }

    /// Sets the completion request timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the document tool call timeout.
    #[must_use]
    pub const fn tool_timeout(mut self, duration: Duration) -> Self {
        self.tool_timeout = Some(duration);
        self
    }

    /// Sets the number of passages retrieved per query.
    #[must_use]
    pub const fn search_top_k(mut self, n: usize) -> Self {
        self.search_top_k = Some(n);
        self
    }

    /// Sets the passage index path.
    #[must_use]
    pub fn index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = Some(path.into());
        self
    }

    /// Sets the document tool server command.
    #[must_use]
    pub fn tool_command(mut self, command: impl Into<String>) -> Self {
        self.tool_command = Some(command.into());
        self
    }

    /// Sets the document tool server arguments.
    #[must_use]
    pub fn tool_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tool_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the prompt template directory.
    #[must_use]
    pub fn prompt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompt_dir = Some(dir.into());
        self
    }

    /// Builds the [`AgentConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if no API key was set, or
    /// [`AgentError::Config`] for out-of-range values.
    pub fn build(mut self) -> Result<AgentConfig, AgentError> {
        let api_key = self.api_key.take().ok_or(AgentError::ApiKeyMissing)?;
        self.finish(api_key)
    }

    /// Builds a configuration without requiring an API key.
    ///
    /// For commands that only reach the document tools or the passage
    /// index; the resulting `api_key` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Config`] for out-of-range values.
    pub fn build_offline(mut self) -> Result<AgentConfig, AgentError> {
        let api_key = self.api_key.take().unwrap_or_default();
        self.finish(api_key)
    }

    fn finish(self, api_key: String) -> Result<AgentConfig, AgentError> {
        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(AgentError::Config {
                message: format!("temperature must be within 0.0..=2.0, got {temperature}"),
            });
        }

        let search_top_k = self.search_top_k.unwrap_or(DEFAULT_SEARCH_TOP_K);
        if search_top_k == 0 {
            return Err(AgentError::Config {
                message: "search_top_k must be at least 1".to_string(),
            });
        }

        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(AgentConfig {
            provider: self.provider.unwrap_or_else(|| "openai".to_string()),
            api_key,
            base_url: self.base_url,
            router_model: self.router_model.unwrap_or_else(|| model.clone()),
            selector_model: self.selector_model.unwrap_or_else(|| model.clone()),
            analyzer_model: self.analyzer_model.unwrap_or_else(|| model.clone()),
            answer_model: self.answer_model.unwrap_or(model),
            temperature,
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            tool_timeout: self
                .tool_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS)),
            search_top_k,
            index_path: self
                .index_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_PATH)),
            tool_command: self
                .tool_command
                .unwrap_or_else(|| DEFAULT_TOOL_COMMAND.to_string()),
            tool_args: self.tool_args.unwrap_or_else(|| {
                DEFAULT_TOOL_ARGS.iter().map(|s| (*s).to_string()).collect()
            }),
            prompt_dir: self.prompt_dir,
        })
    }
}
