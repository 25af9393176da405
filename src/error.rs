//! Error types for regdesk.
//!
//! Each collaborator layer has its own error enum so call sites can decide
//! how to degrade. The orchestrator converts all of them into user-safe
//! text; only startup failures reach the top-level [`Error`].

use std::time::Duration;

use thiserror::Error;

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for CLI and server entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// Agent or configuration failure.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Passage retrieval failure.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// Document tool failure.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// CLI command failure.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the agent layer (completion calls and configuration).
#[derive(Debug, Error)]
pub enum AgentError {
    /// No API key was provided explicitly or through the environment.
    #[error("no API key configured: set OPENAI_API_KEY or REGDESK_API_KEY")]
    ApiKeyMissing,

    /// The configured provider name is not recognized.
    #[error("unsupported provider: {name}")]
    UnsupportedProvider {
        /// Provider name as configured.
        name: String,
    },

    /// The completion endpoint rejected or failed the request.
    #[error("API request failed: {message}")]
    ApiRequest {
        /// Error description from the SDK.
        message: String,
        /// HTTP status, when known.
        status: Option<u16>,
    },

    /// The completion call did not finish within the configured timeout.
    #[error("{agent} agent timed out after {limit:?}")]
    Timeout {
        /// Agent that issued the call.
        agent: &'static str,
        /// Timeout that elapsed.
        limit: Duration,
    },

    /// Document selection was requested with an empty candidate list.
    #[error("document selection requires at least one candidate")]
    NoCandidates,

    /// Invalid configuration value.
    #[error("invalid configuration: {message}")]
    Config {
        /// What was wrong.
        message: String,
    },

    /// Failure while wiring or running the workflow.
    #[error("orchestration error: {message}")]
    Orchestration {
        /// What went wrong.
        message: String,
    },
}

/// Errors from the passage retrieval collaborator.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The passage index could not be opened.
    #[error("failed to open passage index at {path}: {message}")]
    Open {
        /// Index location.
        path: String,
        /// Underlying error.
        message: String,
    },

    /// The search query failed.
    #[error("passage search failed: {message}")]
    Query {
        /// Underlying error.
        message: String,
    },

    /// The search did not finish within the configured timeout.
    #[error("passage search timed out after {limit:?}")]
    Timeout {
        /// Timeout that elapsed.
        limit: Duration,
    },

    /// The blocking search task could not be joined.
    #[error("passage search task failed: {message}")]
    Join {
        /// Join error description.
        message: String,
    },
}

/// Errors from the document tool collaborator.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool server process could not be started.
    #[error("failed to start tool server `{command}`: {message}")]
    Spawn {
        /// Command that failed.
        command: String,
        /// Underlying error.
        message: String,
    },

    /// The MCP session could not be initialized.
    #[error("tool session failed: {message}")]
    Session {
        /// Underlying error.
        message: String,
    },

    /// The tool call failed at the protocol level.
    #[error("tool `{tool}` call failed: {message}")]
    Call {
        /// Tool name.
        tool: String,
        /// Underlying error.
        message: String,
    },

    /// The tool ran and reported `ok: false` (access denied, missing file, ...).
    #[error("tool `{tool}` reported an error: {message}")]
    Remote {
        /// Tool name.
        tool: String,
        /// Error text returned by the server.
        message: String,
    },

    /// The tool result was not the expected JSON shape.
    #[error("tool `{tool}` returned a malformed result: {message}")]
    Decode {
        /// Tool name.
        tool: String,
        /// Parse error description.
        message: String,
    },

    /// The tool session did not finish within the configured timeout.
    #[error("tool `{tool}` timed out after {limit:?}")]
    Timeout {
        /// Tool name.
        tool: String,
        /// Timeout that elapsed.
        limit: Duration,
    },
}

/// Errors from CLI command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command could not complete.
    #[error("{0}")]
    ExecutionFailed(String),

    /// Output could not be rendered.
    #[error("output formatting failed: {0}")]
    OutputFormat(String),
}
