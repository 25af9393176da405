//! # regdesk
//!
//! Academic regulations help desk. Each student question is routed to
//! one of two strategies, semantic passage retrieval over the indexed
//! regulation PDFs or table-of-contents extraction from a selected PDF,
//! and the fetched material goes through an analyze-then-answer chain of
//! small LLM agents.
//!
//! ## Quick start
//!
//! ```no_run
//! use regdesk::agent::{AgentConfig, Orchestrator};
//!
//! # async fn run() -> Result<(), regdesk::Error> {
//! let config = AgentConfig::from_env()?;
//! let orchestrator = Orchestrator::from_config(&config)?;
//! let answer = orchestrator.run("Como faço o trancamento de matrícula?").await;
//! # let _ = answer;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`agent`]: agents, prompts, provider abstraction and the orchestrator
//! - [`core`]: routes, intents and not-found messages
//! - [`retrieval`]: passage retrieval (`SQLite` FTS5)
//! - [`tools`]: document tool client (MCP over stdio)
//! - [`mcp`]: MCP server exposing the workflow
//! - [`cli`]: command-line interface

pub mod agent;
pub mod cli;
pub mod core;
pub mod error;
#[cfg(feature = "mcp")]
pub mod mcp;
pub mod retrieval;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, Result};
