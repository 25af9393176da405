//! MCP (Model Context Protocol) server for regdesk.
//!
//! Exposes the regulation question workflow as an MCP server so chat
//! front-ends and other agents can delegate questions to it.
//!
//! # Feature Gate
//!
//! This module requires the `mcp` feature flag (enabled by default).
//!
//! # Architecture
//!
//! ```text
//! MCP Client (chat front-end)
//!   ↓ ask(query)
//! RegdeskMcpServer
//!   ↓
//! Orchestrator::run_detailed()
//!   ├── RouterAgent
//!   ├── Retriever | DocumentTools (+ DocumentSelectorAgent)
//!   ├── AnalyzerAgent
//!   └── AnswerAgent
//!   ↓
//! WorkflowOutcome JSON → MCP Client
//! ```

pub mod params;
pub mod server;
pub mod transport;

pub use params::{AskParams, RouteParams};
pub use server::RegdeskMcpServer;
pub use transport::{serve_http, serve_stdio};
