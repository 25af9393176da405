//! CLI layer for regdesk.
//!
//! Provides the command-line interface using clap, with commands for
//! asking questions, inspecting routes, reaching the document tools
//! directly, and serving the workflow over MCP.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
#[cfg(feature = "mcp")]
pub use parser::McpCommands;
pub use parser::{Cli, Commands, DocsCommands};
