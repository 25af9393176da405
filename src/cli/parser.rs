//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

/// regdesk: academic regulations help desk.
///
/// Answers student questions about the university's academic regulations
/// by routing each question to passage retrieval or to a document's table
/// of contents, then analyzing and phrasing the answer with an LLM.
#[derive(Parser, Debug)]
#[command(name = "regdesk")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Directory containing prompt template files.
    #[arg(long, env = "REGDESK_PROMPT_DIR", global = true)]
    pub prompt_dir: Option<PathBuf>,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a question about the academic regulations.
    ///
    /// Runs the full workflow: route, fetch passages or a table of
    /// contents, analyze, answer. Requires an OpenAI-compatible API key.
    #[command(after_help = r#"Examples:
  regdesk ask "Como faço o trancamento de matrícula?"
  regdesk ask "Qual o sumário do regimento geral?"
  regdesk --format json ask "Qual a frequência mínima?" | jq .route
  OPENAI_API_KEY=sk-... REGDESK_MODEL=gpt-4o regdesk ask "..."
"#)]
    Ask {
        /// The student's question.
        query: String,
    },

    /// Show which route a question would take (TOOL or RETRIEVAL).
    Route {
        /// The question to classify.
        query: String,
    },

    /// Document tool operations (list, toc, read, page, find).
    #[command(subcommand)]
    Docs(DocsCommands),

    /// Write default prompt templates to disk for customization.
    ///
    /// Creates markdown template files in the prompt directory so users
    /// can customize agent instructions without recompiling.
    #[command(name = "init-prompts")]
    #[command(after_help = r#"Examples:
  regdesk init-prompts                      # Write to ~/.config/regdesk/prompts/
  regdesk init-prompts --dir ./my-prompts   # Write to custom directory
"#)]
    InitPrompts {
        /// Target directory for prompt templates.
        ///
        /// Defaults to `~/.config/regdesk/prompts/`.
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// MCP server operations (stdio, serve).
    #[cfg(feature = "mcp")]
    #[command(subcommand)]
    Mcp(McpCommands),
}

/// Direct calls to the document tool server.
///
/// These do not call the language model and need no API key.
#[derive(Subcommand, Debug)]
pub enum DocsCommands {
    /// List available PDF documents.
    List {
        /// Subfolder of the document root.
        #[arg(long)]
        folder: Option<String>,
    },

    /// Show a document's table of contents.
    Toc {
        /// Document path.
        path: String,
    },

    /// Print a document's full text.
    Read {
        /// Document path.
        path: String,
    },

    /// Print one page of a document.
    Page {
        /// Document path.
        path: String,

        /// One-based page number.
        number: u32,
    },

    /// Find the block of text around a heading.
    #[command(after_help = r#"Examples:
  regdesk docs find Documentos/regulamento.pdf "Do Trancamento"
"#)]
    Find {
        /// Document path.
        path: String,

        /// Heading keyword (case-insensitive substring).
        heading: String,
    },
}

/// MCP server subcommands.
#[cfg(feature = "mcp")]
#[derive(Subcommand, Debug)]
pub enum McpCommands {
    /// Start MCP server with stdio transport.
    ///
    /// Reads JSON-RPC messages from stdin, writes responses to stdout.
    #[command(after_help = r#"Examples:
  regdesk mcp stdio                         # Start stdio MCP server
  OPENAI_API_KEY=sk-... regdesk mcp stdio   # With API key
"#)]
    Stdio,

    /// Start MCP server with streamable HTTP transport.
    #[command(after_help = r#"Examples:
  regdesk mcp serve                            # Listen on 127.0.0.1:3000
  regdesk mcp serve --host 0.0.0.0 --port 8080
"#)]
    Serve {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to.
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

impl Cli {
    /// Returns the log filter directive implied by `--verbose`.
    #[must_use]
    pub const fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "regdesk=info",
            2 => "regdesk=debug",
            _ => "debug",
        }
    }

    /// Initializes the tracing subscriber.
    ///
    /// `REGDESK_LOG`, then `RUST_LOG`, override the verbosity flag. Logs go
    /// to stderr so stdout stays clean for answers and MCP stdio.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_env("REGDESK_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(self.log_directive()));

        let _ = fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
