//! CLI command implementations.
//!
//! Every command runs synchronously from `main`; async work goes through
//! a per-command tokio runtime.

use std::fmt::Write as _;
use std::future::Future;
use std::path::Path;

use crate::agent::config::{AgentConfig, AgentConfigBuilder};
use crate::agent::orchestrator::Orchestrator;
use crate::agent::prompt::PromptSet;
use crate::cli::output::{
    OutputFormat, format_listing, format_outcome, format_page, format_pdf_text,
};
#[cfg(feature = "mcp")]
use crate::cli::parser::McpCommands;
use crate::cli::parser::{Cli, Commands, DocsCommands};
use crate::error::{CommandError, Result};
use crate::tools::{DocumentTools, McpDocumentTools};

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the command fails.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Ask { query } => cmd_ask(cli, query, format),
        Commands::Route { query } => cmd_route(cli, query, format),
        Commands::Docs(cmd) => execute_docs(cli, cmd, format),
        Commands::InitPrompts { dir } => cmd_init_prompts(dir.as_deref(), format),
        #[cfg(feature = "mcp")]
        Commands::Mcp(cmd) => cmd_mcp(cli, cmd),
    }
}

/// Config builder seeded with CLI overrides, then the environment.
fn config_builder(cli: &Cli) -> AgentConfigBuilder {
    let mut builder = AgentConfig::builder();
    if let Some(dir) = &cli.prompt_dir {
        builder = builder.prompt_dir(dir);
    }
    builder.from_env()
}

/// Runs a future to completion on a fresh runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}"))
    })?;
    Ok(rt.block_on(future))
}

fn cmd_ask(cli: &Cli, query: &str, format: OutputFormat) -> Result<String> {
    let config = config_builder(cli).build()?;
    let orchestrator = Orchestrator::from_config(&config)?;

    let outcome = block_on(orchestrator.run_detailed(query))?;
    Ok(format_outcome(&outcome, format))
}

fn cmd_route(cli: &Cli, query: &str, format: OutputFormat) -> Result<String> {
    let config = config_builder(cli).build()?;
    let orchestrator = Orchestrator::from_config(&config)?;

    let route = block_on(orchestrator.classify(query))?;
    match format {
        OutputFormat::Text => Ok(route.to_string()),
        OutputFormat::Json => Ok(format.to_json(&serde_json::json!({
            "route": route,
            "intent": route.intent(),
        }))),
    }
}

fn execute_docs(cli: &Cli, cmd: &DocsCommands, format: OutputFormat) -> Result<String> {
    let config = config_builder(cli).build_offline()?;
    let tools = McpDocumentTools::from_config(&config);

    let output = block_on(async {
        match cmd {
            DocsCommands::List { folder } => tools
                .list_pdfs(folder.as_deref())
                .await
                .map(|files| format_listing(&files, format)),
            DocsCommands::Toc { path } => tools.get_table_of_contents(path).await.map(|toc| match format {
                OutputFormat::Text => toc,
                OutputFormat::Json => format.to_json(&serde_json::json!({
                    "path": path,
                    "table_of_contents": toc,
                })),
            }),
            DocsCommands::Read { path } => tools
                .read_pdf(path)
                .await
                .map(|pdf| format_pdf_text(&pdf, format)),
            DocsCommands::Page { path, number } => tools
                .extract_page(path, *number)
                .await
                .map(|page| format_page(&page, format)),
            DocsCommands::Find { path, heading } => tools
                .find_section_by_heading(path, heading)
                .await
                .map(|section| match format {
                    OutputFormat::Text => format!("{}\n\n{}", section.heading, section.block),
                    OutputFormat::Json => format.to_json(&section),
                }),
        }
    })?;

    Ok(output?)
}

fn cmd_init_prompts(dir: Option<&Path>, format: OutputFormat) -> Result<String> {
    let target_dir = dir
        .map(Path::to_path_buf)
        .or_else(PromptSet::default_dir)
        .ok_or_else(|| {
            CommandError::ExecutionFailed(
                "Could not determine home directory for default prompt path".to_string(),
            )
        })?;

    let written = PromptSet::write_defaults(&target_dir).map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to write prompt templates: {e}"))
    })?;

    match format {
        OutputFormat::Text => {
            if written.is_empty() {
                return Ok(format!(
                    "All prompt templates already exist in: {}",
                    target_dir.display()
                ));
            }
            let mut output = format!(
                "Wrote {} prompt template(s) to: {}\n",
                written.len(),
                target_dir.display()
            );
            for path in &written {
                let _ = writeln!(
                    output,
                    "  {}",
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown")
                );
            }
            output.push_str("\nEdit these files to customize agent instructions.");
            Ok(output)
        }
        OutputFormat::Json => Ok(format.to_json(&serde_json::json!({
            "directory": target_dir.to_string_lossy(),
            "written": written.iter().map(|p| p.to_string_lossy().into_owned()).collect::<Vec<_>>(),
            "count": written.len(),
        }))),
    }
}

/// Starts the MCP server with the specified transport.
///
/// Runs until the client disconnects (stdio) or the server is stopped (HTTP).
#[cfg(feature = "mcp")]
fn cmd_mcp(cli: &Cli, cmd: &McpCommands) -> Result<String> {
    use crate::mcp::{RegdeskMcpServer, serve_http, serve_stdio};

    let config = config_builder(cli).build()?;
    let server = RegdeskMcpServer::from_config(&config)?;

    block_on(async {
        match cmd {
            McpCommands::Stdio => serve_stdio(server).await,
            McpCommands::Serve { host, port } => serve_http(server, host, *port).await,
        }
    })?
    .map_err(|e| CommandError::ExecutionFailed(format!("MCP server error: {e}")))?;

    Ok(String::new())
}
