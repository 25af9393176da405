//! MCP server implementation for regdesk.
//!
//! Exposes the question workflow as MCP tools. The orchestrator is shared
//! behind an `Arc`; every tool call is an independent run.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde_json::json;

use crate::agent::config::AgentConfig;
use crate::agent::orchestrator::Orchestrator;

use super::params::{AskParams, RouteParams};

/// regdesk MCP server.
///
/// Provides MCP tools for answering regulation questions and for
/// inspecting how a question would be routed.
#[derive(Clone)]
pub struct RegdeskMcpServer {
    tool_router: ToolRouter<Self>,
    orchestrator: Arc<Orchestrator>,
}

#[tool_router]
impl RegdeskMcpServer {
    /// Answer a question about the academic regulations.
    #[tool(
        name = "ask",
        description = "Answer a student's question about the university's academic regulations. Routes the question to passage retrieval or to a document's table of contents, analyzes the material and phrases a friendly markdown answer. Returns JSON with the answer, the route taken, the document used and the terminal stage."
    )]
    async fn ask(&self, Parameters(params): Parameters<AskParams>) -> Result<CallToolResult, McpError> {
        let outcome = self.orchestrator.run_detailed(&params.query).await;

        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {e}"), None))?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Classify a question without answering it.
    #[tool(
        name = "route",
        description = "Classify a question as TOOL (document structure: table of contents, chapters, sections) or RETRIEVAL (content questions answered from indexed passages)."
    )]
    async fn route(
        &self,
        Parameters(params): Parameters<RouteParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.query.trim().is_empty() {
            return Err(McpError::invalid_params("query must not be empty", None));
        }

        let route = self.orchestrator.classify(&params.query).await;
        let body = json!({ "route": route, "intent": route.intent() });

        Ok(CallToolResult::success(vec![Content::text(body.to_string())]))
    }
}

#[tool_handler]
impl ServerHandler for RegdeskMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "regdesk".to_string(),
                title: Some("regdesk MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "regdesk: academic regulations help desk. Use the `ask` tool with a \
                 student's question to get a markdown answer grounded in the regulation \
                 PDFs; use `route` to see which strategy a question would take."
                    .to_string(),
            ),
        }
    }
}

impl RegdeskMcpServer {
    /// Creates a server around an existing orchestrator.
    #[must_use]
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            orchestrator,
        }
    }

    /// Creates a server wired from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the LLM provider cannot be created.
    pub fn from_config(config: &AgentConfig) -> Result<Self, crate::error::Error> {
        let orchestrator = Orchestrator::from_config(config)?;
        Ok(Self::new(Arc::new(orchestrator)))
    }
}
