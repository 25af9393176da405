//! MCP stdio client for the document tool server.
//!
//! Each call spawns the configured server command, initializes an MCP
//! session over its stdio, invokes one tool and tears the session down.
//! The whole exchange is bounded by the tool timeout.

use std::time::Duration;

use async_trait::async_trait;
use rmcp::ServiceExt;
use rmcp::model::{CallToolRequestParams, Content, RawContent};
use rmcp::service::{RoleClient, RunningService};
use rmcp::transport::TokioChildProcess;
use serde_json::{Map, Value};
use tokio::process::Command;
use tracing::{debug, warn};

use super::{DocumentTools, ToolResponse};
use crate::agent::AgentConfig;
use crate::error::ToolError;

/// Document tools reached through a child-process MCP server.
#[derive(Debug, Clone)]
pub struct McpDocumentTools {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl McpDocumentTools {
    /// Creates a client that starts `command args...` for every call.
    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    /// Creates a client from the resolved configuration.
    #[must_use]
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            config.tool_command.clone(),
            config.tool_args.clone(),
            config.tool_timeout,
        )
    }

    async fn connect(&self) -> Result<RunningService<RoleClient, ()>, ToolError> {
        let mut command = Command::new(&self.command);
        command.args(&self.args);

        let transport = TokioChildProcess::new(command).map_err(|e| ToolError::Spawn {
            command: self.command.clone(),
            message: e.to_string(),
        })?;

        ().serve(transport).await.map_err(|e| ToolError::Session {
            message: e.to_string(),
        })
    }

    async fn call_once(&self, tool: &str, args: Map<String, Value>) -> Result<ToolResponse, ToolError> {
        let session = self.connect().await?;

        let params = CallToolRequestParams {
            meta: None,
            name: tool.to_string().into(),
            arguments: Some(args),
            task: None,
        };
        let result = session.call_tool(params).await;

        if let Err(e) = session.cancel().await {
            warn!(tool, error = %e, "tool session teardown failed");
        }

        let result = result.map_err(|e| ToolError::Call {
            tool: tool.to_string(),
            message: e.to_string(),
        })?;

        let text = first_text(&result.content).ok_or_else(|| ToolError::Decode {
            tool: tool.to_string(),
            message: "result has no text content".to_string(),
        })?;

        if result.is_error == Some(true) {
            return Err(ToolError::Remote {
                tool: tool.to_string(),
                message: text.to_string(),
            });
        }

        ToolResponse::from_text(tool, text)
    }
}

/// Returns the first text item of a tool result.
fn first_text(content: &[Content]) -> Option<&str> {
    content.iter().find_map(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    })
}

#[async_trait]
impl DocumentTools for McpDocumentTools {
    async fn call(&self, tool: &str, args: Map<String, Value>) -> Result<ToolResponse, ToolError> {
        debug!(tool, command = %self.command, "calling document tool");

        tokio::time::timeout(self.timeout, self.call_once(tool, args))
            .await
            .map_err(|_| ToolError::Timeout {
                tool: tool.to_string(),
                limit: self.timeout,
            })?
    }
}
