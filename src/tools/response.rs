//! Document tool result envelope and typed payloads.
//!
//! Every document tool answers with a JSON object carrying an `ok` flag.
//! Successful results hold tool-specific fields; failures hold `error`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;

/// Raw JSON body returned by a document tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResponse {
    /// Tool that produced the body.
    pub tool: String,
    /// Decoded JSON body.
    pub body: Value,
}

impl ToolResponse {
    /// Wraps a JSON body.
    #[must_use]
    pub fn new(tool: impl Into<String>, body: Value) -> Self {
        Self {
            tool: tool.into(),
            body,
        }
    }

    /// Parses the text payload of a tool result.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Decode`] when `text` is not JSON.
    pub fn from_text(tool: &str, text: &str) -> Result<Self, ToolError> {
        let body = serde_json::from_str(text).map_err(|e| ToolError::Decode {
            tool: tool.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(tool, body))
    }

    /// Whether the tool reported success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.body.get("ok").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Decodes the body into a typed payload after checking `ok`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Remote`] when `ok` is not `true`, or
    /// [`ToolError::Decode`] when the fields do not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ToolError> {
        if !self.is_ok() {
            let message = self
                .body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(ToolError::Remote {
                tool: self.tool,
                message,
            });
        }

        serde_json::from_value(self.body).map_err(|e| ToolError::Decode {
            tool: self.tool,
            message: e.to_string(),
        })
    }
}

/// `list_pdfs` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfListing {
    /// Document paths.
    #[serde(default)]
    pub files: Vec<String>,
}

/// `get_table_of_contents` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableOfContents {
    /// Formatted outline, one `- title` line per entry.
    #[serde(default)]
    pub table_of_contents: String,
}

/// File metadata reported by `read_pdf`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfMetadata {
    /// Resolved absolute path.
    pub path: String,
    /// File size.
    pub size_bytes: u64,
    /// Last modification time, ISO 8601.
    pub modified: String,
}

/// `read_pdf` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfText {
    /// File metadata, when the server reports it.
    #[serde(default)]
    pub metadata: Option<PdfMetadata>,
    /// Full extracted text.
    #[serde(default)]
    pub text: String,
}

/// `extract_page` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// One-based page number.
    pub page_number: u32,
    /// Extracted page text.
    #[serde(default)]
    pub text: String,
    /// Page count of the document.
    pub total_pages: u32,
}

/// `find_section_by_heading` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Matching heading line.
    pub heading: String,
    /// Lines surrounding the heading.
    pub block: String,
}
