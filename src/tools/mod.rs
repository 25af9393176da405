//! Document tool collaborator.
//!
//! The document tool server exposes named operations over the document
//! collection (`list_pdfs`, `get_table_of_contents`, ...). The
//! orchestrator talks to it through [`DocumentTools`]; each typed method
//! is a thin wrapper over [`DocumentTools::call`].

pub mod mcp_client;
pub mod response;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

pub use mcp_client::McpDocumentTools;
pub use response::{PageText, PdfListing, PdfMetadata, PdfText, Section, TableOfContents, ToolResponse};

use crate::error::ToolError;

/// Tool name: list document paths.
pub const LIST_PDFS: &str = "list_pdfs";
/// Tool name: formatted outline of one document.
pub const GET_TABLE_OF_CONTENTS: &str = "get_table_of_contents";
/// Tool name: full text and metadata of one document.
pub const READ_PDF: &str = "read_pdf";
/// Tool name: text of one page.
pub const EXTRACT_PAGE: &str = "extract_page";
/// Tool name: text block around a heading.
pub const FIND_SECTION_BY_HEADING: &str = "find_section_by_heading";

fn arguments(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Access to the document tool server.
#[async_trait]
pub trait DocumentTools: Send + Sync {
    /// Invokes a named tool and returns its JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] when the server cannot be reached, the call
    /// fails, or the result is not JSON.
    async fn call(&self, tool: &str, args: Map<String, Value>) -> Result<ToolResponse, ToolError>;

    /// Lists document paths, optionally under a subfolder.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Remote`] when the server rejects the folder.
    async fn list_pdfs(&self, folder: Option<&str>) -> Result<Vec<String>, ToolError> {
        let args = arguments(json!({ "folder": folder.unwrap_or_default() }));
        let listing: PdfListing = self.call(LIST_PDFS, args).await?.decode()?;
        Ok(listing.files)
    }

    /// Returns the formatted outline of a document.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Remote`] when the document has no outline or
    /// cannot be read.
    async fn get_table_of_contents(&self, path: &str) -> Result<String, ToolError> {
        let args = arguments(json!({ "path": path }));
        let toc: TableOfContents = self.call(GET_TABLE_OF_CONTENTS, args).await?.decode()?;
        Ok(toc.table_of_contents)
    }

    /// Returns the full text of a document.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] on failure.
    async fn read_pdf(&self, path: &str) -> Result<PdfText, ToolError> {
        let args = arguments(json!({ "path": path }));
        self.call(READ_PDF, args).await?.decode()
    }

    /// Returns the text of one page (one-based).
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Remote`] when the page is out of range.
    async fn extract_page(&self, path: &str, page_number: u32) -> Result<PageText, ToolError> {
        let args = arguments(json!({ "path": path, "page_number": page_number }));
        self.call(EXTRACT_PAGE, args).await?.decode()
    }

    /// Returns the block around the first line containing `heading`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Remote`] when no line matches.
    async fn find_section_by_heading(&self, path: &str, heading: &str) -> Result<Section, ToolError> {
        let args = arguments(json!({ "path": path, "heading_keyword": heading }));
        self.call(FIND_SECTION_BY_HEADING, args).await?.decode()
    }
}
