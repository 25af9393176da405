//! Output formatting for CLI commands.

use serde::Serialize;

use crate::agent::WorkflowOutcome;
use crate::tools::{PageText, PdfText};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Parses a format name; anything but `json` is text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }

    /// Serializes `value` as pretty JSON, falling back to `{}`.
    #[must_use]
    pub fn to_json<T: Serialize>(self, value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Formats a workflow outcome.
#[must_use]
pub fn format_outcome(outcome: &WorkflowOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => outcome.answer.clone(),
        OutputFormat::Json => format.to_json(outcome),
    }
}

/// Formats a document listing, one path per line.
#[must_use]
pub fn format_listing(files: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text if files.is_empty() => "No documents found.".to_string(),
        OutputFormat::Text => files.join("\n"),
        OutputFormat::Json => format.to_json(&serde_json::json!({
            "files": files,
            "count": files.len(),
        })),
    }
}

/// Formats a document's full text with a metadata header.
#[must_use]
pub fn format_pdf_text(pdf: &PdfText, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => match &pdf.metadata {
            Some(meta) => format!(
                "{} ({} bytes, modified {})\n\n{}",
                meta.path, meta.size_bytes, meta.modified, pdf.text
            ),
            None => pdf.text.clone(),
        },
        OutputFormat::Json => format.to_json(pdf),
    }
}

/// Formats one page of text.
#[must_use]
pub fn format_page(page: &PageText, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "Page {}/{}\n\n{}",
            page.page_number, page.total_pages, page.text
        ),
        OutputFormat::Json => format.to_json(page),
    }
}
