//! User-facing sentinel messages.
//!
//! Fetch stages never return "nothing": an empty corpus, empty listing,
//! missing table of contents or collaborator failure is replaced by one of
//! these messages, which the workflow returns as the final answer without
//! spending analysis calls. [`is_not_found`] recognizes them in text.

use std::sync::LazyLock;

use regex::Regex;

/// No PDF documents were listed by the document tool server.
pub const NO_DOCUMENTS: &str = "Nenhum documento PDF foi encontrado na base de conhecimento.";

/// Retrieval produced no usable passages.
pub const NO_PASSAGES: &str = "Não encontrei informações sobre isso nos documentos.";

/// The selected document has no table of contents, or extraction failed.
pub const NO_TABLE_OF_CONTENTS: &str =
    "Não encontrei um sumário (bookmarks) no documento selecionado.";

/// The retrieval collaborator failed or timed out.
pub const RETRIEVAL_FAILED: &str =
    "Erro ao buscar informações nos documentos. Tente novamente em instantes.";

/// The analysis or answer stage failed.
pub const PROCESSING_FAILED: &str =
    "Desculpe, não consegui processar sua pergunta no momento. Tente novamente em instantes.";

/// The query was blank.
pub const EMPTY_QUERY: &str = "Por favor, digite uma pergunta sobre os regulamentos acadêmicos.";

/// The query exceeded the maximum accepted length.
pub const QUERY_TOO_LONG: &str =
    "Sua pergunta é muito longa. Por favor, resuma-a e tente novamente.";

/// Analyzer reply for a route it cannot handle.
pub const UNKNOWN_ROUTE: &str = "Rota desconhecida. Não é possível analisar.";

/// Leading patterns shared by every fetch sentinel.
static NOT_FOUND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(não encontrei|nenhum (documento )?pdf|erro ao buscar)")
        .unwrap_or_else(|_| unreachable!())
});

/// Returns `true` if `text` is a fetch sentinel that should short-circuit
/// the workflow.
///
/// Matching is anchored at the start of the text so retrieved passages
/// that merely quote one of the phrases are not mistaken for sentinels.
#[must_use]
pub fn is_not_found(text: &str) -> bool {
    text.trim().is_empty() || NOT_FOUND_PATTERN.is_match(text)
}
