//! Agent instructions and template builders.
//!
//! Instructions are the core of each agent's behavior. Every template can
//! be overridden by a markdown file in the prompt directory; `{query}` and
//! `{documents}` placeholders are substituted at call time.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::core::Route;

/// Marker that opens the forwarding directive embedded in every analysis.
pub const DIRECTIVE_MARKER: &str = "[TAREFA_FINAL:";

/// Directive appended to table-of-contents analyses.
pub const SUMMARY_DIRECTIVE: &str = "[TAREFA_FINAL: Apresente este sumário formatado para o usuário, usando uma lista de bullet points.]";

/// Instructions for the router agent.
pub const ROUTER_PROMPT: &str = r"Você é um roteador de perguntas sobre os regulamentos acadêmicos da universidade.
Responda TOOL se a pergunta mencionar a estrutura de um documento: sumário, índice, estrutura, seções, capítulos.
Caso contrário, responda RETRIEVAL.
Responda apenas com TOOL ou RETRIEVAL, sem nenhuma outra palavra.";

/// Instructions for the document selector agent.
pub const SELECTOR_PROMPT: &str = r#"Você é um bibliotecário especialista. Sua tarefa é selecionar o documento MAIS RELEVANTE de uma lista para responder à pergunta do usuário.
Os nomes dos arquivos são descritivos. Analise a pergunta e os nomes dos arquivos.

Pergunta do usuário:
"{query}"

Lista de documentos disponíveis:
{documents}

Responda APENAS com o nome do arquivo escolhido. Não adicione nenhuma outra palavra."#;

/// Instructions for the analyzer agent on the retrieval route.
pub const ANALYZER_RETRIEVAL_PROMPT: &str = r"Você é um agente analisador especialista em regulamentos acadêmicos.
Sua tarefa é analisar o TEXTO DE CONTEXTO e extrair os pontos essenciais para responder à PERGUNTA DO USUÁRIO.
A sua saída DEVE ser uma análise clara e objetiva. No final, adicione a seguinte instrução para o próximo agente:
[TAREFA_FINAL: Use esta análise para responder diretamente à pergunta do usuário sobre '{query}'.]

---
PERGUNTA DO USUÁRIO:
{query}

---
O TEXTO DE CONTEXTO é enviado a seguir.";

/// Instructions for the analyzer agent on the tool route.
pub const ANALYZER_TOOL_PROMPT: &str = r"Você é um agente formatador de documentos.
Sua tarefa é analisar o SUMÁRIO e prepará-lo para exibição.
A sua saída DEVE ser apenas o sumário formatado de forma limpa. No final, adicione a seguinte instrução para o próximo agente:
[TAREFA_FINAL: Apresente este sumário formatado para o usuário, usando uma lista de bullet points.]

---
O SUMÁRIO é enviado a seguir.";

/// Instructions for the answer agent.
pub const ANSWER_PROMPT: &str = r"Você é o assistente virtual da universidade, amigável e prestativo.
Sua tarefa é seguir a instrução contida na ANÁLISE para gerar a resposta final para o estudante.
Use formatação Markdown (negrito, listas) para tornar a resposta clara e legível.
Se a instrução for para responder a uma pergunta, termine com um lembrete para consultar a secretaria acadêmica para informações oficiais.
Se a instrução for para apresentar um sumário, adicione uma frase de introdução e uma de conclusão amigáveis.

---
A ANÁLISE E INSTRUÇÃO são enviadas a seguir.";

/// Default prompt directory under user config.
const DEFAULT_PROMPT_DIR: &str = ".config/regdesk/prompts";

/// Filename for the router prompt template.
const ROUTER_FILENAME: &str = "router.md";
/// Filename for the selector prompt template.
const SELECTOR_FILENAME: &str = "selector.md";
/// Filename for the retrieval analyzer prompt template.
const ANALYZER_RETRIEVAL_FILENAME: &str = "analyzer_retrieval.md";
/// Filename for the tool analyzer prompt template.
const ANALYZER_TOOL_FILENAME: &str = "analyzer_tool.md";
/// Filename for the answer prompt template.
const ANSWER_FILENAME: &str = "answer.md";

/// A set of instruction templates for all agents.
///
/// Loaded from external template files when available, falling back to
/// compiled-in defaults. Use [`PromptSet::load`] to resolve the prompt
/// directory from configuration, environment variables, or the default path.
#[derive(Debug, Clone)]
pub struct PromptSet {
    /// Router instructions.
    pub router: String,
    /// Selector instructions (`{query}`, `{documents}`).
    pub selector: String,
    /// Analyzer instructions for the retrieval route (`{query}`).
    pub analyzer_retrieval: String,
    /// Analyzer instructions for the tool route.
    pub analyzer_tool: String,
    /// Answer instructions.
    pub answer: String,
}

impl PromptSet {
    /// Loads prompts from the given directory, falling back to compiled-in defaults.
    ///
    /// Resolution order for `prompt_dir`:
    /// 1. Explicit `prompt_dir` argument
    /// 2. `REGDESK_PROMPT_DIR` environment variable
    /// 3. `~/.config/regdesk/prompts/`
    ///
    /// Each file is loaded independently; a missing file uses its default.
    #[must_use]
    pub fn load(prompt_dir: Option<&Path>) -> Self {
        let resolved_dir = prompt_dir
            .map(PathBuf::from)
            .or_else(|| std::env::var("REGDESK_PROMPT_DIR").ok().map(PathBuf::from))
            .or_else(Self::default_dir);

        let load_file = |filename: &str, default: &str| -> String {
            resolved_dir
                .as_ref()
                .map(|dir| dir.join(filename))
                .and_then(|path| std::fs::read_to_string(&path).ok())
                .filter(|content| !content.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            router: load_file(ROUTER_FILENAME, ROUTER_PROMPT),
            selector: load_file(SELECTOR_FILENAME, SELECTOR_PROMPT),
            analyzer_retrieval: load_file(ANALYZER_RETRIEVAL_FILENAME, ANALYZER_RETRIEVAL_PROMPT),
            analyzer_tool: load_file(ANALYZER_TOOL_FILENAME, ANALYZER_TOOL_PROMPT),
            answer: load_file(ANSWER_FILENAME, ANSWER_PROMPT),
        }
    }

    /// Returns compiled-in defaults without checking the filesystem.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            router: ROUTER_PROMPT.to_string(),
            selector: SELECTOR_PROMPT.to_string(),
            analyzer_retrieval: ANALYZER_RETRIEVAL_PROMPT.to_string(),
            analyzer_tool: ANALYZER_TOOL_PROMPT.to_string(),
            answer: ANSWER_PROMPT.to_string(),
        }
    }

    /// Writes the compiled-in default prompts to the given directory.
    ///
    /// Creates the directory if it does not exist. Existing files are
    /// **not** overwritten; use this for initial scaffolding only.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if directory creation or file writing fails.
    pub fn write_defaults(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let templates = [
            (ROUTER_FILENAME, ROUTER_PROMPT),
            (SELECTOR_FILENAME, SELECTOR_PROMPT),
            (ANALYZER_RETRIEVAL_FILENAME, ANALYZER_RETRIEVAL_PROMPT),
            (ANALYZER_TOOL_FILENAME, ANALYZER_TOOL_PROMPT),
            (ANSWER_FILENAME, ANSWER_PROMPT),
        ];

        let mut written = Vec::new();
        for (filename, content) in &templates {
            let path = dir.join(filename);
            if !path.exists() {
                std::fs::write(&path, content)?;
                written.push(path);
            }
        }

        Ok(written)
    }

    /// Returns the default prompt directory under the user's home.
    ///
    /// Returns `None` if the home directory cannot be determined.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(DEFAULT_PROMPT_DIR))
    }
}

/// Returns the final-name component of a path, or the path itself.
#[must_use]
pub fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Builds the selector instructions listing candidate basenames.
///
/// Full paths are reduced to file names to keep the prompt short.
#[must_use]
pub fn build_selector_prompt(template: &str, query: &str, candidates: &[String]) -> String {
    let mut documents = String::new();
    for candidate in candidates {
        let _ = writeln!(documents, "- {}", basename(candidate));
    }

    template
        .split("{documents}")
        .map(|part| part.replace("{query}", query))
        .collect::<Vec<_>>()
        .join(documents.trim_end())
}

/// Builds the analyzer instructions for a route.
///
/// Returns `None` for [`Route::Unknown`].
#[must_use]
pub fn build_analyzer_prompt(prompts: &PromptSet, route: Route, query: &str) -> Option<String> {
    match route {
        Route::Retrieval => Some(prompts.analyzer_retrieval.replace("{query}", query)),
        Route::Tool => Some(prompts.analyzer_tool.clone()),
        Route::Unknown => None,
    }
}

/// The default forwarding directive for a route.
#[must_use]
pub fn default_directive(route: Route, query: &str) -> Option<String> {
    match route {
        Route::Retrieval => Some(format!(
            "[TAREFA_FINAL: Use esta análise para responder diretamente à pergunta do usuário sobre '{query}'.]"
        )),
        Route::Tool => Some(SUMMARY_DIRECTIVE.to_string()),
        Route::Unknown => None,
    }
}
