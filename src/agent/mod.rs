//! Multi-agent workflow for regulation questions.
//!
//! Four small agents share one completion capability and differ only in
//! their instructions and in how they read the reply. The orchestrator
//! sequences them per query.
//!
//! # Architecture
//!
//! ```text
//! User query → Orchestrator
//!   ├── RouterAgent (TOOL | RETRIEVAL)
//!   ├── Fetch
//!   │   ├── RETRIEVAL: Retriever::search → passages joined by blank lines
//!   │   └── TOOL: list_pdfs → DocumentSelectorAgent (2+ files) → get_table_of_contents
//!   ├── Not-found text? → returned unchanged
//!   ├── AnalyzerAgent → analysis + [TAREFA_FINAL: ...] directive
//!   └── AnswerAgent → final markdown answer
//! ```

pub mod analyzer;
pub mod answer;
pub mod client;
pub mod config;
pub mod message;
pub mod orchestrator;
pub mod outcome;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod router;
pub mod selector;
pub mod traits;

// Re-export key types
pub use analyzer::{Analysis, AnalyzerAgent};
pub use answer::AnswerAgent;
pub use config::AgentConfig;
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
pub use orchestrator::Orchestrator;
pub use outcome::{Stage, WorkflowOutcome};
pub use prompt::PromptSet;
pub use provider::LlmProvider;
pub use router::RouterAgent;
pub use selector::{DocumentSelectorAgent, Selection};
pub use traits::{Agent, AgentResponse};
