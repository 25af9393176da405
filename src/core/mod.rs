//! Core value types shared by the agents, the orchestrator and the CLI.

pub mod route;
pub mod sentinel;

pub use route::{Intent, Route};
pub use sentinel::is_not_found;
