//! Workflow result types.

use std::time::Duration;

use serde::Serialize;

use crate::core::Route;

/// Where a workflow run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The query was blank or too long; no collaborator was called.
    Rejected,
    /// The fetch stage produced a not-found message, returned unchanged.
    ShortCircuit,
    /// Analysis and answer both completed.
    Answered,
    /// Analysis or answer failed; a generic apology was returned.
    Degraded,
}

/// Full result of one workflow run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowOutcome {
    /// Text shown to the user.
    pub answer: String,
    /// Route taken, if the query got that far.
    pub route: Option<Route>,
    /// Terminal stage.
    pub stage: Stage,
    /// Document whose table of contents was used (tool route).
    pub document: Option<String>,
    /// Whether the document was chosen by fallback.
    pub selection_fallback: bool,
    /// Wall-clock time of the run.
    #[serde(serialize_with = "serialize_duration")]
    pub elapsed: Duration,
}

impl WorkflowOutcome {
    /// Outcome for a query refused before routing.
    pub(crate) fn rejected(answer: &str, elapsed: Duration) -> Self {
        Self {
            answer: answer.to_string(),
            route: None,
            stage: Stage::Rejected,
            document: None,
            selection_fallback: false,
            elapsed,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_duration<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_f64(d.as_secs_f64())
}
