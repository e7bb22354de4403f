//! The action contract shared by every pipeline step.
//!
//! An action is a named, single-purpose unit of work. All parameters bind at
//! construction; `execute` takes no arguments and runs the side effects
//! exactly once per pipeline run.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Classification used by orchestrators to group and report actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    CopySource,
    ResolveDependencies,
    RunScript,
}

/// What an action did when it succeeded.
///
/// `Skipped` is a successful completion with zero external effect (for
/// example a requested script the manifest does not declare). It is not an
/// error, and callers that need to distinguish it from `Ran` can.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Ran,
    Skipped,
}

pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn purpose(&self) -> Purpose;

    /// Runs the action. Every underlying fault crosses this boundary as the
    /// crate's uniform `Error`; collaborator error types never escape.
    fn execute(&self) -> Result<ActionOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_serializes_snake_case() {
        let json = serde_json::to_string(&Purpose::ResolveDependencies).unwrap();
        assert_eq!(json, "\"resolve_dependencies\"");
    }

    #[test]
    fn outcome_serializes_snake_case() {
        let json = serde_json::to_string(&ActionOutcome::Skipped).unwrap();
        assert_eq!(json, "\"skipped\"");
    }
}
