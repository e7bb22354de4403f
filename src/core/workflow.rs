//! Sequential, fail-fast execution of a list of actions.
//!
//! The workflow does not decide which actions run; callers assemble the list
//! and this module executes it in order, stopping at the first failure. No
//! retries, no rollback of files already written.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionOutcome, Purpose};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Ran,
    Skipped,
    Failed,
    NotRun,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionReport {
    pub name: String,
    pub description: String,
    pub purpose: Purpose,
    pub status: ActionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowSummary {
    pub total: usize,
    pub ran: usize,
    pub skipped: usize,
    pub failed: usize,
    pub not_run: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    pub actions: Vec<ActionReport>,
    pub status: WorkflowStatus,
    pub summary: WorkflowSummary,
}

impl WorkflowReport {
    /// The first (and only, given fail-fast) failure message, if any.
    pub fn failure_message(&self) -> Option<&str> {
        self.actions
            .iter()
            .find_map(|a| a.error.as_deref())
    }
}

/// Run `actions` in order, fail-fast.
///
/// A failing action is recorded with its message; actions after it are
/// reported as `not_run`. The report itself is always returned — the
/// failure is data, so callers can both render the report and exit non-zero.
pub fn run(actions: &[Box<dyn Action>]) -> WorkflowReport {
    let mut reports = Vec::with_capacity(actions.len());
    let mut failed = false;

    for action in actions {
        if failed {
            reports.push(report_for(action.as_ref(), ActionStatus::NotRun, None));
            continue;
        }

        match action.execute() {
            Ok(ActionOutcome::Ran) => {
                reports.push(report_for(action.as_ref(), ActionStatus::Ran, None));
            }
            Ok(ActionOutcome::Skipped) => {
                reports.push(report_for(action.as_ref(), ActionStatus::Skipped, None));
            }
            Err(err) => {
                failed = true;
                reports.push(report_for(
                    action.as_ref(),
                    ActionStatus::Failed,
                    Some(err.message),
                ));
            }
        }
    }

    let summary = build_summary(&reports);
    WorkflowReport {
        actions: reports,
        status: if failed {
            WorkflowStatus::Failed
        } else {
            WorkflowStatus::Success
        },
        summary,
    }
}

fn report_for(action: &dyn Action, status: ActionStatus, error: Option<String>) -> ActionReport {
    ActionReport {
        name: action.name().to_string(),
        description: action.description().to_string(),
        purpose: action.purpose(),
        status,
        error,
    }
}

fn build_summary(reports: &[ActionReport]) -> WorkflowSummary {
    WorkflowSummary {
        total: reports.len(),
        ran: reports
            .iter()
            .filter(|r| r.status == ActionStatus::Ran)
            .count(),
        skipped: reports
            .iter()
            .filter(|r| r.status == ActionStatus::Skipped)
            .count(),
        failed: reports
            .iter()
            .filter(|r| r.status == ActionStatus::Failed)
            .count(),
        not_run: reports
            .iter()
            .filter(|r| r.status == ActionStatus::NotRun)
            .count(),
    }
}
