//! Install production dependencies into an already-materialized source tree.

use std::path::PathBuf;
use std::sync::Arc;

use crate::action::{Action, ActionOutcome, Purpose};
use crate::error::{Error, Result};
use crate::log_status;
use crate::npm::NpmRunner;

/// Installs only production dependencies, in place, without writing back
/// lockfile changes and without running registry audit checks.
///
/// This is the dominant latency point of the pipeline; timeout policy (if
/// any) lives in the executor, not here.
pub struct InstallAction {
    artifacts_dir: PathBuf,
    npm: Arc<dyn NpmRunner>,
}

impl InstallAction {
    pub fn new(artifacts_dir: impl Into<PathBuf>, npm: Arc<dyn NpmRunner>) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
            npm,
        }
    }
}

impl Action for InstallAction {
    fn name(&self) -> &'static str {
        "NpmInstall"
    }

    fn description(&self) -> &'static str {
        "Installing production dependencies"
    }

    fn purpose(&self) -> Purpose {
        Purpose::ResolveDependencies
    }

    fn execute(&self) -> Result<ActionOutcome> {
        log_status!(
            "install",
            "Installing production dependencies in {}",
            self.artifacts_dir.display()
        );

        self.npm
            .run(
                &["install", "-q", "--no-audit", "--no-save", "--production"],
                &self.artifacts_dir,
            )
            .map_err(|e| Error::action_failed(self.name(), e.message))?;

        Ok(ActionOutcome::Ran)
    }
}
