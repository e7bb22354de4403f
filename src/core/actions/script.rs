//! Conditionally run a script declared in the project manifest.

use std::path::PathBuf;
use std::sync::Arc;

use crate::action::{Action, ActionOutcome, Purpose};
use crate::error::{Error, Result};
use crate::log_status;
use crate::manifest::PackageManifest;
use crate::npm::NpmRunner;
use crate::osutils::OsUtils;

/// Runs a named manifest script through the package tool's script runner,
/// only if the manifest declares it.
///
/// An undeclared script is the documented no-op path: the action completes
/// successfully with `ActionOutcome::Skipped` and never touches the executor.
pub struct RunScriptAction {
    working_dir: PathBuf,
    manifest_path: PathBuf,
    script_name: String,
    npm: Arc<dyn NpmRunner>,
    osutils: Arc<dyn OsUtils>,
}

impl RunScriptAction {
    pub fn new(
        working_dir: impl Into<PathBuf>,
        manifest_path: impl Into<PathBuf>,
        script_name: impl Into<String>,
        npm: Arc<dyn NpmRunner>,
        osutils: Arc<dyn OsUtils>,
    ) -> Self {
        Self {
            working_dir: working_dir.into(),
            manifest_path: manifest_path.into(),
            script_name: script_name.into(),
            npm,
            osutils,
        }
    }
}

impl Action for RunScriptAction {
    fn name(&self) -> &'static str {
        "NpmRunScript"
    }

    fn description(&self) -> &'static str {
        "Running a manifest script"
    }

    fn purpose(&self) -> Purpose {
        Purpose::RunScript
    }

    fn execute(&self) -> Result<ActionOutcome> {
        let manifest = PackageManifest::load(self.osutils.as_ref(), &self.manifest_path)?;

        if !manifest.has_script(&self.script_name) {
            log_status!(
                "script",
                "Script '{}' not declared in {}, skipping",
                self.script_name,
                self.manifest_path.display()
            );
            return Ok(ActionOutcome::Skipped);
        }

        log_status!(
            "script",
            "Running script '{}' in {}",
            self.script_name,
            self.working_dir.display()
        );

        // Output is captured for diagnostics only; the script's stdout is not
        // part of the pipeline's product.
        self.npm
            .run(&["run", &self.script_name], &self.working_dir)
            .map_err(|e| Error::action_failed(self.name(), e.message))?;

        Ok(ActionOutcome::Ran)
    }
}
