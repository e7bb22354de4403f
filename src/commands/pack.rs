use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use packhorse::action::{Action, ActionOutcome};
use packhorse::actions::PackAction;
use packhorse::npm::SubprocessNpm;
use packhorse::osutils::StdOsUtils;

use crate::commands::{require_dir, require_file, CmdResult};

#[derive(Args)]
pub struct PackArgs {
    /// Path to the project's package.json
    #[arg(long)]
    pub manifest: PathBuf,

    /// Existing writable directory receiving the extracted source
    #[arg(long)]
    pub artifacts: PathBuf,

    /// Existing writable directory for the intermediate archive
    #[arg(long)]
    pub scratch: PathBuf,

    /// Package-tool binary to invoke
    #[arg(long, default_value = "npm")]
    pub npm: String,
}

#[derive(Debug, Serialize)]
pub struct PackOutput {
    pub action: String,
    pub outcome: ActionOutcome,
    pub artifacts_dir: String,
    pub scratch_dir: String,
}

pub fn run(args: PackArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<PackOutput> {
    require_file(&args.manifest, "manifest")?;
    require_dir(&args.artifacts, "artifacts")?;
    require_dir(&args.scratch, "scratch")?;

    let action = PackAction::new(
        &args.artifacts,
        &args.scratch,
        &args.manifest,
        Arc::new(StdOsUtils::new()),
        Arc::new(SubprocessNpm::with_program(&args.npm)),
    );

    let outcome = action.execute()?;

    Ok((
        PackOutput {
            action: action.name().to_string(),
            outcome,
            artifacts_dir: args.artifacts.display().to_string(),
            scratch_dir: args.scratch.display().to_string(),
        },
        0,
    ))
}
