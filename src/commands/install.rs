use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use packhorse::action::{Action, ActionOutcome};
use packhorse::actions::InstallAction;
use packhorse::npm::SubprocessNpm;

use crate::commands::{require_dir, CmdResult};

#[derive(Args)]
pub struct InstallArgs {
    /// Directory containing the packaged source and its manifest
    #[arg(long)]
    pub dir: PathBuf,

    /// Package-tool binary to invoke
    #[arg(long, default_value = "npm")]
    pub npm: String,
}

#[derive(Debug, Serialize)]
pub struct InstallOutput {
    pub action: String,
    pub outcome: ActionOutcome,
    pub dir: String,
}

pub fn run(args: InstallArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<InstallOutput> {
    require_dir(&args.dir, "dir")?;

    let action = InstallAction::new(&args.dir, Arc::new(SubprocessNpm::with_program(&args.npm)));
    let outcome = action.execute()?;

    Ok((
        InstallOutput {
            action: action.name().to_string(),
            outcome,
            dir: args.dir.display().to_string(),
        },
        0,
    ))
}
