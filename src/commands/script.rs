use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use packhorse::action::{Action, ActionOutcome};
use packhorse::actions::RunScriptAction;
use packhorse::npm::SubprocessNpm;
use packhorse::osutils::StdOsUtils;

use crate::commands::{require_dir, require_file, CmdResult};

#[derive(Args)]
pub struct ScriptArgs {
    /// Name of the manifest script to run
    pub name: String,

    /// Directory the script runs in
    #[arg(long)]
    pub dir: PathBuf,

    /// Path to the project's package.json
    #[arg(long)]
    pub manifest: PathBuf,

    /// Package-tool binary to invoke
    #[arg(long, default_value = "npm")]
    pub npm: String,
}

#[derive(Debug, Serialize)]
pub struct ScriptOutput {
    pub action: String,
    pub script: String,
    pub outcome: ActionOutcome,
}

pub fn run(args: ScriptArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ScriptOutput> {
    require_dir(&args.dir, "dir")?;
    require_file(&args.manifest, "manifest")?;

    let action = RunScriptAction::new(
        &args.dir,
        &args.manifest,
        &args.name,
        Arc::new(SubprocessNpm::with_program(&args.npm)),
        Arc::new(StdOsUtils::new()),
    );

    let outcome = action.execute()?;

    Ok((
        ScriptOutput {
            action: action.name().to_string(),
            script: args.name,
            outcome,
        },
        0,
    ))
}
