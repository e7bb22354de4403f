use std::path::Path;

pub type CmdResult<T> = packhorse::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod build;
pub mod install;
pub mod pack;
pub mod script;

/// Validate that a path points at an existing file (CLI layer).
pub(crate) fn require_file(path: &Path, field: &str) -> packhorse::Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(packhorse::Error::validation_invalid_argument(
            field,
            format!("'{}' is not a readable file", path.display()),
            None,
        ))
    }
}

/// Validate that a path points at an existing directory (CLI layer).
pub(crate) fn require_dir(path: &Path, field: &str) -> packhorse::Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(packhorse::Error::validation_invalid_argument(
            field,
            format!("'{}' is not an existing directory", path.display()),
            None,
        )
        .with_hint(format!("Create it first: mkdir -p {}", path.display())))
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (packhorse::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Pack(args) => dispatch!(args, global, pack),
        crate::Commands::Install(args) => dispatch!(args, global, install),
        crate::Commands::RunScript(args) => dispatch!(args, global, script),
        crate::Commands::Build(args) => dispatch!(args, global, build),
    }
}
