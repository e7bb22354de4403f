use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{build, install, pack, script, GlobalArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "packhorse")]
#[command(version = VERSION)]
#[command(about = "Package Node.js project sources for deployment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack project source into a clean tree under the artifacts directory
    Pack(pack::PackArgs),
    /// Install production dependencies into a packaged tree
    Install(install::InstallArgs),
    /// Run a manifest-declared script if the manifest declares it
    RunScript(script::ScriptArgs),
    /// Run the full pipeline: pack, install, then scripts
    Build(build::BuildArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
