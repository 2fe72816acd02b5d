//! Main entry point for the bms CLI.
//!
//! Resolves the bms configuration from defaults, the configuration document,
//! `BMS_*` environment variables and command-line flags:
//! - `check`: Resolve, validate and log the configuration
//! - `show`: Print the redacted resolved configuration
//! - `path`: Print the configuration document path

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use error::CliError;
use utils::GlobalOptions;

fn main() {
    // Argument errors get the CLI's own exit code; help and version still exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(CliError::InvalidArguments(e.to_string()).exit_code());
        }
        Err(e) => e.exit(),
    };

    let global = GlobalOptions {
        config: cli.config,
        role: cli.role,
        overlay: cli.overlay.to_overlay(),
    };

    let result = match cli.command {
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Path(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            if !e.is_logged() {
                eprintln!("Error: {e}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
