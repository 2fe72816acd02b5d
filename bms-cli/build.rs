//! Build script for bms-cli.
//!
//! Generates the `bms.1` man page in OUT_DIR using clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared here a second time.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn value_arg(name: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name(value_name)
        .help(help)
        .global(true)
}

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("bms")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve and inspect bms configuration")
        .long_about(
            "Resolve the bms configuration from built-in defaults, a TOML document, \
             BMS_* environment variables and command-line flags",
        )
        .arg(value_arg(
            "config",
            "PATH",
            "Configuration document to load instead of the default location",
        ))
        .arg(
            Arg::new("role")
                .long("role")
                .value_name("ROLE")
                .value_parser(["client", "server"])
                .default_value("client")
                .help("Which side of bms the configuration is resolved for")
                .global(true),
        )
        .arg(value_arg("server-id", "ID", "Override server.id"))
        .arg(value_arg(
            "environment",
            "ENV",
            "Override server.environment (local, remote)",
        ))
        .arg(value_arg(
            "database-driver",
            "DRIVER",
            "Override database.driver (sqlite, postgres)",
        ))
        .arg(value_arg("database-dsn", "DSN", "Override database.dsn"))
        .arg(value_arg(
            "auth-mode",
            "MODE",
            "Override auth.mode (local, remote, hybrid)",
        ))
        .arg(value_arg("sync-mode", "MODE", "Override sync.mode (local, remote)"))
        .arg(value_arg(
            "log-level",
            "LEVEL",
            "Override logging.level (debug, info, warn, error)",
        ))
        .arg(value_arg(
            "log-format",
            "FORMAT",
            "Override logging.format (text, json)",
        ))
        .subcommands(vec![
            Command::new("check")
                .about("Resolve, validate and log the configuration")
                .long_about(
                    "Resolve the configuration, log it redacted with any warnings, \
                     and exit non-zero when validation fails",
                ),
            Command::new("show")
                .about("Print the redacted resolved configuration")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["toml", "json"])
                        .default_value("toml")
                        .help("Output format")
                        .action(ArgAction::Set),
                ),
            Command::new("path")
                .about("Print the configuration document path")
                .long_about("Print the path resolution would load, without reading it"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("bms.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
