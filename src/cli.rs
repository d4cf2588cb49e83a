// src/cli.rs
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use colored::Colorize;
use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use tracing::debug;

use crate::core::config::{self, Resolution, RunConfiguration};
use crate::core::error::UsageError;
use crate::core::registry::Registry;
use crate::core::session::{RunSummary, Session};
use crate::infra::t;

fn flag(name: &'static str, help: String) -> Arg {
    Arg::new(name).long(name).help(help).action(ArgAction::SetTrue)
}

/// Builds the argument parser. Help texts follow the current i18n locale.
pub fn build_cli() -> Command {
    Command::new("xtest")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about").to_string())
        .args_override_self(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help(t!("arg_config").to_string())
                .value_name("FILE")
                .action(ArgAction::Set),
        )
        .arg(flag("only-test", t!("arg_only_test").to_string()))
        .arg(flag("only-mark", t!("arg_only_mark").to_string()))
        .arg(flag("cutback", t!("arg_cutback").to_string()))
        .arg(flag("verbose", t!("arg_verbose").to_string()))
        .arg(flag("colored", t!("arg_colored").to_string()))
        .arg(flag("dry-run", t!("arg_dry_run").to_string()))
        .arg(
            Arg::new("repeat")
                .long("repeat")
                .help(t!("arg_repeat").to_string())
                .value_name("N")
                .allow_hyphen_values(true)
                .action(ArgAction::Set),
        )
}

/// Process entry point for a test binary: resolves the configuration from
/// `args`, runs every case of `registry` and turns the result into an exit code.
///
/// Help and version print and exit successfully. Usage errors print to stderr
/// and exit with [`crate::core::error::USAGE_EXIT_CODE`] before any case runs.
/// Otherwise the exit code is the number of failed cases.
pub fn run<I, T>(args: I, mut registry: Registry) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match config::resolve(args) {
        Ok(Resolution::Help(text)) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Ok(Resolution::Version(version)) => {
            println!("{version}");
            ExitCode::SUCCESS
        }
        Ok(Resolution::Run(config)) => match execute(config, &mut registry) {
            Ok(summary) => summary.exit_code(),
            Err(e) => {
                eprintln!("{} {:#}", t!("usage_error_prefix").red(), e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            report_usage_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn report_usage_error(error: &UsageError) {
    match error {
        // clap already formats these with its own prefix and usage line
        UsageError::InvalidArguments { message } => eprintln!("{message}"),
        other => eprintln!("{} {}", t!("usage_error_prefix").red(), other),
    }
}

/// Runs `registry` in a session that reports to stdout.
pub fn execute(config: RunConfiguration, registry: &mut Registry) -> Result<RunSummary> {
    debug!(cases = registry.len(), "running registry");
    let stdout = io::stdout().lock();
    let mut session = Session::start(config, stdout);
    session.run_registry(registry);
    session
        .end()
        .with_context(|| t!("report_write_failed").to_string())
}
