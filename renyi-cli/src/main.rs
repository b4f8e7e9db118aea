//! CLI entry point for renyi.
//!
//! Parses command-line arguments with clap, analyses one random graph, and
//! maps errors to exit codes. Logging is initialised eagerly so every later
//! step can emit structured diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use renyi_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field, warn};

/// Parse CLI arguments, execute the command, and flush the output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let summary = run_cli(cli, stdin.lock(), &mut writer).context("failed to execute command")?;
    writer.flush().context("failed to flush output")?;

    for failure in &summary.outputs.failures {
        warn!(handler = failure.handler, error = %failure.error, "output was not produced");
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err
            .downcast_ref::<CliError>()
            .and_then(|cli_error| match cli_error {
                CliError::Core(core) => Some(core.code()),
                _ => None,
            });
        let code_field = code.map(|code| field::display(code.as_str()));

        error!(error = %err, code = code_field, "command execution failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
