//! Command-line interface orchestration for renyi.
//!
//! `run` reads `n` and `p` from flags, `interactive` prompts for them; both
//! analyse one random graph and hand the result to the configured outputs.

mod commands;

pub use commands::{
    AnalysisArgs, Cli, CliError, Command, DEFAULT_REPORT_PATH, DEFAULT_SVG_PATH,
    InteractiveCommand, OutputArgs, RunCommand, RunSummary, StrategyArg, build_output_service,
    run_cli,
};
