//! Command implementations and argument parsing for the renyi CLI.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use renyi_core::{
    AnalysisError, EngineBuilder, ExecutionStrategy, GraphAnalysisResult, GraphParams,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::output::{
    BroadcastReport, ConsoleSummary, FileReport, OutputService, SvgVisualization,
};
use crate::params::{ArgumentParameters, ParameterSource, PromptParameters};

/// Report file written when `--report` is not given.
pub const DEFAULT_REPORT_PATH: &str = "result.txt";

/// SVG file written when `--svg` is not given.
pub const DEFAULT_SVG_PATH: &str = "graph.svg";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "renyi",
    about = "Generate an Erdős–Rényi random graph and analyse its components."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Analyse a graph whose parameters are given as flags.
    Run(RunCommand),
    /// Prompt for the graph parameters on standard input.
    Interactive(InteractiveCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Number of nodes `n`; invalid values fall back to 50.
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub nodes: Option<String>,

    /// Edge probability `p`; invalid values fall back to 0.01.
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    pub probability: Option<String>,

    /// Analysis and output options.
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Options accepted by the `interactive` command.
#[derive(Debug, Args, Clone)]
pub struct InteractiveCommand {
    /// Analysis and output options.
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Options shared by every command that runs an analysis.
#[derive(Debug, Args, Clone)]
pub struct AnalysisArgs {
    /// Seed for the random number generator; omit for a fresh graph per run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How per-component metrics are scheduled.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Output destinations.
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Output destinations for an analysis.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Path of the text report.
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Skip the text report.
    #[arg(long)]
    pub no_report: bool,

    /// Path of the SVG rendering.
    #[arg(long, default_value = DEFAULT_SVG_PATH)]
    pub svg: PathBuf,

    /// Skip the SVG rendering.
    #[arg(long)]
    pub no_svg: bool,
}

/// Scheduling strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Let the engine choose.
    Auto,
    /// Measure components on the calling thread.
    Sequential,
    /// Measure components on the Rayon thread pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the interactive answers failed.
    #[error("failed to read parameters: {source}")]
    Prompt {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Core orchestration failed.
    #[error(transparent)]
    Core(#[from] AnalysisError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug)]
pub struct RunSummary {
    /// The analysis that was produced.
    pub result: GraphAnalysisResult,
    /// What each output handler did with it.
    pub outputs: BroadcastReport,
}

/// Executes the CLI command represented by `cli`.
///
/// `input` feeds the interactive prompts and `output` receives prompts, notices
/// and the console summary. Output handler failures are recorded in
/// [`RunSummary::outputs`] rather than returned.
///
/// # Errors
/// Returns [`CliError`] when reading prompts or running the analysis fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io;
/// # use clap::Parser;
/// # use renyi_cli::cli::{Cli, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli::try_parse_from([
///     "renyi", "run", "--nodes", "5", "--probability", "1", "--seed", "7",
///     "--no-report", "--no-svg",
/// ])?;
/// let mut console = Vec::new();
/// let summary = run_cli(cli, io::empty(), &mut console)?;
/// assert_eq!(summary.result.total_edges(), 10);
/// assert!(String::from_utf8(console)?.contains("components: 1"));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip_all,
    fields(command = field::Empty),
)]
pub fn run_cli<R: BufRead, W: Write>(
    cli: Cli,
    input: R,
    output: &mut W,
) -> Result<RunSummary, CliError> {
    let span = Span::current();
    let (params, analysis) = match cli.command {
        Command::Run(run) => {
            span.record("command", field::display("run"));
            let params = ArgumentParameters::new(run.nodes, run.probability).acquire()?;
            (params, run.analysis)
        }
        Command::Interactive(interactive) => {
            span.record("command", field::display("interactive"));
            let params = PromptParameters::new(input, &mut *output).acquire()?;
            (params, interactive.analysis)
        }
    };
    execute(params, &analysis, output)
}

#[instrument(
    name = "cli.execute",
    err,
    skip_all,
    fields(nodes = params.nodes().get(), probability = params.probability(), seed = ?args.seed),
)]
fn execute<W: Write>(
    params: GraphParams,
    args: &AnalysisArgs,
    output: &mut W,
) -> Result<RunSummary, CliError> {
    let engine = EngineBuilder::new()
        .with_optional_seed(args.seed)
        .with_execution_strategy(args.strategy.into())
        .build()?;
    let result = engine.analyze(&params)?;

    let outputs = build_output_service(&args.output, output).broadcast(&result);
    info!(
        completed = outputs.completed.len(),
        failed = outputs.failures.len(),
        "command completed"
    );
    Ok(RunSummary { result, outputs })
}

/// Assembles the output handlers selected by `args`, in the order report,
/// console summary, SVG.
pub fn build_output_service<'a, W: Write>(
    args: &OutputArgs,
    console: &'a mut W,
) -> OutputService<'a> {
    let mut service = OutputService::new();
    if !args.no_report {
        service.push(FileReport::new(&args.report));
    }
    service.push(ConsoleSummary::new(console));
    if !args.no_svg {
        service.push(SvgVisualization::new(&args.svg));
    }
    service
}
