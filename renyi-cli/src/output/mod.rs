//! Destinations for a finished analysis.
//!
//! Handlers are independent: [`OutputService::broadcast`] runs every handler in
//! registration order and records failures instead of stopping at the first.

mod console;
mod report;
mod svg;

use std::io;
use std::path::PathBuf;

use renyi_core::GraphAnalysisResult;
use thiserror::Error;
use tracing::{debug, error, instrument};

pub use console::ConsoleSummary;
pub use report::{FileReport, MATRIX_FRAGMENT, MATRIX_FULL_LIMIT, render_report};
pub use svg::{DEFAULT_SVG_MAX_NODES, SvgVisualization, render_svg};

/// Errors raised by an [`OutputHandler`].
#[derive(Debug, Error)]
pub enum OutputError {
    /// Creating or writing an output file failed.
    #[error("failed to write `{path}`: {source}")]
    File {
        /// File being written.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing to a stream failed.
    #[error("failed to write output stream: {source}")]
    Stream {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Consumes a finished analysis.
pub trait OutputHandler {
    /// Short name used in logs and failure reports.
    fn name(&self) -> &'static str;

    /// Emits `result` to this handler's destination.
    ///
    /// # Errors
    /// Returns [`OutputError`] when the destination cannot be written.
    fn handle(&mut self, result: &GraphAnalysisResult) -> Result<(), OutputError>;
}

/// A handler that failed during a broadcast.
#[derive(Debug)]
pub struct HandlerFailure {
    /// Name of the failing handler.
    pub handler: &'static str,
    /// The error it returned.
    pub error: OutputError,
}

/// Outcome of one [`OutputService::broadcast`].
#[derive(Debug, Default)]
pub struct BroadcastReport {
    /// Handlers that completed, in order.
    pub completed: Vec<&'static str>,
    /// Handlers that failed, in order.
    pub failures: Vec<HandlerFailure>,
}

impl BroadcastReport {
    /// Reports whether every handler completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered collection of output handlers.
///
/// # Examples
/// ```
/// use renyi_cli::output::{ConsoleSummary, OutputService};
/// use renyi_core::{EngineBuilder, GraphParams};
///
/// let engine = EngineBuilder::new().with_seed(1).build().expect("valid engine");
/// let result = engine
///     .analyze(&GraphParams::new(4, 1.0).expect("valid params"))
///     .expect("analysis succeeds");
///
/// let mut console = Vec::new();
/// let report = OutputService::new()
///     .with_handler(ConsoleSummary::new(&mut console))
///     .broadcast(&result);
/// assert!(report.is_success());
/// assert!(String::from_utf8(console).expect("utf-8").contains("components: 1"));
/// ```
#[derive(Default)]
pub struct OutputService<'a> {
    handlers: Vec<Box<dyn OutputHandler + 'a>>,
}

impl<'a> OutputService<'a> {
    /// Creates a service with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `handler`, returning the service.
    #[must_use]
    pub fn with_handler(mut self, handler: impl OutputHandler + 'a) -> Self {
        self.push(handler);
        self
    }

    /// Appends `handler`.
    pub fn push(&mut self, handler: impl OutputHandler + 'a) {
        self.handlers.push(Box::new(handler));
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Reports whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Names of the registered handlers, in order.
    #[must_use]
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    /// Runs every handler against `result`.
    #[instrument(name = "cli.broadcast", skip_all, fields(handlers = self.handlers.len()))]
    pub fn broadcast(&mut self, result: &GraphAnalysisResult) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        for handler in &mut self.handlers {
            let name = handler.name();
            match handler.handle(result) {
                Ok(()) => {
                    debug!(handler = name, "output handler completed");
                    report.completed.push(name);
                }
                Err(err) => {
                    error!(handler = name, error = %err, "output handler failed");
                    report.failures.push(HandlerFailure {
                        handler: name,
                        error: err,
                    });
                }
            }
        }
        report
    }
}
