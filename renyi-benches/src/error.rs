//! Benchmark setup error type.
//!
//! Lets setup functions propagate parameter and analysis failures with `?`.

use renyi_core::{AnalysisError, ParameterError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A grid point produced invalid graph parameters.
    #[error("invalid benchmark parameters: {0}")]
    Parameters(#[from] ParameterError),
    /// Building the engine or analysing a warm-up graph failed.
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}
