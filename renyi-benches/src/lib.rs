//! Benchmark support crate for renyi.
//!
//! Provides the parameter grid and setup error type used by the Criterion
//! benchmarks for graph generation and full analysis.

pub mod error;
pub mod params;
