//! Support library for the renyi CLI binary.
//!
//! Exposes the command pipeline, parameter sources, and output handlers so
//! doctests and tests can drive them without forking a subprocess.

pub mod cli;
pub mod logging;
pub mod output;
pub mod params;
