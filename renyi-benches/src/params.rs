//! Benchmark parameter types.

use std::fmt;

use renyi_core::{GraphParams, ParameterError};

/// Average degree of the sparse regime, below the giant-component threshold.
pub const SPARSE_MEAN_DEGREE: f64 = 0.5;

/// Average degree of the supercritical regime.
pub const DENSE_MEAN_DEGREE: f64 = 4.0;

/// Parameters for one `G(n, p)` benchmark run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphBenchParams {
    /// Number of nodes.
    pub node_count: usize,
    /// Edge probability.
    pub probability: f64,
}

impl GraphBenchParams {
    /// Chooses `p` so that the expected degree is `mean_degree`.
    #[must_use]
    pub fn with_mean_degree(node_count: usize, mean_degree: f64) -> Self {
        let denominator = node_count.saturating_sub(1).max(1) as f64;
        Self {
            node_count,
            probability: (mean_degree / denominator).clamp(0.0, 1.0),
        }
    }

    /// Validates the run as model parameters.
    ///
    /// # Errors
    /// Returns [`ParameterError`] when the node count is zero.
    pub fn graph_params(&self) -> Result<GraphParams, ParameterError> {
        GraphParams::new(self.node_count, self.probability)
    }
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},p={:.4}", self.node_count, self.probability)
    }
}

/// Builds the grid of runs: every node count in each degree regime.
#[must_use]
pub fn grid(node_counts: &[usize], mean_degrees: &[f64]) -> Vec<GraphBenchParams> {
    mean_degrees
        .iter()
        .flat_map(|&degree| {
            node_counts
                .iter()
                .map(move |&nodes| GraphBenchParams::with_mean_degree(nodes, degree))
        })
        .collect()
}
