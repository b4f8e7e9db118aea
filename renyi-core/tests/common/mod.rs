//! Helpers shared by the `renyi-core` integration suites.
#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

use proptest::test_runner::Config as ProptestConfig;
use renyi_core::{
    EngineBuilder, ExecutionStrategy, Graph, GraphAnalysisEngine, GraphAnalysisResult, GraphParams,
};
use renyi_test_support::proptest_profile::ProptestRunProfile;

/// Builds a proptest configuration honouring `RENYI_PBT_CASES`.
#[must_use]
pub fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: ProptestRunProfile::load(default_cases).cases(),
        ..ProptestConfig::default()
    }
}

/// Returns a seeded engine using `strategy`.
#[must_use]
pub fn seeded_engine(seed: u64, strategy: ExecutionStrategy) -> GraphAnalysisEngine {
    EngineBuilder::new()
        .with_seed(seed)
        .with_execution_strategy(strategy)
        .build()
        .expect("test engine configuration must be valid")
}

/// Builds validated parameters or panics with context.
#[must_use]
pub fn params(nodes: usize, probability: f64) -> GraphParams {
    GraphParams::new(nodes, probability).expect("test parameters must be valid")
}

/// Builds a graph from an explicit edge list.
#[must_use]
pub fn graph_from(nodes: usize, edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::with_nodes(nodes);
    for &(left, right) in edges {
        graph
            .try_add_edge(left, right)
            .expect("fixture edge must be valid");
    }
    graph
}

/// Projects the per-component metrics to comparable tuples of
/// `(number, size, radius, diameter)`.
#[must_use]
pub fn component_rows(result: &GraphAnalysisResult) -> Vec<(usize, usize, usize, usize)> {
    result
        .components()
        .iter()
        .map(|c| (c.number(), c.size(), c.radius(), c.diameter()))
        .collect()
}
