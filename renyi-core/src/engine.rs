//! Analysis orchestration: generate, decompose, measure, aggregate.
//!
//! Exposes the [`GraphAnalysisEngine`] entry point, the [`EngineBuilder`]
//! that validates its configuration, and the [`ExecutionStrategy`] selecting
//! how per-component metrics are scheduled.

use tracing::{error, info, instrument};

use crate::{
    Result,
    decompose::{Component, ComponentDecomposer},
    error::AnalysisError,
    generator::RandomGraphGenerator,
    graph::Graph,
    metrics::ComponentMetrics,
    params::GraphParams,
    result::{ComponentAnalysis, GraphAnalysisResult},
};

/// Indicates how [`GraphAnalysisEngine`] schedules per-component metrics.
///
/// `Auto` resolves deterministically: it selects `Parallel` when the
/// `parallel` feature is compiled in and `Sequential` otherwise. Results are
/// identical under every strategy.
///
/// # Examples
/// ```
/// use renyi_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select a scheduler automatically.
    Auto,
    /// Analyse components one after another on the calling thread.
    Sequential,
    /// Analyse components concurrently on the Rayon thread pool.
    Parallel,
}

impl ExecutionStrategy {
    fn resolve(self) -> Result<Self> {
        match self {
            Self::Sequential => Ok(Self::Sequential),
            #[cfg(feature = "parallel")]
            Self::Auto | Self::Parallel => Ok(Self::Parallel),
            #[cfg(not(feature = "parallel"))]
            Self::Auto => Ok(Self::Sequential),
            #[cfg(not(feature = "parallel"))]
            Self::Parallel => Err(AnalysisError::BackendUnavailable {
                requested: Self::Parallel,
            }),
        }
    }
}

/// Configures and constructs [`GraphAnalysisEngine`] instances.
///
/// # Examples
/// ```
/// use renyi_core::{EngineBuilder, ExecutionStrategy};
///
/// let engine = EngineBuilder::new()
///     .with_seed(42)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(engine.seed(), Some(42));
/// assert_eq!(engine.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    seed: Option<u64>,
    execution_strategy: ExecutionStrategy,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            seed: None,
            execution_strategy: ExecutionStrategy::Auto,
        }
    }
}

impl EngineBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use renyi_core::{EngineBuilder, ExecutionStrategy};
    ///
    /// let builder = EngineBuilder::new();
    /// assert_eq!(builder.seed(), None);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the RNG seed so repeated runs sample the same graph.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the RNG seed.
    #[must_use]
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the scheduling strategy for per-component metrics.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs a [`GraphAnalysisEngine`].
    ///
    /// # Errors
    /// Returns [`AnalysisError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested from a build without the
    /// `parallel` feature.
    pub fn build(self) -> Result<GraphAnalysisEngine> {
        self.execution_strategy.resolve()?;
        let generator = self
            .seed
            .map_or_else(RandomGraphGenerator::new, RandomGraphGenerator::seeded);
        Ok(GraphAnalysisEngine {
            generator,
            decomposer: ComponentDecomposer::new(),
            metrics: ComponentMetrics::new(),
            execution_strategy: self.execution_strategy,
        })
    }
}

/// Entry point for generating and analysing Erdős–Rényi graphs.
///
/// # Examples
/// ```
/// use renyi_core::{EngineBuilder, GraphParams};
///
/// let engine = EngineBuilder::new().build()?;
/// let result = engine.analyze(&GraphParams::new(5, 1.0)?)?;
/// assert_eq!(result.total_components(), 1);
/// assert_eq!(result.total_edges(), 10);
/// let component = &result.components()[0];
/// assert_eq!((component.size(), component.radius(), component.diameter()), (5, 1, 1));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GraphAnalysisEngine {
    generator: RandomGraphGenerator,
    decomposer: ComponentDecomposer,
    metrics: ComponentMetrics,
    execution_strategy: ExecutionStrategy,
}

impl GraphAnalysisEngine {
    /// Returns the RNG seed used for generation, if fixed.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.generator.seed()
    }

    /// Returns the configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Samples a graph for `params` and analyses it.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvariantViolation`] when decomposition or
    /// metric computation breaks an internal invariant; no partial result is
    /// produced.
    #[instrument(
        name = "core.analyze",
        err,
        skip(self, params),
        fields(
            nodes = params.nodes().get(),
            probability = params.probability(),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn analyze(&self, params: &GraphParams) -> Result<GraphAnalysisResult> {
        let graph = self.generator.generate(params);
        self.analyze_graph(*params, graph)
    }

    /// Analyses an already constructed `graph` recorded under `params`.
    ///
    /// # Errors
    /// Returns [`AnalysisError::NodeCountMismatch`] when `graph` does not have
    /// `params.nodes()` nodes, and [`AnalysisError::InvariantViolation`] when
    /// an internal invariant is broken.
    pub fn analyze_graph(&self, params: GraphParams, graph: Graph) -> Result<GraphAnalysisResult> {
        let expected = params.nodes().get();
        if graph.node_count() != expected {
            return Err(AnalysisError::NodeCountMismatch {
                expected,
                actual: graph.node_count(),
            });
        }

        let components = self.decomposer.decompose(&graph);
        verify_partition(&graph, &components)?;
        let analyses = self.measure(&components)?;

        let result = GraphAnalysisResult::new(params, graph, analyses);
        info!(
            nodes = result.total_nodes(),
            edges = result.total_edges(),
            components = result.total_components(),
            largest = result.largest_component_size(),
            "analysis completed"
        );
        Ok(result)
    }

    fn measure(&self, components: &[Component]) -> Result<Vec<ComponentAnalysis>> {
        match self.execution_strategy.resolve()? {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => {
                use rayon::prelude::*;

                components
                    .par_iter()
                    .enumerate()
                    .map(|(index, component)| self.measure_one(index, component))
                    .collect()
            }
            _ => components
                .iter()
                .enumerate()
                .map(|(index, component)| self.measure_one(index, component))
                .collect(),
        }
    }

    fn measure_one(&self, index: usize, component: &Component) -> Result<ComponentAnalysis> {
        let report = self.metrics.analyze(component)?;
        Ok(ComponentAnalysis::new(
            index + 1,
            component.nodes().to_vec(),
            report.is_connected,
            report.radius,
            report.diameter,
            component.size(),
            component.edge_count(),
        ))
    }
}

/// Checks that `components` assign every node of `graph` exactly once and
/// account for every edge.
fn verify_partition(graph: &Graph, components: &[Component]) -> Result<()> {
    let mut owners = vec![0usize; graph.node_count()];
    for component in components {
        if component.size() == 0 {
            return Err(partition_violation("component is empty".to_owned()));
        }
        for &node in component.nodes() {
            match owners.get_mut(node) {
                Some(count) => *count += 1,
                None => {
                    return Err(partition_violation(format!(
                        "component member {node} is not a node of the graph"
                    )));
                }
            }
        }
    }
    if let Some((node, count)) = owners.iter().enumerate().find(|&(_, &count)| count != 1) {
        return Err(partition_violation(format!(
            "node {node} is assigned to {count} components"
        )));
    }
    let induced: usize = components.iter().map(Component::edge_count).sum();
    if induced != graph.edge_count() {
        return Err(partition_violation(format!(
            "components induce {induced} edges but the graph has {}",
            graph.edge_count()
        )));
    }
    Ok(())
}

fn partition_violation(detail: String) -> AnalysisError {
    error!(detail = %detail, "decomposition does not partition the graph");
    AnalysisError::invariant("partition_covers_nodes", detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "parallel")]
    use rstest::rstest;

    fn engine() -> GraphAnalysisEngine {
        EngineBuilder::new()
            .with_seed(11)
            .with_execution_strategy(ExecutionStrategy::Sequential)
            .build()
            .expect("sequential engine must build")
    }

    #[test]
    fn verify_partition_accepts_decomposition() {
        let mut graph = Graph::with_nodes(4);
        graph.try_add_edge(0, 3).expect("edge is valid");
        let components = ComponentDecomposer::new().decompose(&graph);
        verify_partition(&graph, &components).expect("decomposition is a partition");
    }

    #[test]
    fn verify_partition_rejects_missing_nodes() {
        let graph = Graph::with_nodes(3);
        let mut components = ComponentDecomposer::new().decompose(&graph);
        components.pop();
        let err = verify_partition(&graph, &components).expect_err("node 2 is uncovered");
        assert!(matches!(
            err,
            AnalysisError::InvariantViolation {
                invariant: "partition_covers_nodes",
                ..
            }
        ));
    }

    #[test]
    fn verify_partition_rejects_repeated_nodes() {
        let graph = Graph::with_nodes(2);
        let mut components = ComponentDecomposer::new().decompose(&graph);
        components.push(components[0].clone());
        let err = verify_partition(&graph, &components).expect_err("node 0 appears twice");
        assert!(err.to_string().contains("node 0 is assigned to 2 components"));
    }

    #[test]
    fn verify_partition_rejects_foreign_nodes() {
        let small = Graph::with_nodes(1);
        let large = Graph::with_nodes(3);
        let components = ComponentDecomposer::new().decompose(&large);
        let err = verify_partition(&small, &components).expect_err("nodes 1 and 2 are foreign");
        assert!(err.to_string().contains("member 1 is not a node"));
    }

    #[test]
    fn analyze_graph_rejects_mismatched_node_count() {
        let params = GraphParams::new(4, 0.5).expect("params are valid");
        let err = engine()
            .analyze_graph(params, Graph::with_nodes(3))
            .expect_err("node counts differ");
        assert_eq!(
            err,
            AnalysisError::NodeCountMismatch {
                expected: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn sequential_always_resolves_to_itself() {
        assert_eq!(
            ExecutionStrategy::Sequential.resolve(),
            Ok(ExecutionStrategy::Sequential)
        );
    }

    #[cfg(feature = "parallel")]
    #[rstest]
    #[case::auto(ExecutionStrategy::Auto)]
    #[case::parallel(ExecutionStrategy::Parallel)]
    fn parallel_builds_resolve_to_rayon(#[case] requested: ExecutionStrategy) {
        assert_eq!(requested.resolve(), Ok(ExecutionStrategy::Parallel));
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn auto_falls_back_to_sequential() {
        assert_eq!(
            ExecutionStrategy::Auto.resolve(),
            Ok(ExecutionStrategy::Sequential)
        );
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn parallel_requires_feature() {
        let err = EngineBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .build()
            .expect_err("parallel is not compiled in");
        assert_eq!(
            err,
            AnalysisError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }
        );
    }

    #[test]
    fn components_are_numbered_from_one() {
        let mut graph = Graph::with_nodes(5);
        graph.try_add_edge(3, 4).expect("edge is valid");
        graph.try_add_edge(1, 3).expect("edge is valid");
        let params = GraphParams::new(5, 0.5).expect("params are valid");
        let result = engine()
            .analyze_graph(params, graph)
            .expect("analysis succeeds");
        let summary: Vec<_> = result
            .components()
            .iter()
            .map(|c| (c.number(), c.size(), c.radius(), c.diameter(), c.edge_count()))
            .collect();
        assert_eq!(
            summary,
            vec![(1, 1, 0, 0, 0), (2, 3, 1, 2, 2), (3, 1, 0, 0, 0)]
        );
        assert_eq!(result.total_edges(), 2);
        assert_eq!(result.largest_component_size(), 3);
    }
}
