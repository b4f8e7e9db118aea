//! Result records produced by [`crate::GraphAnalysisEngine`].
//!
//! Both records are immutable once built: fields are private and exposed
//! through read accessors only.

use crate::{
    graph::{Graph, NodeId},
    params::GraphParams,
};

/// Metrics for one connected component.
///
/// # Examples
/// ```
/// use renyi_core::{EngineBuilder, GraphParams};
///
/// let engine = EngineBuilder::new().with_seed(1).build()?;
/// let result = engine.analyze(&GraphParams::new(3, 0.0)?)?;
/// let first = &result.components()[0];
/// assert_eq!(first.number(), 1);
/// assert_eq!((first.size(), first.radius(), first.diameter()), (1, 0, 0));
/// assert_eq!(first.nodes(), &[0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentAnalysis {
    number: usize,
    nodes: Vec<NodeId>,
    is_connected: bool,
    radius: usize,
    diameter: usize,
    size: usize,
    edge_count: usize,
}

impl ComponentAnalysis {
    pub(crate) fn new(
        number: usize,
        nodes: Vec<NodeId>,
        is_connected: bool,
        radius: usize,
        diameter: usize,
        size: usize,
        edge_count: usize,
    ) -> Self {
        Self {
            number,
            nodes,
            is_connected,
            radius,
            diameter,
            size,
            edge_count,
        }
    }

    /// One-based ordinal in discovery order (ascending lowest member id).
    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    /// Member node ids in ascending order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Whether the component is connected; always `true` for a component
    /// produced by the engine.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    /// Minimum eccentricity over the component's nodes.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Maximum eccentricity over the component's nodes.
    #[must_use]
    pub fn diameter(&self) -> usize {
        self.diameter
    }

    /// Number of member nodes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of edges induced on the member nodes.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

/// Aggregated outcome of one engine invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphAnalysisResult {
    params: GraphParams,
    graph: Graph,
    components: Vec<ComponentAnalysis>,
    total_nodes: usize,
    total_edges: usize,
    total_components: usize,
}

impl GraphAnalysisResult {
    pub(crate) fn new(
        params: GraphParams,
        graph: Graph,
        components: Vec<ComponentAnalysis>,
    ) -> Self {
        let total_nodes = graph.node_count();
        let total_edges = graph.edge_count();
        let total_components = components.len();
        Self {
            params,
            graph,
            components,
            total_nodes,
            total_edges,
            total_components,
        }
    }

    /// Parameters the graph was sampled with.
    #[must_use]
    pub fn params(&self) -> &GraphParams {
        &self.params
    }

    /// The analysed graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Per-component metrics ordered by [`ComponentAnalysis::number`].
    #[must_use]
    pub fn components(&self) -> &[ComponentAnalysis] {
        &self.components
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    /// Number of edges in the graph.
    #[must_use]
    pub fn total_edges(&self) -> usize {
        self.total_edges
    }

    /// Number of connected components.
    #[must_use]
    pub fn total_components(&self) -> usize {
        self.total_components
    }

    /// Size of the largest component, or zero for an empty result.
    #[must_use]
    pub fn largest_component_size(&self) -> usize {
        self.components
            .iter()
            .map(ComponentAnalysis::size)
            .max()
            .unwrap_or(0)
    }
}
