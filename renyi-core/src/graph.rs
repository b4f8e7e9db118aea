//! Undirected, loopless, unweighted graph on contiguous node ids.

use crate::error::GraphError;

/// Identifier of a node; graphs label their nodes `0..node_count`.
pub type NodeId = usize;

/// Simple undirected graph stored as per-node neighbour lists.
///
/// Every edge's endpoints are distinct and within `0..node_count`, and each
/// unordered pair appears at most once.
///
/// # Examples
/// ```
/// use renyi_core::Graph;
///
/// let mut graph = Graph::with_nodes(3);
/// graph.try_add_edge(0, 2).expect("edge is valid");
/// assert_eq!(graph.edge_count(), 1);
/// assert!(graph.has_edge(2, 0));
/// assert_eq!(graph.edges().collect::<Vec<_>>(), [(0, 2)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `node_count` isolated nodes.
    #[must_use]
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edge_count: 0,
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterates node ids in ascending order.
    pub fn nodes(&self) -> std::ops::Range<NodeId> {
        0..self.node_count()
    }

    /// Returns the neighbours of `node`, or an empty slice for unknown ids.
    #[must_use]
    pub fn neighbours(&self, node: NodeId) -> &[NodeId] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Returns the number of edges incident to `node`.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbours(node).len()
    }

    /// Reports whether `left` and `right` are adjacent.
    #[must_use]
    pub fn has_edge(&self, left: NodeId, right: NodeId) -> bool {
        self.neighbours(left).contains(&right)
    }

    /// Iterates each undirected edge once as `(low, high)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(node, neighbours)| {
                neighbours
                    .iter()
                    .copied()
                    .filter(move |&other| other > node)
                    .map(move |other| (node, other))
            })
    }

    /// Inserts the undirected edge `{left, right}` after validating it.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when the endpoints coincide,
    /// [`GraphError::NodeOutOfBounds`] when an endpoint is not a node of this
    /// graph, and [`GraphError::DuplicateEdge`] when the edge already exists.
    pub fn try_add_edge(&mut self, left: NodeId, right: NodeId) -> Result<(), GraphError> {
        let node_count = self.node_count();
        for node in [left, right] {
            if node >= node_count {
                return Err(GraphError::NodeOutOfBounds { node, node_count });
            }
        }
        if left == right {
            return Err(GraphError::SelfLoop { node: left });
        }
        if self.has_edge(left, right) {
            return Err(GraphError::DuplicateEdge {
                left: left.min(right),
                right: left.max(right),
            });
        }
        self.push_edge(left, right);
        Ok(())
    }

    /// Inserts an edge the caller has already proven valid.
    ///
    /// The generator visits each pair `left < right` once, so neither a loop
    /// nor a duplicate can reach this point from there.
    pub(crate) fn push_edge(&mut self, left: NodeId, right: NodeId) {
        debug_assert!(left != right, "self-loops are not permitted");
        debug_assert!(!self.has_edge(left, right), "duplicate edge ({left}, {right})");
        if let Some(row) = self.adjacency.get_mut(left) {
            row.push(right);
        }
        if let Some(row) = self.adjacency.get_mut(right) {
            row.push(left);
        }
        self.edge_count += 1;
    }
}
