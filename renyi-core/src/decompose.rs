//! Connected-component discovery.
//!
//! Components are discovered by breadth-first traversal seeded from the
//! lowest unvisited node id, which fixes their ordinal numbering. Each
//! component carries its own locally indexed adjacency so metric computation
//! never needs to touch the parent [`Graph`].

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::{Graph, NodeId};

/// A maximal connected set of nodes together with its induced edges.
///
/// Member ids are stored in ascending order; position `i` in
/// [`nodes`](Self::nodes) is the local index used by
/// [`local_neighbours`](Self::local_neighbours).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    nodes: Vec<NodeId>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Component {
    #[cfg(test)]
    pub(crate) fn from_parts(nodes: Vec<NodeId>, adjacency: Vec<Vec<usize>>) -> Self {
        let edge_count = adjacency.iter().map(Vec::len).sum::<usize>() / 2;
        Self {
            nodes,
            adjacency,
            edge_count,
        }
    }

    /// Returns the member node ids in ascending order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns the number of member nodes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of induced edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the seed node, which is also the smallest member id.
    #[must_use]
    pub fn seed(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Returns the local indices adjacent to local index `local`.
    #[must_use]
    pub fn local_neighbours(&self, local: usize) -> &[usize] {
        self.adjacency.get(local).map_or(&[], Vec::as_slice)
    }
}

/// Partitions a [`Graph`] into its connected components.
///
/// # Examples
/// ```
/// use renyi_core::{ComponentDecomposer, Graph};
///
/// let mut graph = Graph::with_nodes(4);
/// graph.try_add_edge(3, 1).expect("edge is valid");
/// let components = ComponentDecomposer::new().decompose(&graph);
/// let members: Vec<&[usize]> = components.iter().map(|c| c.nodes()).collect();
/// assert_eq!(members, [&[0][..], &[1, 3][..], &[2][..]]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ComponentDecomposer;

impl ComponentDecomposer {
    /// Creates a decomposer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the components of `graph` ordered by ascending seed node id.
    #[instrument(
        name = "core.decompose",
        skip(self, graph),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            components = tracing::field::Empty,
        ),
    )]
    pub fn decompose(&self, graph: &Graph) -> Vec<Component> {
        let mut traversal = Traversal::new(graph.node_count());
        let mut components = Vec::new();
        for seed in graph.nodes() {
            if traversal.is_visited(seed) {
                continue;
            }
            let members = traversal.collect_reachable(graph, seed);
            components.push(traversal.induce(graph, members));
        }
        tracing::Span::current().record("components", components.len());
        components
    }
}

/// Scratch state shared by every traversal of one decomposition.
struct Traversal {
    visited: Vec<bool>,
    queue: VecDeque<NodeId>,
    local_index: Vec<usize>,
}

impl Traversal {
    fn new(capacity: usize) -> Self {
        Self {
            visited: vec![false; capacity],
            queue: VecDeque::new(),
            local_index: vec![0; capacity],
        }
    }

    fn is_visited(&self, node: NodeId) -> bool {
        self.visited.get(node).copied().unwrap_or(true)
    }

    fn visit(&mut self, node: NodeId) {
        if let Some(slot) = self.visited.get_mut(node) {
            *slot = true;
            self.queue.push_back(node);
        }
    }

    fn collect_reachable(&mut self, graph: &Graph, seed: NodeId) -> Vec<NodeId> {
        let mut members = Vec::new();
        self.visit(seed);
        while let Some(node) = self.queue.pop_front() {
            members.push(node);
            for &neighbour in graph.neighbours(node) {
                if !self.is_visited(neighbour) {
                    self.visit(neighbour);
                }
            }
        }
        members.sort_unstable();
        members
    }

    fn induce(&mut self, graph: &Graph, nodes: Vec<NodeId>) -> Component {
        for (local, &node) in nodes.iter().enumerate() {
            if let Some(slot) = self.local_index.get_mut(node) {
                *slot = local;
            }
        }
        let adjacency: Vec<Vec<usize>> = nodes
            .iter()
            .map(|&node| {
                graph
                    .neighbours(node)
                    .iter()
                    .filter_map(|&neighbour| self.local_index.get(neighbour).copied())
                    .collect()
            })
            .collect();
        let degree_sum: usize = adjacency.iter().map(Vec::len).sum();
        Component {
            nodes,
            adjacency,
            edge_count: degree_sum / 2,
        }
    }
}
