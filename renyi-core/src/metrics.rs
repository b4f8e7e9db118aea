//! Eccentricity-based metrics for a single connected component.

use std::collections::VecDeque;

use tracing::{error, instrument};

use crate::{Result, decompose::Component, error::AnalysisError};

const UNREACHED: usize = usize::MAX;

/// Connectivity, radius and diameter of one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentMetricsReport {
    /// Whether every member is reachable from every other member.
    pub is_connected: bool,
    /// Minimum eccentricity over the component's nodes.
    pub radius: usize,
    /// Maximum eccentricity over the component's nodes.
    pub diameter: usize,
}

/// Computes eccentricity-based metrics with one unweighted BFS per node.
///
/// # Examples
/// ```
/// use renyi_core::{ComponentDecomposer, ComponentMetrics, Graph};
///
/// let mut graph = Graph::with_nodes(4);
/// for (left, right) in [(0, 1), (1, 2), (2, 3)] {
///     graph.try_add_edge(left, right).expect("edge is valid");
/// }
/// let components = ComponentDecomposer::new().decompose(&graph);
/// let report = ComponentMetrics::new().analyze(&components[0])?;
/// assert!(report.is_connected);
/// assert_eq!((report.radius, report.diameter), (2, 3));
/// # Ok::<(), renyi_core::AnalysisError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ComponentMetrics;

impl ComponentMetrics {
    /// Creates a metrics calculator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the metrics of `component`.
    ///
    /// Single-node components short-circuit to radius and diameter zero.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvariantViolation`] when a breadth-first
    /// search fails to reach every member, i.e. the component is not
    /// connected.
    #[instrument(
        name = "core.metrics",
        level = "debug",
        err,
        skip(self, component),
        fields(seed = component.seed(), size = component.size()),
    )]
    pub fn analyze(&self, component: &Component) -> Result<ComponentMetricsReport> {
        if component.size() <= 1 {
            return Ok(ComponentMetricsReport {
                is_connected: true,
                radius: 0,
                diameter: 0,
            });
        }

        let eccentricities = self.eccentricities(component)?;
        let radius = eccentricities.iter().copied().min().unwrap_or(0);
        let diameter = eccentricities.iter().copied().max().unwrap_or(0);
        Ok(ComponentMetricsReport {
            is_connected: true,
            radius,
            diameter,
        })
    }

    /// Returns the eccentricity of every member, ordered like
    /// [`Component::nodes`].
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvariantViolation`] when some member is
    /// unreachable from another.
    pub fn eccentricities(&self, component: &Component) -> Result<Vec<usize>> {
        let mut search = BreadthFirst::new(component.size());
        (0..component.size())
            .map(|source| search.eccentricity(component, source))
            .collect()
    }
}

/// Reusable distance buffer and queue for repeated searches.
struct BreadthFirst {
    distances: Vec<usize>,
    queue: VecDeque<usize>,
}

impl BreadthFirst {
    fn new(size: usize) -> Self {
        Self {
            distances: vec![UNREACHED; size],
            queue: VecDeque::with_capacity(size),
        }
    }

    fn eccentricity(&mut self, component: &Component, source: usize) -> Result<usize> {
        self.distances.fill(UNREACHED);
        self.queue.clear();
        if let Some(slot) = self.distances.get_mut(source) {
            *slot = 0;
            self.queue.push_back(source);
        }

        let mut farthest = 0;
        let mut reached = 0;
        while let Some(local) = self.queue.pop_front() {
            let distance = self.distances.get(local).copied().unwrap_or(UNREACHED);
            farthest = farthest.max(distance);
            reached += 1;
            for &next in component.local_neighbours(local) {
                if let Some(slot) = self.distances.get_mut(next) {
                    if *slot == UNREACHED {
                        *slot = distance + 1;
                        self.queue.push_back(next);
                    }
                }
            }
        }

        if reached != component.size() {
            let origin = component.nodes().get(source).copied().unwrap_or(source);
            error!(
                origin,
                reached,
                size = component.size(),
                "component is not connected"
            );
            return Err(AnalysisError::invariant(
                "component_connected",
                format!(
                    "BFS from node {origin} reached {reached} of {} members",
                    component.size()
                ),
            ));
        }
        Ok(farthest)
    }
}
