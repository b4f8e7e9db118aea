//! Erdős–Rényi `G(n, p)` sampling.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::instrument;

use crate::{graph::Graph, params::GraphParams};

/// Samples random graphs under the Erdős–Rényi model.
///
/// Each call to [`generate`](Self::generate) creates its own RNG, seeded from
/// the configured seed or from OS entropy, so no random state is shared
/// between runs.
///
/// # Examples
/// ```
/// use renyi_core::{GraphParams, RandomGraphGenerator};
///
/// let params = GraphParams::new(6, 1.0).expect("parameters must be valid");
/// let graph = RandomGraphGenerator::seeded(7).generate(&params);
/// assert_eq!(graph.node_count(), 6);
/// assert_eq!(graph.edge_count(), 15);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomGraphGenerator {
    seed: Option<u64>,
}

impl RandomGraphGenerator {
    /// Creates a generator drawing fresh entropy for every graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that reproduces the same graph for the same params.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Samples a graph for `params`.
    #[instrument(
        name = "core.generate",
        skip(self, params),
        fields(
            nodes = params.nodes().get(),
            probability = params.probability(),
            seeded = self.seed.is_some(),
            edges = tracing::field::Empty,
        ),
    )]
    pub fn generate(&self, params: &GraphParams) -> Graph {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let graph = Self::generate_with_rng(params, &mut rng);
        tracing::Span::current().record("edges", graph.edge_count());
        graph
    }

    /// Samples a graph for `params` using a caller-owned RNG.
    ///
    /// Pairs are visited as `(i, j)` with `i < j` in lexicographic order and
    /// each is kept with probability `params.probability()`.
    pub fn generate_with_rng<R: Rng>(params: &GraphParams, rng: &mut R) -> Graph {
        let nodes = params.nodes().get();
        let probability = params.probability();
        let mut graph = Graph::with_nodes(nodes);
        for left in 0..nodes {
            for right in (left + 1)..nodes {
                if rng.gen_bool(probability) {
                    graph.push_edge(left, right);
                }
            }
        }
        graph
    }
}
