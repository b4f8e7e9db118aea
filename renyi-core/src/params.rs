//! Parameters of the Erdős–Rényi model.

use std::num::NonZeroUsize;

use crate::error::ParameterError;

/// Node count used when the caller supplies none or an invalid one.
pub const DEFAULT_NODES: usize = 50;

/// Largest accepted node count.
///
/// Generation runs one trial per node pair and stores per-node neighbour
/// lists, so counts far above this cannot complete in memory.
pub const MAX_NODES: usize = 100_000;

/// Edge probability used when the caller supplies none or an invalid one.
pub const DEFAULT_PROBABILITY: f64 = 0.01;

/// Validated `G(n, p)` parameters.
///
/// `nodes` is the number of labelled nodes and `probability` the independent
/// inclusion probability of each of the `n·(n-1)/2` candidate edges.
///
/// # Examples
/// ```
/// use renyi_core::GraphParams;
///
/// let params = GraphParams::new(10, 0.25).expect("parameters must be valid");
/// assert_eq!(params.nodes().get(), 10);
/// assert_eq!(params.probability(), 0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphParams {
    nodes: NonZeroUsize,
    probability: f64,
}

impl GraphParams {
    /// Validates and builds a parameter set.
    ///
    /// # Errors
    /// Returns [`ParameterError::NonPositiveNodeCount`] when `nodes` is zero,
    /// [`ParameterError::NodeCountTooLarge`] when it exceeds [`MAX_NODES`], and
    /// [`ParameterError::ProbabilityOutOfRange`] when `probability` is not a
    /// number in `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use renyi_core::{GraphParams, ParameterError};
    ///
    /// let err = GraphParams::new(4, 1.5).expect_err("probability must be rejected");
    /// assert!(matches!(err, ParameterError::ProbabilityOutOfRange { .. }));
    /// ```
    pub fn new(nodes: usize, probability: f64) -> Result<Self, ParameterError> {
        let nodes = NonZeroUsize::new(nodes)
            .ok_or(ParameterError::NonPositiveNodeCount { got: 0 })
            .and_then(check_upper_bound)?;
        Ok(Self {
            nodes,
            probability: validate_probability(probability)?,
        })
    }

    /// Validates a signed node count, as typed by a user, and a probability.
    ///
    /// # Errors
    /// Returns [`ParameterError::NonPositiveNodeCount`] when `nodes <= 0` and
    /// [`ParameterError::ProbabilityOutOfRange`] when `probability` is not a
    /// number in `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use renyi_core::{GraphParams, ParameterError};
    ///
    /// let err = GraphParams::from_signed(-3, 0.5).expect_err("negative counts are invalid");
    /// assert_eq!(err, ParameterError::NonPositiveNodeCount { got: -3 });
    /// ```
    pub fn from_signed(nodes: i64, probability: f64) -> Result<Self, ParameterError> {
        let nodes = validate_signed_nodes(nodes)?;
        Ok(Self {
            nodes,
            probability: validate_probability(probability)?,
        })
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn nodes(&self) -> NonZeroUsize {
        self.nodes
    }

    /// Returns the edge inclusion probability.
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            nodes: NonZeroUsize::new(DEFAULT_NODES).unwrap_or(NonZeroUsize::MIN),
            probability: DEFAULT_PROBABILITY,
        }
    }
}

/// Checks a signed node count and converts it to the stored representation.
///
/// # Errors
/// Returns [`ParameterError::NonPositiveNodeCount`] when `nodes <= 0` and
/// [`ParameterError::NodeCountTooLarge`] when `nodes > MAX_NODES`.
pub fn validate_signed_nodes(nodes: i64) -> Result<NonZeroUsize, ParameterError> {
    if nodes <= 0 {
        return Err(ParameterError::NonPositiveNodeCount { got: nodes });
    }
    let too_large = ParameterError::NodeCountTooLarge {
        got: nodes.unsigned_abs(),
        max: MAX_NODES,
    };
    usize::try_from(nodes)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(too_large)
        .and_then(check_upper_bound)
}

fn check_upper_bound(nodes: NonZeroUsize) -> Result<NonZeroUsize, ParameterError> {
    if nodes.get() > MAX_NODES {
        return Err(ParameterError::NodeCountTooLarge {
            got: u64::try_from(nodes.get()).unwrap_or(u64::MAX),
            max: MAX_NODES,
        });
    }
    Ok(nodes)
}

/// Checks that `probability` is a number in `[0, 1]`.
///
/// # Errors
/// Returns [`ParameterError::ProbabilityOutOfRange`] otherwise, including for
/// NaN.
pub fn validate_probability(probability: f64) -> Result<f64, ParameterError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(ParameterError::ProbabilityOutOfRange { got: probability })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn defaults_match_documented_values() {
        let params = GraphParams::default();
        assert_eq!(params.nodes().get(), 50);
        assert_eq!(params.probability(), 0.01);
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::one(1.0)]
    #[case::interior(0.37)]
    fn accepts_probabilities_in_closed_interval(#[case] probability: f64) {
        let params = GraphParams::new(3, probability).expect("probability is valid");
        assert_eq!(params.probability(), probability);
    }

    #[rstest]
    #[case::negative(-0.01)]
    #[case::above_one(1.0001)]
    #[case::infinite(f64::INFINITY)]
    fn rejects_probabilities_outside_interval(#[case] probability: f64) {
        let err = GraphParams::new(3, probability).expect_err("probability is invalid");
        assert!(matches!(err, ParameterError::ProbabilityOutOfRange { .. }));
    }

    #[test]
    fn rejects_nan_probability() {
        let err = GraphParams::new(3, f64::NAN).expect_err("NaN is invalid");
        assert!(matches!(
            err,
            ParameterError::ProbabilityOutOfRange { got } if got.is_nan()
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn rejects_non_positive_signed_counts(#[case] nodes: i64) {
        let err = GraphParams::from_signed(nodes, 0.5).expect_err("count is invalid");
        assert_eq!(err, ParameterError::NonPositiveNodeCount { got: nodes });
    }

    #[test]
    fn rejects_zero_unsigned_count() {
        let err = GraphParams::new(0, 0.5).expect_err("zero nodes is invalid");
        assert_eq!(err, ParameterError::NonPositiveNodeCount { got: 0 });
    }

    #[rstest]
    #[case(1)]
    #[case(100_000)]
    fn accepts_counts_up_to_the_maximum(#[case] nodes: i64) {
        let params = GraphParams::from_signed(nodes, 0.5).expect("count is valid");
        assert_eq!(params.nodes().get() as i64, nodes);
    }

    #[rstest]
    #[case(100_001)]
    #[case(99_999_999_999)]
    #[case(i64::MAX)]
    fn rejects_signed_counts_above_maximum(#[case] nodes: i64) {
        let err = GraphParams::from_signed(nodes, 0.5).expect_err("count is too large");
        assert_eq!(
            err,
            ParameterError::NodeCountTooLarge {
                got: nodes as u64,
                max: MAX_NODES,
            }
        );
    }

    #[test]
    fn rejects_unsigned_count_above_maximum() {
        let err = GraphParams::new(MAX_NODES + 1, 0.5).expect_err("count is too large");
        assert!(matches!(err, ParameterError::NodeCountTooLarge { .. }));
    }

    #[test]
    fn node_count_is_checked_before_probability() {
        let err = GraphParams::from_signed(0, 2.0).expect_err("both are invalid");
        assert!(matches!(err, ParameterError::NonPositiveNodeCount { .. }));
    }
}
