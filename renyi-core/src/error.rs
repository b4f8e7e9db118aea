//! Error types for the Renyi core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::engine::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while validating [`crate::GraphParams`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ParameterError {
    /// The node count must be a positive integer.
    #[error("node count must be positive (got {got})")]
    NonPositiveNodeCount {
        /// The rejected node count.
        got: i64,
    },
    /// The node count exceeds [`crate::MAX_NODES`].
    #[error("node count must not exceed {max} (got {got})")]
    NodeCountTooLarge {
        /// The rejected node count.
        got: u64,
        /// The largest accepted node count.
        max: usize,
    },
    /// The edge probability must lie within `[0, 1]`.
    #[error("edge probability must lie in [0, 1] (got {got})")]
    ProbabilityOutOfRange {
        /// The rejected probability.
        got: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`ParameterError`] variants.
    enum ParameterErrorCode for ParameterError {
        /// The node count must be a positive integer.
        NonPositiveNodeCount => NonPositiveNodeCount { .. } => "RENYI_NON_POSITIVE_NODE_COUNT",
        /// The node count exceeds the supported maximum.
        NodeCountTooLarge => NodeCountTooLarge { .. } => "RENYI_NODE_COUNT_TOO_LARGE",
        /// The edge probability must lie within `[0, 1]`.
        ProbabilityOutOfRange => ProbabilityOutOfRange { .. } => "RENYI_PROBABILITY_OUT_OF_RANGE",
    }
}

/// An error produced when inserting an edge into a [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// Both endpoints of the edge were the same node.
    #[error("self-loop on node {node} is not permitted")]
    SelfLoop {
        /// The node the loop was attached to.
        node: usize,
    },
    /// An endpoint referenced a node that does not exist.
    #[error("node {node} is out of bounds for a graph with {node_count} nodes")]
    NodeOutOfBounds {
        /// The offending endpoint.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The edge was already present.
    #[error("edge ({left}, {right}) already exists")]
    DuplicateEdge {
        /// Lower endpoint of the edge.
        left: usize,
        /// Upper endpoint of the edge.
        right: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Both endpoints of the edge were the same node.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// An endpoint referenced a node that does not exist.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "GRAPH_NODE_OUT_OF_BOUNDS",
        /// The edge was already present.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
    }
}

/// Error type produced when building or running [`crate::GraphAnalysisEngine`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AnalysisError {
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// A graph handed to the engine did not match the declared parameters.
    #[error("graph has {actual} nodes but the parameters declare {expected}")]
    NodeCountMismatch {
        /// Node count declared by the parameters.
        expected: usize,
        /// Node count of the supplied graph.
        actual: usize,
    },
    /// An internal invariant was violated, indicating a logic error.
    #[error("analysis invariant violated: {invariant} ({detail})")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
        /// Human-readable description of the offending state.
        detail: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`AnalysisError`] variants.
    enum AnalysisErrorCode for AnalysisError {
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "RENYI_BACKEND_UNAVAILABLE",
        /// A graph handed to the engine did not match the declared parameters.
        NodeCountMismatch => NodeCountMismatch { .. } => "RENYI_NODE_COUNT_MISMATCH",
        /// An internal invariant was violated.
        InvariantViolation => InvariantViolation { .. } => "RENYI_INVARIANT_VIOLATION",
    }
}

impl AnalysisError {
    pub(crate) fn invariant(invariant: &'static str, detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            invariant,
            detail: detail.into(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, AnalysisError>;
