//! Renyi core library.
//!
//! Samples Erdős–Rényi `G(n, p)` graphs, partitions them into connected
//! components, and measures each component's radius and diameter.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod decompose;
mod engine;
mod error;
mod generator;
mod graph;
mod metrics;
mod params;
mod result;

pub use crate::{
    decompose::{Component, ComponentDecomposer},
    engine::{EngineBuilder, ExecutionStrategy, GraphAnalysisEngine},
    error::{
        AnalysisError, AnalysisErrorCode, GraphError, GraphErrorCode, ParameterError,
        ParameterErrorCode, Result,
    },
    generator::RandomGraphGenerator,
    graph::{Graph, NodeId},
    metrics::{ComponentMetrics, ComponentMetricsReport},
    params::{
        DEFAULT_NODES, DEFAULT_PROBABILITY, GraphParams, MAX_NODES, validate_probability,
        validate_signed_nodes,
    },
    result::{ComponentAnalysis, GraphAnalysisResult},
};
