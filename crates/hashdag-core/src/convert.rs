//! # Conversion
//!
//! The public entry point: turn an input [`Graph`] into a content-addressed
//! [`HashGraph`].
//!
//! ```text
//! Configuration -> walk(input) -> LevelScheduler (MemoTable) -> GraphAssembler
//! ```
//!
//! Conversion is a pure function of the input graph and the configuration.
//! All intermediate state is created per call and dropped on return.
//!
//! ## Integrity
//!
//! Under [`IntegrityPolicy::Strict`] a dangling edge is rejected before any
//! hashing, and nodes left unhashed after the scheduler drains (which, with
//! no dangling edges, means they sit on or below a cycle) are reported as
//! [`HashDagError::CycleDetected`]. Under [`IntegrityPolicy::Lenient`] both
//! are tolerated: the affected nodes are omitted and listed in the
//! [`ConversionReport`].

use crate::assembler::GraphAssembler;
use crate::config::{Configuration, ConversionOption, IntegrityPolicy};
use crate::indexer::walk;
use crate::scheduler::LevelScheduler;
use crate::{Edge, Graph, HashDagError, HashGraph, NodeId};

/// Diagnostics collected during a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Number of topological waves processed.
    pub waves: usize,
    /// Number of input nodes hashed.
    pub hashed: usize,
    /// Number of hashed nodes whose content address was already taken.
    pub merged: usize,
    /// Declared nodes left out of the output (lenient policy only).
    pub dropped: Vec<NodeId>,
    /// Edges with an undeclared endpoint (lenient policy only).
    pub dangling: Vec<Edge>,
}

/// A converted graph plus its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub graph: HashGraph,
    pub report: ConversionReport,
}

/// Convert `graph`, applying `options` in order over the default
/// configuration.
pub fn convert<I>(graph: &Graph, options: I) -> Result<HashGraph, HashDagError>
where
    I: IntoIterator<Item = ConversionOption>,
{
    convert_with_report(graph, options).map(|conversion| conversion.graph)
}

/// Like [`convert`], also returning a [`ConversionReport`].
pub fn convert_with_report<I>(graph: &Graph, options: I) -> Result<Conversion, HashDagError>
where
    I: IntoIterator<Item = ConversionOption>,
{
    convert_with_config(graph, &Configuration::from_options(options))
}

/// Convert `graph` with an already built configuration.
pub fn convert_with_config(
    graph: &Graph,
    config: &Configuration,
) -> Result<Conversion, HashDagError> {
    let index = walk(graph);

    let dangling: Vec<Edge> = index.dangling().iter().map(|e| (*e).clone()).collect();
    if config.policy == IntegrityPolicy::Strict
        && let Some(edge) = dangling.first()
    {
        return Err(HashDagError::DanglingEdge {
            from: edge.source.clone(),
            to: edge.target.clone(),
        });
    }

    let mut assembler = GraphAssembler::new();
    let outcome = LevelScheduler::new(index, config).run(&mut assembler)?;

    if config.policy == IntegrityPolicy::Strict && !outcome.unresolved.is_empty() {
        return Err(HashDagError::CycleDetected {
            unresolved: outcome.unresolved,
        });
    }

    let report = ConversionReport {
        waves: outcome.waves,
        hashed: outcome.hashed,
        merged: assembler.merged(),
        dropped: outcome.unresolved,
        dangling,
    };

    Ok(Conversion {
        graph: assembler.finish(),
        report,
    })
}
