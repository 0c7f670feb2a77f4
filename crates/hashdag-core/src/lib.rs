//! # hashdag-core
//!
//! Content-addressed DAG conversion - THE LOGIC.
//!
//! Takes an arbitrary directed acyclic graph of opaque-payload nodes and
//! produces a canonical, content-addressed DAG: every output node id is a
//! deterministic function of the node's payload and the ids of all its
//! parents (a multi-parent Merkle DAG).
//!
//! ## Pipeline
//!
//! ```text
//! Configuration ─► indexer::walk ─► LevelScheduler ─► GraphAssembler ─► HashGraph
//!                                        │
//!                                    MemoTable
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure: no I/O, no logging, no global state
//! - Deterministic: `BTreeMap`/`BTreeSet` only, output sorted at the boundary
//! - Randomness only through an injected `rand::Rng` (`generator`)

// =============================================================================
// MODULES
// =============================================================================

pub mod assembler;
pub mod config;
pub mod convert;
pub mod engine;
pub mod formats;
pub mod generator;
pub mod indexer;
pub mod memo;
pub mod primitives;
pub mod scheduler;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Edge, Graph, Hash, HashDagError, HashEdge, HashGraph, HashNode, Node, NodeData, NodeId,
};

// =============================================================================
// RE-EXPORTS: Conversion
// =============================================================================

pub use assembler::GraphAssembler;
pub use config::{
    Configuration, ConversionOption, IntegrityPolicy, with_engine, with_hasher, with_naive_hasher,
    with_parallel, with_policy,
};
pub use convert::{Conversion, ConversionReport, convert, convert_with_config, convert_with_report};
pub use engine::{
    Combiner, FnEngine, HashEngine, Hasher, NaiveEngine, Sha256Engine, naive_combiner,
    naive_hasher,
};
pub use indexer::{GraphIndex, walk};
pub use memo::MemoTable;
pub use scheduler::{LevelScheduler, SchedulerOutcome};

// =============================================================================
// RE-EXPORTS: Formats & Generator
// =============================================================================

pub use formats::{CanonicalHeader, decode_canonical, encode_canonical};
#[cfg(feature = "crypto-hash")]
pub use formats::{canonical_fingerprint, verify_fingerprint};
pub use generator::{GeneratorConfig, random_graph};
