//! # Conversion Configuration
//!
//! A [`Configuration`] is built by applying zero or more
//! [`ConversionOption`]s, in order, over the default. Every option is total:
//! applying one can never fail, and a later option overrides an earlier one.

use crate::engine::{Combiner, FnEngine, HashEngine, Hasher, NaiveEngine, Sha256Engine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// INTEGRITY POLICY
// =============================================================================

/// What to do with input that violates the DAG precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityPolicy {
    /// Reject dangling edges and cycles with an error.
    #[default]
    Strict,
    /// Omit unreachable nodes from the output and report them.
    Lenient,
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Settings for a single conversion.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Hasher/combiner pair.
    pub engine: Arc<dyn HashEngine>,
    /// Handling of cyclic and dangling input.
    pub policy: IntegrityPolicy,
    /// Hash each frontier on the rayon pool.
    pub parallel: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            engine: Arc::new(Sha256Engine::default()),
            policy: IntegrityPolicy::Strict,
            parallel: false,
        }
    }
}

impl Configuration {
    /// Apply `options` in order over the default configuration.
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ConversionOption>,
    {
        let mut cfg = Self::default();
        for option in options {
            option.apply(&mut cfg);
        }
        cfg
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// A single configuration mutator.
#[derive(Debug, Clone)]
pub enum ConversionOption {
    /// Swap the hasher/combiner pair.
    Engine(Arc<dyn HashEngine>),
    /// Set the integrity policy.
    Policy(IntegrityPolicy),
    /// Enable or disable parallel frontier hashing.
    Parallel(bool),
}

impl ConversionOption {
    /// Mutate `cfg` in place.
    pub fn apply(self, cfg: &mut Configuration) {
        match self {
            Self::Engine(engine) => cfg.engine = engine,
            Self::Policy(policy) => cfg.policy = policy,
            Self::Parallel(parallel) => cfg.parallel = parallel,
        }
    }
}

/// Use a plain `(hasher, combiner)` function pair.
pub fn with_hasher(hasher: Hasher, combiner: Combiner) -> ConversionOption {
    ConversionOption::Engine(Arc::new(FnEngine::new(hasher, combiner)))
}

/// Use any [`HashEngine`].
pub fn with_engine(engine: impl HashEngine + 'static) -> ConversionOption {
    ConversionOption::Engine(Arc::new(engine))
}

/// Use the human-readable [`NaiveEngine`].
pub fn with_naive_hasher() -> ConversionOption {
    with_engine(NaiveEngine)
}

/// Set the integrity policy.
pub fn with_policy(policy: IntegrityPolicy) -> ConversionOption {
    ConversionOption::Policy(policy)
}

/// Enable or disable parallel frontier hashing.
pub fn with_parallel(parallel: bool) -> ConversionOption {
    ConversionOption::Parallel(parallel)
}
