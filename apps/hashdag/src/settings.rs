//! # Settings File
//!
//! Optional TOML file supplying defaults for the CLI. Command-line flags
//! override anything set here; a missing file means built-in defaults.
//!
//! ```toml
//! [conversion]
//! engine = "sha256"     # or "naive"
//! width = 4             # hex characters, sha256 only
//! policy = "strict"     # or "lenient"
//! parallel = false
//!
//! [generator]
//! node_qty = 10
//! max_outdegree = 3
//! edge_factor = 0.5
//! seed = 42             # omit for a fresh seed per run
//! ```

use hashdag_core::primitives::DEFAULT_HASH_WIDTH;
use hashdag_core::{
    ConversionOption, GeneratorConfig, HashDagError, IntegrityPolicy, Sha256Engine,
    with_engine, with_naive_hasher, with_parallel, with_policy,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum settings file size (1 MB).
const MAX_SETTINGS_FILE_SIZE: u64 = 1024 * 1024;

/// Which hash engine to convert with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Truncated SHA-256
    #[default]
    Sha256,
    /// Human-readable payload/parent strings
    Naive,
}

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub conversion: ConversionSettings,
    pub generator: GeneratorSettings,
}

/// `[conversion]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionSettings {
    pub engine: EngineKind,
    pub width: usize,
    pub policy: IntegrityPolicy,
    pub parallel: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            engine: EngineKind::Sha256,
            width: DEFAULT_HASH_WIDTH,
            policy: IntegrityPolicy::Strict,
            parallel: false,
        }
    }
}

impl ConversionSettings {
    /// Conversion options in application order.
    pub fn options(&self) -> Vec<ConversionOption> {
        let engine = match self.engine {
            EngineKind::Sha256 => with_engine(Sha256Engine::new(self.width)),
            EngineKind::Naive => with_naive_hasher(),
        };
        vec![engine, with_policy(self.policy), with_parallel(self.parallel)]
    }
}

/// `[generator]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSettings {
    pub node_qty: usize,
    pub max_outdegree: usize,
    pub edge_factor: f64,
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        let shape = GeneratorConfig::default();
        Self {
            node_qty: shape.node_qty,
            max_outdegree: shape.max_outdegree,
            edge_factor: shape.edge_factor,
            seed: None,
        }
    }
}

impl GeneratorSettings {
    /// Graph shape for the generator.
    pub fn shape(&self) -> GeneratorConfig {
        GeneratorConfig {
            node_qty: self.node_qty,
            max_outdegree: self.max_outdegree,
            edge_factor: self.edge_factor,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, HashDagError> {
        toml::from_str(text)
            .map_err(|e| HashDagError::DeserializationError(format!("Settings: {}", e)))
    }

    /// Load settings from `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, HashDagError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        crate::files::validate_file_size(path, MAX_SETTINGS_FILE_SIZE)?;
        let text = std::fs::read_to_string(path)
            .map_err(|e| HashDagError::IoError(format!("Read settings: {}", e)))?;
        Self::from_toml(&text)
    }
}
