//! # hashdag CLI Module
//!
//! This module implements the CLI interface for hashdag.
//!
//! ## Available Commands
//!
//! - `demo` - Convert and render the built-in three-node graph
//! - `generate` - Write a random input graph as JSON
//! - `convert` - Convert an input graph file
//! - `random` - Generate, convert and render in one step
//! - `verify` - Check a converted graph file against a fingerprint

mod commands;

use crate::files::OutputFormat;
use crate::settings::{ConversionSettings, EngineKind, GeneratorSettings, Settings};
use clap::{Args, Parser, Subcommand};
use hashdag_core::{HashDagError, IntegrityPolicy};
use std::path::PathBuf;

pub use commands::*;

/// Default path for rendered DOT output.
pub const DEFAULT_RENDER_PATH: &str = "/tmp/hash-dag.dot";

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// hashdag - content-addressed DAG conversion
///
/// Re-identifies every node of a DAG by a hash of its payload and the
/// hashes of all its parents.
#[derive(Parser, Debug)]
#[command(name = "hashdag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to the TOML settings file
    #[arg(short, long, global = true, default_value = "hashdag.toml")]
    pub config: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert and render the built-in three-node graph
    Demo {
        /// Path for the rendered DOT file
        #[arg(short, long, default_value = DEFAULT_RENDER_PATH)]
        output_path: PathBuf,

        #[command(flatten)]
        conversion: ConversionFlags,
    },

    /// Write a random input graph as JSON
    Generate {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        generator: GeneratorFlags,
    },

    /// Convert an input graph file
    Convert {
        /// Input graph (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the converted graph
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Format of the converted graph
        #[arg(short = 't', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Also render the converted graph as DOT to this path
        #[arg(short, long)]
        render: Option<PathBuf>,

        #[command(flatten)]
        conversion: ConversionFlags,
    },

    /// Generate, convert and render a random graph
    Random {
        /// Path for the rendered DOT file
        #[arg(short, long, default_value = DEFAULT_RENDER_PATH)]
        output_path: PathBuf,

        #[command(flatten)]
        generator: GeneratorFlags,

        #[command(flatten)]
        conversion: ConversionFlags,
    },

    /// Check a converted graph file (JSON or canonical)
    Verify {
        /// Converted graph file
        #[arg(short, long)]
        input: PathBuf,

        /// Expected BLAKE3 fingerprint
        #[arg(short, long)]
        fingerprint: Option<String>,
    },
}

/// Flags overriding `[conversion]` settings.
#[derive(Args, Debug, Clone, Default)]
pub struct ConversionFlags {
    /// Hash engine
    #[arg(short, long, value_enum)]
    pub engine: Option<EngineKind>,

    /// Hash width in hex characters (sha256 engine)
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Omit nodes behind cycles or undeclared parents instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Hash each frontier across the worker pool
    #[arg(long)]
    pub parallel: bool,
}

impl ConversionFlags {
    /// Apply these flags over `settings`.
    pub fn apply(&self, mut settings: ConversionSettings) -> ConversionSettings {
        if let Some(engine) = self.engine {
            settings.engine = engine;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if self.lenient {
            settings.policy = IntegrityPolicy::Lenient;
        }
        if self.parallel {
            settings.parallel = true;
        }
        settings
    }
}

/// Flags overriding `[generator]` settings.
#[derive(Args, Debug, Clone, Default)]
pub struct GeneratorFlags {
    /// Number of nodes in the DAG
    #[arg(short, long)]
    pub node_qty: Option<usize>,

    /// Max number of edges directed out of a node
    #[arg(short, long)]
    pub max_outdegree: Option<usize>,

    /// Probability of adding an extra edge between two nodes
    #[arg(short = 'f', long)]
    pub edge_factor: Option<f64>,

    /// Seed for the random source
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl GeneratorFlags {
    /// Apply these flags over `settings`.
    pub fn apply(&self, mut settings: GeneratorSettings) -> GeneratorSettings {
        if let Some(node_qty) = self.node_qty {
            settings.node_qty = node_qty;
        }
        if let Some(max_outdegree) = self.max_outdegree {
            settings.max_outdegree = max_outdegree;
        }
        if let Some(edge_factor) = self.edge_factor {
            settings.edge_factor = edge_factor;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        settings
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), HashDagError> {
    let settings = Settings::load(&cli.config)?;
    tracing::debug!(config = %cli.config.display(), ?settings, "Settings loaded");
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Demo {
            output_path,
            conversion,
        }) => cmd_demo(
            &conversion.apply(settings.conversion),
            json_mode,
            &output_path,
        ),
        Some(Commands::Generate { output, generator }) => {
            cmd_generate(&generator.apply(settings.generator), json_mode, &output)
        }
        Some(Commands::Convert {
            input,
            output,
            format,
            render,
            conversion,
        }) => cmd_convert(
            &conversion.apply(settings.conversion),
            json_mode,
            &input,
            output.as_deref(),
            format,
            render.as_deref(),
        ),
        Some(Commands::Random {
            output_path,
            generator,
            conversion,
        }) => cmd_random(
            &conversion.apply(settings.conversion),
            &generator.apply(settings.generator),
            json_mode,
            &output_path,
        ),
        Some(Commands::Verify { input, fingerprint }) => {
            cmd_verify(json_mode, &input, fingerprint.as_deref())
        }
        None => {
            // No subcommand - run the demo
            cmd_demo(
                &settings.conversion,
                json_mode,
                std::path::Path::new(DEFAULT_RENDER_PATH),
            )
        }
    }
}
