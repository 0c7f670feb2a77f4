//! # hashdag
//!
//! The command-line binary for content-addressed DAG conversion.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                apps/hashdag (THE BINARY)              │
//! │                                                       │
//! │  ┌───────────┐   ┌────────────┐   ┌──────────────┐    │
//! │  │    CLI    │   │  Settings  │   │ Files / DOT  │    │
//! │  │  (clap)   │   │   (toml)   │   │ (serde_json) │    │
//! │  └─────┬─────┘   └─────┬──────┘   └──────┬───────┘    │
//! │        └───────────────┼─────────────────┘            │
//! │                        ▼                              │
//! │                ┌──────────────┐                       │
//! │                │ hashdag-core │                       │
//! │                │ (THE LOGIC)  │                       │
//! │                └──────────────┘                       │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! hashdag demo
//! hashdag generate -n 12 -s 7 -o input.json
//! hashdag convert -i input.json -o output.hdag -t canonical -r graph.dot
//! hashdag random --node-qty 20 --edge-factor 0.3
//! ```

use clap::Parser;
use hashdag::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing. HASHDAG_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("HASHDAG_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "hashdag=debug"
    } else {
        "hashdag=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the hashdag startup banner.
fn print_banner() {
    println!(
        r#"
  hashdag v{}

  payload + parents -> content address
"#,
        env!("CARGO_PKG_VERSION")
    );
}
