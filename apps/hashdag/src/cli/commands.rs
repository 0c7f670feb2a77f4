//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::files::{self, OutputFormat};
use crate::render;
use crate::settings::{ConversionSettings, GeneratorSettings};
use hashdag_core::{
    Conversion, Edge, Graph, HashDagError, Node, canonical_fingerprint, convert_with_report,
    random_graph, verify_fingerprint,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// The fixed graph converted by `demo`.
pub fn demo_graph() -> Graph {
    Graph {
        nodes: vec![
            Node::new("1", "abc"),
            Node::new("2", "def"),
            Node::new("3", "ghi"),
        ],
        edges: vec![
            Edge::new("1", "2"),
            Edge::new("1", "3"),
            Edge::new("3", "2"),
        ],
    }
}

/// Convert `graph` under `settings` and log the report.
pub fn run_conversion(
    graph: &Graph,
    settings: &ConversionSettings,
) -> Result<Conversion, HashDagError> {
    let conversion = convert_with_report(graph, settings.options())?;
    let report = &conversion.report;

    tracing::info!(
        input_nodes = graph.nodes.len(),
        input_edges = graph.edges.len(),
        nodes = conversion.graph.nodes.len(),
        edges = conversion.graph.edges.len(),
        waves = report.waves,
        "Conversion complete"
    );
    if report.merged > 0 {
        tracing::warn!(merged = report.merged, "Nodes merged into existing content addresses");
    }
    for id in &report.dropped {
        tracing::warn!(node = %id, "Node dropped: unresolved parents");
    }
    for edge in &report.dangling {
        tracing::warn!(from = %edge.source, to = %edge.target, "Edge ignored: undeclared endpoint");
    }

    Ok(conversion)
}

/// Take the configured seed, or draw a fresh one and log it for replay.
fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random();
            tracing::info!(seed, "Using fresh generator seed");
            seed
        }
    }
}

/// Generate a graph from `settings` with a seeded random source.
pub fn generate_graph(settings: &GeneratorSettings) -> Result<(Graph, u64), HashDagError> {
    let seed = resolve_seed(settings.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let graph = random_graph(&settings.shape(), &mut rng)?;
    tracing::debug!(
        seed,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Graph generated"
    );
    Ok((graph, seed))
}

fn print_conversion(conversion: &Conversion, json_mode: bool) -> Result<(), HashDagError> {
    let graph = &conversion.graph;
    let report = &conversion.report;
    let fingerprint = canonical_fingerprint(graph)?;

    if json_mode {
        let dangling: Vec<String> = report
            .dangling
            .iter()
            .map(|e| format!("{}->{}", e.source, e.target))
            .collect();
        let output = serde_json::json!({
            "node_count": graph.nodes.len(),
            "edge_count": graph.edges.len(),
            "waves": report.waves,
            "hashed": report.hashed,
            "merged": report.merged,
            "dropped": report.dropped,
            "dangling": dangling,
            "fingerprint": fingerprint
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Conversion");
    println!("==========");
    println!("Nodes:       {}", graph.nodes.len());
    println!("Edges:       {}", graph.edges.len());
    println!("Waves:       {}", report.waves);
    println!("Merged:      {}", report.merged);
    if !report.dropped.is_empty() {
        println!("Dropped:     {}", report.dropped.len());
    }
    if !report.dangling.is_empty() {
        println!("Dangling:    {}", report.dangling.len());
    }
    println!("Fingerprint: {}", fingerprint);

    Ok(())
}

// =============================================================================
// DEMO COMMAND
// =============================================================================

/// Convert and render the built-in graph.
pub fn cmd_demo(
    settings: &ConversionSettings,
    json_mode: bool,
    output_path: &Path,
) -> Result<(), HashDagError> {
    let conversion = run_conversion(&demo_graph(), settings)?;
    let rendered = render::render_to(&conversion.graph, output_path)?;
    tracing::info!(path = %rendered.display(), "Rendered DOT");

    print_conversion(&conversion, json_mode)?;
    if !json_mode {
        println!("Rendered to {:?}", rendered);
    }

    Ok(())
}

// =============================================================================
// GENERATE COMMAND
// =============================================================================

/// Write a random input graph as JSON.
pub fn cmd_generate(
    settings: &GeneratorSettings,
    json_mode: bool,
    output: &Path,
) -> Result<(), HashDagError> {
    let (graph, seed) = generate_graph(settings)?;
    let bytes = files::write_json(output, &graph)?;

    if json_mode {
        let output = serde_json::json!({
            "path": output.to_string_lossy(),
            "seed": seed,
            "node_count": graph.nodes.len(),
            "edge_count": graph.edges.len(),
            "bytes": bytes
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "Generated {} nodes, {} edges (seed {})",
        graph.nodes.len(),
        graph.edges.len(),
        seed
    );
    println!("Wrote {} bytes to {:?}", bytes, output);

    Ok(())
}

// =============================================================================
// CONVERT COMMAND
// =============================================================================

/// Convert an input graph file.
pub fn cmd_convert(
    settings: &ConversionSettings,
    json_mode: bool,
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    render_path: Option<&Path>,
) -> Result<(), HashDagError> {
    let graph = files::read_graph(input)?;
    let conversion = run_conversion(&graph, settings)?;

    if let Some(path) = output {
        let bytes = files::write_hash_graph(path, &conversion.graph, format)?;
        tracing::info!(path = %path.display(), bytes, ?format, "Wrote converted graph");
    }
    if let Some(path) = render_path {
        let rendered = render::render_to(&conversion.graph, path)?;
        tracing::info!(path = %rendered.display(), "Rendered DOT");
    }

    print_conversion(&conversion, json_mode)
}

// =============================================================================
// RANDOM COMMAND
// =============================================================================

/// Generate, convert and render in one step.
pub fn cmd_random(
    conversion_settings: &ConversionSettings,
    generator_settings: &GeneratorSettings,
    json_mode: bool,
    output_path: &Path,
) -> Result<(), HashDagError> {
    let (graph, seed) = generate_graph(generator_settings)?;
    let conversion = run_conversion(&graph, conversion_settings)?;
    let rendered = render::render_to(&conversion.graph, output_path)?;
    tracing::info!(path = %rendered.display(), seed, "Rendered DOT");

    print_conversion(&conversion, json_mode)?;
    if !json_mode {
        println!("Seed:        {}", seed);
        println!("Rendered to {:?}", rendered);
    }

    Ok(())
}

// =============================================================================
// VERIFY COMMAND
// =============================================================================

/// Print a converted graph's fingerprint, checking it if one is given.
pub fn cmd_verify(
    json_mode: bool,
    input: &Path,
    expected: Option<&str>,
) -> Result<(), HashDagError> {
    let graph = files::read_hash_graph(input)?;
    let fingerprint = canonical_fingerprint(&graph)?;
    let verified = match expected {
        Some(expected) => Some(verify_fingerprint(&graph, expected)?),
        None => None,
    };

    if json_mode {
        let output = serde_json::json!({
            "node_count": graph.nodes.len(),
            "edge_count": graph.edges.len(),
            "fingerprint": fingerprint,
            "verified": verified
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    } else {
        println!("Nodes:       {}", graph.nodes.len());
        println!("Edges:       {}", graph.edges.len());
        println!("Fingerprint: {}", fingerprint);
    }

    if let (Some(false), Some(expected)) = (verified, expected) {
        return Err(HashDagError::FingerprintMismatch {
            expected: expected.to_string(),
            actual: fingerprint,
        });
    }

    Ok(())
}
