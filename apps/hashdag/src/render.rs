//! # DOT Rendering
//!
//! Writes a converted graph as Graphviz DOT. Node and edge statements
//! follow the graph's own sorted order, so equal graphs render to equal
//! text. Turn it into an image with `dot -Tpng graph.dot -o graph.png`.

use hashdag_core::{Hash, HashDagError, HashGraph};
use std::path::{Path, PathBuf};

/// Render `graph` as a DOT `digraph`.
pub fn to_dot(graph: &HashGraph) -> String {
    let mut out = String::from("digraph hashdag {\n");
    out.push_str("  node [shape=box, fontname=\"monospace\"];\n");

    for node in &graph.nodes {
        out.push_str(&format!("  {};\n", quoted(&node.id)));
    }
    for edge in &graph.edges {
        out.push_str(&format!(
            "  {} -> {};\n",
            quoted(&edge.source),
            quoted(&edge.target)
        ));
    }

    out.push_str("}\n");
    out
}

/// Render `graph` into the file at `path`.
pub fn render_to(graph: &HashGraph, path: &Path) -> Result<PathBuf, HashDagError> {
    let validated = crate::files::validate_output_path(path)?;
    std::fs::write(&validated, to_dot(graph))
        .map_err(|e| HashDagError::IoError(format!("Write DOT file: {}", e)))?;
    Ok(validated)
}

/// DOT string literal. Naive-engine ids may contain quotes.
fn quoted(id: &Hash) -> String {
    let mut out = String::with_capacity(id.as_str().len() + 2);
    out.push('"');
    for c in id.as_str().chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
