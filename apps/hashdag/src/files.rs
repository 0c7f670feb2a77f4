//! # File I/O
//!
//! Reading input graphs and writing converted graphs, with size and path
//! validation ahead of every read or write.

use hashdag_core::primitives::MAGIC_BYTES;
use hashdag_core::{Graph, HashDagError, HashGraph, decode_canonical, encode_canonical};
use serde::Serialize;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size for an input graph file (100 MB).
pub const MAX_INPUT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum size for a converted graph file (500 MB).
///
/// Canonical files carry payloads in binary, so they may be larger.
pub const MAX_OUTPUT_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// On-disk format of a converted graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Header plus postcard payload
    Canonical,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate file size before reading.
pub fn validate_file_size(path: &Path, max_size: u64) -> Result<(), HashDagError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| HashDagError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(HashDagError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve `path` to an existing regular file.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, HashDagError> {
    let canonical = path.canonicalize().map_err(|e| {
        HashDagError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(HashDagError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve the parent directory of `path`, which must already exist.
pub fn validate_output_path(path: &Path) -> Result<PathBuf, HashDagError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        HashDagError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(HashDagError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| HashDagError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// READ / WRITE
// =============================================================================

/// Read an input graph from a JSON file.
pub fn read_graph(path: &Path) -> Result<Graph, HashDagError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_INPUT_FILE_SIZE)?;

    let data = std::fs::read(&validated)
        .map_err(|e| HashDagError::IoError(format!("Read file: {}", e)))?;
    serde_json::from_slice(&data)
        .map_err(|e| HashDagError::DeserializationError(format!("Input graph: {}", e)))
}

/// Read a converted graph, detecting the canonical header. Either format
/// must list nodes and edges in canonical order.
pub fn read_hash_graph(path: &Path) -> Result<HashGraph, HashDagError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_OUTPUT_FILE_SIZE)?;

    let data = std::fs::read(&validated)
        .map_err(|e| HashDagError::IoError(format!("Read file: {}", e)))?;

    if data.starts_with(MAGIC_BYTES) {
        return decode_canonical(&data);
    }

    let graph: HashGraph = serde_json::from_slice(&data)
        .map_err(|e| HashDagError::DeserializationError(format!("Converted graph: {}", e)))?;
    if !graph.is_canonical() {
        return Err(HashDagError::DeserializationError(
            "Nodes or edges are not in canonical order".to_string(),
        ));
    }
    Ok(graph)
}

/// Write any serializable value as pretty JSON. Returns the bytes written.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<usize, HashDagError> {
    let data = serde_json::to_vec_pretty(value)
        .map_err(|e| HashDagError::SerializationError(e.to_string()))?;
    write_bytes(path, &data)
}

/// Write a converted graph in `format`. Returns the bytes written.
pub fn write_hash_graph(
    path: &Path,
    graph: &HashGraph,
    format: OutputFormat,
) -> Result<usize, HashDagError> {
    match format {
        OutputFormat::Json => write_json(path, graph),
        OutputFormat::Canonical => write_bytes(path, &encode_canonical(graph)?),
    }
}

fn write_bytes(path: &Path, data: &[u8]) -> Result<usize, HashDagError> {
    let validated = validate_output_path(path)?;
    std::fs::write(&validated, data)
        .map_err(|e| HashDagError::IoError(format!("Write file: {}", e)))?;
    Ok(data.len())
}
