//! # Primitives
//!
//! Hardcoded constants for the hashdag core.
//!
//! These are compiled into the binary and are immutable at runtime.

/// Width, in hex characters, of hashes produced by the default engine.
///
/// Four characters keep rendered graphs legible. At this width accidental
/// merges become likely past a few hundred nodes; use [`FULL_HASH_WIDTH`]
/// when the output must be collision-free in practice.
pub const DEFAULT_HASH_WIDTH: usize = 4;

/// Width, in hex characters, of an untruncated SHA-256 digest.
pub const FULL_HASH_WIDTH: usize = 64;

/// Magic bytes for the canonical encoding header.
///
/// - Header = Magic Bytes ("HDAG") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"HDAG";

/// Current canonical encoding version.
///
/// Increment this when making breaking changes to the encoding.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum accepted payload size when decoding a canonical encoding (256 MB).
///
/// Checked before deserialization to avoid allocation-based DoS.
pub const MAX_CANONICAL_PAYLOAD_SIZE: usize = 256 * 1024 * 1024;

/// Size in bytes of the random payload the generator attaches to each node.
pub const GENERATED_PAYLOAD_LEN: usize = 32;
