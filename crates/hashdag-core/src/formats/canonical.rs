//! # Canonical Encoding
//!
//! Bit-exact binary encoding of a [`HashGraph`].
//!
//! Format: Header (5 bytes) + postcard-serialized graph.
//! - 4 bytes: Magic ("HDAG")
//! - 1 byte: Version
//!
//! A `HashGraph` produced by a conversion is already sorted, so equal
//! graphs encode to equal bytes. Decoding rejects payloads whose nodes or
//! edges are out of order or repeated, so every accepted encoding is the
//! canonical one.

use crate::{HashDagError, HashGraph, primitives};

/// Length of the encoded header.
const HEADER_LEN: usize = 5;

// =============================================================================
// HEADER
// =============================================================================

/// The header that precedes every canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl CanonicalHeader {
    /// Create a header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate magic bytes and version.
    pub fn validate(&self) -> Result<(), HashDagError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(HashDagError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(HashDagError::DeserializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write the header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read a header from the front of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HashDagError> {
        let Some(head) = bytes.get(..HEADER_LEN) else {
            return Err(HashDagError::DeserializationError(
                "Header too short".to_string(),
            ));
        };
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&head[0..4]);
        Ok(Self {
            magic,
            version: head[4],
        })
    }
}

impl Default for CanonicalHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

/// Encode `graph` as header + postcard payload.
pub fn encode_canonical(graph: &HashGraph) -> Result<Vec<u8>, HashDagError> {
    let payload =
        postcard::to_stdvec(graph).map_err(|e| HashDagError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_LEN + payload.len());
    result.extend_from_slice(&CanonicalHeader::new().to_bytes());
    result.extend_from_slice(&payload);
    Ok(result)
}

/// Decode a canonical encoding.
///
/// Size and header are validated before the payload is deserialized.
pub fn decode_canonical(bytes: &[u8]) -> Result<HashGraph, HashDagError> {
    if bytes.len() > primitives::MAX_CANONICAL_PAYLOAD_SIZE {
        return Err(HashDagError::DeserializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            primitives::MAX_CANONICAL_PAYLOAD_SIZE
        )));
    }

    let header = CanonicalHeader::from_bytes(bytes)?;
    header.validate()?;

    let graph: HashGraph = postcard::from_bytes(&bytes[HEADER_LEN..])
        .map_err(|e| HashDagError::DeserializationError(format!("Graph payload: {}", e)))?;

    if !graph.is_canonical() {
        return Err(HashDagError::DeserializationError(
            "Nodes or edges are not in canonical order".to_string(),
        ));
    }

    Ok(graph)
}

// =============================================================================
// FINGERPRINT
// =============================================================================

/// BLAKE3 digest of the canonical encoding, hex encoded (64 characters).
///
/// Two conversions of the same input with the same engine yield the same
/// fingerprint.
#[cfg(feature = "crypto-hash")]
pub fn canonical_fingerprint(graph: &HashGraph) -> Result<String, HashDagError> {
    let data = encode_canonical(graph)?;
    Ok(blake3::hash(&data).to_hex().to_string())
}

/// Check `graph` against a fingerprint from [`canonical_fingerprint`].
#[cfg(feature = "crypto-hash")]
pub fn verify_fingerprint(graph: &HashGraph, expected: &str) -> Result<bool, HashDagError> {
    Ok(canonical_fingerprint(graph)? == expected)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::with_naive_hasher;
    use crate::{Edge, Graph, Hash, HashEdge, Node, convert};

    fn sample() -> HashGraph {
        let graph = Graph {
            nodes: vec![Node::new("1", "a"), Node::new("2", "b"), Node::new("3", "c")],
            edges: vec![Edge::new("1", "2"), Edge::new("3", "2")],
        };
        convert(&graph, [with_naive_hasher()]).expect("convert")
    }

    #[test]
    fn header_is_magic_plus_version() {
        let bytes = CanonicalHeader::new().to_bytes();
        assert_eq!(&bytes[0..4], b"HDAG");
        assert_eq!(bytes[4], primitives::FORMAT_VERSION);
    }

    #[test]
    fn encoding_is_bit_exact() {
        let first = encode_canonical(&sample()).expect("encode");
        let decoded = decode_canonical(&first).expect("decode");
        let second = encode_canonical(&decoded).expect("encode");
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = encode_canonical(&sample()).expect("encode");
        bytes[0..4].copy_from_slice(b"XXXX");
        assert!(decode_canonical(&bytes).is_err());
    }

    #[test]
    fn short_input_rejected() {
        assert!(matches!(
            decode_canonical(b"HD"),
            Err(HashDagError::DeserializationError(_))
        ));
    }

    #[test]
    fn unsorted_payload_rejected() {
        let mut graph = sample();
        graph.edges.reverse();
        graph.edges.push(HashEdge {
            source: Hash::new("z"),
            target: Hash::new("a"),
        });
        let bytes = encode_canonical(&graph).expect("encode");
        assert!(decode_canonical(&bytes).is_err());
    }

    #[cfg(feature = "crypto-hash")]
    #[test]
    fn fingerprint_is_stable() {
        let fingerprint = canonical_fingerprint(&sample()).expect("fingerprint");
        assert_eq!(fingerprint.len(), 64);
        assert!(verify_fingerprint(&sample(), &fingerprint).expect("verify"));
    }
}
