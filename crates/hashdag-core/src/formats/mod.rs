//! # Formats
//!
//! Byte-level encodings of converted graphs. File I/O lives in the binary.

pub mod canonical;

pub use canonical::{CanonicalHeader, decode_canonical, encode_canonical};

#[cfg(feature = "crypto-hash")]
pub use canonical::{canonical_fingerprint, verify_fingerprint};
