//! # Identifier Errors

use thiserror::Error;

/// Why a content identifier was rejected.
///
/// Every variant is a local failure; nothing is ever submitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CidError {
    /// Not a supported multibase string (or not decodable in its base).
    #[error("Invalid identifier encoding: {0}")]
    InvalidEncoding(String),

    #[error("Unsupported CID version: 0x{0:02x}")]
    UnsupportedVersion(u8),

    #[error("Unsupported codec: 0x{0:02x} (expected dag-pb)")]
    UnsupportedCodec(u8),

    #[error("Unsupported hash function: 0x{0:02x} (expected sha2-256)")]
    UnsupportedHashFunction(u8),

    #[error("Unexpected digest length: 0x{0:02x} (expected 0x20)")]
    UnexpectedDigestLength(u8),

    /// Remainder after the fixed fields is not exactly the digest length.
    #[error("Digest must be {expected} bytes, got {actual}")]
    TruncatedOrOversizedDigest { expected: usize, actual: usize },
}
