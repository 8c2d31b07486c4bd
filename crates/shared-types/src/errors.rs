//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors raised while loading an account from the config store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    /// Private key is not 32 bytes of hex or not a valid secp256k1 scalar.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// The address stored next to a key does not belong to that key.
    #[error("Address mismatch: configured {configured}, key controls {derived}")]
    AddressMismatch { configured: String, derived: String },

    /// Role name not in the closed role set.
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Errors decoding hex-encoded addresses and hashes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
