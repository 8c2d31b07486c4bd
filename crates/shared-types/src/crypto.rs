//! # Hashing and Address Derivation
//!
//! Ethereum-style helpers shared by account loading and transaction signing.

use k256::ecdsa::{SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};

use crate::entities::{Address, Hash};

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive the Ethereum address of a verifying key.
///
/// Last 20 bytes of `keccak256(pubkey)` over the uncompressed point without
/// its `0x04` prefix.
pub fn address_from_verifying_key(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Derive the Ethereum address controlled by a signing key.
pub fn address_from_signing_key(signing_key: &SigningKey) -> Address {
    address_from_verifying_key(signing_key.verifying_key())
}
