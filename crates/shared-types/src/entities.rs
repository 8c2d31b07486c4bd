//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `SecretKey`, `Account`, `Role`
//! - **Ledger results**: `TransactionReceipt`

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::SigningKey;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::address_from_signing_key;
use crate::errors::{AccountError, EncodingError};

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 32-byte Keccak256 hash (transaction hashes, selectors before truncation).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Render an address as `0x`-prefixed lowercase hex.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Render a hash as `0x`-prefixed lowercase hex.
pub fn format_hash(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parse a `0x`-prefixed (or bare) 40 hex character address.
pub fn parse_address(value: &str) -> Result<Address, EncodingError> {
    let bytes = decode_hex(value)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| EncodingError::InvalidLength {
            expected: 20,
            actual: bytes.len(),
        })
}

/// Parse a `0x`-prefixed (or bare) 64 hex character hash.
pub fn parse_hash(value: &str) -> Result<Hash, EncodingError> {
    let bytes = decode_hex(value)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| EncodingError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })
}

/// Decode hex with an optional `0x` / `0X` prefix.
pub fn decode_hex(value: &str) -> Result<Vec<u8>, EncodingError> {
    let stripped = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    hex::decode(stripped).map_err(|e| EncodingError::InvalidHex(e.to_string()))
}

/// A 32-byte secp256k1 private key.
///
/// Never printed, never serialized; the inner `SigningKey` zeroizes on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(SigningKey);

impl SecretKey {
    /// Parse a `0x`-prefixed (or bare) 64 hex character key.
    pub fn from_hex(value: &str) -> Result<Self, AccountError> {
        let mut bytes = decode_hex(value).map_err(|_| AccountError::InvalidPrivateKey)?;
        let key = Self::from_slice(&bytes);
        bytes.zeroize();
        key
    }

    /// Build from raw bytes; zero and out-of-range scalars are rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AccountError> {
        if bytes.len() != 32 {
            return Err(AccountError::InvalidPrivateKey);
        }
        SigningKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| AccountError::InvalidPrivateKey)
    }

    /// The secp256k1 signing key for this secret.
    pub fn signing_key(&self) -> &SigningKey {
        &self.0
    }

    /// Hex form for writing a freshly generated accounts file.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0.to_bytes()))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// A keypair-identified balance holder capable of signing transactions.
///
/// Immutable once loaded for a run.
#[derive(Debug, Clone)]
pub struct Account {
    address: Address,
    secret: SecretKey,
    initial_balance: U256,
}

impl Account {
    /// Create an account from its secret, deriving the address.
    pub fn new(secret: SecretKey) -> Self {
        let address = address_from_signing_key(secret.signing_key());
        Self {
            address,
            secret,
            initial_balance: U256::zero(),
        }
    }

    /// Parse a hex private key and derive the account.
    pub fn from_private_key(value: &str) -> Result<Self, AccountError> {
        Ok(Self::new(SecretKey::from_hex(value)?))
    }

    /// Attach the balance the account is funded with at network genesis.
    pub fn with_initial_balance(mut self, balance: U256) -> Self {
        self.initial_balance = balance;
        self
    }

    /// Check that a configured address matches the derived one.
    pub fn verify_address(&self, expected: &Address) -> Result<(), AccountError> {
        if &self.address != expected {
            return Err(AccountError::AddressMismatch {
                configured: format_address(expected),
                derived: format_address(&self.address),
            });
        }
        Ok(())
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn initial_balance(&self) -> U256 {
        self.initial_balance
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }
}

/// Participant roles in the accounts config store.
///
/// The legacy `meca_*` names written by older setup tooling are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[serde(alias = "meca_dao")]
    Dao,
    #[serde(alias = "meca_tower")]
    TowerOperator,
    #[serde(alias = "meca_host")]
    HostOperator,
    #[serde(alias = "meca_task")]
    TaskDeveloper,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Dao,
        Role::TowerOperator,
        Role::HostOperator,
        Role::TaskDeveloper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Dao => "dao",
            Role::TowerOperator => "tower_operator",
            Role::HostOperator => "host_operator",
            Role::TaskDeveloper => "task_developer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dao" | "meca_dao" => Ok(Role::Dao),
            "tower_operator" | "meca_tower" => Ok(Role::TowerOperator),
            "host_operator" | "meca_host" => Ok(Role::HostOperator),
            "task_developer" | "meca_task" => Ok(Role::TaskDeveloper),
            other => Err(AccountError::UnknownRole(other.to_string())),
        }
    }
}

// =============================================================================
// CLUSTER B: LEDGER RESULTS
// =============================================================================

/// The ledger's confirmation record for a submitted transaction.
///
/// `success == false` means the transaction was mined but execution reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: Hash,
    pub success: bool,
    /// Present only for contract-creation transactions.
    pub contract_address: Option<Address>,
    pub gas_used: u64,
    pub block_number: u64,
}
