//! # Transaction Entities
//!
//! `PendingTransaction` is consumed by `sign` into a `SignedTransaction`;
//! nothing about a signed transaction can be changed afterwards.

use shared_types::{Address, Hash, U256};

/// Where a transaction goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionTarget {
    /// Contract creation; the payload is init code.
    Deploy,
    /// Message call to an existing contract.
    Call { contract: Address },
}

impl TransactionTarget {
    pub fn to_address(&self) -> Option<Address> {
        match self {
            TransactionTarget::Deploy => None,
            TransactionTarget::Call { contract } => Some(*contract),
        }
    }
}

/// Calldata or init code plus attached value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPayload {
    pub data: Vec<u8>,
    pub value: U256,
}

impl TransactionPayload {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            value: U256::zero(),
        }
    }
}

/// A fully parameterised, unsigned legacy transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    pub sender: Address,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: U256,
    pub to: Option<Address>,
    pub value: U256,
    pub payload: Vec<u8>,
    pub chain_id: u64,
}

/// A signed legacy transaction with its wire encoding and hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub(crate) transaction: PendingTransaction,
    pub(crate) v: u64,
    pub(crate) r: [u8; 32],
    pub(crate) s: [u8; 32],
    pub(crate) raw: Vec<u8>,
    pub(crate) hash: Hash,
}

impl SignedTransaction {
    pub fn transaction(&self) -> &PendingTransaction {
        &self.transaction
    }

    pub fn sender(&self) -> Address {
        self.transaction.sender
    }

    pub fn nonce(&self) -> u64 {
        self.transaction.nonce
    }

    pub fn v(&self) -> u64 {
        self.v
    }

    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// RLP bytes for `eth_sendRawTransaction`.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// `keccak256(raw)`
    pub fn hash(&self) -> Hash {
        self.hash
    }
}
