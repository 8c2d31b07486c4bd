//! Participant registrations and their call arguments.

use md_01_content_identifier::ContentIdentifier;
use shared_types::U256;

use super::abi::AbiValue;
use super::kinds::{ComputingType, FeeType, PublicKeyType};

/// `registerTower(size_limit, public_connection, fee, fee_type)` on the Tower contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerRegistration {
    pub size_limit: u64,
    /// Endpoint hosts and users reach the tower on.
    pub public_connection: String,
    pub fee: U256,
    pub fee_type: FeeType,
}

impl TowerRegistration {
    pub const METHOD: &'static str = "registerTower";

    pub fn arguments(&self) -> Vec<AbiValue> {
        vec![
            AbiValue::from(self.size_limit),
            AbiValue::String(self.public_connection.clone()),
            AbiValue::from(self.fee),
            AbiValue::from(self.fee_type as u64),
        ]
    }
}

/// `registerHost(public_key, public_key_type, block_timeout_limit)` on the Host contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRegistration {
    pub public_key: Vec<u8>,
    pub public_key_type: PublicKeyType,
    pub block_timeout_limit: u64,
}

impl HostRegistration {
    pub const METHOD: &'static str = "registerHost";

    pub fn arguments(&self) -> Vec<AbiValue> {
        vec![
            AbiValue::Bytes(self.public_key.clone()),
            AbiValue::from(self.public_key_type as u64),
            AbiValue::from(self.block_timeout_limit),
        ]
    }
}

/// `addTask(digest, fee, computing_type, size)` on the Task contract.
///
/// Holds a parsed `ContentIdentifier`, so only a validated digest can be
/// registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRegistration {
    pub identifier: ContentIdentifier,
    pub fee: U256,
    pub computing_type: ComputingType,
    pub size: u64,
}

impl TaskRegistration {
    pub const METHOD: &'static str = "addTask";

    pub fn arguments(&self) -> Vec<AbiValue> {
        vec![
            AbiValue::Bytes(self.identifier.digest().to_vec()),
            AbiValue::from(self.fee),
            AbiValue::from(self.computing_type as u64),
            AbiValue::from(self.size),
        ]
    }
}
