//! # Closed Tag Sets
//!
//! Integer tags the contracts accept. Each converts from `u8` only for known
//! values, so an unknown tag fails before any ledger interaction.

use std::fmt;

use super::errors::DeploymentError;

/// Which Scheduler slot a contract is registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ContractKind {
    Host = 0,
    Tower = 1,
    Task = 2,
}

impl ContractKind {
    /// Deployment order.
    pub const ALL: [ContractKind; 3] = [ContractKind::Host, ContractKind::Tower, ContractKind::Task];

    /// Scheduler setter for this slot.
    pub fn scheduler_setter(&self) -> &'static str {
        match self {
            ContractKind::Host => "setHostContract",
            ContractKind::Tower => "setTowerContract",
            ContractKind::Task => "setTaskContract",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Host => "host",
            ContractKind::Tower => "tower",
            ContractKind::Task => "task",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for ContractKind {
    type Error = DeploymentError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(ContractKind::Host),
            1 => Ok(ContractKind::Tower),
            2 => Ok(ContractKind::Task),
            other => Err(DeploymentError::InvalidContractType(other)),
        }
    }
}

/// How a tower prices its service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FeeType {
    /// Flat fee per task.
    Constant = 0,
    /// Fee proportional to task size.
    Linear = 1,
}

impl TryFrom<u8> for FeeType {
    type Error = DeploymentError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(FeeType::Constant),
            1 => Ok(FeeType::Linear),
            other => Err(DeploymentError::InvalidTag {
                field: "fee type",
                tag: other,
            }),
        }
    }
}

/// Encryption scheme of a host's published key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PublicKeyType {
    Rsa = 0,
    Ecdsa = 1,
}

impl TryFrom<u8> for PublicKeyType {
    type Error = DeploymentError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(PublicKeyType::Rsa),
            1 => Ok(PublicKeyType::Ecdsa),
            other => Err(DeploymentError::InvalidTag {
                field: "public key type",
                tag: other,
            }),
        }
    }
}

/// Execution environment a task needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ComputingType {
    Cpu = 0,
    Gpu = 1,
    Sgx = 2,
}

impl TryFrom<u8> for ComputingType {
    type Error = DeploymentError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(ComputingType::Cpu),
            1 => Ok(ComputingType::Gpu),
            2 => Ok(ComputingType::Sgx),
            other => Err(DeploymentError::InvalidTag {
                field: "computing type",
                tag: other,
            }),
        }
    }
}
