//! Deployed contract addresses, persisted as `contracts.json`.

use std::path::Path;

use md_05_deployment::{ContractKind, DeployedContracts};
use serde::{Deserialize, Serialize};
use shared_types::{format_address, parse_address, Address};

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub dao: String,
    pub scheduler: String,
    pub host: String,
    pub tower: String,
    pub task: String,
}

impl From<&DeployedContracts> for ContractAddresses {
    fn from(contracts: &DeployedContracts) -> Self {
        Self {
            dao: format_address(&contracts.dao.address()),
            scheduler: format_address(&contracts.scheduler.address()),
            host: format_address(&contracts.host.address()),
            tower: format_address(&contracts.tower.address()),
            task: format_address(&contracts.task.address()),
        }
    }
}

impl ContractAddresses {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&json).map_err(|e| ConfigError::Malformed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Malformed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| ConfigError::Unwritable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Address of a Scheduler-registered contract.
    pub fn address(&self, kind: ContractKind) -> Result<Address, ConfigError> {
        let value = match kind {
            ContractKind::Host => &self.host,
            ContractKind::Tower => &self.tower,
            ContractKind::Task => &self.task,
        };
        parse_address(value).map_err(|e| ConfigError::Malformed {
            path: format!("contracts.{kind}"),
            reason: e.to_string(),
        })
    }
}
