//! # Deployment (MD-05)
//!
//! Deploys the MECA contract set (DAO, Scheduler, Host, Tower, Task), wires
//! the contracts to each other and registers network participants.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): ABI encoding, interface descriptors,
//!   contract handles, closed tag sets, registrations, the deployment plan
//! - **Ports Layer** (`ports/`): `Compiler`
//! - **Adapters** (`adapters/`): `SolcCompiler`
//! - **Service** (`service.rs`): `DeploymentOrchestrator`
//!
//! ## Step Chain
//!
//! | Step | Signer | Depends on |
//! |------|--------|------------|
//! | deploy-dao | DAO | - |
//! | deploy-scheduler | scheduler signer | - |
//! | set-scheduler-on-dao | DAO | both deployments |
//! | deploy-{host,tower,task}-contract | scheduler signer | set-scheduler-on-dao |
//! | register-{host,tower,task}-contract | scheduler signer | its deployment |
//! | register-tower / register-host / add-task | participant | all of the above |

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::solc::{SolcCompiler, DEFAULT_EVM_VERSION};
pub use domain::abi::{selector, AbiType, AbiValue};
pub use domain::contract::{CompiledContract, ContractHandle};
pub use domain::errors::{AbiError, CompilerError, DeploymentError};
pub use domain::interface::{InterfaceDescriptor, MethodDescriptor};
pub use domain::kinds::{ComputingType, ContractKind, FeeType, PublicKeyType};
pub use domain::plan::{
    ContractSources, ContractSpec, DeployedContracts, DeploymentPlan, DeploymentStep, Participants,
};
pub use domain::registration::{HostRegistration, TaskRegistration, TowerRegistration};
pub use ports::outbound::{Compiler, ContractSource};
pub use service::DeploymentOrchestrator;
