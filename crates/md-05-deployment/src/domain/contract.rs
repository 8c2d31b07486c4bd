//! # Contract Handles
//!
//! A `CompiledContract` carries bytecode and no address. Deploying it
//! consumes it into a `ContractHandle` whose address is fixed and whose
//! bytecode is gone, so an address can be assigned exactly once.

use shared_types::{format_address, Address};

use super::abi::AbiValue;
use super::errors::AbiError;
use super::interface::InterfaceDescriptor;

/// Compiler output for one entry point, not yet on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledContract {
    name: String,
    interface: InterfaceDescriptor,
    bytecode: Vec<u8>,
}

impl CompiledContract {
    pub fn new(name: impl Into<String>, interface: InterfaceDescriptor, bytecode: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            interface,
            bytecode,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interface(&self) -> &InterfaceDescriptor {
        &self.interface
    }

    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Bytecode followed by the encoded constructor arguments.
    pub fn init_code(&self, constructor_args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        let mut code = self.bytecode.clone();
        code.extend(self.interface.encode_constructor(constructor_args)?);
        Ok(code)
    }

    /// Fix the address the ledger assigned; the bytecode is dropped.
    pub fn deployed(self, address: Address) -> ContractHandle {
        ContractHandle {
            name: self.name,
            interface: self.interface,
            address,
        }
    }
}

/// A contract on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractHandle {
    name: String,
    interface: InterfaceDescriptor,
    address: Address,
}

impl ContractHandle {
    /// Handle for a contract deployed in an earlier run.
    pub fn at(name: impl Into<String>, interface: InterfaceDescriptor, address: Address) -> Self {
        Self {
            name: name.into(),
            interface,
            address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn interface(&self) -> &InterfaceDescriptor {
        &self.interface
    }

    pub fn encode_call(&self, method: &str, args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        self.interface.encode_call(method, args)
    }
}

impl std::fmt::Display for ContractHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, format_address(&self.address))
    }
}
