//! Contract interface parsed from a solc JSON ABI.

use std::collections::HashMap;

use serde::Deserialize;

use super::abi::{encode_arguments, selector, AbiType, AbiValue};
use super::errors::AbiError;

/// One callable method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Canonical `name(type,...)`.
    pub signature: String,
    pub selector: [u8; 4],
    pub inputs: Vec<AbiType>,
}

/// Methods and constructor inputs of a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    methods: HashMap<String, MethodDescriptor>,
    constructor_inputs: Vec<AbiType>,
}

#[derive(Debug, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default = "function_entry")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
}

#[derive(Debug, Deserialize)]
struct AbiParam {
    #[serde(rename = "type")]
    kind: String,
}

fn function_entry() -> String {
    "function".to_string()
}

impl InterfaceDescriptor {
    /// Parse the JSON ABI array solc emits.
    ///
    /// Overloaded names keep their first declaration.
    pub fn from_json_abi(abi: &serde_json::Value) -> Result<Self, AbiError> {
        let entries: Vec<AbiEntry> = serde_json::from_value(abi.clone())
            .map_err(|e| AbiError::InvalidDescriptor(e.to_string()))?;

        let mut descriptor = Self::default();
        for entry in entries {
            let inputs: Vec<AbiType> = entry.inputs.iter().map(|p| AbiType::parse(&p.kind)).collect();
            match entry.kind.as_str() {
                "function" => {
                    let types: Vec<String> = entry.inputs.iter().map(|p| p.kind.clone()).collect();
                    let signature = format!("{}({})", entry.name, types.join(","));
                    descriptor
                        .methods
                        .entry(entry.name)
                        .or_insert_with(|| MethodDescriptor {
                            selector: selector(&signature),
                            signature,
                            inputs,
                        });
                }
                "constructor" => descriptor.constructor_inputs = inputs,
                _ => {}
            }
        }
        Ok(descriptor)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    pub fn constructor_inputs(&self) -> &[AbiType] {
        &self.constructor_inputs
    }

    /// `selector || encoded arguments`
    pub fn encode_call(&self, method: &str, args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        let descriptor = self
            .method(method)
            .ok_or_else(|| AbiError::UnknownMethod(method.to_string()))?;

        let mut calldata = descriptor.selector.to_vec();
        calldata.extend(encode_arguments(&descriptor.inputs, args)?);
        Ok(calldata)
    }

    /// Constructor arguments, appended to init code.
    pub fn encode_constructor(&self, args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        encode_arguments(&self.constructor_inputs, args)
    }
}
