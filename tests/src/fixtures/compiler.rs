//! A `Compiler` serving the MECA contract interfaces without running solc.

use md_05_deployment::{CompiledContract, Compiler, CompilerError, ContractSource, InterfaceDescriptor};
use serde_json::{json, Value};

/// Bytecode is `0x6080` followed by the entry point name, so deployed code
/// identifies its contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCompiler;

fn function(name: &str, inputs: &[&str]) -> Value {
    let inputs: Vec<Value> = inputs.iter().map(|t| json!({ "type": t })).collect();
    json!({ "type": "function", "name": name, "inputs": inputs, "outputs": [] })
}

/// JSON ABI of each MECA contract.
pub fn abi(entry_point: &str) -> Option<Value> {
    let entries = match entry_point {
        "MecaDaoContract" => vec![function("setSchedulerContract", &["address"])],
        "MecaSchedulerContract" => vec![
            function("setHostContract", &["address"]),
            function("setTowerContract", &["address"]),
            function("setTaskContract", &["address"]),
        ],
        "MecaHostContract" => vec![function("registerHost", &["bytes", "uint8", "uint256"])],
        "MecaTowerContract" => vec![function(
            "registerTower",
            &["uint256", "string", "uint256", "uint8"],
        )],
        "MecaTaskContract" => vec![function("addTask", &["bytes32", "uint256", "uint8", "uint256"])],
        _ => return None,
    };
    let mut entries = entries;
    entries.push(json!({ "type": "constructor", "inputs": [] }));
    Some(Value::Array(entries))
}

pub fn bytecode(entry_point: &str) -> Vec<u8> {
    let mut code = vec![0x60, 0x80];
    code.extend_from_slice(entry_point.as_bytes());
    code
}

#[async_trait::async_trait]
impl Compiler for FixtureCompiler {
    async fn compile(
        &self,
        source: &ContractSource,
        entry_point: &str,
    ) -> Result<CompiledContract, CompilerError> {
        if !source.code.contains(entry_point) {
            return Err(CompilerError::EntryPointNotFound(entry_point.to_string()));
        }
        let abi = abi(entry_point)
            .ok_or_else(|| CompilerError::EntryPointNotFound(entry_point.to_string()))?;
        Ok(CompiledContract::new(
            entry_point,
            InterfaceDescriptor::from_json_abi(&abi)?,
            bytecode(entry_point),
        ))
    }
}
