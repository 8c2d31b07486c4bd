//! `Compiler` backed by the `solc` command-line compiler.

use std::path::PathBuf;
use std::process::Stdio;

use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::contract::CompiledContract;
use crate::domain::errors::CompilerError;
use crate::domain::interface::InterfaceDescriptor;
use crate::ports::outbound::{Compiler, ContractSource};

/// EVM target the MECA contracts are built for.
pub const DEFAULT_EVM_VERSION: &str = "shanghai";

/// Artifact key prefix solc uses for source read from stdin.
const STDIN_SOURCE: &str = "<stdin>";

#[derive(Debug, Deserialize)]
struct CombinedOutput {
    contracts: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CombinedArtifact {
    /// Array in recent solc releases, a JSON string in older ones.
    abi: serde_json::Value,
    bin: String,
}

/// Runs `solc --combined-json abi,bin --evm-version <v> --base-path <dir> -`.
pub struct SolcCompiler {
    solc_path: PathBuf,
    evm_version: String,
}

impl SolcCompiler {
    pub fn new(solc_path: impl Into<PathBuf>) -> Self {
        Self {
            solc_path: solc_path.into(),
            evm_version: DEFAULT_EVM_VERSION.to_string(),
        }
    }

    pub fn with_evm_version(mut self, evm_version: impl Into<String>) -> Self {
        self.evm_version = evm_version.into();
        self
    }
}

impl Default for SolcCompiler {
    fn default() -> Self {
        Self::new("solc")
    }
}

#[async_trait::async_trait]
impl Compiler for SolcCompiler {
    async fn compile(
        &self,
        source: &ContractSource,
        entry_point: &str,
    ) -> Result<CompiledContract, CompilerError> {
        debug!(solc = %self.solc_path.display(), entry_point, "Compiling contract");

        let mut cmd = tokio::process::Command::new(&self.solc_path);
        cmd.arg("--combined-json")
            .arg("abi,bin")
            .arg("--evm-version")
            .arg(&self.evm_version)
            .arg("--base-path")
            .arg(&source.base_path)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| CompilerError::Process(format!("cannot start solc: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.code.as_bytes())
                .await
                .map_err(|e| CompilerError::Process(format!("failed to write stdin: {e}")))?;
            // stdin is dropped here, closing the pipe
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| CompilerError::Process(e.to_string()))?;

        if !output.status.success() {
            return Err(CompilerError::Process(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        parse_combined_json(&output.stdout, entry_point)
    }
}

/// Select `<stdin>:<entry_point>` from `--combined-json abi,bin` output.
pub fn parse_combined_json(stdout: &[u8], entry_point: &str) -> Result<CompiledContract, CompilerError> {
    let output: CombinedOutput =
        serde_json::from_slice(stdout).map_err(|e| CompilerError::InvalidOutput(e.to_string()))?;

    let key = format!("{STDIN_SOURCE}:{entry_point}");
    let artifact = output
        .contracts
        .get(&key)
        .ok_or_else(|| CompilerError::EntryPointNotFound(entry_point.to_string()))?;
    let artifact: CombinedArtifact = serde_json::from_value(artifact.clone())
        .map_err(|e| CompilerError::InvalidOutput(format!("{key}: {e}")))?;

    let abi = match artifact.abi {
        serde_json::Value::String(text) => serde_json::from_str(&text)
            .map_err(|e| CompilerError::InvalidOutput(format!("{key} abi: {e}")))?,
        other => other,
    };
    let bytecode = hex::decode(artifact.bin.trim_start_matches("0x"))
        .map_err(|e| CompilerError::InvalidOutput(format!("{key} bin: {e}")))?;

    Ok(CompiledContract::new(
        entry_point,
        InterfaceDescriptor::from_json_abi(&abi)?,
        bytecode,
    ))
}
