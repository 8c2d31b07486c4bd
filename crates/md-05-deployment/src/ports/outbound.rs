//! Outbound (Driven) ports for deployment.

use std::path::{Path, PathBuf};

use crate::domain::contract::CompiledContract;
use crate::domain::errors::CompilerError;

/// Solidity source text and the directory its imports resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSource {
    pub code: String,
    pub base_path: PathBuf,
}

impl ContractSource {
    pub fn new(code: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        Self {
            code: code.into(),
            base_path: base_path.into(),
        }
    }

    /// Read a source file; imports resolve against its directory.
    pub fn from_file(path: &Path) -> Result<Self, CompilerError> {
        let code = std::fs::read_to_string(path).map_err(|e| CompilerError::SourceUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let base_path = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self { code, base_path })
    }
}

/// Turns source into a deployable contract.
#[async_trait::async_trait]
pub trait Compiler: Send + Sync {
    /// Compile `source` and select the contract named `entry_point`.
    ///
    /// # Errors
    /// * `CompilerError::EntryPointNotFound` - no such contract in the output
    async fn compile(
        &self,
        source: &ContractSource,
        entry_point: &str,
    ) -> Result<CompiledContract, CompilerError>;
}
