//! Error types for deployment and ABI encoding.

use md_04_transaction_pipeline::PipelineError;
use shared_types::{format_hash, Hash};
use thiserror::Error;

use super::plan::DeploymentStep;

/// Calldata could not be built from the interface descriptor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("Contract has no method named {0}")]
    UnknownMethod(String),

    #[error("Expected {expected} arguments, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    #[error("Argument {index}: expected {expected}, got {found}")]
    TypeMismatch {
        index: usize,
        expected: String,
        found: &'static str,
    },

    #[error("Argument {index} does not fit in {expected}")]
    ValueOutOfRange { index: usize, expected: String },

    #[error("Unsupported ABI type {0}")]
    UnsupportedType(String),

    #[error("Invalid ABI descriptor: {0}")]
    InvalidDescriptor(String),
}

/// Failures producing a compiled contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompilerError {
    #[error("Cannot read contract source {path}: {reason}")]
    SourceUnreadable { path: String, reason: String },

    #[error("Compiler failed: {0}")]
    Process(String),

    #[error("Unreadable compiler output: {0}")]
    InvalidOutput(String),

    #[error("Entry point {0} not found in compiler output")]
    EntryPointNotFound(String),

    #[error(transparent)]
    Abi(#[from] AbiError),
}

/// Errors from `DeploymentOrchestrator`. Every failure after validation
/// names the step it happened in.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeploymentError {
    #[error("Step {step} failed: {source}")]
    Step {
        step: DeploymentStep,
        source: PipelineError,
    },

    /// The transaction was mined but execution failed; dependent steps are skipped.
    #[error("Step {step} reverted in {}", format_hash(.transaction_hash))]
    StepReverted {
        step: DeploymentStep,
        transaction_hash: Hash,
    },

    /// A creation receipt without a contract address.
    #[error("Step {step} produced no contract address")]
    MissingContractAddress { step: DeploymentStep },

    #[error("Invalid contract type {0}")]
    InvalidContractType(u8),

    #[error("Invalid {field} tag {tag}")]
    InvalidTag { field: &'static str, tag: u8 },

    #[error("Step {step}: {source}")]
    Abi {
        step: DeploymentStep,
        source: AbiError,
    },

    #[error("Step {step}: {source}")]
    Compiler {
        step: DeploymentStep,
        source: CompilerError,
    },
}

impl DeploymentError {
    /// The step this failure belongs to, if it got that far.
    pub fn step(&self) -> Option<DeploymentStep> {
        match self {
            DeploymentError::Step { step, .. }
            | DeploymentError::StepReverted { step, .. }
            | DeploymentError::MissingContractAddress { step }
            | DeploymentError::Abi { step, .. }
            | DeploymentError::Compiler { step, .. } => Some(*step),
            DeploymentError::InvalidContractType(_) | DeploymentError::InvalidTag { .. } => None,
        }
    }
}
