//! # ABI Encoding
//!
//! Head/tail encoding for the parameter types the MECA contracts take:
//! `address`, `bool`, `uintN`, `bytesN`, `bytes`, `string`.
//!
//! ```text
//! calldata  = selector(4) || head(32 * n) || tail
//! static    -> value word in the head
//! dynamic   -> offset word in the head, length word + right-padded data in the tail
//! ```

use std::fmt;

use shared_types::{keccak256, Address, U256};

use super::errors::AbiError;

const WORD: usize = 32;

/// A parameter type from a JSON ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiType {
    Address,
    Bool,
    /// `uintN`, N in bits.
    Uint(usize),
    /// `bytesN`, N in bytes.
    FixedBytes(usize),
    Bytes,
    String,
    /// Anything else (tuples, arrays, signed ints). Kept for selector
    /// computation; encoding a value for it fails.
    Unsupported(String),
}

impl AbiType {
    pub fn parse(name: &str) -> Self {
        match name {
            "address" => AbiType::Address,
            "bool" => AbiType::Bool,
            "bytes" => AbiType::Bytes,
            "string" => AbiType::String,
            "uint" => AbiType::Uint(256),
            _ => {
                if let Some(bits) = name.strip_prefix("uint").and_then(|n| n.parse::<usize>().ok()) {
                    if bits > 0 && bits <= 256 && bits % 8 == 0 {
                        return AbiType::Uint(bits);
                    }
                } else if let Some(len) = name.strip_prefix("bytes").and_then(|n| n.parse::<usize>().ok()) {
                    if (1..=WORD).contains(&len) {
                        return AbiType::FixedBytes(len);
                    }
                }
                AbiType::Unsupported(name.to_string())
            }
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Address => f.write_str("address"),
            AbiType::Bool => f.write_str("bool"),
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::FixedBytes(len) => write!(f, "bytes{len}"),
            AbiType::Bytes => f.write_str("bytes"),
            AbiType::String => f.write_str("string"),
            AbiType::Unsupported(name) => f.write_str(name),
        }
    }
}

/// An argument value. `Bytes` serves both `bytes` and `bytesN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Address(Address),
    Bool(bool),
    Uint(U256),
    Bytes(Vec<u8>),
    String(String),
}

impl AbiValue {
    fn kind(&self) -> &'static str {
        match self {
            AbiValue::Address(_) => "address",
            AbiValue::Bool(_) => "bool",
            AbiValue::Uint(_) => "uint",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::String(_) => "string",
        }
    }
}

impl From<Address> for AbiValue {
    fn from(address: Address) -> Self {
        AbiValue::Address(address)
    }
}

impl From<u64> for AbiValue {
    fn from(value: u64) -> Self {
        AbiValue::Uint(U256::from(value))
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        AbiValue::Uint(value)
    }
}

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encode `values` as a tuple of `types` (no selector).
pub fn encode_arguments(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::ArgumentCount {
            expected: types.len(),
            actual: values.len(),
        });
    }

    let mut head = Vec::with_capacity(WORD * types.len());
    let mut tail = Vec::new();

    for (index, (ty, value)) in types.iter().zip(values).enumerate() {
        match (ty, value) {
            (AbiType::Address, AbiValue::Address(address)) => {
                head.extend_from_slice(&[0u8; 12]);
                head.extend_from_slice(address);
            }
            (AbiType::Bool, AbiValue::Bool(flag)) => {
                head.extend_from_slice(&uint_word(U256::from(u8::from(*flag))));
            }
            (AbiType::Uint(bits), AbiValue::Uint(number)) => {
                if number.bits() > *bits {
                    return Err(AbiError::ValueOutOfRange {
                        index,
                        expected: ty.to_string(),
                    });
                }
                head.extend_from_slice(&uint_word(*number));
            }
            (AbiType::FixedBytes(len), AbiValue::Bytes(bytes)) => {
                if bytes.len() > *len {
                    return Err(AbiError::ValueOutOfRange {
                        index,
                        expected: ty.to_string(),
                    });
                }
                let mut word = [0u8; WORD];
                word[..bytes.len()].copy_from_slice(bytes);
                head.extend_from_slice(&word);
            }
            (AbiType::Bytes, AbiValue::Bytes(bytes)) => {
                head.extend_from_slice(&offset_word(types.len(), tail.len()));
                append_dynamic(&mut tail, bytes);
            }
            (AbiType::String, AbiValue::String(text)) => {
                head.extend_from_slice(&offset_word(types.len(), tail.len()));
                append_dynamic(&mut tail, text.as_bytes());
            }
            (AbiType::Unsupported(name), _) => {
                return Err(AbiError::UnsupportedType(name.clone()));
            }
            (expected, found) => {
                return Err(AbiError::TypeMismatch {
                    index,
                    expected: expected.to_string(),
                    found: found.kind(),
                });
            }
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn offset_word(arguments: usize, tail_len: usize) -> [u8; WORD] {
    uint_word(U256::from(WORD * arguments + tail_len))
}

fn append_dynamic(tail: &mut Vec<u8>, bytes: &[u8]) {
    tail.extend_from_slice(&uint_word(U256::from(bytes.len())));
    tail.extend_from_slice(&padded(bytes));
}

/// Right-pad to a whole number of words; empty input stays empty.
fn padded(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    let rem = out.len() % WORD;
    if rem != 0 {
        out.resize(out.len() + WORD - rem, 0);
    }
    out
}
