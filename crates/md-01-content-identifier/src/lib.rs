//! # Content Identifier Codec (MD-01)
//!
//! Parses and validates the self-describing content identifier a task
//! developer registers on-chain. Only a `ContentIdentifier` produced by
//! [`parse`] can reach a task-registration payload, so malformed or crafted
//! identifiers are stopped before any transaction is built.
//!
//! ## Accepted Forms
//!
//! | Form | Example prefix | Handling |
//! |------|----------------|----------|
//! | multibase base16 | `f01701220…` | decoded directly |
//! | multibase base58btc | `z…` | decoded directly |
//! | CIDv0 | `Qm…` | upgraded to v1 (`0x01 0x70` prefix) |
//!
//! ## Field Walk
//!
//! ```text
//! | version | codec | hash fn | length | digest   |
//! |  0x01   | 0x70  |  0x12   |  0x20  | 32 bytes |
//! ```
//!
//! Each field is checked before the next is read; the first mismatch names
//! the offending field.

pub mod domain;

pub use domain::codec::parse;
pub use domain::entities::{
    ContentIdentifier, CID_VERSION, DAG_PB_CODEC, DIGEST_LENGTH, SHA2_256_CODE,
};
pub use domain::errors::CidError;
