//! # Content Identifier Entity

use std::fmt;
use std::str::FromStr;

use super::errors::CidError;

/// The only CID version accepted on-chain.
pub const CID_VERSION: u8 = 0x01;

/// Multicodec code for dag-pb.
pub const DAG_PB_CODEC: u8 = 0x70;

/// Multihash code for sha2-256.
pub const SHA2_256_CODE: u8 = 0x12;

/// Digest length in bytes announced by the multihash.
pub const DIGEST_LENGTH: u8 = 0x20;

/// A validated content identifier.
///
/// Fields are private: the only way to obtain one is
/// [`crate::parse`], so holding a value proves it passed every check.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentIdentifier {
    digest: [u8; 32],
}

impl ContentIdentifier {
    pub(crate) fn from_validated_digest(digest: [u8; 32]) -> Self {
        Self { digest }
    }

    pub fn version(&self) -> u8 {
        CID_VERSION
    }

    pub fn codec(&self) -> u8 {
        DAG_PB_CODEC
    }

    /// The 32-byte digest committed in task registrations.
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// Canonical multibase base16 rendering (`f01701220<digest>`).
    pub fn to_base16(&self) -> String {
        format!(
            "f{:02x}{:02x}{:02x}{:02x}{}",
            CID_VERSION,
            DAG_PB_CODEC,
            SHA2_256_CODE,
            DIGEST_LENGTH,
            hex::encode(self.digest)
        )
    }
}

impl fmt::Display for ContentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base16())
    }
}

impl fmt::Debug for ContentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentIdentifier({})", self.to_base16())
    }
}

impl FromStr for ContentIdentifier {
    type Err = CidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::domain::codec::parse(s)
    }
}
