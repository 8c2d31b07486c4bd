//! # Identifier Decoding
//!
//! Normalises the accepted multibase forms to raw bytes, then walks the five
//! fixed-width fields in order.

use super::entities::{ContentIdentifier, CID_VERSION, DAG_PB_CODEC, DIGEST_LENGTH, SHA2_256_CODE};
use super::errors::CidError;

/// Prefix that marks a CIDv0 (a bare base58btc sha2-256 multihash).
const CIDV0_PREFIX: &str = "Qm";

/// Parse and validate a content identifier.
///
/// # Errors
/// * `InvalidEncoding` - not multibase base16 / base58btc or CIDv0
/// * `UnsupportedVersion`, `UnsupportedCodec`, `UnsupportedHashFunction`,
///   `UnexpectedDigestLength` - the first fixed field that does not match
/// * `TruncatedOrOversizedDigest` - remainder is not exactly 32 bytes
pub fn parse(raw: &str) -> Result<ContentIdentifier, CidError> {
    let bytes = to_canonical_bytes(raw.trim())?;
    let mut reader = FieldReader::new(&bytes);

    reader.expect(CID_VERSION, CidError::UnsupportedVersion)?;
    reader.expect(DAG_PB_CODEC, CidError::UnsupportedCodec)?;
    reader.expect(SHA2_256_CODE, CidError::UnsupportedHashFunction)?;
    reader.expect(DIGEST_LENGTH, CidError::UnexpectedDigestLength)?;
    let digest = reader.digest()?;

    Ok(ContentIdentifier::from_validated_digest(digest))
}

/// Decode any accepted form into the v1 binary layout.
fn to_canonical_bytes(raw: &str) -> Result<Vec<u8>, CidError> {
    if raw.starts_with(CIDV0_PREFIX) {
        let multihash = bs58::decode(raw)
            .into_vec()
            .map_err(|e| CidError::InvalidEncoding(e.to_string()))?;
        // v0 is implicitly version 0 / dag-pb; upgrade to the v1 layout
        let mut bytes = Vec::with_capacity(multihash.len() + 2);
        bytes.push(CID_VERSION);
        bytes.push(DAG_PB_CODEC);
        bytes.extend_from_slice(&multihash);
        return Ok(bytes);
    }

    let mut chars = raw.chars();
    match chars.next() {
        Some('f') | Some('F') => {
            hex::decode(chars.as_str()).map_err(|e| CidError::InvalidEncoding(e.to_string()))
        }
        Some('z') => bs58::decode(chars.as_str())
            .into_vec()
            .map_err(|e| CidError::InvalidEncoding(e.to_string())),
        Some(other) => Err(CidError::InvalidEncoding(format!(
            "unsupported multibase prefix '{}'",
            other
        ))),
        None => Err(CidError::InvalidEncoding("empty identifier".to_string())),
    }
}

/// Cursor over the decoded identifier bytes.
struct FieldReader<'a> {
    remaining: &'a [u8],
}

impl<'a> FieldReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { remaining: bytes }
    }

    /// Consume one fixed field; fail with `mismatch(actual)` if it differs.
    fn expect(&mut self, expected: u8, mismatch: fn(u8) -> CidError) -> Result<(), CidError> {
        let (&actual, rest) =
            self.remaining
                .split_first()
                .ok_or(CidError::TruncatedOrOversizedDigest {
                    expected: DIGEST_LENGTH as usize,
                    actual: 0,
                })?;
        if actual != expected {
            return Err(mismatch(actual));
        }
        self.remaining = rest;
        Ok(())
    }

    fn digest(self) -> Result<[u8; 32], CidError> {
        self.remaining
            .try_into()
            .map_err(|_| CidError::TruncatedOrOversizedDigest {
                expected: DIGEST_LENGTH as usize,
                actual: self.remaining.len(),
            })
    }
}
