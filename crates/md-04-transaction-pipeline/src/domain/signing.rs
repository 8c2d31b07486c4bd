//! # Legacy Transaction Signing (EIP-155)
//!
//! ```text
//! signing hash = keccak256(rlp([nonce, gasPrice, gas, to, value, data, chainId, 0, 0]))
//! raw          = rlp([nonce, gasPrice, gas, to, value, data, v, r, s])
//! v            = recovery_id + 35 + 2 * chainId
//! ```
//!
//! Signatures are low-S. Signing is pure and local.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use rlp::{Rlp, RlpStream};
use shared_types::{
    address_from_signing_key, address_from_verifying_key, keccak256, Address, Hash, SecretKey,
    U256,
};

use super::entities::{PendingTransaction, SignedTransaction};
use super::errors::SigningError;

const EIP155_V_OFFSET: u64 = 35;

impl PendingTransaction {
    /// Hash the signer commits to.
    pub fn signing_hash(&self) -> Hash {
        let mut stream = RlpStream::new_list(9);
        append_unsigned_fields(&mut stream, self);
        stream.append(&self.chain_id);
        stream.append(&0u8);
        stream.append(&0u8);
        keccak256(&stream.out())
    }

    /// Sign with `secret`, consuming the pending transaction.
    ///
    /// # Errors
    /// * `SigningError::SignatureFailed` - `secret` does not belong to `sender`,
    ///   or the chain id is too large to encode `v`
    pub fn sign(self, secret: &SecretKey) -> Result<SignedTransaction, SigningError> {
        let signer = address_from_signing_key(secret.signing_key());
        if signer != self.sender {
            return Err(SigningError::SignatureFailed(
                "signing key does not belong to the sender".into(),
            ));
        }

        let hash = self.signing_hash();
        let (signature, recovery_id) = secret
            .signing_key()
            .sign_prehash_recoverable(&hash)
            .map_err(|e| SigningError::SignatureFailed(e.to_string()))?;

        // Flipping s flips the parity of the recovered point
        let (signature, recovery_id) = match signature.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (signature, recovery_id),
        };

        let v = self
            .chain_id
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(EIP155_V_OFFSET + u64::from(recovery_id.to_byte())))
            .ok_or_else(|| SigningError::SignatureFailed("chain id too large".into()))?;

        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        let raw = encode_signed(&self, v, &r, &s);
        let hash = keccak256(&raw);

        Ok(SignedTransaction {
            transaction: self,
            v,
            r,
            s,
            raw,
            hash,
        })
    }
}

fn append_unsigned_fields(stream: &mut RlpStream, tx: &PendingTransaction) {
    stream.append(&tx.nonce);
    stream.append(&tx.gas_price);
    stream.append(&tx.gas_limit);
    match &tx.to {
        Some(to) => {
            stream.append(&to.to_vec());
        }
        None => {
            stream.append_empty_data();
        }
    }
    stream.append(&tx.value);
    stream.append(&tx.payload);
}

fn encode_signed(tx: &PendingTransaction, v: u64, r: &[u8; 32], s: &[u8; 32]) -> Vec<u8> {
    let mut stream = RlpStream::new_list(9);
    append_unsigned_fields(&mut stream, tx);
    stream.append(&v);
    // Integers in RLP carry no leading zeros
    stream.append(&U256::from_big_endian(r));
    stream.append(&U256::from_big_endian(s));
    stream.out().to_vec()
}

/// Parse a raw EIP-155 legacy transaction and recover its sender.
///
/// # Errors
/// * `SigningError::MalformedTransaction` - not a 9-item RLP list of the expected field types
/// * `SigningError::InvalidRecoveryValue` - `v` is not EIP-155 encoded
/// * `SigningError::RecoveryFailed` - the signature does not recover to a key
pub fn decode_signed_transaction(raw: &[u8]) -> Result<SignedTransaction, SigningError> {
    let malformed = |e: rlp::DecoderError| SigningError::MalformedTransaction(e.to_string());

    let rlp = Rlp::new(raw);
    if !rlp.is_list() {
        return Err(SigningError::MalformedTransaction("not an RLP list".into()));
    }
    let items = rlp.item_count().map_err(malformed)?;
    if items != 9 {
        return Err(SigningError::MalformedTransaction(format!(
            "expected 9 fields, found {items}"
        )));
    }

    let nonce: u64 = rlp.val_at(0).map_err(malformed)?;
    let gas_price: U256 = rlp.val_at(1).map_err(malformed)?;
    let gas_limit: u64 = rlp.val_at(2).map_err(malformed)?;
    let to_bytes: Vec<u8> = rlp.val_at(3).map_err(malformed)?;
    let value: U256 = rlp.val_at(4).map_err(malformed)?;
    let payload: Vec<u8> = rlp.val_at(5).map_err(malformed)?;
    let v: u64 = rlp.val_at(6).map_err(malformed)?;
    let r = word_at(&rlp, 7)?;
    let s = word_at(&rlp, 8)?;

    let to = match to_bytes.len() {
        0 => None,
        20 => {
            let mut address = [0u8; 20];
            address.copy_from_slice(&to_bytes);
            Some(address)
        }
        other => {
            return Err(SigningError::MalformedTransaction(format!(
                "recipient is {other} bytes"
            )))
        }
    };

    if v < EIP155_V_OFFSET {
        return Err(SigningError::InvalidRecoveryValue(v));
    }
    let chain_id = (v - EIP155_V_OFFSET) / 2;
    let parity = ((v - EIP155_V_OFFSET) % 2) as u8;

    let mut transaction = PendingTransaction {
        sender: [0u8; 20],
        nonce,
        gas_limit,
        gas_price,
        to,
        value,
        payload,
        chain_id,
    };
    transaction.sender = recover_sender(&transaction.signing_hash(), parity, &r, &s)?;

    Ok(SignedTransaction {
        transaction,
        v,
        r,
        s,
        raw: raw.to_vec(),
        hash: keccak256(raw),
    })
}

fn word_at(rlp: &Rlp, index: usize) -> Result<[u8; 32], SigningError> {
    let value: U256 = rlp
        .val_at(index)
        .map_err(|e| SigningError::MalformedTransaction(e.to_string()))?;
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    Ok(word)
}

fn recover_sender(
    hash: &Hash,
    parity: u8,
    r: &[u8; 32],
    s: &[u8; 32],
) -> Result<Address, SigningError> {
    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(r);
    bytes[32..].copy_from_slice(s);

    let signature = Signature::from_slice(&bytes).map_err(|_| SigningError::RecoveryFailed)?;
    let recovery_id = RecoveryId::from_byte(parity).ok_or(SigningError::RecoveryFailed)?;
    let key = VerifyingKey::recover_from_prehash(hash, &signature, recovery_id)
        .map_err(|_| SigningError::RecoveryFailed)?;

    Ok(address_from_verifying_key(&key))
}
