//! # Hashing and Signature Checks
//!
//! What a signer actually signs is not the envelope but the 32-byte hash of
//!
//! ```text
//! sha256(passphrase) || envelope type (u32 BE) || transaction XDR
//! ```
//!
//! where the transaction is the inner one for `ENVELOPE_TYPE_TX` and the
//! fee-bump transaction (which embeds the signed inner envelope) for
//! `ENVELOPE_TYPE_TX_FEE_BUMP`. Binding the network id into the payload is
//! what keeps a testnet signature from being replayed on the public network.
//!
//! Only verification lives here. Producing signatures needs secret keys and
//! is left to wallets.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::TxRepError;
use crate::model::{AccountId, Hash, TransactionEnvelope};
use crate::xdr;

/// Network id: the SHA-256 of the network passphrase.
pub fn network_id(passphrase: &str) -> Hash {
    Sha256::digest(passphrase.as_bytes()).into()
}

/// The exact bytes whose hash is signed.
pub fn signature_payload(
    envelope: &TransactionEnvelope,
    passphrase: &str,
) -> Result<Vec<u8>, TxRepError> {
    Ok(xdr::signature_payload(envelope, network_id(passphrase))?)
}

/// Transaction hash: the value signers sign and explorers index by.
pub fn transaction_hash(
    envelope: &TransactionEnvelope,
    passphrase: &str,
) -> Result<Hash, TxRepError> {
    let payload = signature_payload(envelope, passphrase)?;
    Ok(Sha256::digest(&payload).into())
}

/// The last four bytes of an account key, used to match signatures to
/// signers without trying every key.
pub fn signature_hint(account: &AccountId) -> [u8; 4] {
    let key = account.as_bytes();
    [key[28], key[29], key[30], key[31]]
}

/// Whether `account` produced one of the envelope's outer signatures.
///
/// Only signatures whose hint matches the account are tried. An envelope
/// that cannot be serialized has no valid signatures.
pub fn verify_signature(envelope: &TransactionEnvelope, passphrase: &str, account: &AccountId) -> bool {
    let hash = match transaction_hash(envelope, passphrase) {
        Ok(hash) => hash,
        Err(e) => {
            debug!(error = %e, "cannot hash envelope for verification");
            return false;
        }
    };
    let Ok(key) = VerifyingKey::from_bytes(account.as_bytes()) else {
        return false;
    };
    let hint = signature_hint(account);

    envelope
        .signatures()
        .iter()
        .filter(|sig| sig.hint == hint)
        .filter_map(|sig| <[u8; 64]>::try_from(sig.signature.as_slice()).ok())
        .any(|bytes| key.verify(&hash, &Signature::from_bytes(&bytes)).is_ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
