//! # Binary Bridge
//!
//! Conversions between the schema model and the generated ledger wire
//! types in `stellar_xdr::curr`, plus the base64 entry points callers use to
//! move envelopes in and out of the wire form.
//!
//! Framing (big-endian integers, padding, length prefixes, discriminants,
//! trailing bytes) belongs to `stellar-xdr`. This layer adds the rules the
//! generated types cannot express: asset codes that match their variant,
//! symbol charsets, `authorize` bounds and the shared nesting cap. Variants
//! the model has no lossless form for are reported as
//! [`XdrError::Unsupported`].
//!
//! Every conversion is a `TryFrom` in each direction:
//!
//! ```text
//! model --TryFrom<&Model>--> wire --to_xdr--> bytes
//! bytes --from_xdr--> wire --TryFrom<wire>--> model
//! ```

mod envelope;
mod operations;
mod soroban;

use base64::{engine::general_purpose::STANDARD, Engine};
use stellar_xdr::curr::{self as wire, BytesM, Limits, ReadXdr, StringM, VecM, WriteXdr};
use tracing::debug;

use crate::config::{MAX_NESTING_DEPTH, XDR_READ_DEPTH_LIMIT};
use crate::error::{TxRepError, XdrError};
use crate::model::TransactionEnvelope;

// ---------------------------------------------------------------------------
// Envelope entry points
// ---------------------------------------------------------------------------

/// Serialize an envelope to its wire bytes.
pub fn to_xdr(envelope: &TransactionEnvelope) -> Result<Vec<u8>, XdrError> {
    let wire = wire::TransactionEnvelope::try_from(envelope)?;
    Ok(wire.to_xdr(Limits::none())?)
}

/// Parse an envelope that must span all of `bytes`.
pub fn from_xdr(bytes: &[u8]) -> Result<TransactionEnvelope, XdrError> {
    let limits = Limits {
        depth: XDR_READ_DEPTH_LIMIT,
        len: bytes.len(),
    };
    let wire = wire::TransactionEnvelope::from_xdr(bytes, limits)?;
    TransactionEnvelope::try_from(wire)
}

/// Serialize an envelope to base64 wire form.
pub fn to_xdr_base64(envelope: &TransactionEnvelope) -> Result<String, TxRepError> {
    let bytes = to_xdr(envelope)?;
    debug!(bytes = bytes.len(), envelope = envelope.name(), "encoded envelope xdr");
    Ok(STANDARD.encode(bytes))
}

/// Parse an envelope from base64 wire form. Surrounding whitespace is
/// ignored; anything else that is not canonical base64 is rejected.
pub fn from_xdr_base64(input: &str) -> Result<TransactionEnvelope, TxRepError> {
    let bytes = STANDARD
        .decode(input.trim())
        .map_err(|e| TxRepError::Base64(e.to_string()))?;
    let envelope = from_xdr(&bytes)?;
    debug!(bytes = bytes.len(), envelope = envelope.name(), "decoded envelope xdr");
    Ok(envelope)
}

/// The bytes a signer hashes: network id, envelope type tag and the
/// transaction it covers.
pub(crate) fn signature_payload(
    envelope: &TransactionEnvelope,
    network_id: [u8; 32],
) -> Result<Vec<u8>, XdrError> {
    let payload = wire::TransactionSignaturePayload {
        network_id: wire::Hash(network_id),
        tagged_transaction: envelope::tagged_transaction(envelope)?,
    };
    Ok(payload.to_xdr(Limits::none())?)
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub(crate) fn invalid(ty: &'static str, reason: impl ToString) -> XdrError {
    XdrError::InvalidValue {
        ty,
        reason: reason.to_string(),
    }
}

pub(crate) fn unsupported(ty: &'static str, name: &str) -> XdrError {
    XdrError::Unsupported {
        ty,
        value: name.to_string(),
    }
}

/// Bounded wire array.
pub(crate) fn vec_m<T, const MAX: u32>(
    ty: &'static str,
    items: Vec<T>,
) -> Result<VecM<T, MAX>, XdrError> {
    let len = items.len();
    items.try_into().map_err(|_| XdrError::LengthExceeded {
        ty,
        max: MAX as usize,
        len,
    })
}

/// Bounded wire opaque.
pub(crate) fn bytes_m<const MAX: u32>(ty: &'static str, bytes: &[u8]) -> Result<BytesM<MAX>, XdrError> {
    bytes.to_vec().try_into().map_err(|_| XdrError::LengthExceeded {
        ty,
        max: MAX as usize,
        len: bytes.len(),
    })
}

/// Bounded wire string. The bytes need not be UTF-8.
pub(crate) fn string_m<const MAX: u32>(
    ty: &'static str,
    bytes: &[u8],
) -> Result<StringM<MAX>, XdrError> {
    bytes.to_vec().try_into().map_err(|_| XdrError::LengthExceeded {
        ty,
        max: MAX as usize,
        len: bytes.len(),
    })
}

/// Convert every element of a wire array.
pub(crate) fn each<W, M>(
    items: impl IntoIterator<Item = W>,
    convert: impl FnMut(W) -> Result<M, XdrError>,
) -> Result<Vec<M>, XdrError> {
    items.into_iter().map(convert).collect()
}

/// Recursion guard for predicates, contract values and invocations.
pub(crate) fn check_depth(ty: &'static str, depth: usize) -> Result<(), XdrError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(invalid(ty, format!("nesting deeper than {}", MAX_NESTING_DEPTH)));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
