//! Text → model.
//!
//! Recursive descent over a [`Fields`] lookup. Each function reads only the
//! keys under the path it is handed and fails on the first problem; there
//! is no partial result and no default substitution.

mod operations;
mod soroban;

use tracing::debug;

use super::lines::{at, join, Fields};
use crate::config::{
    MAX_EXTRA_SIGNERS, MAX_MEMO_TEXT_LEN, MAX_NESTING_DEPTH, MAX_OPERATIONS, MAX_SIGNATURES,
    MAX_SIGNATURE_LEN,
};
use crate::error::TxRepError;
use crate::model::*;

/// Decode a txrep document into an envelope.
pub fn decode(text: &str) -> Result<TransactionEnvelope, TxRepError> {
    let fields = Fields::parse(text)?;
    let envelope = decode_fields(&fields)?;
    debug!(
        lines = fields.len(),
        envelope = envelope.name(),
        operations = envelope.transaction().operations.len(),
        "decoded txrep"
    );
    Ok(envelope)
}

/// Decode an already parsed document.
pub fn decode_fields(f: &Fields) -> Result<TransactionEnvelope, TxRepError> {
    match f.str("type")? {
        "ENVELOPE_TYPE_TX" => v1_envelope(f, "tx", "signatures").map(TransactionEnvelope::Tx),
        "ENVELOPE_TYPE_TX_FEE_BUMP" => fee_bump_envelope(f).map(TransactionEnvelope::FeeBump),
        other => Err(TxRepError::unsupported("type", other)),
    }
}

fn v1_envelope(f: &Fields, tx: &str, signatures: &str) -> Result<TransactionV1Envelope, TxRepError> {
    Ok(TransactionV1Envelope {
        tx: transaction(f, tx)?,
        signatures: decorated_signatures(f, signatures)?,
    })
}

fn fee_bump_envelope(f: &Fields) -> Result<FeeBumpTransactionEnvelope, TxRepError> {
    let inner_type = "feeBump.tx.innerTx.type";
    match f.str(inner_type)? {
        "ENVELOPE_TYPE_TX" => {}
        other => return Err(TxRepError::unsupported(inner_type, other)),
    }
    let tx = FeeBumpTransaction {
        fee_source: f.muxed_account("feeBump.tx.feeSource")?,
        fee: f.i64("feeBump.tx.fee")?,
        inner_tx: v1_envelope(f, "feeBump.tx.innerTx.tx", "feeBump.tx.innerTx.signatures")?,
    };
    ext_v0(f, "feeBump.tx.ext")?;
    Ok(FeeBumpTransactionEnvelope {
        tx,
        signatures: decorated_signatures(f, "feeBump.signatures")?,
    })
}

fn transaction(f: &Fields, p: &str) -> Result<Transaction, TxRepError> {
    let count = f.bounded_len(&join(p, "operations"), MAX_OPERATIONS)?;
    let operations = (0..count)
        .map(|i| operations::operation(f, &at(&join(p, "operations"), i)))
        .collect::<Result<Vec<_>, _>>()?;

    let ext = join(p, "ext");
    let soroban_data = match f.u32(&join(&ext, "v"))? {
        0 => None,
        1 => Some(soroban::soroban_data(f, &join(&ext, "sorobanData"))?),
        other => return Err(TxRepError::unsupported(&join(&ext, "v"), &other.to_string())),
    };

    Ok(Transaction {
        source_account: f.muxed_account(&join(p, "sourceAccount"))?,
        fee: f.u32(&join(p, "fee"))?,
        seq_num: f.i64(&join(p, "seqNum"))?,
        cond: preconditions(f, &join(p, "cond"))?,
        memo: memo(f, &join(p, "memo"))?,
        operations,
        soroban_data,
    })
}

/// An empty extension point: `<p>.v` must be 0.
pub(super) fn ext_v0(f: &Fields, p: &str) -> Result<(), TxRepError> {
    let path = join(p, "v");
    match f.u32(&path)? {
        0 => Ok(()),
        other => Err(TxRepError::unsupported(&path, &other.to_string())),
    }
}

/// Recursion guard for predicates, contract values and invocations.
pub(super) fn check_depth(path: &str, depth: usize) -> Result<(), TxRepError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(TxRepError::invalid(
            path,
            format!("nesting deeper than {}", MAX_NESTING_DEPTH),
        ));
    }
    Ok(())
}

/// Read an optional field: `<p>._present`, then `read` only when true.
pub(super) fn optional<T>(
    f: &Fields,
    p: &str,
    read: impl FnOnce(&Fields, &str) -> Result<T, TxRepError>,
) -> Result<Option<T>, TxRepError> {
    if f.present(p)? {
        read(f, p).map(Some)
    } else {
        Ok(None)
    }
}

/// Read `<p>.len` then each `<p>[i]`.
pub(super) fn array<T>(
    f: &Fields,
    p: &str,
    max: usize,
    mut read: impl FnMut(&Fields, &str) -> Result<T, TxRepError>,
) -> Result<Vec<T>, TxRepError> {
    let len = f.bounded_len(p, max)?;
    (0..len).map(|i| read(f, &at(p, i))).collect()
}

fn preconditions(f: &Fields, p: &str) -> Result<Preconditions, TxRepError> {
    let kind = join(p, "type");
    match f.str(&kind)? {
        "PRECOND_NONE" => Ok(Preconditions::None),
        "PRECOND_TIME" => time_bounds(f, &join(p, "timeBounds")).map(Preconditions::Time),
        "PRECOND_V2" => {
            let v2 = join(p, "v2");
            Ok(Preconditions::V2(PreconditionsV2 {
                time_bounds: optional(f, &join(&v2, "timeBounds"), time_bounds)?,
                ledger_bounds: optional(f, &join(&v2, "ledgerBounds"), |f, p| {
                    Ok(LedgerBounds {
                        min_ledger: f.u32(&join(p, "minLedger"))?,
                        max_ledger: f.u32(&join(p, "maxLedger"))?,
                    })
                })?,
                min_seq_num: optional(f, &join(&v2, "minSeqNum"), |f, p| f.i64(p))?,
                min_seq_age: f.u64(&join(&v2, "minSeqAge"))?,
                min_seq_ledger_gap: f.u32(&join(&v2, "minSeqLedgerGap"))?,
                extra_signers: array(f, &join(&v2, "extraSigners"), MAX_EXTRA_SIGNERS, |f, p| {
                    f.signer_key(p)
                })?,
            }))
        }
        other => Err(TxRepError::unsupported(&kind, other)),
    }
}

fn time_bounds(f: &Fields, p: &str) -> Result<TimeBounds, TxRepError> {
    Ok(TimeBounds {
        min_time: f.u64(&join(p, "minTime"))?,
        max_time: f.u64(&join(p, "maxTime"))?,
    })
}

fn memo(f: &Fields, p: &str) -> Result<Memo, TxRepError> {
    let kind = join(p, "type");
    match f.str(&kind)? {
        "MEMO_NONE" => Ok(Memo::None),
        "MEMO_TEXT" => f.text(&join(p, "text"), MAX_MEMO_TEXT_LEN).map(Memo::Text),
        "MEMO_ID" => f.u64(&join(p, "id")).map(Memo::Id),
        "MEMO_HASH" => f.hex_array(&join(p, "hash")).map(Memo::Hash),
        "MEMO_RETURN" => f.hex_array(&join(p, "retHash")).map(Memo::Return),
        other => Err(TxRepError::unsupported(&kind, other)),
    }
}

fn decorated_signatures(f: &Fields, p: &str) -> Result<Vec<DecoratedSignature>, TxRepError> {
    array(f, p, MAX_SIGNATURES, |f, p| {
        Ok(DecoratedSignature {
            hint: f.hex_array(&join(p, "hint"))?,
            signature: f.bounded_hex(&join(p, "signature"), MAX_SIGNATURE_LEN)?,
        })
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
