//! Model → text.
//!
//! A fixed traversal in wire-field order. Every optional gets its
//! `_present` line and every array its `.len` line, so a decoded document
//! re-encodes byte for byte.

mod operations;
mod soroban;

use tracing::debug;

use super::lines::{at, join, LineWriter};
use crate::model::*;

/// Render an envelope as txrep text.
pub fn encode(envelope: &TransactionEnvelope) -> String {
    let mut w = LineWriter::new();
    w.field("type", envelope.name());
    match envelope {
        TransactionEnvelope::Tx(env) => v1_envelope(&mut w, "tx", "signatures", env),
        TransactionEnvelope::FeeBump(env) => fee_bump_envelope(&mut w, env),
    }
    debug!(lines = w.line_count(), envelope = envelope.name(), "encoded txrep");
    w.finish()
}

fn v1_envelope(w: &mut LineWriter, tx: &str, signatures: &str, env: &TransactionV1Envelope) {
    transaction(w, tx, &env.tx);
    decorated_signatures(w, signatures, &env.signatures);
}

fn fee_bump_envelope(w: &mut LineWriter, env: &FeeBumpTransactionEnvelope) {
    w.field("feeBump.tx.feeSource", &env.tx.fee_source);
    w.field("feeBump.tx.fee", env.tx.fee);
    w.field("feeBump.tx.innerTx.type", "ENVELOPE_TYPE_TX");
    v1_envelope(
        w,
        "feeBump.tx.innerTx.tx",
        "feeBump.tx.innerTx.signatures",
        &env.tx.inner_tx,
    );
    w.field("feeBump.tx.ext.v", 0);
    decorated_signatures(w, "feeBump.signatures", &env.signatures);
}

fn transaction(w: &mut LineWriter, p: &str, tx: &Transaction) {
    w.field(&join(p, "sourceAccount"), &tx.source_account);
    w.field(&join(p, "fee"), tx.fee);
    w.field(&join(p, "seqNum"), tx.seq_num);
    preconditions(w, &join(p, "cond"), &tx.cond);
    memo(w, &join(p, "memo"), &tx.memo);

    let ops = join(p, "operations");
    w.len(&ops, tx.operations.len());
    for (i, op) in tx.operations.iter().enumerate() {
        operations::operation(w, &at(&ops, i), op);
    }

    let ext = join(p, "ext");
    match &tx.soroban_data {
        None => w.field(&join(&ext, "v"), 0),
        Some(data) => {
            w.field(&join(&ext, "v"), 1);
            soroban::soroban_data(w, &join(&ext, "sorobanData"), data);
        }
    }
}

/// `<p>._present`, then the value lines when present.
pub(super) fn optional<T>(
    w: &mut LineWriter,
    p: &str,
    value: Option<&T>,
    write: impl FnOnce(&mut LineWriter, &str, &T),
) {
    w.present(p, value.is_some());
    if let Some(value) = value {
        write(w, p, value);
    }
}

/// `<p>.len`, then each `<p>[i]`.
pub(super) fn array<T>(
    w: &mut LineWriter,
    p: &str,
    items: &[T],
    mut write: impl FnMut(&mut LineWriter, &str, &T),
) {
    w.len(p, items.len());
    for (i, item) in items.iter().enumerate() {
        write(w, &at(p, i), item);
    }
}

fn preconditions(w: &mut LineWriter, p: &str, cond: &Preconditions) {
    w.field(&join(p, "type"), cond.name());
    match cond {
        Preconditions::None => {}
        Preconditions::Time(tb) => time_bounds(w, &join(p, "timeBounds"), tb),
        Preconditions::V2(v2) => {
            let p = join(p, "v2");
            optional(w, &join(&p, "timeBounds"), v2.time_bounds.as_ref(), time_bounds);
            optional(w, &join(&p, "ledgerBounds"), v2.ledger_bounds.as_ref(), |w, p, lb| {
                w.field(&join(p, "minLedger"), lb.min_ledger);
                w.field(&join(p, "maxLedger"), lb.max_ledger);
            });
            optional(w, &join(&p, "minSeqNum"), v2.min_seq_num.as_ref(), |w, p, n| {
                w.field(p, n)
            });
            w.field(&join(&p, "minSeqAge"), v2.min_seq_age);
            w.field(&join(&p, "minSeqLedgerGap"), v2.min_seq_ledger_gap);
            array(w, &join(&p, "extraSigners"), &v2.extra_signers, |w, p, key| {
                w.field(p, key)
            });
        }
    }
}

fn time_bounds(w: &mut LineWriter, p: &str, tb: &TimeBounds) {
    w.field(&join(p, "minTime"), tb.min_time);
    w.field(&join(p, "maxTime"), tb.max_time);
}

fn memo(w: &mut LineWriter, p: &str, memo: &Memo) {
    w.field(&join(p, "type"), memo.name());
    match memo {
        Memo::None => {}
        Memo::Text(text) => w.text(&join(p, "text"), text),
        Memo::Id(id) => w.field(&join(p, "id"), id),
        Memo::Hash(hash) => w.hex(&join(p, "hash"), hash),
        Memo::Return(hash) => w.hex(&join(p, "retHash"), hash),
    }
}

fn decorated_signatures(w: &mut LineWriter, p: &str, signatures: &[DecoratedSignature]) {
    array(w, p, signatures, |w, p, sig| {
        w.hex(&join(p, "hint"), &sig.hint);
        w.hex(&join(p, "signature"), &sig.signature);
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> MuxedAccount {
        MuxedAccount::Ed25519([7; 32])
    }

    fn tx() -> Transaction {
        Transaction {
            source_account: account(),
            fee: 100,
            seq_num: 1,
            cond: Preconditions::None,
            memo: Memo::Id(42),
            operations: vec![],
            soroban_data: None,
        }
    }

    #[test]
    fn plain_envelope_layout() {
        let env = TransactionEnvelope::Tx(TransactionV1Envelope {
            tx: tx(),
            signatures: vec![DecoratedSignature {
                hint: [0xde, 0xad, 0xbe, 0xef],
                signature: vec![0xab; 64],
            }],
        });
        let text = encode(&env);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "type: ENVELOPE_TYPE_TX");
        assert_eq!(lines[1], format!("tx.sourceAccount: {}", account()));
        assert_eq!(lines[2], "tx.fee: 100");
        assert_eq!(lines[3], "tx.seqNum: 1");
        assert_eq!(lines[4], "tx.cond.type: PRECOND_NONE");
        assert_eq!(lines[5], "tx.memo.type: MEMO_ID");
        assert_eq!(lines[6], "tx.memo.id: 42");
        assert_eq!(lines[7], "tx.operations.len: 0");
        assert_eq!(lines[8], "tx.ext.v: 0");
        assert_eq!(lines[9], "signatures.len: 1");
        assert_eq!(lines[10], "signatures[0].hint: deadbeef");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn fee_bump_with_unsigned_inner_transaction() {
        let env = TransactionEnvelope::FeeBump(FeeBumpTransactionEnvelope {
            tx: FeeBumpTransaction {
                fee_source: account(),
                fee: 400,
                inner_tx: TransactionV1Envelope {
                    tx: tx(),
                    signatures: vec![],
                },
            },
            signatures: vec![],
        });
        let text = encode(&env);
        assert!(text.contains("feeBump.tx.innerTx.type: ENVELOPE_TYPE_TX\n"));
        assert!(text.contains("feeBump.tx.innerTx.signatures.len: 0\n"));
        assert!(text.contains("feeBump.tx.ext.v: 0\n"));
        assert!(text.ends_with("feeBump.signatures.len: 0\n"));
    }

    #[test]
    fn v2_preconditions_emit_presence_flags() {
        let mut tx = tx();
        tx.cond = Preconditions::V2(PreconditionsV2 {
            time_bounds: None,
            ledger_bounds: Some(LedgerBounds {
                min_ledger: 5,
                max_ledger: 0,
            }),
            min_seq_num: None,
            min_seq_age: 0,
            min_seq_ledger_gap: 0,
            extra_signers: vec![],
        });
        let mut w = LineWriter::new();
        preconditions(&mut w, "tx.cond", &tx.cond);
        assert_eq!(
            w.finish(),
            "tx.cond.type: PRECOND_V2\n\
             tx.cond.v2.timeBounds._present: false\n\
             tx.cond.v2.ledgerBounds._present: true\n\
             tx.cond.v2.ledgerBounds.minLedger: 5\n\
             tx.cond.v2.ledgerBounds.maxLedger: 0\n\
             tx.cond.v2.minSeqNum._present: false\n\
             tx.cond.v2.minSeqAge: 0\n\
             tx.cond.v2.minSeqLedgerGap: 0\n\
             tx.cond.v2.extraSigners.len: 0\n"
        );
    }

    #[test]
    fn memo_text_is_json_quoted() {
        let mut w = LineWriter::new();
        memo(&mut w, "tx.memo", &Memo::Text("say \"hi\"".into()));
        assert_eq!(
            w.finish(),
            "tx.memo.type: MEMO_TEXT\ntx.memo.text: \"say \\\"hi\\\"\"\n"
        );
    }
}
