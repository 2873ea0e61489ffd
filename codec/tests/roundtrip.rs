//! End-to-end conversions between the model, txrep text and base64 XDR.
//!
//! Each test drives the public API only: build or parse an envelope, push
//! it through both representations and check nothing was lost.

mod common;

use common::*;
use txrep::model::*;
use txrep::{decode, encode, from_text, from_xdr, from_xdr_base64, to_text, to_xdr, to_xdr_base64};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// Model → text → model → XDR → model, asserting equality at each stop.
fn assert_lossless(envelope: &TransactionEnvelope) {
    let text = encode(envelope);
    let decoded = decode(&text).unwrap_or_else(|e| panic!("{}\n---\n{}", e, text));
    assert_eq!(&decoded, envelope);
    assert_eq!(encode(&decoded), text, "re-encoding changed the document");

    let bytes = to_xdr(envelope).expect("xdr");
    assert_eq!(&from_xdr(&bytes).expect("read xdr"), envelope);
}

fn payment_text() -> String {
    format!(
        "type: ENVELOPE_TYPE_TX\n\
         tx.sourceAccount: {src}\n\
         tx.fee: 100\n\
         tx.seqNum: 46489056724385793\n\
         tx.cond.type: PRECOND_NONE\n\
         tx.memo.type: MEMO_NONE\n\
         tx.operations.len: 1\n\
         tx.operations[0].sourceAccount._present: false\n\
         tx.operations[0].body.type: PAYMENT\n\
         tx.operations[0].body.paymentOp.destination: {dst}\n\
         tx.operations[0].body.paymentOp.asset: XLM\n\
         tx.operations[0].body.paymentOp.amount: 1000000000 (100.0000000 XLM)\n\
         tx.ext.v: 0\n\
         signatures.len: 0\n",
        src = ISSUER,
        dst = account(1),
    )
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[test]
fn payment_document_is_canonical() {
    let text = payment_text();
    let envelope = decode(&text).unwrap();
    assert_eq!(envelope, envelope_with(payment(1_000_000_000)));
    assert_eq!(encode(&envelope), text);
}

fn envelope_with(op: Operation) -> TransactionEnvelope {
    envelope(vec![op])
}

#[test]
fn amount_commentary_is_not_load_bearing() {
    let edited = payment_text().replace("(100.0000000 XLM)", "(a hundred lumens)");
    let envelope = decode(&edited).unwrap();
    assert_eq!(envelope, envelope_with(payment(1_000_000_000)));
    assert_eq!(encode(&envelope), payment_text());
}

#[test]
fn decimal_amounts_are_accepted() {
    let edited = payment_text().replace(
        "amount: 1000000000 (100.0000000 XLM)",
        "amount: 100.5 XLM",
    );
    let envelope = decode(&edited).unwrap();
    assert_eq!(envelope, envelope_with(payment(1_005_000_000)));
    assert!(encode(&envelope).contains("paymentOp.amount: 1005000000 (100.5000000 XLM)\n"));

    let too_precise = payment_text().replace("1000000000 (100.0000000 XLM)", "0.00000001");
    let err = decode(&too_precise).unwrap_err();
    assert_eq!(err.path(), Some("tx.operations[0].body.paymentOp.amount"));
}

#[test]
fn line_order_and_blank_lines_are_irrelevant() {
    let binding = payment_text();
    let mut lines: Vec<&str> = binding.lines().collect::<Vec<_>>();
    lines.reverse();
    let shuffled = format!("\n{}\n\n", lines.join("\n\n"));
    assert_eq!(decode(&shuffled).unwrap(), decode(&payment_text()).unwrap());
}

#[test]
fn issued_asset_amount_names_the_code() {
    let envelope = envelope_with(op(OperationBody::Payment(PaymentOp {
        destination: account(1).into(),
        asset: usd(),
        amount: 12_345,
    })));
    let text = encode(&envelope);
    assert!(text.contains(&format!(
        "tx.operations[0].body.paymentOp.asset: USD:{}\n",
        ISSUER
    )));
    assert!(text.contains("tx.operations[0].body.paymentOp.amount: 12345 (0.0012345 USD)\n"));
}

#[test]
fn set_options_with_only_clear_flags() {
    let envelope = envelope_with(op(OperationBody::SetOptions(SetOptionsOp {
        clear_flags: Some(3),
        ..Default::default()
    })));
    let text = encode(&envelope);
    let p = "tx.operations[0].body.setOptionsOp";
    assert!(text.contains(&format!("{}.clearFlags._present: true\n{}.clearFlags: 3\n", p, p)));
    assert_eq!(text.matches("._present: false").count(), 9);
    assert_lossless(&envelope);
}

#[test]
fn not_unconditional_claimable_balance() {
    let envelope = envelope_with(op(OperationBody::CreateClaimableBalance(
        CreateClaimableBalanceOp {
            asset: Asset::Native,
            amount: 5,
            claimants: vec![Claimant {
                destination: account(2),
                predicate: ClaimPredicate::Not(Some(Box::new(ClaimPredicate::Unconditional))),
            }],
        },
    )));
    let text = encode(&envelope);
    let p = "tx.operations[0].body.createClaimableBalanceOp.claimants[0].v0.predicate";
    assert!(text.contains(&format!(
        "{p}.type: CLAIM_PREDICATE_NOT\n\
         {p}.notPredicate._present: true\n\
         {p}.notPredicate.type: CLAIM_PREDICATE_UNCONDITIONAL\n",
        p = p
    )));
    assert_lossless(&envelope);
}

// ---------------------------------------------------------------------------
// Envelope shapes
// ---------------------------------------------------------------------------

#[test]
fn fee_bump_with_unsigned_inner_transaction() {
    let inner = TransactionV1Envelope {
        tx: transaction(vec![payment(1)]),
        signatures: vec![],
    };
    let envelope = TransactionEnvelope::FeeBump(FeeBumpTransactionEnvelope {
        tx: FeeBumpTransaction {
            fee_source: MuxedAccount::MuxedEd25519 {
                id: u64::MAX,
                ed25519: [3; 32],
            },
            fee: 400,
            inner_tx: inner,
        },
        signatures: vec![DecoratedSignature {
            hint: [1, 2, 3, 4],
            signature: vec![0xab; 64],
        }],
    });
    let text = encode(&envelope);
    assert!(text.starts_with("type: ENVELOPE_TYPE_TX_FEE_BUMP\n"));
    assert!(text.contains("feeBump.tx.innerTx.tx.operations[0].body.type: PAYMENT\n"));
    assert!(text.contains("feeBump.tx.innerTx.signatures.len: 0\n"));
    assert!(text.contains("feeBump.signatures[0].hint: 01020304\n"));
    assert_lossless(&envelope);
}

#[test]
fn every_operation_kind() {
    let operations = every_operation();
    let mut kinds: Vec<i32> = operations.iter().map(|op| op.body.discriminant()).collect();
    kinds.sort_unstable();
    kinds.dedup();
    assert_eq!(kinds, (0..27).collect::<Vec<_>>());

    let mut envelope = envelope(operations);
    if let TransactionEnvelope::Tx(env) = &mut envelope {
        env.tx.memo = Memo::Text("grand tour".into());
        env.tx.soroban_data = Some(soroban_data());
        env.signatures.push(DecoratedSignature {
            hint: [0; 4],
            signature: vec![],
        });
    }
    assert_lossless(&envelope);
}

#[test]
fn v2_preconditions_with_every_optional() {
    let mut envelope = envelope(vec![]);
    if let TransactionEnvelope::Tx(env) = &mut envelope {
        env.tx.cond = Preconditions::V2(PreconditionsV2 {
            time_bounds: Some(TimeBounds {
                min_time: 0,
                max_time: u64::MAX,
            }),
            ledger_bounds: Some(LedgerBounds {
                min_ledger: 1,
                max_ledger: 0,
            }),
            min_seq_num: Some(-1),
            min_seq_age: 30,
            min_seq_ledger_gap: 2,
            extra_signers: vec![
                SignerKey::PreAuthTx([0x10; 32]),
                SignerKey::Ed25519([0x20; 32]),
            ],
        });
        env.tx.memo = Memo::Return([0xee; 32]);
    }
    assert_lossless(&envelope);
}

#[test]
fn memo_text_that_is_not_utf8() {
    let mut envelope = envelope(vec![payment(1)]);
    if let TransactionEnvelope::Tx(env) = &mut envelope {
        env.tx.memo = Memo::Text(vec![0xff, 0xfe, b'a']);
    }
    let text = encode(&envelope);
    assert!(text.contains("tx.memo.text: 0xfffe61\n"), "{}", text);
    assert_lossless(&envelope);

    let string_arg = envelope_with(op(OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
        host_function: HostFunction::InvokeContract(InvokeContractArgs {
            contract_address: ScAddress::Contract(ContractId([0xcc; 32])),
            function_name: "log".into(),
            args: vec![ScVal::String(vec![0xc3, 0x28])],
        }),
        auth: vec![],
    })));
    assert_lossless(&string_arg);
}

#[test]
fn all_config_setting_keys() {
    let mut envelope = envelope(vec![op(OperationBody::RestoreFootprint)]);
    if let TransactionEnvelope::Tx(env) = &mut envelope {
        env.tx.soroban_data = Some(soroban_data());
    }
    let text = encode(&envelope);
    for id in ConfigSettingId::ALL {
        assert!(
            text.contains(&format!(".configSetting.configSettingID: {}\n", id.name())),
            "{} missing",
            id.name()
        );
    }
    assert_lossless(&envelope);
}

// ---------------------------------------------------------------------------
// Base64 bridge
// ---------------------------------------------------------------------------

#[test]
fn base64_bridge_round_trip() {
    let text = payment_text();
    let base64 = from_text(&text).unwrap();
    assert_eq!(to_text(&base64).unwrap(), text);

    let envelope = from_xdr_base64(&base64).unwrap();
    assert_eq!(to_xdr_base64(&envelope).unwrap(), base64);
}

#[test]
fn bridge_tolerates_surrounding_whitespace() {
    let base64 = from_text(&payment_text()).unwrap();
    let padded = format!("  {}\n", base64);
    assert_eq!(to_text(&padded).unwrap(), payment_text());
}
