//! The txrep text form.
//!
//! One `key: value` line per leaf field, keys being dotted paths with
//! `[i]` indices. Arrays declare `<path>.len`, optionals declare
//! `<path>._present`, and unions declare `<path>.type`.
//!
//! ```text
//! type: ENVELOPE_TYPE_TX
//! tx.sourceAccount: GAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB7JZX
//! tx.fee: 100
//! tx.operations.len: 1
//! tx.operations[0].body.type: PAYMENT
//! tx.operations[0].body.paymentOp.amount: 1000000000 (100.0000000 XLM)
//! ```

mod decode;
mod encode;
pub mod lines;

use tracing::debug;

pub use decode::{decode, decode_fields};
pub use encode::encode;

use crate::error::TxRepError;
use crate::xdr::{from_xdr_base64, to_xdr_base64};

/// txrep text → base64 XDR envelope.
pub fn from_text(text: &str) -> Result<String, TxRepError> {
    let envelope = decode(text)?;
    let base64 = to_xdr_base64(&envelope)?;
    debug!(bytes = base64.len(), "txrep converted to xdr");
    Ok(base64)
}

/// base64 XDR envelope → txrep text.
pub fn to_text(base64: &str) -> Result<String, TxRepError> {
    let envelope = from_xdr_base64(base64)?;
    Ok(encode(&envelope))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    fn payment_envelope() -> TransactionEnvelope {
        let issuer =
            AccountId::from_strkey("GAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB7JZX")
                .unwrap();
        TransactionEnvelope::Tx(TransactionV1Envelope {
            tx: Transaction {
                source_account: issuer.into(),
                fee: 100,
                seq_num: 46489056724385793,
                cond: Preconditions::Time(TimeBounds {
                    min_time: 0,
                    max_time: 1_700_000_000,
                }),
                memo: Memo::Text("hello".into()),
                operations: vec![Operation {
                    source_account: None,
                    body: OperationBody::Payment(PaymentOp {
                        destination: issuer.into(),
                        asset: Asset::issued("USD", issuer).unwrap(),
                        amount: 1_000_000_000,
                    }),
                }],
                soroban_data: None,
            },
            signatures: vec![DecoratedSignature {
                hint: [1, 2, 3, 4],
                signature: vec![9; 64],
            }],
        })
    }

    #[test]
    fn text_and_binary_agree() {
        let env = payment_envelope();
        let text = encode(&env);
        assert_eq!(decode(&text).unwrap(), env);

        let base64 = from_text(&text).unwrap();
        assert_eq!(from_xdr_base64(&base64).unwrap(), env);
        assert_eq!(to_text(&base64).unwrap(), text);
    }

    #[test]
    fn bridge_errors_surface() {
        assert!(matches!(to_text("not base64!"), Err(TxRepError::Base64(_))));
        assert!(matches!(
            from_text("type: ENVELOPE_TYPE_TX"),
            Err(TxRepError::MissingField(_))
        ));
    }
}
