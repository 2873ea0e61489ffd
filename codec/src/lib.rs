// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # txrep — Core Library
//!
//! A lossless, bidirectional codec between ledger transaction envelopes and
//! txrep, a line-oriented `key: value` text form that a person can read,
//! review and edit before signing.
//!
//! ## Architecture
//!
//! - **encoding** — Leaf codecs: StrKey identifiers, amounts, hex.
//! - **model** — The typed schema: envelopes, operations, contract values.
//! - **txrep** — The text form: line grammar, decoder, encoder.
//! - **xdr** — Conversions to the `stellar-xdr` wire types and the base64 bridge.
//! - **verification** — Network ids, transaction hashes, signature checks.
//! - **config** — Network passphrases and wire bounds.
//! - **error** — Error types shared by every layer.
//!
//! ## Guarantees
//!
//! 1. `decode(encode(e)) == e` for every envelope the model can hold.
//! 2. `encode(decode(t)) == t` for every canonical document.
//! 3. Decoding is fail-fast and names the key path of the first problem.
//! 4. Text and binary decoders accept exactly the same set of model values.
//!
//! ```
//! use txrep::{from_text, to_text};
//!
//! let text = "\
//! type: ENVELOPE_TYPE_TX
//! tx.sourceAccount: GAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB7JZX
//! tx.fee: 100
//! tx.seqNum: 1
//! tx.cond.type: PRECOND_NONE
//! tx.memo.type: MEMO_NONE
//! tx.operations.len: 0
//! tx.ext.v: 0
//! signatures.len: 0
//! ";
//! let base64 = from_text(text).unwrap();
//! assert_eq!(to_text(&base64).unwrap(), text);
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod model;
pub mod txrep;
pub mod verification;
pub mod xdr;

pub use error::{TxRepError, XdrError};
pub use model::TransactionEnvelope;
pub use txrep::{decode, encode, from_text, to_text};
pub use verification::{network_id, transaction_hash, verify_signature};
pub use xdr::{from_xdr, from_xdr_base64, to_xdr, to_xdr_base64};
