//! Envelopes, transactions, memos and preconditions.
//!
//! Signatures live on the envelope rather than the transaction, as on the
//! wire: a fee-bump envelope carries its own signatures *and* owns the inner
//! envelope with the inner signatures.

use serde::{Deserialize, Serialize};

use super::account::{Hash, MuxedAccount, SignerKey};
use super::operation::Operation;
use super::soroban::SorobanTransactionData;

// ---------------------------------------------------------------------------
// Memo
// ---------------------------------------------------------------------------

/// Free-form data attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Memo {
    /// No memo.
    None,
    /// Text of at most 28 bytes. Usually UTF-8, but the wire does not
    /// require it.
    Text(Vec<u8>),
    /// 64-bit id.
    Id(u64),
    /// 32-byte hash.
    Hash(Hash),
    /// 32-byte hash of a transaction being refunded.
    Return(Hash),
}

impl Memo {
    /// Symbolic discriminator name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "MEMO_NONE",
            Self::Text(_) => "MEMO_TEXT",
            Self::Id(_) => "MEMO_ID",
            Self::Hash(_) => "MEMO_HASH",
            Self::Return(_) => "MEMO_RETURN",
        }
    }
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

/// Inclusive lower / exclusive upper close-time bounds, unix seconds.
/// A `max_time` of 0 means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

/// Ledger-sequence bounds; a `max_ledger` of 0 means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerBounds {
    pub min_ledger: u32,
    pub max_ledger: u32,
}

/// The general precondition form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreconditionsV2 {
    pub time_bounds: Option<TimeBounds>,
    pub ledger_bounds: Option<LedgerBounds>,
    /// Source sequence number must be at least this (and below `seq_num`).
    pub min_seq_num: Option<i64>,
    /// Seconds since the source account's sequence number last changed.
    pub min_seq_age: u64,
    /// Ledgers since the source account's sequence number last changed.
    pub min_seq_ledger_gap: u32,
    /// Signers required in addition to the usual thresholds.
    pub extra_signers: Vec<SignerKey>,
}

/// Validity constraints on a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preconditions {
    None,
    Time(TimeBounds),
    V2(PreconditionsV2),
}

impl Preconditions {
    /// Symbolic discriminator name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "PRECOND_NONE",
            Self::Time(_) => "PRECOND_TIME",
            Self::V2(_) => "PRECOND_V2",
        }
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// A signature together with the last four bytes of the signing key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecoratedSignature {
    /// Identifies which signer produced the signature.
    pub hint: [u8; 4],
    /// Signature bytes, at most 64.
    pub signature: Vec<u8>,
}

/// A transaction: who pays, which sequence number it consumes, under which
/// conditions, and the operations it applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub source_account: MuxedAccount,
    /// Maximum total fee in stroops.
    pub fee: u32,
    pub seq_num: i64,
    pub cond: Preconditions,
    pub memo: Memo,
    pub operations: Vec<Operation>,
    /// Present when the transaction carries a smart-contract footprint
    /// (`ext.v = 1`).
    pub soroban_data: Option<SorobanTransactionData>,
}

/// A transaction and the signatures over it (`ENVELOPE_TYPE_TX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionV1Envelope {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

/// An outer transaction re-pricing an already signed inner one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeBumpTransaction {
    pub fee_source: MuxedAccount,
    /// New total fee in stroops (int64, unlike the inner `uint32`).
    pub fee: i64,
    pub inner_tx: TransactionV1Envelope,
}

/// A fee-bump transaction and the fee source's signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeBumpTransactionEnvelope {
    pub tx: FeeBumpTransaction,
    pub signatures: Vec<DecoratedSignature>,
}

/// Top-level envelope: the unit that is displayed, signed and submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionEnvelope {
    /// `ENVELOPE_TYPE_TX`
    Tx(TransactionV1Envelope),
    /// `ENVELOPE_TYPE_TX_FEE_BUMP`
    FeeBump(FeeBumpTransactionEnvelope),
}

impl TransactionEnvelope {
    /// Symbolic envelope type, as written on the `type:` line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tx(_) => "ENVELOPE_TYPE_TX",
            Self::FeeBump(_) => "ENVELOPE_TYPE_TX_FEE_BUMP",
        }
    }

    /// Signatures of the outermost transaction.
    pub fn signatures(&self) -> &[DecoratedSignature] {
        match self {
            Self::Tx(env) => &env.signatures,
            Self::FeeBump(env) => &env.signatures,
        }
    }

    /// The transaction that carries the operations (the inner one for a
    /// fee bump).
    pub fn transaction(&self) -> &Transaction {
        match self {
            Self::Tx(env) => &env.tx,
            Self::FeeBump(env) => &env.tx.inner_tx.tx,
        }
    }
}
