//! Wire forms of identifiers, assets, predicates and the envelope itself.

use stellar_xdr::curr::{self as wire, VecM};

use super::{bytes_m, check_depth, each, invalid, string_m, unsupported, vec_m};
use crate::error::XdrError;
use crate::model::*;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

impl From<&AccountId> for wire::AccountId {
    fn from(account: &AccountId) -> Self {
        wire::AccountId(wire::PublicKey::PublicKeyTypeEd25519(wire::Uint256(account.0)))
    }
}

impl From<wire::AccountId> for AccountId {
    fn from(account: wire::AccountId) -> Self {
        let wire::PublicKey::PublicKeyTypeEd25519(wire::Uint256(key)) = account.0;
        AccountId(key)
    }
}

impl From<&MuxedAccount> for wire::MuxedAccount {
    fn from(account: &MuxedAccount) -> Self {
        match *account {
            MuxedAccount::Ed25519(key) => Self::Ed25519(wire::Uint256(key)),
            MuxedAccount::MuxedEd25519 { id, ed25519 } => {
                Self::MuxedEd25519(wire::MuxedAccountMed25519 {
                    id,
                    ed25519: wire::Uint256(ed25519),
                })
            }
        }
    }
}

impl From<wire::MuxedAccount> for MuxedAccount {
    fn from(account: wire::MuxedAccount) -> Self {
        match account {
            wire::MuxedAccount::Ed25519(key) => Self::Ed25519(key.0),
            wire::MuxedAccount::MuxedEd25519(muxed) => Self::MuxedEd25519 {
                id: muxed.id,
                ed25519: muxed.ed25519.0,
            },
        }
    }
}

impl TryFrom<&SignerKey> for wire::SignerKey {
    type Error = XdrError;

    fn try_from(key: &SignerKey) -> Result<Self, XdrError> {
        Ok(match key {
            SignerKey::Ed25519(key) => Self::Ed25519(wire::Uint256(*key)),
            SignerKey::PreAuthTx(hash) => Self::PreAuthTx(wire::Uint256(*hash)),
            SignerKey::HashX(hash) => Self::HashX(wire::Uint256(*hash)),
            SignerKey::Ed25519SignedPayload { ed25519, payload } => {
                Self::Ed25519SignedPayload(wire::SignerKeyEd25519SignedPayload {
                    ed25519: wire::Uint256(*ed25519),
                    payload: bytes_m("SignerKey.payload", payload)?,
                })
            }
        })
    }
}

impl From<wire::SignerKey> for SignerKey {
    fn from(key: wire::SignerKey) -> Self {
        match key {
            wire::SignerKey::Ed25519(key) => Self::Ed25519(key.0),
            wire::SignerKey::PreAuthTx(hash) => Self::PreAuthTx(hash.0),
            wire::SignerKey::HashX(hash) => Self::HashX(hash.0),
            wire::SignerKey::Ed25519SignedPayload(signed) => Self::Ed25519SignedPayload {
                ed25519: signed.ed25519.0,
                payload: signed.payload.into(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

fn checked(ty: &'static str, asset: Asset) -> Result<Asset, XdrError> {
    asset.validate().map_err(|e| invalid(ty, e))?;
    Ok(asset)
}

impl TryFrom<&Asset> for wire::Asset {
    type Error = XdrError;

    fn try_from(asset: &Asset) -> Result<Self, XdrError> {
        asset.validate().map_err(|e| invalid("Asset", e))?;
        Ok(match asset {
            Asset::Native => Self::Native,
            Asset::CreditAlphanum4(a) => Self::CreditAlphanum4(wire::AlphaNum4 {
                asset_code: wire::AssetCode4(a.asset_code),
                issuer: (&a.issuer).into(),
            }),
            Asset::CreditAlphanum12(a) => Self::CreditAlphanum12(wire::AlphaNum12 {
                asset_code: wire::AssetCode12(a.asset_code),
                issuer: (&a.issuer).into(),
            }),
        })
    }
}

impl TryFrom<wire::Asset> for Asset {
    type Error = XdrError;

    fn try_from(asset: wire::Asset) -> Result<Self, XdrError> {
        checked(
            "Asset",
            match asset {
                wire::Asset::Native => Asset::Native,
                wire::Asset::CreditAlphanum4(a) => Asset::CreditAlphanum4(AlphaNum4 {
                    asset_code: a.asset_code.0,
                    issuer: a.issuer.into(),
                }),
                wire::Asset::CreditAlphanum12(a) => Asset::CreditAlphanum12(AlphaNum12 {
                    asset_code: a.asset_code.0,
                    issuer: a.issuer.into(),
                }),
            },
        )
    }
}

impl TryFrom<&AssetCode> for wire::AssetCode {
    type Error = XdrError;

    fn try_from(code: &AssetCode) -> Result<Self, XdrError> {
        code.validate().map_err(|e| invalid("AssetCode", e))?;
        Ok(match *code {
            AssetCode::CreditAlphanum4(code) => Self::CreditAlphanum4(wire::AssetCode4(code)),
            AssetCode::CreditAlphanum12(code) => Self::CreditAlphanum12(wire::AssetCode12(code)),
        })
    }
}

impl TryFrom<wire::AssetCode> for AssetCode {
    type Error = XdrError;

    fn try_from(code: wire::AssetCode) -> Result<Self, XdrError> {
        let code = match code {
            wire::AssetCode::CreditAlphanum4(code) => Self::CreditAlphanum4(code.0),
            wire::AssetCode::CreditAlphanum12(code) => Self::CreditAlphanum12(code.0),
        };
        code.validate().map_err(|e| invalid("AssetCode", e))?;
        Ok(code)
    }
}

impl From<Price> for wire::Price {
    fn from(price: Price) -> Self {
        Self {
            n: price.n,
            d: price.d,
        }
    }
}

impl From<wire::Price> for Price {
    fn from(price: wire::Price) -> Self {
        Self {
            n: price.n,
            d: price.d,
        }
    }
}

impl TryFrom<&ChangeTrustAsset> for wire::ChangeTrustAsset {
    type Error = XdrError;

    fn try_from(line: &ChangeTrustAsset) -> Result<Self, XdrError> {
        Ok(match line {
            ChangeTrustAsset::Asset(asset) => match wire::Asset::try_from(asset)? {
                wire::Asset::Native => Self::Native,
                wire::Asset::CreditAlphanum4(a) => Self::CreditAlphanum4(a),
                wire::Asset::CreditAlphanum12(a) => Self::CreditAlphanum12(a),
            },
            ChangeTrustAsset::PoolShare(params) => Self::PoolShare(
                wire::LiquidityPoolParameters::LiquidityPoolConstantProduct(
                    wire::LiquidityPoolConstantProductParameters {
                        asset_a: (&params.asset_a).try_into()?,
                        asset_b: (&params.asset_b).try_into()?,
                        fee: params.fee,
                    },
                ),
            ),
        })
    }
}

impl TryFrom<wire::ChangeTrustAsset> for ChangeTrustAsset {
    type Error = XdrError;

    fn try_from(line: wire::ChangeTrustAsset) -> Result<Self, XdrError> {
        let asset = match line {
            wire::ChangeTrustAsset::Native => wire::Asset::Native,
            wire::ChangeTrustAsset::CreditAlphanum4(a) => wire::Asset::CreditAlphanum4(a),
            wire::ChangeTrustAsset::CreditAlphanum12(a) => wire::Asset::CreditAlphanum12(a),
            wire::ChangeTrustAsset::PoolShare(
                wire::LiquidityPoolParameters::LiquidityPoolConstantProduct(params),
            ) => {
                return Ok(Self::PoolShare(ConstantProductParameters {
                    asset_a: params.asset_a.try_into()?,
                    asset_b: params.asset_b.try_into()?,
                    fee: params.fee,
                }))
            }
        };
        asset.try_into().map(Self::Asset)
    }
}

impl TryFrom<&TrustLineAsset> for wire::TrustLineAsset {
    type Error = XdrError;

    fn try_from(asset: &TrustLineAsset) -> Result<Self, XdrError> {
        Ok(match asset {
            TrustLineAsset::Asset(asset) => match wire::Asset::try_from(asset)? {
                wire::Asset::Native => Self::Native,
                wire::Asset::CreditAlphanum4(a) => Self::CreditAlphanum4(a),
                wire::Asset::CreditAlphanum12(a) => Self::CreditAlphanum12(a),
            },
            TrustLineAsset::PoolShare(pool_id) => Self::PoolShare(wire::PoolId(wire::Hash(*pool_id))),
        })
    }
}

impl TryFrom<wire::TrustLineAsset> for TrustLineAsset {
    type Error = XdrError;

    fn try_from(asset: wire::TrustLineAsset) -> Result<Self, XdrError> {
        let asset = match asset {
            wire::TrustLineAsset::Native => wire::Asset::Native,
            wire::TrustLineAsset::CreditAlphanum4(a) => wire::Asset::CreditAlphanum4(a),
            wire::TrustLineAsset::CreditAlphanum12(a) => wire::Asset::CreditAlphanum12(a),
            wire::TrustLineAsset::PoolShare(pool_id) => return Ok(Self::PoolShare(pool_id.0 .0)),
        };
        asset.try_into().map(Self::Asset)
    }
}

// ---------------------------------------------------------------------------
// Predicates & claimants
// ---------------------------------------------------------------------------

impl TryFrom<&ClaimPredicate> for wire::ClaimPredicate {
    type Error = XdrError;

    fn try_from(predicate: &ClaimPredicate) -> Result<Self, XdrError> {
        let children = |ty: &'static str, items: &[ClaimPredicate]| {
            let items = each(items, wire::ClaimPredicate::try_from)?;
            vec_m::<_, 2>(ty, items)
        };
        Ok(match predicate {
            ClaimPredicate::Unconditional => Self::Unconditional,
            ClaimPredicate::And(items) => Self::And(children("ClaimPredicate.andPredicates", items)?),
            ClaimPredicate::Or(items) => Self::Or(children("ClaimPredicate.orPredicates", items)?),
            ClaimPredicate::Not(child) => Self::Not(
                child
                    .as_deref()
                    .map(wire::ClaimPredicate::try_from)
                    .transpose()?
                    .map(Box::new),
            ),
            ClaimPredicate::BeforeAbsoluteTime(t) => Self::BeforeAbsoluteTime(*t),
            ClaimPredicate::BeforeRelativeTime(t) => Self::BeforeRelativeTime(*t),
        })
    }
}

/// Wire predicate at nesting level `depth` (1 for a claimant's root).
fn predicate(node: wire::ClaimPredicate, depth: usize) -> Result<ClaimPredicate, XdrError> {
    check_depth("ClaimPredicate", depth)?;
    let children = |items: VecM<wire::ClaimPredicate, 2>| {
        each(Vec::from(items), |child| predicate(child, depth + 1))
    };
    Ok(match node {
        wire::ClaimPredicate::Unconditional => ClaimPredicate::Unconditional,
        wire::ClaimPredicate::And(items) => ClaimPredicate::And(children(items)?),
        wire::ClaimPredicate::Or(items) => ClaimPredicate::Or(children(items)?),
        wire::ClaimPredicate::Not(child) => ClaimPredicate::Not(
            child
                .map(|child| predicate(*child, depth + 1))
                .transpose()?
                .map(Box::new),
        ),
        wire::ClaimPredicate::BeforeAbsoluteTime(t) => ClaimPredicate::BeforeAbsoluteTime(t),
        wire::ClaimPredicate::BeforeRelativeTime(t) => ClaimPredicate::BeforeRelativeTime(t),
    })
}

impl TryFrom<&Claimant> for wire::Claimant {
    type Error = XdrError;

    fn try_from(claimant: &Claimant) -> Result<Self, XdrError> {
        Ok(Self::ClaimantTypeV0(wire::ClaimantV0 {
            destination: (&claimant.destination).into(),
            predicate: (&claimant.predicate).try_into()?,
        }))
    }
}

impl TryFrom<wire::Claimant> for Claimant {
    type Error = XdrError;

    fn try_from(claimant: wire::Claimant) -> Result<Self, XdrError> {
        let wire::Claimant::ClaimantTypeV0(v0) = claimant;
        Ok(Self {
            destination: v0.destination.into(),
            predicate: predicate(v0.predicate, 1)?,
        })
    }
}

impl From<&ClaimableBalanceId> for wire::ClaimableBalanceId {
    fn from(id: &ClaimableBalanceId) -> Self {
        let ClaimableBalanceId::V0(hash) = id;
        Self::ClaimableBalanceIdTypeV0(wire::Hash(*hash))
    }
}

impl From<wire::ClaimableBalanceId> for ClaimableBalanceId {
    fn from(id: wire::ClaimableBalanceId) -> Self {
        let wire::ClaimableBalanceId::ClaimableBalanceIdTypeV0(hash) = id;
        Self::V0(hash.0)
    }
}

// ---------------------------------------------------------------------------
// Memo & preconditions
// ---------------------------------------------------------------------------

impl TryFrom<&Memo> for wire::Memo {
    type Error = XdrError;

    fn try_from(memo: &Memo) -> Result<Self, XdrError> {
        Ok(match memo {
            Memo::None => Self::None,
            Memo::Text(text) => Self::Text(string_m("Memo.text", text)?),
            Memo::Id(id) => Self::Id(*id),
            Memo::Hash(hash) => Self::Hash(wire::Hash(*hash)),
            Memo::Return(hash) => Self::Return(wire::Hash(*hash)),
        })
    }
}

impl From<wire::Memo> for Memo {
    fn from(memo: wire::Memo) -> Self {
        match memo {
            wire::Memo::None => Self::None,
            wire::Memo::Text(text) => Self::Text(text.into()),
            wire::Memo::Id(id) => Self::Id(id),
            wire::Memo::Hash(hash) => Self::Hash(hash.0),
            wire::Memo::Return(hash) => Self::Return(hash.0),
        }
    }
}

impl From<TimeBounds> for wire::TimeBounds {
    fn from(bounds: TimeBounds) -> Self {
        Self {
            min_time: wire::TimePoint(bounds.min_time),
            max_time: wire::TimePoint(bounds.max_time),
        }
    }
}

impl From<wire::TimeBounds> for TimeBounds {
    fn from(bounds: wire::TimeBounds) -> Self {
        Self {
            min_time: bounds.min_time.0,
            max_time: bounds.max_time.0,
        }
    }
}

impl TryFrom<&Preconditions> for wire::Preconditions {
    type Error = XdrError;

    fn try_from(cond: &Preconditions) -> Result<Self, XdrError> {
        Ok(match cond {
            Preconditions::None => Self::None,
            Preconditions::Time(bounds) => Self::Time((*bounds).into()),
            Preconditions::V2(v2) => Self::V2(wire::PreconditionsV2 {
                time_bounds: v2.time_bounds.map(Into::into),
                ledger_bounds: v2.ledger_bounds.map(|b| wire::LedgerBounds {
                    min_ledger: b.min_ledger,
                    max_ledger: b.max_ledger,
                }),
                min_seq_num: v2.min_seq_num.map(wire::SequenceNumber),
                min_seq_age: wire::Duration(v2.min_seq_age),
                min_seq_ledger_gap: v2.min_seq_ledger_gap,
                extra_signers: vec_m(
                    "PreconditionsV2.extraSigners",
                    each(&v2.extra_signers, wire::SignerKey::try_from)?,
                )?,
            }),
        })
    }
}

impl From<wire::Preconditions> for Preconditions {
    fn from(cond: wire::Preconditions) -> Self {
        match cond {
            wire::Preconditions::None => Self::None,
            wire::Preconditions::Time(bounds) => Self::Time(bounds.into()),
            wire::Preconditions::V2(v2) => Self::V2(PreconditionsV2 {
                time_bounds: v2.time_bounds.map(Into::into),
                ledger_bounds: v2.ledger_bounds.map(|b| LedgerBounds {
                    min_ledger: b.min_ledger,
                    max_ledger: b.max_ledger,
                }),
                min_seq_num: v2.min_seq_num.map(|seq| seq.0),
                min_seq_age: v2.min_seq_age.0,
                min_seq_ledger_gap: v2.min_seq_ledger_gap,
                extra_signers: Vec::from(v2.extra_signers)
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Transactions & envelopes
// ---------------------------------------------------------------------------

impl TryFrom<&DecoratedSignature> for wire::DecoratedSignature {
    type Error = XdrError;

    fn try_from(sig: &DecoratedSignature) -> Result<Self, XdrError> {
        Ok(Self {
            hint: wire::SignatureHint(sig.hint),
            signature: wire::Signature(bytes_m("DecoratedSignature.signature", &sig.signature)?),
        })
    }
}

impl From<wire::DecoratedSignature> for DecoratedSignature {
    fn from(sig: wire::DecoratedSignature) -> Self {
        Self {
            hint: sig.hint.0,
            signature: sig.signature.0.into(),
        }
    }
}

fn signatures<const MAX: u32>(
    signatures: &[DecoratedSignature],
) -> Result<VecM<wire::DecoratedSignature, MAX>, XdrError> {
    vec_m("signatures", each(signatures, wire::DecoratedSignature::try_from)?)
}

impl TryFrom<&Transaction> for wire::Transaction {
    type Error = XdrError;

    fn try_from(tx: &Transaction) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: (&tx.source_account).into(),
            fee: tx.fee,
            seq_num: wire::SequenceNumber(tx.seq_num),
            cond: (&tx.cond).try_into()?,
            memo: (&tx.memo).try_into()?,
            operations: vec_m(
                "Transaction.operations",
                each(&tx.operations, wire::Operation::try_from)?,
            )?,
            ext: match &tx.soroban_data {
                None => wire::TransactionExt::V0,
                Some(data) => wire::TransactionExt::V1(data.try_into()?),
            },
        })
    }
}

impl TryFrom<wire::Transaction> for Transaction {
    type Error = XdrError;

    fn try_from(tx: wire::Transaction) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: tx.source_account.into(),
            fee: tx.fee,
            seq_num: tx.seq_num.0,
            cond: tx.cond.into(),
            memo: tx.memo.into(),
            operations: each(Vec::from(tx.operations), Operation::try_from)?,
            soroban_data: match tx.ext {
                wire::TransactionExt::V0 => None,
                wire::TransactionExt::V1(data) => Some(data.try_into()?),
            },
        })
    }
}

impl TryFrom<&TransactionV1Envelope> for wire::TransactionV1Envelope {
    type Error = XdrError;

    fn try_from(env: &TransactionV1Envelope) -> Result<Self, XdrError> {
        Ok(Self {
            tx: (&env.tx).try_into()?,
            signatures: signatures(&env.signatures)?,
        })
    }
}

impl TryFrom<wire::TransactionV1Envelope> for TransactionV1Envelope {
    type Error = XdrError;

    fn try_from(env: wire::TransactionV1Envelope) -> Result<Self, XdrError> {
        Ok(Self {
            tx: env.tx.try_into()?,
            signatures: Vec::from(env.signatures).into_iter().map(Into::into).collect(),
        })
    }
}

impl TryFrom<&FeeBumpTransaction> for wire::FeeBumpTransaction {
    type Error = XdrError;

    fn try_from(tx: &FeeBumpTransaction) -> Result<Self, XdrError> {
        Ok(Self {
            fee_source: (&tx.fee_source).into(),
            fee: tx.fee,
            inner_tx: wire::FeeBumpTransactionInnerTx::Tx((&tx.inner_tx).try_into()?),
            ext: wire::FeeBumpTransactionExt::V0,
        })
    }
}

impl TryFrom<wire::FeeBumpTransaction> for FeeBumpTransaction {
    type Error = XdrError;

    fn try_from(tx: wire::FeeBumpTransaction) -> Result<Self, XdrError> {
        let wire::FeeBumpTransactionInnerTx::Tx(inner) = tx.inner_tx;
        Ok(Self {
            fee_source: tx.fee_source.into(),
            fee: tx.fee,
            inner_tx: inner.try_into()?,
        })
    }
}

impl TryFrom<&TransactionEnvelope> for wire::TransactionEnvelope {
    type Error = XdrError;

    fn try_from(envelope: &TransactionEnvelope) -> Result<Self, XdrError> {
        Ok(match envelope {
            TransactionEnvelope::Tx(env) => Self::Tx(env.try_into()?),
            TransactionEnvelope::FeeBump(env) => {
                Self::TxFeeBump(wire::FeeBumpTransactionEnvelope {
                    tx: (&env.tx).try_into()?,
                    signatures: signatures(&env.signatures)?,
                })
            }
        })
    }
}

impl TryFrom<wire::TransactionEnvelope> for TransactionEnvelope {
    type Error = XdrError;

    fn try_from(envelope: wire::TransactionEnvelope) -> Result<Self, XdrError> {
        match envelope {
            wire::TransactionEnvelope::Tx(env) => env.try_into().map(Self::Tx),
            wire::TransactionEnvelope::TxFeeBump(env) => {
                Ok(Self::FeeBump(FeeBumpTransactionEnvelope {
                    tx: env.tx.try_into()?,
                    signatures: Vec::from(env.signatures).into_iter().map(Into::into).collect(),
                }))
            }
            other @ wire::TransactionEnvelope::TxV0(_) => {
                Err(unsupported("TransactionEnvelope", other.name()))
            }
        }
    }
}

/// The tagged transaction a signer signs: the inner transaction of a plain
/// envelope, or the whole fee-bump transaction of a fee bump.
pub(super) fn tagged_transaction(
    envelope: &TransactionEnvelope,
) -> Result<wire::TransactionSignaturePayloadTaggedTransaction, XdrError> {
    use wire::TransactionSignaturePayloadTaggedTransaction as Tagged;
    Ok(match envelope {
        TransactionEnvelope::Tx(env) => Tagged::Tx((&env.tx).try_into()?),
        TransactionEnvelope::FeeBump(env) => Tagged::TxFeeBump((&env.tx).try_into()?),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{Limits, ReadXdr, WriteXdr};

    fn account(byte: u8) -> AccountId {
        AccountId([byte; 32])
    }

    #[test]
    fn muxed_account_wire_form() {
        let muxed = MuxedAccount::MuxedEd25519 {
            id: 9,
            ed25519: [1u8; 32],
        };
        let bytes = wire::MuxedAccount::from(&muxed).to_xdr(Limits::none()).unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 1, 0]);
        assert_eq!(&bytes[4..12], &9u64.to_be_bytes());
        let back = wire::MuxedAccount::from_xdr(&bytes, Limits::none()).unwrap();
        assert_eq!(MuxedAccount::from(back), muxed);
    }

    #[test]
    fn asset_code_must_match_variant() {
        let short12 = wire::Asset::CreditAlphanum12(wire::AlphaNum12 {
            asset_code: wire::AssetCode12(*b"USD\0\0\0\0\0\0\0\0\0"),
            issuer: (&account(0)).into(),
        });
        assert!(matches!(
            Asset::try_from(short12),
            Err(XdrError::InvalidValue { ty: "Asset", .. })
        ));

        let asset = Asset::issued("USDCOIN", account(0)).unwrap();
        let wire = wire::Asset::try_from(&asset).unwrap();
        assert_eq!(Asset::try_from(wire).unwrap(), asset);

        let bad = Asset::CreditAlphanum4(AlphaNum4 {
            asset_code: *b"U$D\0",
            issuer: account(0),
        });
        assert!(wire::Asset::try_from(&bad).is_err());
    }

    #[test]
    fn pool_share_forms() {
        let line = ChangeTrustAsset::PoolShare(ConstantProductParameters {
            asset_a: Asset::Native,
            asset_b: Asset::issued("USD", account(3)).unwrap(),
            fee: 30,
        });
        let wire = wire::ChangeTrustAsset::try_from(&line).unwrap();
        assert_eq!(ChangeTrustAsset::try_from(wire).unwrap(), line);

        let pool = TrustLineAsset::PoolShare([4u8; 32]);
        let wire = wire::TrustLineAsset::try_from(&pool).unwrap();
        assert_eq!(TrustLineAsset::try_from(wire).unwrap(), pool);
    }

    #[test]
    fn predicate_tree_roundtrips() {
        let tree = ClaimPredicate::And(vec![
            ClaimPredicate::Not(Some(Box::new(ClaimPredicate::Unconditional))),
            ClaimPredicate::Or(vec![
                ClaimPredicate::BeforeAbsoluteTime(1_700_000_000),
                ClaimPredicate::BeforeRelativeTime(3600),
            ]),
        ]);
        let wire = wire::ClaimPredicate::try_from(&tree).unwrap();
        assert_eq!(predicate(wire, 1).unwrap(), tree);

        let three = ClaimPredicate::Or(vec![ClaimPredicate::Unconditional; 3]);
        assert!(matches!(
            wire::ClaimPredicate::try_from(&three),
            Err(XdrError::LengthExceeded { max: 2, len: 3, .. })
        ));
    }

    #[test]
    fn deeply_nested_predicate_is_rejected() {
        let mut tree = ClaimPredicate::Unconditional;
        for _ in 0..64 {
            tree = ClaimPredicate::Not(Some(Box::new(tree)));
        }
        let wire = wire::ClaimPredicate::try_from(&tree).unwrap();
        assert!(matches!(
            predicate(wire, 1),
            Err(XdrError::InvalidValue { ty: "ClaimPredicate", .. })
        ));
    }

    #[test]
    fn memo_text_is_bytes() {
        let memo = Memo::Text(vec![0xff, 0xfe, b'a']);
        let wire = wire::Memo::try_from(&memo).unwrap();
        let bytes = wire.to_xdr(Limits::none()).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 1, 0, 0, 0, 3, 0xff, 0xfe, b'a', 0]);
        let back = wire::Memo::from_xdr(&bytes, Limits::none()).unwrap();
        assert_eq!(Memo::from(back), memo);

        assert!(matches!(
            wire::Memo::try_from(&Memo::Text(vec![b'x'; 29])),
            Err(XdrError::LengthExceeded { max: 28, .. })
        ));
    }

    #[test]
    fn legacy_envelope_is_unsupported() {
        let legacy = wire::TransactionEnvelope::TxV0(wire::TransactionV0Envelope {
            tx: wire::TransactionV0 {
                source_account_ed25519: wire::Uint256([0u8; 32]),
                fee: 100,
                seq_num: wire::SequenceNumber(1),
                time_bounds: None,
                memo: wire::Memo::None,
                operations: VecM::default(),
                ext: wire::TransactionV0Ext::V0,
            },
            signatures: VecM::default(),
        });
        assert!(matches!(
            TransactionEnvelope::try_from(legacy),
            Err(XdrError::Unsupported { ty: "TransactionEnvelope", .. })
        ));
    }

    #[test]
    fn signatures_are_capped() {
        let sig = DecoratedSignature {
            hint: [0; 4],
            signature: vec![0; 64],
        };
        assert!(signatures::<20>(&vec![sig.clone(); 20]).is_ok());
        assert_eq!(
            signatures::<20>(&vec![sig; 21]).unwrap_err(),
            XdrError::LengthExceeded {
                ty: "signatures",
                max: 20,
                len: 21
            }
        );
    }
}
