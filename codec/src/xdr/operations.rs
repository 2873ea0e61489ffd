//! Wire forms of operations.

use stellar_xdr::curr::{self as wire, VecM};

use super::{bytes_m, each, invalid, string_m, vec_m};
use crate::error::XdrError;
use crate::model::*;

fn path<const MAX: u32>(ty: &'static str, path: &[Asset]) -> Result<VecM<wire::Asset, MAX>, XdrError> {
    vec_m(ty, each(path, wire::Asset::try_from)?)
}

fn authorize(value: u32) -> Result<u32, XdrError> {
    if value > MAX_ALLOW_TRUST_AUTHORIZE {
        return Err(invalid(
            "AllowTrustOp.authorize",
            format!("expected 0, 1 or 2, got {}", value),
        ));
    }
    Ok(value)
}

fn pool_id(id: &Hash) -> wire::PoolId {
    wire::PoolId(wire::Hash(*id))
}

// ---------------------------------------------------------------------------
// Model → wire
// ---------------------------------------------------------------------------

impl TryFrom<&SetOptionsOp> for wire::SetOptionsOp {
    type Error = XdrError;

    fn try_from(op: &SetOptionsOp) -> Result<Self, XdrError> {
        Ok(Self {
            inflation_dest: op.inflation_dest.as_ref().map(Into::into),
            clear_flags: op.clear_flags,
            set_flags: op.set_flags,
            master_weight: op.master_weight,
            low_threshold: op.low_threshold,
            med_threshold: op.med_threshold,
            high_threshold: op.high_threshold,
            home_domain: op
                .home_domain
                .as_deref()
                .map(|domain| string_m("SetOptionsOp.homeDomain", domain).map(wire::String32))
                .transpose()?,
            signer: op
                .signer
                .as_ref()
                .map(|signer| -> Result<_, XdrError> {
                    Ok(wire::Signer {
                        key: (&signer.key).try_into()?,
                        weight: signer.weight,
                    })
                })
                .transpose()?,
        })
    }
}

impl TryFrom<&RevokeSponsorshipOp> for wire::RevokeSponsorshipOp {
    type Error = XdrError;

    fn try_from(op: &RevokeSponsorshipOp) -> Result<Self, XdrError> {
        Ok(match op {
            RevokeSponsorshipOp::LedgerEntry(key) => Self::LedgerEntry(key.try_into()?),
            RevokeSponsorshipOp::Signer {
                account_id,
                signer_key,
            } => Self::Signer(wire::RevokeSponsorshipOpSigner {
                account_id: account_id.into(),
                signer_key: signer_key.try_into()?,
            }),
        })
    }
}

impl TryFrom<&OperationBody> for wire::OperationBody {
    type Error = XdrError;

    fn try_from(body: &OperationBody) -> Result<Self, XdrError> {
        Ok(match body {
            OperationBody::CreateAccount(op) => Self::CreateAccount(wire::CreateAccountOp {
                destination: (&op.destination).into(),
                starting_balance: op.starting_balance,
            }),
            OperationBody::Payment(op) => Self::Payment(wire::PaymentOp {
                destination: (&op.destination).into(),
                asset: (&op.asset).try_into()?,
                amount: op.amount,
            }),
            OperationBody::PathPaymentStrictReceive(op) => {
                Self::PathPaymentStrictReceive(wire::PathPaymentStrictReceiveOp {
                    send_asset: (&op.send_asset).try_into()?,
                    send_max: op.send_max,
                    destination: (&op.destination).into(),
                    dest_asset: (&op.dest_asset).try_into()?,
                    dest_amount: op.dest_amount,
                    path: path("PathPaymentStrictReceiveOp.path", &op.path)?,
                })
            }
            OperationBody::ManageSellOffer(op) => Self::ManageSellOffer(wire::ManageSellOfferOp {
                selling: (&op.selling).try_into()?,
                buying: (&op.buying).try_into()?,
                amount: op.amount,
                price: op.price.into(),
                offer_id: op.offer_id,
            }),
            OperationBody::CreatePassiveSellOffer(op) => {
                Self::CreatePassiveSellOffer(wire::CreatePassiveSellOfferOp {
                    selling: (&op.selling).try_into()?,
                    buying: (&op.buying).try_into()?,
                    amount: op.amount,
                    price: op.price.into(),
                })
            }
            OperationBody::SetOptions(op) => Self::SetOptions(op.try_into()?),
            OperationBody::ChangeTrust(op) => Self::ChangeTrust(wire::ChangeTrustOp {
                line: (&op.line).try_into()?,
                limit: op.limit,
            }),
            OperationBody::AllowTrust(op) => Self::AllowTrust(wire::AllowTrustOp {
                trustor: (&op.trustor).into(),
                asset: (&op.asset).try_into()?,
                authorize: authorize(op.authorize)?,
            }),
            OperationBody::AccountMerge(destination) => Self::AccountMerge(destination.into()),
            OperationBody::Inflation => Self::Inflation,
            OperationBody::ManageData(op) => Self::ManageData(wire::ManageDataOp {
                data_name: wire::String64(string_m("ManageDataOp.dataName", &op.data_name)?),
                data_value: op
                    .data_value
                    .as_deref()
                    .map(|value| bytes_m("ManageDataOp.dataValue", value).map(wire::DataValue))
                    .transpose()?,
            }),
            OperationBody::BumpSequence(op) => Self::BumpSequence(wire::BumpSequenceOp {
                bump_to: wire::SequenceNumber(op.bump_to),
            }),
            OperationBody::ManageBuyOffer(op) => Self::ManageBuyOffer(wire::ManageBuyOfferOp {
                selling: (&op.selling).try_into()?,
                buying: (&op.buying).try_into()?,
                buy_amount: op.buy_amount,
                price: op.price.into(),
                offer_id: op.offer_id,
            }),
            OperationBody::PathPaymentStrictSend(op) => {
                Self::PathPaymentStrictSend(wire::PathPaymentStrictSendOp {
                    send_asset: (&op.send_asset).try_into()?,
                    send_amount: op.send_amount,
                    destination: (&op.destination).into(),
                    dest_asset: (&op.dest_asset).try_into()?,
                    dest_min: op.dest_min,
                    path: path("PathPaymentStrictSendOp.path", &op.path)?,
                })
            }
            OperationBody::CreateClaimableBalance(op) => {
                Self::CreateClaimableBalance(wire::CreateClaimableBalanceOp {
                    asset: (&op.asset).try_into()?,
                    amount: op.amount,
                    claimants: vec_m(
                        "CreateClaimableBalanceOp.claimants",
                        each(&op.claimants, wire::Claimant::try_from)?,
                    )?,
                })
            }
            OperationBody::ClaimClaimableBalance(op) => {
                Self::ClaimClaimableBalance(wire::ClaimClaimableBalanceOp {
                    balance_id: (&op.balance_id).into(),
                })
            }
            OperationBody::BeginSponsoringFutureReserves(op) => {
                Self::BeginSponsoringFutureReserves(wire::BeginSponsoringFutureReservesOp {
                    sponsored_id: (&op.sponsored_id).into(),
                })
            }
            OperationBody::EndSponsoringFutureReserves => Self::EndSponsoringFutureReserves,
            OperationBody::RevokeSponsorship(op) => Self::RevokeSponsorship(op.try_into()?),
            OperationBody::Clawback(op) => Self::Clawback(wire::ClawbackOp {
                asset: (&op.asset).try_into()?,
                from: (&op.from).into(),
                amount: op.amount,
            }),
            OperationBody::ClawbackClaimableBalance(op) => {
                Self::ClawbackClaimableBalance(wire::ClawbackClaimableBalanceOp {
                    balance_id: (&op.balance_id).into(),
                })
            }
            OperationBody::SetTrustLineFlags(op) => {
                Self::SetTrustLineFlags(wire::SetTrustLineFlagsOp {
                    trustor: (&op.trustor).into(),
                    asset: (&op.asset).try_into()?,
                    clear_flags: op.clear_flags,
                    set_flags: op.set_flags,
                })
            }
            OperationBody::LiquidityPoolDeposit(op) => {
                Self::LiquidityPoolDeposit(wire::LiquidityPoolDepositOp {
                    liquidity_pool_id: pool_id(&op.liquidity_pool_id),
                    max_amount_a: op.max_amount_a,
                    max_amount_b: op.max_amount_b,
                    min_price: op.min_price.into(),
                    max_price: op.max_price.into(),
                })
            }
            OperationBody::LiquidityPoolWithdraw(op) => {
                Self::LiquidityPoolWithdraw(wire::LiquidityPoolWithdrawOp {
                    liquidity_pool_id: pool_id(&op.liquidity_pool_id),
                    amount: op.amount,
                    min_amount_a: op.min_amount_a,
                    min_amount_b: op.min_amount_b,
                })
            }
            OperationBody::InvokeHostFunction(op) => {
                Self::InvokeHostFunction(wire::InvokeHostFunctionOp {
                    host_function: (&op.host_function).try_into()?,
                    auth: vec_m(
                        "InvokeHostFunctionOp.auth",
                        each(&op.auth, wire::SorobanAuthorizationEntry::try_from)?,
                    )?,
                })
            }
            OperationBody::ExtendFootprintTtl(op) => {
                Self::ExtendFootprintTtl(wire::ExtendFootprintTtlOp {
                    ext: wire::ExtensionPoint::V0,
                    extend_to: op.extend_to,
                })
            }
            OperationBody::RestoreFootprint => Self::RestoreFootprint(wire::RestoreFootprintOp {
                ext: wire::ExtensionPoint::V0,
            }),
        })
    }
}

impl TryFrom<&Operation> for wire::Operation {
    type Error = XdrError;

    fn try_from(op: &Operation) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: op.source_account.as_ref().map(Into::into),
            body: (&op.body).try_into()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Wire → model
// ---------------------------------------------------------------------------

impl TryFrom<wire::SetOptionsOp> for SetOptionsOp {
    type Error = XdrError;

    fn try_from(op: wire::SetOptionsOp) -> Result<Self, XdrError> {
        Ok(Self {
            inflation_dest: op.inflation_dest.map(Into::into),
            clear_flags: op.clear_flags,
            set_flags: op.set_flags,
            master_weight: op.master_weight,
            low_threshold: op.low_threshold,
            med_threshold: op.med_threshold,
            high_threshold: op.high_threshold,
            home_domain: op.home_domain.map(|domain| domain.0.into()),
            signer: op.signer.map(|signer| Signer {
                key: signer.key.into(),
                weight: signer.weight,
            }),
        })
    }
}

impl TryFrom<wire::OperationBody> for OperationBody {
    type Error = XdrError;

    fn try_from(body: wire::OperationBody) -> Result<Self, XdrError> {
        use wire::OperationBody as Wire;
        Ok(match body {
            Wire::CreateAccount(op) => Self::CreateAccount(CreateAccountOp {
                destination: op.destination.into(),
                starting_balance: op.starting_balance,
            }),
            Wire::Payment(op) => Self::Payment(PaymentOp {
                destination: op.destination.into(),
                asset: op.asset.try_into()?,
                amount: op.amount,
            }),
            Wire::PathPaymentStrictReceive(op) => {
                Self::PathPaymentStrictReceive(PathPaymentStrictReceiveOp {
                    send_asset: op.send_asset.try_into()?,
                    send_max: op.send_max,
                    destination: op.destination.into(),
                    dest_asset: op.dest_asset.try_into()?,
                    dest_amount: op.dest_amount,
                    path: each(Vec::from(op.path), Asset::try_from)?,
                })
            }
            Wire::ManageSellOffer(op) => Self::ManageSellOffer(ManageSellOfferOp {
                selling: op.selling.try_into()?,
                buying: op.buying.try_into()?,
                amount: op.amount,
                price: op.price.into(),
                offer_id: op.offer_id,
            }),
            Wire::CreatePassiveSellOffer(op) => {
                Self::CreatePassiveSellOffer(CreatePassiveSellOfferOp {
                    selling: op.selling.try_into()?,
                    buying: op.buying.try_into()?,
                    amount: op.amount,
                    price: op.price.into(),
                })
            }
            Wire::SetOptions(op) => Self::SetOptions(op.try_into()?),
            Wire::ChangeTrust(op) => Self::ChangeTrust(ChangeTrustOp {
                line: op.line.try_into()?,
                limit: op.limit,
            }),
            Wire::AllowTrust(op) => Self::AllowTrust(AllowTrustOp {
                trustor: op.trustor.into(),
                asset: op.asset.try_into()?,
                authorize: authorize(op.authorize)?,
            }),
            Wire::AccountMerge(destination) => Self::AccountMerge(destination.into()),
            Wire::Inflation => Self::Inflation,
            Wire::ManageData(op) => Self::ManageData(ManageDataOp {
                data_name: op.data_name.0.into(),
                data_value: op.data_value.map(|value| value.0.into()),
            }),
            Wire::BumpSequence(op) => Self::BumpSequence(BumpSequenceOp {
                bump_to: op.bump_to.0,
            }),
            Wire::ManageBuyOffer(op) => Self::ManageBuyOffer(ManageBuyOfferOp {
                selling: op.selling.try_into()?,
                buying: op.buying.try_into()?,
                buy_amount: op.buy_amount,
                price: op.price.into(),
                offer_id: op.offer_id,
            }),
            Wire::PathPaymentStrictSend(op) => Self::PathPaymentStrictSend(PathPaymentStrictSendOp {
                send_asset: op.send_asset.try_into()?,
                send_amount: op.send_amount,
                destination: op.destination.into(),
                dest_asset: op.dest_asset.try_into()?,
                dest_min: op.dest_min,
                path: each(Vec::from(op.path), Asset::try_from)?,
            }),
            Wire::CreateClaimableBalance(op) => {
                Self::CreateClaimableBalance(CreateClaimableBalanceOp {
                    asset: op.asset.try_into()?,
                    amount: op.amount,
                    claimants: each(Vec::from(op.claimants), Claimant::try_from)?,
                })
            }
            Wire::ClaimClaimableBalance(op) => {
                Self::ClaimClaimableBalance(ClaimClaimableBalanceOp {
                    balance_id: op.balance_id.into(),
                })
            }
            Wire::BeginSponsoringFutureReserves(op) => {
                Self::BeginSponsoringFutureReserves(BeginSponsoringFutureReservesOp {
                    sponsored_id: op.sponsored_id.into(),
                })
            }
            Wire::EndSponsoringFutureReserves => Self::EndSponsoringFutureReserves,
            Wire::RevokeSponsorship(wire::RevokeSponsorshipOp::LedgerEntry(key)) => {
                Self::RevokeSponsorship(RevokeSponsorshipOp::LedgerEntry(key.try_into()?))
            }
            Wire::RevokeSponsorship(wire::RevokeSponsorshipOp::Signer(signer)) => {
                Self::RevokeSponsorship(RevokeSponsorshipOp::Signer {
                    account_id: signer.account_id.into(),
                    signer_key: signer.signer_key.into(),
                })
            }
            Wire::Clawback(op) => Self::Clawback(ClawbackOp {
                asset: op.asset.try_into()?,
                from: op.from.into(),
                amount: op.amount,
            }),
            Wire::ClawbackClaimableBalance(op) => {
                Self::ClawbackClaimableBalance(ClawbackClaimableBalanceOp {
                    balance_id: op.balance_id.into(),
                })
            }
            Wire::SetTrustLineFlags(op) => Self::SetTrustLineFlags(SetTrustLineFlagsOp {
                trustor: op.trustor.into(),
                asset: op.asset.try_into()?,
                clear_flags: op.clear_flags,
                set_flags: op.set_flags,
            }),
            Wire::LiquidityPoolDeposit(op) => Self::LiquidityPoolDeposit(LiquidityPoolDepositOp {
                liquidity_pool_id: op.liquidity_pool_id.0 .0,
                max_amount_a: op.max_amount_a,
                max_amount_b: op.max_amount_b,
                min_price: op.min_price.into(),
                max_price: op.max_price.into(),
            }),
            Wire::LiquidityPoolWithdraw(op) => {
                Self::LiquidityPoolWithdraw(LiquidityPoolWithdrawOp {
                    liquidity_pool_id: op.liquidity_pool_id.0 .0,
                    amount: op.amount,
                    min_amount_a: op.min_amount_a,
                    min_amount_b: op.min_amount_b,
                })
            }
            Wire::InvokeHostFunction(op) => Self::InvokeHostFunction(InvokeHostFunctionOp {
                host_function: op.host_function.try_into()?,
                auth: each(Vec::from(op.auth), SorobanAuthorizationEntry::try_from)?,
            }),
            Wire::ExtendFootprintTtl(op) => Self::ExtendFootprintTtl(ExtendFootprintTtlOp {
                extend_to: op.extend_to,
            }),
            Wire::RestoreFootprint(_) => Self::RestoreFootprint,
        })
    }
}

impl TryFrom<wire::Operation> for Operation {
    type Error = XdrError;

    fn try_from(op: wire::Operation) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: op.source_account.map(Into::into),
            body: op.body.try_into()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{Limits, WriteXdr};

    fn account(byte: u8) -> AccountId {
        AccountId([byte; 32])
    }

    fn roundtrip(body: OperationBody) {
        let op = Operation {
            source_account: Some(MuxedAccount::Ed25519([9u8; 32])),
            body,
        };
        let wire = wire::Operation::try_from(&op).unwrap();
        assert_eq!(Operation::try_from(wire).unwrap(), op);
    }

    #[test]
    fn payment_wire_layout() {
        let op = Operation {
            source_account: None,
            body: OperationBody::Payment(PaymentOp {
                destination: MuxedAccount::Ed25519([1u8; 32]),
                asset: Asset::Native,
                amount: 1_000_000_000,
            }),
        };
        let bytes = wire::Operation::try_from(&op)
            .unwrap()
            .to_xdr(Limits::none())
            .unwrap();
        // no source, type 1, key type 0, key, native, amount
        assert_eq!(bytes.len(), 4 + 4 + 4 + 32 + 4 + 8);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 1]);
        assert_eq!(&bytes[48..], &1_000_000_000i64.to_be_bytes());
    }

    #[test]
    fn bodies_roundtrip() {
        let usd = Asset::issued("USD", account(2)).unwrap();
        roundtrip(OperationBody::SetOptions(SetOptionsOp {
            clear_flags: Some(1),
            home_domain: Some("example.com".into()),
            signer: Some(Signer {
                key: SignerKey::HashX([5u8; 32]),
                weight: 1,
            }),
            ..Default::default()
        }));
        roundtrip(OperationBody::PathPaymentStrictSend(PathPaymentStrictSendOp {
            send_asset: Asset::Native,
            send_amount: 10,
            destination: MuxedAccount::MuxedEd25519 {
                id: 3,
                ed25519: [3u8; 32],
            },
            dest_asset: usd,
            dest_min: 9,
            path: vec![Asset::issued("EURO1", account(4)).unwrap()],
        }));
        roundtrip(OperationBody::ManageData(ManageDataOp {
            data_name: vec![b'k', 0xc3],
            data_value: Some(vec![0, 1, 2]),
        }));
        roundtrip(OperationBody::RevokeSponsorship(RevokeSponsorshipOp::Signer {
            account_id: account(6),
            signer_key: SignerKey::PreAuthTx([7u8; 32]),
        }));
        roundtrip(OperationBody::ExtendFootprintTtl(ExtendFootprintTtlOp { extend_to: 5000 }));
        roundtrip(OperationBody::RestoreFootprint);
        roundtrip(OperationBody::Inflation);
    }

    #[test]
    fn allow_trust_authorize_is_bounded() {
        let op = AllowTrustOp {
            trustor: account(1),
            asset: AssetCode::from_code("USD").unwrap(),
            authorize: 3,
        };
        assert!(wire::OperationBody::try_from(&OperationBody::AllowTrust(op.clone())).is_err());

        let mut raw = match wire::OperationBody::try_from(&OperationBody::AllowTrust(AllowTrustOp {
            authorize: 2,
            ..op
        }))
        .unwrap()
        {
            wire::OperationBody::AllowTrust(op) => op,
            other => panic!("unexpected {}", other.name()),
        };
        raw.authorize = 3;
        assert!(matches!(
            OperationBody::try_from(wire::OperationBody::AllowTrust(raw)),
            Err(XdrError::InvalidValue { .. })
        ));
    }

    #[test]
    fn path_and_claimant_bounds() {
        let long_path = OperationBody::PathPaymentStrictReceive(PathPaymentStrictReceiveOp {
            send_asset: Asset::Native,
            send_max: 1,
            destination: MuxedAccount::Ed25519([1u8; 32]),
            dest_asset: Asset::Native,
            dest_amount: 1,
            path: vec![Asset::Native; 6],
        });
        assert!(matches!(
            wire::OperationBody::try_from(&long_path),
            Err(XdrError::LengthExceeded { max: 5, len: 6, .. })
        ));

        let domain = OperationBody::SetOptions(SetOptionsOp {
            home_domain: Some(vec![b'x'; 33]),
            ..Default::default()
        });
        assert!(matches!(
            wire::OperationBody::try_from(&domain),
            Err(XdrError::LengthExceeded { max: 32, .. })
        ));
    }
}
