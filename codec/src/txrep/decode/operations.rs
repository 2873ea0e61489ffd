//! Operation bodies, claim predicates and the asset forms that only appear
//! inside operations.

use super::soroban::{host_function, ledger_key, authorization_entry};
use super::{array, check_depth, ext_v0, optional};
use crate::config::{
    MAX_CLAIMANTS, MAX_DATA_NAME_LEN, MAX_DATA_VALUE_LEN, MAX_HOME_DOMAIN_LEN,
    MAX_PATH_LEN, MAX_PREDICATE_CHILDREN,
};
use crate::error::TxRepError;
use crate::model::*;
use crate::txrep::lines::{join, Fields};

pub(super) fn operation(f: &Fields, p: &str) -> Result<Operation, TxRepError> {
    let source_account = optional(f, &join(p, "sourceAccount"), |f, p| f.muxed_account(p))?;
    let body = join(p, "body");
    Ok(Operation {
        source_account,
        body: operation_body(f, &body)?,
    })
}

fn operation_body(f: &Fields, b: &str) -> Result<OperationBody, TxRepError> {
    let kind = join(b, "type");
    let arm = |name: &str| join(b, name);
    Ok(match f.str(&kind)? {
        "CREATE_ACCOUNT" => {
            let p = arm("createAccountOp");
            OperationBody::CreateAccount(CreateAccountOp {
                destination: f.account_id(&join(&p, "destination"))?,
                starting_balance: f.amount(&join(&p, "startingBalance"))?,
            })
        }
        "PAYMENT" => {
            let p = arm("paymentOp");
            OperationBody::Payment(PaymentOp {
                destination: f.muxed_account(&join(&p, "destination"))?,
                asset: f.asset(&join(&p, "asset"))?,
                amount: f.amount(&join(&p, "amount"))?,
            })
        }
        "PATH_PAYMENT_STRICT_RECEIVE" => {
            let p = arm("pathPaymentStrictReceiveOp");
            OperationBody::PathPaymentStrictReceive(PathPaymentStrictReceiveOp {
                send_asset: f.asset(&join(&p, "sendAsset"))?,
                send_max: f.amount(&join(&p, "sendMax"))?,
                destination: f.muxed_account(&join(&p, "destination"))?,
                dest_asset: f.asset(&join(&p, "destAsset"))?,
                dest_amount: f.amount(&join(&p, "destAmount"))?,
                path: asset_path(f, &join(&p, "path"))?,
            })
        }
        "MANAGE_SELL_OFFER" => {
            let p = arm("manageSellOfferOp");
            OperationBody::ManageSellOffer(ManageSellOfferOp {
                selling: f.asset(&join(&p, "selling"))?,
                buying: f.asset(&join(&p, "buying"))?,
                amount: f.amount(&join(&p, "amount"))?,
                price: price(f, &join(&p, "price"))?,
                offer_id: f.i64(&join(&p, "offerID"))?,
            })
        }
        "CREATE_PASSIVE_SELL_OFFER" => {
            let p = arm("createPassiveSellOfferOp");
            OperationBody::CreatePassiveSellOffer(CreatePassiveSellOfferOp {
                selling: f.asset(&join(&p, "selling"))?,
                buying: f.asset(&join(&p, "buying"))?,
                amount: f.amount(&join(&p, "amount"))?,
                price: price(f, &join(&p, "price"))?,
            })
        }
        "SET_OPTIONS" => OperationBody::SetOptions(set_options(f, &arm("setOptionsOp"))?),
        "CHANGE_TRUST" => {
            let p = arm("changeTrustOp");
            OperationBody::ChangeTrust(ChangeTrustOp {
                line: change_trust_asset(f, &join(&p, "line"))?,
                limit: f.amount(&join(&p, "limit"))?,
            })
        }
        "ALLOW_TRUST" => {
            let p = arm("allowTrustOp");
            let authorize_path = join(&p, "authorize");
            let authorize = f.u32(&authorize_path)?;
            if authorize > MAX_ALLOW_TRUST_AUTHORIZE {
                return Err(TxRepError::invalid(
                    &authorize_path,
                    format!("{} is not one of 0, 1, 2", authorize),
                ));
            }
            OperationBody::AllowTrust(AllowTrustOp {
                trustor: f.account_id(&join(&p, "trustor"))?,
                asset: f.asset_code(&join(&p, "asset"))?,
                authorize,
            })
        }
        "ACCOUNT_MERGE" => OperationBody::AccountMerge(f.muxed_account(&arm("destination"))?),
        "INFLATION" => OperationBody::Inflation,
        "MANAGE_DATA" => {
            let p = arm("manageDataOp");
            OperationBody::ManageData(ManageDataOp {
                data_name: f.text(&join(&p, "dataName"), MAX_DATA_NAME_LEN)?,
                data_value: optional(f, &join(&p, "dataValue"), |f, p| {
                    f.bounded_hex(p, MAX_DATA_VALUE_LEN)
                })?,
            })
        }
        "BUMP_SEQUENCE" => OperationBody::BumpSequence(BumpSequenceOp {
            bump_to: f.i64(&join(&arm("bumpSequenceOp"), "bumpTo"))?,
        }),
        "MANAGE_BUY_OFFER" => {
            let p = arm("manageBuyOfferOp");
            OperationBody::ManageBuyOffer(ManageBuyOfferOp {
                selling: f.asset(&join(&p, "selling"))?,
                buying: f.asset(&join(&p, "buying"))?,
                buy_amount: f.amount(&join(&p, "buyAmount"))?,
                price: price(f, &join(&p, "price"))?,
                offer_id: f.i64(&join(&p, "offerID"))?,
            })
        }
        "PATH_PAYMENT_STRICT_SEND" => {
            let p = arm("pathPaymentStrictSendOp");
            OperationBody::PathPaymentStrictSend(PathPaymentStrictSendOp {
                send_asset: f.asset(&join(&p, "sendAsset"))?,
                send_amount: f.amount(&join(&p, "sendAmount"))?,
                destination: f.muxed_account(&join(&p, "destination"))?,
                dest_asset: f.asset(&join(&p, "destAsset"))?,
                dest_min: f.amount(&join(&p, "destMin"))?,
                path: asset_path(f, &join(&p, "path"))?,
            })
        }
        "CREATE_CLAIMABLE_BALANCE" => {
            let p = arm("createClaimableBalanceOp");
            OperationBody::CreateClaimableBalance(CreateClaimableBalanceOp {
                asset: f.asset(&join(&p, "asset"))?,
                amount: f.amount(&join(&p, "amount"))?,
                claimants: array(f, &join(&p, "claimants"), MAX_CLAIMANTS, claimant)?,
            })
        }
        "CLAIM_CLAIMABLE_BALANCE" => {
            OperationBody::ClaimClaimableBalance(ClaimClaimableBalanceOp {
                balance_id: balance_id(f, &join(&arm("claimClaimableBalanceOp"), "balanceID"))?,
            })
        }
        "BEGIN_SPONSORING_FUTURE_RESERVES" => {
            OperationBody::BeginSponsoringFutureReserves(BeginSponsoringFutureReservesOp {
                sponsored_id: f.account_id(&join(
                    &arm("beginSponsoringFutureReservesOp"),
                    "sponsoredID",
                ))?,
            })
        }
        "END_SPONSORING_FUTURE_RESERVES" => OperationBody::EndSponsoringFutureReserves,
        "REVOKE_SPONSORSHIP" => {
            OperationBody::RevokeSponsorship(revoke_sponsorship(f, &arm("revokeSponsorshipOp"))?)
        }
        "CLAWBACK" => {
            let p = arm("clawbackOp");
            OperationBody::Clawback(ClawbackOp {
                asset: f.asset(&join(&p, "asset"))?,
                from: f.muxed_account(&join(&p, "from"))?,
                amount: f.amount(&join(&p, "amount"))?,
            })
        }
        "CLAWBACK_CLAIMABLE_BALANCE" => {
            OperationBody::ClawbackClaimableBalance(ClawbackClaimableBalanceOp {
                balance_id: balance_id(
                    f,
                    &join(&arm("clawbackClaimableBalanceOp"), "balanceID"),
                )?,
            })
        }
        "SET_TRUST_LINE_FLAGS" => {
            let p = arm("setTrustLineFlagsOp");
            OperationBody::SetTrustLineFlags(SetTrustLineFlagsOp {
                trustor: f.account_id(&join(&p, "trustor"))?,
                asset: f.asset(&join(&p, "asset"))?,
                clear_flags: f.u32(&join(&p, "clearFlags"))?,
                set_flags: f.u32(&join(&p, "setFlags"))?,
            })
        }
        "LIQUIDITY_POOL_DEPOSIT" => {
            let p = arm("liquidityPoolDepositOp");
            OperationBody::LiquidityPoolDeposit(LiquidityPoolDepositOp {
                liquidity_pool_id: f.hex_array(&join(&p, "liquidityPoolID"))?,
                max_amount_a: f.amount(&join(&p, "maxAmountA"))?,
                max_amount_b: f.amount(&join(&p, "maxAmountB"))?,
                min_price: price(f, &join(&p, "minPrice"))?,
                max_price: price(f, &join(&p, "maxPrice"))?,
            })
        }
        "LIQUIDITY_POOL_WITHDRAW" => {
            let p = arm("liquidityPoolWithdrawOp");
            OperationBody::LiquidityPoolWithdraw(LiquidityPoolWithdrawOp {
                liquidity_pool_id: f.hex_array(&join(&p, "liquidityPoolID"))?,
                amount: f.amount(&join(&p, "amount"))?,
                min_amount_a: f.amount(&join(&p, "minAmountA"))?,
                min_amount_b: f.amount(&join(&p, "minAmountB"))?,
            })
        }
        "INVOKE_HOST_FUNCTION" => {
            let p = arm("invokeHostFunctionOp");
            OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
                host_function: host_function(f, &join(&p, "hostFunction"))?,
                auth: array(f, &join(&p, "auth"), usize::MAX, authorization_entry)?,
            })
        }
        "EXTEND_FOOTPRINT_TTL" => {
            let p = arm("extendFootprintTTLOp");
            ext_v0(f, &join(&p, "ext"))?;
            OperationBody::ExtendFootprintTtl(ExtendFootprintTtlOp {
                extend_to: f.u32(&join(&p, "extendTo"))?,
            })
        }
        "RESTORE_FOOTPRINT" => {
            ext_v0(f, &join(&arm("restoreFootprintOp"), "ext"))?;
            OperationBody::RestoreFootprint
        }
        other => return Err(TxRepError::unsupported(&kind, other)),
    })
}

fn set_options(f: &Fields, p: &str) -> Result<SetOptionsOp, TxRepError> {
    let u32_opt = |name: &str| optional(f, &join(p, name), |f, p| f.u32(p));
    Ok(SetOptionsOp {
        inflation_dest: optional(f, &join(p, "inflationDest"), |f, p| f.account_id(p))?,
        clear_flags: u32_opt("clearFlags")?,
        set_flags: u32_opt("setFlags")?,
        master_weight: u32_opt("masterWeight")?,
        low_threshold: u32_opt("lowThreshold")?,
        med_threshold: u32_opt("medThreshold")?,
        high_threshold: u32_opt("highThreshold")?,
        home_domain: optional(f, &join(p, "homeDomain"), |f, p| {
            f.text(p, MAX_HOME_DOMAIN_LEN)
        })?,
        signer: optional(f, &join(p, "signer"), |f, p| {
            Ok(Signer {
                key: f.signer_key(&join(p, "key"))?,
                weight: f.u32(&join(p, "weight"))?,
            })
        })?,
    })
}

fn revoke_sponsorship(f: &Fields, p: &str) -> Result<RevokeSponsorshipOp, TxRepError> {
    let kind = join(p, "type");
    match f.str(&kind)? {
        "REVOKE_SPONSORSHIP_LEDGER_ENTRY" => {
            ledger_key(f, &join(p, "ledgerKey")).map(RevokeSponsorshipOp::LedgerEntry)
        }
        "REVOKE_SPONSORSHIP_SIGNER" => {
            let s = join(p, "signer");
            Ok(RevokeSponsorshipOp::Signer {
                account_id: f.account_id(&join(&s, "accountID"))?,
                signer_key: f.signer_key(&join(&s, "signerKey"))?,
            })
        }
        other => Err(TxRepError::unsupported(&kind, other)),
    }
}

fn asset_path(f: &Fields, p: &str) -> Result<Vec<Asset>, TxRepError> {
    array(f, p, MAX_PATH_LEN, |f, p| f.asset(p))
}

fn price(f: &Fields, p: &str) -> Result<Price, TxRepError> {
    Ok(Price {
        n: f.i32(&join(p, "n"))?,
        d: f.i32(&join(p, "d"))?,
    })
}

/// A plain asset value, or the structured pool-share form.
fn change_trust_asset(f: &Fields, p: &str) -> Result<ChangeTrustAsset, TxRepError> {
    if !f.is_structured_asset(p)? {
        return f.asset(p).map(ChangeTrustAsset::Asset);
    }
    let kind = join(p, "type");
    match f.str(&kind)? {
        "ASSET_TYPE_POOL_SHARE" => {}
        other => return Err(TxRepError::unsupported(&kind, other)),
    }
    let pool = join(p, "liquidityPool");
    let pool_kind = join(&pool, "type");
    match f.str(&pool_kind)? {
        "LIQUIDITY_POOL_CONSTANT_PRODUCT" => {}
        other => return Err(TxRepError::unsupported(&pool_kind, other)),
    }
    let params = join(&pool, "constantProduct");
    Ok(ChangeTrustAsset::PoolShare(ConstantProductParameters {
        asset_a: f.asset(&join(&params, "assetA"))?,
        asset_b: f.asset(&join(&params, "assetB"))?,
        fee: f.i32(&join(&params, "fee"))?,
    }))
}

/// As [`change_trust_asset`], with the pool named by its id.
pub(super) fn trust_line_asset(f: &Fields, p: &str) -> Result<TrustLineAsset, TxRepError> {
    if !f.is_structured_asset(p)? {
        return f.asset(p).map(TrustLineAsset::Asset);
    }
    let kind = join(p, "type");
    match f.str(&kind)? {
        "ASSET_TYPE_POOL_SHARE" => f
            .hex_array(&join(p, "liquidityPoolID"))
            .map(TrustLineAsset::PoolShare),
        other => Err(TxRepError::unsupported(&kind, other)),
    }
}

pub(super) fn balance_id(f: &Fields, p: &str) -> Result<ClaimableBalanceId, TxRepError> {
    let kind = join(p, "type");
    match f.str(&kind)? {
        "CLAIMABLE_BALANCE_ID_TYPE_V0" => f.hex_array(&join(p, "v0")).map(ClaimableBalanceId::V0),
        other => Err(TxRepError::unsupported(&kind, other)),
    }
}

fn claimant(f: &Fields, p: &str) -> Result<Claimant, TxRepError> {
    let kind = join(p, "type");
    match f.str(&kind)? {
        "CLAIMANT_TYPE_V0" => {
            let v0 = join(p, "v0");
            Ok(Claimant {
                destination: f.account_id(&join(&v0, "destination"))?,
                predicate: predicate(f, &join(&v0, "predicate"), 1)?,
            })
        }
        other => Err(TxRepError::unsupported(&kind, other)),
    }
}

fn predicate(f: &Fields, p: &str, depth: usize) -> Result<ClaimPredicate, TxRepError> {
    check_depth(p, depth)?;
    let children = |name: &str| {
        array(f, &join(p, name), MAX_PREDICATE_CHILDREN, |f, p| {
            predicate(f, p, depth + 1)
        })
    };
    let kind = join(p, "type");
    Ok(match f.str(&kind)? {
        "CLAIM_PREDICATE_UNCONDITIONAL" => ClaimPredicate::Unconditional,
        "CLAIM_PREDICATE_AND" => ClaimPredicate::And(children("andPredicates")?),
        "CLAIM_PREDICATE_OR" => ClaimPredicate::Or(children("orPredicates")?),
        "CLAIM_PREDICATE_NOT" => ClaimPredicate::Not(
            optional(f, &join(p, "notPredicate"), |f, p| predicate(f, p, depth + 1))?
                .map(Box::new),
        ),
        "CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME" => {
            ClaimPredicate::BeforeAbsoluteTime(f.i64(&join(p, "absBefore"))?)
        }
        "CLAIM_PREDICATE_BEFORE_RELATIVE_TIME" => {
            ClaimPredicate::BeforeRelativeTime(f.i64(&join(p, "relBefore"))?)
        }
        other => return Err(TxRepError::unsupported(&kind, other)),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
