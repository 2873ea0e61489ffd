//! Operation bodies and claim predicates, written under
//! `<op>.body.<kind>Op`. Amounts carry a human-readable comment.

use super::soroban::{authorization_entry, host_function, ledger_key};
use super::{array, optional};
use crate::model::*;
use crate::txrep::lines::{join, LineWriter};

pub(super) fn operation(w: &mut LineWriter, p: &str, op: &Operation) {
    optional(w, &join(p, "sourceAccount"), op.source_account.as_ref(), |w, p, a| {
        w.field(p, a)
    });
    let b = join(p, "body");
    w.field(&join(&b, "type"), op.body.name());
    operation_body(w, &b, &op.body);
}

fn operation_body(w: &mut LineWriter, b: &str, body: &OperationBody) {
    let arm = |name: &str| join(b, name);
    match body {
        OperationBody::CreateAccount(op) => {
            let p = arm("createAccountOp");
            w.field(&join(&p, "destination"), &op.destination);
            w.amount(&join(&p, "startingBalance"), op.starting_balance, Some(&Asset::Native));
        }
        OperationBody::Payment(op) => {
            let p = arm("paymentOp");
            w.field(&join(&p, "destination"), &op.destination);
            w.field(&join(&p, "asset"), &op.asset);
            w.amount(&join(&p, "amount"), op.amount, Some(&op.asset));
        }
        OperationBody::PathPaymentStrictReceive(op) => {
            let p = arm("pathPaymentStrictReceiveOp");
            w.field(&join(&p, "sendAsset"), &op.send_asset);
            w.amount(&join(&p, "sendMax"), op.send_max, Some(&op.send_asset));
            w.field(&join(&p, "destination"), &op.destination);
            w.field(&join(&p, "destAsset"), &op.dest_asset);
            w.amount(&join(&p, "destAmount"), op.dest_amount, Some(&op.dest_asset));
            asset_path(w, &join(&p, "path"), &op.path);
        }
        OperationBody::ManageSellOffer(op) => {
            let p = arm("manageSellOfferOp");
            w.field(&join(&p, "selling"), &op.selling);
            w.field(&join(&p, "buying"), &op.buying);
            w.amount(&join(&p, "amount"), op.amount, Some(&op.selling));
            price(w, &join(&p, "price"), &op.price);
            w.field(&join(&p, "offerID"), op.offer_id);
        }
        OperationBody::CreatePassiveSellOffer(op) => {
            let p = arm("createPassiveSellOfferOp");
            w.field(&join(&p, "selling"), &op.selling);
            w.field(&join(&p, "buying"), &op.buying);
            w.amount(&join(&p, "amount"), op.amount, Some(&op.selling));
            price(w, &join(&p, "price"), &op.price);
        }
        OperationBody::SetOptions(op) => set_options(w, &arm("setOptionsOp"), op),
        OperationBody::ChangeTrust(op) => {
            let p = arm("changeTrustOp");
            change_trust_asset(w, &join(&p, "line"), &op.line);
            let context = match &op.line {
                ChangeTrustAsset::Asset(asset) => Some(asset),
                ChangeTrustAsset::PoolShare(_) => None,
            };
            w.amount(&join(&p, "limit"), op.limit, context);
        }
        OperationBody::AllowTrust(op) => {
            let p = arm("allowTrustOp");
            w.field(&join(&p, "trustor"), &op.trustor);
            w.field(&join(&p, "asset"), &op.asset);
            w.field(&join(&p, "authorize"), op.authorize);
        }
        OperationBody::AccountMerge(destination) => w.field(&arm("destination"), destination),
        OperationBody::Inflation
        | OperationBody::EndSponsoringFutureReserves => {}
        OperationBody::ManageData(op) => {
            let p = arm("manageDataOp");
            w.text(&join(&p, "dataName"), &op.data_name);
            optional(w, &join(&p, "dataValue"), op.data_value.as_ref(), |w, p, v| {
                w.hex(p, v)
            });
        }
        OperationBody::BumpSequence(op) => {
            w.field(&join(&arm("bumpSequenceOp"), "bumpTo"), op.bump_to);
        }
        OperationBody::ManageBuyOffer(op) => {
            let p = arm("manageBuyOfferOp");
            w.field(&join(&p, "selling"), &op.selling);
            w.field(&join(&p, "buying"), &op.buying);
            w.amount(&join(&p, "buyAmount"), op.buy_amount, Some(&op.buying));
            price(w, &join(&p, "price"), &op.price);
            w.field(&join(&p, "offerID"), op.offer_id);
        }
        OperationBody::PathPaymentStrictSend(op) => {
            let p = arm("pathPaymentStrictSendOp");
            w.field(&join(&p, "sendAsset"), &op.send_asset);
            w.amount(&join(&p, "sendAmount"), op.send_amount, Some(&op.send_asset));
            w.field(&join(&p, "destination"), &op.destination);
            w.field(&join(&p, "destAsset"), &op.dest_asset);
            w.amount(&join(&p, "destMin"), op.dest_min, Some(&op.dest_asset));
            asset_path(w, &join(&p, "path"), &op.path);
        }
        OperationBody::CreateClaimableBalance(op) => {
            let p = arm("createClaimableBalanceOp");
            w.field(&join(&p, "asset"), &op.asset);
            w.amount(&join(&p, "amount"), op.amount, Some(&op.asset));
            array(w, &join(&p, "claimants"), &op.claimants, claimant);
        }
        OperationBody::ClaimClaimableBalance(op) => {
            balance_id(w, &join(&arm("claimClaimableBalanceOp"), "balanceID"), &op.balance_id);
        }
        OperationBody::BeginSponsoringFutureReserves(op) => {
            w.field(
                &join(&arm("beginSponsoringFutureReservesOp"), "sponsoredID"),
                &op.sponsored_id,
            );
        }
        OperationBody::RevokeSponsorship(op) => {
            let p = arm("revokeSponsorshipOp");
            match op {
                RevokeSponsorshipOp::LedgerEntry(key) => {
                    w.field(&join(&p, "type"), "REVOKE_SPONSORSHIP_LEDGER_ENTRY");
                    ledger_key(w, &join(&p, "ledgerKey"), key);
                }
                RevokeSponsorshipOp::Signer {
                    account_id,
                    signer_key,
                } => {
                    w.field(&join(&p, "type"), "REVOKE_SPONSORSHIP_SIGNER");
                    w.field(&join(&p, "signer.accountID"), account_id);
                    w.field(&join(&p, "signer.signerKey"), signer_key);
                }
            }
        }
        OperationBody::Clawback(op) => {
            let p = arm("clawbackOp");
            w.field(&join(&p, "asset"), &op.asset);
            w.field(&join(&p, "from"), &op.from);
            w.amount(&join(&p, "amount"), op.amount, Some(&op.asset));
        }
        OperationBody::ClawbackClaimableBalance(op) => {
            balance_id(w, &join(&arm("clawbackClaimableBalanceOp"), "balanceID"), &op.balance_id);
        }
        OperationBody::SetTrustLineFlags(op) => {
            let p = arm("setTrustLineFlagsOp");
            w.field(&join(&p, "trustor"), &op.trustor);
            w.field(&join(&p, "asset"), &op.asset);
            w.field(&join(&p, "clearFlags"), op.clear_flags);
            w.field(&join(&p, "setFlags"), op.set_flags);
        }
        OperationBody::LiquidityPoolDeposit(op) => {
            let p = arm("liquidityPoolDepositOp");
            w.hex(&join(&p, "liquidityPoolID"), &op.liquidity_pool_id);
            w.amount(&join(&p, "maxAmountA"), op.max_amount_a, None);
            w.amount(&join(&p, "maxAmountB"), op.max_amount_b, None);
            price(w, &join(&p, "minPrice"), &op.min_price);
            price(w, &join(&p, "maxPrice"), &op.max_price);
        }
        OperationBody::LiquidityPoolWithdraw(op) => {
            let p = arm("liquidityPoolWithdrawOp");
            w.hex(&join(&p, "liquidityPoolID"), &op.liquidity_pool_id);
            w.amount(&join(&p, "amount"), op.amount, None);
            w.amount(&join(&p, "minAmountA"), op.min_amount_a, None);
            w.amount(&join(&p, "minAmountB"), op.min_amount_b, None);
        }
        OperationBody::InvokeHostFunction(op) => {
            let p = arm("invokeHostFunctionOp");
            host_function(w, &join(&p, "hostFunction"), &op.host_function);
            array(w, &join(&p, "auth"), &op.auth, authorization_entry);
        }
        OperationBody::ExtendFootprintTtl(op) => {
            let p = arm("extendFootprintTTLOp");
            w.field(&join(&p, "ext.v"), 0);
            w.field(&join(&p, "extendTo"), op.extend_to);
        }
        OperationBody::RestoreFootprint => {
            w.field(&join(&arm("restoreFootprintOp"), "ext.v"), 0);
        }
    }
}

fn set_options(w: &mut LineWriter, p: &str, op: &SetOptionsOp) {
    let u32_opt = |w: &mut LineWriter, name: &str, value: Option<u32>| {
        optional(w, &join(p, name), value.as_ref(), |w, p, v| w.field(p, v))
    };
    optional(w, &join(p, "inflationDest"), op.inflation_dest.as_ref(), |w, p, a| {
        w.field(p, a)
    });
    u32_opt(w, "clearFlags", op.clear_flags);
    u32_opt(w, "setFlags", op.set_flags);
    u32_opt(w, "masterWeight", op.master_weight);
    u32_opt(w, "lowThreshold", op.low_threshold);
    u32_opt(w, "medThreshold", op.med_threshold);
    u32_opt(w, "highThreshold", op.high_threshold);
    optional(w, &join(p, "homeDomain"), op.home_domain.as_ref(), |w, p, d| {
        w.text(p, d)
    });
    optional(w, &join(p, "signer"), op.signer.as_ref(), |w, p, s| {
        w.field(&join(p, "key"), &s.key);
        w.field(&join(p, "weight"), s.weight);
    });
}

fn asset_path(w: &mut LineWriter, p: &str, path: &[Asset]) {
    array(w, p, path, |w, p, asset| w.field(p, asset));
}

fn price(w: &mut LineWriter, p: &str, price: &Price) {
    w.field(&join(p, "n"), price.n);
    w.field(&join(p, "d"), price.d);
}

fn change_trust_asset(w: &mut LineWriter, p: &str, line: &ChangeTrustAsset) {
    match line {
        ChangeTrustAsset::Asset(asset) => w.field(p, asset),
        ChangeTrustAsset::PoolShare(params) => {
            w.field(&join(p, "type"), "ASSET_TYPE_POOL_SHARE");
            let pool = join(p, "liquidityPool");
            w.field(&join(&pool, "type"), "LIQUIDITY_POOL_CONSTANT_PRODUCT");
            let cp = join(&pool, "constantProduct");
            w.field(&join(&cp, "assetA"), &params.asset_a);
            w.field(&join(&cp, "assetB"), &params.asset_b);
            w.field(&join(&cp, "fee"), params.fee);
        }
    }
}

pub(super) fn trust_line_asset(w: &mut LineWriter, p: &str, asset: &TrustLineAsset) {
    match asset {
        TrustLineAsset::Asset(asset) => w.field(p, asset),
        TrustLineAsset::PoolShare(id) => {
            w.field(&join(p, "type"), "ASSET_TYPE_POOL_SHARE");
            w.hex(&join(p, "liquidityPoolID"), id);
        }
    }
}

pub(super) fn balance_id(w: &mut LineWriter, p: &str, id: &ClaimableBalanceId) {
    match id {
        ClaimableBalanceId::V0(hash) => {
            w.field(&join(p, "type"), "CLAIMABLE_BALANCE_ID_TYPE_V0");
            w.hex(&join(p, "v0"), hash);
        }
    }
}

fn claimant(w: &mut LineWriter, p: &str, c: &Claimant) {
    w.field(&join(p, "type"), "CLAIMANT_TYPE_V0");
    let v0 = join(p, "v0");
    w.field(&join(&v0, "destination"), &c.destination);
    predicate(w, &join(&v0, "predicate"), &c.predicate);
}

fn predicate(w: &mut LineWriter, p: &str, pred: &ClaimPredicate) {
    w.field(&join(p, "type"), pred.name());
    match pred {
        ClaimPredicate::Unconditional => {}
        ClaimPredicate::And(children) => array(w, &join(p, "andPredicates"), children, predicate),
        ClaimPredicate::Or(children) => array(w, &join(p, "orPredicates"), children, predicate),
        ClaimPredicate::Not(child) => {
            optional(w, &join(p, "notPredicate"), child.as_deref(), predicate)
        }
        ClaimPredicate::BeforeAbsoluteTime(t) => w.field(&join(p, "absBefore"), t),
        ClaimPredicate::BeforeRelativeTime(t) => w.field(&join(p, "relBefore"), t),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
