//! Operations: the individual ledger changes a transaction applies.
//!
//! [`OperationBody`] is a closed enum over every operation kind. Code that
//! dispatches on it is an exhaustive `match`, so adding a kind is a compile
//! error everywhere it is not yet handled.

use serde::{Deserialize, Serialize};

use super::account::{AccountId, Hash, MuxedAccount, SignerKey};
use super::asset::{Asset, AssetCode, ChangeTrustAsset, Price};
use super::ledger_key::LedgerKey;
use super::predicate::{ClaimableBalanceId, Claimant};
use super::soroban::{HostFunction, SorobanAuthorizationEntry};

/// An operation, optionally overriding the transaction's source account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub source_account: Option<MuxedAccount>,
    pub body: OperationBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateAccountOp {
    pub destination: AccountId,
    pub starting_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentOp {
    pub destination: MuxedAccount,
    pub asset: Asset,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPaymentStrictReceiveOp {
    pub send_asset: Asset,
    pub send_max: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_amount: i64,
    pub path: Vec<Asset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPaymentStrictSendOp {
    pub send_asset: Asset,
    pub send_amount: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_min: i64,
    pub path: Vec<Asset>,
}

/// Create, update or (with `amount = 0`) delete a sell offer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManageSellOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
    /// 0 creates a new offer.
    pub offer_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManageBuyOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub buy_amount: i64,
    pub price: Price,
    pub offer_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatePassiveSellOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
}

/// A signer added, re-weighted, or (weight 0) removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

/// Account settings. Every field is optional; absent fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetOptionsOp {
    pub inflation_dest: Option<AccountId>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub med_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<Vec<u8>>,
    pub signer: Option<Signer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeTrustOp {
    pub line: ChangeTrustAsset,
    /// 0 removes the trustline.
    pub limit: i64,
}

/// Legacy trustline authorization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllowTrustOp {
    pub trustor: AccountId,
    pub asset: AssetCode,
    /// 0 = deauthorize, 1 = authorize, 2 = authorize to maintain liabilities.
    pub authorize: u32,
}

/// Highest `authorize` value allow-trust accepts.
pub const MAX_ALLOW_TRUST_AUTHORIZE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManageDataOp {
    pub data_name: Vec<u8>,
    /// `None` deletes the entry.
    pub data_value: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BumpSequenceOp {
    pub bump_to: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateClaimableBalanceOp {
    pub asset: Asset,
    pub amount: i64,
    pub claimants: Vec<Claimant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimClaimableBalanceOp {
    pub balance_id: ClaimableBalanceId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeginSponsoringFutureReservesOp {
    pub sponsored_id: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevokeSponsorshipOp {
    /// Revoke sponsorship of a ledger entry.
    LedgerEntry(LedgerKey),
    /// Revoke sponsorship of a signer on an account.
    Signer {
        account_id: AccountId,
        signer_key: SignerKey,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClawbackOp {
    pub asset: Asset,
    pub from: MuxedAccount,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClawbackClaimableBalanceOp {
    pub balance_id: ClaimableBalanceId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetTrustLineFlagsOp {
    pub trustor: AccountId,
    pub asset: Asset,
    pub clear_flags: u32,
    pub set_flags: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityPoolDepositOp {
    pub liquidity_pool_id: Hash,
    pub max_amount_a: i64,
    pub max_amount_b: i64,
    pub min_price: Price,
    pub max_price: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityPoolWithdrawOp {
    pub liquidity_pool_id: Hash,
    pub amount: i64,
    pub min_amount_a: i64,
    pub min_amount_b: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvokeHostFunctionOp {
    pub host_function: HostFunction,
    pub auth: Vec<SorobanAuthorizationEntry>,
}

/// Extend the time-to-live of the read-only footprint entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtendFootprintTtlOp {
    pub extend_to: u32,
}

/// The kind-specific part of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationBody {
    CreateAccount(CreateAccountOp),
    Payment(PaymentOp),
    PathPaymentStrictReceive(PathPaymentStrictReceiveOp),
    ManageSellOffer(ManageSellOfferOp),
    CreatePassiveSellOffer(CreatePassiveSellOfferOp),
    SetOptions(SetOptionsOp),
    ChangeTrust(ChangeTrustOp),
    AllowTrust(AllowTrustOp),
    AccountMerge(MuxedAccount),
    Inflation,
    ManageData(ManageDataOp),
    BumpSequence(BumpSequenceOp),
    ManageBuyOffer(ManageBuyOfferOp),
    PathPaymentStrictSend(PathPaymentStrictSendOp),
    CreateClaimableBalance(CreateClaimableBalanceOp),
    ClaimClaimableBalance(ClaimClaimableBalanceOp),
    BeginSponsoringFutureReserves(BeginSponsoringFutureReservesOp),
    EndSponsoringFutureReserves,
    RevokeSponsorship(RevokeSponsorshipOp),
    Clawback(ClawbackOp),
    ClawbackClaimableBalance(ClawbackClaimableBalanceOp),
    SetTrustLineFlags(SetTrustLineFlagsOp),
    LiquidityPoolDeposit(LiquidityPoolDepositOp),
    LiquidityPoolWithdraw(LiquidityPoolWithdrawOp),
    InvokeHostFunction(InvokeHostFunctionOp),
    ExtendFootprintTtl(ExtendFootprintTtlOp),
    RestoreFootprint,
}

impl OperationBody {
    /// Wire discriminant (`OperationType`).
    pub fn discriminant(&self) -> i32 {
        match self {
            Self::CreateAccount(_) => 0,
            Self::Payment(_) => 1,
            Self::PathPaymentStrictReceive(_) => 2,
            Self::ManageSellOffer(_) => 3,
            Self::CreatePassiveSellOffer(_) => 4,
            Self::SetOptions(_) => 5,
            Self::ChangeTrust(_) => 6,
            Self::AllowTrust(_) => 7,
            Self::AccountMerge(_) => 8,
            Self::Inflation => 9,
            Self::ManageData(_) => 10,
            Self::BumpSequence(_) => 11,
            Self::ManageBuyOffer(_) => 12,
            Self::PathPaymentStrictSend(_) => 13,
            Self::CreateClaimableBalance(_) => 14,
            Self::ClaimClaimableBalance(_) => 15,
            Self::BeginSponsoringFutureReserves(_) => 16,
            Self::EndSponsoringFutureReserves => 17,
            Self::RevokeSponsorship(_) => 18,
            Self::Clawback(_) => 19,
            Self::ClawbackClaimableBalance(_) => 20,
            Self::SetTrustLineFlags(_) => 21,
            Self::LiquidityPoolDeposit(_) => 22,
            Self::LiquidityPoolWithdraw(_) => 23,
            Self::InvokeHostFunction(_) => 24,
            Self::ExtendFootprintTtl(_) => 25,
            Self::RestoreFootprint => 26,
        }
    }

    /// Symbolic name written on the `body.type` line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateAccount(_) => "CREATE_ACCOUNT",
            Self::Payment(_) => "PAYMENT",
            Self::PathPaymentStrictReceive(_) => "PATH_PAYMENT_STRICT_RECEIVE",
            Self::ManageSellOffer(_) => "MANAGE_SELL_OFFER",
            Self::CreatePassiveSellOffer(_) => "CREATE_PASSIVE_SELL_OFFER",
            Self::SetOptions(_) => "SET_OPTIONS",
            Self::ChangeTrust(_) => "CHANGE_TRUST",
            Self::AllowTrust(_) => "ALLOW_TRUST",
            Self::AccountMerge(_) => "ACCOUNT_MERGE",
            Self::Inflation => "INFLATION",
            Self::ManageData(_) => "MANAGE_DATA",
            Self::BumpSequence(_) => "BUMP_SEQUENCE",
            Self::ManageBuyOffer(_) => "MANAGE_BUY_OFFER",
            Self::PathPaymentStrictSend(_) => "PATH_PAYMENT_STRICT_SEND",
            Self::CreateClaimableBalance(_) => "CREATE_CLAIMABLE_BALANCE",
            Self::ClaimClaimableBalance(_) => "CLAIM_CLAIMABLE_BALANCE",
            Self::BeginSponsoringFutureReserves(_) => "BEGIN_SPONSORING_FUTURE_RESERVES",
            Self::EndSponsoringFutureReserves => "END_SPONSORING_FUTURE_RESERVES",
            Self::RevokeSponsorship(_) => "REVOKE_SPONSORSHIP",
            Self::Clawback(_) => "CLAWBACK",
            Self::ClawbackClaimableBalance(_) => "CLAWBACK_CLAIMABLE_BALANCE",
            Self::SetTrustLineFlags(_) => "SET_TRUST_LINE_FLAGS",
            Self::LiquidityPoolDeposit(_) => "LIQUIDITY_POOL_DEPOSIT",
            Self::LiquidityPoolWithdraw(_) => "LIQUIDITY_POOL_WITHDRAW",
            Self::InvokeHostFunction(_) => "INVOKE_HOST_FUNCTION",
            Self::ExtendFootprintTtl(_) => "EXTEND_FOOTPRINT_TTL",
            Self::RestoreFootprint => "RESTORE_FOOTPRINT",
        }
    }
}
