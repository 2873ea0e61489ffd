//! In-memory schema model mirroring the ledger's binary wire schema.
//!
//! Every wire union is a closed Rust enum, every optional field an
//! `Option`, every variable-length array a `Vec`. Values are plain data:
//! built fresh by a decoder, consumed by an encoder.

pub mod account;
pub mod asset;
pub mod ledger_key;
pub mod operation;
pub mod predicate;
pub mod soroban;
pub mod transaction;

pub use account::{AccountId, ContractId, Hash, MuxedAccount, SignerKey};
pub use asset::{
    AlphaNum12, AlphaNum4, Asset, AssetCode, AssetError, ChangeTrustAsset,
    ConstantProductParameters, Price, TrustLineAsset,
};
pub use ledger_key::{ConfigSettingId, ContractDataDurability, LedgerKey};
pub use operation::*;
pub use predicate::{ClaimPredicate, ClaimableBalanceId, Claimant};
pub use soroban::{
    validate_symbol, ContractExecutable, ContractIdPreimage, CreateContractArgs,
    CreateContractArgsV2, HostFunction, InvokeContractArgs, LedgerFootprint, ScAddress,
    ScMapEntry, ScVal, SorobanAddressCredentials, SorobanAuthorizationEntry,
    SorobanAuthorizedFunction, SorobanAuthorizedInvocation, SorobanCredentials,
    SorobanResources, SorobanTransactionData, SorobanTransactionDataExt,
};
pub use transaction::{
    DecoratedSignature, FeeBumpTransaction, FeeBumpTransactionEnvelope, LedgerBounds, Memo,
    Preconditions, PreconditionsV2, TimeBounds, Transaction, TransactionEnvelope,
    TransactionV1Envelope,
};
