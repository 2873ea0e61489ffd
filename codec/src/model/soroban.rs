//! Smart-contract (Soroban) types: contract values, host functions,
//! authorization trees and the resource footprint a transaction declares.

use serde::{Deserialize, Serialize};

use super::account::{AccountId, ContractId, Hash};
use super::asset::Asset;
use super::ledger_key::LedgerKey;
use crate::config::MAX_SYMBOL_LEN;

/// Check a contract symbol: `[A-Za-z0-9_]`, at most 32 characters.
pub fn validate_symbol(symbol: &str) -> Result<(), String> {
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(format!(
            "symbol is {} bytes, maximum {}",
            symbol.len(),
            MAX_SYMBOL_LEN
        ));
    }
    if let Some(c) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(format!("symbol contains invalid character {:?}", c));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// An account or contract address inside a contract value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScAddress {
    Account(AccountId),
    Contract(ContractId),
}

impl ScAddress {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Account(_) => "SC_ADDRESS_TYPE_ACCOUNT",
            Self::Contract(_) => "SC_ADDRESS_TYPE_CONTRACT",
        }
    }
}

/// One key/value pair of an [`ScVal::Map`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScMapEntry {
    pub key: ScVal,
    pub val: ScVal,
}

/// A contract value.
///
/// `U256`/`I256` keep their 32 big-endian wire bytes; the 128-bit forms are
/// native integers assembled from the wire's hi/lo halves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScVal {
    Bool(bool),
    Void,
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Timepoint(u64),
    Duration(u64),
    U128(u128),
    I128(i128),
    U256([u8; 32]),
    I256([u8; 32]),
    Bytes(Vec<u8>),
    /// String bytes; not necessarily UTF-8.
    String(Vec<u8>),
    Symbol(String),
    Vec(Option<Vec<ScVal>>),
    Map(Option<Vec<ScMapEntry>>),
    Address(ScAddress),
    LedgerKeyContractInstance,
    LedgerKeyNonce(i64),
}

impl ScVal {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "SCV_BOOL",
            Self::Void => "SCV_VOID",
            Self::U32(_) => "SCV_U32",
            Self::I32(_) => "SCV_I32",
            Self::U64(_) => "SCV_U64",
            Self::I64(_) => "SCV_I64",
            Self::Timepoint(_) => "SCV_TIMEPOINT",
            Self::Duration(_) => "SCV_DURATION",
            Self::U128(_) => "SCV_U128",
            Self::I128(_) => "SCV_I128",
            Self::U256(_) => "SCV_U256",
            Self::I256(_) => "SCV_I256",
            Self::Bytes(_) => "SCV_BYTES",
            Self::String(_) => "SCV_STRING",
            Self::Symbol(_) => "SCV_SYMBOL",
            Self::Vec(_) => "SCV_VEC",
            Self::Map(_) => "SCV_MAP",
            Self::Address(_) => "SCV_ADDRESS",
            Self::LedgerKeyContractInstance => "SCV_LEDGER_KEY_CONTRACT_INSTANCE",
            Self::LedgerKeyNonce(_) => "SCV_LEDGER_KEY_NONCE",
        }
    }
}

// ---------------------------------------------------------------------------
// Host functions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvokeContractArgs {
    pub contract_address: ScAddress,
    /// A symbol (see [`validate_symbol`]).
    pub function_name: String,
    pub args: Vec<ScVal>,
}

/// How the id of a new contract is derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractIdPreimage {
    FromAddress { address: ScAddress, salt: Hash },
    FromAsset(Asset),
}

impl ContractIdPreimage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FromAddress { .. } => "CONTRACT_ID_PREIMAGE_FROM_ADDRESS",
            Self::FromAsset(_) => "CONTRACT_ID_PREIMAGE_FROM_ASSET",
        }
    }
}

/// Code a contract instance runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractExecutable {
    /// Uploaded wasm, by hash.
    Wasm(Hash),
    /// The built-in asset contract.
    StellarAsset,
}

impl ContractExecutable {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wasm(_) => "CONTRACT_EXECUTABLE_WASM",
            Self::StellarAsset => "CONTRACT_EXECUTABLE_STELLAR_ASSET",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateContractArgs {
    pub contract_id_preimage: ContractIdPreimage,
    pub executable: ContractExecutable,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateContractArgsV2 {
    pub contract_id_preimage: ContractIdPreimage,
    pub executable: ContractExecutable,
    pub constructor_args: Vec<ScVal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostFunction {
    InvokeContract(InvokeContractArgs),
    CreateContract(CreateContractArgs),
    UploadContractWasm(Vec<u8>),
    CreateContractV2(CreateContractArgsV2),
}

impl HostFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvokeContract(_) => "HOST_FUNCTION_TYPE_INVOKE_CONTRACT",
            Self::CreateContract(_) => "HOST_FUNCTION_TYPE_CREATE_CONTRACT",
            Self::UploadContractWasm(_) => "HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM",
            Self::CreateContractV2(_) => "HOST_FUNCTION_TYPE_CREATE_CONTRACT_V2",
        }
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Credentials of an address other than the transaction source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SorobanAddressCredentials {
    pub address: ScAddress,
    pub nonce: i64,
    pub signature_expiration_ledger: u32,
    pub signature: ScVal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SorobanCredentials {
    /// Authorized by the transaction (or operation) source account.
    SourceAccount,
    Address(SorobanAddressCredentials),
}

impl SorobanCredentials {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SourceAccount => "SOROBAN_CREDENTIALS_SOURCE_ACCOUNT",
            Self::Address(_) => "SOROBAN_CREDENTIALS_ADDRESS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SorobanAuthorizedFunction {
    ContractFn(InvokeContractArgs),
    CreateContractHostFn(CreateContractArgs),
    CreateContractV2HostFn(CreateContractArgsV2),
}

impl SorobanAuthorizedFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ContractFn(_) => "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CONTRACT_FN",
            Self::CreateContractHostFn(_) => {
                "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_HOST_FN"
            }
            Self::CreateContractV2HostFn(_) => {
                "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_V2_HOST_FN"
            }
        }
    }
}

/// A node of the authorized call tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SorobanAuthorizedInvocation {
    pub function: SorobanAuthorizedFunction,
    pub sub_invocations: Vec<SorobanAuthorizedInvocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SorobanAuthorizationEntry {
    pub credentials: SorobanCredentials,
    pub root_invocation: SorobanAuthorizedInvocation,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Ledger entries a transaction may read and write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerFootprint {
    pub read_only: Vec<LedgerKey>,
    pub read_write: Vec<LedgerKey>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SorobanResources {
    pub footprint: LedgerFootprint,
    pub instructions: u32,
    pub read_bytes: u32,
    pub write_bytes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SorobanTransactionDataExt {
    #[default]
    V0,
    /// Indices of archived footprint entries to restore.
    V1(Vec<u32>),
}

/// Resource declaration of a smart-contract transaction (`tx.ext.v = 1`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SorobanTransactionData {
    pub ext: SorobanTransactionDataExt,
    pub resources: SorobanResources,
    pub resource_fee: i64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
