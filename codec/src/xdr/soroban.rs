//! Wire forms of ledger keys and the smart-contract types.
//!
//! Values, invocations and the arguments under them share one nesting
//! count on the way in, the same count the text decoder keeps.

use stellar_xdr::curr::{self as wire, StringM};

use super::{bytes_m, check_depth, each, invalid, string_m, unsupported, vec_m};
use crate::error::XdrError;
use crate::model::*;

fn symbol_to_wire(ty: &'static str, symbol: &str) -> Result<wire::ScSymbol, XdrError> {
    validate_symbol(symbol).map_err(|reason| invalid(ty, reason))?;
    Ok(wire::ScSymbol(string_m(ty, symbol.as_bytes())?))
}

fn symbol_from_wire(ty: &'static str, symbol: StringM<32>) -> Result<String, XdrError> {
    let symbol = String::from_utf8(symbol.into()).map_err(|e| invalid(ty, e))?;
    validate_symbol(&symbol).map_err(|reason| invalid(ty, reason))?;
    Ok(symbol)
}

/// Big-endian 32 bytes as four 64-bit words, most significant first.
fn words(bytes: &[u8; 32]) -> [u64; 4] {
    let mut out = [0u64; 4];
    for (word, chunk) in out.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *word = u64::from_be_bytes(buf);
    }
    out
}

fn from_words(words: [u64; 4]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (chunk, word) in out.chunks_exact_mut(8).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

// ---------------------------------------------------------------------------
// Ledger keys
// ---------------------------------------------------------------------------

impl From<ContractDataDurability> for wire::ContractDataDurability {
    fn from(durability: ContractDataDurability) -> Self {
        match durability {
            ContractDataDurability::Temporary => Self::Temporary,
            ContractDataDurability::Persistent => Self::Persistent,
        }
    }
}

impl From<wire::ContractDataDurability> for ContractDataDurability {
    fn from(durability: wire::ContractDataDurability) -> Self {
        match durability {
            wire::ContractDataDurability::Temporary => Self::Temporary,
            wire::ContractDataDurability::Persistent => Self::Persistent,
        }
    }
}

impl TryFrom<ConfigSettingId> for wire::ConfigSettingId {
    type Error = XdrError;

    fn try_from(id: ConfigSettingId) -> Result<Self, XdrError> {
        Self::try_from(id.discriminant()).map_err(|e| invalid("ConfigSettingID", e))
    }
}

impl TryFrom<wire::ConfigSettingId> for ConfigSettingId {
    type Error = XdrError;

    fn try_from(id: wire::ConfigSettingId) -> Result<Self, XdrError> {
        Self::from_discriminant(i32::from(id))
            .ok_or_else(|| unsupported("ConfigSettingID", id.name()))
    }
}

impl TryFrom<&LedgerKey> for wire::LedgerKey {
    type Error = XdrError;

    fn try_from(key: &LedgerKey) -> Result<Self, XdrError> {
        Ok(match key {
            LedgerKey::Account { account_id } => Self::Account(wire::LedgerKeyAccount {
                account_id: account_id.into(),
            }),
            LedgerKey::Trustline { account_id, asset } => {
                Self::Trustline(wire::LedgerKeyTrustLine {
                    account_id: account_id.into(),
                    asset: asset.try_into()?,
                })
            }
            LedgerKey::Offer {
                seller_id,
                offer_id,
            } => Self::Offer(wire::LedgerKeyOffer {
                seller_id: seller_id.into(),
                offer_id: *offer_id,
            }),
            LedgerKey::Data {
                account_id,
                data_name,
            } => Self::Data(wire::LedgerKeyData {
                account_id: account_id.into(),
                data_name: wire::String64(string_m("LedgerKey.data.dataName", data_name)?),
            }),
            LedgerKey::ClaimableBalance { balance_id } => {
                Self::ClaimableBalance(wire::LedgerKeyClaimableBalance {
                    balance_id: balance_id.into(),
                })
            }
            LedgerKey::LiquidityPool { liquidity_pool_id } => {
                Self::LiquidityPool(wire::LedgerKeyLiquidityPool {
                    liquidity_pool_id: wire::PoolId(wire::Hash(*liquidity_pool_id)),
                })
            }
            LedgerKey::ContractData {
                contract,
                key,
                durability,
            } => Self::ContractData(wire::LedgerKeyContractData {
                contract: contract.into(),
                key: key.try_into()?,
                durability: (*durability).into(),
            }),
            LedgerKey::ContractCode { hash } => Self::ContractCode(wire::LedgerKeyContractCode {
                hash: wire::Hash(*hash),
            }),
            LedgerKey::ConfigSetting { config_setting_id } => {
                Self::ConfigSetting(wire::LedgerKeyConfigSetting {
                    config_setting_id: (*config_setting_id).try_into()?,
                })
            }
            LedgerKey::Ttl { key_hash } => Self::Ttl(wire::LedgerKeyTtl {
                key_hash: wire::Hash(*key_hash),
            }),
        })
    }
}

impl TryFrom<wire::LedgerKey> for LedgerKey {
    type Error = XdrError;

    fn try_from(key: wire::LedgerKey) -> Result<Self, XdrError> {
        Ok(match key {
            wire::LedgerKey::Account(k) => Self::Account {
                account_id: k.account_id.into(),
            },
            wire::LedgerKey::Trustline(k) => Self::Trustline {
                account_id: k.account_id.into(),
                asset: k.asset.try_into()?,
            },
            wire::LedgerKey::Offer(k) => Self::Offer {
                seller_id: k.seller_id.into(),
                offer_id: k.offer_id,
            },
            wire::LedgerKey::Data(k) => Self::Data {
                account_id: k.account_id.into(),
                data_name: k.data_name.0.into(),
            },
            wire::LedgerKey::ClaimableBalance(k) => Self::ClaimableBalance {
                balance_id: k.balance_id.into(),
            },
            wire::LedgerKey::LiquidityPool(k) => Self::LiquidityPool {
                liquidity_pool_id: k.liquidity_pool_id.0 .0,
            },
            wire::LedgerKey::ContractData(k) => Self::ContractData {
                contract: k.contract.try_into()?,
                key: sc_val(k.key, 1)?,
                durability: k.durability.into(),
            },
            wire::LedgerKey::ContractCode(k) => Self::ContractCode { hash: k.hash.0 },
            wire::LedgerKey::ConfigSetting(k) => Self::ConfigSetting {
                config_setting_id: k.config_setting_id.try_into()?,
            },
            wire::LedgerKey::Ttl(k) => Self::Ttl {
                key_hash: k.key_hash.0,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Contract values
// ---------------------------------------------------------------------------

impl From<&ScAddress> for wire::ScAddress {
    fn from(address: &ScAddress) -> Self {
        match address {
            ScAddress::Account(account) => Self::Account(account.into()),
            ScAddress::Contract(contract) => {
                Self::Contract(wire::ContractId(wire::Hash(contract.0)))
            }
        }
    }
}

impl TryFrom<wire::ScAddress> for ScAddress {
    type Error = XdrError;

    fn try_from(address: wire::ScAddress) -> Result<Self, XdrError> {
        match address {
            wire::ScAddress::Account(account) => Ok(Self::Account(account.into())),
            wire::ScAddress::Contract(contract) => Ok(Self::Contract(ContractId(contract.0 .0))),
            other => Err(unsupported("SCAddress", other.name())),
        }
    }
}

impl TryFrom<&ScVal> for wire::ScVal {
    type Error = XdrError;

    fn try_from(value: &ScVal) -> Result<Self, XdrError> {
        Ok(match value {
            ScVal::Bool(b) => Self::Bool(*b),
            ScVal::Void => Self::Void,
            ScVal::U32(v) => Self::U32(*v),
            ScVal::I32(v) => Self::I32(*v),
            ScVal::U64(v) => Self::U64(*v),
            ScVal::I64(v) => Self::I64(*v),
            ScVal::Timepoint(v) => Self::Timepoint(wire::TimePoint(*v)),
            ScVal::Duration(v) => Self::Duration(wire::Duration(*v)),
            ScVal::U128(v) => Self::U128(wire::UInt128Parts {
                hi: (*v >> 64) as u64,
                lo: *v as u64,
            }),
            ScVal::I128(v) => Self::I128(wire::Int128Parts {
                hi: (*v >> 64) as i64,
                lo: *v as u64,
            }),
            ScVal::U256(bytes) => {
                let [hi_hi, hi_lo, lo_hi, lo_lo] = words(bytes);
                Self::U256(wire::UInt256Parts {
                    hi_hi,
                    hi_lo,
                    lo_hi,
                    lo_lo,
                })
            }
            ScVal::I256(bytes) => {
                let [hi_hi, hi_lo, lo_hi, lo_lo] = words(bytes);
                Self::I256(wire::Int256Parts {
                    hi_hi: hi_hi as i64,
                    hi_lo,
                    lo_hi,
                    lo_lo,
                })
            }
            ScVal::Bytes(bytes) => Self::Bytes(wire::ScBytes(bytes_m("SCBytes", bytes)?)),
            ScVal::String(s) => Self::String(wire::ScString(string_m("SCString", s)?)),
            ScVal::Symbol(s) => Self::Symbol(symbol_to_wire("SCSymbol", s)?),
            ScVal::Vec(items) => Self::Vec(
                items
                    .as_deref()
                    .map(|items| -> Result<_, XdrError> {
                        Ok(wire::ScVec(vec_m("SCVec", each(items, wire::ScVal::try_from)?)?))
                    })
                    .transpose()?,
            ),
            ScVal::Map(entries) => Self::Map(
                entries
                    .as_deref()
                    .map(|entries| -> Result<_, XdrError> {
                        let entries = each(entries, |entry| {
                            Ok(wire::ScMapEntry {
                                key: (&entry.key).try_into()?,
                                val: (&entry.val).try_into()?,
                            })
                        })?;
                        Ok(wire::ScMap(vec_m("SCMap", entries)?))
                    })
                    .transpose()?,
            ),
            ScVal::Address(address) => Self::Address(address.into()),
            ScVal::LedgerKeyContractInstance => Self::LedgerKeyContractInstance,
            ScVal::LedgerKeyNonce(nonce) => {
                Self::LedgerKeyNonce(wire::ScNonceKey { nonce: *nonce })
            }
        })
    }
}

/// Wire value at nesting level `depth`.
fn sc_val(value: wire::ScVal, depth: usize) -> Result<ScVal, XdrError> {
    check_depth("SCVal", depth)?;
    Ok(match value {
        wire::ScVal::Bool(b) => ScVal::Bool(b),
        wire::ScVal::Void => ScVal::Void,
        wire::ScVal::U32(v) => ScVal::U32(v),
        wire::ScVal::I32(v) => ScVal::I32(v),
        wire::ScVal::U64(v) => ScVal::U64(v),
        wire::ScVal::I64(v) => ScVal::I64(v),
        wire::ScVal::Timepoint(v) => ScVal::Timepoint(v.0),
        wire::ScVal::Duration(v) => ScVal::Duration(v.0),
        wire::ScVal::U128(parts) => {
            ScVal::U128((u128::from(parts.hi) << 64) | u128::from(parts.lo))
        }
        wire::ScVal::I128(parts) => {
            ScVal::I128((i128::from(parts.hi) << 64) | i128::from(parts.lo))
        }
        wire::ScVal::U256(parts) => {
            ScVal::U256(from_words([parts.hi_hi, parts.hi_lo, parts.lo_hi, parts.lo_lo]))
        }
        wire::ScVal::I256(parts) => ScVal::I256(from_words([
            parts.hi_hi as u64,
            parts.hi_lo,
            parts.lo_hi,
            parts.lo_lo,
        ])),
        wire::ScVal::Bytes(bytes) => ScVal::Bytes(bytes.0.into()),
        wire::ScVal::String(s) => ScVal::String(s.0.into()),
        wire::ScVal::Symbol(s) => ScVal::Symbol(symbol_from_wire("SCSymbol", s.0)?),
        wire::ScVal::Vec(items) => ScVal::Vec(
            items
                .map(|items| each(Vec::from(items.0), |item| sc_val(item, depth + 1)))
                .transpose()?,
        ),
        wire::ScVal::Map(entries) => ScVal::Map(
            entries
                .map(|entries| {
                    each(Vec::from(entries.0), |entry| {
                        Ok(ScMapEntry {
                            key: sc_val(entry.key, depth + 1)?,
                            val: sc_val(entry.val, depth + 1)?,
                        })
                    })
                })
                .transpose()?,
        ),
        wire::ScVal::Address(address) => ScVal::Address(address.try_into()?),
        wire::ScVal::LedgerKeyContractInstance => ScVal::LedgerKeyContractInstance,
        wire::ScVal::LedgerKeyNonce(key) => ScVal::LedgerKeyNonce(key.nonce),
        other @ (wire::ScVal::Error(_) | wire::ScVal::ContractInstance(_)) => {
            return Err(unsupported("SCVal", other.name()))
        }
    })
}

impl TryFrom<wire::ScVal> for ScVal {
    type Error = XdrError;

    fn try_from(value: wire::ScVal) -> Result<Self, XdrError> {
        sc_val(value, 1)
    }
}

fn sc_vals(items: wire::VecM<wire::ScVal>, depth: usize) -> Result<Vec<ScVal>, XdrError> {
    each(Vec::from(items), |item| sc_val(item, depth))
}

// ---------------------------------------------------------------------------
// Host functions
// ---------------------------------------------------------------------------

impl TryFrom<&InvokeContractArgs> for wire::InvokeContractArgs {
    type Error = XdrError;

    fn try_from(args: &InvokeContractArgs) -> Result<Self, XdrError> {
        Ok(Self {
            contract_address: (&args.contract_address).into(),
            function_name: symbol_to_wire("InvokeContractArgs.functionName", &args.function_name)?,
            args: vec_m(
                "InvokeContractArgs.args",
                each(&args.args, wire::ScVal::try_from)?,
            )?,
        })
    }
}

/// `depth` is the nesting level of the arguments.
fn invoke_contract_args(
    args: wire::InvokeContractArgs,
    depth: usize,
) -> Result<InvokeContractArgs, XdrError> {
    Ok(InvokeContractArgs {
        contract_address: args.contract_address.try_into()?,
        function_name: symbol_from_wire("InvokeContractArgs.functionName", args.function_name.0)?,
        args: sc_vals(args.args, depth)?,
    })
}

impl TryFrom<&ContractIdPreimage> for wire::ContractIdPreimage {
    type Error = XdrError;

    fn try_from(preimage: &ContractIdPreimage) -> Result<Self, XdrError> {
        Ok(match preimage {
            ContractIdPreimage::FromAddress { address, salt } => {
                Self::Address(wire::ContractIdPreimageFromAddress {
                    address: address.into(),
                    salt: wire::Uint256(*salt),
                })
            }
            ContractIdPreimage::FromAsset(asset) => Self::Asset(asset.try_into()?),
        })
    }
}

impl TryFrom<wire::ContractIdPreimage> for ContractIdPreimage {
    type Error = XdrError;

    fn try_from(preimage: wire::ContractIdPreimage) -> Result<Self, XdrError> {
        Ok(match preimage {
            wire::ContractIdPreimage::Address(from) => Self::FromAddress {
                address: from.address.try_into()?,
                salt: from.salt.0,
            },
            wire::ContractIdPreimage::Asset(asset) => Self::FromAsset(asset.try_into()?),
        })
    }
}

impl From<ContractExecutable> for wire::ContractExecutable {
    fn from(executable: ContractExecutable) -> Self {
        match executable {
            ContractExecutable::Wasm(hash) => Self::Wasm(wire::Hash(hash)),
            ContractExecutable::StellarAsset => Self::StellarAsset,
        }
    }
}

impl From<wire::ContractExecutable> for ContractExecutable {
    fn from(executable: wire::ContractExecutable) -> Self {
        match executable {
            wire::ContractExecutable::Wasm(hash) => Self::Wasm(hash.0),
            wire::ContractExecutable::StellarAsset => Self::StellarAsset,
        }
    }
}

impl TryFrom<&CreateContractArgs> for wire::CreateContractArgs {
    type Error = XdrError;

    fn try_from(args: &CreateContractArgs) -> Result<Self, XdrError> {
        Ok(Self {
            contract_id_preimage: (&args.contract_id_preimage).try_into()?,
            executable: args.executable.into(),
        })
    }
}

impl TryFrom<wire::CreateContractArgs> for CreateContractArgs {
    type Error = XdrError;

    fn try_from(args: wire::CreateContractArgs) -> Result<Self, XdrError> {
        Ok(Self {
            contract_id_preimage: args.contract_id_preimage.try_into()?,
            executable: args.executable.into(),
        })
    }
}

impl TryFrom<&CreateContractArgsV2> for wire::CreateContractArgsV2 {
    type Error = XdrError;

    fn try_from(args: &CreateContractArgsV2) -> Result<Self, XdrError> {
        Ok(Self {
            contract_id_preimage: (&args.contract_id_preimage).try_into()?,
            executable: args.executable.into(),
            constructor_args: vec_m(
                "CreateContractArgsV2.constructorArgs",
                each(&args.constructor_args, wire::ScVal::try_from)?,
            )?,
        })
    }
}

fn create_contract_args_v2(
    args: wire::CreateContractArgsV2,
    depth: usize,
) -> Result<CreateContractArgsV2, XdrError> {
    Ok(CreateContractArgsV2 {
        contract_id_preimage: args.contract_id_preimage.try_into()?,
        executable: args.executable.into(),
        constructor_args: sc_vals(args.constructor_args, depth)?,
    })
}

impl TryFrom<&HostFunction> for wire::HostFunction {
    type Error = XdrError;

    fn try_from(function: &HostFunction) -> Result<Self, XdrError> {
        Ok(match function {
            HostFunction::InvokeContract(args) => Self::InvokeContract(args.try_into()?),
            HostFunction::CreateContract(args) => Self::CreateContract(args.try_into()?),
            HostFunction::UploadContractWasm(wasm) => {
                Self::UploadContractWasm(bytes_m("HostFunction.wasm", wasm)?)
            }
            HostFunction::CreateContractV2(args) => Self::CreateContractV2(args.try_into()?),
        })
    }
}

impl TryFrom<wire::HostFunction> for HostFunction {
    type Error = XdrError;

    fn try_from(function: wire::HostFunction) -> Result<Self, XdrError> {
        Ok(match function {
            wire::HostFunction::InvokeContract(args) => {
                Self::InvokeContract(invoke_contract_args(args, 1)?)
            }
            wire::HostFunction::CreateContract(args) => Self::CreateContract(args.try_into()?),
            wire::HostFunction::UploadContractWasm(wasm) => Self::UploadContractWasm(wasm.into()),
            wire::HostFunction::CreateContractV2(args) => {
                Self::CreateContractV2(create_contract_args_v2(args, 1)?)
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

impl TryFrom<&SorobanCredentials> for wire::SorobanCredentials {
    type Error = XdrError;

    fn try_from(credentials: &SorobanCredentials) -> Result<Self, XdrError> {
        Ok(match credentials {
            SorobanCredentials::SourceAccount => Self::SourceAccount,
            SorobanCredentials::Address(creds) => {
                Self::Address(wire::SorobanAddressCredentials {
                    address: (&creds.address).into(),
                    nonce: creds.nonce,
                    signature_expiration_ledger: creds.signature_expiration_ledger,
                    signature: (&creds.signature).try_into()?,
                })
            }
        })
    }
}

impl TryFrom<wire::SorobanCredentials> for SorobanCredentials {
    type Error = XdrError;

    fn try_from(credentials: wire::SorobanCredentials) -> Result<Self, XdrError> {
        Ok(match credentials {
            wire::SorobanCredentials::SourceAccount => Self::SourceAccount,
            wire::SorobanCredentials::Address(creds) => {
                Self::Address(SorobanAddressCredentials {
                    address: creds.address.try_into()?,
                    nonce: creds.nonce,
                    signature_expiration_ledger: creds.signature_expiration_ledger,
                    signature: sc_val(creds.signature, 1)?,
                })
            }
        })
    }
}

impl TryFrom<&SorobanAuthorizedInvocation> for wire::SorobanAuthorizedInvocation {
    type Error = XdrError;

    fn try_from(invocation: &SorobanAuthorizedInvocation) -> Result<Self, XdrError> {
        let function = match &invocation.function {
            SorobanAuthorizedFunction::ContractFn(args) => {
                wire::SorobanAuthorizedFunction::ContractFn(args.try_into()?)
            }
            SorobanAuthorizedFunction::CreateContractHostFn(args) => {
                wire::SorobanAuthorizedFunction::CreateContractHostFn(args.try_into()?)
            }
            SorobanAuthorizedFunction::CreateContractV2HostFn(args) => {
                wire::SorobanAuthorizedFunction::CreateContractV2HostFn(args.try_into()?)
            }
        };
        Ok(Self {
            function,
            sub_invocations: vec_m(
                "SorobanAuthorizedInvocation.subInvocations",
                each(&invocation.sub_invocations, Self::try_from)?,
            )?,
        })
    }
}

/// Wire invocation at nesting level `depth`; its arguments and
/// sub-invocations sit one level below.
fn invocation(
    node: wire::SorobanAuthorizedInvocation,
    depth: usize,
) -> Result<SorobanAuthorizedInvocation, XdrError> {
    check_depth("SorobanAuthorizedInvocation", depth)?;
    let function = match node.function {
        wire::SorobanAuthorizedFunction::ContractFn(args) => {
            SorobanAuthorizedFunction::ContractFn(invoke_contract_args(args, depth + 1)?)
        }
        wire::SorobanAuthorizedFunction::CreateContractHostFn(args) => {
            SorobanAuthorizedFunction::CreateContractHostFn(args.try_into()?)
        }
        wire::SorobanAuthorizedFunction::CreateContractV2HostFn(args) => {
            SorobanAuthorizedFunction::CreateContractV2HostFn(create_contract_args_v2(
                args,
                depth + 1,
            )?)
        }
    };
    Ok(SorobanAuthorizedInvocation {
        function,
        sub_invocations: each(Vec::from(node.sub_invocations), |sub| {
            invocation(sub, depth + 1)
        })?,
    })
}

impl TryFrom<&SorobanAuthorizationEntry> for wire::SorobanAuthorizationEntry {
    type Error = XdrError;

    fn try_from(entry: &SorobanAuthorizationEntry) -> Result<Self, XdrError> {
        Ok(Self {
            credentials: (&entry.credentials).try_into()?,
            root_invocation: (&entry.root_invocation).try_into()?,
        })
    }
}

impl TryFrom<wire::SorobanAuthorizationEntry> for SorobanAuthorizationEntry {
    type Error = XdrError;

    fn try_from(entry: wire::SorobanAuthorizationEntry) -> Result<Self, XdrError> {
        Ok(Self {
            credentials: entry.credentials.try_into()?,
            root_invocation: invocation(entry.root_invocation, 1)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

impl TryFrom<&SorobanTransactionData> for wire::SorobanTransactionData {
    type Error = XdrError;

    fn try_from(data: &SorobanTransactionData) -> Result<Self, XdrError> {
        let ext = match &data.ext {
            SorobanTransactionDataExt::V0 => wire::SorobanTransactionDataExt::V0,
            SorobanTransactionDataExt::V1(archived) => {
                wire::SorobanTransactionDataExt::V1(wire::SorobanResourcesExtV0 {
                    archived_soroban_entries: vec_m(
                        "SorobanResourcesExtV0.archivedSorobanEntries",
                        archived.clone(),
                    )?,
                })
            }
        };
        let resources = &data.resources;
        let keys = |ty: &'static str, list: &[LedgerKey]| {
            vec_m(ty, each(list, wire::LedgerKey::try_from)?)
        };
        Ok(Self {
            ext,
            resources: wire::SorobanResources {
                footprint: wire::LedgerFootprint {
                    read_only: keys("LedgerFootprint.readOnly", &resources.footprint.read_only)?,
                    read_write: keys("LedgerFootprint.readWrite", &resources.footprint.read_write)?,
                },
                instructions: resources.instructions,
                disk_read_bytes: resources.read_bytes,
                write_bytes: resources.write_bytes,
            },
            resource_fee: data.resource_fee,
        })
    }
}

impl TryFrom<wire::SorobanTransactionData> for SorobanTransactionData {
    type Error = XdrError;

    fn try_from(data: wire::SorobanTransactionData) -> Result<Self, XdrError> {
        let ext = match data.ext {
            wire::SorobanTransactionDataExt::V0 => SorobanTransactionDataExt::V0,
            wire::SorobanTransactionDataExt::V1(v1) => {
                SorobanTransactionDataExt::V1(v1.archived_soroban_entries.into())
            }
        };
        let resources = data.resources;
        Ok(Self {
            ext,
            resources: SorobanResources {
                footprint: LedgerFootprint {
                    read_only: each(Vec::from(resources.footprint.read_only), LedgerKey::try_from)?,
                    read_write: each(
                        Vec::from(resources.footprint.read_write),
                        LedgerKey::try_from,
                    )?,
                },
                instructions: resources.instructions,
                read_bytes: resources.disk_read_bytes,
                write_bytes: resources.write_bytes,
            },
            resource_fee: data.resource_fee,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_NESTING_DEPTH;
    use stellar_xdr::curr::{Limits, ReadXdr, WriteXdr};

    fn roundtrip<M, W>(value: &M)
    where
        M: TryFrom<W, Error = XdrError> + PartialEq + std::fmt::Debug,
        for<'a> W: TryFrom<&'a M, Error = XdrError> + ReadXdr + WriteXdr,
    {
        let bytes = W::try_from(value).unwrap().to_xdr(Limits::none()).unwrap();
        let wire = W::from_xdr(&bytes, Limits::none()).unwrap();
        assert_eq!(&M::try_from(wire).unwrap(), value);
    }

    fn contract_fn(args: Vec<ScVal>) -> SorobanAuthorizedFunction {
        SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
            contract_address: ScAddress::Contract(ContractId([1u8; 32])),
            function_name: "call".into(),
            args,
        })
    }

    /// `levels` invocations, each the only sub-invocation of the one above.
    fn invocation_chain(levels: usize, leaf_args: Vec<ScVal>) -> SorobanAuthorizedInvocation {
        let mut node = SorobanAuthorizedInvocation {
            function: contract_fn(leaf_args),
            sub_invocations: vec![],
        };
        for _ in 1..levels {
            node = SorobanAuthorizedInvocation {
                function: contract_fn(vec![]),
                sub_invocations: vec![node],
            };
        }
        node
    }

    fn nested_vec(levels: usize) -> ScVal {
        let mut value = ScVal::Vec(Some(vec![]));
        for _ in 1..levels {
            value = ScVal::Vec(Some(vec![value]));
        }
        value
    }

    #[test]
    fn wide_integers_split_into_halves() {
        let value = ScVal::I128(-2);
        let bytes = wire::ScVal::try_from(&value)
            .unwrap()
            .to_xdr(Limits::none())
            .unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 0, 10]);
        assert_eq!(&bytes[4..12], &(-1i64).to_be_bytes());
        assert_eq!(&bytes[12..], &(u64::MAX - 1).to_be_bytes());
        roundtrip::<_, wire::ScVal>(&value);
        roundtrip::<_, wire::ScVal>(&ScVal::I128(i128::MIN));
        roundtrip::<_, wire::ScVal>(&ScVal::U128(u128::MAX));
        roundtrip::<_, wire::ScVal>(&ScVal::U128((1u128 << 64) + 5));

        let mut bytes = [0u8; 32];
        bytes[0] = 0x80;
        bytes[31] = 7;
        match wire::ScVal::try_from(&ScVal::I256(bytes)).unwrap() {
            wire::ScVal::I256(parts) => {
                assert_eq!(parts.hi_hi, i64::MIN);
                assert_eq!(parts.lo_lo, 7);
            }
            other => panic!("unexpected {}", other.name()),
        }
        roundtrip::<_, wire::ScVal>(&ScVal::I256(bytes));
        roundtrip::<_, wire::ScVal>(&ScVal::U256([0xff; 32]));
    }

    #[test]
    fn nested_values_roundtrip() {
        roundtrip::<_, wire::ScVal>(&ScVal::Map(Some(vec![ScMapEntry {
            key: ScVal::Symbol("owner".into()),
            val: ScVal::Vec(Some(vec![
                ScVal::Address(ScAddress::Contract(ContractId([1u8; 32]))),
                ScVal::Bytes(vec![1, 2, 3]),
                ScVal::String(vec![b'h', 0xff]),
                ScVal::Vec(None),
                ScVal::LedgerKeyNonce(-4),
            ])),
        }])));
    }

    #[test]
    fn unsupported_values_are_reported() {
        assert!(matches!(
            ScVal::try_from(wire::ScVal::Error(wire::ScError::Contract(7))),
            Err(XdrError::Unsupported { ty: "SCVal", .. })
        ));
        let instance = wire::ScVal::ContractInstance(wire::ScContractInstance {
            executable: wire::ContractExecutable::StellarAsset,
            storage: None,
        });
        assert!(matches!(
            ScVal::try_from(instance),
            Err(XdrError::Unsupported { ty: "SCVal", .. })
        ));
        let balance = wire::ScAddress::ClaimableBalance(
            wire::ClaimableBalanceId::ClaimableBalanceIdTypeV0(wire::Hash([1u8; 32])),
        );
        assert!(matches!(
            ScVal::try_from(wire::ScVal::Address(balance)),
            Err(XdrError::Unsupported { ty: "SCAddress", .. })
        ));
    }

    #[test]
    fn symbols_are_validated_on_the_wire() {
        let bad = wire::ScVal::Symbol(wire::ScSymbol("a b".try_into().unwrap()));
        assert!(matches!(
            ScVal::try_from(bad),
            Err(XdrError::InvalidValue { ty: "SCSymbol", .. })
        ));
        assert!(wire::ScVal::try_from(&ScVal::Symbol("a b".into())).is_err());
    }

    #[test]
    fn every_ledger_key_roundtrips() {
        let account = AccountId([2u8; 32]);
        let mut keys = vec![
            LedgerKey::Account { account_id: account },
            LedgerKey::Trustline {
                account_id: account,
                asset: TrustLineAsset::PoolShare([3u8; 32]),
            },
            LedgerKey::Offer {
                seller_id: account,
                offer_id: 77,
            },
            LedgerKey::Data {
                account_id: account,
                data_name: "name".into(),
            },
            LedgerKey::ClaimableBalance {
                balance_id: ClaimableBalanceId::V0([4u8; 32]),
            },
            LedgerKey::LiquidityPool {
                liquidity_pool_id: [5u8; 32],
            },
            LedgerKey::ContractData {
                contract: ScAddress::Contract(ContractId([6u8; 32])),
                key: ScVal::LedgerKeyContractInstance,
                durability: ContractDataDurability::Persistent,
            },
            LedgerKey::ContractCode { hash: [7u8; 32] },
            LedgerKey::Ttl { key_hash: [8u8; 32] },
        ];
        keys.extend(
            ConfigSettingId::ALL
                .iter()
                .map(|id| LedgerKey::ConfigSetting {
                    config_setting_id: *id,
                }),
        );
        for key in &keys {
            roundtrip::<_, wire::LedgerKey>(key);
        }

        let newer = wire::LedgerKey::ConfigSetting(wire::LedgerKeyConfigSetting {
            config_setting_id: wire::ConfigSettingId::try_from(14).unwrap(),
        });
        assert!(matches!(
            LedgerKey::try_from(newer),
            Err(XdrError::Unsupported { ty: "ConfigSettingID", .. })
        ));
    }

    #[test]
    fn soroban_data_roundtrips() {
        roundtrip::<_, wire::SorobanTransactionData>(&SorobanTransactionData {
            ext: SorobanTransactionDataExt::V1(vec![0, 2]),
            resources: SorobanResources {
                footprint: LedgerFootprint {
                    read_only: vec![LedgerKey::ContractCode { hash: [1u8; 32] }],
                    read_write: vec![],
                },
                instructions: 1_000_000,
                read_bytes: 2048,
                write_bytes: 512,
            },
            resource_fee: 12345,
        });
    }

    #[test]
    fn host_function_and_auth_roundtrip() {
        let args = InvokeContractArgs {
            contract_address: ScAddress::Contract(ContractId([1u8; 32])),
            function_name: "transfer".into(),
            args: vec![ScVal::I128(100), ScVal::Void],
        };
        roundtrip::<_, wire::HostFunction>(&HostFunction::InvokeContract(args.clone()));
        roundtrip::<_, wire::HostFunction>(&HostFunction::UploadContractWasm(vec![0, 97, 115, 109]));
        roundtrip::<_, wire::HostFunction>(&HostFunction::CreateContractV2(CreateContractArgsV2 {
            contract_id_preimage: ContractIdPreimage::FromAddress {
                address: ScAddress::Account(AccountId([2u8; 32])),
                salt: [3u8; 32],
            },
            executable: ContractExecutable::Wasm([4u8; 32]),
            constructor_args: vec![ScVal::U32(1)],
        }));
        roundtrip::<_, wire::SorobanAuthorizationEntry>(&SorobanAuthorizationEntry {
            credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                address: ScAddress::Account(AccountId([5u8; 32])),
                nonce: -9,
                signature_expiration_ledger: 100,
                signature: ScVal::Vec(Some(vec![])),
            }),
            root_invocation: SorobanAuthorizedInvocation {
                function: SorobanAuthorizedFunction::ContractFn(args),
                sub_invocations: vec![SorobanAuthorizedInvocation {
                    function: SorobanAuthorizedFunction::CreateContractHostFn(CreateContractArgs {
                        contract_id_preimage: ContractIdPreimage::FromAsset(Asset::Native),
                        executable: ContractExecutable::StellarAsset,
                    }),
                    sub_invocations: vec![],
                }],
            },
        });
    }

    #[test]
    fn invocations_and_values_share_one_depth() {
        let decode = |root: &SorobanAuthorizedInvocation| {
            let node = wire::SorobanAuthorizedInvocation::try_from(root).unwrap();
            invocation(node, 1)
        };

        assert!(decode(&invocation_chain(MAX_NESTING_DEPTH, vec![])).is_ok());
        assert!(matches!(
            decode(&invocation_chain(MAX_NESTING_DEPTH + 1, vec![])),
            Err(XdrError::InvalidValue {
                ty: "SorobanAuthorizedInvocation",
                ..
            })
        ));

        // leaf invocation at 40, its args at 41, innermost vec at 70
        assert!(matches!(
            decode(&invocation_chain(40, vec![nested_vec(30)])),
            Err(XdrError::InvalidValue { ty: "SCVal", .. })
        ));
        assert!(decode(&invocation_chain(30, vec![nested_vec(30)])).is_ok());
    }
}
