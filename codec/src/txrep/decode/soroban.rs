//! Smart-contract structures: ledger keys, contract values, host
//! functions, authorization trees and the transaction resource footprint.

use super::operations::{balance_id, trust_line_asset};
use super::{array, check_depth, optional};
use crate::config::{MAX_DATA_NAME_LEN, MAX_SYMBOL_LEN};
use crate::error::TxRepError;
use crate::model::*;
use crate::txrep::lines::{join, Fields};

pub(super) fn ledger_key(f: &Fields, k: &str) -> Result<LedgerKey, TxRepError> {
    let kind = join(k, "type");
    Ok(match f.str(&kind)? {
        "ACCOUNT" => LedgerKey::Account {
            account_id: f.account_id(&join(k, "account.accountID"))?,
        },
        "TRUSTLINE" => {
            let p = join(k, "trustLine");
            LedgerKey::Trustline {
                account_id: f.account_id(&join(&p, "accountID"))?,
                asset: trust_line_asset(f, &join(&p, "asset"))?,
            }
        }
        "OFFER" => {
            let p = join(k, "offer");
            LedgerKey::Offer {
                seller_id: f.account_id(&join(&p, "sellerID"))?,
                offer_id: f.i64(&join(&p, "offerID"))?,
            }
        }
        "DATA" => {
            let p = join(k, "data");
            LedgerKey::Data {
                account_id: f.account_id(&join(&p, "accountID"))?,
                data_name: f.text(&join(&p, "dataName"), MAX_DATA_NAME_LEN)?,
            }
        }
        "CLAIMABLE_BALANCE" => LedgerKey::ClaimableBalance {
            balance_id: balance_id(f, &join(k, "claimableBalance.balanceID"))?,
        },
        "LIQUIDITY_POOL" => LedgerKey::LiquidityPool {
            liquidity_pool_id: f.hex_array(&join(k, "liquidityPool.liquidityPoolID"))?,
        },
        "CONTRACT_DATA" => {
            let p = join(k, "contractData");
            let durability_path = join(&p, "durability");
            let durability = f.str(&durability_path)?;
            LedgerKey::ContractData {
                contract: sc_address(f, &join(&p, "contract"))?,
                key: sc_val(f, &join(&p, "key"), 1)?,
                durability: ContractDataDurability::from_name(durability)
                    .ok_or_else(|| TxRepError::unsupported(&durability_path, durability))?,
            }
        }
        "CONTRACT_CODE" => LedgerKey::ContractCode {
            hash: f.hex_array(&join(k, "contractCode.hash"))?,
        },
        "CONFIG_SETTING" => {
            let path = join(k, "configSetting.configSettingID");
            let name = f.str(&path)?;
            LedgerKey::ConfigSetting {
                config_setting_id: ConfigSettingId::from_name(name)
                    .ok_or_else(|| TxRepError::unsupported(&path, name))?,
            }
        }
        "TTL" => LedgerKey::Ttl {
            key_hash: f.hex_array(&join(k, "ttl.keyHash"))?,
        },
        other => return Err(TxRepError::unsupported(&kind, other)),
    })
}

fn sc_address(f: &Fields, a: &str) -> Result<ScAddress, TxRepError> {
    let kind = join(a, "type");
    match f.str(&kind)? {
        "SC_ADDRESS_TYPE_ACCOUNT" => f.account_id(&join(a, "accountId")).map(ScAddress::Account),
        "SC_ADDRESS_TYPE_CONTRACT" => f.contract_id(&join(a, "contractId")).map(ScAddress::Contract),
        other => Err(TxRepError::unsupported(&kind, other)),
    }
}

fn symbol(f: &Fields, path: &str) -> Result<String, TxRepError> {
    let s = f.string(path, MAX_SYMBOL_LEN)?;
    validate_symbol(&s).map_err(|reason| TxRepError::invalid(path, reason))?;
    Ok(s)
}

fn sc_vals(f: &Fields, p: &str, depth: usize) -> Result<Vec<ScVal>, TxRepError> {
    array(f, p, usize::MAX, |f, p| sc_val(f, p, depth))
}

fn sc_val(f: &Fields, v: &str, depth: usize) -> Result<ScVal, TxRepError> {
    check_depth(v, depth)?;
    let kind = join(v, "type");
    let field = |name: &str| join(v, name);
    Ok(match f.str(&kind)? {
        "SCV_BOOL" => ScVal::Bool(f.bool(&field("b"))?),
        "SCV_VOID" => ScVal::Void,
        "SCV_U32" => ScVal::U32(f.u32(&field("u32"))?),
        "SCV_I32" => ScVal::I32(f.i32(&field("i32"))?),
        "SCV_U64" => ScVal::U64(f.u64(&field("u64"))?),
        "SCV_I64" => ScVal::I64(f.i64(&field("i64"))?),
        "SCV_TIMEPOINT" => ScVal::Timepoint(f.u64(&field("timepoint"))?),
        "SCV_DURATION" => ScVal::Duration(f.u64(&field("duration"))?),
        "SCV_U128" => ScVal::U128(f.u128(&field("u128"))?),
        "SCV_I128" => ScVal::I128(f.i128(&field("i128"))?),
        "SCV_U256" => ScVal::U256(f.hex_array(&field("u256"))?),
        "SCV_I256" => ScVal::I256(f.hex_array(&field("i256"))?),
        "SCV_BYTES" => ScVal::Bytes(f.hex(&field("bytes"))?),
        "SCV_STRING" => ScVal::String(f.text(&field("str"), usize::MAX)?),
        "SCV_SYMBOL" => ScVal::Symbol(symbol(f, &field("sym"))?),
        "SCV_VEC" => ScVal::Vec(optional(f, &field("vec"), |f, p| sc_vals(f, p, depth + 1))?),
        "SCV_MAP" => ScVal::Map(optional(f, &field("map"), |f, p| {
            array(f, p, usize::MAX, |f, e| {
                Ok(ScMapEntry {
                    key: sc_val(f, &join(e, "key"), depth + 1)?,
                    val: sc_val(f, &join(e, "val"), depth + 1)?,
                })
            })
        })?),
        "SCV_ADDRESS" => ScVal::Address(sc_address(f, &field("address"))?),
        "SCV_LEDGER_KEY_CONTRACT_INSTANCE" => ScVal::LedgerKeyContractInstance,
        "SCV_LEDGER_KEY_NONCE" => ScVal::LedgerKeyNonce(f.i64(&field("nonce_key.nonce"))?),
        other => return Err(TxRepError::unsupported(&kind, other)),
    })
}

/// `depth` is the nesting level of the arguments: 1 under a host function,
/// one below the enclosing invocation inside an authorization tree.
fn invoke_contract_args(
    f: &Fields,
    p: &str,
    depth: usize,
) -> Result<InvokeContractArgs, TxRepError> {
    Ok(InvokeContractArgs {
        contract_address: sc_address(f, &join(p, "contractAddress"))?,
        function_name: symbol(f, &join(p, "functionName"))?,
        args: sc_vals(f, &join(p, "args"), depth)?,
    })
}

fn contract_id_preimage(f: &Fields, p: &str) -> Result<ContractIdPreimage, TxRepError> {
    let kind = join(p, "type");
    match f.str(&kind)? {
        "CONTRACT_ID_PREIMAGE_FROM_ADDRESS" => {
            let from = join(p, "fromAddress");
            Ok(ContractIdPreimage::FromAddress {
                address: sc_address(f, &join(&from, "address"))?,
                salt: f.hex_array(&join(&from, "salt"))?,
            })
        }
        "CONTRACT_ID_PREIMAGE_FROM_ASSET" => {
            f.asset(&join(p, "fromAsset")).map(ContractIdPreimage::FromAsset)
        }
        other => Err(TxRepError::unsupported(&kind, other)),
    }
}

fn contract_executable(f: &Fields, p: &str) -> Result<ContractExecutable, TxRepError> {
    let kind = join(p, "type");
    match f.str(&kind)? {
        "CONTRACT_EXECUTABLE_WASM" => f.hex_array(&join(p, "wasm_hash")).map(ContractExecutable::Wasm),
        "CONTRACT_EXECUTABLE_STELLAR_ASSET" => Ok(ContractExecutable::StellarAsset),
        other => Err(TxRepError::unsupported(&kind, other)),
    }
}

fn create_contract_args(f: &Fields, p: &str) -> Result<CreateContractArgs, TxRepError> {
    Ok(CreateContractArgs {
        contract_id_preimage: contract_id_preimage(f, &join(p, "contractIDPreimage"))?,
        executable: contract_executable(f, &join(p, "executable"))?,
    })
}

fn create_contract_args_v2(
    f: &Fields,
    p: &str,
    depth: usize,
) -> Result<CreateContractArgsV2, TxRepError> {
    Ok(CreateContractArgsV2 {
        contract_id_preimage: contract_id_preimage(f, &join(p, "contractIDPreimage"))?,
        executable: contract_executable(f, &join(p, "executable"))?,
        constructor_args: sc_vals(f, &join(p, "constructorArgs"), depth)?,
    })
}

pub(super) fn host_function(f: &Fields, h: &str) -> Result<HostFunction, TxRepError> {
    let kind = join(h, "type");
    Ok(match f.str(&kind)? {
        "HOST_FUNCTION_TYPE_INVOKE_CONTRACT" => {
            HostFunction::InvokeContract(invoke_contract_args(f, &join(h, "invokeContract"), 1)?)
        }
        "HOST_FUNCTION_TYPE_CREATE_CONTRACT" => {
            HostFunction::CreateContract(create_contract_args(f, &join(h, "createContract"))?)
        }
        "HOST_FUNCTION_TYPE_UPLOAD_CONTRACT_WASM" => {
            HostFunction::UploadContractWasm(f.hex(&join(h, "wasm"))?)
        }
        "HOST_FUNCTION_TYPE_CREATE_CONTRACT_V2" => HostFunction::CreateContractV2(
            create_contract_args_v2(f, &join(h, "createContractV2"), 1)?,
        ),
        other => return Err(TxRepError::unsupported(&kind, other)),
    })
}

pub(super) fn authorization_entry(
    f: &Fields,
    e: &str,
) -> Result<SorobanAuthorizationEntry, TxRepError> {
    let creds = join(e, "credentials");
    let kind = join(&creds, "type");
    let credentials = match f.str(&kind)? {
        "SOROBAN_CREDENTIALS_SOURCE_ACCOUNT" => SorobanCredentials::SourceAccount,
        "SOROBAN_CREDENTIALS_ADDRESS" => {
            let a = join(&creds, "address");
            SorobanCredentials::Address(SorobanAddressCredentials {
                address: sc_address(f, &join(&a, "address"))?,
                nonce: f.i64(&join(&a, "nonce"))?,
                signature_expiration_ledger: f.u32(&join(&a, "signatureExpirationLedger"))?,
                signature: sc_val(f, &join(&a, "signature"), 1)?,
            })
        }
        other => return Err(TxRepError::unsupported(&kind, other)),
    };
    Ok(SorobanAuthorizationEntry {
        credentials,
        root_invocation: invocation(f, &join(e, "rootInvocation"), 1)?,
    })
}

/// Invocations and the values under them share one depth count.
fn invocation(
    f: &Fields,
    p: &str,
    depth: usize,
) -> Result<SorobanAuthorizedInvocation, TxRepError> {
    check_depth(p, depth)?;
    let func = join(p, "function");
    let kind = join(&func, "type");
    let function = match f.str(&kind)? {
        "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CONTRACT_FN" => SorobanAuthorizedFunction::ContractFn(
            invoke_contract_args(f, &join(&func, "contractFn"), depth + 1)?,
        ),
        "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_HOST_FN" => {
            SorobanAuthorizedFunction::CreateContractHostFn(create_contract_args(
                f,
                &join(&func, "createContractHostFn"),
            )?)
        }
        "SOROBAN_AUTHORIZED_FUNCTION_TYPE_CREATE_CONTRACT_V2_HOST_FN" => {
            SorobanAuthorizedFunction::CreateContractV2HostFn(create_contract_args_v2(
                f,
                &join(&func, "createContractV2HostFn"),
                depth + 1,
            )?)
        }
        other => return Err(TxRepError::unsupported(&kind, other)),
    };
    Ok(SorobanAuthorizedInvocation {
        function,
        sub_invocations: array(f, &join(p, "subInvocations"), usize::MAX, |f, p| {
            invocation(f, p, depth + 1)
        })?,
    })
}

pub(super) fn soroban_data(f: &Fields, s: &str) -> Result<SorobanTransactionData, TxRepError> {
    let ext = join(s, "ext");
    let ext = match f.u32(&join(&ext, "v"))? {
        0 => SorobanTransactionDataExt::V0,
        1 => SorobanTransactionDataExt::V1(array(
            f,
            &join(&ext, "archivedSorobanEntries"),
            usize::MAX,
            |f, p| f.u32(p),
        )?),
        other => return Err(TxRepError::unsupported(&join(&ext, "v"), &other.to_string())),
    };
    let r = join(s, "resources");
    let footprint = join(&r, "footprint");
    let keys = |name: &str| array(f, &join(&footprint, name), usize::MAX, ledger_key);
    Ok(SorobanTransactionData {
        ext,
        resources: SorobanResources {
            footprint: LedgerFootprint {
                read_only: keys("readOnly")?,
                read_write: keys("readWrite")?,
            },
            instructions: f.u32(&join(&r, "instructions"))?,
            read_bytes: f.u32(&join(&r, "readBytes"))?,
            write_bytes: f.u32(&join(&r, "writeBytes"))?,
        },
        resource_fee: f.i64(&join(s, "resourceFee"))?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
