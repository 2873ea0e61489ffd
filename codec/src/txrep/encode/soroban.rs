//! Ledger keys, contract values, host functions, authorization trees
//! and the Soroban resource footprint.

use super::operations::{balance_id, trust_line_asset};
use super::{array, optional};
use crate::model::*;
use crate::txrep::lines::{join, LineWriter};

pub(super) fn ledger_key(w: &mut LineWriter, k: &str, key: &LedgerKey) {
    w.field(&join(k, "type"), key.name());
    match key {
        LedgerKey::Account { account_id } => w.field(&join(k, "account.accountID"), account_id),
        LedgerKey::Trustline { account_id, asset } => {
            let p = join(k, "trustLine");
            w.field(&join(&p, "accountID"), account_id);
            trust_line_asset(w, &join(&p, "asset"), asset);
        }
        LedgerKey::Offer {
            seller_id,
            offer_id,
        } => {
            let p = join(k, "offer");
            w.field(&join(&p, "sellerID"), seller_id);
            w.field(&join(&p, "offerID"), offer_id);
        }
        LedgerKey::Data {
            account_id,
            data_name,
        } => {
            let p = join(k, "data");
            w.field(&join(&p, "accountID"), account_id);
            w.text(&join(&p, "dataName"), data_name);
        }
        LedgerKey::ClaimableBalance { balance_id: id } => {
            balance_id(w, &join(k, "claimableBalance.balanceID"), id)
        }
        LedgerKey::LiquidityPool { liquidity_pool_id } => {
            w.hex(&join(k, "liquidityPool.liquidityPoolID"), liquidity_pool_id)
        }
        LedgerKey::ContractData {
            contract,
            key,
            durability,
        } => {
            let p = join(k, "contractData");
            sc_address(w, &join(&p, "contract"), contract);
            sc_val(w, &join(&p, "key"), key);
            w.field(&join(&p, "durability"), durability.name());
        }
        LedgerKey::ContractCode { hash } => w.hex(&join(k, "contractCode.hash"), hash),
        LedgerKey::ConfigSetting { config_setting_id } => w.field(
            &join(k, "configSetting.configSettingID"),
            config_setting_id.name(),
        ),
        LedgerKey::Ttl { key_hash } => w.hex(&join(k, "ttl.keyHash"), key_hash),
    }
}

fn sc_address(w: &mut LineWriter, a: &str, address: &ScAddress) {
    w.field(&join(a, "type"), address.name());
    match address {
        ScAddress::Account(id) => w.field(&join(a, "accountId"), id),
        ScAddress::Contract(id) => w.field(&join(a, "contractId"), id),
    }
}

fn sc_vals(w: &mut LineWriter, p: &str, vals: &[ScVal]) {
    array(w, p, vals, sc_val);
}

fn sc_val(w: &mut LineWriter, v: &str, val: &ScVal) {
    w.field(&join(v, "type"), val.name());
    let field = |name: &str| join(v, name);
    match val {
        ScVal::Bool(b) => w.field(&field("b"), b),
        ScVal::Void | ScVal::LedgerKeyContractInstance => {}
        ScVal::U32(n) => w.field(&field("u32"), n),
        ScVal::I32(n) => w.field(&field("i32"), n),
        ScVal::U64(n) => w.field(&field("u64"), n),
        ScVal::I64(n) => w.field(&field("i64"), n),
        ScVal::Timepoint(n) => w.field(&field("timepoint"), n),
        ScVal::Duration(n) => w.field(&field("duration"), n),
        ScVal::U128(n) => w.field(&field("u128"), n),
        ScVal::I128(n) => w.field(&field("i128"), n),
        ScVal::U256(bytes) => w.hex(&field("u256"), bytes),
        ScVal::I256(bytes) => w.hex(&field("i256"), bytes),
        ScVal::Bytes(bytes) => w.hex(&field("bytes"), bytes),
        ScVal::String(s) => w.text(&field("str"), s),
        ScVal::Symbol(s) => w.string(&field("sym"), s),
        ScVal::Vec(items) => optional(w, &field("vec"), items.as_ref(), |w, p, items| {
            sc_vals(w, p, items)
        }),
        ScVal::Map(entries) => optional(w, &field("map"), entries.as_ref(), |w, p, entries| {
            array(w, p, entries, |w, e, entry| {
                sc_val(w, &join(e, "key"), &entry.key);
                sc_val(w, &join(e, "val"), &entry.val);
            })
        }),
        ScVal::Address(address) => sc_address(w, &field("address"), address),
        ScVal::LedgerKeyNonce(nonce) => w.field(&field("nonce_key.nonce"), nonce),
    }
}

fn invoke_contract_args(w: &mut LineWriter, p: &str, args: &InvokeContractArgs) {
    sc_address(w, &join(p, "contractAddress"), &args.contract_address);
    w.string(&join(p, "functionName"), &args.function_name);
    sc_vals(w, &join(p, "args"), &args.args);
}

fn contract_id_preimage(w: &mut LineWriter, p: &str, preimage: &ContractIdPreimage) {
    w.field(&join(p, "type"), preimage.name());
    match preimage {
        ContractIdPreimage::FromAddress { address, salt } => {
            let from = join(p, "fromAddress");
            sc_address(w, &join(&from, "address"), address);
            w.hex(&join(&from, "salt"), salt);
        }
        ContractIdPreimage::FromAsset(asset) => w.field(&join(p, "fromAsset"), asset),
    }
}

fn contract_executable(w: &mut LineWriter, p: &str, executable: &ContractExecutable) {
    w.field(&join(p, "type"), executable.name());
    if let ContractExecutable::Wasm(hash) = executable {
        w.hex(&join(p, "wasm_hash"), hash);
    }
}

fn create_contract_args(w: &mut LineWriter, p: &str, args: &CreateContractArgs) {
    contract_id_preimage(w, &join(p, "contractIDPreimage"), &args.contract_id_preimage);
    contract_executable(w, &join(p, "executable"), &args.executable);
}

fn create_contract_args_v2(w: &mut LineWriter, p: &str, args: &CreateContractArgsV2) {
    contract_id_preimage(w, &join(p, "contractIDPreimage"), &args.contract_id_preimage);
    contract_executable(w, &join(p, "executable"), &args.executable);
    sc_vals(w, &join(p, "constructorArgs"), &args.constructor_args);
}

pub(super) fn host_function(w: &mut LineWriter, h: &str, function: &HostFunction) {
    w.field(&join(h, "type"), function.name());
    match function {
        HostFunction::InvokeContract(args) => {
            invoke_contract_args(w, &join(h, "invokeContract"), args)
        }
        HostFunction::CreateContract(args) => {
            create_contract_args(w, &join(h, "createContract"), args)
        }
        HostFunction::UploadContractWasm(wasm) => w.hex(&join(h, "wasm"), wasm),
        HostFunction::CreateContractV2(args) => {
            create_contract_args_v2(w, &join(h, "createContractV2"), args)
        }
    }
}

pub(super) fn authorization_entry(w: &mut LineWriter, e: &str, entry: &SorobanAuthorizationEntry) {
    let creds = join(e, "credentials");
    w.field(&join(&creds, "type"), entry.credentials.name());
    if let SorobanCredentials::Address(c) = &entry.credentials {
        let a = join(&creds, "address");
        sc_address(w, &join(&a, "address"), &c.address);
        w.field(&join(&a, "nonce"), c.nonce);
        w.field(&join(&a, "signatureExpirationLedger"), c.signature_expiration_ledger);
        sc_val(w, &join(&a, "signature"), &c.signature);
    }
    invocation(w, &join(e, "rootInvocation"), &entry.root_invocation);
}

fn invocation(w: &mut LineWriter, p: &str, inv: &SorobanAuthorizedInvocation) {
    let func = join(p, "function");
    w.field(&join(&func, "type"), inv.function.name());
    match &inv.function {
        SorobanAuthorizedFunction::ContractFn(args) => {
            invoke_contract_args(w, &join(&func, "contractFn"), args)
        }
        SorobanAuthorizedFunction::CreateContractHostFn(args) => {
            create_contract_args(w, &join(&func, "createContractHostFn"), args)
        }
        SorobanAuthorizedFunction::CreateContractV2HostFn(args) => {
            create_contract_args_v2(w, &join(&func, "createContractV2HostFn"), args)
        }
    }
    array(w, &join(p, "subInvocations"), &inv.sub_invocations, invocation);
}

pub(super) fn soroban_data(w: &mut LineWriter, s: &str, data: &SorobanTransactionData) {
    let ext = join(s, "ext");
    match &data.ext {
        SorobanTransactionDataExt::V0 => w.field(&join(&ext, "v"), 0),
        SorobanTransactionDataExt::V1(archived) => {
            w.field(&join(&ext, "v"), 1);
            array(w, &join(&ext, "archivedSorobanEntries"), archived, |w, p, i| {
                w.field(p, i)
            });
        }
    }
    let r = join(s, "resources");
    let footprint = join(&r, "footprint");
    array(w, &join(&footprint, "readOnly"), &data.resources.footprint.read_only, ledger_key);
    array(w, &join(&footprint, "readWrite"), &data.resources.footprint.read_write, ledger_key);
    w.field(&join(&r, "instructions"), data.resources.instructions);
    w.field(&join(&r, "readBytes"), data.resources.read_bytes);
    w.field(&join(&r, "writeBytes"), data.resources.write_bytes);
    w.field(&join(s, "resourceFee"), data.resource_fee);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
