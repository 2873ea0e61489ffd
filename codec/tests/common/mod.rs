//! Shared envelope fixtures for the integration tests.

#![allow(dead_code)]

use txrep::model::*;

pub const ISSUER: &str = "GAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB7JZX";

pub fn account(n: u8) -> AccountId {
    AccountId([n; 32])
}

pub fn issuer() -> AccountId {
    AccountId::from_strkey(ISSUER).expect("fixture issuer")
}

pub fn usd() -> Asset {
    Asset::issued("USD", issuer()).expect("USD")
}

pub fn long_asset() -> Asset {
    Asset::issued("LONGCODE12AB", issuer()).expect("LONGCODE12AB")
}

pub fn transaction(operations: Vec<Operation>) -> Transaction {
    Transaction {
        source_account: issuer().into(),
        fee: 100,
        seq_num: 46489056724385793,
        cond: Preconditions::None,
        memo: Memo::None,
        operations,
        soroban_data: None,
    }
}

pub fn envelope(operations: Vec<Operation>) -> TransactionEnvelope {
    TransactionEnvelope::Tx(TransactionV1Envelope {
        tx: transaction(operations),
        signatures: vec![],
    })
}

pub fn op(body: OperationBody) -> Operation {
    Operation {
        source_account: None,
        body,
    }
}

pub fn payment(amount: i64) -> Operation {
    op(OperationBody::Payment(PaymentOp {
        destination: account(1).into(),
        asset: Asset::Native,
        amount,
    }))
}

fn contract() -> ScAddress {
    ScAddress::Contract(ContractId([0xcc; 32]))
}

fn invoke_args() -> InvokeContractArgs {
    InvokeContractArgs {
        contract_address: contract(),
        function_name: "transfer".into(),
        args: vec![
            ScVal::Address(ScAddress::Account(account(2))),
            ScVal::I128(-1_000_000_000_000),
            ScVal::Vec(Some(vec![ScVal::Bool(true), ScVal::Void, ScVal::U32(7)])),
            ScVal::Map(Some(vec![ScMapEntry {
                key: ScVal::Symbol("memo".into()),
                val: ScVal::String("thanks, \"friend\"".into()),
            }])),
            ScVal::Vec(None),
            ScVal::U256([0x11; 32]),
            ScVal::Bytes(vec![]),
            ScVal::Timepoint(1_700_000_000),
            ScVal::Duration(60),
            ScVal::U128(u128::MAX),
            ScVal::I256([0xff; 32]),
            ScVal::LedgerKeyNonce(-3),
        ],
    }
}

fn create_args() -> CreateContractArgs {
    CreateContractArgs {
        contract_id_preimage: ContractIdPreimage::FromAddress {
            address: ScAddress::Account(account(3)),
            salt: [0x5a; 32],
        },
        executable: ContractExecutable::Wasm([0x77; 32]),
    }
}

/// One operation of every kind, with every optional present somewhere.
pub fn every_operation() -> Vec<Operation> {
    vec![
        op(OperationBody::CreateAccount(CreateAccountOp {
            destination: account(1),
            starting_balance: 100_000_000,
        })),
        Operation {
            source_account: Some(MuxedAccount::MuxedEd25519 {
                id: 1234,
                ed25519: [9; 32],
            }),
            body: OperationBody::Payment(PaymentOp {
                destination: account(1).into(),
                asset: usd(),
                amount: 1,
            }),
        },
        op(OperationBody::PathPaymentStrictReceive(PathPaymentStrictReceiveOp {
            send_asset: Asset::Native,
            send_max: 5_000_000,
            destination: account(2).into(),
            dest_asset: usd(),
            dest_amount: 4_000_000,
            path: vec![long_asset(), Asset::Native],
        })),
        op(OperationBody::ManageSellOffer(ManageSellOfferOp {
            selling: usd(),
            buying: Asset::Native,
            amount: 0,
            price: Price { n: 1, d: 3 },
            offer_id: 991,
        })),
        op(OperationBody::CreatePassiveSellOffer(CreatePassiveSellOfferOp {
            selling: Asset::Native,
            buying: long_asset(),
            amount: 10,
            price: Price { n: 7, d: 2 },
        })),
        op(OperationBody::SetOptions(SetOptionsOp {
            inflation_dest: Some(account(4)),
            clear_flags: Some(1),
            set_flags: Some(2),
            master_weight: Some(10),
            low_threshold: Some(1),
            med_threshold: Some(2),
            high_threshold: Some(3),
            home_domain: Some("example.com".into()),
            signer: Some(Signer {
                key: SignerKey::Ed25519SignedPayload {
                    ed25519: [4; 32],
                    payload: vec![1, 2, 3, 4, 5],
                },
                weight: 1,
            }),
        })),
        op(OperationBody::ChangeTrust(ChangeTrustOp {
            line: ChangeTrustAsset::PoolShare(ConstantProductParameters {
                asset_a: Asset::Native,
                asset_b: usd(),
                fee: 30,
            }),
            limit: i64::MAX,
        })),
        op(OperationBody::ChangeTrust(ChangeTrustOp {
            line: ChangeTrustAsset::Asset(usd()),
            limit: 0,
        })),
        op(OperationBody::AllowTrust(AllowTrustOp {
            trustor: account(5),
            asset: AssetCode::from_code("USD").expect("code"),
            authorize: 2,
        })),
        op(OperationBody::AccountMerge(MuxedAccount::MuxedEd25519 {
            id: 0,
            ed25519: [6; 32],
        })),
        op(OperationBody::Inflation),
        op(OperationBody::ManageData(ManageDataOp {
            data_name: "config: key".into(),
            data_value: Some(vec![0xde, 0xad]),
        })),
        op(OperationBody::ManageData(ManageDataOp {
            data_name: "gone".into(),
            data_value: None,
        })),
        op(OperationBody::BumpSequence(BumpSequenceOp { bump_to: i64::MAX })),
        op(OperationBody::ManageBuyOffer(ManageBuyOfferOp {
            selling: Asset::Native,
            buying: usd(),
            buy_amount: 250,
            price: Price { n: 3, d: 4 },
            offer_id: 0,
        })),
        op(OperationBody::PathPaymentStrictSend(PathPaymentStrictSendOp {
            send_asset: usd(),
            send_amount: 100,
            destination: account(7).into(),
            dest_asset: Asset::Native,
            dest_min: 90,
            path: vec![],
        })),
        op(OperationBody::CreateClaimableBalance(CreateClaimableBalanceOp {
            asset: usd(),
            amount: 1_000,
            claimants: vec![
                Claimant {
                    destination: account(8),
                    predicate: ClaimPredicate::And(vec![
                        ClaimPredicate::BeforeAbsoluteTime(1_800_000_000),
                        ClaimPredicate::Or(vec![
                            ClaimPredicate::BeforeRelativeTime(3_600),
                            ClaimPredicate::Not(Some(Box::new(ClaimPredicate::Unconditional))),
                        ]),
                    ]),
                },
                Claimant {
                    destination: account(9),
                    predicate: ClaimPredicate::Not(None),
                },
            ],
        })),
        op(OperationBody::ClaimClaimableBalance(ClaimClaimableBalanceOp {
            balance_id: ClaimableBalanceId::V0([0xba; 32]),
        })),
        op(OperationBody::BeginSponsoringFutureReserves(
            BeginSponsoringFutureReservesOp {
                sponsored_id: account(10),
            },
        )),
        op(OperationBody::EndSponsoringFutureReserves),
        op(OperationBody::RevokeSponsorship(RevokeSponsorshipOp::LedgerEntry(
            LedgerKey::Trustline {
                account_id: account(11),
                asset: TrustLineAsset::PoolShare([0x22; 32]),
            },
        ))),
        op(OperationBody::RevokeSponsorship(RevokeSponsorshipOp::Signer {
            account_id: account(12),
            signer_key: SignerKey::HashX([0x33; 32]),
        })),
        op(OperationBody::Clawback(ClawbackOp {
            asset: usd(),
            from: account(13).into(),
            amount: 77,
        })),
        op(OperationBody::ClawbackClaimableBalance(ClawbackClaimableBalanceOp {
            balance_id: ClaimableBalanceId::V0([0xbb; 32]),
        })),
        op(OperationBody::SetTrustLineFlags(SetTrustLineFlagsOp {
            trustor: account(14),
            asset: long_asset(),
            clear_flags: 1,
            set_flags: 4,
        })),
        op(OperationBody::LiquidityPoolDeposit(LiquidityPoolDepositOp {
            liquidity_pool_id: [0x44; 32],
            max_amount_a: 1_000,
            max_amount_b: 2_000,
            min_price: Price { n: 1, d: 2 },
            max_price: Price { n: 2, d: 1 },
        })),
        op(OperationBody::LiquidityPoolWithdraw(LiquidityPoolWithdrawOp {
            liquidity_pool_id: [0x44; 32],
            amount: 500,
            min_amount_a: 1,
            min_amount_b: 2,
        })),
        op(OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(invoke_args()),
            auth: vec![
                SorobanAuthorizationEntry {
                    credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                        address: ScAddress::Account(account(2)),
                        nonce: 42,
                        signature_expiration_ledger: 1_000_000,
                        signature: ScVal::Vec(Some(vec![])),
                    }),
                    root_invocation: SorobanAuthorizedInvocation {
                        function: SorobanAuthorizedFunction::ContractFn(invoke_args()),
                        sub_invocations: vec![SorobanAuthorizedInvocation {
                            function: SorobanAuthorizedFunction::CreateContractHostFn(
                                create_args(),
                            ),
                            sub_invocations: vec![],
                        }],
                    },
                },
                SorobanAuthorizationEntry {
                    credentials: SorobanCredentials::SourceAccount,
                    root_invocation: SorobanAuthorizedInvocation {
                        function: SorobanAuthorizedFunction::CreateContractV2HostFn(
                            CreateContractArgsV2 {
                                contract_id_preimage: ContractIdPreimage::FromAsset(usd()),
                                executable: ContractExecutable::StellarAsset,
                                constructor_args: vec![ScVal::I32(-1)],
                            },
                        ),
                        sub_invocations: vec![],
                    },
                },
            ],
        })),
        op(OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::CreateContract(create_args()),
            auth: vec![],
        })),
        op(OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::UploadContractWasm(vec![0, 0x61, 0x73, 0x6d]),
            auth: vec![],
        })),
        op(OperationBody::ExtendFootprintTtl(ExtendFootprintTtlOp {
            extend_to: 500_000,
        })),
        op(OperationBody::RestoreFootprint),
    ]
}

/// A footprint touching every ledger key kind, including every
/// config-setting id.
pub fn soroban_data() -> SorobanTransactionData {
    let mut read_only = vec![
        LedgerKey::Account {
            account_id: account(1),
        },
        LedgerKey::Trustline {
            account_id: account(1),
            asset: TrustLineAsset::Asset(usd()),
        },
        LedgerKey::Offer {
            seller_id: account(2),
            offer_id: 5,
        },
        LedgerKey::Data {
            account_id: account(3),
            data_name: "k".into(),
        },
        LedgerKey::ClaimableBalance {
            balance_id: ClaimableBalanceId::V0([1; 32]),
        },
        LedgerKey::LiquidityPool {
            liquidity_pool_id: [2; 32],
        },
        LedgerKey::ContractCode { hash: [3; 32] },
        LedgerKey::Ttl { key_hash: [4; 32] },
    ];
    read_only.extend(
        ConfigSettingId::ALL
            .into_iter()
            .map(|config_setting_id| LedgerKey::ConfigSetting { config_setting_id }),
    );
    SorobanTransactionData {
        ext: SorobanTransactionDataExt::V1(vec![0, 3]),
        resources: SorobanResources {
            footprint: LedgerFootprint {
                read_only,
                read_write: vec![LedgerKey::ContractData {
                    contract: contract(),
                    key: ScVal::LedgerKeyContractInstance,
                    durability: ContractDataDurability::Temporary,
                }],
            },
            instructions: 2_000_000,
            read_bytes: 4_096,
            write_bytes: 512,
        },
        resource_fee: 123_456,
    }
}
