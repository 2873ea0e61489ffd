//! Ledger keys and the network configuration settings they can name.

use serde::{Deserialize, Serialize};

use super::account::{AccountId, Hash};
use super::asset::TrustLineAsset;
use super::predicate::ClaimableBalanceId;
use super::soroban::{ScAddress, ScVal};

/// Whether contract data survives archival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractDataDurability {
    Temporary,
    Persistent,
}

impl ContractDataDurability {
    pub fn name(self) -> &'static str {
        match self {
            Self::Temporary => "TEMPORARY",
            Self::Persistent => "PERSISTENT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "TEMPORARY" => Some(Self::Temporary),
            "PERSISTENT" => Some(Self::Persistent),
            _ => None,
        }
    }
}

/// A network-wide smart-contract resource setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigSettingId {
    ContractMaxSizeBytes,
    ContractComputeV0,
    ContractLedgerCostV0,
    ContractHistoricalDataV0,
    ContractEventsV0,
    ContractBandwidthV0,
    ContractCostParamsCpuInstructions,
    ContractCostParamsMemoryBytes,
    ContractDataKeySizeBytes,
    ContractDataEntrySizeBytes,
    StateArchival,
    ContractExecutionLanes,
    BucketlistSizeWindow,
    EvictionIterator,
}

impl ConfigSettingId {
    /// Every setting, in discriminant order.
    pub const ALL: [ConfigSettingId; 14] = [
        Self::ContractMaxSizeBytes,
        Self::ContractComputeV0,
        Self::ContractLedgerCostV0,
        Self::ContractHistoricalDataV0,
        Self::ContractEventsV0,
        Self::ContractBandwidthV0,
        Self::ContractCostParamsCpuInstructions,
        Self::ContractCostParamsMemoryBytes,
        Self::ContractDataKeySizeBytes,
        Self::ContractDataEntrySizeBytes,
        Self::StateArchival,
        Self::ContractExecutionLanes,
        Self::BucketlistSizeWindow,
        Self::EvictionIterator,
    ];

    /// Wire discriminant.
    pub fn discriminant(self) -> i32 {
        self as i32
    }

    pub fn from_discriminant(value: i32) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ContractMaxSizeBytes => "CONFIG_SETTING_CONTRACT_MAX_SIZE_BYTES",
            Self::ContractComputeV0 => "CONFIG_SETTING_CONTRACT_COMPUTE_V0",
            Self::ContractLedgerCostV0 => "CONFIG_SETTING_CONTRACT_LEDGER_COST_V0",
            Self::ContractHistoricalDataV0 => "CONFIG_SETTING_CONTRACT_HISTORICAL_DATA_V0",
            Self::ContractEventsV0 => "CONFIG_SETTING_CONTRACT_EVENTS_V0",
            Self::ContractBandwidthV0 => "CONFIG_SETTING_CONTRACT_BANDWIDTH_V0",
            Self::ContractCostParamsCpuInstructions => {
                "CONFIG_SETTING_CONTRACT_COST_PARAMS_CPU_INSTRUCTIONS"
            }
            Self::ContractCostParamsMemoryBytes => "CONFIG_SETTING_CONTRACT_COST_PARAMS_MEMORY_BYTES",
            Self::ContractDataKeySizeBytes => "CONFIG_SETTING_CONTRACT_DATA_KEY_SIZE_BYTES",
            Self::ContractDataEntrySizeBytes => "CONFIG_SETTING_CONTRACT_DATA_ENTRY_SIZE_BYTES",
            Self::StateArchival => "CONFIG_SETTING_STATE_ARCHIVAL",
            Self::ContractExecutionLanes => "CONFIG_SETTING_CONTRACT_EXECUTION_LANES",
            Self::BucketlistSizeWindow => "CONFIG_SETTING_BUCKETLIST_SIZE_WINDOW",
            Self::EvictionIterator => "CONFIG_SETTING_EVICTION_ITERATOR",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

/// The key of a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerKey {
    Account {
        account_id: AccountId,
    },
    Trustline {
        account_id: AccountId,
        asset: TrustLineAsset,
    },
    Offer {
        seller_id: AccountId,
        offer_id: i64,
    },
    Data {
        account_id: AccountId,
        data_name: Vec<u8>,
    },
    ClaimableBalance {
        balance_id: ClaimableBalanceId,
    },
    LiquidityPool {
        liquidity_pool_id: Hash,
    },
    ContractData {
        contract: ScAddress,
        key: ScVal,
        durability: ContractDataDurability,
    },
    ContractCode {
        hash: Hash,
    },
    ConfigSetting {
        config_setting_id: ConfigSettingId,
    },
    Ttl {
        key_hash: Hash,
    },
}

impl LedgerKey {
    /// Symbolic name written on the `type` line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Account { .. } => "ACCOUNT",
            Self::Trustline { .. } => "TRUSTLINE",
            Self::Offer { .. } => "OFFER",
            Self::Data { .. } => "DATA",
            Self::ClaimableBalance { .. } => "CLAIMABLE_BALANCE",
            Self::LiquidityPool { .. } => "LIQUIDITY_POOL",
            Self::ContractData { .. } => "CONTRACT_DATA",
            Self::ContractCode { .. } => "CONTRACT_CODE",
            Self::ConfigSetting { .. } => "CONFIG_SETTING",
            Self::Ttl { .. } => "TTL",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
