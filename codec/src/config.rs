//! # Protocol Configuration & Constants
//!
//! Every magic number the codec depends on lives here: network passphrases,
//! the stroop scale, and the maxima the wire schema puts on bounded strings,
//! opaques and arrays. Both the text decoder and the binary bridge enforce
//! the same limits from this module, so a value accepted on one side can
//! always be written on the other.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Passphrase of the public (production) network.
pub const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Passphrase of the test network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Passphrase of the future network (protocol previews).
pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";

/// A network whose passphrase seeds transaction hashes.
///
/// Hashes, and therefore signatures, are bound to the passphrase: the same
/// envelope signed for testnet does not verify on the public network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    /// The public production network.
    Public,
    /// The SDF test network.
    Testnet,
    /// The SDF future network.
    Futurenet,
    /// Any other network, identified by its raw passphrase.
    Custom(String),
}

impl Network {
    /// The passphrase hashed into the network id.
    pub fn passphrase(&self) -> &str {
        match self {
            Self::Public => PUBLIC_NETWORK_PASSPHRASE,
            Self::Testnet => TESTNET_PASSPHRASE,
            Self::Futurenet => FUTURENET_PASSPHRASE,
            Self::Custom(passphrase) => passphrase,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Testnet => write!(f, "testnet"),
            Self::Futurenet => write!(f, "futurenet"),
            Self::Custom(passphrase) => write!(f, "custom({})", passphrase),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    /// Accepts `public`, `mainnet`, `testnet` and `futurenet`
    /// (case-insensitive). Custom passphrases go through [`Network::Custom`]
    /// explicitly, never through parsing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" | "mainnet" => Ok(Self::Public),
            "testnet" => Ok(Self::Testnet),
            "futurenet" => Ok(Self::Futurenet),
            other => Err(format!("unknown network '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Number of fractional digits in a displayed amount.
pub const AMOUNT_DECIMALS: usize = 7;

/// Stroops per whole unit of any asset (10^7).
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

/// Display code of the native asset.
pub const NATIVE_ASSET_CODE: &str = "XLM";

// ---------------------------------------------------------------------------
// Schema maxima
// ---------------------------------------------------------------------------

/// `string text<28>` in a text memo.
pub const MAX_MEMO_TEXT_LEN: usize = 28;

/// `string32` home domain on set-options.
pub const MAX_HOME_DOMAIN_LEN: usize = 32;

/// `string64` data entry name.
pub const MAX_DATA_NAME_LEN: usize = 64;

/// `opaque<64>` data entry value.
pub const MAX_DATA_VALUE_LEN: usize = 64;

/// `opaque<64>` decorated signature bytes.
pub const MAX_SIGNATURE_LEN: usize = 64;

/// `opaque<64>` payload of an ed25519 signed-payload signer.
pub const MAX_SIGNED_PAYLOAD_LEN: usize = 64;

/// `string<32>` contract symbol.
pub const MAX_SYMBOL_LEN: usize = 32;

/// Longest code of an alphanum4 asset.
pub const ASSET_CODE4_MAX_LEN: usize = 4;

/// Longest code of an alphanum12 asset.
pub const ASSET_CODE12_MAX_LEN: usize = 12;

/// `ClaimPredicate<2>` children of an and/or predicate.
pub const MAX_PREDICATE_CHILDREN: usize = 2;

/// `SignerKey<2>` extra signers in v2 preconditions.
pub const MAX_EXTRA_SIGNERS: usize = 2;

/// `Claimant<10>` claimants of a new claimable balance.
pub const MAX_CLAIMANTS: usize = 10;

/// `Asset<5>` intermediate hops of a path payment.
pub const MAX_PATH_LEN: usize = 5;

/// `DecoratedSignature<20>` signatures on an envelope.
pub const MAX_SIGNATURES: usize = 20;

/// `Operation<100>` operations in one transaction.
pub const MAX_OPERATIONS: usize = 100;

/// Nesting limit for recursive structures (claim predicates, contract
/// values, authorized invocations). Deep enough for anything the network
/// accepts, shallow enough that hostile input cannot exhaust the stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Depth budget handed to the binary reader. Every struct, union, option
/// and array level spends one unit, so this sits well above
/// [`MAX_NESTING_DEPTH`] levels of any recursive type.
pub const XDR_READ_DEPTH_LIMIT: u32 = 500;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
