//! Identifiers: accounts, muxed accounts, signer keys and contracts.
//!
//! Each identifier stores raw key bytes and renders to (and parses from) its
//! StrKey form. Parsing is strict about the key *type*: an `AccountId`
//! field never accepts an `M…` or `C…` string, even if it decodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use stellar_strkey::Strkey;

use crate::config::MAX_SIGNED_PAYLOAD_LEN;
use crate::encoding::strkey::{self, StrKeyError};

/// A 32-byte hash (transaction hashes, pool ids, wasm hashes, …).
pub type Hash = [u8; 32];

/// Serialize an identifier as its StrKey string, deserialize by parsing it.
macro_rules! strkey_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

const ACCOUNT: &str = "account id (G...)";

/// An ed25519 account public key, rendered as `G…`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// Parse a `G…` StrKey.
    pub fn from_strkey(s: &str) -> Result<Self, StrKeyError> {
        match strkey::parse(s)? {
            Strkey::PublicKeyEd25519(key) => Ok(Self(key.0)),
            other => Err(strkey::wrong_type(ACCOUNT, &other)),
        }
    }

    /// Render as a `G…` StrKey.
    pub fn to_strkey(&self) -> String {
        strkey::account(&self.0)
    }

    /// The raw ed25519 public key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_strkey())
    }
}

impl FromStr for AccountId {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_strkey(s)
    }
}

strkey_serde!(AccountId);

// ---------------------------------------------------------------------------
// MuxedAccount
// ---------------------------------------------------------------------------

const MUXED_OR_ACCOUNT: &str = "account id (G...) or muxed account (M...)";

/// A transaction or operation source / destination: either a plain
/// ed25519 account or an account multiplexed with a 64-bit id.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum MuxedAccount {
    /// `G…`
    Ed25519([u8; 32]),
    /// `M…`: the ed25519 key followed by a big-endian id.
    MuxedEd25519 {
        /// Multiplexing id.
        id: u64,
        /// Underlying account key.
        ed25519: [u8; 32],
    },
}

impl MuxedAccount {
    /// Parse a `G…` or `M…` StrKey.
    pub fn from_strkey(s: &str) -> Result<Self, StrKeyError> {
        match strkey::parse(s)? {
            Strkey::PublicKeyEd25519(key) => Ok(Self::Ed25519(key.0)),
            Strkey::MuxedAccountEd25519(muxed) => Ok(Self::MuxedEd25519 {
                id: muxed.id,
                ed25519: muxed.ed25519,
            }),
            other => Err(strkey::wrong_type(MUXED_OR_ACCOUNT, &other)),
        }
    }

    /// Render as `G…` or `M…`.
    pub fn to_strkey(&self) -> String {
        match self {
            Self::Ed25519(key) => strkey::account(key),
            Self::MuxedEd25519 { id, ed25519 } => strkey::muxed_account(ed25519, *id),
        }
    }

    /// The underlying account, dropping any multiplexing id.
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::Ed25519(key) | Self::MuxedEd25519 { ed25519: key, .. } => AccountId(*key),
        }
    }
}

impl From<AccountId> for MuxedAccount {
    fn from(account: AccountId) -> Self {
        Self::Ed25519(account.0)
    }
}

impl fmt::Display for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl fmt::Debug for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MuxedAccount({})", self.to_strkey())
    }
}

impl FromStr for MuxedAccount {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_strkey(s)
    }
}

strkey_serde!(MuxedAccount);

// ---------------------------------------------------------------------------
// SignerKey
// ---------------------------------------------------------------------------

const ANY_SIGNER: &str = "signer key (G..., T..., X... or P...)";

/// A key that may sign for an account.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum SignerKey {
    /// `G…` ed25519 public key.
    Ed25519([u8; 32]),
    /// `T…` hash of a pre-authorized transaction.
    PreAuthTx(Hash),
    /// `X…` sha256 of a preimage the signer reveals.
    HashX(Hash),
    /// `P…` ed25519 key that must sign the given payload.
    Ed25519SignedPayload {
        /// Signing key.
        ed25519: [u8; 32],
        /// Payload the signature covers (at most 64 bytes).
        payload: Vec<u8>,
    },
}

impl SignerKey {
    /// Parse a `G…`, `T…`, `X…` or `P…` StrKey.
    pub fn from_strkey(s: &str) -> Result<Self, StrKeyError> {
        match strkey::parse(s)? {
            Strkey::PublicKeyEd25519(key) => Ok(Self::Ed25519(key.0)),
            Strkey::PreAuthTx(hash) => Ok(Self::PreAuthTx(hash.0)),
            Strkey::HashX(hash) => Ok(Self::HashX(hash.0)),
            Strkey::SignedPayloadEd25519(signed) => Ok(Self::Ed25519SignedPayload {
                ed25519: signed.ed25519,
                payload: signed.payload,
            }),
            other => Err(strkey::wrong_type(ANY_SIGNER, &other)),
        }
    }

    /// Render as a StrKey of the matching type.
    pub fn to_strkey(&self) -> String {
        match self {
            Self::Ed25519(key) => strkey::account(key),
            Self::PreAuthTx(hash) => strkey::pre_auth_tx(hash),
            Self::HashX(hash) => strkey::hash_x(hash),
            Self::Ed25519SignedPayload { ed25519, payload } => strkey::signed_payload(ed25519, payload),
        }
    }

    /// Checks the model rules the StrKey form cannot express on its own.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Ed25519SignedPayload { payload, .. } if payload.len() > MAX_SIGNED_PAYLOAD_LEN => {
                Err(format!(
                    "signed payload is {} bytes, maximum {}",
                    payload.len(),
                    MAX_SIGNED_PAYLOAD_LEN
                ))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl fmt::Debug for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignerKey({})", self.to_strkey())
    }
}

impl FromStr for SignerKey {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_strkey(s)
    }
}

strkey_serde!(SignerKey);

// ---------------------------------------------------------------------------
// ContractId
// ---------------------------------------------------------------------------

/// A smart-contract id, rendered as `C…`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractId(pub Hash);

impl ContractId {
    /// Parse a `C…` StrKey.
    pub fn from_strkey(s: &str) -> Result<Self, StrKeyError> {
        match strkey::parse(s)? {
            Strkey::Contract(id) => Ok(Self(id.0)),
            other => Err(strkey::wrong_type("contract (C...)", &other)),
        }
    }

    /// Render as a `C…` StrKey.
    pub fn to_strkey(&self) -> String {
        strkey::contract(&self.0)
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl fmt::Debug for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractId({})", self.to_strkey())
    }
}

impl FromStr for ContractId {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_strkey(s)
    }
}

strkey_serde!(ContractId);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
