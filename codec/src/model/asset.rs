//! Assets, asset codes, prices and the pool-share asset forms.
//!
//! In text an asset is either `XLM` (native) or `CODE:ISSUER`. The code
//! length picks the wire variant: 1–4 characters is alphanum4, 5–12 is
//! alphanum12. The binary reader applies the same rule in reverse, so an
//! alphanum12 asset with a three-letter code is rejected instead of being
//! silently displayed as its alphanum4 twin.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::account::{AccountId, Hash};
use crate::config::{ASSET_CODE12_MAX_LEN, ASSET_CODE4_MAX_LEN, NATIVE_ASSET_CODE};
use crate::encoding::strkey::StrKeyError;

/// Errors from parsing or validating an asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Not `XLM` and not `CODE:ISSUER`.
    #[error("expected `XLM` or `CODE:ISSUER`, got `{0}`")]
    InvalidFormat(String),

    /// Code is empty, too long, or has characters outside `[A-Za-z0-9]`.
    #[error("invalid asset code `{0}`")]
    InvalidCode(String),

    /// The issuer is not a valid `G…` account.
    #[error("invalid issuer: {0}")]
    InvalidIssuer(StrKeyError),
}

// ---------------------------------------------------------------------------
// Asset codes
// ---------------------------------------------------------------------------

/// Validate zero-padded code bytes as stored on the wire and return the
/// code length. The code must be non-empty, alphanumeric, and followed only
/// by zero bytes.
pub fn code_len(bytes: &[u8]) -> Result<usize, AssetError> {
    let len = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    let lossy = || String::from_utf8_lossy(bytes).trim_end_matches('\0').to_string();
    if len == 0
        || !bytes[..len].iter().all(|b| b.is_ascii_alphanumeric())
        || bytes[len..].iter().any(|b| *b != 0)
    {
        return Err(AssetError::InvalidCode(lossy()));
    }
    Ok(len)
}

fn code_str(bytes: &[u8]) -> &str {
    let len = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    // Validated alphanumeric ASCII on every construction path.
    std::str::from_utf8(&bytes[..len]).unwrap_or_default()
}

/// Code of an issued asset without its issuer (used by allow-trust).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCode {
    /// 1–4 characters.
    CreditAlphanum4([u8; 4]),
    /// 5–12 characters.
    CreditAlphanum12([u8; 12]),
}

impl AssetCode {
    /// Build from a code string, choosing the variant by length.
    pub fn from_code(code: &str) -> Result<Self, AssetError> {
        let bytes = code.as_bytes();
        if bytes.is_empty()
            || bytes.len() > ASSET_CODE12_MAX_LEN
            || !bytes.iter().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(AssetError::InvalidCode(code.to_string()));
        }
        if bytes.len() <= ASSET_CODE4_MAX_LEN {
            let mut out = [0u8; 4];
            out[..bytes.len()].copy_from_slice(bytes);
            Ok(Self::CreditAlphanum4(out))
        } else {
            let mut out = [0u8; 12];
            out[..bytes.len()].copy_from_slice(bytes);
            Ok(Self::CreditAlphanum12(out))
        }
    }

    /// Check the wire bytes: valid code, and a length that selects this
    /// very variant.
    pub fn validate(&self) -> Result<(), AssetError> {
        match self {
            Self::CreditAlphanum4(bytes) => code_len(bytes).map(|_| ()),
            Self::CreditAlphanum12(bytes) => {
                if code_len(bytes)? <= ASSET_CODE4_MAX_LEN {
                    return Err(AssetError::InvalidCode(code_str(bytes).to_string()));
                }
                Ok(())
            }
        }
    }

    /// The code as text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::CreditAlphanum4(bytes) => code_str(bytes),
            Self::CreditAlphanum12(bytes) => code_str(bytes),
        }
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// Alphanum4 asset body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlphaNum4 {
    /// Zero-padded code.
    pub asset_code: [u8; 4],
    /// Issuing account.
    pub issuer: AccountId,
}

/// Alphanum12 asset body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlphaNum12 {
    /// Zero-padded code.
    pub asset_code: [u8; 12],
    /// Issuing account.
    pub issuer: AccountId,
}

/// An asset: native, or issued by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// The native asset (`XLM`).
    Native,
    /// Code of 1–4 characters.
    CreditAlphanum4(AlphaNum4),
    /// Code of 5–12 characters.
    CreditAlphanum12(AlphaNum12),
}

impl Asset {
    /// An issued asset, with the variant chosen by code length.
    pub fn issued(code: &str, issuer: AccountId) -> Result<Self, AssetError> {
        Ok(match AssetCode::from_code(code)? {
            AssetCode::CreditAlphanum4(asset_code) => {
                Self::CreditAlphanum4(AlphaNum4 { asset_code, issuer })
            }
            AssetCode::CreditAlphanum12(asset_code) => {
                Self::CreditAlphanum12(AlphaNum12 { asset_code, issuer })
            }
        })
    }

    /// Display code: `XLM` for native, otherwise the issued code.
    pub fn code(&self) -> &str {
        match self {
            Self::Native => NATIVE_ASSET_CODE,
            Self::CreditAlphanum4(a) => code_str(&a.asset_code),
            Self::CreditAlphanum12(a) => code_str(&a.asset_code),
        }
    }

    /// Check wire-level code rules (see [`AssetCode::validate`]).
    pub fn validate(&self) -> Result<(), AssetError> {
        match self {
            Self::Native => Ok(()),
            Self::CreditAlphanum4(a) => AssetCode::CreditAlphanum4(a.asset_code).validate(),
            Self::CreditAlphanum12(a) => AssetCode::CreditAlphanum12(a.asset_code).validate(),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str(NATIVE_ASSET_CODE),
            Self::CreditAlphanum4(a) => write!(f, "{}:{}", code_str(&a.asset_code), a.issuer),
            Self::CreditAlphanum12(a) => write!(f, "{}:{}", code_str(&a.asset_code), a.issuer),
        }
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NATIVE_ASSET_CODE {
            return Ok(Self::Native);
        }
        let (code, issuer) = s
            .split_once(':')
            .ok_or_else(|| AssetError::InvalidFormat(s.to_string()))?;
        let issuer = AccountId::from_strkey(issuer).map_err(AssetError::InvalidIssuer)?;
        Self::issued(code, issuer)
    }
}

// ---------------------------------------------------------------------------
// Price & pool-share forms
// ---------------------------------------------------------------------------

/// A rational price `n / d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Numerator.
    pub n: i32,
    /// Denominator.
    pub d: i32,
}

/// Parameters of a constant-product liquidity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstantProductParameters {
    /// First reserve asset.
    pub asset_a: Asset,
    /// Second reserve asset.
    pub asset_b: Asset,
    /// Fee in basis points.
    pub fee: i32,
}

/// The asset line of a change-trust operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeTrustAsset {
    /// A regular asset.
    Asset(Asset),
    /// Shares of the pool described by these parameters.
    PoolShare(ConstantProductParameters),
}

/// The asset of a trustline ledger key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrustLineAsset {
    /// A regular asset.
    Asset(Asset),
    /// Shares of the pool with this 32-byte id.
    PoolShare(Hash),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "GAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB7JZX";

    #[test]
    fn parses_native_and_issued() {
        assert_eq!("XLM".parse::<Asset>().unwrap(), Asset::Native);

        let usd: Asset = format!("USD:{}", ISSUER).parse().unwrap();
        assert!(matches!(usd, Asset::CreditAlphanum4(_)));
        assert_eq!(usd.code(), "USD");
        assert_eq!(usd.to_string(), format!("USD:{}", ISSUER));

        let long: Asset = format!("LONGCODE:{}", ISSUER).parse().unwrap();
        assert!(matches!(long, Asset::CreditAlphanum12(_)));
        assert_eq!(long.code(), "LONGCODE");
    }

    #[test]
    fn code_length_selects_variant_at_boundary() {
        let issuer = AccountId::from_strkey(ISSUER).unwrap();
        assert!(matches!(
            Asset::issued("ABCD", issuer).unwrap(),
            Asset::CreditAlphanum4(_)
        ));
        assert!(matches!(
            Asset::issued("ABCDE", issuer).unwrap(),
            Asset::CreditAlphanum12(_)
        ));
        assert!(Asset::issued("ABCDEFGHIJKLM", issuer).is_err());
        assert!(Asset::issued("", issuer).is_err());
        assert!(Asset::issued("US-D", issuer).is_err());
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(matches!(
            "native".parse::<Asset>(),
            Err(AssetError::InvalidFormat(_))
        ));
        assert!(matches!(
            "USD:GBAD".parse::<Asset>(),
            Err(AssetError::InvalidIssuer(_))
        ));
        assert!(matches!(
            format!("USD:{}:extra", ISSUER).parse::<Asset>(),
            Err(AssetError::InvalidIssuer(_))
        ));
    }

    #[test]
    fn wire_code_validation() {
        assert_eq!(code_len(b"USD\0"), Ok(3));
        assert_eq!(code_len(b"ABCD"), Ok(4));
        assert!(code_len(b"\0\0\0\0").is_err());
        assert!(code_len(b"U\0S\0").is_err());
        assert!(code_len(b"U$D\0").is_err());

        let short12 = AssetCode::CreditAlphanum12(*b"USD\0\0\0\0\0\0\0\0\0");
        assert!(short12.validate().is_err());
        let ok12 = AssetCode::CreditAlphanum12(*b"USDCOIN\0\0\0\0\0");
        assert!(ok12.validate().is_ok());
        assert_eq!(ok12.as_str(), "USDCOIN");
    }
}
