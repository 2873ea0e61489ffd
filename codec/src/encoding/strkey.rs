//! # StrKey — checksummed identifiers
//!
//! Every account, signer and contract identifier in the text form is a
//! StrKey:
//!
//! ```text
//! base32( version_byte || payload || crc16_xmodem(version_byte || payload) )
//! ```
//!
//! The codec itself is `stellar-strkey`. This module narrows it to what the
//! text form needs: a single strict [`parse`] that also insists on the
//! canonical spelling, readable key-type names for error messages, and one
//! encoder per key type.
//!
//! A StrKey that parses re-encodes to exactly the same string.

use stellar_strkey::{ed25519, Contract, HashX, PreAuthTx, Strkey};
use thiserror::Error;

use crate::config::MAX_SIGNED_PAYLOAD_LEN;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a StrKey string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrKeyError {
    /// Bad alphabet, bad checksum, unknown version byte or bad length.
    #[error("invalid strkey")]
    Invalid,

    /// A well-formed StrKey of a type the field does not accept.
    #[error("expected {expected}, got {got}")]
    WrongType {
        /// Key types the field accepts.
        expected: &'static str,
        /// Key type actually found.
        got: &'static str,
    },

    /// Decodes, but does not re-encode to the same string.
    #[error("non-canonical encoding")]
    NonCanonical,

    /// A signed-payload signer whose payload is over the wire maximum.
    #[error("signed payload is {0} bytes, maximum {}", MAX_SIGNED_PAYLOAD_LEN)]
    PayloadTooLong(usize),
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

/// Parse any StrKey, requiring the canonical spelling.
pub fn parse(s: &str) -> Result<Strkey, StrKeyError> {
    let key = Strkey::from_string(s).map_err(|_| StrKeyError::Invalid)?;
    if let Strkey::SignedPayloadEd25519(signed) = &key {
        if signed.payload.len() > MAX_SIGNED_PAYLOAD_LEN {
            return Err(StrKeyError::PayloadTooLong(signed.payload.len()));
        }
    }
    if key.to_string() != s {
        return Err(StrKeyError::NonCanonical);
    }
    Ok(key)
}

/// Human-readable key type, used in error messages.
#[allow(unreachable_patterns)]
pub fn kind(key: &Strkey) -> &'static str {
    match key {
        Strkey::PublicKeyEd25519(_) => "account id (G...)",
        Strkey::PrivateKeyEd25519(_) => "secret seed (S...)",
        Strkey::PreAuthTx(_) => "pre-auth tx (T...)",
        Strkey::HashX(_) => "hash-x (X...)",
        Strkey::MuxedAccountEd25519(_) => "muxed account (M...)",
        Strkey::SignedPayloadEd25519(_) => "signed payload (P...)",
        Strkey::Contract(_) => "contract (C...)",
        _ => "unsupported key type",
    }
}

/// The error for a parsed key of the wrong type.
pub fn wrong_type(expected: &'static str, key: &Strkey) -> StrKeyError {
    StrKeyError::WrongType {
        expected,
        got: kind(key),
    }
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// `G…`
pub fn account(key: &[u8; 32]) -> String {
    ed25519::PublicKey(*key).to_string()
}

/// `M…`
pub fn muxed_account(ed25519: &[u8; 32], id: u64) -> String {
    ed25519::MuxedAccount {
        ed25519: *ed25519,
        id,
    }
    .to_string()
}

/// `T…`
pub fn pre_auth_tx(hash: &[u8; 32]) -> String {
    PreAuthTx(*hash).to_string()
}

/// `X…`
pub fn hash_x(hash: &[u8; 32]) -> String {
    HashX(*hash).to_string()
}

/// `P…`
pub fn signed_payload(ed25519: &[u8; 32], payload: &[u8]) -> String {
    ed25519::SignedPayload {
        ed25519: *ed25519,
        payload: payload.to_vec(),
    }
    .to_string()
}

/// `C…`
pub fn contract(id: &[u8; 32]) -> String {
    Contract(*id).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";
    const MUXED: &str = "MAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6AAAAAAAAAAE2KZ3Q";

    fn sequential() -> [u8; 32] {
        let mut key = [0u8; 32];
        for (i, b) in key.iter_mut().enumerate() {
            *b = i as u8;
        }
        key
    }

    #[test]
    fn encodes_known_account_vectors() {
        assert_eq!(account(&[0u8; 32]), ZERO_ACCOUNT);
        assert_eq!(
            account(&sequential()),
            "GAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB7JZX"
        );
    }

    #[test]
    fn encodes_known_vectors_for_other_types() {
        assert_eq!(
            contract(&[3u8; 32]),
            "CABQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQGCK3"
        );
        assert_eq!(
            pre_auth_tx(&[4u8; 32]),
            "TACAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIUV6"
        );
        assert_eq!(
            hash_x(&[5u8; 32]),
            "XACQKBIFAUCQKBIFAUCQKBIFAUCQKBIFAUCQKBIFAUCQKBIFAUCQK7IF"
        );
        assert_eq!(muxed_account(&sequential(), 1234), MUXED);
        assert_eq!(
            signed_payload(&[1u8; 32], &[9u8; 5]),
            "PAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAAAAACQSCIJBEEQAAAAXLTA"
        );
    }

    #[test]
    fn parse_returns_the_key_type() {
        match parse(ZERO_ACCOUNT).unwrap() {
            Strkey::PublicKeyEd25519(key) => assert_eq!(key.0, [0u8; 32]),
            other => panic!("unexpected {:?}", other),
        }
        match parse(MUXED).unwrap() {
            Strkey::MuxedAccountEd25519(m) => {
                assert_eq!(m.ed25519, sequential());
                assert_eq!(m.id, 1234);
            }
            other => panic!("unexpected {:?}", other),
        }
        let seed = parse("SAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSU2").unwrap();
        assert_eq!(kind(&seed), "secret seed (S...)");
        assert_eq!(
            wrong_type("account id (G...)", &seed).to_string(),
            "expected account id (G...), got secret seed (S...)"
        );
    }

    #[test]
    fn parse_rejects_corrupted_checksum() {
        let mut s = ZERO_ACCOUNT.to_string();
        s.replace_range(10..11, "B");
        assert_eq!(parse(&s), Err(StrKeyError::Invalid));
    }

    #[test]
    fn parse_rejects_bad_alphabet_and_case() {
        assert!(parse(&ZERO_ACCOUNT.to_lowercase()).is_err());
        assert_eq!(parse("G0AAAA"), Err(StrKeyError::Invalid));
        assert!(parse("").is_err());
    }

    #[test]
    fn parse_rejects_unused_trailing_bits() {
        // The last character of a muxed account carries one bit beyond the
        // payload; only the zero bit is canonical.
        let flipped = format!("{}R", &MUXED[..MUXED.len() - 1]);
        assert!(parse(&flipped).is_err());
    }

    #[test]
    fn signed_payload_roundtrips() {
        let s = signed_payload(&[1u8; 32], &[9u8; 5]);
        match parse(&s).unwrap() {
            Strkey::SignedPayloadEd25519(p) => {
                assert_eq!(p.ed25519, [1u8; 32]);
                assert_eq!(p.payload, vec![9u8; 5]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
