//! Hexadecimal for opaque byte fields (hashes, signatures, data values).
//!
//! Output is always lower-case. Input must have even length and only hex
//! digits; fixed-size fields must also have exactly the right length.

pub use hex::FromHexError;

/// Lower-case hex of `bytes`.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a variable-length hex string.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, FromHexError> {
    hex::decode(s)
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N], FromHexError> {
    let mut out = [0u8; N];
    hex::decode_to_slice(s, &mut out)?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
