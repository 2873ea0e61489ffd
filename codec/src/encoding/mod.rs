//! # Primitive Codecs
//!
//! Leaf encodings every other layer is built on:
//!
//! - **strkey** — base32-with-checksum identifiers (`G…`, `M…`, `C…`, …).
//! - **amount** — fixed-point decimal ↔ integer stroops (7 fractional digits).
//! - **bytes** — hexadecimal for opaque byte fields.
//!
//! None of these know about key paths. Callers in the text layer wrap their
//! errors with the path of the field being parsed.

pub mod amount;
pub mod bytes;
pub mod strkey;

pub use amount::{format_stroops, parse_amount, AmountError};
pub use bytes::{decode_hex, decode_hex_array, encode_hex};
pub use strkey::StrKeyError;
