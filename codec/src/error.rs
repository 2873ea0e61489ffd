//! Error types for the txrep codec.
//!
//! Decoding is fail-fast: the first structural or value error aborts the
//! whole call and is returned as a [`TxRepError`] carrying the fully
//! qualified key path where it happened. Nothing is ever coerced into a
//! "best guess" transaction.

use thiserror::Error;

/// Errors produced by the binary wire layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XdrError {
    /// The bytes are not a well-formed envelope: truncated input, an
    /// unknown discriminant, non-zero padding or trailing bytes.
    #[error("{0}")]
    Wire(String),

    /// A variant the schema defines but this codec does not represent.
    #[error("unsupported {ty} variant {value}")]
    Unsupported {
        /// Schema type being converted.
        ty: &'static str,
        /// Wire name of the variant.
        value: String,
    },

    /// A well-framed value that violates a schema or model rule.
    #[error("invalid {ty}: {reason}")]
    InvalidValue {
        /// Schema type being converted.
        ty: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A variable-length value longer than its declared maximum.
    #[error("{ty} length {len} exceeds maximum {max}")]
    LengthExceeded {
        /// Schema type being read or written.
        ty: &'static str,
        /// Declared maximum.
        max: usize,
        /// Actual length.
        len: usize,
    },
}

impl From<stellar_xdr::curr::Error> for XdrError {
    fn from(err: stellar_xdr::curr::Error) -> Self {
        Self::Wire(err.to_string())
    }
}

/// Errors produced by the text codec and the bridge entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxRepError {
    /// A non-blank line without a `key: value` shape.
    #[error("line {line}: expected `key: value`")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
    },

    /// The same key was assigned twice.
    #[error("duplicate key `{0}`")]
    DuplicateKey(String),

    /// A required key is absent.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A key is present but its value does not parse as the field's type.
    #[error("invalid value for `{path}`: {reason}")]
    InvalidFieldValue {
        /// Fully qualified key path.
        path: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// An identifier failed to decode as the expected StrKey type.
    #[error("invalid account id for `{path}`: {reason}")]
    InvalidAccountId {
        /// Fully qualified key path.
        path: String,
        /// Why the StrKey was rejected.
        reason: String,
    },

    /// A discriminator string names no known variant.
    #[error("unsupported variant `{value}` for `{path}`")]
    UnsupportedVariant {
        /// Fully qualified key path.
        path: String,
        /// The unrecognized discriminator.
        value: String,
    },

    /// A declared array length disagrees with the indexed elements present.
    #[error("length mismatch for `{path}`: declared {declared}, {reason}")]
    LengthMismatch {
        /// Path of the array (without `.len`).
        path: String,
        /// The declared length.
        declared: usize,
        /// Which index was missing or unexpected.
        reason: String,
    },

    /// The binary form could not be read or written.
    #[error("xdr: {0}")]
    Xdr(#[from] XdrError),

    /// The bridge input is not valid base64.
    #[error("invalid base64: {0}")]
    Base64(String),
}

impl TxRepError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(path: &str, value: &str) -> Self {
        Self::UnsupportedVariant {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    /// The fully qualified key path the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::DuplicateKey(path) | Self::MissingField(path) => Some(path),
            Self::InvalidFieldValue { path, .. }
            | Self::InvalidAccountId { path, .. }
            | Self::UnsupportedVariant { path, .. }
            | Self::LengthMismatch { path, .. } => Some(path),
            Self::MalformedLine { .. } | Self::Xdr(_) | Self::Base64(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_exposed_for_field_errors() {
        let err = TxRepError::invalid("tx.fee", "not a number");
        assert_eq!(err.path(), Some("tx.fee"));
        assert_eq!(
            err.to_string(),
            "invalid value for `tx.fee`: not a number"
        );

        let err = TxRepError::MissingField("tx.seqNum".into());
        assert_eq!(err.path(), Some("tx.seqNum"));

        let err = TxRepError::from(XdrError::LengthExceeded {
            ty: "signatures",
            max: 20,
            len: 21,
        });
        assert_eq!(err.path(), None);
        assert_eq!(err.to_string(), "xdr: signatures length 21 exceeds maximum 20");
    }
}
