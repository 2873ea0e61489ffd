//! Line grammar: `key: value` lines in, typed field reads out; and the
//! ordered line emitter used by the encoder.
//!
//! Values stay raw strings until a typed reader consumes them, so every
//! conversion error can name the exact key it came from.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::str::FromStr;

use crate::encoding::amount::{format_stroops, parse_amount};
use crate::encoding::bytes::{decode_hex, decode_hex_array, encode_hex};
use crate::error::TxRepError;
use crate::model::{AccountId, Asset, AssetCode, AssetError, ContractId, MuxedAccount, SignerKey};

/// `<path>.<name>`
pub(crate) fn join(path: &str, name: &str) -> String {
    format!("{}.{}", path, name)
}

/// `<path>[<i>]`
pub(crate) fn at(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i)
}

/// Parse text into a [`Fields`] lookup.
pub fn parse_lines(text: &str) -> Result<Fields, TxRepError> {
    Fields::parse(text)
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// All `key: value` assignments of a document, keyed by full path.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    map: BTreeMap<String, String>,
}

impl Fields {
    /// Split each non-blank line at its first `:`. Keys and values are
    /// trimmed; an empty key, a missing `:`, or a repeated key is an error.
    pub fn parse(text: &str) -> Result<Self, TxRepError> {
        let mut map = BTreeMap::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once(':')
                .ok_or(TxRepError::MalformedLine { line: n + 1 })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(TxRepError::MalformedLine { line: n + 1 });
            }
            if map.insert(key.to_string(), value.trim().to_string()).is_some() {
                return Err(TxRepError::DuplicateKey(key.to_string()));
            }
        }
        Ok(Self { map })
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.map.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.map.contains_key(path)
    }

    /// The raw value at `path`.
    pub fn str(&self, path: &str) -> Result<&str, TxRepError> {
        self.get(path)
            .ok_or_else(|| TxRepError::MissingField(path.to_string()))
    }

    /// Leading integer token of the value; anything after the first
    /// whitespace is commentary (e.g. `1000 (0.0001000 XLM)`).
    fn integer<T: FromStr>(&self, path: &str, signed: bool) -> Result<T, TxRepError> {
        let raw = self.str(path)?;
        let token = raw.split_whitespace().next().unwrap_or("");
        let digits = match token.strip_prefix('-') {
            Some(rest) if signed => rest,
            _ => token,
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TxRepError::invalid(
                path,
                format!("expected {} integer, got `{}`", if signed { "an" } else { "an unsigned" }, raw),
            ));
        }
        token
            .parse()
            .map_err(|_| TxRepError::invalid(path, format!("`{}` out of range", token)))
    }

    pub fn u32(&self, path: &str) -> Result<u32, TxRepError> {
        self.integer(path, false)
    }

    pub fn i32(&self, path: &str) -> Result<i32, TxRepError> {
        self.integer(path, true)
    }

    pub fn u64(&self, path: &str) -> Result<u64, TxRepError> {
        self.integer(path, false)
    }

    pub fn i64(&self, path: &str) -> Result<i64, TxRepError> {
        self.integer(path, true)
    }

    /// A stroop count. The leading token is either the integer count or,
    /// when it contains a `.`, a decimal amount with up to seven
    /// fractional digits (`100.5` reads as `1005000000`).
    pub fn amount(&self, path: &str) -> Result<i64, TxRepError> {
        let raw = self.str(path)?;
        let token = raw.split_whitespace().next().unwrap_or("");
        if token.contains('.') {
            return parse_amount(token)
                .map_err(|e| TxRepError::invalid(path, format!("`{}`: {}", token, e)));
        }
        self.i64(path)
    }

    pub fn u128(&self, path: &str) -> Result<u128, TxRepError> {
        self.integer(path, false)
    }

    pub fn i128(&self, path: &str) -> Result<i128, TxRepError> {
        self.integer(path, true)
    }

    pub fn bool(&self, path: &str) -> Result<bool, TxRepError> {
        match self.str(path)? {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(TxRepError::invalid(
                path,
                format!("expected `true` or `false`, got `{}`", other),
            )),
        }
    }

    /// The `<path>._present` flag of an optional field.
    pub fn present(&self, path: &str) -> Result<bool, TxRepError> {
        self.bool(&join(path, "_present"))
    }

    /// The declared length `<path>.len` of an array.
    ///
    /// The indices that appear under `<path>[` must be exactly
    /// `0..len`, each written canonically; a gap, a surplus element or an
    /// index like `01` is a [`TxRepError::LengthMismatch`].
    pub fn len_of(&self, path: &str) -> Result<usize, TxRepError> {
        let declared = self.u32(&join(path, "len"))? as usize;
        let prefix = format!("{}[", path);
        let mismatch = |reason: String| TxRepError::LengthMismatch {
            path: path.to_string(),
            declared,
            reason,
        };

        let mut seen = BTreeSet::new();
        for key in self
            .map
            .range(prefix.clone()..)
            .map(|(k, _)| k)
            .take_while(|k| k.starts_with(&prefix))
        {
            let rest = &key[prefix.len()..];
            let digits = rest.split(']').next().unwrap_or("");
            match digits.parse::<usize>() {
                Ok(i) if rest.len() > digits.len() && i.to_string() == digits => {
                    if i >= declared {
                        return Err(mismatch(format!("found element {}", i)));
                    }
                    seen.insert(i);
                }
                _ => return Err(mismatch(format!("malformed element key `{}`", key))),
            }
        }
        if seen.len() != declared {
            let missing = (0..declared).find(|i| !seen.contains(i)).unwrap_or(declared);
            return Err(mismatch(format!("element {} is missing", missing)));
        }
        Ok(declared)
    }

    /// Like [`Fields::len_of`], with an upper bound from the wire schema.
    pub fn bounded_len(&self, path: &str, max: usize) -> Result<usize, TxRepError> {
        let len = self.len_of(path)?;
        if len > max {
            return Err(TxRepError::invalid(
                &join(path, "len"),
                format!("{} elements, maximum {}", len, max),
            ));
        }
        Ok(len)
    }

    pub fn hex(&self, path: &str) -> Result<Vec<u8>, TxRepError> {
        decode_hex(self.str(path)?).map_err(|e| TxRepError::invalid(path, e.to_string()))
    }

    /// Hex of at most `max` bytes.
    pub fn bounded_hex(&self, path: &str, max: usize) -> Result<Vec<u8>, TxRepError> {
        let bytes = self.hex(path)?;
        if bytes.len() > max {
            return Err(TxRepError::invalid(
                path,
                format!("{} bytes, maximum {}", bytes.len(), max),
            ));
        }
        Ok(bytes)
    }

    pub fn hex_array<const N: usize>(&self, path: &str) -> Result<[u8; N], TxRepError> {
        decode_hex_array(self.str(path)?).map_err(|e| {
            TxRepError::invalid(path, format!("expected {} bytes of hex: {}", N, e))
        })
    }

    /// A JSON-quoted string of at most `max` bytes.
    pub fn string(&self, path: &str, max: usize) -> Result<String, TxRepError> {
        let raw = self.str(path)?;
        if !raw.starts_with('"') {
            return Err(TxRepError::invalid(path, "expected a double-quoted string"));
        }
        let s: String = serde_json::from_str(raw)
            .map_err(|e| TxRepError::invalid(path, format!("bad quoted string: {}", e)))?;
        if s.len() > max {
            return Err(TxRepError::invalid(
                path,
                format!("{} bytes, maximum {}", s.len(), max),
            ));
        }
        Ok(s)
    }

    /// Bytes of a wire string of at most `max` bytes: a JSON-quoted string,
    /// or `0x` followed by hex when the bytes are not UTF-8.
    pub fn text(&self, path: &str, max: usize) -> Result<Vec<u8>, TxRepError> {
        let raw = self.str(path)?;
        let bytes = match raw.strip_prefix("0x") {
            Some(digits) => {
                decode_hex(digits).map_err(|e| TxRepError::invalid(path, e.to_string()))?
            }
            None if raw.starts_with('"') => self.string(path, max)?.into_bytes(),
            None => {
                return Err(TxRepError::invalid(
                    path,
                    "expected a double-quoted string or 0x-prefixed hex",
                ))
            }
        };
        if bytes.len() > max {
            return Err(TxRepError::invalid(
                path,
                format!("{} bytes, maximum {}", bytes.len(), max),
            ));
        }
        Ok(bytes)
    }

    pub fn account_id(&self, path: &str) -> Result<AccountId, TxRepError> {
        AccountId::from_strkey(self.str(path)?).map_err(|e| account_error(path, e))
    }

    pub fn muxed_account(&self, path: &str) -> Result<MuxedAccount, TxRepError> {
        MuxedAccount::from_strkey(self.str(path)?).map_err(|e| account_error(path, e))
    }

    pub fn signer_key(&self, path: &str) -> Result<SignerKey, TxRepError> {
        let key = SignerKey::from_strkey(self.str(path)?).map_err(|e| account_error(path, e))?;
        key.validate().map_err(|reason| TxRepError::invalid(path, reason))?;
        Ok(key)
    }

    pub fn contract_id(&self, path: &str) -> Result<ContractId, TxRepError> {
        ContractId::from_strkey(self.str(path)?).map_err(|e| account_error(path, e))
    }

    /// `XLM` or `CODE:ISSUER`. A sibling `<path>.type` key makes the
    /// assignment ambiguous and is rejected.
    pub fn asset(&self, path: &str) -> Result<Asset, TxRepError> {
        self.reject_ambiguous_asset(path)?;
        self.str(path)?.parse().map_err(|e| asset_error(path, e))
    }

    /// Whether the asset at `path` is written in its structured
    /// (`<path>.type: …`) form rather than as a single value.
    pub fn is_structured_asset(&self, path: &str) -> Result<bool, TxRepError> {
        self.reject_ambiguous_asset(path)?;
        Ok(self.contains(&join(path, "type")))
    }

    fn reject_ambiguous_asset(&self, path: &str) -> Result<(), TxRepError> {
        if self.contains(path) && self.contains(&join(path, "type")) {
            return Err(TxRepError::invalid(
                path,
                format!("both `{}` and `{}.type` are set", path, path),
            ));
        }
        Ok(())
    }

    /// A bare asset code (allow-trust).
    pub fn asset_code(&self, path: &str) -> Result<AssetCode, TxRepError> {
        AssetCode::from_code(self.str(path)?).map_err(|e| asset_error(path, e))
    }
}

fn account_error(path: &str, e: impl Display) -> TxRepError {
    TxRepError::InvalidAccountId {
        path: path.to_string(),
        reason: e.to_string(),
    }
}

fn asset_error(path: &str, e: AssetError) -> TxRepError {
    match e {
        AssetError::InvalidIssuer(inner) => account_error(path, inner),
        other => TxRepError::invalid(path, other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Append-only emitter; lines come out in exactly the order they were
/// written.
#[derive(Debug, Default)]
pub struct LineWriter {
    lines: Vec<String>,
}

impl LineWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&mut self, path: &str, value: impl Display) {
        self.lines.push(format!("{}: {}", path, value));
    }

    pub fn present(&mut self, path: &str, present: bool) {
        self.field(&join(path, "_present"), present);
    }

    pub fn len(&mut self, path: &str, n: usize) {
        self.field(&join(path, "len"), n);
    }

    pub fn hex(&mut self, path: &str, bytes: &[u8]) {
        self.field(path, encode_hex(bytes));
    }

    /// A JSON-quoted string.
    pub fn string(&mut self, path: &str, s: &str) {
        self.field(path, serde_json::Value::String(s.to_string()));
    }

    /// Wire string bytes: JSON-quoted when they are UTF-8, `0x`-prefixed
    /// hex otherwise.
    pub fn text(&mut self, path: &str, bytes: &[u8]) {
        match std::str::from_utf8(bytes) {
            Ok(s) => self.string(path, s),
            Err(_) => self.field(path, format!("0x{}", encode_hex(bytes))),
        }
    }

    /// An amount with its decimal rendering as commentary.
    pub fn amount(&mut self, path: &str, stroops: i64, asset: Option<&Asset>) {
        match asset {
            Some(asset) => self.field(
                path,
                format!("{} ({} {})", stroops, format_stroops(stroops), asset.code()),
            ),
            None => self.field(path, format!("{} ({})", stroops, format_stroops(stroops))),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Join all lines, each terminated by `\n`.
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "GAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB7JZX";

    #[test]
    fn parses_key_value_lines() {
        let fields = Fields::parse("a: 1\n\n  b.c : x:y  \n").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("a"), Some("1"));
        assert_eq!(fields.get("b.c"), Some("x:y"));
    }

    #[test]
    fn malformed_and_duplicate_lines() {
        assert_eq!(
            Fields::parse("a: 1\nno colon here").unwrap_err(),
            TxRepError::MalformedLine { line: 2 }
        );
        assert_eq!(
            Fields::parse(": value").unwrap_err(),
            TxRepError::MalformedLine { line: 1 }
        );
        assert_eq!(
            Fields::parse("a: 1\na: 2").unwrap_err(),
            TxRepError::DuplicateKey("a".into())
        );
    }

    #[test]
    fn integers_take_the_leading_token() {
        let fields = Fields::parse(
            "amt: 1000000000 (100.0000000 XLM)\nneg: -5\nbad: 12abc\nbig: 4294967296\nempty:",
        )
        .unwrap();
        assert_eq!(fields.i64("amt").unwrap(), 1_000_000_000);
        assert_eq!(fields.i64("neg").unwrap(), -5);
        assert!(matches!(fields.u32("neg"), Err(TxRepError::InvalidFieldValue { .. })));
        assert!(matches!(fields.u32("bad"), Err(TxRepError::InvalidFieldValue { .. })));
        assert!(matches!(fields.u32("big"), Err(TxRepError::InvalidFieldValue { .. })));
        assert_eq!(fields.u64("big").unwrap(), 4_294_967_296);
        assert!(matches!(fields.u32("empty"), Err(TxRepError::InvalidFieldValue { .. })));
        assert_eq!(
            fields.u32("absent").unwrap_err(),
            TxRepError::MissingField("absent".into())
        );
    }

    #[test]
    fn plus_sign_is_not_a_digit() {
        let fields = Fields::parse("n: +5").unwrap();
        assert!(fields.i32("n").is_err());
    }

    #[test]
    fn length_must_match_elements_exactly() {
        let ok = Fields::parse("xs.len: 2\nxs[0]: a\nxs[1].y: b\nxsother: c").unwrap();
        assert_eq!(ok.len_of("xs").unwrap(), 2);

        let gap = Fields::parse("xs.len: 2\nxs[0]: a\nxs[2]: c").unwrap();
        assert!(matches!(gap.len_of("xs"), Err(TxRepError::LengthMismatch { .. })));

        let missing = Fields::parse("xs.len: 2\nxs[0]: a").unwrap();
        match missing.len_of("xs") {
            Err(TxRepError::LengthMismatch { declared, reason, .. }) => {
                assert_eq!(declared, 2);
                assert!(reason.contains("element 1"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let padded = Fields::parse("xs.len: 1\nxs[00]: a").unwrap();
        assert!(matches!(padded.len_of("xs"), Err(TxRepError::LengthMismatch { .. })));

        let empty = Fields::parse("xs.len: 0").unwrap();
        assert_eq!(empty.len_of("xs").unwrap(), 0);
        assert!(empty.bounded_len("xs", 0).is_ok());

        let over = Fields::parse("xs.len: 1\nxs[0]: a").unwrap();
        assert!(over.bounded_len("xs", 0).is_err());
    }

    #[test]
    fn quoted_strings() {
        let fields = Fields::parse(
            "a: \"hello \\\"world\\\"\"\nb: unquoted\nc: \"toolong\"\nd: \"x\" trailing",
        )
        .unwrap();
        assert_eq!(fields.string("a", 28).unwrap(), "hello \"world\"");
        assert!(fields.string("b", 28).is_err());
        assert!(fields.string("c", 3).is_err());
        assert!(fields.string("d", 28).is_err());
    }

    #[test]
    fn decimal_amounts_are_read_as_stroops() {
        let fields = Fields::parse(
            "a: 100.5 XLM\nb: 1000000000 (100.0000000 XLM)\nc: 0.00000001\nd: -0.5",
        )
        .unwrap();
        assert_eq!(fields.amount("a").unwrap(), 1_005_000_000);
        assert_eq!(fields.amount("b").unwrap(), 1_000_000_000);
        assert!(matches!(fields.amount("c"), Err(TxRepError::InvalidFieldValue { .. })));
        assert_eq!(fields.amount("d").unwrap(), -5_000_000);
    }

    #[test]
    fn text_accepts_quoted_or_hex_bytes() {
        let fields =
            Fields::parse("a: \"hi\"\nb: 0xff00fe\nc: bare\nd: 0xabc\ne: 0x6869").unwrap();
        assert_eq!(fields.text("a", 28).unwrap(), b"hi".to_vec());
        assert_eq!(fields.text("b", 28).unwrap(), vec![0xff, 0x00, 0xfe]);
        assert!(fields.text("b", 2).is_err());
        assert!(fields.text("c", 28).is_err());
        assert!(fields.text("d", 28).is_err());
        assert_eq!(fields.text("e", 28).unwrap(), b"hi".to_vec());

        let mut w = LineWriter::new();
        w.text("a", b"hi");
        w.text("b", &[0xff, 0x00, 0xfe]);
        assert_eq!(w.finish(), "a: \"hi\"\nb: 0xff00fe\n");
    }

    #[test]
    fn hex_fields() {
        let fields = Fields::parse("h: 0a0B\nodd: abc\nhint: 01020304").unwrap();
        assert_eq!(fields.hex("h").unwrap(), vec![0x0a, 0x0b]);
        assert!(fields.hex("odd").is_err());
        assert_eq!(fields.hex_array::<4>("hint").unwrap(), [1, 2, 3, 4]);
        assert!(fields.hex_array::<4>("h").is_err());
        assert!(fields.bounded_hex("hint", 3).is_err());
    }

    #[test]
    fn identifiers_map_to_account_errors() {
        let fields = Fields::parse(&format!("a: {}\nb: GBAD\nc: BTC:GBAD", ACCOUNT)).unwrap();
        assert!(fields.account_id("a").is_ok());
        assert!(matches!(
            fields.account_id("b"),
            Err(TxRepError::InvalidAccountId { .. })
        ));
        assert!(matches!(
            fields.asset("c"),
            Err(TxRepError::InvalidAccountId { .. })
        ));
    }

    #[test]
    fn ambiguous_asset_rejected() {
        let fields = Fields::parse("line: XLM\nline.type: ASSET_TYPE_NATIVE").unwrap();
        assert!(matches!(
            fields.asset("line"),
            Err(TxRepError::InvalidFieldValue { .. })
        ));
        assert!(fields.is_structured_asset("line").is_err());
    }

    #[test]
    fn writer_emits_in_order() {
        let mut w = LineWriter::new();
        w.field("tx.fee", 100);
        w.present("tx.memo", false);
        w.len("sigs", 0);
        w.amount("amt", 1_000_000_000, Some(&Asset::Native));
        w.amount("raw", -5, None);
        w.string("s", "a\"b");
        assert_eq!(w.line_count(), 6);
        assert_eq!(
            w.finish(),
            "tx.fee: 100\ntx.memo._present: false\nsigs.len: 0\n\
             amt: 1000000000 (100.0000000 XLM)\nraw: -5 (-0.0000005)\ns: \"a\\\"b\"\n"
        );
    }
}
