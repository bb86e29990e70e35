//! NVP field codec
//!
//! Encodes single `(name, value)` pairs into the gateway's length-prefixed
//! wire form and decodes a flat wire message back into an ordered
//! [`ParamList`].
//!
//! # Wire grammar
//!
//! ```text
//! MESSAGE := FIELD ("&" FIELD)*
//! FIELD   := NAME "[" LEN "]" "=" VALUE
//! ```
//!
//! `LEN` is the exact byte length of `VALUE`. The length tag is what makes
//! the format safe for free-text values: a street address containing `&` or
//! `=` round-trips untouched because the decoder consumes exactly `LEN`
//! bytes instead of scanning for the next delimiter. Bare `NAME=VALUE`
//! fields (the form the live gateway answers with) are also accepted and
//! parsed by scanning to the next `&`.

use crate::{PayflowError, Result};

/// Field separator on the wire
pub const FIELD_SEPARATOR: char = '&';

/// Key/value separator on the wire
pub const VALUE_SEPARATOR: char = '=';

/// Append one encoded field to a wire buffer.
///
/// Contributes nothing when `value` is empty; absent values never appear on
/// the wire as empty-string pairs.
pub fn append_field(buf: &mut String, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if !buf.is_empty() {
        buf.push(FIELD_SEPARATOR);
    }
    buf.push_str(name);
    buf.push('[');
    buf.push_str(&value.len().to_string());
    buf.push(']');
    buf.push(VALUE_SEPARATOR);
    buf.push_str(value);
}

/// Encode a single field as a standalone wire fragment
pub fn encode_field(name: &str, value: &str) -> String {
    let mut buf = String::new();
    append_field(&mut buf, name, value);
    buf
}

/// Ordered name-to-value mapping produced by [`decode_message`]
///
/// Preserves wire order and supports the claim-and-remove discipline the
/// response decomposer relies on: [`ParamList::take`] removes a key so later
/// consumers only ever see unclaimed keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamList {
    pairs: Vec<(String, String)>,
}

impl ParamList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, preserving insertion order
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Look up a value without claiming it (names are case-sensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Claim a key: remove it from the list and return its value
    pub fn take(&mut self, name: &str) -> Option<String> {
        let idx = self.pairs.iter().position(|(n, _)| n == name)?;
        Some(self.pairs.remove(idx).1)
    }

    /// Number of remaining pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs remain
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate remaining pairs in wire order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ParamList {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut list = Self::new();
        for (n, v) in iter {
            list.push(n, v);
        }
        list
    }
}

/// Decode a full wire message into an ordered [`ParamList`].
///
/// Parsing is driven by the embedded length tag whenever one is present;
/// only bare fields fall back to delimiter scanning. Fails with
/// [`PayflowError::MalformedWireMessage`] on a non-numeric length token, a
/// length overrunning the input, or a missing delimiter after a
/// length-prefixed value. No partial mapping is returned on failure.
pub fn decode_message(wire: &str) -> Result<ParamList> {
    let bytes = wire.as_bytes();
    let mut list = ParamList::new();
    let mut pos = 0;

    while pos < bytes.len() {
        // Name runs to the first '[' or '=' whichever comes first.
        let name_start = pos;
        while pos < bytes.len() && bytes[pos] != b'[' && bytes[pos] != b'=' {
            pos += 1;
        }
        if pos >= bytes.len() {
            return Err(PayflowError::malformed_wire_message(format!(
                "field at byte {} has no value separator",
                name_start
            )));
        }
        let name = &wire[name_start..pos];
        if name.is_empty() {
            return Err(PayflowError::malformed_wire_message(format!(
                "empty field name at byte {}",
                name_start
            )));
        }

        let value = if bytes[pos] == b'[' {
            // Length-prefixed: NAME[LEN]=VALUE
            pos += 1;
            let len_start = pos;
            while pos < bytes.len() && bytes[pos] != b']' {
                pos += 1;
            }
            if pos >= bytes.len() {
                return Err(PayflowError::malformed_wire_message(format!(
                    "unterminated length tag for field {:?}",
                    name
                )));
            }
            let len: usize = wire[len_start..pos].parse().map_err(|_| {
                PayflowError::malformed_wire_message(format!(
                    "non-numeric length tag {:?} for field {:?}",
                    &wire[len_start..pos],
                    name
                ))
            })?;
            pos += 1; // ']'
            if pos >= bytes.len() || bytes[pos] != b'=' {
                return Err(PayflowError::malformed_wire_message(format!(
                    "missing value separator after length tag for field {:?}",
                    name
                )));
            }
            pos += 1; // '='
            // len can be near usize::MAX, so never add it to pos.
            if len > bytes.len() - pos {
                return Err(PayflowError::malformed_wire_message(format!(
                    "declared length {} for field {:?} exceeds remaining input",
                    len, name
                )));
            }
            let value = wire.get(pos..pos + len).ok_or_else(|| {
                PayflowError::malformed_wire_message(format!(
                    "declared length {} for field {:?} splits a character",
                    len, name
                ))
            })?;
            pos += len;
            // After a counted value only a separator or end-of-message is legal.
            if pos < bytes.len() {
                if bytes[pos] != b'&' {
                    return Err(PayflowError::malformed_wire_message(format!(
                        "declared length {} for field {:?} does not reach the next separator",
                        len, name
                    )));
                }
                pos += 1;
            }
            value
        } else {
            // Bare: NAME=VALUE, value scans to the next separator.
            pos += 1; // '='
            let value_start = pos;
            while pos < bytes.len() && bytes[pos] != b'&' {
                pos += 1;
            }
            let value = &wire[value_start..pos];
            if pos < bytes.len() {
                pos += 1; // '&'
            }
            value
        };

        list.push(name, value);
    }

    Ok(list)
}
