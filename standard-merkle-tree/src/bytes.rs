//! Byte and hex conversions shared by hashing, tree building and dumps.
//!
//! Every node of a tree is a 32-byte [`Hash`]; its canonical text form is
//! `0x` followed by 64 lowercase hex characters. Comparison treats byte
//! strings as unsigned big-endian integers, which is the ordering used both
//! for sorting leaves and for making node hashing commutative.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{MerkleTreeError, Result};

/// A 32-byte tree node.
pub type Hash = [u8; 32];

/// A byte-like input value.
///
/// `Text` beginning with `0x` is read as hex by [`to_bytes`]; any other text
/// is taken as its UTF-8 bytes. `Ints` holds small integers that must each
/// fit in one byte.
///
/// Serialised untagged, so `Bytes` and `Ints` share the JSON shape of a
/// number array. Deserialising such an array yields `Bytes` whenever every
/// element fits in a byte, which always holds for an `Ints` value that can
/// be hashed. The byte form, and with it the leaf hash, survives the round
/// trip; the variant may not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BytesLike {
    /// Hex text with a `0x` prefix, or plain text.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Integers that each encode as one byte.
    Ints(Vec<i64>),
}

impl From<&str> for BytesLike {
    fn from(value: &str) -> Self {
        BytesLike::Text(value.to_owned())
    }
}

impl From<String> for BytesLike {
    fn from(value: String) -> Self {
        BytesLike::Text(value)
    }
}

impl From<Vec<u8>> for BytesLike {
    fn from(value: Vec<u8>) -> Self {
        BytesLike::Bytes(value)
    }
}

impl From<&[u8]> for BytesLike {
    fn from(value: &[u8]) -> Self {
        BytesLike::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for BytesLike {
    fn from(value: [u8; N]) -> Self {
        BytesLike::Bytes(value.to_vec())
    }
}

impl From<Vec<i64>> for BytesLike {
    fn from(value: Vec<i64>) -> Self {
        BytesLike::Ints(value)
    }
}

/// Convert a byte-like value to bytes.
pub fn to_bytes(value: &BytesLike) -> Result<Vec<u8>> {
    match value {
        BytesLike::Bytes(bytes) => Ok(bytes.clone()),
        BytesLike::Text(text) => match text.strip_prefix("0x") {
            Some(_) => hex_decode(text),
            None => Ok(text.as_bytes().to_vec()),
        },
        BytesLike::Ints(ints) => ints_to_bytes(ints),
    }
}

/// Convert a byte-like value to canonical `0x`-prefixed lowercase hex.
pub fn to_hex(value: &BytesLike) -> Result<String> {
    Ok(hex_encode(&to_bytes(value)?))
}

/// Concatenate the byte forms of `values` in order.
pub fn concat(values: &[BytesLike]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for value in values {
        out.extend_from_slice(&to_bytes(value)?);
    }
    Ok(out)
}

/// Compare two byte-like values as unsigned big-endian integers.
pub fn compare(a: &BytesLike, b: &BytesLike) -> Result<Ordering> {
    Ok(compare_bytes(&to_bytes(a)?, &to_bytes(b)?))
}

/// Compare two byte strings as unsigned big-endian integers.
///
/// Leading zero bytes are insignificant and the empty string is zero.
pub fn compare_bytes(a: &[u8], b: &[u8]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn ints_to_bytes(ints: &[i64]) -> Result<Vec<u8>> {
    ints.iter()
        .map(|&n| {
            u8::try_from(n).map_err(|_| {
                MerkleTreeError::UnsupportedType(format!("integer {} does not fit in a byte", n))
            })
        })
        .collect()
}

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn hex_encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex text, with or without a `0x` prefix.
pub fn hex_decode(text: &str) -> Result<Vec<u8>> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|e| MerkleTreeError::InvalidHexEncoding(format!("{text:?}: {e}")))
}

/// Interpret a byte slice as a tree node.
pub fn check_node(bytes: &[u8]) -> Result<Hash> {
    Hash::try_from(bytes).map_err(|_| MerkleTreeError::InvalidNode { len: bytes.len() })
}

/// Parse canonical hash text into a tree node.
pub fn parse_hash(text: &str) -> Result<Hash> {
    check_node(&hex_decode(text)?)
}

/// Serde adapters rendering nodes as canonical hex text.
pub(crate) mod serde_hex {
    use serde::{Deserialize, Deserializer, Serializer, de::Error, ser::SerializeSeq};

    use super::{Hash, hex_encode, parse_hash};

    pub(crate) fn serialize<S: Serializer>(hashes: &[Hash], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(hashes.len()))?;
        for hash in hashes {
            seq.serialize_element(&hex_encode(hash))?;
        }
        seq.end()
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Hash>, D::Error> {
        let texts = Vec::<String>::deserialize(deserializer)?;
        texts
            .iter()
            .map(|text| parse_hash(text).map_err(D::Error::custom))
            .collect()
    }
}
