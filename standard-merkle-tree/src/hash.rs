//! Leaf and node hashing compatible with Ethereum's standard Merkle tree.
//!
//! Leaves hash as `keccak256(abi.encodePacked(value))`:
//! - text is written as UTF-8 with no length prefix,
//! - byte strings are written as-is,
//! - integers are written big-endian at their declared width,
//! - composite values concatenate their fields in order.
//!
//! Internal nodes hash as `keccak256(min(a, b) || max(a, b))`, comparing the
//! children as unsigned integers, so a verifier needs the sibling set but not
//! the left/right orientation.

use sha3::{Digest, Keccak256};

use crate::{
    Result,
    bytes::{BytesLike, Hash, compare_bytes, to_bytes},
};

/// Hashes a pair of child nodes into their parent.
pub type NodeHash = fn(&Hash, &Hash) -> Hash;

/// Hashes a value into its leaf node.
pub type LeafHash<T> = fn(&T) -> Result<Hash>;

/// A value with an `abi.encodePacked` representation.
///
/// Each supported shape has an explicit encoder; there is no dynamic
/// dispatch on the runtime type of the value.
pub trait Hashable {
    /// Append the packed encoding of `self` to `out`.
    fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()>;
}

impl<T: Hashable + ?Sized> Hashable for &T {
    fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()> {
        (**self).encode_packed(out)
    }
}

impl Hashable for str {
    fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }
}

impl Hashable for String {
    fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()> {
        self.as_str().encode_packed(out)
    }
}

impl Hashable for [u8] {
    fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(self);
        Ok(())
    }
}

impl Hashable for Vec<u8> {
    fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()> {
        self.as_slice().encode_packed(out)
    }
}

impl<const N: usize> Hashable for [u8; N] {
    fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()> {
        self.as_slice().encode_packed(out)
    }
}

impl Hashable for bool {
    fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(u8::from(*self));
        Ok(())
    }
}

macro_rules! impl_hashable_for_int {
    ($($t:ty),*) => {
        $(
            impl Hashable for $t {
                fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()> {
                    out.extend_from_slice(&self.to_be_bytes());
                    Ok(())
                }
            }
        )*
    };
}

impl_hashable_for_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

/// Text is packed as UTF-8 even when it looks like hex; only `Bytes` and
/// `Ints` carry raw bytes.
impl Hashable for BytesLike {
    fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            BytesLike::Text(text) => text.encode_packed(out),
            other => {
                out.extend_from_slice(&to_bytes(other)?);
                Ok(())
            }
        }
    }
}

macro_rules! impl_hashable_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: Hashable),+> Hashable for ($($name,)+) {
            #[allow(non_snake_case)]
            fn encode_packed(&self, out: &mut Vec<u8>) -> Result<()> {
                let ($($name,)+) = self;
                $($name.encode_packed(out)?;)+
                Ok(())
            }
        }
    };
}

impl_hashable_for_tuple!(A);
impl_hashable_for_tuple!(A, B);
impl_hashable_for_tuple!(A, B, C);
impl_hashable_for_tuple!(A, B, C, D);
impl_hashable_for_tuple!(A, B, C, D, E);
impl_hashable_for_tuple!(A, B, C, D, E, F);

/// Packed encoding of a single value.
pub fn encode_packed<T: Hashable + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    value.encode_packed(&mut out)?;
    Ok(out)
}

/// Keccak-256 with Keccak padding, as used by Ethereum (not NIST SHA3-256).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// `keccak256(abi.encodePacked(value))`.
pub fn standard_leaf_hash<T: Hashable + ?Sized>(value: &T) -> Result<Hash> {
    Ok(keccak256(&encode_packed(value)?))
}

/// `keccak256` over the two children, smaller first.
pub fn standard_node_hash(a: &Hash, b: &Hash) -> Hash {
    let (first, second) = match compare_bytes(a, b) {
        std::cmp::Ordering::Greater => (b, a),
        _ => (a, b),
    };
    let mut hasher = Keccak256::new();
    hasher.update(first);
    hasher.update(second);
    hasher.finalize().into()
}
