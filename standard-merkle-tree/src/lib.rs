//! Keccak-256 Merkle trees compatible with Ethereum's standard Merkle tree.
//!
//! A tree over `n` values is a flat array of `2n - 1` 32-byte nodes in level
//! order: root at 0, children of `i` at `2i + 1` and `2i + 2`, leaves in the
//! last `n` slots. Leaves hash as `keccak256(abi.encodePacked(value))` and
//! internal nodes as `keccak256` of their two children, smaller first, so
//! proofs produced here verify with OpenZeppelin's `MerkleProof` library.
//!
//! # Core
//!
//! - [`bytes`]: hex/byte conversion and integer-order comparison.
//! - [`hash`]: the [`Hashable`] packed encoding and leaf/node hashing.
//! - [`tree`]: index arithmetic and tree construction.
//! - [`proof`]: single-leaf proofs.
//! - [`multiproof`]: joint proofs for several leaves.
//! - [`validate`]: checks for externally supplied tree arrays.
//!
//! # Trees
//!
//! - [`StandardMerkleTree`]: typed values, standard hashing, dump/load.
//! - [`SimpleMerkleTree`]: [`BytesLike`] values, replaceable node hash.

#![warn(missing_docs)]

/// Byte-like inputs, hex text and integer-order comparison.
pub mod bytes;
mod error;
/// Packed encoding, leaf hashing and node hashing.
pub mod hash;
mod merkle_tree;
/// Joint proofs for several leaves.
pub mod multiproof;
mod options;
/// Single-leaf inclusion proofs.
pub mod proof;
mod simple;
mod standard;
/// Tree layout, index arithmetic and construction.
pub mod tree;
/// Validation of tree arrays and indexed values.
pub mod validate;


pub use bytes::{BytesLike, Hash};
pub use error::{MerkleTreeError, Result};
pub use hash::{Hashable, LeafHash, NodeHash, keccak256, standard_leaf_hash, standard_node_hash};
pub use merkle_tree::{LeafRef, MerkleTree};
pub use multiproof::MultiProof;
pub use options::{MerkleTreeOptions, SimpleMerkleTreeOptions};
pub use simple::{SIMPLE_FORMAT, SimpleMerkleTree, SimpleMerkleTreeData};
pub use standard::{STANDARD_FORMAT, StandardMerkleTree, StandardMerkleTreeData};
pub use tree::IndexedValue;
