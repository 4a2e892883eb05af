//! Trees over typed values hashed with `keccak256(abi.encodePacked(..))`.

use std::ops::Deref;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    MerkleTree, MerkleTreeError, MerkleTreeOptions, Result,
    bytes::{Hash, serde_hex},
    hash::{Hashable, standard_leaf_hash, standard_node_hash},
    multiproof::{MultiProof, process_multi_proof},
    proof::process_proof,
    tree::IndexedValue,
};

/// Dump format tag of [`StandardMerkleTree`].
pub const STANDARD_FORMAT: &str = "standard-v1";

/// A Merkle tree compatible with OpenZeppelin's `StandardMerkleTree` and its
/// on-chain `MerkleProof` verifier.
#[derive(Debug, Clone)]
pub struct StandardMerkleTree<T> {
    inner: MerkleTree<T>,
}

/// Serialisable snapshot of a [`StandardMerkleTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardMerkleTreeData<T> {
    /// Always [`STANDARD_FORMAT`].
    pub format: String,
    /// The flat tree array, root first.
    #[serde(with = "serde_hex")]
    pub tree: Vec<Hash>,
    /// The values in input order with their leaf positions.
    pub values: Vec<IndexedValue<T>>,
}

impl<T: Hashable> StandardMerkleTree<T> {
    /// Build a tree over `values`.
    pub fn of(values: Vec<T>, options: MerkleTreeOptions) -> Result<Self> {
        let inner = MerkleTree::build(values, &options, standard_leaf_hash::<T>, standard_node_hash)?;
        Ok(Self { inner })
    }

    /// Whether `proof` proves `leaf` against `root`, without a tree at hand.
    pub fn verify_against_root(root: &Hash, leaf: &T, proof: &[Hash]) -> Result<bool> {
        let leaf_hash = standard_leaf_hash(leaf)?;
        Ok(&process_proof(&leaf_hash, proof, standard_node_hash)? == root)
    }

    /// Whether `multiproof` reconstructs `root`, without a tree at hand.
    pub fn verify_multi_proof_against_root(root: &Hash, multiproof: &MultiProof) -> Result<bool> {
        Ok(&process_multi_proof(multiproof, standard_node_hash)? == root)
    }

    /// Rebuild a tree from a snapshot, checking it first.
    pub fn load(data: StandardMerkleTreeData<T>) -> Result<Self> {
        if data.format != STANDARD_FORMAT {
            return Err(MerkleTreeError::InvalidDump(format!(
                "unknown format {:?}, expected {:?}",
                data.format, STANDARD_FORMAT
            )));
        }
        let inner = MerkleTree::from_parts(
            data.tree,
            data.values,
            standard_leaf_hash::<T>,
            standard_node_hash,
        )?;
        debug!("loaded standard merkle tree with {} values", inner.len());
        Ok(Self { inner })
    }
}

impl<T: Clone> StandardMerkleTree<T> {
    /// Snapshot of the tree array and indexed values.
    pub fn dump(&self) -> StandardMerkleTreeData<T> {
        StandardMerkleTreeData {
            format: STANDARD_FORMAT.to_owned(),
            tree: self.inner.tree().to_vec(),
            values: self.inner.values().to_vec(),
        }
    }
}

impl<T> Deref for StandardMerkleTree<T> {
    type Target = MerkleTree<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
