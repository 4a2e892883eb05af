//! A built tree together with the values it commits to.

use std::collections::HashMap;

use crate::{
    MerkleTreeError, MerkleTreeOptions, Result,
    bytes::{Hash, hex_encode},
    hash::{LeafHash, NodeHash},
    multiproof::{MultiProof, get_multi_proof, process_multi_proof},
    proof::{get_proof, process_proof},
    tree::{IndexedValue, prepare_merkle_tree},
    validate::{validate_indexed_values, validate_merkle_tree},
};

/// Identifies a leaf either by the position of its value in the input or by
/// the value itself.
#[derive(Debug)]
pub enum LeafRef<'a, T> {
    /// Position of the value in the input.
    ByIndex(usize),
    /// The value itself, found by its leaf hash.
    ByValue(&'a T),
}

impl<T> Clone for LeafRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for LeafRef<'_, T> {}

impl<T> From<usize> for LeafRef<'_, T> {
    fn from(index: usize) -> Self {
        LeafRef::ByIndex(index)
    }
}

impl<'a, T> From<&'a T> for LeafRef<'a, T> {
    fn from(value: &'a T) -> Self {
        LeafRef::ByValue(value)
    }
}

/// A Merkle tree over values of type `T`.
///
/// Immutable once built; every query takes `&self`.
#[derive(Debug, Clone)]
pub struct MerkleTree<T> {
    tree: Vec<Hash>,
    values: Vec<IndexedValue<T>>,
    leaf_hash: LeafHash<T>,
    node_hash: NodeHash,
    hash_lookup: HashMap<Hash, usize>,
}

impl<T> MerkleTree<T> {
    /// Hash `values` and build the tree.
    pub fn build(
        values: Vec<T>,
        options: &MerkleTreeOptions,
        leaf_hash: LeafHash<T>,
        node_hash: NodeHash,
    ) -> Result<Self> {
        let (tree, values) = prepare_merkle_tree(values, options, leaf_hash, node_hash)?;
        Ok(Self::assemble(tree, values, leaf_hash, node_hash))
    }

    /// Reconstitute a tree from an externally supplied array and values.
    ///
    /// The array and every value are checked before the tree is returned,
    /// and there must be exactly one value per leaf.
    pub fn from_parts(
        tree: Vec<Hash>,
        values: Vec<IndexedValue<T>>,
        leaf_hash: LeafHash<T>,
        node_hash: NodeHash,
    ) -> Result<Self> {
        validate_merkle_tree(&tree, node_hash)?;
        let leaf_count = tree.len().div_ceil(2);
        if values.len() != leaf_count {
            return Err(MerkleTreeError::InvalidTree(format!(
                "{} values for a tree with {} leaves",
                values.len(),
                leaf_count
            )));
        }
        validate_indexed_values(&tree, &values, leaf_hash)?;
        Ok(Self::assemble(tree, values, leaf_hash, node_hash))
    }

    fn assemble(
        tree: Vec<Hash>,
        values: Vec<IndexedValue<T>>,
        leaf_hash: LeafHash<T>,
        node_hash: NodeHash,
    ) -> Self {
        // later duplicates win
        let hash_lookup = values
            .iter()
            .enumerate()
            .map(|(value_index, entry)| (tree[entry.tree_index], value_index))
            .collect();
        Self {
            tree,
            values,
            leaf_hash,
            node_hash,
            hash_lookup,
        }
    }

    /// The root hash.
    pub fn root(&self) -> Hash {
        self.tree[0]
    }

    /// The root hash as canonical hex text.
    pub fn root_hex(&self) -> String {
        hex_encode(&self.root())
    }

    /// Number of values (leaves).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: building and loading both require at least one value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The flat tree array.
    pub fn tree(&self) -> &[Hash] {
        &self.tree
    }

    /// The values with their leaf positions, in input order.
    pub fn values(&self) -> &[IndexedValue<T>] {
        &self.values
    }

    /// `(value index, value)` pairs in input order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &T)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, &entry.value))
    }

    /// The node hash this tree was built with.
    pub fn node_hash(&self) -> NodeHash {
        self.node_hash
    }

    /// Resolve a leaf reference to a value index.
    pub fn leaf_lookup(&self, leaf: LeafRef<'_, T>) -> Result<usize> {
        match leaf {
            LeafRef::ByIndex(index) => {
                if index >= self.values.len() {
                    return Err(MerkleTreeError::IndexOutOfRange {
                        index,
                        len: self.values.len(),
                    });
                }
                Ok(index)
            }
            LeafRef::ByValue(value) => {
                let hash = (self.leaf_hash)(value)?;
                self.hash_lookup
                    .get(&hash)
                    .copied()
                    .ok_or(MerkleTreeError::ValueNotFound)
            }
        }
    }

    /// Leaf hash of the referenced value. A value need not be in the tree.
    pub fn leaf_hash(&self, leaf: LeafRef<'_, T>) -> Result<Hash> {
        match leaf {
            LeafRef::ByIndex(index) => {
                let entry = self.values.get(index).ok_or(MerkleTreeError::IndexOutOfRange {
                    index,
                    len: self.values.len(),
                })?;
                (self.leaf_hash)(&entry.value)
            }
            LeafRef::ByValue(value) => (self.leaf_hash)(value),
        }
    }

    fn validate_value_at(&self, value_index: usize) -> Result<usize> {
        let entry = &self.values[value_index];
        let expected = (self.leaf_hash)(&entry.value)?;
        if expected != self.tree[entry.tree_index] {
            return Err(MerkleTreeError::InvalidTree(format!(
                "value {} hashes to {}, leaf {} holds {}",
                value_index,
                hex_encode(&expected),
                entry.tree_index,
                hex_encode(&self.tree[entry.tree_index])
            )));
        }
        Ok(entry.tree_index)
    }

    /// Proof for one leaf. Empty for a single-leaf tree.
    pub fn get_proof(&self, leaf: LeafRef<'_, T>) -> Result<Vec<Hash>> {
        let value_index = self.leaf_lookup(leaf)?;
        let tree_index = self.validate_value_at(value_index)?;
        get_proof(&self.tree, tree_index)
    }

    /// Multiproof for several leaves, given in any order.
    ///
    /// The leaves of the result are in processing order (descending tree
    /// index), which is not necessarily the order of `leaves`.
    pub fn get_multi_proof(&self, leaves: &[LeafRef<'_, T>]) -> Result<MultiProof> {
        let mut indices = leaves
            .iter()
            .map(|leaf| {
                let value_index = self.leaf_lookup(*leaf)?;
                self.validate_value_at(value_index)
            })
            .collect::<Result<Vec<usize>>>()?;
        indices.sort_unstable_by(|a, b| b.cmp(a));
        if let Some(w) = indices.windows(2).find(|w| w[0] == w[1]) {
            return Err(MerkleTreeError::InvalidMultiProof(format!(
                "leaf at index {} requested more than once",
                w[0]
            )));
        }
        get_multi_proof(&self.tree, &indices)
    }

    /// Whether `proof` proves the referenced leaf against this tree's root.
    pub fn verify(&self, leaf: LeafRef<'_, T>, proof: &[Hash]) -> Result<bool> {
        let leaf_hash = self.leaf_hash(leaf)?;
        Ok(process_proof(&leaf_hash, proof, self.node_hash)? == self.root())
    }

    /// Whether `multiproof` reconstructs this tree's root.
    pub fn verify_multi_proof(&self, multiproof: &MultiProof) -> Result<bool> {
        Ok(process_multi_proof(multiproof, self.node_hash)? == self.root())
    }

    /// Re-check every value and every internal node.
    pub fn validate(&self) -> Result<()> {
        validate_indexed_values(&self.tree, &self.values, self.leaf_hash)?;
        validate_merkle_tree(&self.tree, self.node_hash)
    }
}
