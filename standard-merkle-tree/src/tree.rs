//! Flat-array tree layout and construction.
//!
//! A tree over `n` leaves is stored as `2n - 1` nodes in level order: the
//! root at index 0, children of `i` at `2i + 1` and `2i + 2`. The leaves fill
//! the last `n` slots. When `n` is not a power of two some leaves sit one
//! level higher than others; the layout is never padded.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    MerkleTreeError, MerkleTreeOptions, Result,
    bytes::{Hash, compare_bytes},
    hash::NodeHash,
};

/// An input value together with the index of its leaf in the tree array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedValue<T> {
    /// The input value.
    pub value: T,
    /// Position of the value's leaf in the tree array.
    pub tree_index: usize,
}

/// Index of the left child of `i`.
pub fn left_child_index(i: usize) -> usize {
    2 * i + 1
}

/// Index of the right child of `i`.
pub fn right_child_index(i: usize) -> usize {
    2 * i + 2
}

/// Index of the parent of `i`. The root has none.
pub fn parent_index(i: usize) -> Result<usize> {
    if i == 0 {
        return Err(MerkleTreeError::RootHasNoParent);
    }
    Ok((i - 1) / 2)
}

/// Index of the other child of `i`'s parent. The root has none.
pub fn sibling_index(i: usize) -> Result<usize> {
    if i == 0 {
        return Err(MerkleTreeError::RootHasNoSibling);
    }
    Ok(if i % 2 == 0 { i - 1 } else { i + 1 })
}

/// Whether `i` is a position in `tree`.
pub fn is_tree_node(tree: &[Hash], i: usize) -> bool {
    i < tree.len()
}

/// Whether `i` has at least a left child in `tree`.
pub fn is_internal_node(tree: &[Hash], i: usize) -> bool {
    is_tree_node(tree, left_child_index(i))
}

/// Whether `i` is a position in `tree` without children.
pub fn is_leaf_node(tree: &[Hash], i: usize) -> bool {
    is_tree_node(tree, i) && !is_internal_node(tree, i)
}

/// Fail with [`MerkleTreeError::NotLeaf`] unless `i` is a leaf of `tree`.
pub fn check_leaf_node(tree: &[Hash], i: usize) -> Result<()> {
    if !is_leaf_node(tree, i) {
        return Err(MerkleTreeError::NotLeaf(i));
    }
    Ok(())
}

/// Fail with [`MerkleTreeError::InvalidTree`] unless `tree` has the odd,
/// non-zero length of a built tree. Every leaf of such an array has an
/// in-bounds sibling.
pub fn check_tree_shape(tree: &[Hash]) -> Result<()> {
    if tree.is_empty() {
        return Err(MerkleTreeError::InvalidTree("tree is empty".into()));
    }
    if tree.len() % 2 == 0 {
        return Err(MerkleTreeError::InvalidTree(format!(
            "tree has even length {}",
            tree.len()
        )));
    }
    Ok(())
}

/// Build the flat tree array over `leaves`, kept in the given order.
pub fn make_merkle_tree(leaves: &[Hash], node_hash: NodeHash) -> Result<Vec<Hash>> {
    if leaves.is_empty() {
        return Err(MerkleTreeError::EmptyInput);
    }

    let len = 2 * leaves.len() - 1;
    let first_leaf = len - leaves.len();
    let mut tree = vec![[0u8; 32]; len];
    tree[first_leaf..].copy_from_slice(leaves);

    for i in (0..first_leaf).rev() {
        tree[i] = node_hash(&tree[left_child_index(i)], &tree[right_child_index(i)]);
    }

    Ok(tree)
}

/// Hash `values`, optionally sort the leaves, build the tree and record the
/// leaf position of every value.
///
/// The returned indexed values are in the original input order. Sorting is
/// stable, so equal leaves keep their relative input order.
pub fn prepare_merkle_tree<T, F>(
    values: Vec<T>,
    options: &MerkleTreeOptions,
    leaf_hash: F,
    node_hash: NodeHash,
) -> Result<(Vec<Hash>, Vec<IndexedValue<T>>)>
where
    F: Fn(&T) -> Result<Hash>,
{
    let mut hashed: Vec<(usize, Hash)> = values
        .iter()
        .enumerate()
        .map(|(value_index, value)| Ok((value_index, leaf_hash(value)?)))
        .collect::<Result<_>>()?;

    if options.sort_leaves {
        hashed.sort_by(|(_, a), (_, b)| compare_bytes(a, b));
    }

    let leaves: Vec<Hash> = hashed.iter().map(|(_, hash)| *hash).collect();
    let tree = make_merkle_tree(&leaves, node_hash)?;
    let first_leaf = tree.len() - leaves.len();

    let mut tree_indices = vec![0usize; values.len()];
    for (leaf_index, (value_index, _)) in hashed.iter().enumerate() {
        tree_indices[*value_index] = first_leaf + leaf_index;
    }

    debug!(
        "built merkle tree with {} leaves (sorted: {})",
        leaves.len(),
        options.sort_leaves
    );

    let indexed = values
        .into_iter()
        .zip(tree_indices)
        .map(|(value, tree_index)| IndexedValue { value, tree_index })
        .collect();

    Ok((tree, indexed))
}
