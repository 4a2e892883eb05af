//! Structural checks for tree arrays that did not come from the builder,
//! such as a loaded dump.

use log::warn;

use crate::{
    MerkleTreeError, Result,
    bytes::{Hash, hex_encode},
    hash::NodeHash,
    tree::{IndexedValue, check_tree_shape, is_leaf_node, left_child_index, right_child_index},
};

/// Whether every internal node of `tree` is the hash of its children.
pub fn is_valid_merkle_tree(tree: &[Hash], node_hash: NodeHash) -> bool {
    validate_merkle_tree(tree, node_hash).is_ok()
}

/// Check that `tree` is non-empty and that every node with two children
/// equals `node_hash(left, right)`.
pub fn validate_merkle_tree(tree: &[Hash], node_hash: NodeHash) -> Result<()> {
    check_tree_shape(tree)?;

    for (i, node) in tree.iter().enumerate() {
        let right = right_child_index(i);
        if right >= tree.len() {
            continue;
        }
        let expected = node_hash(&tree[left_child_index(i)], &tree[right]);
        if &expected != node {
            warn!("merkle tree rejected: node {} does not match its children", i);
            return Err(MerkleTreeError::InvalidTree(format!(
                "node {} is {} but its children hash to {}",
                i,
                hex_encode(node),
                hex_encode(&expected)
            )));
        }
    }
    Ok(())
}

/// Check that every value sits on a leaf of `tree` holding its leaf hash.
pub fn validate_indexed_values<T, F>(tree: &[Hash], values: &[IndexedValue<T>], leaf_hash: F) -> Result<()>
where
    F: Fn(&T) -> Result<Hash>,
{
    for (value_index, entry) in values.iter().enumerate() {
        if !is_leaf_node(tree, entry.tree_index) {
            warn!(
                "merkle tree rejected: value {} points at non-leaf {}",
                value_index, entry.tree_index
            );
            return Err(MerkleTreeError::InvalidTree(format!(
                "value {} points at index {}, which is not a leaf",
                value_index, entry.tree_index
            )));
        }
        let expected = leaf_hash(&entry.value)?;
        if expected != tree[entry.tree_index] {
            warn!(
                "merkle tree rejected: value {} does not match leaf {}",
                value_index, entry.tree_index
            );
            return Err(MerkleTreeError::InvalidTree(format!(
                "value {} hashes to {}, leaf {} holds {}",
                value_index,
                hex_encode(&expected),
                entry.tree_index,
                hex_encode(&tree[entry.tree_index])
            )));
        }
    }
    Ok(())
}
