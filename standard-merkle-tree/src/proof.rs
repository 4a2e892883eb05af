//! Single-leaf inclusion proofs.
//!
//! A proof is the list of sibling hashes on the path from a leaf to the root,
//! nearest sibling first. Because node hashing is commutative the verifier
//! folds the siblings in without knowing which side each one was on.

use crate::{
    Result,
    bytes::{Hash, check_node},
    hash::NodeHash,
    tree::{check_leaf_node, check_tree_shape, parent_index, sibling_index},
};

/// Collect the sibling hashes from the leaf at `index` up to the root.
///
/// `tree` must have the odd length of a built tree.
pub fn get_proof(tree: &[Hash], mut index: usize) -> Result<Vec<Hash>> {
    check_tree_shape(tree)?;
    check_leaf_node(tree, index)?;

    let mut proof = Vec::new();
    while index > 0 {
        proof.push(tree[sibling_index(index)?]);
        index = parent_index(index)?;
    }
    Ok(proof)
}

/// Fold `proof` into `leaf` and return the resulting root.
///
/// The leaf and every proof element must be exactly 32 bytes.
pub fn process_proof<P: AsRef<[u8]>>(leaf: &[u8], proof: &[P], node_hash: NodeHash) -> Result<Hash> {
    let leaf = check_node(leaf)?;
    let siblings = proof
        .iter()
        .map(|node| check_node(node.as_ref()))
        .collect::<Result<Vec<Hash>>>()?;

    Ok(siblings
        .iter()
        .fold(leaf, |acc, sibling| node_hash(&acc, sibling)))
}

/// Whether `proof` links `leaf` to `root`.
pub fn verify<P: AsRef<[u8]>>(root: &Hash, leaf: &[u8], proof: &[P], node_hash: NodeHash) -> Result<bool> {
    Ok(&process_proof(leaf, proof, node_hash)? == root)
}
