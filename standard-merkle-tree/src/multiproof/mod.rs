//! Multiproofs: one compact proof for several leaves.
//!
//! Generation walks a FIFO queue of node indices seeded with the requested
//! leaves. Each step pops a node and pairs it with its sibling: when the
//! sibling is next in the queue both children are already known and the step
//! is flagged `true`; otherwise the sibling hash goes into `proof` and the step
//! is flagged `false`. The parent is queued and the walk stops at the root.
//!
//! Verification replays the flags, taking the second operand of each step
//! from the queue of computed hashes (`true`) or from `proof` (`false`).
//!
//! The walk only works when the queue is processed in descending index
//! order, so [`get_multi_proof`] requires strictly descending leaf indices.

use std::collections::VecDeque;

use bincode::{Decode, Encode};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    MerkleTreeError, Result,
    bytes::{Hash, serde_hex},
    hash::NodeHash,
    tree::{check_leaf_node, check_tree_shape, parent_index, sibling_index},
};


/// A joint inclusion proof for several leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "camelCase")]
pub struct MultiProof {
    /// Hashes of the proved leaves, in processing order.
    #[serde(with = "serde_hex")]
    pub leaves: Vec<Hash>,
    /// Sibling hashes not derivable from the proved leaves.
    #[serde(with = "serde_hex")]
    pub proof: Vec<Hash>,
    /// One flag per reconstruction step.
    pub proof_flags: Vec<bool>,
}

impl MultiProof {
    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleTreeError::InvalidMultiProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 100 * 1024 * 1024 }>(); // 100MB limit
        let (multiproof, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleTreeError::InvalidMultiProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(MerkleTreeError::InvalidMultiProof(format!(
                "{} trailing bytes after multiproof",
                bytes.len() - read
            )));
        }
        Ok(multiproof)
    }
}

/// Build a multiproof for the leaves at `indices`.
///
/// `tree` must have the odd length of a built tree. `indices` must be
/// non-empty, name leaves of `tree` and be strictly descending. `leaves` in the result follow the order of `indices`.
pub fn get_multi_proof(tree: &[Hash], indices: &[usize]) -> Result<MultiProof> {
    if indices.is_empty() {
        return Err(MerkleTreeError::EmptyInput);
    }
    check_tree_shape(tree)?;
    for &index in indices {
        check_leaf_node(tree, index)?;
    }
    if let Some(pos) = indices.windows(2).position(|w| w[0] <= w[1]) {
        return Err(MerkleTreeError::InvalidMultiProof(format!(
            "indices must be strictly descending, got {} then {} at position {}",
            indices[pos],
            indices[pos + 1],
            pos + 1
        )));
    }

    let mut queue: VecDeque<usize> = indices.iter().copied().collect();
    let mut proof = Vec::new();
    let mut proof_flags = Vec::new();

    while let Some(&j) = queue.front() {
        if j == 0 {
            break;
        }
        queue.pop_front();
        let s = sibling_index(j)?;
        let p = parent_index(j)?;

        if queue.front() == Some(&s) {
            proof_flags.push(true);
            queue.pop_front();
        } else {
            proof_flags.push(false);
            proof.push(tree[s]);
        }
        queue.push_back(p);
    }

    trace!(
        "multiproof for {} leaves: {} proof hashes, {} flags",
        indices.len(),
        proof.len(),
        proof_flags.len()
    );

    Ok(MultiProof {
        leaves: indices.iter().map(|&i| tree[i]).collect(),
        proof,
        proof_flags,
    })
}

/// Replay `multiproof` and return the root it commits to.
pub fn process_multi_proof(multiproof: &MultiProof, node_hash: NodeHash) -> Result<Hash> {
    let MultiProof {
        leaves,
        proof,
        proof_flags,
    } = multiproof;

    if proof_flags.len() + 1 != leaves.len() + proof.len() {
        return Err(MerkleTreeError::InvalidMultiProof(format!(
            "{} flags cannot combine {} leaves and {} proof hashes",
            proof_flags.len(),
            leaves.len(),
            proof.len()
        )));
    }

    let mut results: VecDeque<Hash> = leaves.iter().copied().collect();
    let mut side_proof: VecDeque<Hash> = proof.iter().copied().collect();

    for (step, &flag) in proof_flags.iter().enumerate() {
        let a = results.pop_front().ok_or_else(|| {
            MerkleTreeError::InvalidMultiProof(format!("no computed hash left at step {}", step))
        })?;
        let b = if flag {
            results.pop_front()
        } else {
            side_proof.pop_front()
        }
        .ok_or_else(|| {
            MerkleTreeError::InvalidMultiProof(format!(
                "no {} hash left at step {}",
                if flag { "computed" } else { "proof" },
                step
            ))
        })?;
        results.push_back(node_hash(&a, &b));
    }

    match (results.len(), side_proof.len()) {
        (1, 0) => Ok(results[0]),
        (0, 1) => Ok(side_proof[0]),
        (computed, remaining) => Err(MerkleTreeError::InvalidMultiProof(format!(
            "expected a single root, {} computed and {} proof hashes remain",
            computed, remaining
        ))),
    }
}
