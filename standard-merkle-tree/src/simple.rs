//! Trees over byte-like values with a replaceable node hash.

use std::ops::Deref;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    MerkleTree, MerkleTreeError, Result, SimpleMerkleTreeOptions,
    bytes::{BytesLike, Hash, serde_hex},
    hash::{NodeHash, standard_leaf_hash, standard_node_hash},
    multiproof::{MultiProof, process_multi_proof},
    proof::process_proof,
    tree::IndexedValue,
};

/// Dump format tag of [`SimpleMerkleTree`].
pub const SIMPLE_FORMAT: &str = "simple-v1";

const DEFAULT_HASH: &str = "default";
const CUSTOM_HASH: &str = "custom";

/// A Merkle tree over [`BytesLike`] values.
#[derive(Debug, Clone)]
pub struct SimpleMerkleTree {
    inner: MerkleTree<BytesLike>,
    custom_hash: bool,
}

/// Serialisable snapshot of a [`SimpleMerkleTree`].
///
/// `hash` is `"custom"` when the tree was built with a node hash other than
/// the standard one; loading such a dump needs that node hash again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMerkleTreeData {
    /// Always [`SIMPLE_FORMAT`].
    pub format: String,
    /// The flat tree array, root first.
    #[serde(with = "serde_hex")]
    pub tree: Vec<Hash>,
    /// The values in input order with their leaf positions.
    pub values: Vec<IndexedValue<BytesLike>>,
    /// `"default"` or `"custom"`.
    pub hash: String,
}

fn leaf_hash(value: &BytesLike) -> Result<Hash> {
    standard_leaf_hash(value)
}

impl SimpleMerkleTree {
    /// Build a tree over `values`.
    pub fn of(values: Vec<BytesLike>, options: SimpleMerkleTreeOptions) -> Result<Self> {
        let inner = MerkleTree::build(values, &options.options, leaf_hash, options.node_hash())?;
        Ok(Self {
            inner,
            custom_hash: options.node_hash.is_some(),
        })
    }

    /// Whether `proof` proves `leaf` against `root`, without a tree at hand.
    pub fn verify_against_root(
        root: &Hash,
        leaf: &BytesLike,
        proof: &[Hash],
        node_hash: Option<NodeHash>,
    ) -> Result<bool> {
        let leaf_hash = leaf_hash(leaf)?;
        let node_hash = node_hash.unwrap_or(standard_node_hash);
        Ok(&process_proof(&leaf_hash, proof, node_hash)? == root)
    }

    /// Whether `multiproof` reconstructs `root`, without a tree at hand.
    pub fn verify_multi_proof_against_root(
        root: &Hash,
        multiproof: &MultiProof,
        node_hash: Option<NodeHash>,
    ) -> Result<bool> {
        let node_hash = node_hash.unwrap_or(standard_node_hash);
        Ok(&process_multi_proof(multiproof, node_hash)? == root)
    }

    /// Snapshot of the tree array and indexed values.
    pub fn dump(&self) -> SimpleMerkleTreeData {
        SimpleMerkleTreeData {
            format: SIMPLE_FORMAT.to_owned(),
            tree: self.inner.tree().to_vec(),
            values: self.inner.values().to_vec(),
            hash: if self.custom_hash { CUSTOM_HASH } else { DEFAULT_HASH }.to_owned(),
        }
    }

    /// Rebuild a tree from a snapshot, checking it first.
    ///
    /// `node_hash` must be given exactly when the dump says `"custom"`.
    pub fn load(data: SimpleMerkleTreeData, node_hash: Option<NodeHash>) -> Result<Self> {
        if data.format != SIMPLE_FORMAT {
            return Err(MerkleTreeError::InvalidDump(format!(
                "unknown format {:?}, expected {:?}",
                data.format, SIMPLE_FORMAT
            )));
        }
        let node_hash: NodeHash = match (data.hash.as_str(), node_hash) {
            (DEFAULT_HASH, None) => standard_node_hash,
            (CUSTOM_HASH, Some(node_hash)) => node_hash,
            (CUSTOM_HASH, None) => {
                return Err(MerkleTreeError::InvalidDump(
                    "dump uses a custom node hash but none was given".into(),
                ));
            }
            (DEFAULT_HASH, Some(_)) => {
                return Err(MerkleTreeError::InvalidDump(
                    "dump uses the standard node hash but a custom one was given".into(),
                ));
            }
            (other, _) => {
                return Err(MerkleTreeError::InvalidDump(format!(
                    "unknown node hash kind {:?}",
                    other
                )));
            }
        };
        let custom_hash = data.hash == CUSTOM_HASH;
        let inner = MerkleTree::from_parts(data.tree, data.values, leaf_hash, node_hash)?;
        debug!("loaded simple merkle tree with {} values", inner.len());
        Ok(Self { inner, custom_hash })
    }
}

impl Deref for SimpleMerkleTree {
    type Target = MerkleTree<BytesLike>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
