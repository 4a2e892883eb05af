use serde::{Deserialize, Serialize};

use crate::hash::{NodeHash, standard_node_hash};

/// Options for building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MerkleTreeOptions {
    /// Sort leaves by hash before building. Sorted trees have the same root
    /// for the same set of values in any order, and give smaller multiproofs.
    pub sort_leaves: bool,
}

impl Default for MerkleTreeOptions {
    fn default() -> Self {
        Self { sort_leaves: true }
    }
}

/// Options for [`SimpleMerkleTree`](crate::SimpleMerkleTree).
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMerkleTreeOptions {
    /// Options shared with every tree kind.
    pub options: MerkleTreeOptions,
    /// Node hash to use instead of [`standard_node_hash`].
    pub node_hash: Option<NodeHash>,
}

impl SimpleMerkleTreeOptions {
    /// The node hash in effect.
    pub fn node_hash(&self) -> NodeHash {
        self.node_hash.unwrap_or(standard_node_hash)
    }
}
