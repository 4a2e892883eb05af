use thiserror::Error;

/// Alias for `core::result::Result<T, MerkleTreeError>`.
pub type Result<T> = core::result::Result<T, MerkleTreeError>;

/// Errors from Merkle tree construction, proving and verification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleTreeError {
    #[error("cannot build merkle tree with zero elements")]
    EmptyInput,
    #[error("invalid hex encoding: {0}")]
    InvalidHexEncoding(String),
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    #[error("merkle tree nodes must be 32 bytes, got {len}")]
    InvalidNode { len: usize },
    #[error("index {0} is not a leaf node")]
    NotLeaf(usize),
    #[error("leaf index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("value not found in merkle tree")]
    ValueNotFound,
    #[error("invalid multiproof: {0}")]
    InvalidMultiProof(String),
    #[error("root node has no parent")]
    RootHasNoParent,
    #[error("root node has no sibling")]
    RootHasNoSibling,
    #[error("invalid merkle tree: {0}")]
    InvalidTree(String),
    #[error("invalid tree dump: {0}")]
    InvalidDump(String),
}
