//! Build a standard Merkle tree over text values, prove one of them and write
//! the tree's JSON dump.

use std::{fs, path::PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use log::info;
use standard_merkle_tree::{LeafRef, MerkleTreeOptions, StandardMerkleTree, bytes::hex_encode};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Values to commit to, hashed as packed UTF-8 text
    #[arg(long = "value", required = true)]
    values: Vec<String>,

    /// Value to prove. Defaults to the first value
    #[arg(long)]
    prove: Option<String>,

    /// Keep leaves in input order instead of sorting them by hash
    #[arg(long, default_value_t = false)]
    unsorted: bool,

    /// Also build and check a multiproof over every value
    #[arg(long, default_value_t = false)]
    multiproof: bool,

    /// Where to write the JSON dump. Printed to stdout when absent
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(&cli.log_level));

    let options = MerkleTreeOptions {
        sort_leaves: !cli.unsorted,
    };
    let tree = StandardMerkleTree::of(cli.values.clone(), options).context("building tree")?;
    info!("root {} over {} values", tree.root_hex(), tree.len());

    let target = cli.prove.unwrap_or_else(|| cli.values[0].clone());
    let proof = tree
        .get_proof(LeafRef::ByValue(&target))
        .with_context(|| format!("proving {:?}", target))?;
    for (i, node) in proof.iter().enumerate() {
        info!("proof[{}] {}", i, hex_encode(node));
    }
    if !StandardMerkleTree::verify_against_root(&tree.root(), &target, &proof)? {
        bail!("proof for {:?} does not verify", target);
    }
    info!("proof for {:?} verifies", target);

    if cli.multiproof {
        let leaves: Vec<LeafRef<'_, String>> = (0..tree.len()).map(LeafRef::ByIndex).collect();
        let multiproof = tree.get_multi_proof(&leaves)?;
        if !tree.verify_multi_proof(&multiproof)? {
            bail!("multiproof over {} values does not verify", tree.len());
        }
        info!(
            "multiproof verifies: {} leaves, {} proof hashes, {} bytes encoded",
            multiproof.leaves.len(),
            multiproof.proof.len(),
            multiproof.encode_to_vec()?.len()
        );
    }

    let dump = serde_json::to_string_pretty(&tree.dump())?;
    match cli.output {
        Some(path) => {
            fs::write(&path, dump).with_context(|| format!("writing {}", path.display()))?;
            info!("dump written to {}", path.display());
        }
        None => println!("{}", dump),
    }
    Ok(())
}
