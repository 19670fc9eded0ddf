use crate::ScriptSequence;
use eyre::{Result, bail};
use std::path::{Path, PathBuf};

/// The script run when no name is given.
pub const DEFAULT_SCRIPT: &str = "Deploy.s.sol";

/// File extension of Foundry scripts.
pub const SCRIPT_EXTENSION: &str = ".s.sol";

/// The broadcast file that always holds the most recent run.
pub const LATEST_RUN: &str = "run-latest.json";

/// Appends `.s.sol` to `name` unless it already ends with it.
pub fn script_file_name(name: &str) -> String {
    if name.ends_with(SCRIPT_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{SCRIPT_EXTENSION}")
    }
}

/// This type reads broadcast files in the
/// `project_root/broadcast/{script_name}.s.sol/{chain_id}/` directory.
#[derive(Debug, Clone)]
pub struct BroadcastReader {
    script_name: String,
    chain_id: u64,
    broadcast_path: PathBuf,
}

impl BroadcastReader {
    /// Create a new `BroadcastReader` instance.
    ///
    /// `script_name` is normalized with [`script_file_name`].
    pub fn new(script_name: &str, chain_id: u64, broadcast_path: &Path) -> Self {
        Self {
            script_name: script_file_name(script_name),
            chain_id,
            broadcast_path: broadcast_path.to_path_buf(),
        }
    }

    /// The directory holding the runs of this script on this chain.
    pub fn chain_dir(&self) -> PathBuf {
        self.broadcast_path.join(&self.script_name).join(self.chain_id.to_string())
    }

    /// Path of the `run-latest.json` file.
    pub fn latest_path(&self) -> PathBuf {
        self.chain_dir().join(LATEST_RUN)
    }

    /// Reads the latest run of the script on the chain.
    pub fn read_latest(&self) -> Result<ScriptSequence> {
        let path = self.latest_path();
        if !path.is_file() {
            bail!(
                "broadcast {} does not exist, ensure the script name and/or chain id is correct",
                path.display()
            );
        }

        let sequence = ScriptSequence::load(&path)?;
        if sequence.chain != 0 && sequence.chain != self.chain_id {
            bail!(
                "broadcast {} belongs to chain {}, expected {}",
                path.display(),
                sequence.chain,
                self.chain_id
            );
        }

        debug!(
            target: "chronicles::sequence",
            path = %path.display(),
            transactions = sequence.transactions.len(),
            commit = ?sequence.commit(),
            "read broadcast"
        );
        Ok(sequence)
    }
}
