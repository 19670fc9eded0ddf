use crate::TransactionWithMetadata;
use chronicles_common::fs;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The transactions sequence written by `forge script` to `run-latest.json`.
///
/// Only the fields this tool consumes are modeled; receipts, libraries and the like are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptSequence {
    pub transactions: Vec<TransactionWithMetadata>,
    /// Unix timestamp in seconds.
    pub timestamp: u64,
    #[serde(default)]
    pub chain: u64,
    /// The git commit the script ran on, if the project was a git repository.
    #[serde(default)]
    pub commit: Option<String>,
}

impl ScriptSequence {
    /// Loads a sequence from a broadcast file.
    pub fn load(path: &Path) -> Result<Self> {
        fs::read_json_file(path)
            .wrap_err_with(|| format!("failed to read broadcast {}", path.display()))
    }

    /// Returns the commit, ignoring empty strings.
    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref().filter(|c| !c.is_empty())
    }
}
