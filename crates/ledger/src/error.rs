use alloy_primitives::Address;
use chronicles_common::errors::FsPathError;
use std::path::PathBuf;

/// Conditions that abort a run.
///
/// They all point at an inconsistency between the broadcast, the compiled artifacts, the chain and
/// the recorded ledger, which must be resolved by hand rather than recorded.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("commit {0} already processed, pass --force to process it again")]
    CommitAlreadyProcessed(String),

    #[error(
        "mismatched implementations for {name}({address}): proxy {proxy} points to {}",
        display_opt(onchain)
    )]
    ImplementationMismatch {
        name: String,
        address: Address,
        proxy: Address,
        onchain: Option<Address>,
    },

    #[error(
        "constructor inputs and arguments mismatched for {contract}: \
         expected {expected} arguments, got {actual}"
    )]
    ArgumentCountMismatch { contract: String, expected: usize, actual: usize },

    #[error("contract artifact not found: {name} ({})", path.display())]
    ArtifactNotFound { name: String, path: PathBuf },

    #[error(transparent)]
    Fs(#[from] FsPathError),
}

fn display_opt(addr: &Option<Address>) -> String {
    addr.map_or_else(|| "an unknown implementation".to_string(), |addr| addr.to_string())
}
