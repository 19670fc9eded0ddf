use crate::{Ledger, LedgerError};
use chronicles_common::fs;
use std::path::{Path, PathBuf};

/// Owns the json ledger of one chain on disk.
#[derive(Clone, Debug)]
pub struct LedgerStore {
    path: PathBuf,
    chain_id: u64,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>, chain_id: u64) -> Self {
        Self { path: path.into(), chain_id }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the ledger file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the ledger, or returns an empty one if it was never written.
    pub fn load(&self) -> Result<Ledger, LedgerError> {
        if !self.exists() {
            debug!(target: "chronicles::store", path = %self.path.display(), "no ledger yet");
            return Ok(Ledger::new(self.chain_id));
        }

        let ledger: Ledger = fs::read_json_file(&self.path)?;
        if ledger.chain_id != self.chain_id {
            warn!(
                target: "chronicles::store",
                path = %self.path.display(),
                stored = ledger.chain_id,
                expected = self.chain_id,
                "ledger chain id differs from the requested chain"
            );
        }
        Ok(ledger)
    }

    /// Writes the whole ledger, replacing the previous file.
    pub fn save(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        fs::create_parent_dir_all(&self.path)?;
        fs::write_pretty_json_file(&self.path, ledger)?;
        debug!(
            target: "chronicles::store",
            path = %self.path.display(),
            contracts = ledger.latest.len(),
            history = ledger.history.len(),
            "saved ledger"
        );
        Ok(())
    }
}
