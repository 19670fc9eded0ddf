use crate::ChainReader;
use alloy_primitives::{Address, B256};
use std::{
    ffi::OsStr,
    path::PathBuf,
    process::{Command, Stdio},
};

/// A [`ChainReader`] running the `cast` command-line client.
///
/// Every query spawns one `cast` process and blocks until it exits. Queries touching the chain
/// pass `--rpc-url` when one is configured, otherwise `cast` falls back to its own resolution
/// (`ETH_RPC_URL`, `foundry.toml`, localhost).
#[derive(Clone, Debug)]
pub struct CastReader {
    cast: PathBuf,
    rpc_url: Option<String>,
}

impl Default for CastReader {
    fn default() -> Self {
        Self::new("cast")
    }
}

impl CastReader {
    /// Creates a reader using the given `cast` executable.
    pub fn new(cast: impl Into<PathBuf>) -> Self {
        Self { cast: cast.into(), rpc_url: None }
    }

    /// Sets the RPC endpoint on-chain queries are sent to.
    pub fn with_rpc_url(mut self, rpc_url: Option<String>) -> Self {
        self.rpc_url = rpc_url;
        self
    }

    /// Builds the command for `args`, appending `--rpc-url` if `remote`.
    fn command<I, S>(&self, args: I, remote: bool) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.cast);
        cmd.args(args).stdin(Stdio::null());
        if remote && let Some(rpc_url) = &self.rpc_url {
            cmd.arg("--rpc-url").arg(rpc_url);
        }
        cmd
    }

    /// Runs `cast` and returns its trimmed, unquoted stdout, or `None` on any failure.
    fn run<I, S>(&self, args: I, remote: bool) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.command(args, remote);
        trace!(target: "chronicles::cast", ?cmd, "running");

        let output = match cmd.output() {
            Ok(output) => output,
            Err(err) => {
                debug!(target: "chronicles::cast", ?cmd, %err, "failed to spawn");
                return None;
            }
        };

        if !output.status.success() {
            debug!(
                target: "chronicles::cast",
                ?cmd,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "command failed"
            );
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().replace('"', "");
        (!stdout.is_empty()).then_some(stdout)
    }
}

impl ChainReader for CastReader {
    fn to_checksum_address(&self, address: &str) -> Option<Address> {
        self.run(["to-check-sum-address", address], false)?.parse().ok()
    }

    fn parse_bytes32_address(&self, word: &str) -> Option<Address> {
        self.run(["parse-bytes32-address", word], false)?.parse().ok()
    }

    fn storage(&self, address: Address, slot: B256) -> Option<B256> {
        self.run(["storage".to_string(), address.to_string(), slot.to_string()], true)?.parse().ok()
    }

    fn call(&self, address: Address, signature: &str) -> Option<String> {
        self.run(["call", &address.to_string(), signature], true)
    }
}
