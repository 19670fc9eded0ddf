//! A throwaway Foundry project on disk.

use crate::BroadcastBuilder;
use chronicles_common::fs;
use chronicles_config::Config;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project laid out like a Foundry project, removed when dropped.
///
/// Holds `script/`, `broadcast/`, `out/` and `deployments/` directories, plus helpers to fill them
/// with scripts, broadcasts, artifacts and ledgers.
#[derive(Debug)]
pub struct TempProject {
    root: PathBuf,
    _dir: TempDir,
}

impl TempProject {
    /// Creates a new, empty project. `name` only makes the directory easier to find.
    pub fn new(name: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("chronicles-{name}-"))
            .tempdir()
            .expect("failed to create temp dir");
        let root = Config { root: dir.path().to_path_buf(), ..Default::default() }.canonic().root;
        for sub in ["script", "broadcast", "out", "deployments"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        debug!(target: "chronicles::test", root = %root.display(), "created project");
        Self { root, _dir: dir }
    }

    /// The default config of this project.
    pub fn config(&self) -> Config {
        Config { root: self.root.clone(), ..Default::default() }.canonic()
    }

    /// Writes a file relative to the root, creating its parent directories.
    pub fn write(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root.join(path);
        fs::create_parent_dir_all(&path).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    /// Adds a deployment script, e.g. `Deploy.s.sol`.
    pub fn add_script(&self, name: &str) -> PathBuf {
        self.write(
            Path::new("script").join(name),
            "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.0;\n",
        )
    }

    /// Writes `broadcast` as the latest run of `script`.
    pub fn add_broadcast(&self, script: &str, chain: u64, broadcast: &BroadcastBuilder) -> PathBuf {
        let contents = serde_json::to_string_pretty(&broadcast.build()).unwrap();
        self.write(
            Path::new("broadcast").join(script).join(chain.to_string()).join("run-latest.json"),
            contents,
        )
    }

    /// Writes the artifact of `name` with `abi`, compiled from `source` if given.
    pub fn add_artifact(&self, name: &str, abi: Value, source: Option<&str>) -> PathBuf {
        let mut artifact = json!({
            "abi": abi,
            "bytecode": { "object": "0x6080604052" },
            "deployedBytecode": { "object": "0x6080604052" }
        });
        if let Some(source) = source {
            artifact["metadata"] = json!({ "settings": { "compilationTarget": { (source): name } } });
        }
        self.write(
            Path::new("out").join(format!("{name}.sol")).join(format!("{name}.json")),
            serde_json::to_string(&artifact).unwrap(),
        )
    }

    /// Path of the ledger of `chain`.
    pub fn ledger_path(&self, chain: u64) -> PathBuf {
        self.config().ledger_path(chain)
    }

    /// Path of the rendered document of `chain`.
    pub fn markdown_path(&self, chain: u64) -> PathBuf {
        self.config().markdown_path(chain)
    }

    /// Reads the ledger of `chain` as written on disk.
    pub fn read_ledger(&self, chain: u64) -> String {
        fs::read_to_string(self.ledger_path(chain)).unwrap()
    }

    /// Reads the ledger of `chain` as json.
    pub fn ledger_json(&self, chain: u64) -> Value {
        serde_json::from_str(&self.read_ledger(chain)).unwrap()
    }

    /// Writes the ledger of `chain` verbatim.
    pub fn write_ledger(&self, chain: u64, contents: &str) -> PathBuf {
        let path = self.ledger_path(chain);
        fs::create_parent_dir_all(&path).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }
}
