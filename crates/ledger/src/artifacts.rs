//! Compiler artifacts the constructor arguments are decoded with.

use crate::LedgerError;
use alloy_json_abi::JsonAbi;
use chronicles_common::fs;
use serde::Deserialize;
use std::path::PathBuf;

/// The parts of a compiler artifact this tool consumes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Artifact {
    pub abi: JsonAbi,
    /// The source file the contract was compiled from, relative to the project root.
    pub source: Option<PathBuf>,
}

#[derive(Deserialize)]
struct ArtifactFile {
    abi: JsonAbi,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

impl ArtifactFile {
    fn compilation_target(&self) -> Option<PathBuf> {
        let targets = self.metadata.as_ref()?.pointer("/settings/compilationTarget")?.as_object()?;
        targets.keys().next().map(PathBuf::from)
    }
}

/// Provides the compiler artifact of a contract by name.
#[auto_impl::auto_impl(&, Box)]
pub trait ArtifactSource {
    fn artifact(&self, contract_name: &str) -> Result<Artifact, LedgerError>;
}

/// Reads artifacts from a Foundry `out` directory laid out as `<out>/<Name>.sol/<Name>.json`.
#[derive(Clone, Debug)]
pub struct ArtifactsDir {
    out: PathBuf,
}

impl ArtifactsDir {
    pub fn new(out: impl Into<PathBuf>) -> Self {
        Self { out: out.into() }
    }

    pub fn artifact_path(&self, contract_name: &str) -> PathBuf {
        self.out.join(format!("{contract_name}.sol")).join(format!("{contract_name}.json"))
    }
}

impl ArtifactSource for ArtifactsDir {
    fn artifact(&self, contract_name: &str) -> Result<Artifact, LedgerError> {
        let path = self.artifact_path(contract_name);
        if !path.is_file() {
            return Err(LedgerError::ArtifactNotFound { name: contract_name.to_string(), path });
        }

        let file: ArtifactFile = fs::read_json_file(&path)?;
        let source = file.compilation_target();
        trace!(target: "chronicles::artifacts", contract_name, ?source, "loaded artifact");
        Ok(Artifact { abi: file.abi, source })
    }
}
