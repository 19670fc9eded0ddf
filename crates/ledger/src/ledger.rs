//! The persisted ledger of a chain.

use crate::LedgerError;
use alloy_primitives::{Address, B256};
use chronicles_common::serde_helpers::{chain_id_string, checksum, checksum_opt, non_empty_string};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// What is known about one deployed contract.
///
/// For upgradeable contracts `address` is the proxy and stays fixed, while `implementation`
/// changes with every upgrade.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(with = "checksum")]
    pub address: Address,
    #[serde(default, with = "checksum_opt", skip_serializing_if = "Option::is_none")]
    pub deployer: Option<Address>,
    #[serde(default, with = "checksum_opt", skip_serializing_if = "Option::is_none")]
    pub factory: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<B256>,
    #[serde(default, with = "checksum_opt", skip_serializing_if = "Option::is_none")]
    pub implementation: Option<Address>,
    #[serde(default, with = "checksum_opt", skip_serializing_if = "Option::is_none")]
    pub proxy_admin: Option<Address>,
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub proxy_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<B256>,
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
}

impl Deployment {
    /// Drops empty strings so that only meaningful values are stored.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.proxy_type = self.proxy_type.filter(|s| !s.is_empty());
        self.version = self.version.filter(|s| !s.is_empty());
        self
    }
}

/// The current state of a named contract, as stored in [`Ledger::latest`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    #[serde(flatten)]
    pub deployment: Deployment,
    /// Timestamp of the broadcast that last touched the record.
    pub timestamp: u64,
    /// Commit of the broadcast that last touched the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// The decoded inputs a contract was deployed with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentInput {
    /// Constructor arguments keyed by parameter name, or by position for module deployments.
    #[serde(default)]
    pub constructor: Map<String, Value>,
    /// The call data the proxy was initialized with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
}

/// A contract recorded by a [`HistoryEntry`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryContract {
    #[serde(flatten)]
    pub deployment: Deployment,
    #[serde(default)]
    pub input: DeploymentInput,
}

/// The contracts recorded from one processed broadcast.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub contracts: IndexMap<String, HistoryContract>,
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// All deployments of a chain: the live state of every contract plus the history of runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(rename = "chainId", with = "chain_id_string")]
    pub chain_id: u64,
    /// Contract name to its current deployment, sorted case-insensitively.
    #[serde(default)]
    pub latest: IndexMap<String, DeploymentRecord>,
    /// Processed broadcasts, newest first.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl Ledger {
    /// Returns an empty ledger for `chain_id`.
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id, ..Default::default() }
    }

    /// Returns true if a broadcast of `commit` was already recorded.
    pub fn has_commit(&self, commit: &str) -> bool {
        self.history.iter().any(|entry| entry.commit.as_deref() == Some(commit))
    }

    /// Fails if `commit` was already recorded, unless `force` is set.
    ///
    /// Broadcasts without a commit can't be identified and are always accepted.
    pub fn ensure_unprocessed(&self, commit: Option<&str>, force: bool) -> Result<(), LedgerError> {
        match commit {
            Some(commit) if !force && self.has_commit(commit) => {
                Err(LedgerError::CommitAlreadyProcessed(commit.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Returns true if any history entry recorded `name` at `address` with transaction `hash`.
    pub fn is_duplicate(&self, name: &str, address: Address, hash: Option<B256>) -> bool {
        self.history.iter().filter_map(|entry| entry.contracts.get(name)).any(|contract| {
            contract.deployment.address == address && contract.deployment.hash == hash
        })
    }

    /// Returns the current deployment of `name`.
    pub fn latest(&self, name: &str) -> Option<&DeploymentRecord> {
        self.latest.get(name)
    }

    /// Inserts or replaces the current deployment of `name`.
    pub fn upsert(&mut self, name: impl Into<String>, record: DeploymentRecord) {
        self.latest.insert(name.into(), record);
    }

    /// Sorts [`Ledger::latest`] by contract name, case-insensitively.
    ///
    /// Names that only differ in case are ordered by their exact bytes, so `Registry` comes
    /// before `registry`. The history is not touched; see [`Ledger::record`] for its order.
    pub fn sort_latest(&mut self) {
        self.latest.sort_by(|a, _, b, _| cmp_contract_names(a, b));
    }

    /// Prepends `entry` to the history and keeps the history ordered newest first.
    ///
    /// The sort is stable, so on equal timestamps the entry recorded last comes first.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
        self.history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
}

/// Orders contract names case-insensitively, falling back to the exact name for a stable order.
pub fn cmp_contract_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}
