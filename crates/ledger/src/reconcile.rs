//! Merges the creations of a broadcast into a [`Ledger`].

use crate::{
    ArtifactSource, Deployment, DeploymentInput, DeploymentRecord, HistoryContract, HistoryEntry,
    Ledger, LedgerError,
    classify::{CreationTransaction, classify},
    decode::{ConstructorArgs, decode_constructor_args},
    ledger::cmp_contract_names,
};
use alloy_primitives::{Address, B256};
use chronicles_chain::ChainReader;
use chronicles_config::{Config, ProxyConfig};
use chronicles_sequence::{ScriptSequence, TransactionKind};
use indexmap::IndexMap;
use std::fmt;

/// Why a creation was not recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The created contract is a proxy; it is recorded with its implementation.
    Proxy,
    /// The same contract, address and transaction hash is already in the history.
    Duplicate,
    /// The contract name or address could not be determined.
    Unresolved,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Proxy => "proxy",
            Self::Duplicate => "duplicate",
            Self::Unresolved => "unresolved",
        })
    }
}

/// A creation that was not recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    pub contract_name: Option<String>,
    pub address: Option<Address>,
    pub reason: SkipReason,
}

/// The result of reconciling a broadcast.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// The history entry that was recorded, if anything new was found.
    pub entry: Option<HistoryEntry>,
    pub skipped: Vec<Skipped>,
}

impl ReconcileOutcome {
    /// Returns true if the ledger was changed.
    pub fn has_new_contracts(&self) -> bool {
        self.entry.is_some()
    }
}

/// The contract a creation deploys, once module deployments are resolved.
struct Target<'t> {
    name: String,
    address: Address,
    factory: Option<Address>,
    salt: Option<B256>,
    args: Option<ConstructorArgs<'t>>,
}

/// Reconciles broadcasts against a ledger, the chain and the compiled artifacts.
#[derive(Debug)]
pub struct Reconciler<'a, C, A> {
    config: &'a Config,
    chain: C,
    artifacts: A,
}

impl<'a, C: ChainReader, A: ArtifactSource> Reconciler<'a, C, A> {
    pub fn new(config: &'a Config, chain: C, artifacts: A) -> Self {
        Self { config, chain, artifacts }
    }

    /// Records the contracts created by `sequence` in `ledger`.
    ///
    /// `ledger` is only modified if the whole broadcast reconciles and at least one contract is
    /// new. On error it is left as it was.
    pub fn reconcile(
        &self,
        ledger: &mut Ledger,
        sequence: &ScriptSequence,
        force: bool,
    ) -> Result<ReconcileOutcome, LedgerError> {
        let commit = sequence.commit();
        ledger.ensure_unprocessed(commit, force)?;

        let creations = classify(&sequence.transactions, &self.chain, self.config);
        let mut next = ledger.clone();
        let mut contracts = Vec::new();
        let mut skipped = Vec::new();

        for (idx, tx) in creations.iter().enumerate() {
            let target = match self.resolve(tx) {
                Ok(target) => target,
                Err(skip) => {
                    skipped.push(skip);
                    continue;
                }
            };

            if let Some(reason) = self.skip_reason(&next, tx, &target) {
                let _ = sh_warn!("Skipping {reason} contract: {}({})", target.name, target.address);
                skipped.push(Skipped {
                    contract_name: Some(target.name),
                    address: Some(target.address),
                    reason,
                });
                continue;
            }

            let (deployment, initializer) =
                self.deployment(&next, &creations[idx + 1..], tx, &target)?;
            let constructor = self.decode_constructor(&target)?;

            trace!(
                target: "chronicles::reconcile",
                name = %target.name,
                address = %deployment.address,
                implementation = ?deployment.implementation,
                "recorded contract"
            );

            next.upsert(
                target.name.clone(),
                DeploymentRecord {
                    deployment: deployment.clone(),
                    timestamp: sequence.timestamp,
                    commit: commit.map(ToString::to_string),
                },
            );
            contracts.push((
                target.name,
                HistoryContract { deployment, input: DeploymentInput { constructor, initializer } },
            ));
        }

        if contracts.is_empty() {
            debug!(target: "chronicles::reconcile", skipped = skipped.len(), "nothing new");
            return Ok(ReconcileOutcome { entry: None, skipped });
        }

        contracts.sort_by(|(a, _), (b, _)| cmp_contract_names(a, b));
        let entry = HistoryEntry {
            contracts: contracts.into_iter().collect::<IndexMap<_, _>>(),
            timestamp: sequence.timestamp,
            commit: commit.map(ToString::to_string),
        };

        next.sort_latest();
        next.record(entry.clone());
        *ledger = next;

        debug!(
            target: "chronicles::reconcile",
            recorded = entry.contracts.len(),
            skipped = skipped.len(),
            "reconciled broadcast"
        );
        Ok(ReconcileOutcome { entry: Some(entry), skipped })
    }

    /// Determines name, address and constructor arguments of the created contract.
    ///
    /// Module deployments are calls to a factory: the contract is the one created with `CREATE2`
    /// during the call and its name is read from the chain.
    fn resolve<'t>(&self, tx: &'t CreationTransaction) -> Result<Target<'t>, Skipped> {
        let (name, address, target) = if tx.is_module() {
            let address = tx.create2_child().and_then(|child| child.address);
            let name = address.and_then(|address| self.chain.name(address));
            let target = (
                tx.contract_address,
                tx.argument(0).and_then(|salt| salt.parse().ok()),
                tx.argument(2).map(ConstructorArgs::Encoded),
            );
            (name, address, target)
        } else {
            let salt = (tx.kind == TransactionKind::Create2).then(|| tx.input_salt()).flatten();
            let target = (None, salt, tx.arguments.as_deref().map(ConstructorArgs::Values));
            (tx.contract_name.clone(), tx.contract_address, target)
        };

        match (name, address) {
            (Some(name), Some(address)) => {
                let (factory, salt, args) = target;
                Ok(Target { name, address, factory, salt, args })
            }
            (name, address) => {
                let _ = sh_warn!(
                    "Skipping unresolved contract: {}({})",
                    name.as_deref().unwrap_or("unknown"),
                    address.map_or_else(|| "unknown".to_string(), |a| a.to_string())
                );
                Err(Skipped { contract_name: name, address, reason: SkipReason::Unresolved })
            }
        }
    }

    fn skip_reason(
        &self,
        ledger: &Ledger,
        tx: &CreationTransaction,
        target: &Target<'_>,
    ) -> Option<SkipReason> {
        if self.config.proxy(&target.name).is_some() {
            Some(SkipReason::Proxy)
        } else if ledger.is_duplicate(&target.name, target.address, tx.hash) {
            Some(SkipReason::Duplicate)
        } else {
            None
        }
    }

    /// Builds the deployment of `target`, returning the proxy initializer when a proxy is
    /// created for it later in the same broadcast.
    fn deployment(
        &self,
        ledger: &Ledger,
        rest: &[CreationTransaction],
        tx: &CreationTransaction,
        target: &Target<'_>,
    ) -> Result<(Deployment, Option<String>), LedgerError> {
        match ledger.latest(&target.name) {
            None => {
                let forthcoming = self.forthcoming_proxy(rest, target.address);
                if let Some((proxy_tx, proxy, kind)) = forthcoming {
                    let initializer = kind
                        .initializer
                        .and_then(|idx| proxy_tx.argument(idx))
                        .map(ToString::to_string);

                    let deployment = Deployment {
                        address: proxy,
                        deployer: tx.from,
                        hash: proxy_tx.hash,
                        implementation: Some(target.address),
                        proxy_admin: self.chain.proxy_admin(proxy),
                        proxy_type: Some(kind.name.clone()),
                        salt: target.salt,
                        version: self.chain.version(proxy),
                        ..Default::default()
                    };
                    return Ok((deployment.normalized(), initializer));
                }
            }
            Some(record) if self.is_upgradeable(record) => {
                let proxy = record.deployment.address;
                let onchain = self.chain.implementation(proxy);
                if onchain != Some(target.address) {
                    return Err(LedgerError::ImplementationMismatch {
                        name: target.name.clone(),
                        address: target.address,
                        proxy,
                        onchain,
                    });
                }

                let deployment = Deployment {
                    address: proxy,
                    deployer: tx.from,
                    hash: record.deployment.hash,
                    implementation: Some(target.address),
                    proxy_admin: self.chain.proxy_admin(proxy),
                    proxy_type: record.deployment.proxy_type.clone(),
                    salt: target.salt,
                    version: self.chain.version(proxy),
                    ..Default::default()
                };
                return Ok((deployment.normalized(), None));
            }
            Some(_) => {}
        }

        let version = if self.config.is_account_contract(&target.name) {
            self.chain.account_version(target.address)
        } else {
            self.chain.version(target.address)
        };
        let deployment = Deployment {
            address: target.address,
            deployer: tx.from,
            factory: target.factory,
            hash: tx.hash,
            salt: target.salt,
            version,
            ..Default::default()
        };
        Ok((deployment.normalized(), None))
    }

    /// Finds a later proxy creation whose first argument is `implementation`.
    fn forthcoming_proxy<'t>(
        &self,
        rest: &'t [CreationTransaction],
        implementation: Address,
    ) -> Option<(&'t CreationTransaction, Address, &'a ProxyConfig)> {
        rest.iter().find_map(|tx| {
            let kind = self.config.proxy(tx.contract_name.as_deref()?)?;
            let first = tx.argument(0)?;
            if self.chain.to_checksum_address(first)? != implementation {
                return None;
            }
            Some((tx, tx.contract_address?, kind))
        })
    }

    fn is_upgradeable(&self, record: &DeploymentRecord) -> bool {
        record
            .deployment
            .proxy_type
            .as_deref()
            .is_some_and(|kind| self.config.proxy(kind).is_some())
    }

    fn decode_constructor(
        &self,
        target: &Target<'_>,
    ) -> Result<serde_json::Map<String, serde_json::Value>, LedgerError> {
        let artifact = self.artifacts.artifact(&target.name)?;
        decode_constructor_args(&target.name, &artifact.abi, target.args, &self.chain)
    }
}
