//! # chronicles-ledger
//!
//! Turns the transactions of a Foundry broadcast into a per-chain ledger of deployments.
//!
//! Creation transactions are picked out of the broadcast by [`classify`](classify::classify),
//! reconciled against the previously recorded deployments and the chain by [`Reconciler`], and
//! merged into the [`Ledger`] that [`LedgerStore`] eventually writes to disk.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

#[macro_use]
extern crate chronicles_common;

pub mod artifacts;
pub mod classify;
pub mod decode;
mod error;
pub mod ledger;
pub mod reconcile;
pub mod store;

pub use artifacts::{Artifact, ArtifactSource, ArtifactsDir};
pub use error::LedgerError;
pub use ledger::{
    Deployment, DeploymentInput, DeploymentRecord, HistoryContract, HistoryEntry, Ledger,
};
pub use reconcile::{ReconcileOutcome, Reconciler, SkipReason, Skipped};
pub use store::LedgerStore;
