//! # chronicles-doc
//!
//! Renders the `latest` section of a deployment ledger as a Markdown page: a table of contents, a
//! summary table and one section per contract, linking to the block explorer of the chain.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod error;
pub use error::DocError;

mod explorer;
pub use explorer::{Explorer, ExplorerError};

mod project;
pub use project::ProjectInfo;

mod writer;
pub use writer::{AsDoc, AsDocResult, BufWriter, DeploymentsDoc, Markdown};
