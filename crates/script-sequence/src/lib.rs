//! # chronicles-sequence
//!
//! The broadcast files written by `forge script --broadcast`, and a reader locating them.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod reader;
pub mod sequence;
pub mod transaction;

pub use reader::{BroadcastReader, DEFAULT_SCRIPT, script_file_name};
pub use sequence::ScriptSequence;
pub use transaction::{AdditionalContract, TransactionKind, TransactionWithMetadata, TxRequest};
