//! # chronicles
//!
//! The `chronicles` command: reads the latest broadcast of a deployment script, records the new
//! deployments in the chain's json ledger and renders the ledger as Markdown.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

#[macro_use]
extern crate chronicles_common;

pub mod args;
pub mod cmd;
pub mod handler;
pub mod utils;
