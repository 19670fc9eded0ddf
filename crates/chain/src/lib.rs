//! # chronicles-chain
//!
//! Read-only access to the chain a broadcast was sent to.
//!
//! Every query is best-effort: failures surface as `None` and the caller records the field as
//! unknown.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod account;
pub mod cast;
pub mod constants;
pub mod reader;

pub use cast::CastReader;
pub use reader::ChainReader;
