//! # chronicles-common
//!
//! Common utilities for building and using the chronicles tools.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

#[macro_use]
pub mod io;

pub mod errors;
pub mod fmt;
pub mod fs;
pub mod serde_helpers;
