//! Test helpers shared by the chronicles crates.

#![warn(unused_crate_dependencies, unreachable_pub)]

#[macro_use]
extern crate tracing;

// Macros useful for testing.
mod macros;

mod chain;
pub use chain::MockChain;

mod broadcast;
pub use broadcast::{BroadcastBuilder, constructor_abi};

// Utilities for making it easier to handle tests.
pub mod project;
pub use project::TempProject;

/// Initializes tracing for tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
