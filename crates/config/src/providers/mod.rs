//! Custom figment providers.

mod foundry;
pub use foundry::FoundryTomlProvider;
