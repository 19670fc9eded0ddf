//! Helpers for ERC-7579 style `accountId()` strings, e.g. `vendor.product.1.2.0`.

use chronicles_common::fmt::capitalize;
use itertools::Itertools;

/// Returns the human name of an account: its first two segments, capitalized.
///
/// `biconomy.nexus.1.0.0` becomes `Biconomy Nexus`.
pub fn account_name(account_id: &str) -> Option<String> {
    let name = account_id.split('.').take(2).filter(|s| !s.is_empty()).map(capitalize).join(" ");
    (!name.is_empty()).then_some(name)
}

/// Returns the version part of an account id: everything after the first two segments.
///
/// `biconomy.nexus.1.0.0` becomes `1.0.0`.
pub fn account_version(account_id: &str) -> Option<String> {
    let version = account_id.split('.').skip(2).join(".");
    (!version.is_empty()).then_some(version)
}
