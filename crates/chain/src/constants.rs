//! Well-known storage slots and method signatures.

use alloy_primitives::{B256, b256};

/// EIP-1967 implementation slot: `bytes32(uint256(keccak256('eip1967.proxy.implementation')) - 1)`.
pub const IMPLEMENTATION_SLOT: B256 =
    b256!("0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc");

/// EIP-1967 admin slot: `bytes32(uint256(keccak256('eip1967.proxy.admin')) - 1)`.
pub const ADMIN_SLOT: B256 =
    b256!("0xb53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103");

pub const NAME_SIG: &str = "name()(string)";
pub const VERSION_SIG: &str = "version()(string)";
pub const ACCOUNT_ID_SIG: &str = "accountId()(string)";
