use crate::{account, constants::*};
use alloy_primitives::{Address, B256};

/// Read-only, best-effort access to on-chain state.
///
/// Implementors return `None` on any failure. The provided methods build the queries the ledger
/// needs on top of the four primitives.
#[auto_impl::auto_impl(&, Box)]
pub trait ChainReader {
    /// Parses `address` and returns it checksummed.
    fn to_checksum_address(&self, address: &str) -> Option<Address>;

    /// Decodes a left-padded 32 byte word, with or without `0x`, into an address.
    fn parse_bytes32_address(&self, word: &str) -> Option<Address>;

    /// Reads a storage slot of `address`.
    fn storage(&self, address: Address, slot: B256) -> Option<B256>;

    /// Calls a read-only method returning a string, e.g. `version()(string)`.
    fn call(&self, address: Address, signature: &str) -> Option<String>;

    /// Reads an address stored in `slot`. The zero address counts as unset.
    fn storage_address(&self, address: Address, slot: B256) -> Option<Address> {
        let word = self.storage(address, slot)?;
        self.parse_bytes32_address(&word.to_string()).filter(|addr| !addr.is_zero())
    }

    /// The implementation behind an EIP-1967 proxy.
    fn implementation(&self, proxy: Address) -> Option<Address> {
        self.storage_address(proxy, IMPLEMENTATION_SLOT)
    }

    /// The admin of an EIP-1967 proxy.
    fn proxy_admin(&self, proxy: Address) -> Option<Address> {
        self.storage_address(proxy, ADMIN_SLOT)
    }

    /// `name()`
    fn name(&self, address: Address) -> Option<String> {
        self.call(address, NAME_SIG)
    }

    /// `version()`
    fn version(&self, address: Address) -> Option<String> {
        self.call(address, VERSION_SIG)
    }

    /// `accountId()`
    fn account_id(&self, address: Address) -> Option<String> {
        self.call(address, ACCOUNT_ID_SIG)
    }

    /// The human name derived from `accountId()`.
    fn account_name(&self, address: Address) -> Option<String> {
        account::account_name(&self.account_id(address)?)
    }

    /// The version derived from `accountId()`.
    fn account_version(&self, address: Address) -> Option<String> {
        account::account_version(&self.account_id(address)?)
    }
}
