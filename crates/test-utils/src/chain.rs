use alloy_primitives::{Address, B256};
use chronicles_chain::{
    ChainReader,
    constants::{ACCOUNT_ID_SIG, ADMIN_SLOT, IMPLEMENTATION_SLOT, NAME_SIG, VERSION_SIG},
};
use std::{cell::RefCell, collections::HashMap};

/// An in-memory [`ChainReader`] with canned answers.
///
/// Address normalization is done natively, everything else is looked up in the configured
/// storage slots and call results. Unknown queries return `None`, like a failing `cast` would.
#[derive(Clone, Debug, Default)]
pub struct MockChain {
    storage: HashMap<(Address, B256), B256>,
    calls: HashMap<(Address, String), String>,
    queries: RefCell<Vec<String>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a storage slot.
    pub fn with_storage(mut self, address: Address, slot: B256, value: B256) -> Self {
        self.storage.insert((address, slot), value);
        self
    }

    /// Sets the result of calling `signature` on `address`.
    pub fn with_call(mut self, address: Address, signature: &str, result: &str) -> Self {
        self.calls.insert((address, signature.to_string()), result.to_string());
        self
    }

    /// Points the EIP-1967 implementation slot of `proxy` to `implementation`.
    pub fn with_implementation(self, proxy: Address, implementation: Address) -> Self {
        self.with_storage(proxy, IMPLEMENTATION_SLOT, implementation.into_word())
    }

    /// Sets the EIP-1967 admin slot of `proxy`.
    pub fn with_admin(self, proxy: Address, admin: Address) -> Self {
        self.with_storage(proxy, ADMIN_SLOT, admin.into_word())
    }

    pub fn with_name(self, address: Address, name: &str) -> Self {
        self.with_call(address, NAME_SIG, name)
    }

    pub fn with_version(self, address: Address, version: &str) -> Self {
        self.with_call(address, VERSION_SIG, version)
    }

    pub fn with_account_id(self, address: Address, account_id: &str) -> Self {
        self.with_call(address, ACCOUNT_ID_SIG, account_id)
    }

    /// Returns the storage reads and calls made so far, e.g. `call 0x.. version()(string)`.
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    fn log(&self, query: String) {
        trace!(target: "chronicles::mock", %query);
        self.queries.borrow_mut().push(query);
    }
}

impl ChainReader for MockChain {
    fn to_checksum_address(&self, address: &str) -> Option<Address> {
        address.trim().parse().ok()
    }

    fn parse_bytes32_address(&self, word: &str) -> Option<Address> {
        let word = word.trim();
        let word = word.strip_prefix("0x").unwrap_or(word);
        let word: B256 = format!("0x{word:0>64}").parse().ok()?;
        word[..12].iter().all(|b| *b == 0).then(|| Address::from_word(word))
    }

    fn storage(&self, address: Address, slot: B256) -> Option<B256> {
        self.log(format!("storage {address} {slot}"));
        self.storage.get(&(address, slot)).copied()
    }

    fn call(&self, address: Address, signature: &str) -> Option<String> {
        self.log(format!("call {address} {signature}"));
        self.calls.get(&(address, signature.to_string())).cloned()
    }
}
