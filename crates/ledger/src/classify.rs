//! Picks the contract creations out of a broadcast.

use alloy_primitives::{Address, B256};
use chronicles_chain::ChainReader;
use chronicles_config::Config;
use chronicles_sequence::{TransactionKind, TransactionWithMetadata};

/// A contract created while executing a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedContract {
    pub kind: TransactionKind,
    pub address: Option<Address>,
}

/// A broadcast transaction that creates a contract, with its addresses checksummed.
///
/// Addresses that could not be normalized are `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreationTransaction {
    pub kind: TransactionKind,
    pub hash: Option<B256>,
    pub contract_name: Option<String>,
    pub contract_address: Option<Address>,
    pub arguments: Option<Vec<String>>,
    pub from: Option<Address>,
    pub input: Option<String>,
    pub additional_contracts: Vec<CreatedContract>,
}

impl CreationTransaction {
    /// Returns true if this is a call to a module factory rather than a direct creation.
    pub fn is_module(&self) -> bool {
        !self.kind.is_create()
    }

    /// The first contract created with `CREATE2` during this transaction.
    pub fn create2_child(&self) -> Option<&CreatedContract> {
        self.additional_contracts.iter().find(|child| child.kind == TransactionKind::Create2)
    }

    /// The first 32 bytes of the input, which is the salt for the deterministic deployer.
    pub fn input_salt(&self) -> Option<B256> {
        self.input.as_deref()?.get(..66)?.parse().ok()
    }

    /// Returns the argument at `index`.
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.as_ref()?.get(index).map(String::as_str)
    }
}

/// Returns the transactions that create contracts, in broadcast order.
///
/// These are `CREATE` and `CREATE2` transactions and calls to one of the configured module
/// deployment functions.
pub fn classify<C: ChainReader>(
    transactions: &[TransactionWithMetadata],
    chain: &C,
    config: &Config,
) -> Vec<CreationTransaction> {
    let checksum = |address: Option<&String>| address.and_then(|a| chain.to_checksum_address(a));

    let creations = transactions
        .iter()
        .filter(|tx| {
            tx.kind.is_create()
                || tx.function.as_deref().is_some_and(|f| config.is_module_signature(f))
        })
        .map(|tx| CreationTransaction {
            kind: tx.kind,
            hash: tx.hash,
            contract_name: tx.contract_name().map(ToString::to_string),
            contract_address: checksum(tx.contract_address.as_ref()),
            arguments: tx.arguments.clone(),
            from: checksum(tx.transaction.from.as_ref()),
            input: tx.transaction.input.clone(),
            additional_contracts: tx
                .additional_contracts
                .iter()
                .map(|child| CreatedContract {
                    kind: child.kind,
                    address: checksum(child.address.as_ref()),
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    debug!(
        target: "chronicles::classify",
        transactions = transactions.len(),
        creations = creations.len(),
        "classified broadcast"
    );
    creations
}
