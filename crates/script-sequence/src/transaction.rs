use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// The kind of a broadcast transaction, as written in its `transactionType` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    #[default]
    Call,
    StaticCall,
    CallCode,
    DelegateCall,
    Create,
    Create2,
    /// Any kind this tool does not know about.
    #[serde(other)]
    Unknown,
}

impl TransactionKind {
    /// Returns true for `CREATE` and `CREATE2`.
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create | Self::Create2)
    }
}

/// A contract created while executing a transaction, e.g. by a factory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalContract {
    #[serde(rename = "transactionType")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub init_code: Option<String>,
}

/// The request part of a broadcast transaction.
///
/// Addresses are kept verbatim; they are checksummed when the transaction is classified.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TxRequest {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default, alias = "data")]
    pub input: Option<String>,
}

/// A single transaction of a broadcast.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWithMetadata {
    #[serde(default)]
    pub hash: Option<B256>,
    #[serde(rename = "transactionType")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub contract_name: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub arguments: Option<Vec<String>>,
    #[serde(default)]
    pub transaction: TxRequest,
    #[serde(default)]
    pub additional_contracts: Vec<AdditionalContract>,
}

impl TransactionWithMetadata {
    /// Returns the contract name, ignoring empty names.
    pub fn contract_name(&self) -> Option<&str> {
        self.contract_name.as_deref().filter(|name| !name.is_empty())
    }
}
