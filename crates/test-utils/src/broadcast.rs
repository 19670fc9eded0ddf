use alloy_primitives::{Address, B256, address, keccak256};
use serde_json::{Value, json};

/// The deterministic deployer `forge script` routes `CREATE2` deployments through.
const CREATE2_DEPLOYER: Address = address!("0x4e59b44847b379578588920ca78fbf26c0b4956c");

/// Builds `run-latest.json` contents the way `forge script --broadcast` writes them.
///
/// Transaction hashes are derived from the commit and the position of the transaction, so
/// broadcasting the same builder twice yields the same hashes.
#[derive(Clone, Debug)]
pub struct BroadcastBuilder {
    chain: u64,
    timestamp: u64,
    commit: Option<String>,
    sender: Address,
    transactions: Vec<Value>,
}

impl BroadcastBuilder {
    pub fn new(chain: u64) -> Self {
        Self {
            chain,
            timestamp: 1_700_000_000,
            commit: Some("abc1234".to_string()),
            sender: Address::new([0x11; 20]),
            transactions: Vec::new(),
        }
    }

    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn commit(mut self, commit: Option<&str>) -> Self {
        self.commit = commit.map(ToString::to_string);
        self
    }

    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = sender;
        self
    }

    /// The hash the next transaction will get.
    pub fn next_hash(&self) -> B256 {
        self.hash_at(self.transactions.len())
    }

    /// The hash of the transaction at `index`.
    pub fn hash_at(&self, index: usize) -> B256 {
        keccak256(format!("{}:{index}", self.commit.as_deref().unwrap_or_default()))
    }

    /// Adds a `CREATE` of `name` at `address`.
    pub fn create(self, name: &str, address: Address, args: &[&str]) -> Self {
        let tx = json!({ "from": self.sender, "input": "0x6080604052" });
        self.push("CREATE", name, address, None, args, tx, json!([]))
    }

    /// Adds a `CREATE2` of `name` at `address` through the deterministic deployer.
    pub fn create2(self, name: &str, address: Address, salt: B256, args: &[&str]) -> Self {
        let input = format!("{salt}6080604052");
        let tx = json!({ "from": self.sender, "to": CREATE2_DEPLOYER, "input": input });
        self.push("CREATE2", name, address, None, args, tx, json!([]))
    }

    /// Adds a `TransparentUpgradeableProxy` for `implementation`.
    pub fn transparent_proxy(
        self,
        address: Address,
        implementation: Address,
        owner: Address,
        initializer: &str,
    ) -> Self {
        let args = [implementation.to_string(), owner.to_string(), initializer.to_string()];
        let args = args.iter().map(String::as_str).collect::<Vec<_>>();
        self.create("TransparentUpgradeableProxy", address, &args)
    }

    /// Adds an `ERC1967Proxy` for `implementation`, initialized with `initializer`.
    pub fn erc1967_proxy(
        self,
        address: Address,
        implementation: Address,
        initializer: &str,
    ) -> Self {
        let implementation = implementation.to_string();
        self.create("ERC1967Proxy", address, &[&implementation, initializer])
    }

    /// Adds a `deployModule(bytes32,bytes,bytes)` call on `factory` creating `module` with
    /// `CREATE2`.
    pub fn deploy_module(
        self,
        factory: Address,
        module: Address,
        salt: B256,
        encoded_args: &str,
    ) -> Self {
        let salt = salt.to_string();
        let args = [salt.as_str(), "0x6080604052", encoded_args];
        let tx = json!({ "from": self.sender, "to": factory, "input": "0xdeadbeef" });
        let children = json!([{ "transactionType": "CREATE2", "address": module, "initCode": "0x6080" }]);
        self.push(
            "CALL",
            "ModuleFactory",
            factory,
            Some("deployModule(bytes32,bytes,bytes)"),
            &args,
            tx,
            children,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        mut self,
        kind: &str,
        name: &str,
        address: Address,
        function: Option<&str>,
        args: &[&str],
        transaction: Value,
        additional_contracts: Value,
    ) -> Self {
        let hash = self.next_hash();
        self.transactions.push(json!({
            "hash": hash,
            "transactionType": kind,
            "contractName": name,
            // forge writes addresses lowercase
            "contractAddress": address.to_string().to_lowercase(),
            "function": function,
            "arguments": if args.is_empty() { Value::Null } else { json!(args) },
            "transaction": transaction,
            "additionalContracts": additional_contracts,
            "isFixedGasLimit": false
        }));
        self
    }

    pub fn build(&self) -> Value {
        json!({
            "transactions": self.transactions,
            "receipts": [],
            "libraries": [],
            "pending": [],
            "returns": {},
            "timestamp": self.timestamp,
            "chain": self.chain,
            "commit": self.commit,
            "multi": false
        })
    }
}

/// Returns an artifact ABI with a constructor taking `inputs` as `(name, type)` pairs.
pub fn constructor_abi(inputs: &[(&str, &str)]) -> Value {
    let inputs = inputs
        .iter()
        .map(|(name, ty)| json!({ "name": name, "type": ty, "internalType": ty }))
        .collect::<Vec<_>>();
    json!([
        { "type": "constructor", "inputs": inputs, "stateMutability": "nonpayable" },
        {
            "type": "function",
            "name": "version",
            "inputs": [],
            "outputs": [{ "name": "", "type": "string", "internalType": "string" }],
            "stateMutability": "view"
        }
    ])
}
