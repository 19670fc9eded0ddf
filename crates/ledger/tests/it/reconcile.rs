use crate::utils::{CHAIN, extract};
use alloy_primitives::{Address, B256, address, b256};
use chronicles_ledger::{LedgerError, SkipReason};
use chronicles_test_utils::{BroadcastBuilder, MockChain, chroniclestest, constructor_abi};
use serde_json::json;

const SENDER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
const OWNER: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
const ADMIN: Address = address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");
const IMPL: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
const IMPL_V2: Address = address!("0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9");
const PROXY: Address = address!("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512");
const VAULT: Address = address!("0xDc64a140Aa3E981100a9becA4E685f962f0cF6C9");
const TREASURY: Address = address!("0x5FC8d32690cc91D4c39d9d3abcBD16989F875707");
const FACTORY: Address = address!("0x0165878A594ca255338adfa4d48449f69242Eb8F");
const MODULE: Address = address!("0xa513E6E4b8f2a923D98304ec87F64353C4D5C853");

const SALT: B256 = b256!("0x0000000000000000000000000000000000000000000000000000000000000007");

fn registry_deployment() -> BroadcastBuilder {
    let owner = OWNER.to_string();
    BroadcastBuilder::new(CHAIN)
        .sender(SENDER)
        .create("Registry", IMPL, &[&owner])
        .transparent_proxy(PROXY, IMPL, OWNER, "0x8129fc1c")
}

fn proxied_chain() -> MockChain {
    MockChain::new()
        .with_implementation(PROXY, IMPL)
        .with_admin(PROXY, ADMIN)
        .with_version(PROXY, "1.0.0")
}

chroniclestest!(records_contract_behind_forthcoming_proxy, |prj| {
    prj.add_artifact("Registry", constructor_abi(&[("_owner", "address")]), None);

    let broadcast = registry_deployment();
    let outcome = extract(&prj, &proxied_chain(), &broadcast, false).unwrap();

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].reason, SkipReason::Proxy);
    assert_eq!(outcome.skipped[0].contract_name.as_deref(), Some("TransparentUpgradeableProxy"));

    let ledger = prj.ledger_json(CHAIN);
    assert_eq!(ledger["chainId"], "11155111");
    assert_eq!(
        ledger["latest"],
        json!({
            "Registry": {
                "address": PROXY.to_checksum(None),
                "deployer": SENDER.to_checksum(None),
                "hash": broadcast.hash_at(1),
                "implementation": IMPL.to_checksum(None),
                "proxyAdmin": ADMIN.to_checksum(None),
                "proxyType": "TransparentUpgradeableProxy",
                "version": "1.0.0",
                "timestamp": 1700000000,
                "commit": "abc1234"
            }
        })
    );
    assert_eq!(
        ledger["history"][0]["contracts"]["Registry"]["input"],
        json!({ "constructor": { "owner": OWNER.to_checksum(None) }, "initializer": "0x8129fc1c" })
    );
});

chroniclestest!(upgrades_implementation_behind_existing_proxy, |prj| {
    prj.add_artifact("Registry", constructor_abi(&[("_owner", "address")]), None);
    let first = registry_deployment();
    extract(&prj, &proxied_chain(), &first, false).unwrap();

    let owner = OWNER.to_string();
    let upgrade = BroadcastBuilder::new(CHAIN)
        .commit(Some("def5678"))
        .timestamp(1700003600)
        .sender(SENDER)
        .create("Registry", IMPL_V2, &[&owner]);
    let chain = MockChain::new()
        .with_implementation(PROXY, IMPL_V2)
        .with_admin(PROXY, ADMIN)
        .with_version(PROXY, "2.0.0");
    let outcome = extract(&prj, &chain, &upgrade, false).unwrap();
    assert!(outcome.has_new_contracts());

    let ledger = prj.ledger_json(CHAIN);
    let registry = &ledger["latest"]["Registry"];
    assert_eq!(registry["address"], PROXY.to_checksum(None));
    assert_eq!(registry["hash"], json!(first.hash_at(1)));
    assert_eq!(registry["implementation"], IMPL_V2.to_checksum(None));
    assert_eq!(registry["version"], "2.0.0");
    assert_eq!(registry["commit"], "def5678");

    let history = ledger["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["commit"], "def5678");
    assert_eq!(history[1]["commit"], "abc1234");
    assert_eq!(
        history[0]["contracts"]["Registry"]["input"],
        json!({ "constructor": { "owner": OWNER.to_checksum(None) } })
    );
});

chroniclestest!(implementation_mismatch_keeps_ledger, |prj| {
    prj.add_artifact("Registry", constructor_abi(&[("_owner", "address")]), None);
    extract(&prj, &proxied_chain(), &registry_deployment(), false).unwrap();
    let before = prj.read_ledger(CHAIN);

    let owner = OWNER.to_string();
    let upgrade = BroadcastBuilder::new(CHAIN)
        .commit(Some("def5678"))
        .create("Registry", IMPL_V2, &[&owner]);
    // the proxy still points to the first implementation
    let err = extract(&prj, &proxied_chain(), &upgrade, false).unwrap_err();

    assert!(
        matches!(
            &err,
            LedgerError::ImplementationMismatch { name, address, onchain, .. }
                if name == "Registry" && *address == IMPL_V2 && *onchain == Some(IMPL)
        ),
        "{err}"
    );
    similar_asserts::assert_eq!(prj.read_ledger(CHAIN), before);
});

chroniclestest!(records_contract_behind_erc1967_proxy, |prj| {
    prj.add_artifact(
        "Treasury",
        constructor_abi(&[("_owner", "address"), ("fee_", "uint256")]),
        None,
    );
    let owner = OWNER.to_string();
    let broadcast = BroadcastBuilder::new(CHAIN)
        .sender(SENDER)
        .create("Treasury", TREASURY, &[&owner, "100"])
        .erc1967_proxy(PROXY, TREASURY, "0xc4d66de8");
    let chain = MockChain::new().with_implementation(PROXY, TREASURY).with_version(PROXY, "1.2.0");
    let outcome = extract(&prj, &chain, &broadcast, false).unwrap();

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].contract_name.as_deref(), Some("ERC1967Proxy"));

    let ledger = prj.ledger_json(CHAIN);
    assert_eq!(
        ledger["latest"]["Treasury"],
        json!({
            "address": PROXY.to_checksum(None),
            "deployer": SENDER.to_checksum(None),
            "hash": broadcast.hash_at(1),
            "implementation": TREASURY.to_checksum(None),
            "proxyType": "ERC1967Proxy",
            "version": "1.2.0",
            "timestamp": 1700000000,
            "commit": "abc1234"
        })
    );
    assert_eq!(
        ledger["history"][0]["contracts"]["Treasury"]["input"],
        json!({
            "constructor": { "owner": OWNER.to_checksum(None), "fee": "100" },
            "initializer": "0xc4d66de8"
        })
    );
});

chroniclestest!(argument_count_mismatch_behind_proxy_keeps_ledger, |prj| {
    prj.add_artifact("Vault", constructor_abi(&[]), None);
    let vault = BroadcastBuilder::new(CHAIN).create("Vault", VAULT, &[]);
    extract(&prj, &MockChain::new(), &vault, false).unwrap();
    let before = prj.read_ledger(CHAIN);

    // the broadcast passes the owner only
    prj.add_artifact(
        "Registry",
        constructor_abi(&[("_owner", "address"), ("_fee", "uint256")]),
        None,
    );
    let owner = OWNER.to_string();
    let broadcast = BroadcastBuilder::new(CHAIN)
        .commit(Some("def5678"))
        .create("Registry", IMPL, &[&owner])
        .erc1967_proxy(PROXY, IMPL, "0x8129fc1c");
    let err = extract(&prj, &proxied_chain(), &broadcast, false).unwrap_err();

    assert!(
        matches!(
            &err,
            LedgerError::ArgumentCountMismatch { contract, expected: 2, actual: 1 }
                if contract == "Registry"
        ),
        "{err}"
    );
    similar_asserts::assert_eq!(prj.read_ledger(CHAIN), before);
});

chroniclestest!(rejects_processed_commit, |prj| {
    prj.add_artifact("Vault", constructor_abi(&[]), None);
    let broadcast = BroadcastBuilder::new(CHAIN).create("Vault", VAULT, &[]);
    extract(&prj, &MockChain::new(), &broadcast, false).unwrap();
    let before = prj.read_ledger(CHAIN);

    let err = extract(&prj, &MockChain::new(), &broadcast, false).unwrap_err();
    assert!(matches!(&err, LedgerError::CommitAlreadyProcessed(commit) if commit == "abc1234"));
    assert_eq!(
        err.to_string(),
        "commit abc1234 already processed, pass --force to process it again"
    );
    similar_asserts::assert_eq!(prj.read_ledger(CHAIN), before);
});

chroniclestest!(forced_duplicates_are_a_no_op, |prj| {
    prj.add_artifact("Vault", constructor_abi(&[]), None);
    prj.add_artifact("Treasury", constructor_abi(&[("admin_", "address")]), None);

    let admin = ADMIN.to_string();
    let broadcast = BroadcastBuilder::new(CHAIN)
        .create2("Vault", VAULT, SALT, &[])
        .create("Treasury", TREASURY, &[&admin]);
    extract(&prj, &MockChain::new(), &broadcast, false).unwrap();
    let before = prj.read_ledger(CHAIN);

    let outcome = extract(&prj, &MockChain::new(), &broadcast, true).unwrap();
    assert!(!outcome.has_new_contracts());
    assert!(outcome.skipped.iter().all(|skip| skip.reason == SkipReason::Duplicate));
    assert_eq!(outcome.skipped.len(), 2);
    similar_asserts::assert_eq!(prj.read_ledger(CHAIN), before);
});

chroniclestest!(records_salts_and_versions, |prj| {
    prj.add_artifact("Vault", constructor_abi(&[]), None);
    prj.add_artifact("Treasury", constructor_abi(&[("admin_", "address")]), None);

    let admin = ADMIN.to_string();
    let broadcast = BroadcastBuilder::new(CHAIN)
        .sender(SENDER)
        .create2("Vault", VAULT, SALT, &[])
        .create("Treasury", TREASURY, &[&admin]);
    let chain = MockChain::new().with_version(VAULT, "1.1.0");
    extract(&prj, &chain, &broadcast, false).unwrap();

    let ledger = prj.ledger_json(CHAIN);
    assert_eq!(ledger["latest"]["Vault"]["salt"], json!(SALT));
    assert_eq!(ledger["latest"]["Vault"]["version"], "1.1.0");
    assert!(ledger["latest"]["Treasury"].get("salt").is_none());
    assert!(ledger["latest"]["Treasury"].get("version").is_none());
    assert_eq!(ledger["latest"]["Treasury"]["deployer"], SENDER.to_checksum(None));
    assert_eq!(
        ledger["history"][0]["contracts"]["Treasury"]["input"]["constructor"],
        json!({ "admin": ADMIN.to_string() })
    );
});

chroniclestest!(records_module_deployments, |prj| {
    prj.add_artifact(
        "K1Validator",
        constructor_abi(&[("registry", "address"), ("owner", "address")]),
        Some("src/modules/validators/K1Validator.sol"),
    );

    let encoded = format!(
        "0x{:0>64}{:0>64}",
        hex_of(OWNER),
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    );
    let broadcast =
        BroadcastBuilder::new(CHAIN).sender(SENDER).deploy_module(FACTORY, MODULE, SALT, &encoded);
    let chain = MockChain::new().with_name(MODULE, "K1Validator").with_version(MODULE, "1.0.1");
    extract(&prj, &chain, &broadcast, false).unwrap();

    let ledger = prj.ledger_json(CHAIN);
    assert_eq!(
        ledger["latest"]["K1Validator"],
        json!({
            "address": MODULE.to_checksum(None),
            "deployer": SENDER.to_checksum(None),
            "factory": FACTORY.to_checksum(None),
            "hash": broadcast.hash_at(0),
            "salt": SALT,
            "version": "1.0.1",
            "timestamp": 1700000000,
            "commit": "abc1234"
        })
    );
    assert_eq!(
        ledger["history"][0]["contracts"]["K1Validator"]["input"]["constructor"],
        json!({ "0": OWNER.to_checksum(None), "1": null })
    );
});

chroniclestest!(keeps_ledger_ordered, |prj| {
    for name in ["vault", "Registry", "AccountFactory"] {
        prj.add_artifact(name, constructor_abi(&[]), None);
    }

    let newer = BroadcastBuilder::new(CHAIN)
        .commit(Some("bbb"))
        .timestamp(1700000200)
        .create("vault", VAULT, &[])
        .create("Registry", IMPL, &[]);
    extract(&prj, &MockChain::new(), &newer, false).unwrap();

    // an older run processed late goes after the newer one
    let older = BroadcastBuilder::new(CHAIN)
        .commit(Some("aaa"))
        .timestamp(1700000100)
        .create("AccountFactory", FACTORY, &[]);
    extract(&prj, &MockChain::new(), &older, false).unwrap();

    let ledger = prj.ledger_json(CHAIN);
    let names = ledger["latest"].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
    assert_eq!(names, ["AccountFactory", "Registry", "vault"]);

    let history = ledger["history"].as_array().unwrap();
    let commits = history.iter().map(|entry| entry["commit"].as_str().unwrap()).collect::<Vec<_>>();
    assert_eq!(commits, ["bbb", "aaa"]);

    let contracts =
        history[0]["contracts"].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
    assert_eq!(contracts, ["Registry", "vault"]);
});

chroniclestest!(missing_artifact_is_fatal, |prj| {
    let broadcast = BroadcastBuilder::new(CHAIN).create("Vault", VAULT, &[]);
    let err = extract(&prj, &MockChain::new(), &broadcast, false).unwrap_err();

    assert!(matches!(&err, LedgerError::ArtifactNotFound { name, .. } if name == "Vault"), "{err}");
    assert!(!prj.ledger_path(CHAIN).exists());
});

fn hex_of(address: Address) -> String {
    address.to_string().trim_start_matches("0x").to_lowercase()
}
