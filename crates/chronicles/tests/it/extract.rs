use crate::utils::{CHAIN, FakeToolchain, args, run};
use alloy_primitives::{Address, address};
use chronicles::cmd::extract::ExtractOutput;
use chronicles_test_utils::{BroadcastBuilder, MockChain, chroniclestest, constructor_abi};

const VAULT: Address = address!("0xDc64a140Aa3E981100a9becA4E685f962f0cF6C9");
const REGISTRY: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

fn deployment() -> BroadcastBuilder {
    BroadcastBuilder::new(CHAIN).create("Vault", VAULT, &[]).create("Registry", REGISTRY, &[])
}

chroniclestest!(writes_ledger_and_markdown, |prj| {
    prj.add_script("Deploy.s.sol");
    prj.add_artifact("Vault", constructor_abi(&[]), None);
    prj.add_artifact("Registry", constructor_abi(&[]), Some("src/core/Registry.sol"));
    prj.add_broadcast("Deploy.s.sol", CHAIN, &deployment());

    let toolchain = FakeToolchain::default();
    let chain = MockChain::new().with_version(REGISTRY, "1.0.0");
    let output = run(&prj, &args(CHAIN), &chain, &toolchain).unwrap();

    assert_eq!(toolchain.builds.get(), 1);
    assert_eq!(
        output,
        ExtractOutput {
            ledger: Some(prj.ledger_path(CHAIN)),
            markdown: Some(prj.markdown_path(CHAIN)),
        }
    );

    let ledger = prj.ledger_json(CHAIN);
    let names = ledger["latest"].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
    assert_eq!(names, ["Registry", "Vault"]);

    let markdown = std::fs::read_to_string(prj.markdown_path(CHAIN)).unwrap();
    assert!(markdown.starts_with("# Vortex Contracts\n\n\n### Table of Contents\n"), "{markdown}");
    assert!(markdown.contains(
        "https://github.com/vortex-labs/vortex-contracts/blob/main/src/core/Registry.sol"
    ));
    assert!(
        markdown.contains("https://github.com/vortex-labs/vortex-contracts/blob/main/src/Vault.sol")
    );
    assert!(markdown.contains(&format!("https://sepolia.etherscan.io/address/{REGISTRY}")));
    assert!(markdown.contains("\t<td>1.0.0</td>\n"));
    assert!(!markdown.ends_with('\n'));
});

chroniclestest!(missing_script_is_fatal, |prj| {
    prj.add_broadcast("Deploy.s.sol", CHAIN, &deployment());

    let toolchain = FakeToolchain::default();
    let err = run(&prj, &args(CHAIN), &MockChain::new(), &toolchain).unwrap_err();

    let script = prj.config().script_path("Deploy.s.sol");
    assert_eq!(err.to_string(), format!("script {} does not exist", script.display()));
    assert_eq!(toolchain.builds.get(), 0);
    assert!(!prj.ledger_path(CHAIN).exists());
});

chroniclestest!(missing_broadcast_is_fatal, |prj| {
    prj.add_script("Deploy.s.sol");

    let err = run(&prj, &args(CHAIN), &MockChain::new(), &FakeToolchain::default()).unwrap_err();
    assert!(err.to_string().contains("run-latest.json does not exist"), "{err}");
});

chroniclestest!(skip_json_requires_ledger, |prj| {
    prj.add_script("Deploy.s.sol");

    let args = chronicles::cmd::extract::ExtractArgs { skip_json: true, ..args(CHAIN) };
    let err = run(&prj, &args, &MockChain::new(), &FakeToolchain::default()).unwrap_err();
    assert!(err.to_string().contains("run without --skip-json first"), "{err}");
    assert!(!prj.markdown_path(CHAIN).exists());
});

chroniclestest!(skip_json_renders_existing_ledger, |prj| {
    prj.add_script("Deploy.s.sol");
    let ledger = r#"{
    "chainId": "10",
    "latest": {
        "Vault": {
            "address": "0xDc64a140Aa3E981100a9becA4E685f962f0cF6C9",
            "hash": "0x1111111111111111111111111111111111111111111111111111111111111111",
            "timestamp": 1700000000,
            "commit": "abc1234"
        }
    },
    "history": []
}"#;
    prj.write_ledger(10, ledger);

    let toolchain = FakeToolchain::default();
    let args = chronicles::cmd::extract::ExtractArgs { skip_json: true, ..args(10) };
    let output = run(&prj, &args, &MockChain::new(), &toolchain).unwrap();

    assert_eq!(output.ledger, None);
    assert_eq!(output.markdown, Some(prj.markdown_path(10)));
    assert_eq!(toolchain.builds.get(), 0);
    similar_asserts::assert_eq!(prj.read_ledger(10), ledger);

    let markdown = std::fs::read_to_string(prj.markdown_path(10)).unwrap();
    assert!(markdown.contains(
        "Transaction Hash: [0x1111111111111111111111111111111111111111111111111111111111111111]\
         (https://optimistic.etherscan.io/tx/\
         0x1111111111111111111111111111111111111111111111111111111111111111)"
    ));
    assert!(markdown.ends_with("Tue, 14 Nov 2023 22:13:20 UTC"));
});

chroniclestest!(skip_json_links_sources_by_category, |prj| {
    prj.add_script("Deploy.s.sol");
    prj.write_ledger(
        CHAIN,
        r#"{
    "chainId": "11155111",
    "latest": {
        "ModuleFactory": {
            "address": "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0",
            "timestamp": 1700000000
        },
        "OwnableValidator": {
            "address": "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9",
            "timestamp": 1700000000
        },
        "Registry": {
            "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "timestamp": 1700000000
        }
    },
    "history": []
}"#,
    );
    // only Registry has been compiled
    prj.add_artifact("Registry", constructor_abi(&[]), Some("src/core/Registry.sol"));

    let args = chronicles::cmd::extract::ExtractArgs { skip_json: true, ..args(CHAIN) };
    run(&prj, &args, &MockChain::new(), &FakeToolchain::default()).unwrap();

    let markdown = std::fs::read_to_string(prj.markdown_path(CHAIN)).unwrap();
    let blob = "https://github.com/vortex-labs/vortex-contracts/blob/main";
    assert!(markdown.contains(&format!("{blob}/src/factories/ModuleFactory.sol")), "{markdown}");
    assert!(
        markdown.contains(&format!("{blob}/src/modules/validators/OwnableValidator.sol")),
        "{markdown}"
    );
    assert!(markdown.contains(&format!("{blob}/src/core/Registry.sol")), "{markdown}");
});

chroniclestest!(processed_commit_is_rejected_before_build, |prj| {
    prj.add_script("Deploy.s.sol");
    prj.add_artifact("Vault", constructor_abi(&[]), None);
    prj.add_artifact("Registry", constructor_abi(&[]), None);
    prj.add_broadcast("Deploy.s.sol", CHAIN, &deployment());

    let toolchain = FakeToolchain::default();
    run(&prj, &args(CHAIN), &MockChain::new(), &toolchain).unwrap();
    let before = prj.read_ledger(CHAIN);

    let err = run(&prj, &args(CHAIN), &MockChain::new(), &toolchain).unwrap_err();
    assert_eq!(
        err.to_string(),
        "commit abc1234 already processed, pass --force to process it again"
    );
    assert_eq!(toolchain.builds.get(), 1);
    similar_asserts::assert_eq!(prj.read_ledger(CHAIN), before);
});

chroniclestest!(nothing_new_writes_nothing, |prj| {
    prj.add_script("Deploy.s.sol");
    prj.add_artifact("Vault", constructor_abi(&[]), None);
    prj.add_artifact("Registry", constructor_abi(&[]), None);
    prj.add_broadcast("Deploy.s.sol", CHAIN, &deployment());

    let toolchain = FakeToolchain::default();
    run(&prj, &args(CHAIN), &MockChain::new(), &toolchain).unwrap();
    let before = prj.read_ledger(CHAIN);
    std::fs::remove_file(prj.markdown_path(CHAIN)).unwrap();

    let args = chronicles::cmd::extract::ExtractArgs { force: true, ..args(CHAIN) };
    let output = run(&prj, &args, &MockChain::new(), &toolchain).unwrap();

    assert_eq!(output, ExtractOutput::default());
    assert_eq!(toolchain.builds.get(), 2);
    similar_asserts::assert_eq!(prj.read_ledger(CHAIN), before);
    assert!(!prj.markdown_path(CHAIN).exists());
});

chroniclestest!(failed_build_keeps_ledger, |prj| {
    prj.add_script("Deploy.s.sol");
    prj.add_broadcast("Deploy.s.sol", CHAIN, &deployment());

    let err = run(&prj, &args(CHAIN), &MockChain::new(), &FakeToolchain::failing()).unwrap_err();
    assert_eq!(err.to_string(), "forge exited with code 1: Compiler run failed");
    assert!(!prj.ledger_path(CHAIN).exists());
});

chroniclestest!(unsupported_chain_fails_rendering, |prj| {
    prj.add_script("Deploy.s.sol");
    prj.add_artifact("Vault", constructor_abi(&[]), None);
    let broadcast = BroadcastBuilder::new(31337).create("Vault", VAULT, &[]);
    prj.add_broadcast("Deploy.s.sol", 31337, &broadcast);

    let err =
        run(&prj, &args(31337), &MockChain::new(), &FakeToolchain::default()).unwrap_err();
    assert_eq!(err.to_string(), "unsupported chain: 31337");
    // the ledger is recorded before rendering
    assert!(prj.ledger_path(31337).exists());
    assert!(!prj.markdown_path(31337).exists());
});
