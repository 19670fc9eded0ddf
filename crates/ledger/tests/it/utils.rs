use chronicles_ledger::{ArtifactsDir, LedgerError, LedgerStore, ReconcileOutcome, Reconciler};
use chronicles_sequence::BroadcastReader;
use chronicles_test_utils::{BroadcastBuilder, MockChain, TempProject};

pub const CHAIN: u64 = 11155111;

/// Broadcasts `broadcast` for `Deploy.s.sol` and runs it through the reconciler, saving the ledger
/// when something new was recorded.
pub fn extract(
    prj: &TempProject,
    chain: &MockChain,
    broadcast: &BroadcastBuilder,
    force: bool,
) -> Result<ReconcileOutcome, LedgerError> {
    let config = prj.config();
    prj.add_broadcast("Deploy.s.sol", CHAIN, broadcast);
    let sequence =
        BroadcastReader::new("Deploy", CHAIN, &config.broadcast).read_latest().unwrap();

    let store = LedgerStore::new(config.ledger_path(CHAIN), CHAIN);
    let mut ledger = store.load()?;
    let reconciler = Reconciler::new(&config, chain, ArtifactsDir::new(&config.out));
    let outcome = reconciler.reconcile(&mut ledger, &sequence, force)?;
    if outcome.has_new_contracts() {
        store.save(&ledger)?;
    }
    Ok(outcome)
}
