use crate::utils::{SystemToolchain, Toolchain};
use chronicles_chain::{CastReader, ChainReader};
use chronicles_common::fs;
use chronicles_config::Config;
use chronicles_doc::{AsDoc, DeploymentsDoc, ProjectInfo};
use chronicles_ledger::{ArtifactSource, ArtifactsDir, Ledger, LedgerStore, Reconciler};
use chronicles_sequence::{BroadcastReader, DEFAULT_SCRIPT, script_file_name};
use clap::Parser;
use eyre::{Result, WrapErr, ensure};
use std::{collections::HashMap, path::PathBuf};

/// CLI arguments for recording the latest broadcast of a script.
#[derive(Clone, Debug, Parser)]
pub struct ExtractArgs {
    /// Chain id the script was broadcast to.
    #[arg(long, short, value_name = "CHAIN_ID")]
    pub chain: u64,

    /// The RPC endpoint on-chain reads are sent to.
    #[arg(long, short, env = "ETH_RPC_URL", value_name = "URL")]
    pub rpc_url: Option<String>,

    /// The deployment script, with or without the `.s.sol` extension.
    #[arg(long, short, default_value = DEFAULT_SCRIPT, value_name = "SCRIPT")]
    pub name: String,

    /// Process the broadcast even if its commit was already recorded.
    #[arg(long, short)]
    pub force: bool,

    /// Only render the Markdown from the existing ledger.
    #[arg(long, short)]
    pub skip_json: bool,

    /// The project root. Defaults to the current directory.
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,
}

/// The files written by a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractOutput {
    /// The json ledger, unless `--skip-json` was passed.
    pub ledger: Option<PathBuf>,
    /// The Markdown document, unless the broadcast held nothing new.
    pub markdown: Option<PathBuf>,
}

impl ExtractArgs {
    pub fn run(self) -> Result<ExtractOutput> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().wrap_err("failed to read the current directory")?,
        };
        let config = Config::load_with_root(&root)?;
        let chain = CastReader::new(&config.cast).with_rpc_url(self.rpc_url.clone());
        self.run_with(&config, &chain, &SystemToolchain)
    }

    /// Runs against the given chain and toolchain.
    pub fn run_with<C: ChainReader, T: Toolchain>(
        &self,
        config: &Config,
        chain: &C,
        toolchain: &T,
    ) -> Result<ExtractOutput> {
        let script = config.script_path(&script_file_name(&self.name));
        ensure!(script.is_file(), "script {} does not exist", script.display());

        let store = LedgerStore::new(config.ledger_path(self.chain), self.chain);
        let mut ledger = store.load()?;
        let artifacts = ArtifactsDir::new(&config.out);

        let ledger_path = if self.skip_json {
            ensure!(
                !ledger.latest.is_empty(),
                "no deployments recorded in {}, run without --skip-json first",
                store.path().display()
            );
            None
        } else {
            let sequence =
                BroadcastReader::new(&self.name, self.chain, &config.broadcast).read_latest()?;
            ledger.ensure_unprocessed(sequence.commit(), self.force)?;
            toolchain.build(config)?;

            let reconciler = Reconciler::new(config, chain, &artifacts);
            let outcome = reconciler.reconcile(&mut ledger, &sequence, self.force)?;
            if !outcome.has_new_contracts() {
                sh_println!("New contracts not found")?;
                return Ok(ExtractOutput::default());
            }

            store.save(&ledger)?;
            sh_println!("Ledger written to {}", store.path().display())?;
            Some(store.path().to_path_buf())
        };

        let remote = toolchain.remote_url(&config.root)?;
        let project = ProjectInfo::from_remote(&remote, &config.branch);
        let doc = DeploymentsDoc::new(&ledger, &project)
            .with_sources(sources(config, &ledger, &artifacts))
            .as_doc()?;

        let markdown = config.markdown_path(self.chain);
        fs::create_parent_dir_all(&markdown)?;
        fs::write(&markdown, doc)?;
        sh_println!("Markdown written to {}", markdown.display())?;

        Ok(ExtractOutput { ledger: ledger_path, markdown: Some(markdown) })
    }
}

/// Source files of the recorded contracts, relative to the project root.
///
/// The compilation target of the artifact is used when there is one, the configured
/// [`Config::source_path`] otherwise.
fn sources(
    config: &Config,
    ledger: &Ledger,
    artifacts: &impl ArtifactSource,
) -> HashMap<String, String> {
    ledger
        .latest
        .keys()
        .map(|name| {
            let source = match artifacts.artifact(name) {
                Ok(artifact) => artifact.source,
                Err(err) => {
                    debug!(target: "chronicles::extract", %name, %err, "no artifact");
                    None
                }
            }
            .unwrap_or_else(|| config.source_path(name));
            let source = source.strip_prefix(&config.root).unwrap_or(&source);
            (name.clone(), source.to_string_lossy().replace('\\', "/"))
        })
        .collect()
}
