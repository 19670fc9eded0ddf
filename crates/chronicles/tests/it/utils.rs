use chronicles::{
    cmd::extract::{ExtractArgs, ExtractOutput},
    utils::Toolchain,
};
use chronicles_config::Config;
use chronicles_test_utils::{MockChain, TempProject};
use std::{cell::Cell, path::Path};

pub const CHAIN: u64 = 11155111;

pub const REMOTE: &str = "git@github.com:vortex-labs/vortex-contracts.git";

/// Counts builds instead of running `forge`, and reports a fixed remote.
#[derive(Debug, Default)]
pub struct FakeToolchain {
    pub builds: Cell<usize>,
    pub fail_build: bool,
}

impl FakeToolchain {
    pub fn failing() -> Self {
        Self { fail_build: true, ..Default::default() }
    }
}

impl Toolchain for FakeToolchain {
    fn build(&self, _config: &Config) -> eyre::Result<()> {
        self.builds.set(self.builds.get() + 1);
        if self.fail_build {
            eyre::bail!("forge exited with code 1: Compiler run failed");
        }
        Ok(())
    }

    fn remote_url(&self, _root: &Path) -> eyre::Result<String> {
        Ok(REMOTE.to_string())
    }
}

pub fn args(chain: u64) -> ExtractArgs {
    ExtractArgs {
        chain,
        rpc_url: None,
        name: "Deploy".to_string(),
        force: false,
        skip_json: false,
        root: None,
    }
}

pub fn run(
    prj: &TempProject,
    args: &ExtractArgs,
    chain: &MockChain,
    toolchain: &FakeToolchain,
) -> eyre::Result<ExtractOutput> {
    args.run_with(&prj.config(), chain, toolchain)
}
