use crate::cmd::extract::ExtractArgs;
use clap::Parser;
use eyre::Result;

/// Record the contracts deployed by a Foundry script and document them per chain.
#[derive(Clone, Debug, Parser)]
#[command(name = "chronicles", version, about, next_display_order = None)]
pub struct Chronicles {
    #[command(flatten)]
    pub extract: ExtractArgs,
}

impl Chronicles {
    pub fn run(self) -> Result<()> {
        self.extract.run().map(drop)
    }
}
