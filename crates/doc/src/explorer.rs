use alloy_chains::NamedChain;
use std::fmt::Display;

/// The chain has no known block explorer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExplorerError {
    #[error("unsupported chain: {0}")]
    UnsupportedChain(u64),
}

/// Builds links to the block explorer of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Explorer {
    base_url: &'static str,
}

impl Explorer {
    /// Returns the explorer of `chain_id`.
    pub fn for_chain(chain_id: u64) -> Result<Self, ExplorerError> {
        let chain =
            NamedChain::try_from(chain_id).map_err(|_| ExplorerError::UnsupportedChain(chain_id))?;

        let base_url = match chain {
            NamedChain::Mainnet => "https://etherscan.io",
            NamedChain::Sepolia => "https://sepolia.etherscan.io",
            NamedChain::Goerli => "https://goerli.etherscan.io",
            NamedChain::Optimism => "https://optimistic.etherscan.io",
            NamedChain::OptimismSepolia => "https://sepolia-optimistic.etherscan.io",
            NamedChain::Polygon => "https://polygonscan.com",
            NamedChain::PolygonAmoy => "https://amoy.polygonscan.com",
            NamedChain::Base => "https://basescan.org",
            NamedChain::BaseSepolia => "https://sepolia.basescan.org",
            NamedChain::Arbitrum => "https://arbiscan.io",
            NamedChain::ArbitrumSepolia => "https://sepolia.arbiscan.io",
            _ => return Err(ExplorerError::UnsupportedChain(chain_id)),
        };
        Ok(Self { base_url })
    }

    /// `<base>/<slug>/<value>`, e.g. `https://etherscan.io/address/0x..`.
    pub fn url(&self, slug: &str, value: impl Display) -> String {
        format!("{}/{slug}/{value}", self.base_url)
    }

    pub fn address_url(&self, address: impl Display) -> String {
        self.url("address", address)
    }

    pub fn tx_url(&self, hash: impl Display) -> String {
        self.url("tx", hash)
    }
}
