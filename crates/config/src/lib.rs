//! # chronicles-config
//!
//! Configuration for extracting deployments out of Foundry broadcasts.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use figment::{
    Figment, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod error;
pub use error::ExtractConfigError;

pub mod providers;
use providers::FoundryTomlProvider;

/// A proxy contract kind recognized in broadcasts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// The contract name used in the broadcast, e.g. `TransparentUpgradeableProxy`.
    pub name: String,
    /// Index of the constructor argument carrying the initializer call data, if any.
    #[serde(default)]
    pub initializer: Option<usize>,
}

impl ProxyConfig {
    /// Creates a new proxy kind.
    pub fn new(name: impl Into<String>, initializer: Option<usize>) -> Self {
        Self { name: name.into(), initializer }
    }
}

/// Maps contract names to the subdirectory of `src` holding their sources.
///
/// Only used for source links of contracts without a compiler artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDir {
    /// Case-insensitive substring of the contract name, e.g. `factory`.
    pub pattern: String,
    /// Directory relative to `src`, e.g. `factories`.
    pub dir: PathBuf,
}

impl SourceDir {
    pub fn new(pattern: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self { pattern: pattern.into(), dir: dir.into() }
    }

    fn matches(&self, contract_name: &str) -> bool {
        contract_name.to_lowercase().contains(&self.pattern.to_lowercase())
    }
}

/// The resolved configuration of a single run.
///
/// Built once, from the layered providers returned by [`Config::figment_with_root`], and passed
/// by reference from there on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The selected profile. Set when extracted from a figment.
    #[serde(skip)]
    pub profile: Profile,
    /// Project root. All relative paths are resolved against it.
    #[serde(skip)]
    pub root: PathBuf,
    /// Solidity sources.
    pub src: PathBuf,
    /// Compiler artifacts.
    pub out: PathBuf,
    /// Deployment scripts.
    pub script: PathBuf,
    /// Broadcast output of `forge script`.
    pub broadcast: PathBuf,
    /// Where the ledgers and the rendered documents are written.
    pub deployments: PathBuf,
    /// The branch source links point to.
    pub branch: String,
    /// Proxy contract kinds.
    pub proxies: Vec<ProxyConfig>,
    /// Function signatures of factory calls that deploy modules with CREATE2.
    pub module_signatures: Vec<String>,
    /// Contracts that expose their version through `accountId()` instead of `version()`.
    pub account_contracts: Vec<String>,
    /// Source directories by contract name, first match wins.
    pub source_dirs: Vec<SourceDir>,
    /// The `cast` executable.
    pub cast: PathBuf,
    /// The `forge` executable.
    pub forge: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Self::DEFAULT_PROFILE,
            root: PathBuf::from("."),
            src: "src".into(),
            out: "out".into(),
            script: "script".into(),
            broadcast: "broadcast".into(),
            deployments: "deployments".into(),
            branch: "main".to_string(),
            proxies: vec![
                ProxyConfig::new("TransparentUpgradeableProxy", Some(2)),
                ProxyConfig::new("ERC1967Proxy", Some(1)),
            ],
            module_signatures: vec!["deployModule(bytes32,bytes,bytes)".to_string()],
            account_contracts: vec!["Vortex".to_string()],
            source_dirs: vec![
                SourceDir::new("factory", "factories"),
                SourceDir::new("executor", "modules/executors"),
                SourceDir::new("fallback", "modules/fallbacks"),
                SourceDir::new("validator", "modules/validators"),
            ],
            cast: "cast".into(),
            forge: "forge".into(),
        }
    }
}

impl Config {
    /// The default profile: "default"
    pub const DEFAULT_PROFILE: Profile = Profile::const_new("default");

    /// The name of the tool's own config file.
    pub const FILE_NAME: &'static str = "chronicles.toml";

    /// The name of the foundry config file the project layout is read from.
    pub const FOUNDRY_FILE_NAME: &'static str = "foundry.toml";

    /// Environment variable prefix.
    pub const ENV_PREFIX: &'static str = "CHRONICLES_";

    /// Loads the config for the project at `root`, with all relative paths resolved against it.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        let root = root.as_ref();
        let mut config = Self::from_provider(Self::figment_with_root(root))?;
        config.root = root.to_path_buf();
        Ok(config.canonic())
    }

    /// Extracts a `Config` from `provider`.
    pub fn from_provider<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        let mut config = figment.extract::<Self>().map_err(ExtractConfigError::new)?;
        config.profile = figment.profile().clone();
        Ok(config)
    }

    /// Returns the layered providers for the project at `root`.
    ///
    /// In increasing precedence: defaults, `foundry.toml`, `chronicles.toml`, then
    /// `CHRONICLES_*` environment variables. The profile is taken from `FOUNDRY_PROFILE`.
    pub fn figment_with_root(root: &Path) -> Figment {
        let profile = Self::selected_profile();
        debug!(target: "chronicles::config", ?root, %profile, "loading config");

        Figment::from(Serialized::defaults(Self::default()))
            .merge(FoundryTomlProvider::new(root.join(Self::FOUNDRY_FILE_NAME), profile.clone()))
            .merge(Toml::file(root.join(Self::FILE_NAME)).nested())
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["DEBUG"]).global())
            .select(profile)
    }

    /// Returns the profile selected through `FOUNDRY_PROFILE`, or the default one.
    pub fn selected_profile() -> Profile {
        Profile::from_env_or("FOUNDRY_PROFILE", Self::DEFAULT_PROFILE)
    }

    /// Joins all relative paths with the root and attempts to make them canonic.
    #[must_use]
    pub fn canonic(mut self) -> Self {
        let root = dunce::canonicalize(&self.root).unwrap_or_else(|_| self.root.clone());
        let join = |path: &Path| {
            if path.is_absolute() { path.to_path_buf() } else { root.join(path) }
        };

        self.src = join(&self.src);
        self.out = join(&self.out);
        self.script = join(&self.script);
        self.broadcast = join(&self.broadcast);
        self.deployments = join(&self.deployments);
        self.root = root;
        self
    }

    /// Path of the json ledger for `chain_id`: `<deployments>/json/<chain_id>.json`.
    pub fn ledger_path(&self, chain_id: u64) -> PathBuf {
        self.deployments.join("json").join(format!("{chain_id}.json"))
    }

    /// Path of the rendered document for `chain_id`: `<deployments>/<chain_id>.md`.
    pub fn markdown_path(&self, chain_id: u64) -> PathBuf {
        self.deployments.join(format!("{chain_id}.md"))
    }

    /// Path of a deployment script: `<script>/<name>`.
    pub fn script_path(&self, script_name: &str) -> PathBuf {
        self.script.join(script_name)
    }

    /// Where the source of `contract_name` is expected when no artifact says otherwise:
    /// `<src>/<dir>/<name>.sol`, with `dir` taken from the first matching [`SourceDir`].
    pub fn source_path(&self, contract_name: &str) -> PathBuf {
        let file = format!("{contract_name}.sol");
        match self.source_dirs.iter().find(|dir| dir.matches(contract_name)) {
            Some(source_dir) => self.src.join(&source_dir.dir).join(file),
            None => self.src.join(file),
        }
    }

    /// Returns the proxy kind named `name`, if it is one.
    pub fn proxy(&self, name: &str) -> Option<&ProxyConfig> {
        self.proxies.iter().find(|proxy| proxy.name == name)
    }

    /// Returns true if `function` deploys a module through a factory.
    pub fn is_module_signature(&self, function: &str) -> bool {
        self.module_signatures.iter().any(|sig| sig == function)
    }

    /// Returns true if the version of `contract_name` comes from `accountId()`.
    pub fn is_account_contract(&self, contract_name: &str) -> bool {
        self.account_contracts.iter().any(|name| name == contract_name)
    }
}
