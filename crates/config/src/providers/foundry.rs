use figment::{
    Error, Figment, Metadata, Profile, Provider,
    providers::{Format, Toml},
    value::{Dict, Map},
};
use std::path::PathBuf;

/// Keys shared with `foundry.toml` that this tool understands.
const FOUNDRY_KEYS: &[&str] = &["src", "out", "script", "broadcast"];

/// Reads the project layout from a `foundry.toml` file.
///
/// Foundry nests its settings under `[profile.<name>]`. Only the selected profile is read, and only
/// the directory keys in [`FOUNDRY_KEYS`], so unrelated compiler settings never reach
/// [`Config`](crate::Config). A missing file yields no values.
pub struct FoundryTomlProvider {
    path: PathBuf,
    profile: Profile,
}

impl FoundryTomlProvider {
    pub fn new(path: impl Into<PathBuf>, profile: impl Into<Profile>) -> Self {
        Self { path: path.into(), profile: profile.into() }
    }

    fn read(&self) -> Result<Dict, Error> {
        if !self.path.exists() {
            return Ok(Dict::new());
        }

        let focused =
            Figment::from(Toml::file(&self.path)).focus(&format!("profile.{}", self.profile));
        let mut data = focused.data()?;
        let dict = data.remove(&Profile::Default).unwrap_or_default();
        Ok(dict.into_iter().filter(|(key, _)| FOUNDRY_KEYS.contains(&key.as_str())).collect())
    }
}

impl Provider for FoundryTomlProvider {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("{} [profile.{}]", self.path.display(), self.profile))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let dict = self.read()?;
        trace!(
            target: "chronicles::config",
            path = ?self.path,
            keys = ?dict.keys().collect::<Vec<_>>(),
            "read foundry.toml"
        );
        Ok(Map::from([(Profile::Default, dict)]))
    }
}
