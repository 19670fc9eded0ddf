use chronicles_common::fmt::capitalize;
use itertools::Itertools;

/// The project the deployments belong to, as shown in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Display name, e.g. `Vortex Contracts`.
    pub name: String,
    /// Web URL of the repository, without a trailing `.git`.
    pub url: String,
    /// The branch source links point to.
    pub branch: String,
}

impl ProjectInfo {
    /// Derives the project from the url of its git remote.
    ///
    /// SSH remotes like `git@github.com:org/repo.git` are turned into
    /// `https://github.com/org/repo`.
    pub fn from_remote(remote: &str, branch: impl Into<String>) -> Self {
        let url = web_url(remote);
        let name = display_name(url.rsplit('/').next().unwrap_or_default());
        Self { name, url, branch: branch.into() }
    }

    /// Link to a file of the repository on the configured branch.
    pub fn blob_url(&self, path: &str) -> String {
        format!("{}/blob/{}/{}", self.url, self.branch, path.trim_start_matches("./"))
    }
}

fn web_url(remote: &str) -> String {
    let remote = remote.trim().trim_end_matches('/');
    let remote = remote.strip_suffix(".git").unwrap_or(remote);

    if let Some(rest) = remote.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map_or(rest, |(_, host)| host);
        return format!("https://{rest}");
    }
    if let Some((user_host, path)) = remote.split_once(':')
        && !remote.contains("://")
    {
        let host = user_host.split_once('@').map_or(user_host, |(_, host)| host);
        return format!("https://{host}/{path}");
    }
    remote.to_string()
}

/// `vortex_contracts` and `vortex-contracts` become `Vortex Contracts`.
fn display_name(repo: &str) -> String {
    let repo = repo.split('.').next().unwrap_or_default();
    repo.replace('_', "-").split('-').map(capitalize).join(" ")
}
