//! Configuration for the GitHub API connection.
use secrecy::SecretString;
use url::Url;

use crate::forge::types::RepoSlug;

/// Host a git remote must point at to be recognised as a GitHub repository.
pub const GITHUB_HOST: &str = "github.com";
/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Base URL used when linking to pull requests in the changelog.
pub const DEFAULT_WEB_URL: &str = "https://github.com";
/// Environment variable consulted when no token is passed on the command line.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Remote repository connection configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Repository the changes are listed for.
    pub repo: RepoSlug,
    /// API base URL.
    pub api_url: Url,
    /// Base URL for pull request links.
    pub web_url: String,
    /// Optional access token. Requests are anonymous without one.
    pub token: Option<SecretString>,
}

impl RemoteConfig {
    /// Link to a pull request in markdown reference form.
    pub fn pull_link(&self, number: u64) -> String {
        format!(
            "[#{number}]({}/{}/pull/{number})",
            self.web_url.trim_end_matches('/'),
            self.repo
        )
    }
}
