//! Command line arguments.
use clap::Parser;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::forge::config::{DEFAULT_API_URL, TOKEN_ENV_VAR};

/// Default remote used to work out which GitHub repository to query.
pub const DEFAULT_REMOTE: &str = "origin";

/// Generates a list of changes since the last tag was created, in the format
/// recommended by http://keepachangelog.com.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long)]
    /// The tag to list changes since. Defaults to the most recent tag.
    pub tag: Option<String>,

    #[arg(long)]
    /// The GitHub repository (OWNER/REPO) to generate a change list for.
    /// Defaults to the repository of the git remote.
    pub repo: Option<String>,

    #[arg(long, default_value = "")]
    /// GitHub API access token. Falls back to GITHUB_TOKEN env var.
    pub token: String,

    #[arg(long, default_value = DEFAULT_REMOTE)]
    /// Git remote used to determine the default repository.
    pub remote: String,

    #[arg(long, default_value = ".")]
    /// Path to the local git repository.
    pub path: PathBuf,

    #[arg(long, default_value = DEFAULT_API_URL)]
    /// GitHub API base URL. Set this for GitHub Enterprise installations.
    pub api_url: String,

    #[arg(long, default_value_t = false)]
    /// Enables debug logs
    pub debug: bool,
}

impl Args {
    /// Access token from the command line, falling back to the environment.
    /// An empty token means requests are made anonymously.
    pub fn token(&self) -> Option<SecretString> {
        let mut token = self.token.trim().to_string();

        if token.is_empty()
            && let Ok(env_var_token) = env::var(TOKEN_ENV_VAR)
        {
            token = env_var_token.trim().to_string();
        }

        if token.is_empty() {
            return None;
        }

        Some(SecretString::from(token))
    }
}
