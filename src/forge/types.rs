use chrono::{DateTime, Utc};
use git_url_parse::GitUrl;
use serde::Deserialize;
use std::{fmt, str::FromStr};

use crate::{error::ChangelistError, forge::config::GITHUB_HOST};

/// Repository identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Derive the slug from a git remote URL, if the remote lives on GitHub.
    ///
    /// Both SSH (`git@github.com:org/repo.git`) and HTTPS
    /// (`https://github.com/org/repo.git`) remotes are understood.
    pub fn from_remote_url(remote_url: &str) -> Option<Self> {
        let parsed = GitUrl::parse(remote_url.trim()).ok()?;

        if parsed.host.as_deref() != Some(GITHUB_HOST) {
            return None;
        }

        let owner = parsed.owner.filter(|o| !o.is_empty())?;

        if parsed.name.is_empty() {
            return None;
        }

        Some(Self::new(owner, parsed.name))
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoSlug {
    type Err = ChangelistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty()
                    && !name.is_empty()
                    && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(ChangelistError::InvalidRepo(s.to_string())),
        }
    }
}

/// Closed pull request as returned by the pulls listing endpoint.
///
/// Only the fields needed to select and render changes are decoded; the rest
/// of the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}
