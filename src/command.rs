//! The change list command.
//!
//! 1. Connect to the GitHub API for the resolved repository
//! 2. Select the pull requests merged since the resolved tag
//! 3. Render them as a draft changelog
use log::*;

use crate::{
    changelog, changelog::selector, config::Options, error::Result,
    forge::github::Github,
};

/// Produce the draft changelog for `options`. Nothing is returned unless
/// every API request succeeded.
pub async fn execute(options: &Options) -> Result<String> {
    let github = Github::new(options.remote.clone())?;

    info!(
        "listing pull requests merged into {} since {}",
        github.repo(),
        options.tag.name
    );

    let pulls = selector::merged_since_tag(&github, &options.tag).await?;

    changelog::render(github.config(), &options.tag, &pulls, options.width)
}
