//! Draft changelog rendering.
//!
//! The draft is meant to be edited by hand before it goes into a
//! keepachangelog.com style `CHANGELOG.md`: a banner of instructions, an
//! `[Unreleased]` heading and one bullet per merged pull request.

/// Word-wrapped bullet list rendering.
pub mod formatter;

/// Selection of pull requests merged since a tag.
pub mod selector;

use crate::{
    error::Result,
    forge::{config::RemoteConfig, types::PullRequest},
    repo::Tag,
};

/// Display text of a single change: the pull request title followed by a
/// link to the pull request.
pub fn change_label(remote: &RemoteConfig, pr: &PullRequest) -> String {
    format!("{} ({}).", pr.title.trim(), remote.pull_link(pr.number))
}

/// Instructions printed above the list of changes.
pub fn banner(remote: &RemoteConfig, tag: &Tag) -> String {
    format!(
        r#"
****
Changes since {repo} {tag}:

Please edit the output below before including it in the change log.
See http://keepachangelog.com for further advice.

Only include changes which are interesting to users of the package or
application, and use a description they will be able to understand.
****

[Unreleased]
"#,
        repo = remote.repo,
        tag = tag.name,
    )
}

/// Render the complete draft changelog for `pulls`.
pub fn render(
    remote: &RemoteConfig,
    tag: &Tag,
    pulls: &[PullRequest],
    width: usize,
) -> Result<String> {
    let labels: Vec<String> =
        pulls.iter().map(|pr| change_label(remote, pr)).collect();

    let list = formatter::format_list(&labels, width)?;

    Ok(format!("{}\n{list}", banner(remote, tag)))
}
