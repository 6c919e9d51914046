//! Selection of the pull requests merged since a tag.
//!
//! GitHub has no "merged since" filter for pull requests, so closed pull
//! requests are read newest-updated first and reading stops at the first one
//! last updated before the tag. This relies on the listing being strictly
//! ordered by `updated_at`, descending. If that order is ever violated, pull
//! requests after the first out-of-order stale item are silently missed.
use chrono::{DateTime, Utc};
use futures_util::{Stream, TryStreamExt};
use log::*;
use std::pin::pin;

use crate::{
    error::Result,
    forge::{github::Github, types::PullRequest},
    repo::Tag,
};

/// Query for closed pull requests, most recently updated first.
const CLOSED_BY_UPDATE_DESC: [(&str, &str); 3] =
    [("state", "closed"), ("sort", "updated"), ("direction", "desc")];

/// Return all pull requests merged since `tag` was created, in ascending
/// order of merge date.
pub async fn merged_since_tag(
    github: &Github,
    tag: &Tag,
) -> Result<Vec<PullRequest>> {
    let pulls = github.pulls(&CLOSED_BY_UPDATE_DESC)?;
    let merged = merged_since(pulls, tag.date).await?;
    debug!("{} pull requests merged since {}", merged.len(), tag.name);
    Ok(merged)
}

/// Select the pull requests merged after `cutoff` from a stream ordered by
/// `updated_at`, descending.
///
/// Items are consumed until the first one updated before `cutoff`. Of those,
/// only pull requests with a merge date after `cutoff` are kept; an update
/// can be as small as a comment, and unmerged pull requests never qualify.
/// Pull requests merged at the same instant keep their stream order.
pub async fn merged_since<S>(
    pulls: S,
    cutoff: DateTime<Utc>,
) -> Result<Vec<PullRequest>>
where
    S: Stream<Item = Result<PullRequest>>,
{
    let mut pulls = pin!(pulls);
    let mut merged = vec![];

    while let Some(pr) = pulls.try_next().await? {
        if pr.updated_at < cutoff {
            debug!(
                "stopping at #{} last updated {} before {}",
                pr.number, pr.updated_at, cutoff
            );
            break;
        }

        if let Some(merged_at) = pr.merged_at
            && merged_at > cutoff
        {
            merged.push(pr);
        }
    }

    merged.sort_by_key(|pr| pr.merged_at);

    Ok(merged)
}
