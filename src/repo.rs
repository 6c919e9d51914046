//! Local git repository access.
//!
//! Reads the three pieces of version-control state the changelog needs: the
//! most recent tag, the date a tag was created, and the URL of a remote.
use chrono::{DateTime, Utc};
use git2::ErrorCode;
use log::*;
use std::{cmp::Reverse, path::Path};

use crate::error::{ChangelistError, Result};

/// A release tag and the time it was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub date: DateTime<Utc>,
}

/// Version-control queries used to fill in defaults for the run options.
#[cfg_attr(test, mockall::automock)]
pub trait Vcs {
    /// Name of the most recently created tag, if the repository has any.
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Creation date of the named tag.
    fn tag_date(&self, name: &str) -> Result<DateTime<Utc>>;

    /// URL of the named remote, if it exists.
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;
}

/// Git repository backed by `git2`.
pub struct Repository {
    repo: git2::Repository,
}

impl Repository {
    /// Open the repository containing `path`.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = git2::Repository::discover(path).map_err(|err| {
            if err.code() == ErrorCode::NotFound {
                ChangelistError::NotARepository(path.to_path_buf())
            } else {
                err.into()
            }
        })?;

        Ok(Self { repo })
    }

    /// Like [`Repository::discover`], but a path outside any repository is
    /// `None` rather than an error. Other failures, such as a corrupt
    /// repository, are still returned.
    pub fn discover_optional(path: &Path) -> Result<Option<Self>> {
        match Self::discover(path) {
            Ok(repository) => Ok(Some(repository)),
            Err(ChangelistError::NotARepository(path)) => {
                debug!("no git repository found at {}", path.display());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn find_tag_object(&self, name: &str) -> Result<git2::Object<'_>> {
        self.repo
            .revparse_single(&format!("refs/tags/{name}"))
            .map_err(|err| match err.code() {
                ErrorCode::NotFound | ErrorCode::InvalidSpec => {
                    ChangelistError::TagNotFound(name.to_string())
                }
                _ => err.into(),
            })
    }

    /// Tagger time of an annotated tag. Lightweight tags have none.
    fn tagger_time(&self, name: &str) -> Result<Option<i64>> {
        let object = self.find_tag_object(name)?;

        Ok(object
            .as_tag()
            .and_then(|tag| tag.tagger())
            .map(|tagger| tagger.when().seconds()))
    }
}

impl Vcs for Repository {
    // Matches `git tag --sort=-taggerdate`: newest annotated tag first,
    // lightweight tags last, ties in name order.
    fn latest_tag(&self) -> Result<Option<String>> {
        let names = self.repo.tag_names(None)?;

        let mut names: Vec<String> =
            names.iter().flatten().map(String::from).collect();
        names.sort();

        let mut tags = names
            .into_iter()
            .map(|name| {
                let time = self.tagger_time(&name)?;
                Ok((name, time))
            })
            .collect::<Result<Vec<_>>>()?;

        tags.sort_by_key(|(_, time)| Reverse(*time));

        Ok(tags.into_iter().next().map(|(name, _)| name))
    }

    fn tag_date(&self, name: &str) -> Result<DateTime<Utc>> {
        let object = self.find_tag_object(name)?;

        if let Some(tag) = object.as_tag()
            && let Some(tagger) = tag.tagger()
        {
            return to_datetime(tagger.when());
        }

        // lightweight tag: use the date of the tagged commit
        let commit = object.peel_to_commit()?;
        to_datetime(commit.committer().when())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        match self.repo.find_remote(remote) {
            Ok(found) => Ok(found.url().map(String::from)),
            Err(err)
                if matches!(
                    err.code(),
                    ErrorCode::NotFound | ErrorCode::InvalidSpec
                ) =>
            {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn to_datetime(time: git2::Time) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(time.seconds(), 0)
        .ok_or(ChangelistError::InvalidTimestamp(time.seconds()))
}

#[cfg(test)]
mod tests {
    use git2::{ObjectType, Signature, Time};
    use tempfile::TempDir;

    use super::*;

    struct TestContext {
        tmp_dir: TempDir,
        repo: git2::Repository,
    }

    impl TestContext {
        fn new() -> Self {
            let tmp_dir = TempDir::new().unwrap();
            let repo = git2::Repository::init(tmp_dir.path()).unwrap();
            Self { tmp_dir, repo }
        }

        fn open(&self) -> Repository {
            Repository::discover(self.tmp_dir.path()).unwrap()
        }

        fn signature(secs: i64) -> Signature<'static> {
            Signature::new("Tester", "tester@example.com", &Time::new(secs, 0))
                .unwrap()
        }

        fn commit(&self, secs: i64) {
            let sig = Self::signature(secs);
            let tree_id = self.repo.index().unwrap().write_tree().unwrap();
            let tree = self.repo.find_tree(tree_id).unwrap();
            let parent = self
                .repo
                .head()
                .ok()
                .map(|head| head.peel_to_commit().unwrap());
            let parents: Vec<&git2::Commit> = parent.iter().collect();

            self.repo
                .commit(Some("HEAD"), &sig, &sig, "commit", &tree, &parents)
                .unwrap();
        }

        fn annotated_tag(&self, name: &str, secs: i64) {
            let head = self.repo.head().unwrap().peel(ObjectType::Commit).unwrap();
            self.repo
                .tag(name, &head, &Self::signature(secs), name, false)
                .unwrap();
        }

        fn lightweight_tag(&self, name: &str) {
            let head = self.repo.head().unwrap().peel(ObjectType::Commit).unwrap();
            self.repo.tag_lightweight(name, &head, false).unwrap();
        }
    }

    #[test]
    fn no_tags_means_no_latest_tag() {
        let ctx = TestContext::new();
        ctx.commit(1_577_836_800);

        assert_eq!(ctx.open().latest_tag().unwrap(), None);
    }

    #[test]
    fn latest_tag_is_newest_by_tagger_date() {
        let ctx = TestContext::new();
        ctx.commit(1_577_836_800);
        // names sort opposite to dates to show ordering is by date
        ctx.annotated_tag("v2.0.0", 1_577_836_800);
        ctx.commit(1_580_515_200);
        ctx.annotated_tag("v1.0.0", 1_580_515_200);
        ctx.lightweight_tag("v9.9.9");

        assert_eq!(ctx.open().latest_tag().unwrap(), Some("v1.0.0".into()));
    }

    #[test]
    fn lightweight_tags_are_used_when_nothing_else_exists() {
        let ctx = TestContext::new();
        ctx.commit(1_577_836_800);
        ctx.lightweight_tag("v0.1.0");

        assert_eq!(ctx.open().latest_tag().unwrap(), Some("v0.1.0".into()));
    }

    #[test]
    fn tag_date_reads_tagger_date() {
        let ctx = TestContext::new();
        ctx.commit(1_500_000_000);
        ctx.annotated_tag("v1.0.0", 1_577_836_800);

        let date = ctx.open().tag_date("v1.0.0").unwrap();

        assert_eq!(date.to_rfc3339(), "2020-01-01T00:00:00+00:00");
    }

    #[test]
    fn lightweight_tag_date_falls_back_to_commit_date() {
        let ctx = TestContext::new();
        ctx.commit(1_577_836_800);
        ctx.lightweight_tag("v1.0.0");

        let date = ctx.open().tag_date("v1.0.0").unwrap();

        assert_eq!(date.timestamp(), 1_577_836_800);
    }

    #[test]
    fn unknown_tag_is_reported() {
        let ctx = TestContext::new();
        ctx.commit(1_577_836_800);

        let result = ctx.open().tag_date("v404");

        assert!(matches!(result, Err(ChangelistError::TagNotFound(name)) if name == "v404"));
    }

    #[test]
    fn reads_remote_url() {
        let ctx = TestContext::new();
        ctx.repo
            .remote("origin", "git@github.com:org/repo.git")
            .unwrap();

        let repo = ctx.open();

        assert_eq!(
            repo.remote_url("origin").unwrap(),
            Some("git@github.com:org/repo.git".into())
        );
        assert_eq!(repo.remote_url("upstream").unwrap(), None);
    }

    #[test]
    fn discover_outside_repository_fails() {
        let tmp_dir = TempDir::new().unwrap();

        let result = Repository::discover(tmp_dir.path());

        assert!(matches!(result, Err(ChangelistError::NotARepository(_))));
    }

    #[test]
    fn discover_optional_outside_repository_is_none() {
        let tmp_dir = TempDir::new().unwrap();

        let result = Repository::discover_optional(tmp_dir.path()).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn discover_optional_finds_repository() {
        let ctx = TestContext::new();

        let result = Repository::discover_optional(ctx.tmp_dir.path()).unwrap();

        assert!(result.is_some());
    }

    #[test]
    fn discover_optional_reports_broken_repository() {
        let tmp_dir = TempDir::new().unwrap();
        std::fs::write(tmp_dir.path().join(".git"), "not a gitdir link\n")
            .unwrap();

        let result = Repository::discover_optional(tmp_dir.path());

        assert!(matches!(result, Err(ChangelistError::GitError(_))));
    }
}
