//! Run options resolved once at startup.
//!
//! Every value the pipeline needs is collected here from the command line,
//! the environment and the local git repository, so nothing downstream reads
//! global state.
use log::*;
use url::Url;

use crate::{
    changelog::formatter::DEFAULT_WIDTH,
    cli::Args,
    error::{ChangelistError, Result},
    forge::{
        config::{DEFAULT_WEB_URL, RemoteConfig},
        types::RepoSlug,
    },
    repo::{Tag, Vcs},
};

/// Immutable options for a single run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Repository and API connection details.
    pub remote: RemoteConfig,
    /// Tag the changes are listed since.
    pub tag: Tag,
    /// Column width of the rendered list.
    pub width: usize,
}

impl Options {
    /// Build the options from the command line, using `vcs` to default the
    /// repository and tag when they were not given.
    ///
    /// `vcs` is `None` when the working directory is not a git repository.
    /// That is only an error if a value actually has to come from git.
    pub fn resolve(args: &Args, vcs: Option<&dyn Vcs>) -> Result<Self> {
        let repo = resolve_repo(args, vcs)?;
        debug!("using repository {repo}");

        let tag = resolve_tag(args, vcs)?;
        debug!("listing changes since {} ({})", tag.name, tag.date);

        let remote = RemoteConfig {
            repo,
            api_url: Url::parse(&args.api_url)?,
            web_url: DEFAULT_WEB_URL.to_string(),
            token: args.token(),
        };

        Ok(Self {
            remote,
            tag,
            width: DEFAULT_WIDTH,
        })
    }
}

fn resolve_repo(args: &Args, vcs: Option<&dyn Vcs>) -> Result<RepoSlug> {
    if let Some(repo) = &args.repo {
        return repo.parse();
    }

    let Some(vcs) = vcs else {
        return Err(ChangelistError::UnresolvedRepo);
    };

    vcs.remote_url(&args.remote)?
        .as_deref()
        .and_then(RepoSlug::from_remote_url)
        .ok_or(ChangelistError::UnresolvedRepo)
}

fn resolve_tag(args: &Args, vcs: Option<&dyn Vcs>) -> Result<Tag> {
    let name = match (&args.tag, vcs) {
        (Some(name), _) => name.clone(),
        (None, Some(vcs)) => {
            vcs.latest_tag()?.ok_or(ChangelistError::UnresolvedTag)?
        }
        (None, None) => return Err(ChangelistError::UnresolvedTag),
    };

    let Some(vcs) = vcs else {
        return Err(ChangelistError::NotARepository(args.path.clone()));
    };

    let date = vcs.tag_date(&name)?;

    Ok(Tag { name, date })
}
