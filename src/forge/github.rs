//! GitHub REST client with cursor-following pagination.
use futures_util::{
    StreamExt,
    stream::{self, BoxStream},
};
use log::*;
use reqwest::{
    Client, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::collections::VecDeque;

use crate::{
    error::{ChangelistError, Result},
    forge::{
        config::RemoteConfig,
        types::{PullRequest, RepoSlug},
        util::next_page_url,
    },
};

const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub client scoped to a single repository.
pub struct Github {
    config: RemoteConfig,
    base_url: Url,
    client: Client,
}

impl Github {
    /// Create a client for the configured repository, authenticating with the
    /// token when one is present.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.append(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = &config.token {
            let mut token_value = HeaderValue::from_str(
                format!("token {}", token.expose_secret()).as_str(),
            )?;
            token_value.set_sensitive(true);
            headers.append(AUTHORIZATION, token_value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let mut api_url = config.api_url.clone();

        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        let base_url = api_url.join(&format!(
            "repos/{}/{}/",
            config.repo.owner, config.repo.name
        ))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    pub fn repo(&self) -> &RepoSlug {
        &self.config.repo
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Lazily iterate over the items of a repository resource.
    ///
    /// List responses are flattened page by page, following the `next` link
    /// of each response until a page has none. A response holding a single
    /// object yields that object and ends the stream. Pages are only requested
    /// as the consumer pulls items, so dropping the stream early stops
    /// pagination. Each call starts a fresh sequence from the first page.
    pub fn paginate(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<BoxStream<'static, Result<Value>>> {
        let mut url = self.base_url.join(path)?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let cursor = PageCursor {
            client: self.client.clone(),
            next: Some(url),
            items: VecDeque::new(),
        };

        Ok(stream::try_unfold(cursor, PageCursor::next_item).boxed())
    }

    /// Stream the repository's pull requests matching `query`.
    pub fn pulls(
        &self,
        query: &[(&str, &str)],
    ) -> Result<BoxStream<'static, Result<PullRequest>>> {
        let pulls = self.paginate("pulls", query)?.map(|item| {
            item.and_then(|value| {
                Ok(serde_json::from_value::<PullRequest>(value)?)
            })
        });

        Ok(pulls.boxed())
    }
}

/// Pagination state: the items of the current page not yet handed out and
/// the page to request once they run out.
struct PageCursor {
    client: Client,
    next: Option<Url>,
    items: VecDeque<Value>,
}

impl PageCursor {
    async fn next_item(mut self) -> Result<Option<(Value, Self)>> {
        loop {
            if let Some(item) = self.items.pop_front() {
                return Ok(Some((item, self)));
            }

            let Some(url) = self.next.take() else {
                return Ok(None);
            };

            self.fetch(url).await?;
        }
    }

    async fn fetch(&mut self, url: Url) -> Result<()> {
        debug!("fetching {url}");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|err| format!("<unreadable body: {err}>"));
            return Err(ChangelistError::api(
                url.to_string(),
                status.as_u16(),
                body,
            ));
        }

        let next = next_page_url(&url, response.headers())?;
        let page: Value = response.json().await?;

        match page {
            Value::Array(items) => {
                self.items.extend(items);
                self.next = next;
            }
            item => {
                self.items.push_back(item);
                self.next = None;
            }
        }

        Ok(())
    }
}
