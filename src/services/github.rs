//! GitHub REST API client
//!
//! Read-only queries against the upstream repository host: a single page of
//! commit history (with the pagination-link total extraction) and a
//! recursive file-tree listing for the default branch head.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, LINK};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Errors from upstream calls
///
/// Callers handle every variant the same way: log a warning naming the
/// repository and substitute a zero count. The variants exist for log
/// clarity only.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// The two facts taken from a single page of commit history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPage {
    /// Page number of the `rel="last"` pagination link, when present.
    /// At one commit per page this equals the total commit count.
    pub last_page: Option<u64>,
    /// Entries actually returned in the page body (0 or 1)
    pub returned: usize,
}

/// A file-tree entry; only `blob` entries represent regular files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.kind == "blob"
    }
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

/// Read-only surface of the upstream repository host
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Fetch the most recent single-commit page for a repository
    async fn commit_page(&self, owner: &str, repo: &str) -> Result<CommitPage, UpstreamError>;

    /// Fetch the recursive file tree at the default branch head
    async fn repo_tree(&self, owner: &str, repo: &str) -> Result<Vec<TreeEntry>, UpstreamError>;
}

/// GitHub REST API implementation of [`RepoHost`]
pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    /// Create a client with a fixed per-request timeout and an optional
    /// `Authorization: token …` default header.
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("token {token}"))
                .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("repostats/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(e.to_string())
            } else {
                UpstreamError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl RepoHost for GithubClient {
    async fn commit_page(&self, owner: &str, repo: &str) -> Result<CommitPage, UpstreamError> {
        let response = self
            .get(&format!("/repos/{owner}/{repo}/commits?per_page=1"))
            .await?;

        let last_page = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(last_page_from_link);

        let commits: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        Ok(CommitPage {
            last_page,
            returned: commits.len(),
        })
    }

    async fn repo_tree(&self, owner: &str, repo: &str) -> Result<Vec<TreeEntry>, UpstreamError> {
        let response = self
            .get(&format!("/repos/{owner}/{repo}/git/trees/HEAD?recursive=1"))
            .await?;

        let body: TreeResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        Ok(body.tree)
    }
}

/// Extract the page number of the `rel="last"` segment from a hypermedia
/// `link` header.
///
/// `<https://…/commits?per_page=1&page=42>; rel="last"` yields 42.
pub fn last_page_from_link(link: &str) -> Option<u64> {
    let segment = link.split(',').find(|s| s.contains("rel=\"last\""))?;
    let url = segment.trim().strip_prefix('<')?;
    let url = url.get(..url.find('>')?)?;
    url.split(['?', '&'])
        .find_map(|param| param.strip_prefix("page="))
        .and_then(|page| page.parse().ok())
}
