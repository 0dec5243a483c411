//! Testing utilities
//!
//! A scripted [`RepoHost`] double for exercising the aggregation and HTTP
//! layers without a live upstream.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::services::github::{CommitPage, RepoHost, TreeEntry, UpstreamError};

/// Scripted per-repository upstream responses
///
/// Repositories not scripted and not marked failing answer with a 404,
/// which callers treat like any other upstream failure.
#[derive(Default)]
pub struct MockRepoHost {
    commit_pages: HashMap<String, CommitPage>,
    trees: HashMap<String, Vec<TreeEntry>>,
    failing: Vec<String>,
}

impl MockRepoHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the commit page returned for `repo`
    pub fn with_commit_page(mut self, repo: &str, last_page: Option<u64>, returned: usize) -> Self {
        self.commit_pages
            .insert(repo.to_string(), CommitPage { last_page, returned });
        self
    }

    /// Script the file tree returned for `repo`; entries are `(path, kind)` pairs
    pub fn with_tree(mut self, repo: &str, entries: &[(&str, &str)]) -> Self {
        let tree = entries
            .iter()
            .map(|(path, kind)| TreeEntry {
                path: (*path).to_string(),
                kind: (*kind).to_string(),
            })
            .collect();
        self.trees.insert(repo.to_string(), tree);
        self
    }

    /// Script the file tree for `repo` with every entry a blob
    pub fn with_blobs(self, repo: &str, paths: &[&str]) -> Self {
        let entries: Vec<(&str, &str)> = paths.iter().map(|path| (*path, "blob")).collect();
        self.with_tree(repo, &entries)
    }

    /// Make every call for `repo` fail with a transport error
    pub fn with_failure(mut self, repo: &str) -> Self {
        self.failing.push(repo.to_string());
        self
    }

    fn check_failure(&self, repo: &str) -> Result<(), UpstreamError> {
        if self.failing.iter().any(|r| r == repo) {
            return Err(UpstreamError::Transport(format!(
                "simulated connection failure for {repo}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RepoHost for MockRepoHost {
    async fn commit_page(&self, _owner: &str, repo: &str) -> Result<CommitPage, UpstreamError> {
        self.check_failure(repo)?;
        self.commit_pages
            .get(repo)
            .cloned()
            .ok_or(UpstreamError::Status(404))
    }

    async fn repo_tree(&self, _owner: &str, repo: &str) -> Result<Vec<TreeEntry>, UpstreamError> {
        self.check_failure(repo)?;
        self.trees
            .get(repo)
            .cloned()
            .ok_or(UpstreamError::Status(404))
    }
}
