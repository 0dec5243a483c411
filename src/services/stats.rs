//! Stats aggregation service
//!
//! Computes the dashboard totals across the configured repositories. Every
//! upstream failure degrades to a zero contribution for that repository;
//! no call is retried and no failure crosses the service boundary.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::warn;

use crate::models::DashboardStats;
use crate::services::github::{RepoHost, TreeEntry};

/// Suffix identifying Terraform files
const TERRAFORM_SUFFIX: &str = ".tf";

/// Aggregates repository statistics through a [`RepoHost`]
#[derive(Clone)]
pub struct StatsService {
    host: Arc<dyn RepoHost>,
    owner: String,
    repositories: Vec<String>,
}

impl StatsService {
    pub fn new(
        host: Arc<dyn RepoHost>,
        owner: impl Into<String>,
        repositories: Vec<String>,
    ) -> Self {
        Self {
            host,
            owner: owner.into(),
            repositories,
        }
    }

    /// Compute the full dashboard record
    ///
    /// The three totals run concurrently and each is independently
    /// resilient, so this never fails.
    pub async fn compute(&self) -> DashboardStats {
        let (commits, terraform, playbooks) = tokio::join!(
            self.total_commits(),
            self.total_terraform_modules(),
            self.total_ansible_playbooks()
        );

        DashboardStats::from_totals(terraform, playbooks, commits)
    }

    /// Commits in one repository
    ///
    /// Taken from the pagination link when present (one commit per page, so
    /// the last page number is the total) and from the returned entry count
    /// otherwise.
    async fn commit_count(&self, repo: &str) -> u64 {
        match self.host.commit_page(&self.owner, repo).await {
            Ok(page) => page.last_page.unwrap_or(page.returned as u64),
            Err(e) => {
                warn!("GitHub commit lookup failed for {}: {}", repo, e);
                0
            }
        }
    }

    /// Blobs whose path ends with `suffix` (case-insensitive) in one repository
    async fn suffix_file_count(&self, repo: &str, suffix: &str) -> u64 {
        match self.host.repo_tree(&self.owner, repo).await {
            Ok(tree) => count_suffix_blobs(&tree, suffix),
            Err(e) => {
                warn!("GitHub tree scan failed for {}: {}", repo, e);
                0
            }
        }
    }

    /// Blobs matching the playbook path heuristic in one repository
    async fn playbook_count(&self, repo: &str) -> u64 {
        match self.host.repo_tree(&self.owner, repo).await {
            Ok(tree) => count_playbook_blobs(&tree),
            Err(e) => {
                warn!("GitHub playbook scan failed for {}: {}", repo, e);
                0
            }
        }
    }

    async fn total_commits(&self) -> u64 {
        sum_across(self.repositories.iter().map(|repo| self.commit_count(repo))).await
    }

    async fn total_terraform_modules(&self) -> u64 {
        sum_across(
            self.repositories
                .iter()
                .map(|repo| self.suffix_file_count(repo, TERRAFORM_SUFFIX)),
        )
        .await
    }

    async fn total_ansible_playbooks(&self) -> u64 {
        sum_across(self.repositories.iter().map(|repo| self.playbook_count(repo))).await
    }
}

/// Run the per-repository counts concurrently and sum the results
///
/// Waits for every branch; a failed branch has already degraded to zero
/// inside its counter, so one slow or failing repository never cancels or
/// blocks its siblings.
async fn sum_across<Fut>(counts: impl IntoIterator<Item = Fut>) -> u64
where
    Fut: Future<Output = u64>,
{
    join_all(counts)
        .await
        .into_iter()
        .fold(0u64, u64::saturating_add)
}

/// Count blob entries whose path ends with the given suffix, case-insensitive
fn count_suffix_blobs(tree: &[TreeEntry], suffix: &str) -> u64 {
    let suffix = suffix.to_ascii_lowercase();
    tree.iter()
        .filter(|entry| entry.is_blob() && entry.path.to_ascii_lowercase().ends_with(&suffix))
        .count() as u64
}

/// Count blob entries matching the playbook heuristic
fn count_playbook_blobs(tree: &[TreeEntry]) -> u64 {
    tree.iter()
        .filter(|entry| entry.is_blob() && is_playbook_path(&entry.path))
        .count() as u64
}

/// Best-effort check for "is this file an Ansible playbook"
///
/// A path qualifies when it has a `.yml`/`.yaml` extension, does not sit
/// under a `.github` directory (CI workflow files would be false
/// positives), and either lives under a directory named `ansible` or
/// `playbooks` or carries `playbook` in its file name. All comparisons are
/// case-insensitive.
fn is_playbook_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    if !lower.ends_with(".yml") && !lower.ends_with(".yaml") {
        return false;
    }

    let segments: Vec<&str> = lower.split('/').collect();
    if segments.contains(&".github") {
        return false;
    }

    let Some((name, dirs)) = segments.split_last() else {
        return false;
    };
    dirs.iter()
        .any(|dir| *dir == "ansible" || *dir == "playbooks")
        || name.contains("playbook")
}
