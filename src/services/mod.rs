pub mod github;
pub mod stats;
pub mod testing;

pub use github::{CommitPage, GithubClient, RepoHost, TreeEntry, UpstreamError};
pub use stats::StatsService;
