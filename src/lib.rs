//! repostats - dashboard statistics API
//!
//! Aggregates commit and infrastructure-as-code statistics for a fixed set
//! of GitHub repositories and serves them as JSON to the front-end
//! dashboard.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use models::DashboardStats;
pub use services::{GithubClient, RepoHost, StatsService, UpstreamError};
