use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL of the GitHub REST API
    pub github_api_url: String,
    /// Account that owns the aggregated repositories
    pub github_owner: String,
    /// Repositories included in the aggregated stats
    pub repositories: Vec<String>,
    /// Optional token for authenticated upstream calls
    pub github_token: Option<String>,
    /// Timeout for each upstream call in seconds (default: 3)
    pub upstream_timeout_secs: u64,
}

const DEFAULT_REPOSITORIES: &str = "web-server,k8s-ci-cd-demo,terraform-aws-secure-vpc";

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let github_api_url =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| "https://api.github.com".to_string());

        let github_owner = env::var("GITHUB_OWNER").unwrap_or_else(|_| "shayczech".to_string());

        let repositories = parse_repository_list(
            &env::var("REPOSITORIES").unwrap_or_else(|_| DEFAULT_REPOSITORIES.to_string()),
        );
        if repositories.is_empty() {
            return Err(ConfigError::InvalidValue("REPOSITORIES"));
        }

        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let upstream_timeout_secs = env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("UPSTREAM_TIMEOUT_SECS"))?;

        Ok(Self {
            host,
            port,
            github_api_url,
            github_owner,
            repositories,
            github_token,
            upstream_timeout_secs,
        })
    }
}

/// Split a comma-separated repository list, dropping empty entries
fn parse_repository_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
