//! Runtime configuration for the GitHub-facing commands.
//!
//! The configuration is built once at process start and passed by reference
//! to everything that talks to the API. Nothing reads the environment after
//! startup.

use crate::error::{TrackerError, TrackerResult};

/// Default organization when `GITHUB_ORG` is unset.
pub const DEFAULT_ORG: &str = "mycelia-ai";
/// Default repository when `GITHUB_REPO` is unset.
pub const DEFAULT_REPO: &str = "mycelia";
/// Default Projects V2 board number when `GITHUB_PROJECT_NUMBER` is unset.
pub const DEFAULT_PROJECT_NUMBER: u64 = 1;

/// Configuration for talking to the GitHub API.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Personal access token with `repo` and `project` scopes
    pub token: String,
    /// Organization that owns the repository and project board
    pub org: String,
    /// Repository name
    pub repo: String,
    /// GitHub Projects V2 board number
    pub project_number: u64,
}

impl GitHubConfig {
    /// Load configuration from environment variables.
    ///
    /// `GITHUB_TOKEN` is required; `GITHUB_ORG`, `GITHUB_REPO`, and
    /// `GITHUB_PROJECT_NUMBER` fall back to the Mycelia defaults. A missing
    /// token fails here, before any network call is made.
    pub fn from_env() -> TrackerResult<Self> {
        let token = std::env::var("GITHUB_TOKEN").map_err(|_| {
            TrackerError::Config("GITHUB_TOKEN environment variable not set".to_string())
        })?;

        let org = std::env::var("GITHUB_ORG").unwrap_or_else(|_| DEFAULT_ORG.to_string());
        let repo = std::env::var("GITHUB_REPO").unwrap_or_else(|_| DEFAULT_REPO.to_string());

        let project_number = match std::env::var("GITHUB_PROJECT_NUMBER") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                TrackerError::Config(format!(
                    "GITHUB_PROJECT_NUMBER must be a valid number, got '{raw}'"
                ))
            })?,
            Err(_) => DEFAULT_PROJECT_NUMBER,
        };

        Ok(Self {
            token,
            org,
            repo,
            project_number,
        })
    }

    /// Create a configuration with explicit values.
    pub fn new(token: String, org: String, repo: String, project_number: u64) -> Self {
        Self {
            token,
            org,
            repo,
            project_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = GitHubConfig::new(
            "ghp_test_token".to_string(),
            "mycelia-ai".to_string(),
            "mycelia".to_string(),
            1,
        );

        assert_eq!(config.token, "ghp_test_token");
        assert_eq!(config.org, "mycelia-ai");
        assert_eq!(config.repo, "mycelia");
        assert_eq!(config.project_number, 1);
    }

    #[test]
    fn test_project_number_parsing() {
        // Parsing logic is tested directly rather than through env vars,
        // which race when tests run in parallel.
        assert!("not_a_number".parse::<u64>().is_err());
        assert_eq!("7".parse::<u64>().unwrap(), 7);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_ORG, "mycelia-ai");
        assert_eq!(DEFAULT_REPO, "mycelia");
        assert_eq!(DEFAULT_PROJECT_NUMBER, 1);
    }
}
