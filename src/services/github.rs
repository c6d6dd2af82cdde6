use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::config::GithubConfig;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub user not found: {0}")]
    UserNotFound(String),

    #[error("GitHub responded with status {0}")]
    Upstream(StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Thin client over the GitHub REST API repositories listing
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self, GithubError> {
        let http = Client::builder().user_agent(config.user_agent.clone()).build()?;
        Ok(Self { http, config })
    }

    /// Latest public repositories of `username`, oldest first, capped at `repo_limit`
    pub async fn user_repos(&self, username: &str) -> Result<Value, GithubError> {
        let url = format!("{}/users/{}/repos", self.config.api_base, username);

        let mut request = self
            .http
            .get(&url)
            .query(&[
                ("per_page", self.config.repo_limit.to_string()),
                ("sort", "created".to_string()),
                ("direction", "asc".to_string()),
            ])
            .header(header::ACCEPT, "application/vnd.github+json");

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(GithubError::UserNotFound(username.to_string())),
            status if !status.is_success() => Err(GithubError::Upstream(status)),
            _ => {
                let repos = response.json::<Value>().await?;
                tracing::debug!("Fetched GitHub repositories for {}", username);
                Ok(repos)
            }
        }
    }
}
