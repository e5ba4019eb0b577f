use crate::error::{PortfolioError, Result};
use crate::models::RateLimitState;
use crate::types::{GitHubCommit, GitHubRepo, GitHubSearchResponse, GitHubUser};
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

pub const API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "Portfolio-Server/0.1.0";
const ACCEPT: &str = "application/vnd.github.v3+json";

/// Read-only client for the handful of GitHub endpoints the portfolio uses.
///
/// Every public fetch returns `None` on failure. Callers treat `None` as
/// "use fallback data", never as an empty result.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    username: String,
}

impl GitHubClient {
    pub fn new(username: impl Into<String>) -> Result<Self> {
        Self::with_base_url(username, API_BASE_URL, DEFAULT_USER_AGENT)
    }

    pub fn with_base_url(
        username: impl Into<String>,
        base_url: impl Into<String>,
        user_agent: &str,
    ) -> Result<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(PortfolioError::InvalidRequest(
                "GitHub username must not be empty".to_string(),
            ));
        }

        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(GitHubClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    async fn make_request(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("Accept", ACCEPT)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let rate_limit = rate_limit_state(response.headers());
                debug!(
                    path,
                    remaining = rate_limit.remaining,
                    limit = rate_limit.limit,
                    "GitHub request succeeded"
                );
                Ok(response)
            }
            StatusCode::FORBIDDEN => {
                let rate_limit = rate_limit_state(response.headers());
                warn!(
                    path,
                    remaining = rate_limit.remaining,
                    reset_time = %rate_limit.reset_time,
                    "GitHub API rate limit reached. Try again after the reset time."
                );
                Err(PortfolioError::RateLimitExceeded(format!(
                    "API rate limit exceeded. Reset at: {}",
                    rate_limit.reset_time
                )))
            }
            StatusCode::NOT_FOUND => {
                error!(path, "GitHub API error: 404 Not Found");
                Err(PortfolioError::NotFound(format!("Resource not found: {}", path)))
            }
            status => {
                error!(path, %status, "GitHub API error");
                let error_text = response.text().await.unwrap_or_default();
                Err(PortfolioError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    /// Typed GET. Errors are propagated so callers that care can tell them
    /// apart; `fetch` collapses them.
    pub async fn try_fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.make_request(path).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// GET `path` and decode it, or `None` on any failure.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match self.try_fetch(path).await {
            Ok(data) => Some(data),
            Err(e) => {
                error!(path, "GitHub API call failed: {}", e);
                None
            }
        }
    }

    pub async fn fetch_user(&self) -> Option<GitHubUser> {
        self.fetch(&format!("/users/{}", self.username)).await
    }

    pub async fn fetch_repos_page(&self, per_page: u32, page: u32) -> Option<Vec<GitHubRepo>> {
        self.fetch(&format!(
            "/users/{}/repos?sort=updated&per_page={}&page={}",
            self.username, per_page, page
        ))
        .await
    }

    pub async fn fetch_recent_commits(&self, repo: &str, per_page: u32) -> Option<Vec<GitHubCommit>> {
        let repo: String = url::form_urlencoded::byte_serialize(repo.as_bytes()).collect();
        self.fetch(&format!(
            "/repos/{}/{}/commits?per_page={}",
            self.username, repo, per_page
        ))
        .await
    }

    /// Repository search scoped to the configured user.
    pub async fn search_repositories(&self, query: &str) -> Option<GitHubSearchResponse> {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.fetch(&format!(
            "/search/repositories?q={}+user:{}",
            encoded, self.username
        ))
        .await
    }
}

/// Parse the `X-RateLimit-*` headers of a response
pub fn rate_limit_state(headers: &HeaderMap) -> RateLimitState {
    let remaining = headers
        .get("X-RateLimit-Remaining")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0);

    let limit = headers
        .get("X-RateLimit-Limit")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(60);

    let reset = headers
        .get("X-RateLimit-Reset")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .map(|timestamp| DateTime::from_timestamp(timestamp, 0).unwrap_or_else(Utc::now))
        .unwrap_or_else(|| Utc::now() + chrono::Duration::hours(1));

    RateLimitState {
        remaining,
        limit,
        reset_time: reset,
        is_limited: remaining == 0,
    }
}
