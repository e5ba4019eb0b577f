use crate::time_ago::time_ago;
use crate::types::{GitHubCommit, GitHubRepo, GitHubUser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository visibility as reported by GitHub
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }
}

/// Repository as displayed on cards and in search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub updated_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub visibility: Visibility,
}

impl From<GitHubRepo> for RepositorySummary {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            name: repo.name,
            // GitHub sends "" for cleared descriptions
            description: repo.description.filter(|d| !d.trim().is_empty()),
            url: repo.html_url,
            language: repo.language.filter(|l| !l.is_empty()),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            updated_at: repo.updated_at,
            created_at: repo.created_at,
            visibility: if repo.private {
                Visibility::Private
            } else {
                Visibility::Public
            },
        }
    }
}

/// Profile numbers shown in the header stats panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub login: String,
    pub avatar_url: String,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
}

impl From<GitHubUser> for UserProfile {
    fn from(user: GitHubUser) -> Self {
        Self {
            login: user.login,
            avatar_url: user.avatar_url,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
        }
    }
}

/// A single commit paired with the repository it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommitEntry {
    pub repo: RepositorySummary,
    pub message: String,
    pub authored_at: DateTime<Utc>,
    pub age_label: String,
}

impl CommitEntry {
    pub fn new(
        repo: RepositorySummary,
        message: impl Into<String>,
        authored_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            repo,
            message: message.into(),
            authored_at,
            age_label: time_ago(authored_at, now),
        }
    }

    pub fn from_commit(repo: &RepositorySummary, commit: GitHubCommit, now: DateTime<Utc>) -> Self {
        Self::new(
            repo.clone(),
            commit.commit.message,
            commit.commit.author.date,
            now,
        )
    }

    /// First line of the commit message
    pub fn headline(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// Where a panel's data came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    Live,
    Fallback,
}

/// A payload tagged with its origin. Fallback payloads are always whole
/// substitutes, never merged with live records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resolved<T> {
    pub data: T,
    pub origin: DataOrigin,
}

impl<T> Resolved<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            origin: DataOrigin::Live,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            origin: DataOrigin::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == DataOrigin::Fallback
    }
}

/// Rate limit state parsed from the last GitHub response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
    pub reset_time: DateTime<Utc>,
    pub is_limited: bool,
}

impl Default for RateLimitState {
    fn default() -> Self {
        // Unauthenticated GitHub clients get 60 requests per hour
        Self {
            remaining: 60,
            limit: 60,
            reset_time: Utc::now() + chrono::Duration::hours(1),
            is_limited: false,
        }
    }
}
