//! Static datasets substituted when GitHub is unreachable.
//!
//! A fallback always replaces a whole list. Nothing in here merges live and
//! static records.

use crate::models::{CommitEntry, RepositorySummary, Resolved, UserProfile, Visibility};
use chrono::{DateTime, TimeZone, Utc};
use tracing::warn;

pub const FALLBACK_LOGIN: &str = "Azabell1993";
pub const FALLBACK_AVATAR_URL: &str = "https://avatars.githubusercontent.com/u/username";

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn repo(
    name: &str,
    description: &str,
    language: &str,
    stars: u32,
    forks: u32,
    updated_at: DateTime<Utc>,
) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        description: Some(description.to_string()),
        url: format!("https://github.com/{}/{}", FALLBACK_LOGIN, name),
        language: Some(language.to_string()),
        stars,
        forks,
        updated_at,
        created_at: None,
        visibility: Visibility::Public,
    }
}

pub fn fallback_repositories() -> Vec<RepositorySummary> {
    vec![
        repo(
            "azabell1993.github.io",
            "Personal portfolio website",
            "HTML",
            0,
            0,
            date(2024, 12, 1),
        ),
        repo(
            "ClangGrammar",
            "C language grammar study project",
            "C",
            2,
            1,
            date(2024, 11, 15),
        ),
        repo(
            "Rust_study",
            "Rust programming language study",
            "Rust",
            1,
            0,
            date(2024, 10, 20),
        ),
    ]
}

pub fn fallback_profile() -> UserProfile {
    UserProfile {
        login: FALLBACK_LOGIN.to_string(),
        avatar_url: FALLBACK_AVATAR_URL.to_string(),
        public_repos: 25,
        followers: 10,
        following: 15,
    }
}

/// One representative commit per fallback repository, newest first.
pub fn fallback_commits(now: DateTime<Utc>) -> Vec<CommitEntry> {
    let messages = [
        "Update portfolio layout",
        "Add pointer arithmetic examples",
        "Add ownership and borrowing notes",
    ];

    fallback_repositories()
        .into_iter()
        .zip(messages)
        .map(|(repo, message)| {
            let authored_at = repo.updated_at;
            CommitEntry::new(repo, message, authored_at, now)
        })
        .collect()
}

/// Use `live` if present, otherwise the first `limit` entries of `fallback`.
pub fn resolve_list<T>(
    panel: &str,
    live: Option<Vec<T>>,
    fallback: impl FnOnce() -> Vec<T>,
    limit: usize,
) -> Resolved<Vec<T>> {
    match live {
        Some(data) => Resolved::live(data),
        None => {
            warn!(panel, "GitHub API unavailable. Using static fallback data.");
            Resolved::fallback(fallback().into_iter().take(limit).collect())
        }
    }
}

pub fn resolve_one<T>(panel: &str, live: Option<T>, fallback: impl FnOnce() -> T) -> Resolved<T> {
    match live {
        Some(data) => Resolved::live(data),
        None => {
            warn!(panel, "GitHub API unavailable. Using static fallback data.");
            Resolved::fallback(fallback())
        }
    }
}
