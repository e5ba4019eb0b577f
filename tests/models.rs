mod common;

use chrono::{TimeZone, Utc};
use common::{at, commit_json, repo, repo_json};
use portfolio_server::fallback::{fallback_commits, fallback_profile, fallback_repositories, FALLBACK_LOGIN};
use portfolio_server::models::{
    CommitEntry, DataOrigin, RateLimitState, RepositorySummary, Resolved, UserProfile, Visibility,
};
use portfolio_server::types::{GitHubCommit, GitHubRepo, GitHubUser};
use serde_json::json;

#[test]
fn test_repository_from_api() {
    let api: GitHubRepo =
        serde_json::from_value(repo_json("alpha", Some("Rust"), "2024-05-01T10:00:00Z")).unwrap();
    let summary = RepositorySummary::from(api);

    assert_eq!(summary.name, "alpha");
    assert_eq!(summary.description.as_deref(), Some("alpha description"));
    assert_eq!(summary.language.as_deref(), Some("Rust"));
    assert_eq!(summary.stars, 3);
    assert_eq!(summary.forks, 1);
    assert_eq!(summary.visibility, Visibility::Public);
    assert_eq!(summary.created_at, Some(at(2023, 1, 1)));
}

#[test]
fn test_blank_optional_fields_become_none() {
    let api: GitHubRepo = serde_json::from_value(json!({
        "name": "blank",
        "description": "   ",
        "html_url": "https://github.com/octo/blank",
        "language": "",
        "stargazers_count": 0,
        "forks_count": 0,
        "updated_at": "2024-05-01T10:00:00Z",
        "private": true
    }))
    .unwrap();
    let summary = RepositorySummary::from(api);

    assert_eq!(summary.description, None);
    assert_eq!(summary.language, None);
    assert_eq!(summary.created_at, None);
    assert_eq!(summary.visibility.label(), "Private");
}

#[test]
fn test_user_from_api() {
    let api: GitHubUser = serde_json::from_value(common::user_json()).unwrap();
    let profile = UserProfile::from(api);
    assert_eq!(profile.login, "octo");
    assert_eq!(profile.followers, 7);
}

#[test]
fn test_commit_entry_from_api() {
    let now = Utc.with_ymd_and_hms(2024, 5, 2, 3, 0, 0).unwrap();
    let api: GitHubCommit =
        serde_json::from_value(commit_json("abc", "Fix parser\n\nDetails", "2024-05-02T00:00:00Z")).unwrap();
    let entry = CommitEntry::from_commit(&repo("alpha", None, 0, at(2024, 5, 1)), api, now);

    assert_eq!(entry.repo.name, "alpha");
    assert_eq!(entry.headline(), "Fix parser");
    assert_eq!(entry.age_label, "3 hours ago");
}

#[test]
fn test_empty_commit_message_headline() {
    let entry = CommitEntry::new(repo("alpha", None, 0, at(2024, 5, 1)), "", at(2024, 5, 1), at(2024, 5, 1));
    assert_eq!(entry.headline(), "");
}

#[test]
fn test_resolved_origin() {
    let live = Resolved::live(vec![1, 2]);
    assert_eq!(live.origin, DataOrigin::Live);
    assert!(!live.is_fallback());

    let fallback = Resolved::fallback(Vec::<u32>::new());
    assert!(fallback.is_fallback());
}

#[test]
fn test_fallback_dataset() {
    let repos = fallback_repositories();
    let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["azabell1993.github.io", "ClangGrammar", "Rust_study"]);
    assert!(repos.iter().all(|r| r.url.contains(FALLBACK_LOGIN)));

    let profile = fallback_profile();
    assert_eq!(profile.public_repos, 25);
    assert_eq!(profile.followers, 10);
    assert_eq!(profile.following, 15);

    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let commits = fallback_commits(now);
    assert_eq!(commits.len(), 3);
    assert!(commits.windows(2).all(|w| w[0].authored_at >= w[1].authored_at));
}

#[test]
fn test_rate_limit_state_default() {
    let state = RateLimitState::default();
    assert_eq!(state.remaining, 60);
    assert_eq!(state.limit, 60);
    assert!(!state.is_limited);
}
