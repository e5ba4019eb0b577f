#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use portfolio_server::actors::portfolio::stats;
use portfolio_server::actors::{PortfolioMessage, PortfolioStats};
use portfolio_server::github::GitHubClient;
use portfolio_server::loader::{Loader, LoaderConfig};
use portfolio_server::models::{RepositorySummary, Visibility};
use ractor::ActorRef;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN: &str = "octo";

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn repo(name: &str, language: Option<&str>, stars: u32, updated_at: DateTime<Utc>) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        description: None,
        url: format!("https://github.com/{}/{}", LOGIN, name),
        language: language.map(str::to_string),
        stars,
        forks: 0,
        updated_at,
        created_at: None,
        visibility: Visibility::Public,
    }
}

/// `count` repositories named repo-1..repo-N, newest first
pub fn numbered_repos(count: usize) -> Vec<RepositorySummary> {
    (1..=count)
        .map(|i| repo(&format!("repo-{}", i), Some("Rust"), i as u32, at(2024, 1, 1) - chrono::Duration::days(i as i64)))
        .collect()
}

pub fn repo_json(name: &str, language: Option<&str>, updated_at: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{} description", name),
        "html_url": format!("https://github.com/{}/{}", LOGIN, name),
        "language": language,
        "stargazers_count": 3,
        "forks_count": 1,
        "updated_at": updated_at,
        "created_at": "2023-01-01T00:00:00Z",
        "private": false
    })
}

pub fn commit_json(sha: &str, message: &str, date: &str) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "message": message,
            "author": { "name": "Octo", "date": date }
        }
    })
}

pub fn user_json() -> Value {
    json!({
        "login": LOGIN,
        "avatar_url": "https://avatars.example.com/octo.png",
        "public_repos": 42,
        "followers": 7,
        "following": 3
    })
}

pub fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::with_base_url(LOGIN, server.uri(), "portfolio-tests").expect("client")
}

pub fn loader_for(server: &MockServer) -> Loader {
    Loader::new(client_for(server), LoaderConfig::default())
}

pub async fn mount_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", LOGIN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(server)
        .await;
}

/// Serve `repos` for every repository listing request
pub async fn mount_repos(server: &MockServer, repos: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", LOGIN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos))
        .mount(server)
        .await;
}

pub async fn mount_repos_page(server: &MockServer, page: u32, repos: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", LOGIN)))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos))
        .mount(server)
        .await;
}

pub async fn mount_commits(server: &MockServer, repo: &str, commits: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/commits", LOGIN, repo)))
        .respond_with(ResponseTemplate::new(200).set_body_json(commits))
        .mount(server)
        .await;
}

/// Any request not matched by a more specific mock fails with `status`
pub async fn mount_failure(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .with_priority(u8::MAX)
        .mount(server)
        .await;
}

pub fn temp_prefs_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("portfolio-prefs-{}-{}.json", std::process::id(), name))
}

/// Poll the actor until `completed` loads have landed and nothing is in flight
pub async fn wait_for_loads(actor: &ActorRef<PortfolioMessage>, completed: u64) -> PortfolioStats {
    for _ in 0..200 {
        let current = stats(actor, Duration::from_secs(5)).await.expect("Failed to get stats");
        if current.loads_completed >= completed && current.loads_in_flight == 0 {
            return current;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("Loads did not finish in time");
}
