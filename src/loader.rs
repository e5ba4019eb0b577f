use crate::fallback::{
    fallback_commits, fallback_profile, fallback_repositories, resolve_list, resolve_one,
};
use crate::gallery;
use crate::github::GitHubClient;
use crate::models::{CommitEntry, RepositorySummary, Resolved, UserProfile};
use crate::search::{filter_and_sort, SearchQuery};
use crate::state::{Effect, Loaded};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};

/// Repositories shown in the home panel
pub const HOME_REPO_COUNT: usize = 5;
/// Recently updated repositories considered for the commit feed
pub const FEED_REPO_POOL: u32 = 20;
pub const COMMITS_PER_REPO: u32 = 2;
/// GitHub's maximum page size
pub const REPO_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Only the first N repositories are asked for commits
    pub commit_repo_limit: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            commit_repo_limit: 10,
        }
    }
}

/// Runs load effects against GitHub, resolving failures to fallback data
#[derive(Debug, Clone)]
pub struct Loader {
    client: GitHubClient,
    config: LoaderConfig,
}

impl Loader {
    pub fn new(client: GitHubClient, config: LoaderConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    pub async fn load_profile(&self) -> Resolved<UserProfile> {
        let live = self.client.fetch_user().await.map(UserProfile::from);
        resolve_one("profile", live, fallback_profile)
    }

    pub async fn load_home_repos(&self) -> Resolved<Vec<RepositorySummary>> {
        let live = self
            .client
            .fetch_repos_page(HOME_REPO_COUNT as u32, 1)
            .await
            .map(|repos| repos.into_iter().map(RepositorySummary::from).collect());
        resolve_list("home repositories", live, fallback_repositories, HOME_REPO_COUNT)
    }

    /// Latest commits across the most recently updated repositories, newest
    /// first. The per-repository fetches run concurrently; ordering is fixed
    /// by the final sort.
    pub async fn load_recent_commits(&self, now: DateTime<Utc>) -> Resolved<Vec<CommitEntry>> {
        let Some(repos) = self.client.fetch_repos_page(FEED_REPO_POOL, 1).await else {
            warn!("Could not list repositories for the commit feed. Using static fallback data.");
            return Resolved::fallback(fallback_commits(now));
        };

        let repos: Vec<RepositorySummary> = repos
            .into_iter()
            .take(self.config.commit_repo_limit)
            .map(RepositorySummary::from)
            .collect();

        if repos.is_empty() {
            return Resolved::live(Vec::new());
        }

        let fetches = repos
            .iter()
            .map(|repo| self.client.fetch_recent_commits(&repo.name, COMMITS_PER_REPO));
        let results = join_all(fetches).await;

        if results.iter().all(Option::is_none) {
            warn!(
                repos = repos.len(),
                "Every commit request failed. Using static fallback data."
            );
            return Resolved::fallback(fallback_commits(now));
        }

        let mut entries: Vec<CommitEntry> = repos
            .iter()
            .zip(results)
            .filter_map(|(repo, commits)| commits.map(|commits| (repo, commits)))
            .flat_map(|(repo, commits)| {
                commits
                    .into_iter()
                    .map(move |commit| CommitEntry::from_commit(repo, commit, now))
            })
            .collect();

        entries.sort_by(|a, b| b.authored_at.cmp(&a.authored_at));
        debug!(commits = entries.len(), "Collected recent commits");

        Resolved::live(entries)
    }

    pub async fn load_home_dashboard(&self, now: DateTime<Utc>) -> Loaded {
        let (commits, repos, gallery) = tokio::join!(
            self.load_recent_commits(now),
            self.load_home_repos(),
            async { gallery::home_sample() },
        );

        Loaded::HomeDashboard {
            commits,
            repos,
            gallery,
        }
    }

    /// Every repository of the user, following pages until a short one.
    /// A failure on the first page switches to fallback data; a failure on a
    /// later page keeps the live pages already fetched.
    pub async fn load_all_repositories(&self) -> Resolved<Vec<RepositorySummary>> {
        let mut all: Vec<RepositorySummary> = Vec::new();
        let mut page = 1;

        loop {
            let Some(repos) = self.client.fetch_repos_page(REPO_PAGE_SIZE, page).await else {
                if page == 1 {
                    return resolve_list("repositories", None, fallback_repositories, usize::MAX);
                }
                warn!(page, "Stopped paging repositories after a failed request");
                break;
            };

            let fetched = repos.len();
            all.extend(repos.into_iter().map(RepositorySummary::from));

            if fetched < REPO_PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        info!(total = all.len(), pages = page, "Loaded repositories");
        Resolved::live(all)
    }

    /// Server-side search through GitHub's search endpoint. On failure the
    /// query runs locally against the fallback repositories.
    pub async fn remote_search(&self, query: &str) -> Resolved<Vec<RepositorySummary>> {
        match self.client.search_repositories(query).await {
            Some(response) => {
                debug!(query, total = response.total_count, "Remote search finished");
                Resolved::live(response.items.into_iter().map(RepositorySummary::from).collect())
            }
            None => {
                warn!(query, "Remote search unavailable. Searching static fallback data.");
                let local = SearchQuery {
                    text: query.to_string(),
                    ..Default::default()
                };
                Resolved::fallback(filter_and_sort(&fallback_repositories(), &local))
            }
        }
    }

    pub async fn run(&self, effect: Effect, now: DateTime<Utc>) -> Loaded {
        match effect {
            Effect::LoadProfile => Loaded::Profile(self.load_profile().await),
            Effect::LoadHomeDashboard => self.load_home_dashboard(now).await,
            Effect::LoadRepositories => Loaded::Repositories(self.load_all_repositories().await),
        }
    }

    /// Independent effects run concurrently; results keep effect order.
    pub async fn run_all(&self, effects: &[Effect], now: DateTime<Utc>) -> Vec<Loaded> {
        join_all(effects.iter().map(|effect| self.run(*effect, now))).await
    }
}
