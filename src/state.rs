//! View state and the reducer that drives it.
//!
//! Every user action arrives as an [`Intent`]. [`reduce`] is pure: it takes
//! the current state by value and returns the next state plus any loads the
//! caller should run. Load results come back through [`apply_loaded`], which
//! replaces whole lists.

use crate::error::PortfolioError;
use crate::gallery::{self, CategoryFilter, GalleryImage};
use crate::models::{CommitEntry, DataOrigin, RepositorySummary, Resolved, UserProfile};
use crate::pagination::{PageRequest, Paginator, COMMITS_PER_PAGE, REPOS_PER_PAGE};
use crate::search::{filter_and_sort, SearchQuery, SortField, SortOrder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Search,
    Portfolio,
    Github,
    Gallery,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Search, Tab::Portfolio, Tab::Github, Tab::Gallery];

    pub fn slug(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Search => "search",
            Tab::Portfolio => "portfolio",
            Tab::Github => "github",
            Tab::Gallery => "gallery",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Search => "Search",
            Tab::Portfolio => "Portfolio",
            Tab::Github => "GitHub",
            Tab::Gallery => "Gallery",
        }
    }
}

impl FromStr for Tab {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.slug() == s)
            .ok_or_else(|| PortfolioError::InvalidRequest(format!("Unknown tab: {}", s)))
    }
}

/// The two independently paginated lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Repos,
    Commits,
}

impl ListKind {
    pub fn paginator(&self) -> Paginator {
        match self {
            ListKind::Repos => Paginator::new(REPOS_PER_PAGE),
            ListKind::Commits => Paginator::new(COMMITS_PER_PAGE),
        }
    }
}

impl FromStr for ListKind {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repos" => Ok(ListKind::Repos),
            "commits" => Ok(ListKind::Commits),
            other => Err(PortfolioError::InvalidRequest(format!("Unknown list: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Text(String),
    Language(Option<String>),
    Sort(SortField),
    Order(SortOrder),
    Replace(SearchQuery),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    TabSelected(Tab),
    Navigate { list: ListKind, request: PageRequest },
    FilterChanged(FilterChange),
    GalleryCategorySelected(CategoryFilter),
    ThemeToggled,
}

/// Loads requested by the reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    LoadProfile,
    LoadHomeDashboard,
    LoadRepositories,
}

/// Results of running an [`Effect`]
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Profile(Resolved<UserProfile>),
    HomeDashboard {
        commits: Resolved<Vec<CommitEntry>>,
        repos: Resolved<Vec<RepositorySummary>>,
        gallery: Vec<GalleryImage>,
    },
    Repositories(Resolved<Vec<RepositorySummary>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub active_tab: Tab,
    pub profile: Option<Resolved<UserProfile>>,
    pub commits: Option<Resolved<Vec<CommitEntry>>>,
    pub commit_page: usize,
    pub home_repos: Option<Resolved<Vec<RepositorySummary>>>,
    pub home_gallery: Vec<GalleryImage>,
    pub repos: Option<Resolved<Vec<RepositorySummary>>>,
    pub repo_page: usize,
    pub search: SearchQuery,
    /// Always derived from `repos` and `search`
    pub filtered: Vec<RepositorySummary>,
    pub gallery_images: Vec<GalleryImage>,
    pub gallery_filter: CategoryFilter,
    pub dark_mode: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Home,
            profile: None,
            commits: None,
            commit_page: 1,
            home_repos: None,
            home_gallery: Vec::new(),
            repos: None,
            repo_page: 1,
            search: SearchQuery::default(),
            filtered: Vec::new(),
            gallery_images: gallery::catalog(),
            gallery_filter: CategoryFilter::All,
            dark_mode: false,
        }
    }
}

impl ViewState {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            ..Default::default()
        }
    }

    /// Loads to run when the page is first opened
    pub fn initial_effects() -> Vec<Effect> {
        vec![Effect::LoadProfile, Effect::LoadHomeDashboard]
    }

    pub fn all_repos(&self) -> &[RepositorySummary] {
        self.repos.as_ref().map(|r| r.data.as_slice()).unwrap_or_default()
    }

    pub fn commit_entries(&self) -> &[CommitEntry] {
        self.commits.as_ref().map(|c| c.data.as_slice()).unwrap_or_default()
    }

    /// True when any loaded panel is showing fallback data
    pub fn uses_fallback(&self) -> bool {
        let origins = [
            self.profile.as_ref().map(|r| r.origin),
            self.commits.as_ref().map(|r| r.origin),
            self.home_repos.as_ref().map(|r| r.origin),
            self.repos.as_ref().map(|r| r.origin),
        ];
        origins.into_iter().flatten().any(|origin| origin == DataOrigin::Fallback)
    }

    fn refresh_filtered(&mut self) {
        self.filtered = filter_and_sort(self.all_repos(), &self.search);
    }
}

pub fn reduce(mut state: ViewState, intent: Intent) -> (ViewState, Vec<Effect>) {
    let mut effects = Vec::new();

    match intent {
        Intent::TabSelected(tab) => {
            state.active_tab = tab;
            match tab {
                Tab::Home => {
                    if state.commits.is_none() || state.home_repos.is_none() {
                        effects.push(Effect::LoadHomeDashboard);
                    }
                }
                Tab::Github | Tab::Search => {
                    if state.repos.is_none() {
                        effects.push(Effect::LoadRepositories);
                    }
                }
                Tab::Gallery => state.gallery_filter = CategoryFilter::All,
                Tab::Portfolio => {}
            }
        }
        Intent::Navigate { list, request } => {
            let paginator = list.paginator();
            match list {
                ListKind::Repos => {
                    let len = state.all_repos().len();
                    state.repo_page = paginator.navigate(len, state.repo_page, request);
                }
                ListKind::Commits => {
                    let len = state.commit_entries().len();
                    state.commit_page = paginator.navigate(len, state.commit_page, request);
                }
            }
        }
        Intent::FilterChanged(change) => {
            match change {
                FilterChange::Text(text) => state.search.text = text,
                FilterChange::Language(language) => {
                    state.search.language = language.filter(|l| !l.is_empty())
                }
                FilterChange::Sort(sort) => state.search.sort = sort,
                FilterChange::Order(order) => state.search.order = order,
                FilterChange::Replace(mut query) => {
                    query.language = query.language.filter(|l| !l.is_empty());
                    state.search = query;
                }
            }
            state.refresh_filtered();
        }
        Intent::GalleryCategorySelected(filter) => state.gallery_filter = filter,
        Intent::ThemeToggled => state.dark_mode = !state.dark_mode,
    }

    (state, effects)
}

pub fn apply_loaded(mut state: ViewState, loaded: Loaded) -> ViewState {
    match loaded {
        Loaded::Profile(profile) => state.profile = Some(profile),
        Loaded::HomeDashboard {
            commits,
            repos,
            gallery,
        } => {
            state.commits = Some(commits);
            state.commit_page = 1;
            state.home_repos = Some(repos);
            state.home_gallery = gallery;
        }
        Loaded::Repositories(repos) => {
            state.repos = Some(repos);
            state.repo_page = 1;
            state.refresh_filtered();
        }
    }
    state
}
