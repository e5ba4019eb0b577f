use crate::error::PortfolioError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Named containers the render functions write into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PanelId {
    ProfileStats,
    HomePosts,
    HomePagination,
    HomeRepos,
    HomeGallery,
    RepoNotice,
    RepoGrid,
    RepoPagination,
    TotalRepoCount,
    SearchControls,
    SearchResults,
    SearchStats,
    Gallery,
    FooterStats,
}

impl PanelId {
    pub const ALL: [PanelId; 14] = [
        PanelId::ProfileStats,
        PanelId::HomePosts,
        PanelId::HomePagination,
        PanelId::HomeRepos,
        PanelId::HomeGallery,
        PanelId::RepoNotice,
        PanelId::RepoGrid,
        PanelId::RepoPagination,
        PanelId::TotalRepoCount,
        PanelId::SearchControls,
        PanelId::SearchResults,
        PanelId::SearchStats,
        PanelId::Gallery,
        PanelId::FooterStats,
    ];

    /// DOM id of the container
    pub fn element_id(&self) -> &'static str {
        match self {
            PanelId::ProfileStats => "profileStats",
            PanelId::HomePosts => "homePostsContainer",
            PanelId::HomePagination => "homePagination",
            PanelId::HomeRepos => "homeGithubContainer",
            PanelId::HomeGallery => "homeGalleryContainer",
            PanelId::RepoNotice => "githubNotice",
            PanelId::RepoGrid => "githubRepos",
            PanelId::RepoPagination => "pagination",
            PanelId::TotalRepoCount => "totalRepoCount",
            PanelId::SearchControls => "searchControls",
            PanelId::SearchResults => "searchResults",
            PanelId::SearchStats => "searchStats",
            PanelId::Gallery => "galleryContainer",
            PanelId::FooterStats => "footerStats",
        }
    }
}

impl FromStr for PanelId {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelId::ALL
            .into_iter()
            .find(|panel| panel.element_id() == s)
            .ok_or_else(|| PortfolioError::NotFound(format!("Unknown panel: {}", s)))
    }
}

/// Rendered content of every mounted panel.
///
/// `replace` swaps a panel's whole content. Writes to a panel that is not
/// mounted are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Panels {
    containers: BTreeMap<PanelId, String>,
}

impl Panels {
    /// Every known panel mounted and empty
    pub fn mounted() -> Self {
        Self {
            containers: PanelId::ALL
                .into_iter()
                .map(|panel| (panel, String::new()))
                .collect(),
        }
    }

    pub fn mount(&mut self, panel: PanelId) {
        self.containers.entry(panel).or_default();
    }

    pub fn unmount(&mut self, panel: PanelId) {
        self.containers.remove(&panel);
    }

    pub fn is_mounted(&self, panel: PanelId) -> bool {
        self.containers.contains_key(&panel)
    }

    /// Returns whether the write landed
    pub fn replace(&mut self, panel: PanelId, markup: impl Into<String>) -> bool {
        match self.containers.get_mut(&panel) {
            Some(content) => {
                *content = markup.into();
                true
            }
            None => {
                debug!(panel = panel.element_id(), "Ignoring write to unmounted panel");
                false
            }
        }
    }

    pub fn get(&self, panel: PanelId) -> Option<&str> {
        self.containers.get(&panel).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PanelId, &str)> {
        self.containers.iter().map(|(panel, content)| (*panel, content.as_str()))
    }
}
