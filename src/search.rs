use crate::error::PortfolioError;
use crate::models::RepositorySummary;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Created,
    Stars,
    Forks,
    #[default]
    Updated,
}

impl FromStr for SortField {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "created" => Ok(SortField::Created),
            "stars" => Ok(SortField::Stars),
            "forks" => Ok(SortField::Forks),
            "updated" | "" => Ok(SortField::Updated),
            other => Err(PortfolioError::InvalidRequest(format!("Unknown sort field: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" | "" => Ok(SortOrder::Desc),
            other => Err(PortfolioError::InvalidRequest(format!("Unknown sort order: {}", other))),
        }
    }
}

/// Current state of the search controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub language: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
}

impl SearchQuery {
    fn matches(&self, repo: &RepositorySummary) -> bool {
        matches_text(repo, &self.text.trim().to_lowercase())
            && match self.language.as_deref() {
                None | Some("") => true,
                Some(language) => repo.language.as_deref() == Some(language),
            }
    }

    fn compare(&self, a: &RepositorySummary, b: &RepositorySummary) -> Ordering {
        let ordering = match self.sort {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Created => a
                .created_at
                .unwrap_or(a.updated_at)
                .cmp(&b.created_at.unwrap_or(b.updated_at)),
            SortField::Stars => a.stars.cmp(&b.stars),
            SortField::Forks => a.forks.cmp(&b.forks),
            SortField::Updated => a.updated_at.cmp(&b.updated_at),
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// `needle` must already be trimmed and lower-cased.
fn matches_text(repo: &RepositorySummary, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let contains = |field: Option<&str>| {
        field
            .map(|value| value.to_lowercase().contains(needle))
            .unwrap_or(false)
    };

    contains(Some(&repo.name)) || contains(repo.description.as_deref()) || contains(repo.language.as_deref())
}

/// Filter and sort the full list from scratch. The sort is stable, so ties
/// keep their relative order from `all`.
pub fn filter_and_sort(all: &[RepositorySummary], query: &SearchQuery) -> Vec<RepositorySummary> {
    let mut filtered: Vec<RepositorySummary> = all
        .iter()
        .filter(|repo| query.matches(repo))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| query.compare(a, b));
    filtered
}

/// Distinct languages in first-seen order, for the language select
pub fn languages(all: &[RepositorySummary]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for language in all.iter().filter_map(|repo| repo.language.as_ref()) {
        if !seen.contains(language) {
            seen.push(language.clone());
        }
    }
    seen
}
