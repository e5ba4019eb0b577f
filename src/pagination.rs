use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PortfolioError;

/// Repository browser page size
pub const REPOS_PER_PAGE: usize = 9;
/// Home commit feed page size
pub const COMMITS_PER_PAGE: usize = 3;

/// A navigation request from the prev/next controls or a direct link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageRequest {
    Prev,
    Next,
    Page(usize),
}

impl FromStr for PageRequest {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev" => Ok(PageRequest::Prev),
            "next" => Ok(PageRequest::Next),
            other => other
                .parse::<usize>()
                .map(PageRequest::Page)
                .map_err(|_| PortfolioError::InvalidRequest(format!("Invalid page request: {}", other))),
        }
    }
}

/// Fixed-size slicing over an ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

/// One page of a list plus the state of its controls
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Controls are hidden entirely when there is nothing to page through
    pub controls_visible: bool,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Clamp `page` into `[1, total_pages]`; an empty list stays on page 1.
    pub fn clamp(&self, len: usize, page: usize) -> usize {
        page.clamp(1, self.total_pages(len).max(1))
    }

    /// Resolve a navigation request against the current page. Requests past
    /// either end leave the page unchanged.
    pub fn navigate(&self, len: usize, current: usize, request: PageRequest) -> usize {
        let current = self.clamp(len, current);
        let target = match request {
            PageRequest::Prev => current.saturating_sub(1),
            PageRequest::Next => current + 1,
            PageRequest::Page(page) => page,
        };
        self.clamp(len, target)
    }

    pub fn view<'a, T>(&self, items: &'a [T], page: usize) -> PageView<'a, T> {
        let total_pages = self.total_pages(items.len());
        let page = self.clamp(items.len(), page);
        let start = ((page - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());

        PageView {
            items: &items[start..end],
            page,
            total_pages,
            prev_enabled: page > 1,
            next_enabled: page < total_pages,
            controls_visible: total_pages > 1,
        }
    }
}
