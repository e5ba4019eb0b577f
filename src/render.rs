//! HTML fragments for every panel.
//!
//! Each function builds a panel's complete content; nothing is patched in
//! place. Optional fields that are missing drop their markup block instead
//! of rendering an empty placeholder. All interpolated text is escaped.

use crate::gallery::{self, CategoryFilter, GalleryCategory, GalleryImage};
use crate::models::{CommitEntry, RepositorySummary, Resolved, UserProfile};
use crate::pagination::PageView;
use crate::panels::{PanelId, Panels};
use crate::search::{languages, SearchQuery, SortField, SortOrder};
use crate::state::{ListKind, Tab, ViewState};
use crate::time_ago::time_ago;
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

pub const DEFAULT_LANGUAGE_COLOR: &str = "#8e8e8e";
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/40/4A90E2/FFFFFF?text=A";
/// Rough commits-per-repository figure used by the footer
const ESTIMATED_COMMITS_PER_REPO: usize = 15;

pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "C" => "#555555",
        "C++" => "#f34b7d",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Shell" => "#89e051",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "PHP" => "#4F5D95",
        "Swift" => "#ffac45",
        "Kotlin" => "#A97BFF",
        "Dart" => "#00B4AB",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}

pub fn empty_message(message: &str) -> String {
    format!(r#"<p class="empty-message">{}</p>"#, text(message))
}

pub fn fallback_notice() -> String {
    r#"<div class="fallback-notice" role="status">GitHub API is temporarily unavailable, showing sample data.</div>"#
        .to_string()
}

fn notice_for<T>(resolved: &Resolved<T>) -> String {
    if resolved.is_fallback() {
        fallback_notice()
    } else {
        String::new()
    }
}

pub fn repo_card(repo: &RepositorySummary, now: DateTime<Utc>, compact: bool) -> String {
    let class = if compact { "repo-card compact" } else { "repo-card" };

    let description = repo
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="repo-description">{}</p>"#, text(d)))
        .unwrap_or_default();

    let language = repo
        .language
        .as_deref()
        .map(|l| {
            format!(
                r#"<div class="repo-stat"><span class="language-color" style="background-color: {}"></span>{}</div>"#,
                language_color(l),
                text(l)
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            r#"<div class="{class}">"#,
            r#"<div class="repo-header"><a href="{url}" target="_blank" class="repo-name">{name}</a>"#,
            r#"<span class="repo-visibility">{visibility}</span></div>"#,
            "{description}",
            r#"<div class="repo-stats">{language}"#,
            r#"<div class="repo-stat"><i class="fas fa-star"></i>{stars}</div>"#,
            r#"<div class="repo-stat"><i class="fas fa-code-branch"></i>{forks}</div></div>"#,
            r#"<div class="repo-updated">Updated {updated}</div>"#,
            "</div>"
        ),
        class = class,
        url = attr(&repo.url),
        name = text(&repo.name),
        visibility = repo.visibility.label(),
        description = description,
        language = language,
        stars = repo.stars,
        forks = repo.forks,
        updated = time_ago(repo.updated_at, now),
    )
}

pub fn repo_cards(repos: &[RepositorySummary], now: DateTime<Utc>, compact: bool) -> String {
    repos.iter().map(|repo| repo_card(repo, now, compact)).collect()
}

pub fn commit_post(entry: &CommitEntry, login: &str, avatar_url: &str) -> String {
    let language = entry.repo.language.as_deref().unwrap_or("Mixed Languages");
    let description = entry
        .repo
        .description
        .as_deref()
        .map(|d| format!(r#"<br><span class="code-preview-description">{}</span>"#, text(d)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<div class="post-card">"#,
            r#"<div class="post-header"><img src="{avatar}" alt="Profile">"#,
            r#"<div><h4>{login}</h4><span>{age}</span></div></div>"#,
            r#"<div class="post-content"><p>{message}</p>"#,
            r#"<div class="post-image"><div class="code-preview"><span>// {repo} - {language}</span>{description}</div></div>"#,
            r#"<div class="post-link"><a href="{url}" target="_blank"><i class="fab fa-github"></i> View repository</a></div>"#,
            "</div></div>"
        ),
        avatar = attr(avatar_url),
        login = text(login),
        age = text(&entry.age_label),
        message = text(entry.headline()),
        repo = text(&entry.repo.name),
        language = text(language),
        description = description,
        url = attr(&entry.repo.url),
    )
}

pub fn profile_stats(profile: &UserProfile) -> String {
    format!(
        concat!(
            r#"<img id="profileImg" src="{avatar}" alt="{login}">"#,
            r#"<div class="stat"><span id="repoCount">{repos}</span> repositories</div>"#,
            r#"<div class="stat"><span id="followerCount">{followers}</span> followers</div>"#,
            r#"<div class="stat"><span id="followingCount">{following}</span> following</div>"#
        ),
        avatar = attr(&profile.avatar_url),
        login = attr(&profile.login),
        repos = profile.public_repos,
        followers = profile.followers,
        following = profile.following,
    )
}

pub fn pagination_controls<T>(view: &PageView<'_, T>, list: ListKind) -> String {
    if !view.controls_visible {
        return String::new();
    }

    let slug = match list {
        ListKind::Repos => "repos",
        ListKind::Commits => "commits",
    };
    let button = |request: &str, label: &str, enabled: bool| {
        if enabled {
            format!(r#"<a class="page-btn" href="/navigate/{}/{}">{}</a>"#, slug, request, label)
        } else {
            format!(r#"<a class="page-btn disabled" aria-disabled="true">{}</a>"#, label)
        }
    };

    format!(
        concat!(
            r#"<nav class="pagination">"#,
            "{prev}",
            r#"<span class="page-info"><span class="current-page">{page}</span> / <span class="total-pages">{total}</span></span>"#,
            "{next}",
            "</nav>"
        ),
        prev = button("prev", "Prev", view.prev_enabled),
        page = view.page,
        total = view.total_pages,
        next = button("next", "Next", view.next_enabled),
    )
}

pub fn gallery_item(image: &GalleryImage, compact: bool) -> String {
    let class = if compact { "gallery-item compact" } else { "gallery-item" };
    format!(
        concat!(
            r#"<div class="{class}">"#,
            r#"<img src="{path}" alt="{alt}" onerror="this.style.display='none'">"#,
            r#"<div class="gallery-overlay"><p>{title}</p><span class="category-tag">{category}</span></div>"#,
            "</div>"
        ),
        class = class,
        path = attr(&image.path),
        alt = attr(&image.title),
        title = text(&image.title),
        category = image.category.display_name(),
    )
}

pub fn gallery_grid(images: &[GalleryImage], compact: bool) -> String {
    if images.is_empty() {
        return empty_message("No images to show.");
    }
    images.iter().map(|image| gallery_item(image, compact)).collect()
}

pub fn gallery_categories(selected: CategoryFilter) -> String {
    let filters = std::iter::once(CategoryFilter::All)
        .chain(GalleryCategory::ALL.into_iter().map(CategoryFilter::Only));

    filters
        .map(|filter| {
            let label = match filter {
                CategoryFilter::All => "All",
                CategoryFilter::Only(category) => category.display_name(),
            };
            let active = if filter == selected { " active" } else { "" };
            format!(
                r#"<a class="category-btn{}" data-category="{}" href="/gallery?category={}">{}</a>"#,
                active,
                filter.slug(),
                filter.slug(),
                label
            )
        })
        .collect()
}

pub fn search_controls(query: &SearchQuery, all: &[RepositorySummary]) -> String {
    let options: String = languages(all)
        .iter()
        .map(|language| {
            let selected = if query.language.as_deref() == Some(language.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                attr(language),
                selected,
                text(language)
            )
        })
        .collect();

    let sort_options: String = [
        (SortField::Updated, "updated", "Recently updated"),
        (SortField::Created, "created", "Created"),
        (SortField::Name, "name", "Name"),
        (SortField::Stars, "stars", "Stars"),
        (SortField::Forks, "forks", "Forks"),
    ]
    .into_iter()
    .map(|(field, value, label)| {
        let selected = if query.sort == field { " selected" } else { "" };
        format!(r#"<option value="{}"{}>{}</option>"#, value, selected, label)
    })
    .collect();

    let (asc, desc) = match query.order {
        SortOrder::Asc => (" selected", ""),
        SortOrder::Desc => ("", " selected"),
    };

    format!(
        concat!(
            r#"<form class="search-controls" action="/search" method="get">"#,
            r#"<input id="githubSearch" name="q" type="search" value="{q}" placeholder="Search repositories">"#,
            r#"<select id="languageFilter" name="language"><option value="">All languages</option>{options}</select>"#,
            r#"<select id="sortBy" name="sort">{sort_options}</select>"#,
            r#"<select id="orderBy" name="order"><option value="desc"{desc}>Descending</option><option value="asc"{asc}>Ascending</option></select>"#,
            "</form>"
        ),
        q = attr(&query.text),
        options = options,
        sort_options = sort_options,
        desc = desc,
        asc = asc,
    )
}

pub fn search_results(results: &[RepositorySummary], now: DateTime<Utc>) -> String {
    if results.is_empty() {
        return concat!(
            r#"<div class="search-placeholder"><h3>No results</h3>"#,
            "<p>Try a different search term or filter.</p></div>"
        )
        .to_string();
    }
    repo_cards(results, now, false)
}

pub fn search_stats(shown: usize, total: usize) -> String {
    format!(
        r#"<span id="resultsCount">{}</span> of <span id="totalCount">{}</span> repositories"#,
        shown, total
    )
}

pub fn footer_stats(repo_count: usize) -> String {
    format!(
        r#"<span id="footerRepoCount">{}</span> repositories · <span id="footerCommitCount">{}+</span> commits"#,
        repo_count,
        repo_count * ESTIMATED_COMMITS_PER_REPO
    )
}

fn home_posts(state: &ViewState, panels: &mut Panels) {
    let Some(commits) = state.commits.as_ref() else {
        panels.replace(PanelId::HomePosts, empty_message("Loading recent activity..."));
        return;
    };

    if commits.data.is_empty() {
        panels.replace(PanelId::HomePosts, empty_message("No recent activity to show."));
        panels.replace(PanelId::HomePagination, String::new());
        return;
    }

    let (login, avatar) = match state.profile.as_ref() {
        Some(profile) if !profile.is_fallback() => {
            (profile.data.login.as_str(), profile.data.avatar_url.as_str())
        }
        Some(profile) => (profile.data.login.as_str(), PLACEHOLDER_AVATAR),
        None => ("", PLACEHOLDER_AVATAR),
    };

    let view = ListKind::Commits.paginator().view(&commits.data, state.commit_page);
    let posts: String = view
        .items
        .iter()
        .map(|entry| commit_post(entry, login, avatar))
        .collect();

    panels.replace(PanelId::HomePosts, format!("{}{}", notice_for(commits), posts));
    panels.replace(PanelId::HomePagination, pagination_controls(&view, ListKind::Commits));
}

fn home_repos(state: &ViewState, now: DateTime<Utc>, panels: &mut Panels) {
    let markup = match state.home_repos.as_ref() {
        None => empty_message("Loading repositories..."),
        Some(repos) if repos.data.is_empty() => empty_message("No repositories to show."),
        Some(repos) => format!("{}{}", notice_for(repos), repo_cards(&repos.data, now, true)),
    };
    panels.replace(PanelId::HomeRepos, markup);
}

fn repo_browser(state: &ViewState, now: DateTime<Utc>, panels: &mut Panels) {
    let Some(repos) = state.repos.as_ref() else {
        panels.replace(PanelId::RepoGrid, empty_message("Loading GitHub repositories..."));
        return;
    };

    panels.replace(PanelId::RepoNotice, notice_for(repos));
    panels.replace(PanelId::TotalRepoCount, repos.data.len().to_string());

    if repos.data.is_empty() {
        panels.replace(PanelId::RepoGrid, empty_message("No repositories to show."));
        panels.replace(PanelId::RepoPagination, String::new());
        return;
    }

    let view = ListKind::Repos.paginator().view(&repos.data, state.repo_page);
    panels.replace(PanelId::RepoGrid, repo_cards(view.items, now, false));
    panels.replace(PanelId::RepoPagination, pagination_controls(&view, ListKind::Repos));
}

fn search(state: &ViewState, now: DateTime<Utc>, panels: &mut Panels) {
    let all = state.all_repos();
    panels.replace(PanelId::SearchControls, search_controls(&state.search, all));

    let notice = state.repos.as_ref().map(notice_for).unwrap_or_default();
    panels.replace(
        PanelId::SearchResults,
        format!("{}{}", notice, search_results(&state.filtered, now)),
    );
    panels.replace(PanelId::SearchStats, search_stats(state.filtered.len(), all.len()));
}

/// Build every panel from the view state
pub fn render_panels(state: &ViewState, now: DateTime<Utc>) -> Panels {
    let mut panels = Panels::mounted();

    if let Some(profile) = state.profile.as_ref() {
        panels.replace(PanelId::ProfileStats, profile_stats(&profile.data));
    }

    home_posts(state, &mut panels);
    home_repos(state, now, &mut panels);
    panels.replace(PanelId::HomeGallery, gallery_grid(&state.home_gallery, true));
    repo_browser(state, now, &mut panels);
    search(state, now, &mut panels);

    let images = gallery::filter(&state.gallery_images, state.gallery_filter);
    panels.replace(
        PanelId::Gallery,
        format!(
            r#"<div class="gallery-categories">{}</div>{}"#,
            gallery_categories(state.gallery_filter),
            gallery_grid(&images, false)
        ),
    );

    // The home list is capped, so the profile count stands in until the full list loads
    let repo_count = match (state.repos.as_ref(), state.profile.as_ref()) {
        (Some(repos), _) => repos.data.len(),
        (None, Some(profile)) => profile.data.public_repos as usize,
        (None, None) => state.home_repos.as_ref().map(|repos| repos.data.len()).unwrap_or_default(),
    };
    panels.replace(PanelId::FooterStats, footer_stats(repo_count));

    panels
}

fn tab_panels(tab: Tab) -> &'static [PanelId] {
    match tab {
        Tab::Home => &[
            PanelId::HomePosts,
            PanelId::HomePagination,
            PanelId::HomeRepos,
            PanelId::HomeGallery,
        ],
        Tab::Search => &[
            PanelId::SearchControls,
            PanelId::SearchStats,
            PanelId::SearchResults,
        ],
        Tab::Portfolio => &[],
        Tab::Github => &[
            PanelId::TotalRepoCount,
            PanelId::RepoNotice,
            PanelId::RepoGrid,
            PanelId::RepoPagination,
        ],
        Tab::Gallery => &[PanelId::Gallery],
    }
}

fn section(panels: &Panels, panel: PanelId) -> String {
    format!(
        r#"<div id="{}">{}</div>"#,
        panel.element_id(),
        panels.get(panel).unwrap_or_default()
    )
}

/// Markup of one tab's panels
pub fn render_tab(panels: &Panels, tab: Tab) -> String {
    tab_panels(tab)
        .iter()
        .map(|panel| section(panels, *panel))
        .collect()
}

/// The complete page shell with every tab; only the active tab is shown
pub fn render_document(state: &ViewState, panels: &Panels) -> String {
    let nav: String = Tab::ALL
        .into_iter()
        .map(|tab| {
            let active = if tab == state.active_tab { " active" } else { "" };
            format!(
                r#"<a class="nav-item{}" data-tab="{}" href="/tabs/{}">{}</a>"#,
                active,
                tab.slug(),
                tab.slug(),
                tab.title()
            )
        })
        .collect();

    let tabs: String = Tab::ALL
        .into_iter()
        .map(|tab| {
            let active = if tab == state.active_tab { " active" } else { "" };
            format!(
                r#"<section id="{}" class="tab-content{}">{}</section>"#,
                tab.slug(),
                active,
                render_tab(panels, tab)
            )
        })
        .collect();

    let body_class = if state.dark_mode { "dark-mode" } else { "" };

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8"><title>Portfolio</title>"#,
            r#"<link rel="stylesheet" href="/styles.css"></head>"#,
            r#"<body class="{body_class}">"#,
            r#"<header>{profile}<form action="/theme/toggle" method="post"><button id="themeToggle">Theme</button></form></header>"#,
            r#"<nav class="tabs">{nav}</nav>"#,
            "<main>{tabs}</main>",
            "<footer>{footer}</footer>",
            "</body></html>"
        ),
        body_class = body_class,
        profile = section(panels, PanelId::ProfileStats),
        nav = nav,
        tabs = tabs,
        footer = section(panels, PanelId::FooterStats),
    )
}
