mod common;

use common::{at, repo};
use portfolio_server::models::RepositorySummary;
use portfolio_server::search::{filter_and_sort, languages, SearchQuery, SortField, SortOrder};

fn sample() -> Vec<RepositorySummary> {
    let mut cad = repo("cad-drawings", Some("Python"), 4, at(2024, 3, 1));
    cad.description = Some("Technical drawings".to_string());

    let mut web = repo("portfolio", Some("HTML"), 10, at(2024, 5, 1));
    web.description = Some("Personal website".to_string());

    let mut rust = repo("Rust_study", Some("Rust"), 1, at(2024, 4, 1));
    rust.forks = 5;
    rust.created_at = Some(at(2020, 1, 1));

    let notes = repo("notes", None, 4, at(2024, 2, 1));

    vec![cad, web, rust, notes]
}

fn names(repos: &[RepositorySummary]) -> Vec<&str> {
    repos.iter().map(|r| r.name.as_str()).collect()
}

fn query(text: &str) -> SearchQuery {
    SearchQuery {
        text: text.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_cad_query_matches_single_repo() {
    let results = filter_and_sort(&sample(), &query("cad"));
    assert_eq!(names(&results), vec!["cad-drawings"]);

    let results = filter_and_sort(&sample(), &query("  CAD "));
    assert_eq!(names(&results), vec!["cad-drawings"]);
}

#[test]
fn test_text_matches_description_and_language() {
    assert_eq!(names(&filter_and_sort(&sample(), &query("website"))), vec!["portfolio"]);
    assert_eq!(names(&filter_and_sort(&sample(), &query("rust"))), vec!["Rust_study"]);
    assert_eq!(names(&filter_and_sort(&sample(), &query("html"))), vec!["portfolio"]);
}

#[test]
fn test_empty_query_matches_everything() {
    assert_eq!(filter_and_sort(&sample(), &query("")).len(), 4);
}

#[test]
fn test_language_filter_is_exact() {
    let q = SearchQuery {
        language: Some("Rust".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&filter_and_sort(&sample(), &q)), vec!["Rust_study"]);

    let q = SearchQuery {
        language: Some("rust".to_string()),
        ..Default::default()
    };
    assert!(filter_and_sort(&sample(), &q).is_empty());

    let q = SearchQuery {
        language: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(filter_and_sort(&sample(), &q).len(), 4);
}

#[test]
fn test_results_are_subset_of_input() {
    let all = sample();
    for text in ["", "a", "o", "zzz", "rust", "drawings"] {
        for sort in [SortField::Name, SortField::Created, SortField::Stars, SortField::Forks, SortField::Updated] {
            let q = SearchQuery {
                text: text.to_string(),
                sort,
                ..Default::default()
            };
            for result in filter_and_sort(&all, &q) {
                assert!(all.contains(&result));
            }
        }
    }
}

#[test]
fn test_default_sort_is_updated_descending() {
    let results = filter_and_sort(&sample(), &SearchQuery::default());
    assert_eq!(names(&results), vec!["portfolio", "Rust_study", "cad-drawings", "notes"]);
}

#[test]
fn test_name_sort_ignores_case() {
    let q = SearchQuery {
        sort: SortField::Name,
        order: SortOrder::Asc,
        ..Default::default()
    };
    let results = filter_and_sort(&sample(), &q);
    assert_eq!(names(&results), vec!["cad-drawings", "notes", "portfolio", "Rust_study"]);
}

#[test]
fn test_created_sort_falls_back_to_updated() {
    let q = SearchQuery {
        sort: SortField::Created,
        order: SortOrder::Asc,
        ..Default::default()
    };
    let results = filter_and_sort(&sample(), &q);
    // Rust_study was created in 2020; the others only have update dates
    assert_eq!(names(&results), vec!["Rust_study", "notes", "cad-drawings", "portfolio"]);
}

#[test]
fn test_sort_is_stable_for_ties() {
    // cad-drawings and notes both have 4 stars
    let desc = SearchQuery {
        sort: SortField::Stars,
        order: SortOrder::Desc,
        ..Default::default()
    };
    assert_eq!(
        names(&filter_and_sort(&sample(), &desc)),
        vec!["portfolio", "cad-drawings", "notes", "Rust_study"]
    );

    let asc = SearchQuery {
        sort: SortField::Stars,
        order: SortOrder::Asc,
        ..Default::default()
    };
    assert_eq!(
        names(&filter_and_sort(&sample(), &asc)),
        vec!["Rust_study", "cad-drawings", "notes", "portfolio"]
    );
}

#[test]
fn test_fork_sort() {
    let q = SearchQuery {
        sort: SortField::Forks,
        ..Default::default()
    };
    assert_eq!(filter_and_sort(&sample(), &q)[0].name, "Rust_study");
}

#[test]
fn test_languages_are_distinct_in_first_seen_order() {
    let mut all = sample();
    all.push(repo("more-python", Some("Python"), 0, at(2023, 1, 1)));
    assert_eq!(languages(&all), vec!["Python", "HTML", "Rust"]);
}

#[test]
fn test_sort_parsing() {
    assert_eq!("stars".parse::<SortField>().unwrap(), SortField::Stars);
    assert_eq!("".parse::<SortField>().unwrap(), SortField::Updated);
    assert!("popularity".parse::<SortField>().is_err());
    assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
    assert!("up".parse::<SortOrder>().is_err());
}
