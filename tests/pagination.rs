use portfolio_server::pagination::{PageRequest, Paginator, REPOS_PER_PAGE};

#[test]
fn test_total_pages_is_ceiling_division() {
    let paginator = Paginator::new(3);
    assert_eq!(paginator.total_pages(0), 0);
    assert_eq!(paginator.total_pages(1), 1);
    assert_eq!(paginator.total_pages(3), 1);
    assert_eq!(paginator.total_pages(4), 2);
    assert_eq!(paginator.total_pages(9), 3);
    assert_eq!(paginator.total_pages(10), 4);
}

#[test]
fn test_ten_items_page_size_nine() {
    let items: Vec<u32> = (1..=10).collect();
    let paginator = Paginator::new(REPOS_PER_PAGE);

    let first = paginator.view(&items, 1);
    assert_eq!(first.items, &items[0..9]);
    assert_eq!(first.total_pages, 2);
    assert!(!first.prev_enabled);
    assert!(first.next_enabled);
    assert!(first.controls_visible);

    let second = paginator.view(&items, 2);
    assert_eq!(second.items, &[10]);
    assert!(second.prev_enabled);
    assert!(!second.next_enabled);
}

#[test]
fn test_first_and_last_page_controls() {
    for len in 1..40usize {
        let items: Vec<usize> = (0..len).collect();
        let paginator = Paginator::new(4);
        let total = paginator.total_pages(len);

        let first = paginator.view(&items, 1);
        assert!(!first.prev_enabled, "len {}", len);

        let last = paginator.view(&items, total);
        assert!(!last.next_enabled, "len {}", len);
        assert!(!last.items.is_empty(), "len {}", len);
    }
}

#[test]
fn test_empty_list_hides_controls() {
    let items: Vec<u32> = Vec::new();
    let view = Paginator::new(3).view(&items, 1);

    assert!(view.items.is_empty());
    assert_eq!(view.page, 1);
    assert_eq!(view.total_pages, 0);
    assert!(!view.controls_visible);
    assert!(!view.prev_enabled);
    assert!(!view.next_enabled);
}

#[test]
fn test_single_page_hides_controls() {
    let items = [1, 2];
    let view = Paginator::new(3).view(&items, 1);
    assert!(!view.controls_visible);
}

#[test]
fn test_out_of_range_pages_are_clamped() {
    let items: Vec<u32> = (1..=10).collect();
    let paginator = Paginator::new(3);

    assert_eq!(paginator.view(&items, 0).page, 1);
    assert_eq!(paginator.view(&items, 99).page, 4);
    assert_eq!(paginator.view(&items, 99).items, &[10]);
}

#[test]
fn test_navigation_stays_in_bounds() {
    let paginator = Paginator::new(3);

    assert_eq!(paginator.navigate(10, 1, PageRequest::Prev), 1);
    assert_eq!(paginator.navigate(10, 1, PageRequest::Next), 2);
    assert_eq!(paginator.navigate(10, 4, PageRequest::Next), 4);
    assert_eq!(paginator.navigate(10, 4, PageRequest::Prev), 3);
    assert_eq!(paginator.navigate(10, 2, PageRequest::Page(7)), 4);
    assert_eq!(paginator.navigate(0, 1, PageRequest::Next), 1);
}

#[test]
fn test_page_request_parsing() {
    assert_eq!("prev".parse::<PageRequest>().unwrap(), PageRequest::Prev);
    assert_eq!("next".parse::<PageRequest>().unwrap(), PageRequest::Next);
    assert_eq!("3".parse::<PageRequest>().unwrap(), PageRequest::Page(3));
    assert!("sideways".parse::<PageRequest>().is_err());
}
