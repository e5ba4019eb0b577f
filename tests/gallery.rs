use portfolio_server::gallery::{
    catalog, filter, home_sample, sample, CategoryFilter, GalleryCategory, HOME_GALLERY_SIZE,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[test]
fn test_catalog_groups() {
    let images = catalog();
    assert_eq!(images.len(), 15);

    let count = |category| filter(&images, CategoryFilter::Only(category)).len();
    assert_eq!(count(GalleryCategory::Anatomy), 3);
    assert_eq!(count(GalleryCategory::Comic), 5);
    assert_eq!(count(GalleryCategory::Person), 6);
    assert_eq!(count(GalleryCategory::Cad), 1);
}

#[test]
fn test_image_paths_follow_category() {
    for image in catalog() {
        assert!(
            image.path.starts_with(&format!("gallery/{}/", image.category.slug())),
            "{}",
            image.path
        );
    }
}

#[test]
fn test_all_filter_keeps_everything() {
    let images = catalog();
    assert_eq!(filter(&images, CategoryFilter::All), images);
}

#[test]
fn test_sample_is_distinct_subset() {
    let images = catalog();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let picked = sample(&images, HOME_GALLERY_SIZE, &mut rng);
        assert_eq!(picked.len(), HOME_GALLERY_SIZE);

        let paths: HashSet<&str> = picked.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths.len(), HOME_GALLERY_SIZE);
        assert!(picked.iter().all(|i| images.contains(i)));
    }
}

#[test]
fn test_sample_is_reproducible_with_seed() {
    let images = catalog();
    let first = sample(&images, 5, &mut StdRng::seed_from_u64(42));
    let second = sample(&images, 5, &mut StdRng::seed_from_u64(42));
    assert_eq!(first, second);
}

#[test]
fn test_sample_larger_than_catalog() {
    let images = filter(&catalog(), CategoryFilter::Only(GalleryCategory::Anatomy));
    let picked = sample(&images, 10, &mut StdRng::seed_from_u64(1));
    assert_eq!(picked.len(), 3);
}

#[test]
fn test_home_sample_size() {
    assert_eq!(home_sample().len(), HOME_GALLERY_SIZE);
}

#[test]
fn test_category_parsing() {
    assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
    assert_eq!(
        "cad".parse::<CategoryFilter>().unwrap(),
        CategoryFilter::Only(GalleryCategory::Cad)
    );
    assert!("sculpture".parse::<CategoryFilter>().is_err());
}
