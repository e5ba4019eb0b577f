use crate::error::PortfolioError;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of images shown in the home panel
pub const HOME_GALLERY_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    Anatomy,
    Comic,
    Person,
    Cad,
}

impl GalleryCategory {
    pub const ALL: [GalleryCategory; 4] = [
        GalleryCategory::Anatomy,
        GalleryCategory::Comic,
        GalleryCategory::Person,
        GalleryCategory::Cad,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            GalleryCategory::Anatomy => "anatomy",
            GalleryCategory::Comic => "comic",
            GalleryCategory::Person => "person",
            GalleryCategory::Cad => "cad",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GalleryCategory::Anatomy => "Anatomy",
            GalleryCategory::Comic => "Comic",
            GalleryCategory::Person => "Portrait",
            GalleryCategory::Cad => "CAD",
        }
    }
}

impl fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Category selection in the gallery tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(GalleryCategory),
}

impl CategoryFilter {
    pub fn slug(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.slug(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "" => Ok(CategoryFilter::All),
            other => GalleryCategory::ALL
                .into_iter()
                .find(|category| category.slug() == other)
                .map(CategoryFilter::Only)
                .ok_or_else(|| PortfolioError::InvalidRequest(format!("Unknown gallery category: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub category: GalleryCategory,
    pub path: String,
    pub title: String,
}

impl GalleryImage {
    fn new(category: GalleryCategory, file: &str, title: &str) -> Self {
        Self {
            category,
            path: format!("gallery/{}/{}", category.slug(), file),
            title: title.to_string(),
        }
    }
}

/// The full static catalog, grouped by category in display order
pub fn catalog() -> Vec<GalleryImage> {
    use GalleryCategory::{Anatomy, Cad, Comic, Person};

    vec![
        GalleryImage::new(Anatomy, "다리.jpg", "Leg anatomy study"),
        GalleryImage::new(Anatomy, "몸통.jpg", "Torso anatomy study"),
        GalleryImage::new(Anatomy, "팔.jpg", "Arm anatomy study"),
        GalleryImage::new(Comic, "베놈.jpg", "Venom drawing #1"),
        GalleryImage::new(Comic, "베놈2.jpg", "Venom drawing #2"),
        GalleryImage::new(Comic, "베인.jpg", "Bane illustration"),
        GalleryImage::new(Comic, "베트맨.jpg", "Batman drawing"),
        GalleryImage::new(Comic, "카니지.jpg", "Carnage illustration"),
        GalleryImage::new(Person, "소녀.jpg", "Girl drawing #1"),
        GalleryImage::new(Person, "소녀2.jpg", "Girl drawing #2"),
        GalleryImage::new(Person, "소녀3.jpg", "Girl drawing #3"),
        GalleryImage::new(Person, "유튜버 주깡깡.jpg", "YouTuber Jukkangkkang fan art"),
        GalleryImage::new(Person, "인물화.jpg", "Portrait practice"),
        GalleryImage::new(Person, "인물화2.jpg", "Portrait study"),
        GalleryImage::new(Cad, "AutoCAD.jpg", "AutoCAD drafting"),
    ]
}

pub fn filter(images: &[GalleryImage], filter: CategoryFilter) -> Vec<GalleryImage> {
    match filter {
        CategoryFilter::All => images.to_vec(),
        CategoryFilter::Only(category) => images
            .iter()
            .filter(|image| image.category == category)
            .cloned()
            .collect(),
    }
}

/// Random selection of up to `count` images
pub fn sample<R: Rng + ?Sized>(images: &[GalleryImage], count: usize, rng: &mut R) -> Vec<GalleryImage> {
    images.choose_multiple(rng, count).cloned().collect()
}

pub fn home_sample() -> Vec<GalleryImage> {
    sample(&catalog(), HOME_GALLERY_SIZE, &mut rand::rng())
}
