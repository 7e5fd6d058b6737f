//! Read-only views over the gallery.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use studio_shared::{ImageKind, ImageRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Generated,
    Uploaded,
}

impl KindFilter {
    fn matches(&self, kind: ImageKind) -> bool {
        match self {
            Self::All => true,
            Self::Generated => kind == ImageKind::Generated,
            Self::Uploaded => kind == ImageKind::Uploaded,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GallerySort {
    #[default]
    Newest,
    Oldest,
    Name,
}

/// Search, kind filter and ordering for the gallery page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryQuery {
    /// Case-insensitive substring matched against the prompt (or name).
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub kind: KindFilter,
    #[serde(default)]
    pub sort: GallerySort,
}

impl GalleryQuery {
    pub fn apply<'a>(&self, gallery: &'a [ImageRecord]) -> Vec<&'a ImageRecord> {
        let needle = self.search.trim().to_lowercase();
        let mut hits: Vec<&ImageRecord> = gallery
            .iter()
            .filter(|img| needle.is_empty() || img.label().to_lowercase().contains(&needle))
            .filter(|img| self.kind.matches(img.kind))
            .collect();

        match self.sort {
            GallerySort::Newest => hits.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            GallerySort::Oldest => hits.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            GallerySort::Name => hits.sort_by(|a, b| compare_names(a, b)),
        }
        hits
    }
}

fn sort_name(img: &ImageRecord) -> &str {
    img.name
        .as_deref()
        .or(img.prompt.as_deref())
        .unwrap_or("")
}

fn compare_names(a: &ImageRecord, b: &ImageRecord) -> Ordering {
    let (a, b) = (sort_name(a), sort_name(b));
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub all: usize,
    pub generated: usize,
    pub uploaded: usize,
}

pub fn count_by_kind(gallery: &[ImageRecord]) -> KindCounts {
    gallery.iter().fold(
        KindCounts {
            all: gallery.len(),
            ..Default::default()
        },
        |mut counts, img| {
            match img.kind {
                ImageKind::Generated => counts.generated += 1,
                ImageKind::Uploaded => counts.uploaded += 1,
            }
            counts
        },
    )
}
