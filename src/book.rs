use serde::Deserialize;
use serde::Serialize;

use crate::volume::{ImageLinks, RawCatalogItem, VolumeInfo};

pub const UNKNOWN_ID: &str = "unknown";
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_DATE: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const UNKNOWN_PUBLISHER: &str = "Unknown Publisher";
pub const DEFAULT_LANGUAGE: &str = "en";

const MAX_STARS: u8 = 5;

/// A catalog volume with every field populated, ready for display.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    /// Never empty.
    pub authors: Vec<String>,
    pub published_date: String,
    pub description: String,
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
    pub average_rating: f64,
    pub ratings_count: u64,
    pub page_count: u64,
    pub categories: Vec<String>,
    pub publisher: String,
    pub language: String,
    pub preview_link: Option<String>,
    pub info_link: Option<String>,
}

/// Star slots for a 0-5 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stars {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

/// Builds a `Book` from whatever the provider sent, filling every missing
/// field with its default. Total: no input shape makes it fail.
pub fn normalize(raw: Option<&RawCatalogItem>) -> Book {
    let empty_info = VolumeInfo::default();
    let info = match raw.and_then(|r| r.volume_info.as_ref()) {
        Some(info) => info,
        None => {
            tracing::trace!(id = ?raw.and_then(|r| r.id.as_deref()), "volume without volume info");
            &empty_info
        }
    };
    let links = info.image_links.as_ref();

    Book {
        id: text(raw.and_then(|r| r.id.as_deref()), UNKNOWN_ID),
        title: text(info.title.as_deref(), UNKNOWN_TITLE),
        authors: authors(info.authors.as_deref()),
        published_date: text(info.published_date.as_deref(), UNKNOWN_DATE),
        description: text(info.description.as_deref(), NO_DESCRIPTION),
        image_url: links.and_then(|l| secure_url(l.thumbnail.as_deref())),
        large_image_url: links.and_then(largest_image),
        average_rating: info.average_rating.unwrap_or_default(),
        ratings_count: info.ratings_count.unwrap_or_default(),
        page_count: info.page_count.unwrap_or_default(),
        categories: info.categories.clone().unwrap_or_default(),
        publisher: text(info.publisher.as_deref(), UNKNOWN_PUBLISHER),
        language: text(info.language.as_deref(), DEFAULT_LANGUAGE),
        preview_link: present(info.preview_link.as_deref()).map(str::to_string),
        info_link: present(info.info_link.as_deref()).map(str::to_string),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn text(value: Option<&str>, default: &str) -> String {
    present(value).unwrap_or(default).to_string()
}

fn authors(list: Option<&[String]>) -> Vec<String> {
    match list {
        Some(authors) if !authors.is_empty() => authors.to_vec(),
        _ => vec![UNKNOWN_AUTHOR.to_string()],
    }
}

/// Rewrites an `http://` prefix to `https://`.
fn secure_url(url: Option<&str>) -> Option<String> {
    let url = present(url)?;
    Some(match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    })
}

fn largest_image(links: &ImageLinks) -> Option<String> {
    [&links.large, &links.medium, &links.thumbnail]
        .into_iter()
        .find_map(|url| secure_url(url.as_deref()))
}

impl Book {
    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }

    /// `"2020-01-01"` reads as `"2020"`.
    pub fn published_year(&self) -> &str {
        self.published_date
            .split('-')
            .next()
            .unwrap_or(&self.published_date)
    }

    pub fn rating_summary(&self) -> String {
        format!("{:.1} ({} reviews)", self.average_rating, self.ratings_count)
    }

    pub fn stars(&self) -> Stars {
        let rating = self.average_rating.clamp(0.0, f64::from(MAX_STARS));
        let full = rating.floor() as u8;
        let half = full < MAX_STARS && rating.fract() >= 0.5;
        Stars {
            full,
            half,
            empty: MAX_STARS - full - u8::from(half),
        }
    }

    pub fn categories_line(&self) -> Option<String> {
        if self.categories.is_empty() {
            None
        } else {
            Some(self.categories.join(", "))
        }
    }
}
