//! Error types for the catalog client and the book service

use thiserror::Error;

/// Failure talking to the catalog provider. Carries the detail that gets
/// logged; callers of the service never see it.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid catalog url: {0}")]
    InvalidUrl(String),
}

/// What the UI is told when a service call fails.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Failed to search books. Please check your connection.")]
    Search,

    #[error("Failed to fetch book details. Please try again.")]
    Details,

    #[error("Failed to fetch featured books.")]
    Featured,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown search mode: {0:?}")]
pub struct UnknownSearchMode(pub String);

pub type CatalogResult<T> = Result<T, CatalogError>;
