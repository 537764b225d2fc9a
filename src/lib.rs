//! Book search against the Google Books volumes API.
//!
//! Raw volumes are decoded leniently (`volume`), normalized into fully
//! populated [`Book`]s (`book`) and served through [`BookService`]. The
//! `search` module runs the debounced search-as-you-type flow on top.

pub mod book;
pub mod config;
pub mod error;
pub mod google_books_api;
pub mod query;
pub mod search;
pub mod service;
pub mod volume;

pub use book::{normalize, Book};
pub use config::CatalogConfig;
pub use error::{CatalogError, ServiceError};
pub use query::{build_query, SearchMode};
pub use service::{BookSearch, BookService};
