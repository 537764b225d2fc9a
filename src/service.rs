//! Book lookups as the UI sees them: normalized `Book`s or a flat message.

use async_trait::async_trait;

use crate::{
    book::{normalize, Book},
    config::CatalogConfig,
    error::{CatalogError, CatalogResult, ServiceError},
    google_books_api::{CatalogClient, FEATURED_MAX_RESULTS, FEATURED_ORDER_BY, FEATURED_QUERY},
    query::{build_query, SearchMode},
    volume::RawCatalogItem,
};

/// Anything that can answer a search for the orchestration layer.
#[async_trait]
pub trait BookSearch: Send + Sync {
    async fn search(&self, query: &str, mode: SearchMode) -> Result<Vec<Book>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct BookService {
    client: CatalogClient,
    max_results: u32,
}

fn normalize_all(items: Vec<Option<RawCatalogItem>>) -> Vec<Book> {
    items.iter().map(|item| normalize(item.as_ref())).collect()
}

impl BookService {
    pub fn new(client: CatalogClient, max_results: u32) -> Self {
        Self {
            client,
            max_results,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Ok(Self::new(CatalogClient::from_config(config)?, config.max_results))
    }

    /// Searches the catalog. `query` must already be trimmed and non-empty.
    pub async fn search_books(
        &self,
        query: &str,
        mode: SearchMode,
        max_results: Option<u32>,
    ) -> Result<Vec<Book>, ServiceError> {
        let q = build_query(query, mode);
        let max_results = max_results.unwrap_or(self.max_results);
        match self.client.search_volumes(&q, max_results, None).await {
            Ok(items) => Ok(normalize_all(items)),
            Err(e) => Err(log_failure("Error searching books", &e, ServiceError::Search)),
        }
    }

    pub async fn get_book_by_id(&self, id: &str) -> Result<Book, ServiceError> {
        match self.client.get_volume(id).await {
            Ok(item) => Ok(normalize(item.as_ref())),
            Err(e) => Err(log_failure("Error fetching book details", &e, ServiceError::Details)),
        }
    }

    pub async fn get_featured_books(&self) -> Result<Vec<Book>, ServiceError> {
        let result = self
            .client
            .search_volumes(FEATURED_QUERY, FEATURED_MAX_RESULTS, Some(FEATURED_ORDER_BY))
            .await;
        match result {
            Ok(items) => Ok(normalize_all(items)),
            Err(e) => Err(log_failure("Error fetching featured books", &e, ServiceError::Featured)),
        }
    }
}

fn log_failure(context: &str, error: &CatalogError, reported: ServiceError) -> ServiceError {
    tracing::error!("{}: {:?}", context, error);
    reported
}

#[async_trait]
impl BookSearch for BookService {
    async fn search(&self, query: &str, mode: SearchMode) -> Result<Vec<Book>, ServiceError> {
        self.search_books(query, mode, None).await
    }
}
