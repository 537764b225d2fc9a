use std::time::Duration;

use reqwest::{Client, Url};

use crate::{
    config::CatalogConfig,
    error::{CatalogError, CatalogResult},
    volume::{RawCatalogItem, VolumeList},
};

/// The provider rejects `maxResults` outside this range.
pub const MAX_RESULTS_LIMIT: u32 = 40;

pub const FEATURED_QUERY: &str = "subject:fiction";
pub const FEATURED_MAX_RESULTS: u32 = 10;
pub const FEATURED_ORDER_BY: &str = "relevance";

/// Client for the volumes endpoints of the catalog provider.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

pub fn clamp_max_results(max_results: u32) -> u32 {
    max_results.clamp(1, MAX_RESULTS_LIMIT)
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| CatalogError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(base_url.to_string()));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /volumes?q=..`. Elements that are not objects come back as `None`;
    /// a `null` body reads as no items.
    pub async fn search_volumes(
        &self,
        query: &str,
        max_results: u32,
        order_by: Option<&str>,
    ) -> CatalogResult<Vec<Option<RawCatalogItem>>> {
        let url = self.endpoint(&["volumes"])?;
        let max_results = clamp_max_results(max_results).to_string();
        let mut params = vec![
            ("q", query),
            ("maxResults", max_results.as_str()),
            ("printType", "books"),
        ];
        if let Some(order) = order_by {
            params.push(("orderBy", order));
        }
        tracing::debug!("volume search: {} {:?}", url, params);

        let response = self
            .http
            .get(url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;
        let list = response.json::<Option<VolumeList>>().await?.unwrap_or_default();

        tracing::debug!("volume search returned {} items", list.items.len());
        Ok(list.items)
    }

    /// `GET /volumes/{id}`. A `null` body reads as `None`.
    pub async fn get_volume(&self, id: &str) -> CatalogResult<Option<RawCatalogItem>> {
        let url = self.endpoint(&["volumes", id])?;
        tracing::debug!("volume lookup: {}", url);

        let response = self.http.get(url).send().await?.error_for_status()?;
        let item: Option<RawCatalogItem> = response.json().await?;
        Ok(item)
    }
}
