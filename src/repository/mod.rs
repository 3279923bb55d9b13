use async_trait::async_trait;
use serde::Serialize;

use crate::domain::filter::FilterDescriptor;
use crate::domain::listing::{ListingKind, ListingResult, ParamStyle};
use crate::repository::errors::FetchResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod response;

pub use http::HttpListingRepository;

/// Canonical parameter set sent to a collection endpoint.
///
/// Absent filters are carried as empty strings so every request has the same
/// shape regardless of which filters the user touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    pub page: usize,
    pub par_page: usize,
    pub search_value: String,
    pub category: String,
    pub rating: String,
    pub low: String,
    pub high: String,
    pub sort_price: String,
}

impl RequestParams {
    /// Unfiltered request for the given page.
    pub fn new(page: usize, par_page: usize) -> Self {
        Self {
            page: page.max(1),
            par_page: par_page.max(1),
            search_value: String::new(),
            category: String::new(),
            rating: String::new(),
            low: String::new(),
            high: String::new(),
            sort_price: String::new(),
        }
    }

    /// Maps a filter snapshot plus page size to request parameters.
    pub fn build(filters: &FilterDescriptor, par_page: usize) -> Self {
        Self {
            page: filters.page_number.max(1),
            par_page: par_page.max(1),
            search_value: filters.search_value.clone(),
            category: filters.category.clone(),
            rating: filters.rating.map(|r| r.to_string()).unwrap_or_default(),
            low: filters.price_low.map(|p| p.to_string()).unwrap_or_default(),
            high: filters.price_high.map(|p| p.to_string()).unwrap_or_default(),
            sort_price: filters.sort_price.as_str().to_string(),
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_value = term.into();
        self
    }

    pub fn paginate(mut self, page: usize, par_page: usize) -> Self {
        self.page = page.max(1);
        self.par_page = par_page.max(1);
        self
    }

    /// Query-string pairs in the dialect of the target endpoint.
    pub fn query_pairs(&self, style: ParamStyle) -> Vec<(&'static str, String)> {
        match style {
            ParamStyle::Storefront => vec![
                ("category", self.category.clone()),
                ("rating", self.rating.clone()),
                ("lowPrice", self.low.clone()),
                ("highPrice", self.high.clone()),
                ("sortPrice", self.sort_price.clone()),
                ("pageNumber", self.page.to_string()),
                ("parPage", self.par_page.to_string()),
                ("searchValue", self.search_value.clone()),
            ],
            ParamStyle::Dashboard => vec![
                ("page", self.page.to_string()),
                ("parPage", self.par_page.to_string()),
                ("searchValue", self.search_value.clone()),
                ("category", self.category.clone()),
                ("rating", self.rating.clone()),
                ("low", self.low.clone()),
                ("high", self.high.clone()),
                ("sortPrice", self.sort_price.clone()),
            ],
        }
    }
}

/// Listing fetcher seam: executes request parameters against the collection
/// endpoint of a listing and normalizes the response.
#[async_trait]
pub trait ListingReader: Send + Sync {
    async fn fetch_listing(
        &self,
        kind: ListingKind,
        params: &RequestParams,
    ) -> FetchResult<ListingResult>;
}
