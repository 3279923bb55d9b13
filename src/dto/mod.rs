//! DTOs that bridge services with templates and the JSON API.

use serde::Serialize;

use crate::domain::filter::FilterDescriptor;
use crate::domain::listing::{Item, ListingKind};
use crate::pagination::Paginated;
use crate::repository::errors::ListingFetchError;
use crate::services::listing::ListingSnapshot;

/// Data required to render a listing page.
#[derive(Debug)]
pub struct ListingPageData {
    pub kind: ListingKind,
    /// Items of the current page together with the page-button window.
    pub items: Paginated<Item>,
    /// Filters echoed back to the template.
    pub filters: FilterDescriptor,
    pub par_page: usize,
    /// Failure of the fetch backing this page, if any.
    pub error: Option<ListingFetchError>,
}

impl From<ListingSnapshot> for ListingPageData {
    fn from(snapshot: ListingSnapshot) -> Self {
        let error = snapshot.error().cloned();
        Self {
            kind: snapshot.kind,
            items: Paginated::new(snapshot.items, &snapshot.page),
            filters: snapshot.filters,
            par_page: snapshot.page.par_page,
            error,
        }
    }
}

/// Payload returned by the JSON listing endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingApiResponse {
    pub items: Vec<Item>,
    pub total_item: usize,
    pub par_page: usize,
    pub page: usize,
    pub pages: Vec<usize>,
    pub show_previous: bool,
    pub show_next: bool,
}

impl From<ListingPageData> for ListingApiResponse {
    fn from(data: ListingPageData) -> Self {
        let Paginated {
            items,
            pages,
            page,
            total_item,
            show_previous,
            show_next,
            ..
        } = data.items;

        Self {
            items,
            total_item,
            par_page: data.par_page,
            page,
            pages,
            show_previous,
            show_next,
        }
    }
}
