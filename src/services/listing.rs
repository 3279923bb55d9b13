//! Per-listing view state.
//!
//! A [`ListingView`] owns the filters and pagination of one listing. Every
//! change that requires new data hands out a [`FetchTicket`] tagged with a
//! monotonically increasing sequence number. Only the ticket issued last may
//! update the view; anything older is dropped with
//! [`StaleResponseDiscarded`], so out-of-order responses never overwrite
//! newer state.

use serde::Serialize;
use thiserror::Error;

use crate::domain::filter::FilterDescriptor;
use crate::domain::listing::{Item, ListingKind, ListingResult};
use crate::domain::types::{PriceRange, Rating, SortPrice};
use crate::pagination::{PageState, PageWindow};
use crate::repository::errors::{FetchResult, ListingFetchError};
use crate::repository::{ListingReader, RequestParams};

/// Upper bound on follow-up fetches issued after the page number had to be
/// re-clamped by a single refresh.
const MAX_RECLAMP_FOLLOWUPS: usize = 3;

/// Lifecycle of a listing view.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ListingStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(ListingFetchError),
}

/// A resolved fetch was superseded by a newer request and ignored.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("response for request #{seq} superseded by request #{latest}")]
pub struct StaleResponseDiscarded {
    pub seq: u64,
    pub latest: u64,
}

/// Immutable request snapshot handed to whoever performs the fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket {
    seq: u64,
    kind: ListingKind,
    filters: FilterDescriptor,
    params: RequestParams,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn filters(&self) -> &FilterDescriptor {
        &self.filters
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }
}

/// Owned copy of everything a renderer needs.
#[derive(Clone, Debug, Serialize)]
pub struct ListingSnapshot {
    pub kind: ListingKind,
    pub filters: FilterDescriptor,
    pub page: PageState,
    pub window: PageWindow,
    pub items: Vec<Item>,
    #[serde(skip)]
    pub status: ListingStatus,
}

impl ListingSnapshot {
    pub fn error(&self) -> Option<&ListingFetchError> {
        match &self.status {
            ListingStatus::Errored(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ListingView {
    kind: ListingKind,
    filters: FilterDescriptor,
    page: PageState,
    items: Vec<Item>,
    status: ListingStatus,
    seq: u64,
}

impl ListingView {
    pub fn new(kind: ListingKind, par_page: usize, show_item: usize) -> Self {
        Self {
            kind,
            filters: FilterDescriptor::default(),
            page: PageState::new(par_page, show_item),
            items: Vec::new(),
            status: ListingStatus::Idle,
            seq: 0,
        }
    }

    /// Starts the view with pre-selected filters (e.g. from a URL).
    #[must_use]
    pub fn with_filters(mut self, filters: FilterDescriptor) -> Self {
        self.page.page_number = filters.page_number.max(1);
        self.filters = filters;
        self
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn filters(&self) -> &FilterDescriptor {
        &self.filters
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn status(&self) -> &ListingStatus {
        &self.status
    }

    pub fn window(&self) -> PageWindow {
        self.page.window()
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        ListingSnapshot {
            kind: self.kind,
            filters: self.filters.clone(),
            page: self.page.clone(),
            window: self.page.window(),
            items: self.items.clone(),
            status: self.status.clone(),
        }
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.seq += 1;
        self.status = ListingStatus::Loading;
        FetchTicket {
            seq: self.seq,
            kind: self.kind,
            filters: self.filters.clone(),
            params: RequestParams::build(&self.filters, self.page.par_page),
        }
    }

    /// Replaces the filters and re-fetches from page 1 when anything changed.
    fn update_filters(
        &mut self,
        update: impl FnOnce(&mut FilterDescriptor),
    ) -> Option<FetchTicket> {
        let mut next = self.filters.clone();
        update(&mut next);
        if next == self.filters {
            return None;
        }
        next.page_number = 1;
        self.filters = next;
        self.page.page_number = 1;
        Some(self.issue_ticket())
    }

    /// Initial fetch when the view is shown.
    pub fn mount(&mut self) -> FetchTicket {
        self.issue_ticket()
    }

    /// Returns to `Idle` and invalidates every outstanding ticket.
    pub fn unmount(&mut self) {
        self.seq += 1;
        self.status = ListingStatus::Idle;
    }

    pub fn set_search(&mut self, value: impl Into<String>) -> Option<FetchTicket> {
        let value = value.into().trim().to_string();
        self.update_filters(|filters| filters.search_value = value)
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> Option<FetchTicket> {
        let category = category.into().trim().to_string();
        self.update_filters(|filters| filters.category = category)
    }

    pub fn set_rating(&mut self, rating: Option<Rating>) -> Option<FetchTicket> {
        self.update_filters(|filters| filters.rating = rating)
    }

    pub fn set_price_range(&mut self, range: Option<PriceRange>) -> Option<FetchTicket> {
        self.update_filters(|filters| {
            filters.price_low = range.map(|r| r.low());
            filters.price_high = range.map(|r| r.high());
        })
    }

    pub fn set_sort_price(&mut self, sort: SortPrice) -> Option<FetchTicket> {
        self.update_filters(|filters| filters.sort_price = sort)
    }

    /// Clears every filter and restores the full price range.
    pub fn reset_filters(&mut self, price_range: PriceRange) -> Option<FetchTicket> {
        self.update_filters(|filters| *filters = FilterDescriptor::reset(price_range))
    }

    pub fn set_page(&mut self, page_number: usize) -> Option<FetchTicket> {
        let page_number = page_number.max(1);
        if page_number == self.filters.page_number {
            return None;
        }
        self.filters.page_number = page_number;
        self.page.page_number = page_number;
        Some(self.issue_ticket())
    }

    pub fn set_par_page(&mut self, par_page: usize) -> Option<FetchTicket> {
        let par_page = par_page.max(1);
        if par_page == self.page.par_page {
            return None;
        }
        self.page.par_page = par_page;
        self.filters.page_number = 1;
        self.page.page_number = 1;
        Some(self.issue_ticket())
    }

    /// Applies the outcome of `ticket`'s fetch.
    ///
    /// On success the item list, total and page size are replaced and the
    /// page number re-clamped; if clamping moved the page, the follow-up
    /// ticket for the valid page is returned. On failure the view enters
    /// `Errored` and keeps the previously loaded items.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: FetchResult<ListingResult>,
    ) -> Result<Option<FetchTicket>, StaleResponseDiscarded> {
        self.apply(ticket, outcome, true)
    }

    /// Shared by [`complete`](Self::complete) and `refresh`. Without
    /// `reclamp` the page number stays on the page the items were fetched
    /// for and no follow-up is issued.
    fn apply(
        &mut self,
        ticket: &FetchTicket,
        outcome: FetchResult<ListingResult>,
        reclamp: bool,
    ) -> Result<Option<FetchTicket>, StaleResponseDiscarded> {
        if ticket.seq != self.seq || ticket.kind != self.kind {
            return Err(StaleResponseDiscarded {
                seq: ticket.seq,
                latest: self.seq,
            });
        }

        match outcome {
            Ok(result) => {
                self.items = result.items;
                self.page.par_page = result.par_page.max(1);
                self.status = ListingStatus::Loaded;
                if !reclamp {
                    self.page.total_item = result.total_item;
                    return Ok(None);
                }
                if self.page.set_total_item(result.total_item) {
                    self.filters.page_number = self.page.page_number;
                    return Ok(Some(self.issue_ticket()));
                }
                Ok(None)
            }
            Err(err) => {
                self.status = ListingStatus::Errored(err);
                Ok(None)
            }
        }
    }

    /// Performs `ticket` through `reader` and applies the result, following
    /// at most `MAX_RECLAMP_FOLLOWUPS` re-clamp tickets.
    pub async fn refresh<R>(&mut self, reader: &R, ticket: FetchTicket)
    where
        R: ListingReader + ?Sized,
    {
        let mut next = Some(ticket);
        let mut followups = 0;

        while let Some(ticket) = next.take() {
            let outcome = reader.fetch_listing(ticket.kind, &ticket.params).await;
            if let Err(err) = &outcome {
                log::error!("Failed to fetch {} listing: {err}", ticket.kind);
            }

            let reclamp = followups < MAX_RECLAMP_FOLLOWUPS;
            match self.apply(&ticket, outcome, reclamp) {
                Ok(Some(followup)) => {
                    followups += 1;
                    log::debug!(
                        "{} listing page re-clamped to {}",
                        self.kind,
                        followup.filters.page_number
                    );
                    next = Some(followup);
                }
                Ok(None) if !reclamp && self.page.page_number > self.page.total_page() => {
                    log::warn!(
                        "{} listing kept shrinking, staying on page {}",
                        self.kind,
                        self.page.page_number
                    );
                }
                Ok(None) => {}
                Err(stale) => log::debug!("{stale}"),
            }
        }
    }
}
