use crate::domain::listing::ListingKind;
use crate::dto::ListingPageData;
use crate::forms::listing::{ListingFilter, ListingFilterForm};
use crate::repository::ListingReader;
use crate::services::listing::ListingView;
use crate::services::{ServiceError, ServiceResult};

/// Page size and button-window width used when a request does not override
/// them.
#[derive(Debug, Clone, Copy)]
pub struct ListingDefaults {
    pub par_page: usize,
    pub show_item: usize,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            par_page: 12,
            show_item: 5,
        }
    }
}

/// Validates the filter form, fetches the requested page and prepares the
/// page window.
///
/// Invalid input is rejected before any request is made. A failed fetch is
/// not an error here: the returned data carries it so callers can render
/// the failure next to an empty listing.
pub async fn load_listing_page<R>(
    reader: &R,
    kind: ListingKind,
    form: ListingFilterForm,
    defaults: ListingDefaults,
) -> ServiceResult<ListingPageData>
where
    R: ListingReader + ?Sized,
{
    let ListingFilter { filters, par_page } = ListingFilter::try_from(form).map_err(|err| {
        log::warn!("Rejected {kind} listing filters: {err}");
        ServiceError::from(err)
    })?;

    let mut view = ListingView::new(
        kind,
        par_page.unwrap_or(defaults.par_page),
        defaults.show_item,
    )
    .with_filters(filters);

    let ticket = view.mount();
    view.refresh(reader, ticket).await;

    Ok(ListingPageData::from(view.snapshot()))
}
