use serde::Deserialize;
use validator::Validate;

use crate::domain::filter::FilterDescriptor;
use crate::domain::types::{Price, PriceRange, Rating, SortPrice};
use crate::forms::FormError;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: usize = 100;

/// Raw listing filters as they arrive in the query string.
///
/// Every field is kept as text so malformed numbers surface as form errors
/// instead of deserialization failures.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilterForm {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub search_value: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub category: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default, alias = "low")]
    pub low_price: String,
    #[serde(default, alias = "high")]
    pub high_price: String,
    #[serde(default)]
    pub sort_price: String,
    #[serde(default, alias = "page")]
    pub page_number: String,
    #[serde(default)]
    pub par_page: String,
}

/// Validated filters plus an optional page size override.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    pub filters: FilterDescriptor,
    pub par_page: Option<usize>,
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_price(value: &str) -> Result<Option<Price>, FormError> {
    non_empty(value)
        .map(|raw| raw.parse::<Price>().map_err(|_| FormError::InvalidPrice(raw.to_string())))
        .transpose()
}

impl TryFrom<ListingFilterForm> for ListingFilter {
    type Error = FormError;

    fn try_from(form: ListingFilterForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let rating = non_empty(&form.rating)
            .map(|raw| {
                raw.parse::<Rating>()
                    .map_err(|_| FormError::InvalidRating(raw.to_string()))
            })
            .transpose()?;

        let price_low = parse_price(&form.low_price)?;
        let price_high = parse_price(&form.high_price)?;
        if let (Some(low), Some(high)) = (price_low, price_high) {
            PriceRange::new(low, high)?;
        }

        let sort_price = form.sort_price.parse::<SortPrice>()?;

        let page_number = match non_empty(&form.page_number) {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| FormError::InvalidPageNumber(raw.to_string()))?,
            None => 1,
        };

        let par_page = non_empty(&form.par_page)
            .map(|raw| {
                raw.parse::<usize>()
                    .ok()
                    .filter(|size| (1..=MAX_PER_PAGE).contains(size))
                    .ok_or_else(|| FormError::InvalidPerPage(raw.to_string()))
            })
            .transpose()?;

        let filters = FilterDescriptor {
            search_value: form.search_value.trim().to_string(),
            category: form.category.trim().to_string(),
            rating,
            price_low,
            price_high,
            sort_price,
            page_number,
        };

        Ok(Self { filters, par_page })
    }
}
