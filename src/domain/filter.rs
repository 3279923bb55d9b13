use serde::Serialize;

use crate::domain::types::{Price, PriceRange, Rating, SortPrice};

/// User-chosen search, sort, category, rating and price constraints for a
/// listing together with the requested page.
///
/// Absent constraints are represented by empty strings or `None`; the query
/// layer serializes them as empty values.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FilterDescriptor {
    pub search_value: String,
    pub category: String,
    pub rating: Option<Rating>,
    pub price_low: Option<Price>,
    pub price_high: Option<Price>,
    pub sort_price: SortPrice,
    pub page_number: usize,
}

impl Default for FilterDescriptor {
    fn default() -> Self {
        Self {
            search_value: String::new(),
            category: String::new(),
            rating: None,
            price_low: None,
            price_high: None,
            sort_price: SortPrice::Unsorted,
            page_number: 1,
        }
    }
}

impl FilterDescriptor {
    /// Fresh descriptor with every filter cleared, the full price range
    /// restored and the first page selected.
    #[must_use]
    pub fn reset(price_range: PriceRange) -> Self {
        Self {
            price_low: Some(price_range.low()),
            price_high: Some(price_range.high()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search_value = value.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_low = Some(range.low());
        self.price_high = Some(range.high());
        self
    }

    #[must_use]
    pub fn sort_price(mut self, sort: SortPrice) -> Self {
        self.sort_price = sort;
        self
    }

    #[must_use]
    pub fn page(mut self, page_number: usize) -> Self {
        self.page_number = page_number.max(1);
        self
    }

    /// Current price bounds when both ends are set.
    pub fn current_price_range(&self) -> Option<PriceRange> {
        match (self.price_low, self.price_high) {
            (Some(low), Some(high)) => PriceRange::new(low, high).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(low: f64, high: f64) -> PriceRange {
        PriceRange::try_from_f64(low, high).expect("valid price range")
    }

    #[test]
    fn reset_restores_defaults_and_full_price_range() {
        let descriptor = FilterDescriptor::reset(range(10.0, 500.0));

        assert_eq!(descriptor.search_value, "");
        assert_eq!(descriptor.category, "");
        assert_eq!(descriptor.rating, None);
        assert_eq!(descriptor.sort_price, SortPrice::Unsorted);
        assert_eq!(descriptor.price_low.map(Price::get), Some(10.0));
        assert_eq!(descriptor.price_high.map(Price::get), Some(500.0));
        assert_eq!(descriptor.page_number, 1);
    }

    #[test]
    fn reset_is_idempotent() {
        let first = FilterDescriptor::reset(range(10.0, 500.0));
        let second = FilterDescriptor::reset(range(10.0, 500.0));
        assert_eq!(first, second);
    }

    #[test]
    fn reset_discards_previous_filters() {
        let dirty = FilterDescriptor::default()
            .search("shirt")
            .category("Men")
            .rating(Rating::new(4).expect("valid rating"))
            .sort_price(SortPrice::HighToLow)
            .page(7);
        assert_ne!(dirty, FilterDescriptor::reset(range(0.0, 100.0)));
        assert_eq!(
            FilterDescriptor::reset(range(0.0, 100.0)).current_price_range(),
            Some(range(0.0, 100.0))
        );
    }

    #[test]
    fn page_never_drops_below_one() {
        assert_eq!(FilterDescriptor::default().page(0).page_number, 1);
    }
}
