//! Listing kinds and the normalized result of a listing fetch.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::TypeConstraintError;

/// Query-string dialect spoken by a collection endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamStyle {
    /// Storefront shop/category queries: `pageNumber`, `lowPrice`, `highPrice`
    /// and every filter key present even when empty.
    Storefront,
    /// Dashboard tables: `page`, `parPage`, `searchValue` and only the
    /// filters that are actually set.
    Dashboard,
}

/// Every listing backed by a paginated collection endpoint.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ListingKind {
    Products,
    SellerProducts,
    Orders,
    Sellers,
    DeactiveSellers,
    Categories,
}

impl ListingKind {
    pub const ALL: [ListingKind; 6] = [
        ListingKind::Products,
        ListingKind::SellerProducts,
        ListingKind::Orders,
        ListingKind::Sellers,
        ListingKind::DeactiveSellers,
        ListingKind::Categories,
    ];

    /// URL slug used by the listing routes.
    pub const fn slug(self) -> &'static str {
        match self {
            ListingKind::Products => "products",
            ListingKind::SellerProducts => "seller-products",
            ListingKind::Orders => "orders",
            ListingKind::Sellers => "sellers",
            ListingKind::DeactiveSellers => "deactive-sellers",
            ListingKind::Categories => "categories",
        }
    }

    /// Collection endpoint path relative to the backend API root.
    pub const fn path(self) -> &'static str {
        match self {
            ListingKind::Products => "/home/query-products",
            ListingKind::SellerProducts => "/products-get",
            ListingKind::Orders => "/admin/orders",
            ListingKind::Sellers => "/sellers",
            ListingKind::DeactiveSellers => "/get-deactive-sellers",
            ListingKind::Categories => "/category-get",
        }
    }

    pub const fn param_style(self) -> ParamStyle {
        match self {
            ListingKind::Products => ParamStyle::Storefront,
            _ => ParamStyle::Dashboard,
        }
    }

    /// Response key holding the item array.
    pub const fn items_key(self) -> &'static str {
        match self {
            ListingKind::Products | ListingKind::SellerProducts => "products",
            ListingKind::Orders => "orders",
            ListingKind::Sellers | ListingKind::DeactiveSellers => "sellers",
            ListingKind::Categories => "categorys",
        }
    }

    /// Response key holding the total count.
    pub const fn count_key(self) -> &'static str {
        match self {
            ListingKind::Products | ListingKind::SellerProducts => "totalProduct",
            ListingKind::Orders => "totalOrder",
            ListingKind::Sellers | ListingKind::DeactiveSellers => "totalSeller",
            ListingKind::Categories => "totalCategory",
        }
    }

    /// Human readable page title.
    pub const fn title(self) -> &'static str {
        match self {
            ListingKind::Products => "Shop",
            ListingKind::SellerProducts => "All Products",
            ListingKind::Orders => "Orders",
            ListingKind::Sellers => "Sellers",
            ListingKind::DeactiveSellers => "Deactive Sellers",
            ListingKind::Categories => "Categories",
        }
    }
}

impl Display for ListingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ListingKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListingKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown listing `{s}`")))
    }
}

/// Opaque listing record. Only the identifier is interpreted; everything else
/// is passed through to renderers untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Identifier taken from `_id` (MongoDB documents) or `id`.
    pub fn id(&self) -> Option<String> {
        ["_id", "id"]
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Decodes the record into a concrete listing type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }
}

impl TryFrom<Value> for Item {
    type Error = TypeConstraintError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "listing item must be an object, got `{other}`"
            ))),
        }
    }
}

/// Normalized outcome of a listing fetch. Each fetch replaces the previous
/// result wholesale.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingResult {
    pub items: Vec<Item>,
    pub total_item: usize,
    pub par_page: usize,
}

impl ListingResult {
    pub fn new(items: Vec<Item>, total_item: usize, par_page: usize) -> Self {
        Self {
            items,
            total_item,
            par_page: par_page.max(1),
        }
    }

    pub fn total_page(&self) -> usize {
        self.total_item.div_ceil(self.par_page.max(1))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn kinds_parse_from_their_slugs() {
        for kind in ListingKind::ALL {
            assert_eq!(kind.slug().parse::<ListingKind>(), Ok(kind));
        }
        assert!("customers".parse::<ListingKind>().is_err());
    }

    #[test]
    fn only_the_shop_uses_storefront_params() {
        assert_eq!(ListingKind::Products.param_style(), ParamStyle::Storefront);
        assert_eq!(ListingKind::Orders.param_style(), ParamStyle::Dashboard);
        assert_eq!(ListingKind::Categories.items_key(), "categorys");
    }

    #[test]
    fn item_id_prefers_mongo_identifier() {
        let item = Item::try_from(json!({"_id": "64af", "id": 3, "name": "Shirt"}))
            .expect("object item");
        assert_eq!(item.id().as_deref(), Some("64af"));

        let numeric = Item::try_from(json!({"id": 42})).expect("object item");
        assert_eq!(numeric.id().as_deref(), Some("42"));

        let anonymous = Item::try_from(json!({"name": "n/a"})).expect("object item");
        assert_eq!(anonymous.id(), None);
    }

    #[test]
    fn item_rejects_non_objects() {
        assert!(Item::try_from(json!([1, 2])).is_err());
    }

    #[test]
    fn item_decodes_into_typed_record() {
        #[derive(Deserialize)]
        struct Product {
            name: String,
            price: f64,
        }

        let item = Item::try_from(json!({"_id": "1", "name": "Shirt", "price": 19.5}))
            .expect("object item");
        let product: Product = item.decode().expect("decodes");
        assert_eq!(product.name, "Shirt");
        assert_eq!(product.price, 19.5);
    }

    #[test]
    fn total_page_rounds_up() {
        let result = ListingResult::new(Vec::new(), 12, 5);
        assert_eq!(result.total_page(), 3);
        assert_eq!(ListingResult::new(Vec::new(), 0, 0).par_page, 1);
    }
}
