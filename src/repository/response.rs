//! Normalization of per-listing response envelopes.
//!
//! Collection endpoints disagree on key names (`products`/`totalProduct`,
//! `orders`/`totalOrder`, `categorys`/`totalCategory`, ...). Everything is
//! folded into a single [`ListingResult`] here so nothing past the fetcher
//! sees the per-endpoint names.

use serde_json::Value;

use crate::domain::listing::{Item, ListingKind, ListingResult};
use crate::repository::errors::{FetchResult, ListingFetchError};

const GENERIC_ITEMS_KEY: &str = "items";
const GENERIC_COUNT_KEYS: [&str; 2] = ["totalItem", "total"];

fn read_count(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Builds a [`ListingResult`] from the raw JSON body of `kind`'s endpoint.
pub fn normalize(
    kind: ListingKind,
    body: Value,
    requested_par_page: usize,
) -> FetchResult<ListingResult> {
    let Value::Object(mut envelope) = body else {
        return Err(ListingFetchError::Malformed(
            "listing response is not a JSON object".to_string(),
        ));
    };

    let raw_items = envelope
        .remove(kind.items_key())
        .or_else(|| envelope.remove(GENERIC_ITEMS_KEY))
        .ok_or_else(|| {
            ListingFetchError::Malformed(format!(
                "missing `{}` array in {kind} response",
                kind.items_key()
            ))
        })?;

    let Value::Array(raw_items) = raw_items else {
        return Err(ListingFetchError::Malformed(format!(
            "`{}` is not an array",
            kind.items_key()
        )));
    };

    let items = raw_items
        .into_iter()
        .map(|value| {
            Item::try_from(value).map_err(|err| ListingFetchError::Malformed(err.to_string()))
        })
        .collect::<FetchResult<Vec<Item>>>()?;

    let count_value = std::iter::once(kind.count_key())
        .chain(GENERIC_COUNT_KEYS)
        .find_map(|key| envelope.get(key));

    let total_item = match count_value {
        Some(value) => read_count(value).ok_or_else(|| {
            ListingFetchError::Malformed(format!("invalid item count `{value}`"))
        })?,
        None => items.len(),
    };

    let par_page = envelope
        .get("parPage")
        .and_then(read_count)
        .filter(|par_page| *par_page > 0)
        .unwrap_or(requested_par_page);

    Ok(ListingResult::new(items, total_item, par_page))
}
