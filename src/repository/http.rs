use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::domain::listing::{ListingKind, ListingResult};
use crate::repository::errors::{FetchResult, ListingFetchError};
use crate::repository::{ListingReader, RequestParams, response};

/// Listing fetcher talking JSON over HTTP to the backend collection
/// endpoints.
#[derive(Clone, Debug)]
pub struct HttpListingRepository {
    client: Client,
    base_url: String,
}

impl HttpListingRepository {
    /// Creates a repository rooted at `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: &str, timeout: Duration) -> FetchResult<Self> {
        Url::parse(base_url).map_err(|err| {
            ListingFetchError::InvalidEndpoint(format!("invalid base url `{base_url}`: {err}"))
        })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for `kind` including the query string.
    pub fn endpoint_url(&self, kind: ListingKind, params: &RequestParams) -> FetchResult<Url> {
        let raw = format!("{}{}", self.base_url, kind.path());
        let mut url = Url::parse(&raw).map_err(|err| {
            ListingFetchError::InvalidEndpoint(format!("invalid endpoint `{raw}`: {err}"))
        })?;
        url.query_pairs_mut()
            .extend_pairs(params.query_pairs(kind.param_style()));
        Ok(url)
    }
}

fn error_payload(body: &str) -> Option<Value> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())),
    )
}

#[async_trait]
impl ListingReader for HttpListingRepository {
    async fn fetch_listing(
        &self,
        kind: ListingKind,
        params: &RequestParams,
    ) -> FetchResult<ListingResult> {
        let url = self.endpoint_url(kind, params)?;
        log::debug!("Fetching {kind} listing from {url}");

        let reply = self.client.get(url).send().await?;
        let status = reply.status();
        let body = reply.text().await?;

        if !status.is_success() {
            log::warn!("{kind} listing request failed with status {status}");
            return Err(ListingFetchError::Server {
                status: status.as_u16(),
                payload: error_payload(&body),
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        response::normalize(kind, value, params.par_page)
    }
}
