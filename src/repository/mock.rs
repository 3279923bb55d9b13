//! Mock listing fetcher for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::listing::{ListingKind, ListingResult};
use crate::repository::errors::FetchResult;
use crate::repository::{ListingReader, RequestParams};

mock! {
    pub ListingRepository {}

    #[async_trait]
    impl ListingReader for ListingRepository {
        async fn fetch_listing(
            &self,
            kind: ListingKind,
            params: &RequestParams,
        ) -> FetchResult<ListingResult>;
    }
}
