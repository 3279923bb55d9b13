use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::ListingFetchError;

pub mod listing;
pub mod storefront;

/// Errors surfaced by the service layer to routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("form error: {0}")]
    Form(#[from] FormError),

    #[error("listing fetch failed: {0}")]
    Fetch(#[from] ListingFetchError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
