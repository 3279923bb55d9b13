//! Form definitions backing the listing routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod listing;

#[derive(Debug, Error)]
/// Errors that can occur when processing listing filter input.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("lower price bound exceeds upper bound")]
    InvertedPriceRange,

    #[error("invalid rating: {0}")]
    InvalidRating(String),

    #[error("invalid sort order: {0}")]
    InvalidSortOrder(String),

    #[error("invalid page number: {0}")]
    InvalidPageNumber(String),

    #[error("invalid page size: {0}")]
    InvalidPerPage(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::RatingOutOfRange => FormError::InvalidRating(err.to_string()),
            TypeConstraintError::InvalidPrice => FormError::InvalidPrice(err.to_string()),
            TypeConstraintError::InvertedPriceRange => FormError::InvertedPriceRange,
            TypeConstraintError::UnknownSortOrder(value) => FormError::InvalidSortOrder(value),
            TypeConstraintError::InvalidValue(value) => FormError::InvalidValue(value),
        }
    }
}
