//! Strongly-typed value objects used by listing filters.
//!
//! These wrappers enforce the numeric invariants of the filter model (rating
//! bounds, finite non-negative prices, ordered price ranges) so that once a
//! value reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Rating fell outside the 0-5 star scale.
    #[error("rating must be between 0 and 5")]
    RatingOutOfRange,
    /// Price was negative, NaN or infinite.
    #[error("price must be a finite, non-negative number")]
    InvalidPrice,
    /// Lower price bound was greater than the upper bound.
    #[error("lower price bound exceeds upper bound")]
    InvertedPriceRange,
    /// Sort order string is not one of the supported values.
    #[error("unknown sort order: {0}")]
    UnknownSortOrder(String),
    /// Provided value failed to parse.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Minimum star rating filter on the 0-5 scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    /// Creates a rating ensuring it lies on the 0-5 scale.
    pub fn new(value: u8) -> Result<Self, TypeConstraintError> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::RatingOutOfRange)
        }
    }

    /// Returns the raw star count.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = TypeConstraintError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl FromStr for Rating {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| TypeConstraintError::RatingOutOfRange)?;
        Self::new(value)
    }
}

/// Finite, non-negative price bound.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Wraps a price, rejecting negative and non-finite values.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidPrice)
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl FromStr for Price {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|_| TypeConstraintError::InvalidPrice)?;
        Self::new(value)
    }
}

/// Inclusive price bounds with `low <= high`.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct PriceRange {
    low: Price,
    high: Price,
}

impl PriceRange {
    /// Builds a range, rejecting inverted bounds.
    pub fn new(low: Price, high: Price) -> Result<Self, TypeConstraintError> {
        if low > high {
            return Err(TypeConstraintError::InvertedPriceRange);
        }
        Ok(Self { low, high })
    }

    /// Convenience constructor from raw numbers.
    pub fn try_from_f64(low: f64, high: f64) -> Result<Self, TypeConstraintError> {
        Self::new(Price::new(low)?, Price::new(high)?)
    }

    pub const fn low(&self) -> Price {
        self.low
    }

    pub const fn high(&self) -> Price {
        self.high
    }
}

/// Price ordering requested for a listing.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortPrice {
    #[default]
    #[serde(rename = "")]
    Unsorted,
    #[serde(rename = "low-to-high")]
    LowToHigh,
    #[serde(rename = "high-to-low")]
    HighToLow,
}

impl SortPrice {
    /// Wire representation expected by the backend.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortPrice::Unsorted => "",
            SortPrice::LowToHigh => "low-to-high",
            SortPrice::HighToLow => "high-to-low",
        }
    }
}

impl Display for SortPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortPrice {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(SortPrice::Unsorted),
            "low-to-high" => Ok(SortPrice::LowToHigh),
            "high-to-low" => Ok(SortPrice::HighToLow),
            other => Err(TypeConstraintError::UnknownSortOrder(other.to_string())),
        }
    }
}
