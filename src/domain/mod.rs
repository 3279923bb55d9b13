//! Domain types shared by every listing: filters, listing kinds and results.

pub mod filter;
pub mod listing;
pub mod types;
