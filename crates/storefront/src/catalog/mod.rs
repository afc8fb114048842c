//! Upstream product catalog client.
//!
//! # Architecture
//!
//! - Plain REST/JSON over `reqwest`; the upstream's response shapes drift,
//!   so extraction is tolerant and every canonical field has a default
//! - No response cache: product records are transient, built per call
//! - Failures degrade, they do not propagate: a listing call that fails
//!   returns an empty page tagged with the failure, and a detail call walks
//!   a three-tier fallback chain (primary endpoint, search endpoint, static
//!   placeholder) and always yields a usable record
//!
//! # Example
//!
//! ```rust,ignore
//! use sole_supply_storefront::catalog::CatalogClient;
//!
//! let catalog = CatalogClient::new(&config.catalog)?;
//!
//! // One page of the trending listing
//! let listing = catalog.list_trending(1, 8).await;
//!
//! // A product detail; never fails, check `tier` for provenance
//! let resolved = catalog.get_detail("air-jordan-1-retro-high-og").await;
//! ```

mod client;
mod normalize;
mod stale;
mod types;

pub use client::CatalogClient;
pub use normalize::placeholder_record;
pub use stale::{RequestSequence, RequestToken};
pub use types::{FetchTier, Listing, ProductRecord, ProductTrait, ResolvedProduct};

use thiserror::Error;

/// A failed upstream catalog call.
///
/// Never returned from the public fetch operations directly - it appears as
/// the tag on a degraded result ([`Listing::error`]) and in logs.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    TimedOut,

    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// The request failed before an HTTP status was available.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    Malformed(String),

    /// The response parsed but held no usable payload
    /// (e.g. a search that matched nothing).
    #[error("no usable payload: {0}")]
    EmptyPayload(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::TimedOut
        } else {
            Self::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::TimedOut.to_string(), "request timed out");
        assert_eq!(
            FetchError::Status(503).to_string(),
            "upstream returned HTTP 503"
        );
        assert_eq!(
            FetchError::EmptyPayload("no search results".to_string()).to_string(),
            "no usable payload: no search results"
        );
    }
}
