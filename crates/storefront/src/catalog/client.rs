//! Catalog API client implementation.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::config::CatalogConfig;
use crate::error::report_absorbed;

use super::FetchError;
use super::normalize::{normalize_primary, normalize_search_hit, placeholder_record};
use super::types::{FetchTier, Listing, ProductRecord, ResolvedProduct};

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the upstream product catalog API.
///
/// Provides the trending listing and product detail lookups. The catalog is
/// treated as an unreliable, schema-drifting upstream: neither operation
/// surfaces an error past its own boundary. Listings degrade to an empty
/// tagged page; details walk the fallback chain down to a static placeholder.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    listing_query: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// The configured timeout is applied to every request, so a hung
    /// upstream degrades like any other failure instead of suspending the
    /// caller indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config
                    .api_key
                    .as_ref()
                    .map(|key| key.expose_secret().to_string()),
                listing_query: config.listing_query.clone(),
            }),
        })
    }

    /// Execute a GET and parse the body as JSON.
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let mut request = self
            .inner
            .client
            .get(url)
            .header("Accept", "application/json");

        // The key is optional; anonymous requests are valid but rate-limited
        if let Some(key) = &self.inner.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "failed to parse catalog response"
            );
            FetchError::Malformed(e.to_string())
        })
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Fetch one page of the trending listing.
    ///
    /// Never fails: an upstream failure yields an empty page with the
    /// failure recorded in [`Listing::error`], which is how callers tell
    /// "show a retry affordance" apart from "nothing available". Items are
    /// the raw upstream entries; detail normalization is not applied.
    #[instrument(skip(self))]
    pub async fn list_trending(&self, page: u32, page_size: u32) -> Listing {
        let url = format!(
            "{}/products?page={page}&limit={page_size}&query={}",
            self.inner.base_url,
            urlencoding::encode(&self.inner.listing_query),
        );

        let body = match self.get_json(&url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, page, "trending listing fetch failed");
                report_absorbed(&e);
                return Listing::failed(e);
            }
        };

        Listing {
            items: extract_listing_items(&body),
            total_pages: extract_total_pages(&body),
            error: None,
        }
    }

    // =========================================================================
    // Detail
    // =========================================================================

    /// Resolve a product detail through the fallback chain.
    ///
    /// Tiers, in order: the primary detail endpoint, the full-text search
    /// endpoint keyed on `id`, and finally a static placeholder carrying the
    /// requested `id`. This call always produces a fully-populated record;
    /// check [`ResolvedProduct::tier`] for provenance.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_detail(&self, id: &str) -> ResolvedProduct {
        let primary_err = match self.fetch_primary_detail(id).await {
            Ok(record) => {
                return ResolvedProduct {
                    record,
                    tier: FetchTier::Primary,
                };
            }
            Err(e) => e,
        };

        warn!(error = %primary_err, id, "primary detail fetch failed, trying search fallback");
        report_absorbed(&primary_err);

        let search_err = match self.fetch_search_fallback(id).await {
            Ok(record) => {
                return ResolvedProduct {
                    record,
                    tier: FetchTier::Search,
                };
            }
            Err(e) => e,
        };

        warn!(error = %search_err, id, "search fallback failed, serving placeholder");
        report_absorbed(&search_err);

        ResolvedProduct {
            record: placeholder_record(id),
            tier: FetchTier::Placeholder,
        }
    }

    /// Primary tier: the detail endpoint, which wraps its payload in a
    /// `product` or `data` envelope depending on API version.
    async fn fetch_primary_detail(&self, id: &str) -> Result<ProductRecord, FetchError> {
        let url = format!(
            "{}/products/{}",
            self.inner.base_url,
            urlencoding::encode(id),
        );

        let body = self.get_json(&url).await?;
        let data = body
            .get("product")
            .or_else(|| body.get("data"))
            .unwrap_or(&body);

        Ok(normalize_primary(id, data))
    }

    /// Search tier: full-text search keyed on the requested id, taking the
    /// first hit.
    async fn fetch_search_fallback(&self, id: &str) -> Result<ProductRecord, FetchError> {
        let url = format!(
            "{}/search?query={}",
            self.inner.base_url,
            urlencoding::encode(id),
        );

        let body = self.get_json(&url).await?;
        let hit = first_array_entry(&body, "products")
            .or_else(|| first_array_entry(&body, "results"))
            .ok_or_else(|| {
                FetchError::EmptyPayload(format!("search for '{id}' matched nothing"))
            })?;

        Ok(normalize_search_hit(id, hit))
    }
}

// =============================================================================
// Response shape extraction
// =============================================================================

/// Extract the item array from whichever known top-level shape the listing
/// response uses: a `results` field, a `data` field, or the body itself
/// being a bare array. Anything else yields an empty page.
fn extract_listing_items(body: &Value) -> Vec<Value> {
    if let Some(results) = body.get("results").and_then(Value::as_array) {
        return results.clone();
    }
    if let Some(data) = body.get("data").and_then(Value::as_array) {
        return data.clone();
    }
    if let Some(items) = body.as_array() {
        return items.clone();
    }

    warn!("listing response matched no known shape");
    Vec::new()
}

/// Total-page count from either known field name, else `None` (unknown,
/// unbounded pagination).
fn extract_total_pages(body: &Value) -> Option<u64> {
    body.get("total_pages")
        .or_else(|| body.get("totalPages"))
        .and_then(Value::as_u64)
}

fn first_array_entry<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).and_then(Value::as_array)?.first()
}
