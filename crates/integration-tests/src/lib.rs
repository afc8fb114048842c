//! Integration tests for Sole Supply.
//!
//! # Test Categories
//!
//! - `catalog_fallback` - The fetch client against a mock upstream: fallback
//!   tiers, shape tolerance, normalization precedence
//! - `cart_persistence` - Cart and session records through real file storage
//!
//! # Test support
//!
//! The helpers here stand up a mock catalog upstream: an `axum` router with
//! canned JSON responses bound to an ephemeral local port. Tests compose a
//! router per scenario and point a `CatalogClient` at it.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Test-support code; unwraps fail the test run, which is what we want.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::Router;

use sole_supply_storefront::catalog::CatalogClient;
use sole_supply_storefront::config::CatalogConfig;

/// Serve `router` on an ephemeral local port, returning its base URL.
///
/// The server task runs until the test's runtime shuts down.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock upstream");
    });

    format!("http://{addr}")
}

/// Catalog configuration pointing at a mock upstream.
#[must_use]
pub fn catalog_config(base_url: &str) -> CatalogConfig {
    CatalogConfig {
        base_url: base_url.to_string(),
        api_key: None,
        timeout: Duration::from_secs(2),
        listing_query: "nike".to_string(),
    }
}

/// A catalog client wired to a mock upstream.
#[must_use]
pub fn catalog_client(base_url: &str) -> CatalogClient {
    CatalogClient::new(&catalog_config(base_url)).expect("build catalog client")
}

/// A unique temporary directory for file-storage tests.
#[must_use]
pub fn temp_data_dir(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("sole-supply-it-{label}-{}", uuid::Uuid::new_v4()))
}
