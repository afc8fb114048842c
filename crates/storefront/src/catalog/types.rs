//! Canonical catalog types.
//!
//! [`ProductRecord`] is the fully-normalized, default-filled product shape
//! consumed by views. Every field except `image` is always populated, so
//! downstream consumers never have to handle a half-built record regardless
//! of what the upstream returned.

use serde::{Deserialize, Serialize};

use sole_supply_core::ProductId;

use super::FetchError;

/// A single product attribute, e.g. `{ trait: "Color", value: "Bred" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTrait {
    /// Attribute label.
    #[serde(rename = "trait")]
    pub label: String,
    /// Attribute value.
    pub value: String,
}

impl ProductTrait {
    /// Create a new trait.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The canonical product record, independent of upstream schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Unique product identity.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Market price in the catalog's currency unit.
    pub price: f64,
    /// Image URL, when the upstream supplied one.
    pub image: Option<String>,
    /// Brand name.
    pub brand: String,
    /// Average rating on the upstream's scale.
    pub rating: f64,
    /// Product category (e.g. "Running", "Lifestyle").
    pub category: String,
    /// Colorway description.
    pub colorway: String,
    /// Release date as reported upstream.
    pub release_date: String,
    /// Manufacturer style identifier.
    pub style_id: String,
    /// Ordered product attributes.
    pub traits: Vec<ProductTrait>,
}

/// Which fallback tier produced a resolved product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchTier {
    /// The primary detail endpoint answered.
    Primary,
    /// The primary failed; the search endpoint supplied the record.
    Search,
    /// Every remote tier failed; the record is a static placeholder.
    Placeholder,
}

impl std::fmt::Display for FetchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Search => write!(f, "search"),
            Self::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// A product record together with the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProduct {
    /// The normalized record.
    pub record: ProductRecord,
    /// Source tier.
    pub tier: FetchTier,
}

/// One page of the trending listing.
///
/// Items are the raw upstream entries; the listing deliberately skips detail
/// normalization. `error` is set when the upstream call failed outright,
/// which is how callers distinguish "show a retry affordance" from
/// "succeeded with zero results".
#[derive(Debug, Default)]
pub struct Listing {
    /// Raw listing entries in upstream order.
    pub items: Vec<serde_json::Value>,
    /// Total page count, or `None` when the upstream did not report one
    /// (unknown, unbounded pagination).
    pub total_pages: Option<u64>,
    /// The failure that emptied this listing, if any.
    pub error: Option<FetchError>,
}

impl Listing {
    /// An empty listing representing a failed upstream call.
    #[must_use]
    pub fn failed(error: FetchError) -> Self {
        Self {
            items: Vec::new(),
            total_pages: None,
            error: Some(error),
        }
    }

    /// `true` when the listing is empty because the upstream call failed,
    /// as opposed to succeeding with no results.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}
