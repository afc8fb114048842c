//! Field normalization for upstream product payloads.
//!
//! The catalog API's response shapes drift across endpoints and over time,
//! so each canonical field is resolved through a fixed precedence list of
//! source fields, ending in a deterministic default. Two profiles exist:
//! the primary detail endpoint, and the market-data-shaped search endpoint
//! used as a fallback. The precedence lists are ordered: the first listed
//! source field that is present wins.

use serde_json::Value;

use sole_supply_core::ProductId;

use super::types::{ProductRecord, ProductTrait};

const DEFAULT_TITLE: &str = "Nike Shoe";
const DEFAULT_BRAND: &str = "Nike";
const DEFAULT_DESCRIPTION: &str = "No description available";
const DEFAULT_PRICE: f64 = 150.0;
const DEFAULT_RATING: f64 = 4.5;
const DEFAULT_COLORWAY: &str = "Various";
const DEFAULT_CATEGORY: &str = "Lifestyle";
const UNKNOWN: &str = "Unknown";

const PLACEHOLDER_DESCRIPTION: &str = "Product details temporarily unavailable.";
const PLACEHOLDER_CATEGORY: &str = "Running";
const PLACEHOLDER_COLORWAY: &str = "Not specified";

/// Image source fields for market-data-shaped payloads, in precedence order.
const MARKET_IMAGE_FIELDS: &[&str] = &[
    "media.image_url",
    "image_url",
    "thumbnail_url",
    "media.imageUrl",
    "thumbnail",
    "image",
];

// =============================================================================
// Primary detail profile
// =============================================================================

/// Normalize a payload from the primary detail endpoint.
///
/// `requested_id` backstops a payload that omits its own identity.
pub(super) fn normalize_primary(requested_id: &str, data: &Value) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(
            first_id(data, &["id"]).unwrap_or_else(|| requested_id.to_string()),
        ),
        title: first_string(data, &["title"]).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: first_string(data, &["description", "product_description"])
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        price: first_number(data, &["max_price", "avg_price", "retail_price"])
            .unwrap_or(DEFAULT_PRICE),
        image: first_string(
            data,
            &["image", "media.image_url", "image_url", "thumbnail_url", "thumbnail"],
        ),
        brand: first_string(data, &["brand"]).unwrap_or_else(|| DEFAULT_BRAND.to_string()),
        rating: first_number(data, &["average_rating"]).unwrap_or(DEFAULT_RATING),
        category: extract_category(data),
        colorway: extract_colorway(data),
        release_date: first_string(data, &["release_date"])
            .unwrap_or_else(|| UNKNOWN.to_string()),
        style_id: first_string(data, &["style_id", "sku", "style"])
            .unwrap_or_else(|| UNKNOWN.to_string()),
        traits: extract_traits(data),
    }
}

// =============================================================================
// Search fallback profile (market-data-shaped)
// =============================================================================

/// Normalize a hit from the full-text search endpoint.
///
/// Search results carry market-data field names (`uuid`, `name`,
/// `market_data.*`, `retail_price`) instead of the detail endpoint's.
pub(super) fn normalize_search_hit(requested_id: &str, hit: &Value) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(
            first_id(hit, &["uuid", "id"]).unwrap_or_else(|| requested_id.to_string()),
        ),
        title: first_string(hit, &["name", "title"]).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: first_string(hit, &["description", "product_description"])
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        price: first_number(
            hit,
            &["market_data.highest_bid", "highest_bid", "retail_price"],
        )
        .unwrap_or(DEFAULT_PRICE),
        image: first_string(hit, MARKET_IMAGE_FIELDS),
        brand: first_string(hit, &["brand"]).unwrap_or_else(|| DEFAULT_BRAND.to_string()),
        rating: first_number(hit, &["average_rating"]).unwrap_or(DEFAULT_RATING),
        category: extract_category(hit),
        colorway: extract_colorway(hit),
        release_date: first_string(hit, &["release_date"]).unwrap_or_else(|| UNKNOWN.to_string()),
        style_id: first_string(hit, &["style_id", "sku", "style"])
            .unwrap_or_else(|| UNKNOWN.to_string()),
        traits: extract_traits(hit),
    }
}

// =============================================================================
// Placeholder tier
// =============================================================================

/// The static placeholder record: fixed defaults with the requested identity.
///
/// This is the final fallback tier, returned when both remote tiers fail,
/// so detail views always have something to render.
#[must_use]
pub fn placeholder_record(requested_id: &str) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(requested_id),
        title: DEFAULT_TITLE.to_string(),
        description: PLACEHOLDER_DESCRIPTION.to_string(),
        price: DEFAULT_PRICE,
        image: None,
        brand: DEFAULT_BRAND.to_string(),
        rating: DEFAULT_RATING,
        category: PLACEHOLDER_CATEGORY.to_string(),
        colorway: PLACEHOLDER_COLORWAY.to_string(),
        release_date: UNKNOWN.to_string(),
        style_id: requested_id.to_string(),
        traits: Vec::new(),
    }
}

// =============================================================================
// Derived fields
// =============================================================================

/// Category precedence, falling back to a title heuristic.
fn extract_category(data: &Value) -> String {
    first_string(data, &["category", "shoe_category", "product_category"]).unwrap_or_else(|| {
        let title = first_string(data, &["title", "name"]).unwrap_or_default();
        if title.contains("Running") {
            "Running".to_string()
        } else {
            DEFAULT_CATEGORY.to_string()
        }
    })
}

/// Colorway precedence, falling back to a trait named "color".
fn extract_colorway(data: &Value) -> String {
    first_string(data, &["colorway", "color", "color_description"])
        .or_else(|| color_trait_value(data))
        .unwrap_or_else(|| DEFAULT_COLORWAY.to_string())
}

/// Find the value of an upstream trait labeled "color", case-insensitively.
/// Trait entries label themselves under either a `trait` or a `name` key.
fn color_trait_value(data: &Value) -> Option<String> {
    let traits = data.get("traits")?.as_array()?;
    traits.iter().find_map(|entry| {
        let label = entry
            .get("trait")
            .or_else(|| entry.get("name"))?
            .as_str()?;
        if label.eq_ignore_ascii_case("color") {
            non_empty_string(entry.get("value")?)
        } else {
            None
        }
    })
}

/// Traits pass through verbatim when the upstream supplies them; otherwise
/// they are synthesized from whichever source fields are present, one trait
/// per field, in a fixed order.
fn extract_traits(data: &Value) -> Vec<ProductTrait> {
    if let Some(upstream) = data.get("traits").and_then(Value::as_array)
        && !upstream.is_empty()
    {
        return upstream
            .iter()
            .filter_map(|entry| {
                let label = entry
                    .get("trait")
                    .or_else(|| entry.get("name"))
                    .and_then(Value::as_str)?;
                let value = non_empty_string(entry.get("value")?)?;
                Some(ProductTrait::new(label, value))
            })
            .collect();
    }

    let mut traits = Vec::new();
    if let Some(colorway) = first_string(data, &["colorway"]) {
        traits.push(ProductTrait::new("Color", colorway));
    }
    if let Some(style_id) = first_string(data, &["style_id", "sku"]) {
        traits.push(ProductTrait::new("Style ID", style_id));
    }
    if let Some(release_date) = first_string(data, &["release_date"]) {
        traits.push(ProductTrait::new("Release Date", release_date));
    }
    if let Some(brand) = first_string(data, &["brand"]) {
        traits.push(ProductTrait::new("Brand", brand));
    }
    traits
}

// =============================================================================
// Field lookup helpers
// =============================================================================

/// Walk a dotted path (`market_data.highest_bid`) into a JSON object.
fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |v, key| v.get(key))
}

/// First field in `paths` holding a non-empty string.
fn first_string(data: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| lookup(data, path).and_then(non_empty_string))
}

/// First field in `paths` holding a number (or a numeric string).
fn first_number(data: &Value, paths: &[&str]) -> Option<f64> {
    paths.iter().find_map(|path| {
        let v = lookup(data, path)?;
        v.as_f64()
            .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
    })
}

/// First field in `paths` usable as an identity: a string, or a number
/// rendered as one.
fn first_id(data: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| {
        let v = lookup(data, path)?;
        match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    })
}

fn non_empty_string(v: &Value) -> Option<String> {
    v.as_str()
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    // =========================================================================
    // Price precedence
    // =========================================================================

    #[test]
    fn test_price_max_beats_avg() {
        let data = json!({"avg_price": 90, "max_price": 120});
        let record = normalize_primary("x", &data);
        assert!((record.price - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_falls_through_to_retail() {
        let data = json!({"retail_price": 110.0});
        let record = normalize_primary("x", &data);
        assert!((record.price - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_default() {
        let record = normalize_primary("x", &json!({}));
        assert!((record.price - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_numeric_string_tolerated() {
        let data = json!({"max_price": "135.5"});
        let record = normalize_primary("x", &data);
        assert!((record.price - 135.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_search_price_prefers_market_data() {
        let hit = json!({
            "market_data": {"highest_bid": 310},
            "retail_price": 180
        });
        let record = normalize_search_hit("x", &hit);
        assert!((record.price - 310.0).abs() < f64::EPSILON);
    }

    // =========================================================================
    // Identity and titles
    // =========================================================================

    #[test]
    fn test_requested_id_backstops_missing_id() {
        let record = normalize_primary("requested-123", &json!({"title": "Dunk Low"}));
        assert_eq!(record.id.as_str(), "requested-123");
    }

    #[test]
    fn test_numeric_upstream_id_rendered_as_string() {
        let record = normalize_primary("x", &json!({"id": 4821}));
        assert_eq!(record.id.as_str(), "4821");
    }

    #[test]
    fn test_search_hit_prefers_uuid() {
        let hit = json!({"uuid": "u-1", "id": "i-1", "name": "Pegasus 41"});
        let record = normalize_search_hit("x", &hit);
        assert_eq!(record.id.as_str(), "u-1");
        assert_eq!(record.title, "Pegasus 41");
    }

    // =========================================================================
    // Derived fields
    // =========================================================================

    #[test]
    fn test_category_title_heuristic() {
        let record = normalize_primary("x", &json!({"title": "Zoom Fly Running Shoe"}));
        assert_eq!(record.category, "Running");

        let record = normalize_primary("x", &json!({"title": "Air Force 1"}));
        assert_eq!(record.category, "Lifestyle");
    }

    #[test]
    fn test_category_explicit_field_wins_over_heuristic() {
        let data = json!({"title": "Running Shoe", "shoe_category": "Basketball"});
        let record = normalize_primary("x", &data);
        assert_eq!(record.category, "Basketball");
    }

    #[test]
    fn test_colorway_from_color_trait_case_insensitive() {
        let data = json!({
            "traits": [
                {"trait": "Retail Price", "value": "170"},
                {"name": "COLOR", "value": "Black/White"}
            ]
        });
        let record = normalize_primary("x", &data);
        assert_eq!(record.colorway, "Black/White");
    }

    #[test]
    fn test_colorway_default() {
        let record = normalize_primary("x", &json!({}));
        assert_eq!(record.colorway, "Various");
    }

    // =========================================================================
    // Traits
    // =========================================================================

    #[test]
    fn test_traits_pass_through_verbatim_order() {
        let data = json!({
            "traits": [
                {"trait": "Release Date", "value": "2024-03-01"},
                {"trait": "Color", "value": "Bred"}
            ]
        });
        let record = normalize_primary("x", &data);
        assert_eq!(
            record.traits,
            vec![
                ProductTrait::new("Release Date", "2024-03-01"),
                ProductTrait::new("Color", "Bred"),
            ]
        );
    }

    #[test]
    fn test_traits_synthesized_in_fixed_order() {
        let data = json!({
            "brand": "Nike",
            "release_date": "2023-11-11",
            "colorway": "Triple White"
        });
        let record = normalize_primary("x", &data);
        assert_eq!(
            record.traits,
            vec![
                ProductTrait::new("Color", "Triple White"),
                ProductTrait::new("Release Date", "2023-11-11"),
                ProductTrait::new("Brand", "Nike"),
            ]
        );
    }

    #[test]
    fn test_traits_synthesis_skips_absent_fields() {
        let record = normalize_primary("x", &json!({"sku": "DD1391-100"}));
        assert_eq!(record.traits, vec![ProductTrait::new("Style ID", "DD1391-100")]);
    }

    // =========================================================================
    // Image precedence
    // =========================================================================

    #[test]
    fn test_search_image_walks_media_fields() {
        let hit = json!({
            "thumbnail": "https://img.example/c.png",
            "media": {"image_url": "https://img.example/a.png"}
        });
        let record = normalize_search_hit("x", &hit);
        assert_eq!(record.image.as_deref(), Some("https://img.example/a.png"));
    }

    #[test]
    fn test_image_absent_stays_none() {
        let record = normalize_primary("x", &json!({}));
        assert!(record.image.is_none());
    }

    // =========================================================================
    // Placeholder
    // =========================================================================

    #[test]
    fn test_placeholder_carries_requested_id_and_defaults() {
        let record = placeholder_record("ghost-404");
        assert_eq!(record.id.as_str(), "ghost-404");
        assert_eq!(record.style_id, "ghost-404");
        assert_eq!(record.title, "Nike Shoe");
        assert_eq!(record.brand, "Nike");
        assert_eq!(record.category, "Running");
        assert_eq!(record.colorway, "Not specified");
        assert_eq!(record.description, "Product details temporarily unavailable.");
        assert!((record.price - 150.0).abs() < f64::EPSILON);
        assert!((record.rating - 4.5).abs() < f64::EPSILON);
        assert!(record.image.is_none());
        assert!(record.traits.is_empty());
    }
}
