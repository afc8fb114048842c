//! Catalog browsing commands.

use tracing::{info, warn};

use sole_supply_storefront::error::AppError;
use sole_supply_storefront::state::AppContext;

/// Fetch and display one page of the trending listing.
///
/// A failed upstream call is reported with a retry hint; an empty page is
/// reported as "nothing available" - the two are distinct conditions.
pub async fn trending(ctx: &AppContext, page: u32, limit: u32) -> Result<(), AppError> {
    let token = ctx.requests().issue();
    let listing = ctx.catalog().list_trending(page, limit).await;

    if !ctx.requests().is_current(token) {
        info!("listing response superseded by a newer request, discarding");
        return Ok(());
    }

    if let Some(e) = &listing.error {
        warn!("Listing unavailable ({e}). Try again in a moment.");
        return Ok(());
    }

    if listing.items.is_empty() {
        info!("No products available on page {page}");
        return Ok(());
    }

    info!("Trending, page {page} ({} items):", listing.items.len());
    for item in &listing.items {
        let title = item
            .get("title")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("(untitled)");
        let id = item.get("id").map_or_else(
            || "?".to_string(),
            |v| {
                v.as_str()
                    .map_or_else(|| v.to_string(), ToString::to_string)
            },
        );
        info!("  {title} [{id}]");
    }

    match listing.total_pages {
        Some(total) => info!("Page {page} of {total}"),
        None => info!("Page {page} (total unknown)"),
    }

    Ok(())
}

/// Resolve and display a single product detail.
///
/// # Errors
///
/// Returns `AppError::BadRequest` when no product identity is supplied -
/// distinct from a fetch failure, which degrades through the fallback chain
/// and never errors.
pub async fn product(ctx: &AppContext, id: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("no product id supplied".to_string()));
    }

    let token = ctx.requests().issue();
    let resolved = ctx.catalog().get_detail(id).await;

    if !ctx.requests().is_current(token) {
        info!("detail response superseded by a newer request, discarding");
        return Ok(());
    }

    let record = &resolved.record;
    info!("{} ({})", record.title, record.brand);
    info!("  id:        {}", record.id);
    info!("  price:     ${:.2}", record.price);
    info!("  rating:    {}", record.rating);
    info!("  category:  {}", record.category);
    info!("  colorway:  {}", record.colorway);
    info!("  style id:  {}", record.style_id);
    info!("  released:  {}", record.release_date);
    if let Some(image) = &record.image {
        info!("  image:     {image}");
    }
    info!("  {}", record.description);
    for t in &record.traits {
        info!("  {}: {}", t.label, t.value);
    }
    info!("  (source: {} tier)", resolved.tier);

    Ok(())
}
