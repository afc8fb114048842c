//! Cart management commands.

use tracing::info;

use sole_supply_storefront::cart::AddOutcome;
use sole_supply_storefront::error::AppError;
use sole_supply_storefront::state::AppContext;

/// Resolve a product through the catalog and add it to the cart.
///
/// # Errors
///
/// Returns `AppError::BadRequest` when no product identity is supplied, or
/// a `CartError` if the resolved record is rejected by the cart.
pub async fn add(ctx: &AppContext, id: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("no product id supplied".to_string()));
    }

    let resolved = ctx.catalog().get_detail(id).await;
    let mut cart = ctx.open_cart();

    match cart.add(&resolved.record)? {
        AddOutcome::Added => {
            info!(
                "Added {} (${:.2}) - {} item(s), ${:.2} total",
                resolved.record.title,
                resolved.record.price,
                cart.item_count(),
                cart.total_price()
            );
        }
        AddOutcome::AlreadyInCart => {
            info!("{} is already in the cart", resolved.record.title);
        }
    }

    Ok(())
}

/// Remove a product from the cart. Absent ids are reported, not errors.
pub fn remove(ctx: &AppContext, id: &str) -> Result<(), AppError> {
    let mut cart = ctx.open_cart();

    if cart.remove(id) {
        info!(
            "Removed {id} - {} item(s), ${:.2} total",
            cart.item_count(),
            cart.total_price()
        );
    } else {
        info!("{id} is not in the cart");
    }

    Ok(())
}

/// List cart contents with the running total.
pub fn list(ctx: &AppContext) -> Result<(), AppError> {
    let cart = ctx.open_cart();

    if cart.items().is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    for item in cart.items() {
        info!(
            "  {} x{} @ ${:.2} [{}]",
            item.title,
            item.quantity,
            item.unit_price.unwrap_or(0.0),
            item.id
        );
    }
    info!(
        "{} item(s), ${:.2} total",
        cart.item_count(),
        cart.total_price()
    );

    Ok(())
}

/// Empty the cart.
pub fn clear(ctx: &AppContext) -> Result<(), AppError> {
    let mut cart = ctx.open_cart();
    cart.clear();
    info!("Cart cleared");
    Ok(())
}
