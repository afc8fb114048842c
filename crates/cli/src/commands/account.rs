//! Session management commands.

use tracing::{info, warn};

use sole_supply_storefront::error::{AppError, clear_sentry_user, set_sentry_user};
use sole_supply_storefront::identity::SessionState;
use sole_supply_storefront::state::AppContext;
use sole_supply_storefront::storage::keys;

/// Sign in and persist the session record.
///
/// # Errors
///
/// Returns an `AuthError` (via `AppError`) for empty fields or a malformed
/// email - validated before anything is written.
pub fn login(ctx: &AppContext, email: &str, password: &str) -> Result<(), AppError> {
    let user = ctx.auth().login(email, password)?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    info!("Welcome, {}!", user.name);
    info!("  avatar: {}", user.avatar_url);

    Ok(())
}

/// Sign out and clear the session record.
pub fn logout(ctx: &AppContext) -> Result<(), AppError> {
    ctx.auth().logout();
    clear_sentry_user();
    info!("Signed out");
    Ok(())
}

/// Show the current session, consulting the identity provider when one is
/// configured and a session token is stored.
pub async fn status(ctx: &AppContext) -> Result<(), AppError> {
    match ctx.auth().current_user() {
        Some(user) => {
            info!("Signed in as {} <{}>", user.name, user.email);
            info!("  since: {}", user.created_at);
        }
        None => info!("Not signed in"),
    }

    let Some(identity) = ctx.identity() else {
        return Ok(());
    };

    let storage = ctx.storage();
    match identity.session_state(storage.as_ref()) {
        SessionState::NoSession => info!("Identity provider session: none"),
        SessionState::Authenticated => {
            let token = storage.get(keys::IDENTITY_SESSION)?.unwrap_or_default();
            match identity.fetch_user_info(&token).await {
                Ok(info) => {
                    let display_name = info.name.or(info.email).unwrap_or(info.sub);
                    tracing::info!("Identity provider session: {display_name}");
                }
                Err(e) => {
                    // Stored token is stale or the provider is unreachable;
                    // the local session record above still stands
                    warn!("Identity provider session could not be verified: {e}");
                }
            }
        }
    }

    Ok(())
}
