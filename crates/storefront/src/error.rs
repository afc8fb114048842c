//! Unified error handling with Sentry integration.
//!
//! Two error currencies exist in this library. Caller-facing errors
//! (`AppError` and the per-module enums it aggregates) propagate normally.
//! Absorbed errors - storage corruption, upstream fetch failures - are
//! converted to valid default states at the point of failure and never
//! reach callers; [`report_absorbed`] is what keeps them observable on the
//! diagnostic channel without altering any return contract.

use thiserror::Error;

use crate::cart::CartError;
use crate::config::ConfigError;
use crate::identity::IdentityError;
use crate::services::auth::AuthError;
use crate::state::ContextError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application context construction failed.
    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    /// Durable storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart operation rejected caller input.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Login flow rejected caller input.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Identity provider operation failed.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Bad request from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Capture an absorbed error to Sentry.
///
/// Called where a failure is degraded to a default state instead of
/// propagating, so operators still see it.
pub fn report_absorbed<E: std::error::Error + ?Sized>(error: &E) {
    let event_id = sentry::capture_error(error);
    tracing::debug!(
        error = %error,
        sentry_event_id = %event_id,
        "absorbed error captured"
    );
}

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
