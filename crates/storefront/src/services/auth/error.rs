//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during the login flow.
///
/// These are caller-input errors, surfaced so the UI can show an actionable
/// message before any network or storage call happens.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password field was empty.
    #[error("email and password are required")]
    MissingCredentials,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] sole_supply_core::EmailError),
}
