//! External session/identity provider client.
//!
//! The provider is a collaborator, not owned: this client only asks whether
//! a stored session is still live and, when it is, fetches the user's
//! display identity. Token issuance, refresh, and verification are the
//! provider's business.
//!
//! Configuration happens exactly once, when the [`crate::state::AppContext`]
//! is constructed - there is no module-level "already configured" flag; a
//! configured client either exists on the context or does not.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{instrument, warn};

use crate::config::IdentityConfig;
use crate::storage::{Storage, keys};

const USERINFO_PATH: &str = "/oauth2/userinfo";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed.
    #[error("identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status (e.g. an expired
    /// or revoked token).
    #[error("identity provider returned HTTP {0}")]
    Status(u16),
}

/// Whether a session is currently established with the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session token is stored.
    NoSession,
    /// A session token is stored; the provider may still reject it.
    Authenticated,
}

/// The user identity reported by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    /// Stable subject identifier.
    pub sub: String,
    /// Email address, when the provider shares it.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Avatar URL.
    pub picture: Option<String>,
}

/// Client for the external identity provider.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    endpoint: String,
    client_id: String,
}

impl IdentityClient {
    /// Configure a client against the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn configure(config: &IdentityConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(IdentityClientInner {
                client,
                endpoint: config.endpoint.trim_end_matches('/').to_string(),
                client_id: config.client_id.clone(),
            }),
        })
    }

    /// The OAuth client ID this client was configured with.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.inner.client_id
    }

    /// Whether a session token is present in durable storage.
    ///
    /// This is the cheap local check consulted at startup; only
    /// [`Self::fetch_user_info`] actually validates the token with the
    /// provider.
    pub fn session_state(&self, storage: &dyn Storage) -> SessionState {
        match storage.get(keys::IDENTITY_SESSION) {
            Ok(Some(token)) if !token.is_empty() => SessionState::Authenticated,
            Ok(_) => SessionState::NoSession,
            Err(e) => {
                warn!(error = %e, "failed to read identity session token");
                SessionState::NoSession
            }
        }
    }

    /// Fetch the user's identity from the provider.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Status`] when the provider rejects the
    /// token, or [`IdentityError::Http`] on transport failure. Unlike the
    /// catalog, identity errors propagate: callers need to distinguish "not
    /// signed in" from "provider unavailable".
    #[instrument(skip(self, access_token))]
    pub async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo, IdentityError> {
        let url = format!("{}{USERINFO_PATH}", self.inner.endpoint);

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Status(status.as_u16()));
        }

        Ok(response.json::<UserInfo>().await?)
    }
}
