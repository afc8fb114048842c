//! Authentication service.
//!
//! The lightweight login flow: validates credentials locally, derives a
//! display identity from the email, and keeps the resulting user record in
//! durable storage so a session survives restarts. Credential verification
//! itself belongs to the external identity provider ([`crate::identity`]);
//! this service only owns the local session record.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use sole_supply_core::{Email, UserId};

use crate::error::report_absorbed;
use crate::storage::{Storage, keys};

/// The minimal user record kept in durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    /// Locally generated user ID.
    pub id: UserId,
    /// The email the user signed in with.
    pub email: Email,
    /// Display name, derived from the email local part.
    pub name: String,
    /// Generated avatar URL.
    pub avatar_url: String,
    /// When this session record was created.
    pub created_at: DateTime<Utc>,
}

/// Authentication service backed by durable storage.
pub struct AuthService {
    storage: Arc<dyn Storage>,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Sign in with email and password.
    ///
    /// Input is validated before anything else runs: empty fields and
    /// malformed emails are rejected without touching storage. On success
    /// the user record is written to durable storage best-effort - a write
    /// failure is logged and the in-memory record is still returned, so the
    /// session works for the rest of the run.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] if either field is empty,
    /// or [`AuthError::InvalidEmail`] if the email does not parse.
    pub fn login(&self, email: &str, password: &str) -> Result<StoredUser, AuthError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let email = Email::parse(email.trim())?;
        let name = email.local_part().to_string();
        let user = StoredUser {
            id: UserId::new(uuid::Uuid::new_v4().to_string()),
            avatar_url: avatar_url_for(&name),
            email,
            name,
            created_at: Utc::now(),
        };

        match serde_json::to_string(&user) {
            Ok(blob) => {
                if let Err(e) = self.storage.put(keys::CURRENT_USER, &blob) {
                    warn!(error = %e, "failed to persist user record");
                    report_absorbed(&e);
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to serialize user record");
                report_absorbed(&e);
            }
        }

        Ok(user)
    }

    /// The currently signed-in user, if any.
    ///
    /// A corrupted stored record is discarded (the blob is deleted) and
    /// reported as signed out rather than an error.
    #[must_use]
    pub fn current_user(&self) -> Option<StoredUser> {
        let blob = match self.storage.get(keys::CURRENT_USER) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read stored user");
                report_absorbed(&e);
                return None;
            }
        };

        match serde_json::from_str(&blob) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "stored user record is corrupted, discarding");
                report_absorbed(&e);
                if let Err(e) = self.storage.remove(keys::CURRENT_USER) {
                    warn!(error = %e, "failed to clear corrupted user record");
                }
                None
            }
        }
    }

    /// `true` when a valid user record is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Sign out, removing the stored user record.
    pub fn logout(&self) {
        if let Err(e) = self.storage.remove(keys::CURRENT_USER) {
            warn!(error = %e, "failed to remove user record on logout");
            report_absorbed(&e);
        }
    }
}

/// Generated avatar for a display name.
fn avatar_url_for(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        urlencoding::encode(name)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service_with_store() -> (AuthService, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        let service = AuthService::new(Arc::clone(&storage) as Arc<dyn Storage>);
        (service, storage)
    }

    #[test]
    fn test_login_rejects_empty_fields_before_storage() {
        let (service, storage) = service_with_store();

        assert!(matches!(
            service.login("", "hunter2"),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            service.login("user@example.com", "  "),
            Err(AuthError::MissingCredentials)
        ));
        assert!(storage.get(keys::CURRENT_USER).unwrap().is_none());
    }

    #[test]
    fn test_login_rejects_malformed_email() {
        let (service, _storage) = service_with_store();
        assert!(matches!(
            service.login("not-an-email", "hunter2"),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_login_derives_display_identity() {
        let (service, _storage) = service_with_store();
        let user = service.login("jordan.fan@example.com", "hunter2").unwrap();

        assert_eq!(user.name, "jordan.fan");
        assert_eq!(user.email.as_str(), "jordan.fan@example.com");
        assert!(user.avatar_url.contains("jordan.fan"));
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_login_persists_and_current_user_reads_back() {
        let (service, _storage) = service_with_store();
        let user = service.login("user@example.com", "hunter2").unwrap();

        assert_eq!(service.current_user(), Some(user));
        assert!(service.is_authenticated());
    }

    #[test]
    fn test_corrupted_user_record_discarded() {
        let storage = Arc::new(MemoryStore::with_entries([(
            keys::CURRENT_USER.to_string(),
            "}}garbage".to_string(),
        )]));
        let service = AuthService::new(Arc::clone(&storage) as Arc<dyn Storage>);

        assert!(service.current_user().is_none());
        assert!(storage.get(keys::CURRENT_USER).unwrap().is_none());
    }

    #[test]
    fn test_logout_clears_record() {
        let (service, storage) = service_with_store();
        service.login("user@example.com", "hunter2").unwrap();

        service.logout();

        assert!(!service.is_authenticated());
        assert!(storage.get(keys::CURRENT_USER).unwrap().is_none());
    }
}
