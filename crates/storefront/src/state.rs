//! Application context shared across the shell.
//!
//! `AppContext` is the explicit replacement for module-level singletons:
//! everything a shell needs - configuration, the durable store, the catalog
//! client, the identity collaborator - is constructed once at startup and
//! passed by handle. Whether the identity provider is configured is a plain
//! state question (`identity()` is `Some`), not a hidden one-time flag.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::{CatalogClient, RequestSequence};
use crate::config::StorefrontConfig;
use crate::identity::IdentityClient;
use crate::services::auth::AuthService;
use crate::storage::{FileStore, Storage, StorageError};

/// Error constructing the application context.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// The durable store could not be opened.
    #[error("failed to open durable storage: {0}")]
    Storage(#[from] StorageError),

    /// An HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Application state shared across the shell.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppContext {
    inner: Arc<AppContextInner>,
}

struct AppContextInner {
    config: StorefrontConfig,
    storage: Arc<dyn Storage>,
    catalog: CatalogClient,
    identity: Option<IdentityClient>,
    requests: RequestSequence,
}

impl AppContext {
    /// Create the application context, opening file-backed storage under
    /// the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or an HTTP
    /// client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, ContextError> {
        let storage: Arc<dyn Storage> = Arc::new(FileStore::open(config.data_dir.clone())?);
        Self::with_storage(config, storage)
    }

    /// Create the application context over an explicit storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, ContextError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let identity = config
            .identity
            .as_ref()
            .map(IdentityClient::configure)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppContextInner {
                config,
                storage,
                catalog,
                identity,
                requests: RequestSequence::new(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a handle to the durable store.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.inner.storage)
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the identity provider client, if one is
    /// configured.
    #[must_use]
    pub fn identity(&self) -> Option<&IdentityClient> {
        self.inner.identity.as_ref()
    }

    /// Get the request-generation sequence used to discard superseded
    /// fetches.
    #[must_use]
    pub fn requests(&self) -> &RequestSequence {
        &self.inner.requests
    }

    /// Open the cart from durable storage.
    #[must_use]
    pub fn open_cart(&self) -> CartStore {
        CartStore::open(self.storage())
    }

    /// Create the authentication service over this context's storage.
    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.storage())
    }
}
