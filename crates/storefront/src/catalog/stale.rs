//! Request-generation tokens for discarding superseded responses.
//!
//! Catalog fetches are not cancelled when a newer request supersedes them
//! (rapid pagination, quick detail navigation), so a slow response can
//! resolve after a fresher one. Shells take a token before each fetch and
//! apply the result only if the token is still current.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing request generation counter.
///
/// ```rust
/// use sole_supply_storefront::catalog::RequestSequence;
///
/// let requests = RequestSequence::new();
/// let stale = requests.issue();
/// let fresh = requests.issue();
///
/// assert!(!requests.is_current(stale));
/// assert!(requests.is_current(fresh));
/// ```
#[derive(Debug, Default)]
pub struct RequestSequence {
    current: AtomicU64,
}

/// A token identifying one issued request generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

impl RequestSequence {
    /// Create a new sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new request generation, superseding all earlier tokens.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// `true` if `token` belongs to the most recently issued generation.
    /// A stale token means the response it guards was superseded and must
    /// not be shown.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current.load(Ordering::SeqCst) == token.0
    }
}
