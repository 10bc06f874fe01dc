//! Bearer token sources
//!
//! Token storage lives outside this crate. The client only asks a
//! [`TokenProvider`] for the current token on every request.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Supplies the bearer token for outgoing requests
pub trait TokenProvider: Send + Sync {
    /// Current token, or `None` for anonymous requests
    fn token(&self) -> Option<String>;
}

/// Anonymous requests
#[derive(Clone, Copy, Debug, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// A token fixed at construction
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wrap a token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

/// A token that can be replaced after login or cleared on logout.
///
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct SharedToken {
    slot: Arc<RwLock<Option<String>>>,
}

impl SharedToken {
    /// Empty slot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token
    pub fn set(&self, token: impl Into<String>) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Forget the token
    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl TokenProvider for SharedToken {
    fn token(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for SharedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedToken")
            .field("present", &self.token().is_some())
            .finish()
    }
}
