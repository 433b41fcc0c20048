use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory bearer credential shared between the HTTP client and whoever
/// drives login/logout. Injected at construction rather than read from a
/// global; cloning shares the same underlying slot.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }

    pub fn get(&self) -> Option<String> {
        self.inner.read().clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write() = Some(token.into());
    }

    /// Drops the stored credential. Called on logout and whenever the
    /// backend answers 401.
    pub fn clear(&self) {
        let had_token = self.inner.write().take().is_some();
        if had_token {
            tracing::info!("cleared stored credential token");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }
}
