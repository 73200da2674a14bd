//! Authentication state.
//!
//! Signing in and out belongs to the auth service; view-models only need to
//! know whether a customer is signed in right now, and to hear about it when
//! that changes.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared "is the customer signed in" flag with change notification.
#[derive(Clone)]
pub struct AuthState {
    inner: Arc<watch::Sender<bool>>,
}

impl AuthState {
    #[must_use]
    pub fn new(authenticated: bool) -> Self {
        let (tx, _rx) = watch::channel(authenticated);
        Self {
            inner: Arc::new(tx),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        *self.inner.borrow()
    }

    /// Record a sign-in or sign-out. Subscribers are woken only on change.
    pub fn set_authenticated(&self, authenticated: bool) {
        self.inner.send_if_modified(|current| {
            let changed = *current != authenticated;
            *current = authenticated;
            changed
        });
    }

    /// A receiver that observes every subsequent change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.subscribe()
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
