//! Generic observer registry
//!
//! A plain list of callbacks with add/fire semantics. The registry is owned
//! by the session task (single writer); cancellation crosses threads through
//! [`ObserverToken`], which is just a shared atomic flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Disposal handle for one registered observer.
///
/// Cloneable and cheap; `dispose` is idempotent. A disposed observer is
/// skipped and pruned on the next `fire`.
#[derive(Debug, Clone, Default)]
pub struct ObserverToken {
    disposed: Arc<AtomicBool>,
}

impl ObserverToken {
    /// Create a live token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token that is already disposed.
    ///
    /// Returned by registration calls on a dead session so callers always
    /// get a usable token back.
    #[must_use]
    pub fn disposed() -> Self {
        let token = Self::default();
        token.dispose();
        token
    }

    /// Revoke the observer; safe to call more than once
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    /// Whether the observer has been revoked
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

struct ObserverEntry<T> {
    token: ObserverToken,
    callback: Box<dyn Fn(&T) + Send>,
}

/// Ordered list of callbacks for one kind of value
pub struct ObserverRegistry<T> {
    observers: Vec<ObserverEntry<T>>,
}

impl<T> ObserverRegistry<T> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Register an observer and return its disposal token
    pub fn add(&mut self, callback: Box<dyn Fn(&T) + Send>) -> ObserverToken {
        let token = ObserverToken::new();
        self.add_with_token(token.clone(), callback);
        token
    }

    /// Register an observer under a caller-provided token.
    ///
    /// Used when the token must exist before the registration reaches the
    /// registry's owning task.
    pub fn add_with_token(&mut self, token: ObserverToken, callback: Box<dyn Fn(&T) + Send>) {
        if token.is_disposed() {
            return;
        }
        self.observers.push(ObserverEntry { token, callback });
    }

    /// Invoke live observers in registration order.
    ///
    /// Disposed entries are pruned before the pass.
    pub fn fire(&mut self, value: &T) {
        self.observers.retain(|entry| !entry.token.is_disposed());
        for entry in &self.observers {
            (entry.callback)(value);
        }
    }

    /// Dispose and drop every observer; idempotent
    pub fn clear(&mut self) {
        for entry in &self.observers {
            entry.token.dispose();
        }
        self.observers.clear();
    }

    /// Number of registered observers, disposed entries included until the
    /// next `fire`
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether the registry holds no observers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<T> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
