//! Host event subscriptions
//!
//! Registers and deregisters the session's interest in host events and owns
//! the disposal of every registration. Registration and disposal may happen
//! from any thread, so the entry list sits behind a mutex; this is the only
//! shared bookkeeping in the crate — coordination state itself is owned by
//! the session task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::events::{HostEvent, HostTopic};
use crate::observers::ObserverToken;

/// Handler invoked with each event on its subscribed topic
pub type HostHandler = Arc<dyn Fn(&HostEvent) + Send + Sync>;

/// Disposal handle for one subscription.
///
/// Released exactly once, either explicitly or through session disposal;
/// a handler never fires after its token is disposed.
#[derive(Debug, Clone)]
pub struct SubscriptionToken {
    inner: ObserverToken,
}

impl SubscriptionToken {
    fn live() -> Self {
        Self {
            inner: ObserverToken::new(),
        }
    }

    fn dead() -> Self {
        Self {
            inner: ObserverToken::disposed(),
        }
    }

    /// Revoke the subscription; safe to call more than once
    pub fn dispose(&self) {
        self.inner.dispose();
    }

    /// Whether the subscription has been revoked
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }
}

struct SubscriptionEntry {
    topic: HostTopic,
    token: SubscriptionToken,
    handler: HostHandler,
}

/// Registry of (topic, handler) subscriptions for one session
pub struct SubscriptionManager {
    session_disposed: Arc<AtomicBool>,
    entries: Mutex<Vec<SubscriptionEntry>>,
}

impl SubscriptionManager {
    /// Create a registry guarded by the session's disposed flag
    #[must_use]
    pub fn new(session_disposed: Arc<AtomicBool>) -> Self {
        Self {
            session_disposed,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Register interest in one topic.
    ///
    /// On a disposed session this is a no-op that returns an
    /// already-disposed token; it never errors.
    pub fn subscribe(&self, topic: HostTopic, handler: HostHandler) -> SubscriptionToken {
        if self.session_disposed.load(Ordering::SeqCst) {
            log::debug!("subscribe({topic:?}) on disposed session, returning dead token");
            return SubscriptionToken::dead();
        }
        let token = SubscriptionToken::live();
        self.entries.lock().push(SubscriptionEntry {
            topic,
            token: token.clone(),
            handler,
        });
        token
    }

    /// Fire every live handler subscribed to the event's topic, in
    /// registration order.
    ///
    /// Handlers run outside the entry lock, so a handler may subscribe or
    /// dispose tokens without deadlocking. Disposed entries are pruned.
    pub fn dispatch(&self, event: &HostEvent) {
        if self.session_disposed.load(Ordering::SeqCst) {
            return;
        }
        let topic = event.topic();
        let matching: Vec<(SubscriptionToken, HostHandler)> = {
            let mut entries = self.entries.lock();
            entries.retain(|entry| !entry.token.is_disposed());
            entries
                .iter()
                .filter(|entry| entry.topic == topic)
                .map(|entry| (entry.token.clone(), Arc::clone(&entry.handler)))
                .collect()
        };
        for (token, handler) in matching {
            // Re-checked per handler: an earlier handler may have disposed
            // this token or the whole session.
            if token.is_disposed() || self.session_disposed.load(Ordering::SeqCst) {
                continue;
            }
            handler(event);
        }
    }

    /// Dispose every subscription and drop its handler.
    ///
    /// Idempotent; called once at session disposal.
    pub fn unsubscribe_all(&self) {
        let drained: Vec<SubscriptionEntry> = std::mem::take(&mut *self.entries.lock());
        for entry in &drained {
            entry.token.dispose();
        }
        if !drained.is_empty() {
            log::debug!("released {} subscription(s)", drained.len());
        }
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| !entry.token.is_disposed())
            .count()
    }

    /// Whether no live subscriptions remain
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
