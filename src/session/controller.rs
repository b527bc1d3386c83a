//! Public session handle
//!
//! Cheap-to-clone handle over the session task. Every operation checks the
//! disposed flag first and becomes a silent no-op on a dead session — host
//! teardown order relative to in-flight callbacks is not controllable, so
//! defensive no-ops are the contract at every entry point.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, oneshot};

use crate::events::{HostEvent, HostTopic};
use crate::observers::ObserverToken;
use crate::subscriptions::{HostHandler, SubscriptionManager, SubscriptionToken};

use super::commands::SessionCommand;
use super::state::StateSnapshot;

/// Handle to one session's lifecycle controller
#[derive(Clone)]
pub struct SessionController {
    session_id: String,
    disposed: Arc<AtomicBool>,
    subscriptions: Arc<SubscriptionManager>,
    command_tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionController {
    pub(super) fn new(
        session_id: String,
        disposed: Arc<AtomicBool>,
        subscriptions: Arc<SubscriptionManager>,
        command_tx: mpsc::UnboundedSender<SessionCommand>,
    ) -> Self {
        Self {
            session_id,
            disposed,
            subscriptions,
            command_tx,
        }
    }

    /// Unique id of the owning session
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Whether the session has been disposed
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Deliver a host event to the session.
    ///
    /// Events are routed through the subscription registry on the session
    /// task, in delivery order.
    pub fn dispatch(&self, event: HostEvent) {
        self.send(SessionCommand::HostEvent(event));
    }

    /// Register a handler for one host-event topic.
    ///
    /// The registration shares the session's disposal path; on a disposed
    /// session this returns an already-disposed token.
    pub fn subscribe(&self, topic: HostTopic, handler: HostHandler) -> SubscriptionToken {
        self.subscriptions.subscribe(topic, handler)
    }

    /// Observe raw panel visibility.
    ///
    /// The observer fires on every visibility event, whether or not the
    /// combined focus value changed.
    pub fn on_visibility_changed(
        &self,
        observer: impl Fn(bool) + Send + 'static,
    ) -> ObserverToken {
        if self.is_disposed() {
            return ObserverToken::disposed();
        }
        let token = ObserverToken::new();
        self.send(SessionCommand::AddVisibilityObserver {
            token: token.clone(),
            observer: Box::new(move |visible| observer(*visible)),
        });
        token
    }

    /// Ask the host to show the panel window
    pub fn show(&self) {
        self.send(SessionCommand::Show { on_shown: None });
    }

    /// Ask the host to show the panel window, then invoke `on_shown` once
    /// the host signals completion.
    ///
    /// Host show may be asynchronous (animated); the callback runs on the
    /// session task after completion, before the panel view receives input
    /// focus.
    pub fn show_then(&self, on_shown: impl FnOnce() + Send + 'static) {
        self.send(SessionCommand::Show {
            on_shown: Some(Box::new(on_shown)),
        });
    }

    /// Ask the host to hide the panel window
    pub fn hide(&self) {
        self.send(SessionCommand::Hide);
    }

    /// Show the panel when hidden, hide it when visible
    pub fn toggle_visible(&self) {
        self.send(SessionCommand::ToggleVisible);
    }

    /// Current coordination state, or `None` on a disposed session.
    ///
    /// This is the pull side of the notification contract: the bridge never
    /// replays, so an attaching panel asks for a snapshot instead. Because
    /// commands drain in FIFO order, the answer reflects every command sent
    /// before this call.
    pub async fn snapshot(&self) -> Option<StateSnapshot> {
        if self.is_disposed() {
            return None;
        }
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .command_tx
            .send(SessionCommand::Snapshot { reply: reply_tx })
            .is_err()
        {
            return None;
        }
        reply_rx.await.ok()
    }

    /// Tear the session down.
    ///
    /// Synchronous and idempotent. Before this returns, the disposed flag is
    /// set and every subscription is unregistered, so no host event or
    /// collaborator callback can reach the session afterwards; the session
    /// task finishes any in-flight command and then clears its observer
    /// registries.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            log::debug!("[{}] dispose on already-disposed session", self.session_id);
            return;
        }
        self.subscriptions.unsubscribe_all();
        let _ = self.command_tx.send(SessionCommand::Shutdown);
        log::info!("[{}] dispose requested", self.session_id);
    }

    fn send(&self, command: SessionCommand) {
        if self.is_disposed() {
            return;
        }
        let _ = self.command_tx.send(command);
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session_id", &self.session_id)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
