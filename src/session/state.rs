//! Task-owned session state
//!
//! All mutable coordination state for one session lives here, owned by the
//! session task spawned in `background`. Ownership is the single-writer
//! discipline: nothing in this module is shared or locked, because only the
//! task ever touches it. Everything arriving from another execution context
//! comes in as a [`SessionCommand`](super::commands::SessionCommand).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::config::SessionConfig;
use crate::focus::FocusVisibilityState;
use crate::host::{PanelIcon, PanelSurface, PanelWindow, SettingsStore, ShownCallback};
use crate::notify::NotificationBridge;
use crate::readiness::{Deps, ReadinessGate};
use crate::subscriptions::SubscriptionManager;

use super::commands::SessionCommand;

/// Lifecycle of one session.
///
/// `Uninitialized → Initializing → Ready → Disposed`; disposal is reachable
/// from any state and permits no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleState {
    /// Constructed, registrations not yet made
    Uninitialized,
    /// Registrations made, waiting on agent and panel readiness
    Initializing,
    /// Panel content loaded and mounted
    Ready,
    /// Torn down; every operation is a no-op
    Disposed,
}

/// Point-in-time view of the session's coordination state.
///
/// This is the pull side of the notification contract: the bridge never
/// replays missed notifications, so the panel queries a snapshot when it
/// attaches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    /// Owning session id
    pub session_id: String,
    /// Current lifecycle state
    pub lifecycle: LifecycleState,
    /// Raw host-window focus
    pub focused: bool,
    /// Raw panel visibility
    pub visible: bool,
    /// Combined effective focus (`focused AND visible`)
    pub combined: bool,
    /// Last observed unread count
    pub unread_count: u32,
    /// When the snapshot was taken
    pub captured_at: DateTime<Utc>,
}

/// Collaborators the session task keeps for the life of the session.
///
/// The agent and unread-source collaborators only receive registrations at
/// construction time, so they are not retained here. `window` and `settings`
/// are required; a missing panel degrades content load to a logged skip.
pub(super) struct Collaborators {
    pub panel: Option<Arc<dyn PanelSurface>>,
    pub window: Arc<dyn PanelWindow>,
    pub settings: Arc<dyn SettingsStore>,
}

/// Mutable state bundle owned by the session task
pub(super) struct SessionState {
    pub session_id: String,
    pub config: SessionConfig,
    pub lifecycle: LifecycleState,
    pub disposed: Arc<AtomicBool>,
    pub created_at: DateTime<Utc>,
    pub focus: FocusVisibilityState,
    pub gate: ReadinessGate,
    pub bridge: NotificationBridge,
    pub unread_count: u32,
    pub first_run_pending: bool,
    pub subscriptions: Arc<SubscriptionManager>,
    pub collaborators: Collaborators,
    pub command_tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionState {
    /// Apply one command. Disposal is checked here as well as at the public
    /// entry points: commands already queued when the session was disposed
    /// must not touch a dead session.
    pub fn handle(&mut self, command: SessionCommand) {
        if self.disposed.load(Ordering::SeqCst) {
            log::trace!("[{}] dropping command on disposed session", self.session_id);
            return;
        }
        match command {
            SessionCommand::HostEvent(event) => self.subscriptions.dispatch(&event),
            SessionCommand::SetFocused(focused) => {
                self.focus.set_focused(focused, &mut self.bridge);
            }
            SessionCommand::SetVisible(visible) => {
                self.focus.set_visible(visible, &mut self.bridge);
            }
            SessionCommand::AgentReady => self.gate.mark_ready(Deps::AGENT),
            SessionCommand::PanelContainerRegistered => {
                // Registration fires once per session; a duplicate must not
                // re-mount the placeholder over a loaded view.
                if !self.gate.is_satisfied(Deps::PANEL) {
                    self.collaborators.window.mount_placeholder();
                    self.gate.mark_ready(Deps::PANEL);
                }
            }
            SessionCommand::PanelInitialized => self.handle_panel_initialized(),
            SessionCommand::LoadPanel => self.load_panel(),
            SessionCommand::UnreadsChanged(count) => {
                self.unread_count = count;
                let icon = if count > 0 {
                    PanelIcon::Attention
                } else {
                    PanelIcon::Neutral
                };
                self.collaborators.window.set_icon(icon);
            }
            SessionCommand::Show { on_shown } => self.show(on_shown),
            SessionCommand::ShowCompleted { on_shown } => self.show_completed(on_shown),
            SessionCommand::Hide => self.collaborators.window.hide(),
            SessionCommand::ToggleVisible => {
                if self.focus.visible() {
                    self.collaborators.window.hide();
                } else {
                    self.show(None);
                }
            }
            SessionCommand::AddVisibilityObserver { token, observer } => {
                self.focus.observers_mut().add_with_token(token, observer);
            }
            SessionCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            // Handled by the run loop before it reaches here.
            SessionCommand::Shutdown => {}
        }
    }

    /// First-run policy: the first time the panel subsystem reports
    /// initialized on a fresh install, show the panel once and persist the
    /// flag only after the host confirms the show completed. A crash before
    /// that confirmation leaves the flag set, so the next launch shows
    /// again.
    fn handle_panel_initialized(&mut self) {
        if !self.first_run_pending {
            return;
        }
        self.first_run_pending = false;
        log::info!("[{}] first run: showing panel", self.session_id);
        let settings = Arc::clone(&self.collaborators.settings);
        self.show(Some(Box::new(move || {
            if let Err(e) = settings.set_first_run(false) {
                log::warn!("failed to persist first-run flag: {e}");
            }
        })));
    }

    /// One-time panel content load, run when the readiness gate fires.
    ///
    /// Swaps the loading placeholder for the rendered view, wires the
    /// notification stream, and moves the session to `Ready`. Any failure
    /// degrades to a logged skip; the session itself stays alive.
    fn load_panel(&mut self) {
        let Some(panel) = self.collaborators.panel.clone() else {
            log::warn!(
                "[{}] dependencies ready but no panel collaborator; skipping content load",
                self.session_id
            );
            return;
        };
        if let Err(e) = panel.load() {
            log::warn!("[{}] panel load failed: {e}", self.session_id);
            return;
        }

        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        panel.connect(notify_rx);
        self.bridge.attach(notify_tx);

        match panel.view() {
            Some(view) => self.collaborators.window.mount_view(view),
            None => log::warn!(
                "[{}] panel loaded but produced no view to mount",
                self.session_id
            ),
        }
        self.transition(LifecycleState::Ready);
    }

    /// Forward a show request to the host window.
    ///
    /// Host show may be asynchronous; completion is marshaled back onto the
    /// session task as `ShowCompleted`.
    fn show(&mut self, on_shown: Option<ShownCallback>) {
        let command_tx = self.command_tx.clone();
        let disposed = Arc::clone(&self.disposed);
        self.collaborators.window.show(Box::new(move || {
            if disposed.load(Ordering::SeqCst) {
                return;
            }
            let _ = command_tx.send(SessionCommand::ShowCompleted { on_shown });
        }));
    }

    /// The host confirmed the show. The caller's callback runs first, then
    /// the panel view receives input focus.
    fn show_completed(&mut self, on_shown: Option<ShownCallback>) {
        if let Some(callback) = on_shown {
            callback();
        }
        if !self.config.focus_panel_on_show {
            return;
        }
        let view = self
            .collaborators
            .panel
            .as_ref()
            .and_then(|panel| panel.view());
        match view {
            Some(view) => view.focus(),
            None => log::debug!("[{}] shown with no panel view to focus", self.session_id),
        }
    }

    /// Build the pull-model snapshot
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            session_id: self.session_id.clone(),
            lifecycle: self.lifecycle,
            focused: self.focus.focused(),
            visible: self.focus.visible(),
            combined: self.focus.combined(),
            unread_count: self.unread_count,
            captured_at: Utc::now(),
        }
    }

    /// Record a lifecycle transition
    pub fn transition(&mut self, to: LifecycleState) {
        if self.lifecycle == to {
            return;
        }
        log::debug!(
            "[{}] lifecycle {:?} -> {to:?}",
            self.session_id,
            self.lifecycle
        );
        self.lifecycle = to;
    }

    /// Tear down, after the run loop stops.
    ///
    /// The disposed flag was already set by `SessionController::dispose`
    /// before the shutdown command was queued; storing it again keeps this
    /// path self-contained.
    pub fn shutdown(&mut self) {
        if self.lifecycle == LifecycleState::Disposed {
            return;
        }
        self.disposed.store(true, Ordering::SeqCst);
        self.subscriptions.unsubscribe_all();
        self.gate.drain_pending();
        self.focus.observers_mut().clear();
        self.bridge.detach();
        self.transition(LifecycleState::Disposed);
        let uptime = Utc::now().signed_duration_since(self.created_at);
        log::info!(
            "[{}] session disposed after {}s",
            self.session_id,
            uptime.num_seconds()
        );
    }
}
