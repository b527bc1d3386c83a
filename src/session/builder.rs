//! Session construction
//!
//! Explicit dependency injection: a session is built from references to its
//! collaborators, with the host window and settings store required and the
//! rest optional. `spawn` performs every registration the session needs and
//! starts the task that owns its state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::events::{HostEvent, HostTopic};
use crate::focus::FocusVisibilityState;
use crate::host::{AgentHandle, PanelSurface, PanelWindow, SettingsStore, UnreadSource};
use crate::notify::NotificationBridge;
use crate::readiness::{Deps, ReadinessGate};
use crate::subscriptions::SubscriptionManager;

use super::background::spawn_session_task;
use super::commands::SessionCommand;
use super::controller::SessionController;
use super::state::{Collaborators, LifecycleState, SessionState};

/// Builder for one session's lifecycle controller
pub struct SessionBuilder {
    config: SessionConfig,
    agent: Option<Arc<dyn AgentHandle>>,
    panel: Option<Arc<dyn PanelSurface>>,
    unreads: Option<Arc<dyn UnreadSource>>,
    window: Arc<dyn PanelWindow>,
    settings: Arc<dyn SettingsStore>,
}

impl SessionBuilder {
    /// Start a builder from the required collaborators
    #[must_use]
    pub fn new(window: Arc<dyn PanelWindow>, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            config: SessionConfig::default(),
            agent: None,
            panel: None,
            unreads: None,
            window,
            settings,
        }
    }

    /// Override the default configuration
    #[must_use]
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach the background worker collaborator
    #[must_use]
    pub fn agent(mut self, agent: Arc<dyn AgentHandle>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Attach the panel collaborator
    #[must_use]
    pub fn panel(mut self, panel: Arc<dyn PanelSurface>) -> Self {
        self.panel = Some(panel);
        self
    }

    /// Attach the unread-count collaborator
    #[must_use]
    pub fn unreads(mut self, unreads: Arc<dyn UnreadSource>) -> Self {
        self.unreads = Some(unreads);
        self
    }

    /// Register everything and start the session task.
    ///
    /// Must be called on a tokio runtime. The returned controller is a cheap
    /// clone handle; the session lives until `dispose` is called.
    pub fn spawn(self) -> SessionController {
        let session_id = Uuid::new_v4().to_string();
        let disposed = Arc::new(AtomicBool::new(false));
        let subscriptions = Arc::new(SubscriptionManager::new(Arc::clone(&disposed)));
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        log::info!("[{session_id}] initializing session");

        register_builtin_subscriptions(&subscriptions, &command_tx);

        // Agent startup may signal from a worker thread; it is marshaled
        // onto the session task, never applied in place.
        match &self.agent {
            Some(agent) => {
                let tx = command_tx.clone();
                let disposed_flag = Arc::clone(&disposed);
                agent.on_did_start(Box::new(move || {
                    if disposed_flag.load(Ordering::SeqCst) {
                        return;
                    }
                    let _ = tx.send(SessionCommand::AgentReady);
                }));
            }
            None => log::debug!(
                "[{session_id}] no agent collaborator; panel content will not load"
            ),
        }

        if let Some(unreads) = &self.unreads {
            let tx = command_tx.clone();
            let disposed_flag = Arc::clone(&disposed);
            unreads.on_unreads_changed(Box::new(move |count| {
                if disposed_flag.load(Ordering::SeqCst) {
                    return;
                }
                let _ = tx.send(SessionCommand::UnreadsChanged(count));
            }));
        }

        // First-run flag is read exactly once, here; it is written back only
        // after the first show completes.
        let first_run = self.config.auto_show_on_first_run && self.settings.first_run();
        let mut first_run_pending = false;
        if first_run {
            match &self.panel {
                Some(panel) => {
                    first_run_pending = true;
                    let tx = command_tx.clone();
                    let disposed_flag = Arc::clone(&disposed);
                    panel.on_did_initialize(Box::new(move || {
                        if disposed_flag.load(Ordering::SeqCst) {
                            return;
                        }
                        let _ = tx.send(SessionCommand::PanelInitialized);
                    }));
                }
                None => log::debug!(
                    "[{session_id}] first run with no panel collaborator; skipping auto-show"
                ),
            }
        }

        let mut state = SessionState {
            session_id: session_id.clone(),
            config: self.config,
            lifecycle: LifecycleState::Uninitialized,
            disposed: Arc::clone(&disposed),
            created_at: Utc::now(),
            focus: FocusVisibilityState::new(),
            gate: ReadinessGate::new(),
            bridge: NotificationBridge::new(),
            unread_count: 0,
            first_run_pending,
            subscriptions: Arc::clone(&subscriptions),
            collaborators: Collaborators {
                panel: self.panel,
                window: self.window,
                settings: self.settings,
            },
            command_tx: command_tx.clone(),
        };

        // Content load waits on both asynchronous dependencies, in whichever
        // order they arrive.
        let tx = command_tx.clone();
        state.gate.on_all_ready(
            Deps::AGENT | Deps::PANEL,
            Box::new(move || {
                let _ = tx.send(SessionCommand::LoadPanel);
            }),
        );

        state.transition(LifecycleState::Initializing);
        spawn_session_task(state, command_rx);

        SessionController::new(session_id, disposed, subscriptions, command_tx)
    }
}

/// The session's own registrations, made before any event can be dispatched.
///
/// Focus, visibility, and container registration feed the state machine; the
/// editor and workspace topics are held so host-side consumers registered
/// through `SessionController::subscribe` share the session's disposal path.
fn register_builtin_subscriptions(
    subscriptions: &SubscriptionManager,
    command_tx: &mpsc::UnboundedSender<SessionCommand>,
) {
    let tx = command_tx.clone();
    subscriptions.subscribe(
        HostTopic::WindowFocusChanged,
        Arc::new(move |event| {
            if let HostEvent::WindowFocusChanged { focused } = event {
                let _ = tx.send(SessionCommand::SetFocused(*focused));
            }
        }),
    );

    let tx = command_tx.clone();
    subscriptions.subscribe(
        HostTopic::PanelVisibilityChanged,
        Arc::new(move |event| {
            if let HostEvent::PanelVisibilityChanged { visible } = event {
                let _ = tx.send(SessionCommand::SetVisible(*visible));
            }
        }),
    );

    let tx = command_tx.clone();
    subscriptions.subscribe(
        HostTopic::PanelRegistered,
        Arc::new(move |_| {
            let _ = tx.send(SessionCommand::PanelContainerRegistered);
        }),
    );

    subscriptions.subscribe(
        HostTopic::EditorOpened,
        Arc::new(|event| log::trace!("editor event: {event:?}")),
    );
    subscriptions.subscribe(
        HostTopic::EditorClosed,
        Arc::new(|event| log::trace!("editor event: {event:?}")),
    );
    subscriptions.subscribe(
        HostTopic::WorkspaceStructureChanged,
        Arc::new(|event| log::trace!("workspace event: {event:?}")),
    );
}
