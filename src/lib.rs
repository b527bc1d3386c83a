//! # panel-session
//!
//! Per-session lifecycle coordination for an embedded agent panel.
//!
//! A host application embeds three independently-lifecycled subsystems: an
//! editor/workspace event source, a background worker process (the agent),
//! and an embedded UI surface (the panel). This crate is the plumbing that
//! keeps them coordinated for one session: it tracks focus, visibility, and
//! unread state, waits out the unpredictable initialization order of the
//! agent and the panel container, and tears everything down without leaking
//! observers when the session closes mid-flight.
//!
//! ## Quick start
//!
//! A session is built from explicit collaborator references and driven by
//! host events:
//!
//! ```no_run
//! use std::sync::Arc;
//! use panel_session::{HostEvent, SessionBuilder};
//! # use panel_session::{PanelIcon, PanelWindow, SettingsStore, ShownCallback};
//! # struct Window;
//! # impl PanelWindow for Window {
//! #     fn show(&self, on_shown: ShownCallback) { on_shown() }
//! #     fn hide(&self) {}
//! #     fn set_icon(&self, _icon: PanelIcon) {}
//! #     fn mount_placeholder(&self) {}
//! #     fn mount_view(&self, _view: Arc<dyn panel_session::PanelView>) {}
//! # }
//! # struct Settings;
//! # impl SettingsStore for Settings {
//! #     fn first_run(&self) -> bool { false }
//! #     fn set_first_run(&self, _value: bool) -> panel_session::Result<()> { Ok(()) }
//! # }
//!
//! #[tokio::main]
//! async fn main() {
//!     let controller = SessionBuilder::new(Arc::new(Window), Arc::new(Settings))
//!         .spawn();
//!
//!     controller.dispatch(HostEvent::PanelRegistered);
//!     controller.dispatch(HostEvent::WindowFocusChanged { focused: true });
//!     controller.toggle_visible();
//!
//!     controller.dispose();
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`session`]: the controller state machine, command protocol, and the
//!   task that owns all mutable coordination state
//! - [`subscriptions`]: (topic, handler) registrations with disposal tokens
//! - [`readiness`]: deferred actions gated on asynchronous dependencies
//! - [`focus`]: the focused/visible pair and its notification rules
//! - [`notify`]: fire-and-forget typed notifications to the panel
//! - [`observers`]: the generic callback registry underneath it all
//! - [`host`]: the collaborator interfaces the host implements
//! - [`events`]: host event payloads and topics
//! - [`error`]: error types for collaborator failures
//!
//! ## Concurrency model
//!
//! One spawned task per session owns the state bundle; every mutation is
//! marshaled onto it as a command, so the single-writer discipline is
//! enforced by ownership rather than convention. Disposal is the only
//! cancellation primitive: it flips an atomic flag checked at every entry
//! point and inside every stored callback, unregisters all subscriptions
//! before returning, and lets the task finish its in-flight command.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod events;
pub mod focus;
pub mod host;
pub mod notify;
pub mod observers;
pub mod readiness;
pub mod session;
pub mod subscriptions;

// Re-export commonly used types for external API
pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use events::{HostEvent, HostTopic};
pub use focus::FocusVisibilityState;
pub use host::{
    AgentHandle, PanelIcon, PanelSurface, PanelView, PanelWindow, ReadyCallback, SettingsStore,
    ShownCallback, UnreadCallback, UnreadSource,
};
pub use notify::{NotificationBridge, PanelNotification};
pub use observers::{ObserverRegistry, ObserverToken};
pub use readiness::{Deps, GateAction, ReadinessGate};
pub use session::{LifecycleState, SessionBuilder, SessionController, StateSnapshot};
pub use subscriptions::{HostHandler, SubscriptionManager, SubscriptionToken};
