//! Host collaborator interfaces
//!
//! The session is constructed with explicit references to its collaborators
//! instead of looking them up from an ambient registry. Each trait is the
//! narrow surface the coordination core needs; rendering, RPC wire formats,
//! and window management stay on the host's side of the boundary.
//!
//! Callbacks handed to collaborators may be invoked from any thread. Every
//! callback the session registers marshals back onto the session task before
//! touching state.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::notify::PanelNotification;

/// One-shot callback for a collaborator readiness signal
pub type ReadyCallback = Box<dyn FnOnce() + Send>;

/// Callback invoked with the current unread count
pub type UnreadCallback = Box<dyn Fn(u32) + Send + Sync>;

/// Callback invoked when the host finishes showing the panel window
pub type ShownCallback = Box<dyn FnOnce() + Send>;

/// Background worker process providing domain functionality.
///
/// The worker's wire protocol is entirely its own concern; the session only
/// needs to know when it is ready.
pub trait AgentHandle: Send + Sync {
    /// Register a callback invoked exactly once when the worker signals
    /// ready. May fire before or after the panel container is registered.
    fn on_did_start(&self, callback: ReadyCallback);
}

/// Rendered view handle produced by the panel, spliced into the host window
pub trait PanelView: Send + Sync {
    /// Give the view input focus
    fn focus(&self);
}

/// The embedded UI surface rendering domain content
pub trait PanelSurface: Send + Sync {
    /// Register a callback invoked once when the panel subsystem finishes
    /// its own initialization. Drives the first-run show policy.
    fn on_did_initialize(&self, callback: ReadyCallback);

    /// Perform the one-time content load.
    ///
    /// # Errors
    /// Returns an error if the panel cannot load its content; the session
    /// logs and degrades rather than failing.
    fn load(&self) -> Result<()>;

    /// Hand the panel the receive-side of its notification stream.
    ///
    /// The stream carries no replay; on attach the panel should pull current
    /// state via `SessionController::snapshot`.
    fn connect(&self, notifications: mpsc::UnboundedReceiver<PanelNotification>);

    /// Accessor for the rendered view, once loaded
    fn view(&self) -> Option<Arc<dyn PanelView>>;
}

/// Icon state for the panel's window button.
///
/// Two-valued on purpose: the host shows attention/no-attention, not a
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelIcon {
    /// No unread activity
    Neutral,
    /// Unread activity pending
    Attention,
}

/// The host's window chrome around the panel
pub trait PanelWindow: Send + Sync {
    /// Ask the host to show the panel window.
    ///
    /// Host show may be asynchronous (animated); `on_shown` is invoked when
    /// it completes, possibly from a host thread.
    fn show(&self, on_shown: ShownCallback);

    /// Ask the host to hide the panel window
    fn hide(&self);

    /// Update the window button icon
    fn set_icon(&self, icon: PanelIcon);

    /// Mount the loading placeholder shown until panel content is ready
    fn mount_placeholder(&self);

    /// Replace the window contents with the panel's rendered view
    fn mount_view(&self, view: Arc<dyn PanelView>);
}

/// Persistent settings shared across sessions
pub trait SettingsStore: Send + Sync {
    /// Whether this install has never completed a first-run show
    fn first_run(&self) -> bool;

    /// Persist the first-run flag.
    ///
    /// # Errors
    /// Returns an error if the backing store rejects the write.
    fn set_first_run(&self, value: bool) -> Result<()>;
}

/// Source of unread-activity counts
pub trait UnreadSource: Send + Sync {
    /// Register a callback invoked whenever the unread count changes
    fn on_unreads_changed(&self, callback: UnreadCallback);
}
