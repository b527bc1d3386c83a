//! Session command protocol
//!
//! Every state mutation is marshaled onto the session task as one of these
//! commands. Host events, collaborator callbacks, and public operations all
//! funnel through the same FIFO channel, which is what gives notifications
//! their ordering guarantee.

use tokio::sync::oneshot;

use crate::events::HostEvent;
use crate::host::ShownCallback;
use crate::observers::ObserverToken;

use super::state::StateSnapshot;

/// Commands processed by the session task
pub(super) enum SessionCommand {
    /// Route a host event through the subscription registry
    HostEvent(HostEvent),

    /// Set raw host-window focus
    SetFocused(bool),

    /// Set raw panel visibility
    SetVisible(bool),

    /// The background worker signaled ready
    AgentReady,

    /// The host registered the panel's container
    PanelContainerRegistered,

    /// The panel subsystem finished initializing (first-run trigger)
    PanelInitialized,

    /// Readiness gate fired: perform the one-time panel content load
    LoadPanel,

    /// The unread count changed
    UnreadsChanged(u32),

    /// Ask the host to show the panel window
    Show {
        /// Invoked after the host signals show completion
        on_shown: Option<ShownCallback>,
    },

    /// The host finished showing the panel window
    ShowCompleted {
        /// Callback carried over from the originating `Show`
        on_shown: Option<ShownCallback>,
    },

    /// Ask the host to hide the panel window
    Hide,

    /// Show when hidden, hide when visible
    ToggleVisible,

    /// Register a raw-visibility observer under a pre-made token
    AddVisibilityObserver {
        /// Disposal token already handed to the caller
        token: ObserverToken,
        /// Observer invoked with the new raw visibility
        observer: Box<dyn Fn(&bool) + Send>,
    },

    /// Reply with the current coordination state (the panel's pull path)
    Snapshot {
        /// Reply channel; dropped without an answer on a disposed session
        reply: oneshot::Sender<StateSnapshot>,
    },

    /// Tear the session down
    Shutdown,
}
