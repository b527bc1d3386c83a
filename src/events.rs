//! Host event payloads and topic classification
//!
//! Events originate in the host application (editor, workspace, window and
//! panel chrome) and are fed to the session through
//! `SessionController::dispatch`.

use serde::{Deserialize, Serialize};

/// One event delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HostEvent {
    /// An editor was opened on a document
    #[serde(rename_all = "camelCase")]
    EditorOpened {
        /// Host identifier of the opened document
        document: String,
    },

    /// An editor was closed
    #[serde(rename_all = "camelCase")]
    EditorClosed {
        /// Host identifier of the closed document
        document: String,
    },

    /// Workspace structure changed (roots, modules, project layout)
    WorkspaceStructureChanged,

    /// The host's top-level window gained or lost focus
    #[serde(rename_all = "camelCase")]
    WindowFocusChanged {
        /// Whether the host window now has focus
        focused: bool,
    },

    /// The host created the panel's container for this session.
    ///
    /// Fires once per session.
    PanelRegistered,

    /// The panel's container was shown or hidden
    #[serde(rename_all = "camelCase")]
    PanelVisibilityChanged {
        /// Whether the panel is now visible
        visible: bool,
    },
}

impl HostEvent {
    /// Topic used to match subscriptions
    #[must_use]
    pub fn topic(&self) -> HostTopic {
        match self {
            Self::EditorOpened { .. } => HostTopic::EditorOpened,
            Self::EditorClosed { .. } => HostTopic::EditorClosed,
            Self::WorkspaceStructureChanged => HostTopic::WorkspaceStructureChanged,
            Self::WindowFocusChanged { .. } => HostTopic::WindowFocusChanged,
            Self::PanelRegistered => HostTopic::PanelRegistered,
            Self::PanelVisibilityChanged { .. } => HostTopic::PanelVisibilityChanged,
        }
    }
}

/// Subscription topics for host events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostTopic {
    /// Editor opened events
    EditorOpened,
    /// Editor closed events
    EditorClosed,
    /// Workspace structure events
    WorkspaceStructureChanged,
    /// Host window focus events
    WindowFocusChanged,
    /// Panel container registration
    PanelRegistered,
    /// Panel visibility events
    PanelVisibilityChanged,
}
