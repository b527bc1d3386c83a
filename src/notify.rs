//! Panel notification delivery
//!
//! One-way, fire-and-forget delivery of typed payloads to the embedded
//! panel. There is no buffering and no replay: until a panel attaches, sends
//! are dropped. The panel compensates by pulling current state through
//! `SessionController::snapshot` when it attaches.

use serde::Serialize;
use tokio::sync::mpsc;

/// Typed payload pushed to the panel.
///
/// Serializes to the shape the panel's messaging layer expects:
/// `{"topic":"focusChanged","focused":true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "topic", rename_all = "camelCase")]
pub enum PanelNotification {
    /// Combined focus (raw focus AND raw visibility) changed
    #[serde(rename_all = "camelCase")]
    FocusChanged {
        /// New combined value
        focused: bool,
    },

    /// Raw panel visibility changed
    #[serde(rename_all = "camelCase")]
    VisibilityChanged {
        /// New raw visibility
        visible: bool,
    },
}

/// Send-side of the panel notification stream.
///
/// Per-topic ordering follows the order of the producing state changes: the
/// bridge is only ever driven by the session task, and the underlying
/// channel is FIFO.
pub struct NotificationBridge {
    sink: Option<mpsc::UnboundedSender<PanelNotification>>,
}

impl NotificationBridge {
    /// Create a bridge with no panel attached
    #[must_use]
    pub fn new() -> Self {
        Self { sink: None }
    }

    /// Attach the panel's notification sender.
    ///
    /// Replaces any previous attachment.
    pub fn attach(&mut self, sink: mpsc::UnboundedSender<PanelNotification>) {
        self.sink = Some(sink);
    }

    /// Drop the attachment; subsequent sends are discarded
    pub fn detach(&mut self) {
        self.sink = None;
    }

    /// Whether a panel is currently attached
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    /// Deliver a notification to the attached panel.
    ///
    /// No acknowledgment and no retry. With no panel attached, or a panel
    /// whose receiver is gone, the payload is dropped.
    pub fn send(&mut self, notification: PanelNotification) {
        let Some(sink) = self.sink.as_ref() else {
            log::trace!("no panel attached, dropping {notification:?}");
            return;
        };
        if sink.send(notification).is_err() {
            log::trace!("panel receiver gone, dropping notification");
            self.sink = None;
        }
    }
}

impl Default for NotificationBridge {
    fn default() -> Self {
        Self::new()
    }
}
