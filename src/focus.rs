//! Focus and visibility state
//!
//! Two independent booleans whose conjunction is what the panel experiences
//! as "focus": the panel is effectively focused only while the host window
//! has focus AND the panel is visible.
//!
//! Setters compute the combined value before and after the mutation and
//! issue notifications explicitly, which keeps ordering observable in tests.
//! Owned by the session task; no interior synchronization.

use crate::notify::{NotificationBridge, PanelNotification};
use crate::observers::ObserverRegistry;

/// The focused/visible pair driving panel notifications
pub struct FocusVisibilityState {
    focused: bool,
    visible: bool,
    visibility_observers: ObserverRegistry<bool>,
}

impl FocusVisibilityState {
    /// Create state with the host window focused and the panel hidden,
    /// matching the host's state when a workspace opens
    #[must_use]
    pub fn new() -> Self {
        Self {
            focused: true,
            visible: false,
            visibility_observers: ObserverRegistry::new(),
        }
    }

    /// Raw host-window focus
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Raw panel visibility
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Combined effective focus: `focused AND visible`
    #[must_use]
    pub fn combined(&self) -> bool {
        self.focused && self.visible
    }

    /// Registry of raw-visibility observers.
    ///
    /// Observers fire on every `set_visible` call, independent of the
    /// combined value; features like unread-icon updates key off raw
    /// visibility.
    pub fn observers_mut(&mut self) -> &mut ObserverRegistry<bool> {
        &mut self.visibility_observers
    }

    /// Update raw focus.
    ///
    /// Sends exactly one `FocusChanged` notification when the combined
    /// value changes, none otherwise.
    pub fn set_focused(&mut self, focused: bool, bridge: &mut NotificationBridge) {
        let before = self.combined();
        self.focused = focused;
        self.notify_combined(before, bridge);
    }

    /// Update raw visibility.
    ///
    /// Fires visibility observers and sends a `VisibilityChanged`
    /// notification on every call, then sends exactly one `FocusChanged`
    /// notification when the combined value changed.
    pub fn set_visible(&mut self, visible: bool, bridge: &mut NotificationBridge) {
        let before = self.combined();
        self.visible = visible;
        self.visibility_observers.fire(&visible);
        bridge.send(PanelNotification::VisibilityChanged { visible });
        self.notify_combined(before, bridge);
    }

    fn notify_combined(&mut self, before: bool, bridge: &mut NotificationBridge) {
        let after = self.combined();
        if before != after {
            bridge.send(PanelNotification::FocusChanged { focused: after });
        }
    }
}

impl Default for FocusVisibilityState {
    fn default() -> Self {
        Self::new()
    }
}
