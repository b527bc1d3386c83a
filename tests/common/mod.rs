//! Shared fake collaborators for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;

use panel_session::{
    AgentHandle, PanelIcon, PanelNotification, PanelSurface, PanelView, PanelWindow,
    ReadyCallback, Result, SessionController, SessionError, SettingsStore, ShownCallback,
    UnreadCallback, UnreadSource,
};

/// Drain the session task's queue.
///
/// Each snapshot round-trip flushes every command queued before it; commands
/// posted by handlers during a flush land in the next one. Four rounds cover
/// the deepest chain in the crate (host event -> built-in handler -> gate
/// action -> content load).
pub async fn settle(controller: &SessionController) {
    for _ in 0..4 {
        let _ = controller.snapshot().await;
    }
}

#[derive(Default)]
pub struct FakeAgent {
    callback: Mutex<Option<ReadyCallback>>,
}

impl FakeAgent {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Simulate the worker signaling ready; later calls are no-ops, the
    /// signal is one-shot.
    pub fn fire_started(&self) {
        if let Some(callback) = self.callback.lock().take() {
            callback();
        }
    }
}

impl AgentHandle for FakeAgent {
    fn on_did_start(&self, callback: ReadyCallback) {
        *self.callback.lock() = Some(callback);
    }
}

pub struct FakeView {
    pub focus_count: AtomicUsize,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl Default for FakeView {
    fn default() -> Self {
        Self {
            focus_count: AtomicUsize::new(0),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl PanelView for FakeView {
    fn focus(&self) {
        self.focus_count.fetch_add(1, Ordering::SeqCst);
        self.log.lock().push("focus".to_string());
    }
}

pub struct FakePanel {
    init_callback: Mutex<Option<ReadyCallback>>,
    notifications: Mutex<Option<mpsc::UnboundedReceiver<PanelNotification>>>,
    pub load_count: AtomicUsize,
    pub load_fails: AtomicBool,
    pub view: Arc<FakeView>,
}

impl FakePanel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            init_callback: Mutex::new(None),
            notifications: Mutex::new(None),
            load_count: AtomicUsize::new(0),
            load_fails: AtomicBool::new(false),
            view: Arc::new(FakeView::default()),
        })
    }

    /// Simulate the panel subsystem finishing initialization
    pub fn fire_initialized(&self) {
        if let Some(callback) = self.init_callback.lock().take() {
            callback();
        }
    }

    pub fn is_connected(&self) -> bool {
        self.notifications.lock().is_some()
    }

    /// Pull everything delivered to the panel so far
    pub fn drain_notifications(&self) -> Vec<PanelNotification> {
        let mut drained = Vec::new();
        if let Some(receiver) = self.notifications.lock().as_mut() {
            while let Ok(notification) = receiver.try_recv() {
                drained.push(notification);
            }
        }
        drained
    }
}

impl PanelSurface for FakePanel {
    fn on_did_initialize(&self, callback: ReadyCallback) {
        *self.init_callback.lock() = Some(callback);
    }

    fn load(&self) -> Result<()> {
        self.load_count.fetch_add(1, Ordering::SeqCst);
        if self.load_fails.load(Ordering::SeqCst) {
            return Err(SessionError::panel_load("content refused to load"));
        }
        Ok(())
    }

    fn connect(&self, notifications: mpsc::UnboundedReceiver<PanelNotification>) {
        *self.notifications.lock() = Some(notifications);
    }

    fn view(&self) -> Option<Arc<dyn PanelView>> {
        Some(Arc::clone(&self.view) as Arc<dyn PanelView>)
    }
}

pub struct FakeWindow {
    /// When set, `show` invokes its completion callback inline; when
    /// cleared, callbacks queue until `complete_pending_shows`.
    pub auto_complete_show: AtomicBool,
    pending_shown: Mutex<Vec<ShownCallback>>,
    pub show_count: AtomicUsize,
    pub hide_count: AtomicUsize,
    pub icons: Mutex<Vec<PanelIcon>>,
    pub placeholder_mounts: AtomicUsize,
    pub view_mounts: AtomicUsize,
}

impl FakeWindow {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            auto_complete_show: AtomicBool::new(true),
            pending_shown: Mutex::new(Vec::new()),
            show_count: AtomicUsize::new(0),
            hide_count: AtomicUsize::new(0),
            icons: Mutex::new(Vec::new()),
            placeholder_mounts: AtomicUsize::new(0),
            view_mounts: AtomicUsize::new(0),
        })
    }

    /// Finish every show the host left pending (simulates an animated show
    /// completing later)
    pub fn complete_pending_shows(&self) {
        let pending: Vec<ShownCallback> = std::mem::take(&mut *self.pending_shown.lock());
        for callback in pending {
            callback();
        }
    }

    pub fn last_icon(&self) -> Option<PanelIcon> {
        self.icons.lock().last().copied()
    }
}

impl PanelWindow for FakeWindow {
    fn show(&self, on_shown: ShownCallback) {
        self.show_count.fetch_add(1, Ordering::SeqCst);
        if self.auto_complete_show.load(Ordering::SeqCst) {
            on_shown();
        } else {
            self.pending_shown.lock().push(on_shown);
        }
    }

    fn hide(&self) {
        self.hide_count.fetch_add(1, Ordering::SeqCst);
    }

    fn set_icon(&self, icon: PanelIcon) {
        self.icons.lock().push(icon);
    }

    fn mount_placeholder(&self) {
        self.placeholder_mounts.fetch_add(1, Ordering::SeqCst);
    }

    fn mount_view(&self, _view: Arc<dyn PanelView>) {
        self.view_mounts.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MemorySettings {
    first_run: AtomicBool,
    pub fail_writes: AtomicBool,
    pub write_count: AtomicUsize,
}

impl MemorySettings {
    pub fn new(first_run: bool) -> Arc<Self> {
        Arc::new(Self {
            first_run: AtomicBool::new(first_run),
            fail_writes: AtomicBool::new(false),
            write_count: AtomicUsize::new(0),
        })
    }
}

impl SettingsStore for MemorySettings {
    fn first_run(&self) -> bool {
        self.first_run.load(Ordering::SeqCst)
    }

    fn set_first_run(&self, value: bool) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SessionError::settings("store rejected the write"));
        }
        self.first_run.store(value, Ordering::SeqCst);
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeUnreads {
    callback: Mutex<Option<UnreadCallback>>,
}

impl FakeUnreads {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Push a new unread count to the registered callback
    pub fn emit(&self, count: u32) {
        if let Some(callback) = self.callback.lock().as_ref() {
            callback(count);
        }
    }
}

impl UnreadSource for FakeUnreads {
    fn on_unreads_changed(&self, callback: UnreadCallback) {
        *self.callback.lock() = Some(callback);
    }
}
