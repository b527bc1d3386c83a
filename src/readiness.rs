//! Readiness gate for asynchronous dependencies
//!
//! Tracks which of the session's dependencies have finished initializing and
//! runs deferred actions exactly once when a required set is fully
//! satisfied. Arrival order is unconstrained: the agent may come up before
//! or after the panel container.
//!
//! Owned by the session task; no interior synchronization.

use bitflags::bitflags;

bitflags! {
    /// Dependency set tracked by the gate
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Deps: u8 {
        /// Background worker signaled ready
        const AGENT = 1 << 0;
        /// Host registered the panel container
        const PANEL = 1 << 1;
    }
}

/// Deferred action run when its required dependency set is satisfied
pub type GateAction = Box<dyn FnOnce() + Send>;

struct GateEntry {
    required: Deps,
    action: Option<GateAction>,
}

impl GateEntry {
    fn fired(&self) -> bool {
        self.action.is_none()
    }
}

/// Tracks dependency readiness and runs deferred actions at most once
pub struct ReadinessGate {
    ready: Deps,
    entries: Vec<GateEntry>,
}

impl ReadinessGate {
    /// Create a gate with no dependencies ready
    #[must_use]
    pub fn new() -> Self {
        Self {
            ready: Deps::empty(),
            entries: Vec::new(),
        }
    }

    /// Whether every dependency in `required` is ready
    #[must_use]
    pub fn is_satisfied(&self, required: Deps) -> bool {
        self.ready.contains(required)
    }

    /// Mark one dependency ready.
    ///
    /// Idempotent: marking an already-ready dependency is a no-op. When the
    /// mark completes a pending entry's required set, that entry's action
    /// runs here, once; qualifying entries run in registration order.
    pub fn mark_ready(&mut self, dep: Deps) {
        if self.ready.contains(dep) {
            log::debug!("dependency {dep:?} already ready");
            return;
        }
        self.ready |= dep;
        log::debug!("dependency {dep:?} ready, satisfied set now {:?}", self.ready);

        let ready = self.ready;
        for entry in &mut self.entries {
            if !entry.fired()
                && ready.contains(entry.required)
                && let Some(action) = entry.action.take()
            {
                action();
            }
        }
    }

    /// Run `action` once all dependencies in `required` are ready.
    ///
    /// If the set is already satisfied the action runs immediately; it is
    /// never skipped. Otherwise it is queued behind earlier registrations
    /// for the same transition.
    pub fn on_all_ready(&mut self, required: Deps, action: GateAction) {
        if self.ready.contains(required) {
            action();
            return;
        }
        self.entries.push(GateEntry {
            required,
            action: Some(action),
        });
    }

    /// Drop every unfired entry, logging what never became ready.
    ///
    /// A dependency that never initializes leaves its deferred actions
    /// unexecuted; that is tolerated, not escalated. Called at session
    /// teardown.
    pub fn drain_pending(&mut self) {
        for entry in &self.entries {
            if !entry.fired() {
                let missing = entry.required - self.ready;
                log::warn!(
                    "dropping deferred action: dependencies {missing:?} never became ready"
                );
            }
        }
        self.entries.clear();
    }

    /// Number of entries that have not fired
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|e| !e.fired()).count()
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}
