//! Session task spawning
//!
//! One task per session owns the mutable state bundle and drains the
//! command channel in FIFO order. The loop exits on the `Shutdown` command
//! queued by `SessionController::dispose` — disposal is the session's only
//! cancellation primitive — and then runs teardown.

use tokio::sync::mpsc;

use super::commands::SessionCommand;
use super::state::SessionState;

/// Spawn the session task.
///
/// Disposal does not preempt an in-flight command: a command already being
/// handled finishes, and everything after the shutdown signal is dropped by
/// the disposed-flag check inside `SessionState::handle`.
pub(super) fn spawn_session_task(
    mut state: SessionState,
    mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
) {
    tokio::spawn(async move {
        while let Some(command) = command_rx.recv().await {
            if matches!(command, SessionCommand::Shutdown) {
                break;
            }
            state.handle(command);
        }
        state.shutdown();
    });
}
