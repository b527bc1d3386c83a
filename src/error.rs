//! Error types for session coordination

use thiserror::Error;

/// Main error type for session coordination failures.
///
/// Failures surfaced here come from collaborators, never from the controller
/// itself: operations on a disposed session are silent no-ops, and a missing
/// collaborator degrades to a logged skip rather than an error.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Panel content failed to load
    #[error("Panel load failed: {0}")]
    PanelLoad(String),

    /// Persistent settings store failed to read or write
    #[error("Settings error: {0}")]
    Settings(String),

    /// Panel has no rendered view to mount or focus
    #[error("Panel view unavailable: {0}")]
    ViewUnavailable(String),

    /// Host window refused or failed an operation
    #[error("Host window error: {0}")]
    HostWindow(String),
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

impl SessionError {
    /// Create a panel load error
    pub fn panel_load(msg: impl Into<String>) -> Self {
        Self::PanelLoad(msg.into())
    }

    /// Create a settings error
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Create a view unavailable error
    pub fn view_unavailable(msg: impl Into<String>) -> Self {
        Self::ViewUnavailable(msg.into())
    }

    /// Create a host window error
    pub fn host_window(msg: impl Into<String>) -> Self {
        Self::HostWindow(msg.into())
    }
}
