//! Session configuration
//!
//! Policy knobs for a single session. Deserializable so hosts can load it
//! from their own settings storage; every field has a default.

use serde::Deserialize;

/// Configuration for one session's coordination policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Show the panel automatically the first time the panel subsystem
    /// finishes initializing on a fresh install
    pub auto_show_on_first_run: bool,

    /// Give the panel view input focus after the host completes a show
    pub focus_panel_on_show: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_show_on_first_run: true,
            focus_panel_on_show: true,
        }
    }
}
