//! Session lifecycle controller
//!
//! This module is organized into logical submodules:
//! - `builder`: dependency injection and session start-up
//! - `commands`: the command protocol marshaling work onto the session task
//! - `state`: the task-owned state bundle and state machine
//! - `background`: the session task's run loop
//! - `controller`: the public, cloneable session handle

mod background;
mod builder;
mod commands;
mod controller;
mod state;

pub use builder::SessionBuilder;
pub use controller::SessionController;
pub use state::{LifecycleState, StateSnapshot};
