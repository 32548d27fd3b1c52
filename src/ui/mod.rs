//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard and mouse input handling
//! - `events` - Background task event processing
//! - `tasks` - Spawned load and persistence tasks
//! - `render` - Layout and overlay dispatch
//! - `albums` - Album list widget
//! - `filters` - Filter navigation widget
//! - `detail` - Detail overlay and mask
//! - `status` - Location and status bars
//! - `help` - Keybinding help overlay

mod albums;
mod detail;
mod events;
mod filters;
mod help;
mod input;
mod loop_runner;
mod render;
mod status;
mod tasks;

// Re-export the public API
pub use events::handle_app_event;
pub use loop_runner::{run, Action};
pub use tasks::{request_load, request_remove, request_toggle};
