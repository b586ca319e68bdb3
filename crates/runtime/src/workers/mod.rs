//! Worker tasks that back the runtime orchestration.
//!
//! The plugin worker is the single owner of the controller and the host.

mod plugin;

pub use plugin::{Command, PluginWorker};
