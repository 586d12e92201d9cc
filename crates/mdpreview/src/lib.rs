mod app;
pub mod command;
pub mod host;
pub mod logging;
pub mod views;
pub mod watcher;

/// Re-exports.
pub use app::{Args, RunCmd};
pub use host::{build_provider, FsHost};
