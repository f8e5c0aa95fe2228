//! tcluster: terminal console for a remote cluster management API.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod event;
pub mod ui;

/// Version injected at compile time via TCLUSTER_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("TCLUSTER_VERSION") {
    Some(v) => v,
    None => "dev",
};
