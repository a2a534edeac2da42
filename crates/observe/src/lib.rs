//! Logging initialization shared by the binaries of the workspace.
pub mod config;
pub mod tracing;

pub use self::config::Config;
