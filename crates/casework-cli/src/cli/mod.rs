pub mod commands;
pub mod config;
pub mod protocol;
pub mod watch;

pub use commands::Workspace;
pub use config::CliConfig;
pub use protocol::{CliCommand, Response};
pub use watch::watch_activity;
