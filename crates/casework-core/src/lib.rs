pub mod analysis;
pub mod auth;
pub mod config;
pub mod constants;
pub mod discussion;
pub mod error;
pub mod events;
pub mod models;
pub mod render;
pub mod runtime;
pub mod search;
pub mod seed;
pub mod store;
pub mod time_format;
pub mod tracing_setup;

// Re-export the types most callers need at crate root for convenience
pub use config::CoreConfig;
pub use discussion::DiscussionBoard;
pub use error::{CoreError, CoreResult};
pub use store::{CaseRepository, MemoryRepository, SnapshotStore};
