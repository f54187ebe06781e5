use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_MAX_REPLY_DEPTH, DEFAULT_REFRESH_INTERVAL_SECS};

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    /// Deepest comment level that still gets an inline reply form (top-level = 0)
    pub max_reply_depth: usize,
    /// Period of the activity feed auto-refresh
    pub refresh_interval: Duration,
    /// User that authors comments submitted through this core
    pub current_user_id: Option<String>,
}

impl CoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            max_reply_depth: DEFAULT_MAX_REPLY_DEPTH,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            current_user_id: None,
        }
    }

    pub fn with_max_reply_depth(mut self, depth: usize) -> Self {
        self.max_reply_depth = depth;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_current_user(mut self, user_id: impl Into<String>) -> Self {
        self.current_user_id = Some(user_id.into());
        self
    }

    /// `~/.casework`, or `./casework_data` when there is no home directory
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".casework"))
            .unwrap_or_else(|| PathBuf::from("casework_data"))
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(Self::default_data_dir())
    }
}
