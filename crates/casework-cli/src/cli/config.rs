use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use casework_core::auth::AccessRole;
use casework_core::CoreConfig;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.json";

/// CLI configuration that can be loaded from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Directory holding the case snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// User id that authors comments and task updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user_id: Option<String>,

    /// Access role of the signed-in user (defaults to Investigator)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AccessRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_reply_depth: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval_secs: Option<u64>,
}

impl CliConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// `config.json` in the default data directory, loaded only if present
    pub fn load_default() -> Result<Option<Self>> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize config")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to deserialize config")
    }

    pub fn role(&self) -> AccessRole {
        self.role.unwrap_or(AccessRole::Investigator)
    }

    /// Core settings; `data_dir_override` (from `--data-dir`) wins over the file
    pub fn core_config(&self, data_dir_override: Option<PathBuf>) -> CoreConfig {
        let data_dir = data_dir_override
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(CoreConfig::default_data_dir);

        let mut config = CoreConfig::new(data_dir);
        if let Some(depth) = self.max_reply_depth {
            config = config.with_max_reply_depth(depth);
        }
        if let Some(secs) = self.refresh_interval_secs {
            config = config.with_refresh_interval(Duration::from_secs(secs.max(1)));
        }
        if let Some(ref user_id) = self.current_user_id {
            config = config.with_current_user(user_id.clone());
        }
        config
    }
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".casework"))
        .unwrap_or_else(|| PathBuf::from("casework_data"))
        .join(CONFIG_FILE)
}
