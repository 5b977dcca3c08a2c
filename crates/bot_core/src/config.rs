//! Runtime configuration: defaults, then `config.toml`, then environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_FILE_PATH: &str = "config.toml";

/// Default dialogue TTL before the expiry sweep collects an abandoned draft.
pub const DEFAULT_STATE_TTL_MINUTES: u64 = 30;

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Directory for the durable file state store; `None` means in-memory.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    #[serde(default = "default_state_ttl_minutes")]
    pub state_ttl_minutes: u64,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Base URL of the public listings map, shown as a menu button when set.
    #[serde(default)]
    pub app_base_url: Option<String>,
}

fn default_state_ttl_minutes() -> u64 {
    DEFAULT_STATE_TTL_MINUTES
}

fn default_sweep_interval_secs() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECS
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            state_dir: None,
            state_ttl_minutes: DEFAULT_STATE_TTL_MINUTES,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            app_base_url: None,
        }
    }
}

impl BotConfig {
    /// Load the layered configuration.
    pub fn new() -> Self {
        let mut config = BotConfig::default();

        if Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                if let Ok(file_config) = toml::from_str::<BotConfig>(&content) {
                    config = file_config;
                }
            }
        }

        if let Ok(state_dir) = std::env::var("LOSTFOUND_STATE_DIR") {
            if !state_dir.is_empty() {
                config.state_dir = Some(PathBuf::from(state_dir));
            }
        }
        if let Some(minutes) = parse_u64_env("LOSTFOUND_STATE_TTL_MINUTES") {
            config.state_ttl_minutes = minutes;
        }
        if let Some(secs) = parse_u64_env("LOSTFOUND_SWEEP_INTERVAL_SECS") {
            config.sweep_interval_secs = secs;
        }
        if let Ok(url) = std::env::var("APP_BASE_URL") {
            if !url.is_empty() {
                config.app_base_url = Some(url);
            }
        }

        config
    }

    pub fn state_ttl(&self) -> Duration {
        Duration::from_secs(self.state_ttl_minutes * 60)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn parse_u64_env(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.state_ttl_minutes, 30);
        assert_eq!(config.state_ttl(), Duration::from_secs(30 * 60));
        assert!(config.state_dir.is_none());
        assert!(config.app_base_url.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: BotConfig = toml::from_str("state_ttl_minutes = 5").unwrap();
        assert_eq!(config.state_ttl_minutes, 5);
        assert_eq!(config.sweep_interval_secs, 60);
        assert!(config.state_dir.is_none());
    }

    #[test]
    fn test_full_toml() {
        let config: BotConfig = toml::from_str(
            "state_dir = \"/tmp/states\"\nstate_ttl_minutes = 10\nsweep_interval_secs = 15\napp_base_url = \"http://localhost:5173\"",
        )
        .unwrap();
        assert_eq!(config.state_dir.as_deref(), Some(Path::new("/tmp/states")));
        assert_eq!(config.sweep_interval(), Duration::from_secs(15));
        assert_eq!(config.app_base_url.as_deref(), Some("http://localhost:5173"));
    }
}
