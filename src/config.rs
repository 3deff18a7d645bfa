//! Application configuration
//!
//! Read from `.config/reels-rs.json` when present. Every field has a default,
//! so a partial file only overrides what it names.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_DIR: &str = ".config";
const CONFIG_FILE: &str = "reels-rs.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid value for {name}: {value}")]
    Env { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seed for the content generator
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Movement (cells) before a drag picks an axis
    #[serde(default = "default_swipe_dead_zone")]
    pub swipe_dead_zone: f64,
    #[serde(default = "default_settle_debounce_ms")]
    pub settle_debounce_ms: u64,
    /// Gap between closing the options sheet and opening what it chose
    #[serde(default = "default_overlay_sequence_delay_ms")]
    pub overlay_sequence_delay_ms: u64,
    #[serde(default = "default_scroll_hint_ms")]
    pub scroll_hint_ms: u64,
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
    #[serde(default = "default_slide_transition_ms")]
    pub slide_transition_ms: u64,
    #[serde(default = "default_page_scroll_ms")]
    pub page_scroll_ms: u64,
    /// When false every autoplay request is refused, as a browser would
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_seed() -> u64 {
    42
}

fn default_swipe_dead_zone() -> f64 {
    10.0
}

fn default_settle_debounce_ms() -> u64 {
    150
}

fn default_overlay_sequence_delay_ms() -> u64 {
    200
}

fn default_scroll_hint_ms() -> u64 {
    5000
}

fn default_toast_ms() -> u64 {
    3000
}

fn default_slide_transition_ms() -> u64 {
    500
}

fn default_page_scroll_ms() -> u64 {
    300
}

fn default_autoplay() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    50
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            swipe_dead_zone: default_swipe_dead_zone(),
            settle_debounce_ms: default_settle_debounce_ms(),
            overlay_sequence_delay_ms: default_overlay_sequence_delay_ms(),
            scroll_hint_ms: default_scroll_hint_ms(),
            toast_ms: default_toast_ms(),
            slide_transition_ms: default_slide_transition_ms(),
            page_scroll_ms: default_page_scroll_ms(),
            autoplay: default_autoplay(),
            tick_ms: default_tick_ms(),
        }
    }
}

/// Durations derived from the config, handed to the state machines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub swipe_dead_zone: f64,
    pub settle_debounce: Duration,
    pub overlay_sequence_delay: Duration,
    pub scroll_hint: Duration,
    pub toast: Duration,
    pub slide_transition: Duration,
    pub page_scroll: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        AppConfig::default().timings()
    }
}

impl AppConfig {
    /// Loads the config file, then applies `REELS_SEED` / `REELS_AUTOPLAY`.
    ///
    /// A missing file yields defaults; an unreadable or invalid one is an error
    /// the caller may log and replace with defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        Path::new(CONFIG_DIR).join(CONFIG_FILE)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(value) = lookup("REELS_SEED") {
            self.seed = value.trim().parse().map_err(|_| ConfigError::Env {
                name: "REELS_SEED",
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup("REELS_AUTOPLAY") {
            self.autoplay = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Env {
                        name: "REELS_AUTOPLAY",
                        value,
                    });
                }
            };
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn timings(&self) -> Timings {
        Timings {
            swipe_dead_zone: self.swipe_dead_zone,
            settle_debounce: Duration::from_millis(self.settle_debounce_ms),
            overlay_sequence_delay: Duration::from_millis(self.overlay_sequence_delay_ms),
            scroll_hint: Duration::from_millis(self.scroll_hint_ms),
            toast: Duration::from_millis(self.toast_ms),
            slide_transition: Duration::from_millis(self.slide_transition_ms),
            page_scroll: Duration::from_millis(self.page_scroll_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.swipe_dead_zone, 10.0);
        assert_eq!(config.settle_debounce_ms, 150);
        assert_eq!(config.overlay_sequence_delay_ms, 200);
        assert_eq!(config.scroll_hint_ms, 5000);
        assert!(config.autoplay);
        assert_eq!(config.timings().toast, Duration::from_secs(3));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::parse(r#"{ "seed": 7, "autoplay": false }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert!(!config.autoplay);
        assert_eq!(config.page_scroll_ms, 300);
    }

    #[test]
    fn missing_file_is_default() {
        let config = AppConfig::load_from(Path::new("/nonexistent/reels-rs.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(|name| match name {
                "REELS_SEED" => Some("99".to_string()),
                "REELS_AUTOPLAY" => Some("off".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.seed, 99);
        assert!(!config.autoplay);

        let err = config
            .apply_env(|name| (name == "REELS_SEED").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { name: "REELS_SEED", .. }));
    }
}
