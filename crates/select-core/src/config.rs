use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Key names per logical action, e.g. `"Down"`, `"j"`, `"Enter"`, `"Ctrl+n"`.
/// Parsing into terminal key codes happens in the TUI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysConfig {
    #[serde(default = "default_next_keys")]
    pub next: Vec<String>,
    #[serde(default = "default_previous_keys")]
    pub previous: Vec<String>,
    #[serde(default = "default_first_keys")]
    pub first: Vec<String>,
    #[serde(default = "default_last_keys")]
    pub last: Vec<String>,
    #[serde(default = "default_commit_keys")]
    pub commit: Vec<String>,
    #[serde(default = "default_quit_keys")]
    pub quit: Vec<String>,
    /// Switch the list between active and disabled.
    #[serde(default = "default_toggle_keys")]
    pub toggle: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Draw the focus pointer and the selected tick next to labels.
    #[serde(default = "default_show_indicators")]
    pub show_indicators: bool,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            next: default_next_keys(),
            previous: default_previous_keys(),
            first: default_first_keys(),
            last: default_last_keys(),
            commit: default_commit_keys(),
            quit: default_quit_keys(),
            toggle: default_toggle_keys(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            show_indicators: default_show_indicators(),
        }
    }
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn default_next_keys() -> Vec<String> {
    keys(&["Down", "j"])
}

fn default_previous_keys() -> Vec<String> {
    keys(&["Up", "k"])
}

fn default_first_keys() -> Vec<String> {
    keys(&["Home", "g"])
}

fn default_last_keys() -> Vec<String> {
    keys(&["End", "G"])
}

fn default_commit_keys() -> Vec<String> {
    keys(&["Enter"])
}

fn default_quit_keys() -> Vec<String> {
    keys(&["Esc", "q", "Ctrl+c"])
}

fn default_toggle_keys() -> Vec<String> {
    keys(&["Tab"])
}

fn default_title() -> String {
    "select".to_string()
}

fn default_show_indicators() -> bool {
    true
}

impl Config {
    /// Load from the default location, writing defaults there on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Like `load`, but a broken config file is logged and replaced by the
    /// defaults for this run.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(&Self::config_path())
    }

    pub fn load_or_default_from(config_path: &Path) -> Self {
        Self::load_from(config_path).unwrap_or_else(|e| {
            tracing::warn!(
                "config {} not usable, using defaults: {:#}",
                config_path.display(),
                e
            );
            Self::default()
        })
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
