//! The tool's own settings, kept apart from the WezTerm files it edits.
//!
//! Stored as YAML at `~/.config/wezterm-settings/settings.yaml` (XDG layout
//! on every platform except Windows, which uses the roaming config dir).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wezterm_settings_config::{FixedPathResolver, PathResolver, WeztermPathResolver};

/// Verbosity of the log file.
///
/// `RUST_LOG` and the `--log-level` flag take precedence over this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            LogLevel::Off => "Off",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Use this directory instead of searching for WezTerm's
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<PathBuf>,
    pub log_level: LogLevel,
    /// Write a `wezterm.lua` requiring the modules after saving, if none exists
    pub create_entrypoint: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            config_dir: None,
            log_level: LogLevel::default(),
            create_entrypoint: true,
        }
    }
}

impl ToolSettings {
    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings = serde_yaml_ng::from_str(&yaml)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    pub fn settings_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("wezterm-settings").join("settings.yaml")
            } else {
                PathBuf::from("settings.yaml")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // XDG convention on all platforms: ~/.config/wezterm-settings/settings.yaml
            if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".config")
                    .join("wezterm-settings")
                    .join("settings.yaml")
            } else {
                PathBuf::from("settings.yaml")
            }
        }
    }

    /// How to find the WezTerm directory: an explicit override wins,
    /// otherwise WezTerm's own search order.
    pub fn resolver(&self, override_dir: Option<&Path>) -> Box<dyn PathResolver> {
        match override_dir.or(self.config_dir.as_deref()) {
            Some(dir) => Box::new(FixedPathResolver(dir.to_path_buf())),
            None => Box::new(WeztermPathResolver::from_env()),
        }
    }
}
