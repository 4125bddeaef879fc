//! Configuration file management
//!
//! Loads TOML configuration files and provides application settings.
//! Default config path: ~/.config/keysim/config.toml

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::DEFAULT_TYPING_INTERVAL_MS;

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input backend settings
    pub backend: BackendConfig,
    /// Event capture settings
    pub listen: ListenConfig,
    /// Synthetic typing settings
    pub typing: TypingConfig,
    /// Keymap settings for the xkb backend
    pub keyboard: KeyboardInputConfig,
}

/// Which input backend to drive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// X server via XTEST and RECORD
    #[default]
    X11,
    /// In-process keyboard with the built-in US layout
    Loopback,
    /// In-process keyboard with a keymap compiled from [keyboard] names
    Xkb,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x11" => Ok(BackendKind::X11),
            "loopback" => Ok(BackendKind::Loopback),
            "xkb" => Ok(BackendKind::Xkb),
            other => Err(format!(
                "unknown backend '{}' (expected x11, loopback or xkb)",
                other
            )),
        }
    }
}

/// Input backend settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend kind: "x11" (default), "loopback" or "xkb"
    pub kind: BackendKind,
    /// X display name (empty = $DISPLAY)
    pub display: String,
}

impl BackendConfig {
    /// Display name to connect to, `None` for $DISPLAY
    pub fn display_name(&self) -> Option<&str> {
        match self.display.trim() {
            "" => None,
            name => Some(name),
        }
    }
}

/// Event capture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Grab the keyboard while listening (other clients stop receiving keys)
    pub capture: bool,
    /// Stop listening when Escape is pressed
    pub escape_stops: bool,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            capture: false,
            escape_stops: true,
        }
    }
}

/// Synthetic typing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Pause between typed characters in milliseconds (default: 0)
    pub interval_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_TYPING_INTERVAL_MS,
        }
    }
}

impl TypingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Keyboard input settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardInputConfig {
    /// XKB keyboard model (empty = default)
    pub xkb_model: String,
    /// XKB keyboard layout (e.g., "us", "de", empty = default)
    pub xkb_layout: String,
    /// XKB keyboard variant (empty = default)
    pub xkb_variant: String,
    /// XKB keyboard options (e.g., "ctrl:nocaps", empty = default)
    pub xkb_options: String,
}

impl Config {
    /// System-wide config path
    const SYSTEM_CONFIG_PATH: &'static str = "/etc/keysim/config.toml";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. KEYSIM_CONFIG environment variable
        if let Ok(path) = std::env::var("KEYSIM_CONFIG") {
            let p = std::path::Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        // 2. User config: ~/.config/keysim/config.toml
        if let Some(config_path) = default_config_path() {
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 3. System config: /etc/keysim/config.toml
        let system_config = std::path::Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration with priority:
    /// 1. KEYSIM_CONFIG environment variable
    /// 2. ~/.config/keysim/config.toml (user config)
    /// 3. /etc/keysim/config.toml (system config)
    /// 4. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(path.to_string_lossy().as_ref()) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write the commented default config to the user config path
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn write_default_config(force: bool) -> Result<PathBuf> {
        let config_path =
            default_config_path().ok_or_else(|| anyhow::anyhow!("Config directory not found"))?;
        if config_path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
        }
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        std::fs::write(&config_path, DEFAULT_TEMPLATE)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(config_path)
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("keysim").join("config.toml"))
}

const DEFAULT_TEMPLATE: &str = r#"# keysim configuration
#
# Lookup order: $KEYSIM_CONFIG, ~/.config/keysim/config.toml,
# /etc/keysim/config.toml, built-in defaults.

[backend]
# "x11" (XTEST + RECORD), "loopback" (built-in US keyboard, nothing leaves
# the process) or "xkb" (loopback keyboard using the [keyboard] keymap)
kind = "x11"
# X display name, empty = $DISPLAY
display = ""

[listen]
# Grab the keyboard while listening; other clients receive no key events
capture = false
# Stop listening when Escape is pressed
escape_stops = true

[typing]
# Pause between typed characters (milliseconds)
interval_ms = 0

[keyboard]
# XKB names for the "xkb" backend (empty = system default)
xkb_model = ""
xkb_layout = ""
xkb_variant = ""
xkb_options = ""
"#;
