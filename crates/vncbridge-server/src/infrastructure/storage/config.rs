//! TOML configuration for the bridge.
//!
//! The file is read from `$VNCBRIDGE_CONFIG` when set, otherwise from
//! `$XDG_CONFIG_HOME/vncbridge/config.toml` (falling back to
//! `~/.config/vncbridge/config.toml`).  A missing file means defaults.
//!
//! ```toml
//! [bridge]
//! log_level = "info"
//!
//! [display]
//! width = 0            # 0 = oriented size reported by the capture source
//! height = 0
//! source_width = 1920
//! source_height = 1080
//! rotated = false
//!
//! [input]
//! backend = "uinput"   # or "mock"
//! device_name = "vncbridge virtual input"
//! keyboard_layout = "us"
//! pointer_mode = "absolute"
//! ```
//!
//! Every field carries a `#[serde(default = ...)]` so a partial file, or one
//! written by an older version, still loads.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vncbridge_core::KeyboardLayout;

use crate::application::inject_input::{InjectorSettings, PointerMode};
use crate::application::coordinate_session::SizeOverride;
use crate::infrastructure::capture::DisplayGeometry;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "VNCBRIDGE_CONFIG";

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `XDG_CONFIG_HOME` nor `HOME` is set.
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but holds a value the bridge cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeConfig {
    /// Default `tracing` level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Session width in pixels; `0` takes the display's oriented width.
    #[serde(default)]
    pub width: u32,
    /// Session height in pixels; `0` takes the display's oriented height.
    #[serde(default)]
    pub height: u32,
    /// Native panel width reported by the headless capture source.
    #[serde(default = "default_source_width")]
    pub source_width: u32,
    /// Native panel height reported by the headless capture source.
    #[serde(default = "default_source_height")]
    pub source_height: u32,
    #[serde(default)]
    pub rotated: bool,
}

/// Which virtual input device implementation to use.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Kernel uinput device (Linux only).
    #[default]
    Uinput,
    /// In-memory recorder; input is accepted and discarded.
    Mock,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    #[serde(default)]
    pub backend: BackendKind,
    /// Name the virtual device registers under.
    #[serde(default = "default_device_name")]
    pub device_name: String,
    #[serde(default)]
    pub keyboard_layout: KeyboardLayout,
    #[serde(default)]
    pub pointer_mode: PointerMode,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_source_width() -> u32 {
    1920
}
fn default_source_height() -> u32 {
    1080
}
fn default_device_name() -> String {
    InjectorSettings::default().device_name
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            source_width: default_source_width(),
            source_height: default_source_height(),
            rotated: false,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            device_name: default_device_name(),
            keyboard_layout: KeyboardLayout::default(),
            pointer_mode: PointerMode::default(),
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl AppConfig {
    /// Rejects values that parse but cannot run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.bridge.log_level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "bridge.log_level must be one of {LOG_LEVELS:?}, got {:?}",
                self.bridge.log_level
            )));
        }
        if self.display.source_width == 0 || self.display.source_height == 0 {
            return Err(ConfigError::Invalid(
                "display.source_width and display.source_height must be non-zero".to_string(),
            ));
        }
        if self.input.device_name.trim().is_empty() {
            return Err(ConfigError::Invalid("input.device_name must not be empty".to_string()));
        }
        Ok(())
    }
}

impl DisplayConfig {
    /// Geometry the headless capture source reports.
    pub fn source_geometry(&self) -> DisplayGeometry {
        DisplayGeometry::new(self.source_width, self.source_height, self.rotated)
    }

    /// Explicit session size; zero means "not set".
    pub fn size_override(&self) -> SizeOverride {
        SizeOverride {
            width: (self.width > 0).then_some(self.width),
            height: (self.height > 0).then_some(self.height),
        }
    }
}

impl InputConfig {
    pub fn injector_settings(&self) -> InjectorSettings {
        InjectorSettings {
            device_name: self.device_name.clone(),
            pointer_mode: self.pointer_mode,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the config file path: `$VNCBRIDGE_CONFIG` first, then the XDG
/// location.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] if no base directory can be found.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    if let Some(explicit) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(explicit));
    }
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("vncbridge").join("config.toml"))
}

/// Loads and validates the config from the default location.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads and validates the config at `path`, returning defaults if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if validation fails.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let cfg = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str::<AppConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.bridge.log_level, "info");
        assert_eq!(cfg.input.backend, BackendKind::Uinput);
        assert_eq!(cfg.input.pointer_mode, PointerMode::Absolute);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_partial_sections_override_defaults() {
        // Arrange
        let toml_str = r#"
[display]
width = 1280
rotated = true

[input]
keyboard_layout = "de"
pointer_mode = "relative"
backend = "mock"
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.display.width, 1280);
        assert_eq!(cfg.display.source_width, 1920);
        assert!(cfg.display.rotated);
        assert_eq!(cfg.input.keyboard_layout, KeyboardLayout::De);
        assert_eq!(cfg.input.pointer_mode, PointerMode::Relative);
        assert_eq!(cfg.input.backend, BackendKind::Mock);
    }

    #[test]
    fn test_unknown_layout_is_a_parse_error() {
        let toml_str = "[input]\nkeyboard_layout = \"dvorak\"\n";
        let result: Result<AppConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_source_size() {
        let mut cfg = AppConfig::default();
        cfg.display.source_height = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut cfg = AppConfig::default();
        cfg.bridge.log_level = "loud".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_size_override_treats_zero_as_unset() {
        let display = DisplayConfig {
            width: 800,
            ..DisplayConfig::default()
        };
        assert_eq!(
            display.size_override(),
            SizeOverride {
                width: Some(800),
                height: None
            }
        );
    }

    #[test]
    fn test_load_config_from_missing_file_returns_defaults() {
        let path = std::env::temp_dir()
            .join(format!("vncbridge_missing_{}", Uuid::new_v4()))
            .join("config.toml");
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_written_config_loads_back_via_temp_dir() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("vncbridge_test_{}", Uuid::new_v4()));
        let path = dir.join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.bridge.log_level = "debug".to_string();
        cfg.input.keyboard_layout = KeyboardLayout::De;

        // Act
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, toml::to_string_pretty(&cfg).unwrap()).unwrap();
        let loaded = load_config_from(&path).unwrap();

        // Assert
        assert_eq!(loaded, cfg);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_from_rejects_invalid_values() {
        let dir = std::env::temp_dir().join(format!("vncbridge_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[display]\nsource_width = 0\n").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        std::fs::remove_dir_all(&dir).ok();
    }
}
