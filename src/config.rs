//! Configuration file support for annotext.
//!
//! Settings are serialized as versioned JSON. Every section falls back to its
//! defaults when missing, so partial files are accepted.

use std::time::Duration;

use annotext_geometry::{Size, TextMetrics};
use serde::{Deserialize, Serialize};

use crate::constants::{chrome, export, text_box};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Which rectangle a dragged box is kept inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClampRegion {
    /// The rendered image area (letterbox excluded)
    #[default]
    Image,
    /// The whole container
    Container,
}

/// Per-box chrome geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Side of the drag handle and delete button squares above the box
    pub handle_size: f64,
    /// Width of the east/west resize grips
    pub grip_width: f64,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            handle_size: chrome::HANDLE_SIZE,
            grip_width: chrome::GRIP_WIDTH,
        }
    }
}

/// Interaction settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub default_box_width: f64,
    pub min_box_width: f64,
    pub clamp_region: ClampRegion,
    pub text: TextMetrics,
    pub chrome: ChromeConfig,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            default_box_width: text_box::DEFAULT_WIDTH,
            min_box_width: text_box::MIN_WIDTH,
            clamp_region: ClampRegion::default(),
            text: TextMetrics::default(),
            chrome: ChromeConfig::default(),
        }
    }
}

/// How target-space geometry reaches the capture collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// Remap a cloned scene through the per-clone hook; the live canvas keeps its geometry
    #[default]
    Clone,
    /// Remap the live canvas for the duration of the capture, then restore it
    Live,
}

/// Size the export is laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExportTarget {
    /// The live container size
    #[default]
    Viewport,
    /// A fixed capture resolution
    Fixed { width: f64, height: f64 },
}

impl ExportTarget {
    /// Resolve the target size given the live container size.
    pub fn resolve(&self, container: Size) -> Size {
        match *self {
            ExportTarget::Viewport => container,
            ExportTarget::Fixed { width, height } => Size::new(width, height),
        }
    }
}

/// Options handed to the capture collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    /// Resolution multiplier
    pub scale: f64,
    /// CSS-style hex fill behind the image
    pub background: String,
    /// Request images with CORS
    pub use_cors: bool,
    /// Permit tainted (cross-origin) sources
    pub allow_taint: bool,
    /// Timeout for loading each image inside the capture
    pub image_timeout_ms: u64,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: export::CAPTURE_SCALE,
            background: export::CAPTURE_BACKGROUND.to_string(),
            use_cors: true,
            allow_taint: false,
            image_timeout_ms: export::IMAGE_LOAD_TIMEOUT_MS,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub capture_timeout_ms: u64,
    pub print_close_delay_ms: u64,
    pub capture_mode: CaptureMode,
    pub target: ExportTarget,
    pub capture: CaptureOptions,
}

impl ExportConfig {
    pub fn capture_timeout(&self) -> Duration {
        Duration::from_millis(self.capture_timeout_ms)
    }

    pub fn print_close_delay(&self) -> Duration {
        Duration::from_millis(self.print_close_delay_ms)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            capture_timeout_ms: export::CAPTURE_TIMEOUT_MS,
            print_close_delay_ms: export::PRINT_CLOSE_DELAY_MS,
            capture_mode: CaptureMode::default(),
            target: ExportTarget::default(),
            capture: CaptureOptions::default(),
        }
    }
}

/// User preferences section of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Application configuration that can be exported and imported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default)]
    pub preferences: UserPreferences,

    #[serde(default)]
    pub interaction: InteractionConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

fn default_app_name() -> String {
    "annotext".to_string()
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            interaction: InteractionConfig::default(),
            export: ExportConfig::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "annotext-config.json"
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("annotext").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("annotext")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = AppConfig::new();
        assert_eq!(config.interaction.default_box_width, 100.0);
        assert_eq!(config.interaction.min_box_width, 50.0);
        assert_eq!(config.interaction.clamp_region, ClampRegion::Image);
        assert_eq!(config.export.capture_timeout(), Duration::from_secs(30));
        assert_eq!(config.export.print_close_delay(), Duration::from_secs(1));
        assert_eq!(config.export.capture.scale, 2.0);
        assert_eq!(config.export.capture.background, "#f0f0f0");
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = AppConfig::new();
        config.preferences.log_level = LogLevel::Debug;
        config.interaction.clamp_region = ClampRegion::Container;
        config.export.target = ExportTarget::Fixed {
            width: 1920.0,
            height: 1080.0,
        };

        let json = config.to_json().unwrap();
        let parsed = AppConfig::from_json(&json).unwrap();
        assert_eq!(parsed.preferences.log_level, LogLevel::Debug);
        assert_eq!(parsed.interaction, config.interaction);
        assert_eq!(parsed.export, config.export);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let json = r#"{ "version": 1, "export": { "capture_timeout_ms": 500 } }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.app_name, "annotext");
        assert_eq!(config.export.capture_timeout_ms, 500);
        assert_eq!(config.export.print_close_delay_ms, 1_000);
        assert_eq!(config.interaction, InteractionConfig::default());
    }

    #[test]
    fn test_target_parsing() {
        let json = r#"{ "version": 1, "export": { "target": { "kind": "fixed", "width": 640, "height": 480 } } }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(
            config.export.target.resolve(Size::new(1.0, 1.0)),
            Size::new(640.0, 480.0)
        );
        assert_eq!(
            ExportTarget::Viewport.resolve(Size::new(800.0, 600.0)),
            Size::new(800.0, 600.0)
        );
    }

    #[test]
    fn test_newer_version_rejected() {
        let json = format!(r#"{{ "version": {} }}"#, CONFIG_VERSION + 1);
        assert!(matches!(
            AppConfig::from_json(&json),
            Err(ConfigError::VersionTooNew { .. })
        ));
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
    }
}
