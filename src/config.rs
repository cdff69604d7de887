use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Result, Vid2CaptionsError};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "vid2captions.toml";

// Default values for operation parameters
fn default_color() -> String {
    "000000".to_string()
}

fn default_width() -> u32 {
    2160
}

fn default_height() -> u32 {
    720
}

fn default_tolerance() -> f64 {
    0.01
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub blank: BlankConfig,
    #[serde(default)]
    pub mask: MaskConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Explicit path to the ffmpeg binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg_path: Option<PathBuf>,
    /// Explicit path to the ffprobe binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffprobe_path: Option<PathBuf>,
    /// Directory searched for bundled binaries before falling back to PATH
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlankConfig {
    /// Canvas color as hex RGB
    #[serde(default = "default_color")]
    pub color: String,
    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Key color as hex RGB
    #[serde(default = "default_color")]
    pub color: String,
    /// Color similarity passed to the colorkey filter
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// When set, logs are also written to daily-rotated files in this directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for BlankConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            tolerance: default_tolerance(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Vid2CaptionsError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Vid2CaptionsError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;

        std::fs::write(path, content)
            .map_err(|e| Vid2CaptionsError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Vid2CaptionsError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Load from an explicit path, else from `vid2captions.toml` in `dir`, else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if candidate.exists() {
                    Self::from_file(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
