//! Configuration management for SeqResize

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqResizeError};

/// Largest accepted width or height
pub const MAX_DIMENSION: u32 = 32768;

/// Configuration for a single batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder the source images are read from
    pub input_folder: PathBuf,

    /// Folder the numbered, resized copies are written to
    pub output_folder: PathBuf,

    /// Exact dimensions every output is forced to
    pub target_size: TargetSize,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("img"),
            output_folder: PathBuf::from("img_resized"),
            target_size: TargetSize::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Target pixel dimensions, written as `WIDTHxHEIGHT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject zero or oversized dimensions
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SeqResizeError::invalid_target_size(format!(
                "width and height must be greater than 0, got {}",
                self
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(SeqResizeError::invalid_target_size(format!(
                "dimensions must be between 1-{}, got {}",
                MAX_DIMENSION, self
            )));
        }
        Ok(())
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self::new(100, 100)
    }
}

impl From<(u32, u32)> for TargetSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for TargetSize {
    type Err = SeqResizeError;

    /// Parse dimension string (e.g., "1920x1080")
    fn from_str(s: &str) -> Result<Self> {
        let (width, height) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| SeqResizeError::invalid_target_size(
                "dimensions must be in format 'WIDTHxHEIGHT' (e.g., '100x100')"
            ))?;

        let width = width
            .parse::<u32>()
            .map_err(|_| SeqResizeError::invalid_target_size(format!("invalid width value '{}'", width)))?;
        let height = height
            .parse::<u32>()
            .map_err(|_| SeqResizeError::invalid_target_size(format!("invalid height value '{}'", height)))?;

        let size = Self::new(width, height);
        size.validate()?;
        Ok(size)
    }
}

impl Serialize for TargetSize {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TargetSize {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Config {
    /// Create a configuration for the given folders and size
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        input_folder: P,
        output_folder: Q,
        target_size: TargetSize,
    ) -> Self {
        Self {
            input_folder: input_folder.into(),
            output_folder: output_folder.into(),
            target_size,
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| SeqResizeError::config(
                format!("Failed to read config file {:?}: {}", path.as_ref(), e)
            ))?;

        let extension = path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(&content).map_err(Into::into),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(Into::into),
            _ => Err(SeqResizeError::config(
                "Unsupported config file format. Use .toml or .yaml"
            )),
        }
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let extension = path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let content = match extension.to_lowercase().as_str() {
            "toml" => toml::to_string_pretty(self)
                .map_err(|e| SeqResizeError::config(format!("TOML serialization failed: {}", e)))?,
            "yaml" | "yml" => serde_yaml::to_string(self)
                .map_err(|e| SeqResizeError::config(format!("YAML serialization failed: {}", e)))?,
            _ => return Err(SeqResizeError::config(
                "Unsupported config file format. Use .toml or .yaml"
            )),
        };

        std::fs::write(&path, content)
            .map_err(|e| SeqResizeError::config(
                format!("Failed to write config file {:?}: {}", path.as_ref(), e)
            ))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.target_size.validate()?;

        if self.input_folder.as_os_str().is_empty() {
            return Err(SeqResizeError::config("Input folder must not be empty"));
        }
        if self.output_folder.as_os_str().is_empty() {
            return Err(SeqResizeError::config("Output folder must not be empty"));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(SeqResizeError::config(format!("Unknown log level '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input_folder, PathBuf::from("img"));
        assert_eq!(config.output_folder, PathBuf::from("img_resized"));
        assert_eq!(config.target_size, TargetSize::new(100, 100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_target_size_parsing() {
        assert_eq!("50x40".parse::<TargetSize>().unwrap(), TargetSize::new(50, 40));
        assert_eq!("640X480".parse::<TargetSize>().unwrap(), TargetSize::new(640, 480));
        assert!("100".parse::<TargetSize>().is_err());
        assert!("0x100".parse::<TargetSize>().is_err());
        assert!("axb".parse::<TargetSize>().is_err());
        assert!("40000x10".parse::<TargetSize>().is_err());
        assert_eq!(TargetSize::new(50, 40).to_string(), "50x40");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::new("photos", "out", TargetSize::new(320, 200));

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("target_size = \"320x200\""));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.target_size, config.target_size);
        assert_eq!(parsed.input_folder, config.input_folder);

        let yaml_str = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml_str).unwrap();
        assert_eq!(parsed.output_folder, config.output_folder);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("target_size = \"64x32\"").unwrap();
        assert_eq!(parsed.target_size, TargetSize::new(64, 32));
        assert_eq!(parsed.input_folder, PathBuf::from("img"));
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_config_file_io() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();

        let toml_path = dir.path().join("seqresize.toml");
        config.to_file(&toml_path).unwrap();
        let loaded = Config::from_file(&toml_path).unwrap();
        assert!(loaded.validate().is_ok());

        let yaml_path = dir.path().join("seqresize.yaml");
        config.to_file(&yaml_path).unwrap();
        let loaded = Config::from_file(&yaml_path).unwrap();
        assert!(loaded.validate().is_ok());

        assert!(config.to_file(dir.path().join("seqresize.ini")).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
