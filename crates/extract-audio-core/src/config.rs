//! Configuration management for extract-audio

use crate::codec::AudioCodec;
use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path to the FFmpeg binary (auto-detected if not set)
    pub ffmpeg: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Codec used when a request names neither a codec nor an explicit output
    pub default_codec: String,
    /// Directory used when a request names no output location
    pub default_directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig { ffmpeg: None },
            output: OutputConfig {
                default_codec: "mp3".to_string(),
                default_directory: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Load from default config directory
        if let Some(config_dir) = dirs::config_dir() {
            let default_config = config_dir.join("extract-audio/config.toml");
            if default_config.exists() {
                figment = figment.merge(Toml::file(&default_config));
            }
        }

        // Load from specified config file
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment
        figment = figment.merge(Env::prefixed("EXTRACT_AUDIO_").split("_"));

        figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Parse the configured default codec
    pub fn default_codec(&self) -> Result<AudioCodec, ConfigError> {
        AudioCodec::from_str(&self.output.default_codec).ok_or_else(|| {
            ConfigError::InvalidValue(format!("unknown codec: {}", self.output.default_codec))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_codec_parses() {
        let config = Config::default();
        assert_eq!(config.default_codec().unwrap(), AudioCodec::Mp3);
    }

    #[test]
    fn test_unknown_codec_is_rejected() {
        let mut config = Config::default();
        config.output.default_codec = "realaudio".to_string();
        assert!(config.default_codec().is_err());
    }
}
