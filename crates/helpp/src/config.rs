// src/config.rs
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::engine::Settings;

pub const CONFIG_FILE_NAME: &str = "helpp.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Optional settings read from `helpp.toml`. Unset fields keep the defaults.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HelppConfig {
    #[serde(default)]
    pub max_passes: Option<usize>,
    #[serde(default)]
    pub help: Option<bool>,
    #[serde(default)]
    pub output_suffix: Option<String>,
    #[serde(default)]
    pub help_suffix: Option<String>,
}

impl HelppConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads `path`, which must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Reads `path`; a missing file is not an error.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(Self::parse(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// `helpp.toml` in the current directory, or the defaults.
    pub fn from_nearest() -> Result<Self, ConfigError> {
        Ok(Self::from_file(Path::new(CONFIG_FILE_NAME))?.unwrap_or_default())
    }

    /// Takes every value that is set in `other`.
    pub fn merge(&mut self, other: Self) {
        macro_rules! merge_field {
            ($field:ident) => {
                if let Some(value) = other.$field {
                    self.$field = Some(value);
                }
            };
        }

        merge_field!(max_passes);
        merge_field!(help);
        merge_field!(output_suffix);
        merge_field!(help_suffix);
    }

    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        if self.max_passes == Some(0) {
            return Err(ConfigError::Invalid(
                "max_passes must be at least 1".to_string(),
            ));
        }
        let defaults = Settings::default();
        Ok(Settings {
            max_passes: self.max_passes.unwrap_or(defaults.max_passes),
            load_help: self.help.unwrap_or(defaults.load_help),
            output_suffix: self.output_suffix.unwrap_or(defaults.output_suffix),
            help_suffix: self.help_suffix.unwrap_or(defaults.help_suffix),
        })
    }
}
