/// Configuration loading for the completer
use crate::error::{CompletionError, CompletionResult};
use crate::probe::DEFAULT_SENTINEL;
use crate::word::DelimiterSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default cap on the number of popup rows
pub const DEFAULT_MAX_ENTRIES: usize = 100;
/// Default popup width in logical units
pub const DEFAULT_POPUP_WIDTH: u32 = 350;
/// Default popup height in logical units
pub const DEFAULT_POPUP_HEIGHT: u32 = 300;

/// Completer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompleterConfig {
    /// Maximum number of candidates shown in the popup
    pub max_entries: usize,
    pub popup_width: u32,
    pub popup_height: u32,
    /// Text appended to the prefix to force a parse error
    pub sentinel: String,
    /// Characters treated as word delimiters in addition to the standard set
    pub extra_delimiters: Vec<char>,
    /// Hide the popup when typing leaves no candidates
    pub dismiss_on_empty_refresh: bool,
}

impl Default for CompleterConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            popup_width: DEFAULT_POPUP_WIDTH,
            popup_height: DEFAULT_POPUP_HEIGHT,
            sentinel: DEFAULT_SENTINEL.to_string(),
            extra_delimiters: Vec::new(),
            dismiss_on_empty_refresh: true,
        }
    }
}

impl CompleterConfig {
    /// Delimiter set implied by this configuration
    pub fn delimiters(&self) -> DelimiterSet {
        DelimiterSet::standard().with_extra(self.extra_delimiters.iter().copied())
    }
}

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

/// Completer configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file
    pub fn load_from_yaml(path: &Path) -> CompletionResult<CompleterConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_string(&content, ConfigFormat::Yaml)
    }

    /// Load configuration from a JSON file
    pub fn load_from_json(path: &Path) -> CompletionResult<CompleterConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_string(&content, ConfigFormat::Json)
    }

    /// Load configuration from a file, picking the format from its extension
    pub fn load_from_path(path: &Path) -> CompletionResult<CompleterConfig> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::load_from_yaml(path),
            Some("json") => Self::load_from_json(path),
            _ => Err(CompletionError::Config(format!(
                "Unsupported configuration file: {}",
                path.display()
            ))),
        }
    }

    pub fn load_from_string(content: &str, format: ConfigFormat) -> CompletionResult<CompleterConfig> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Validate completer configuration
    pub fn validate_config(config: &CompleterConfig) -> CompletionResult<()> {
        if config.max_entries == 0 {
            return Err(CompletionError::Config(
                "max_entries must be at least 1".to_string(),
            ));
        }

        if config.popup_width == 0 || config.popup_height == 0 {
            return Err(CompletionError::Config(
                "Popup dimensions must be positive".to_string(),
            ));
        }

        if config.sentinel.is_empty() {
            return Err(CompletionError::Config(
                "Probe sentinel cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
