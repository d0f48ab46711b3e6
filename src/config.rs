//! Configuration handling for starter templates.
//! A template may carry a `starter.json`, `starter.yml` or `starter.yaml` file
//! at its root declaring the placeholder tokens and how they are applied.

use crate::constants::{CONFIG_FILES, DEFAULT_PLACEHOLDERS};
use crate::error::{Error, Result};
use crate::loader::TemplateRoot;
use log::debug;
use serde::Deserialize;

/// Per-template settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Tokens replaced by the project name.
    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<String>,

    /// Whether file and directory names are substituted too.
    #[serde(default)]
    pub rename_paths: bool,

    /// Glob patterns of entries left out of the project.
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_placeholders() -> Vec<String> {
    DEFAULT_PLACEHOLDERS.iter().map(|s| s.to_string()).collect()
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self { placeholders: default_placeholders(), rename_paths: false, ignore: Vec::new() }
    }
}

/// Loads the template configuration, trying every supported file name in order.
///
/// # Arguments
/// * `root` - Template root to look in
///
/// # Returns
/// * `Result<TemplateConfig>` - Parsed configuration, or the defaults when no file exists
///
/// # Errors
/// * `Error::ConfigError` if the file exists but cannot be parsed
pub fn get_config(root: &TemplateRoot) -> Result<TemplateConfig> {
    for file in CONFIG_FILES {
        if let Some(content) = root.read_root_file(file)? {
            debug!("Loading configuration from {file}");
            let content = String::from_utf8(content)
                .map_err(|e| Error::ConfigError(format!("{file} is not valid UTF-8: {e}")))?;
            return parse_config(&content);
        }
    }

    debug!("No configuration file found, using default placeholders");
    Ok(TemplateConfig::default())
}

/// Parses configuration content, as JSON first and YAML otherwise.
///
/// # Errors
/// * `Error::ConfigError` if parsing fails
pub fn parse_config(content: &str) -> Result<TemplateConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}
