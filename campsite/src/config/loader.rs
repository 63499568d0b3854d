//! Configuration file loading.

use crate::config::schema::Config;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the user configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// A configuration read from a file, with where it came from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher wins).
    pub precedence: u8,
    /// The parsed configuration.
    pub config: Config,
}

/// Finds and parses configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads every configuration file that applies, lowest precedence first.
    ///
    /// Today that is only the user file, `<data_dir>/config.yaml`. A
    /// missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed.
    pub fn load_all(data_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(source) = Self::load_user_config(data_dir)? {
            sources.push(source);
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Loads `<data_dir>/config.yaml` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_user_config(data_dir: &Path) -> Result<Option<ConfigSource>> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }

        log::debug!("loading configuration from {}", path.display());
        let config = Self::load_file(&path)?;
        Ok(Some(ConfigSource {
            path,
            precedence: 1,
            config,
        }))
    }

    /// Loads and parses a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Configuration` if the
    /// YAML is malformed or names unknown fields.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        // A document without content is YAML null, not an empty mapping.
        let has_content = contents.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        });
        if !has_content {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }
}
