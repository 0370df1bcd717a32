//! Configuration management

use crate::error::{HtlmError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "htlm.config.toml";

/// JSON configuration file, read when no TOML file is present
pub const JSON_CONFIG_FILE: &str = "htlm.config.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory scanned for .htlm files
    #[serde(alias = "srcDir")]
    pub src_dir: PathBuf,

    /// Directory receiving the generated .html files
    #[serde(alias = "outDir")]
    pub out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            src_dir: PathBuf::from("."),
            out_dir: PathBuf::from("./dist"),
        }
    }
}

impl Config {
    /// Load an explicitly named config file; it must exist.
    ///
    /// A `.json` file is read as JSON, anything else as TOML.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HtlmError::Config(format!("Config file not found: {}", path.display()))
            } else {
                HtlmError::Io(e)
            }
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::parse_json(&contents)
        } else {
            Self::parse(&contents)
        }
    }

    /// Load htlm.config.toml, or else htlm.config.json, from a directory,
    /// falling back to defaults
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        for name in [CONFIG_FILE, JSON_CONFIG_FILE] {
            let path = dir.join(name);
            if path.exists() {
                tracing::debug!(config = %path.display(), "Loading configuration");
                return Self::load_from_file(&path);
            }
        }
        Ok(Config::default())
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn parse_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Apply command-line values on top of this config
    pub fn with_overrides(mut self, src_dir: Option<PathBuf>, out_dir: Option<PathBuf>) -> Self {
        if let Some(src) = src_dir {
            self.src_dir = src;
        }
        if let Some(out) = out_dir {
            self.out_dir = out;
        }
        self
    }
}
