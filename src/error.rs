//! Error types for htlm

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for htlm
#[derive(Debug, Error)]
pub enum HtlmError {
    #[error("Unknown HTML tag <{0}>")]
    UnknownTag(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Source directory does not exist: {0}")]
    SourceDirMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON deserialization error: {0}")]
    JsonDeserialize(#[from] serde_json::Error),

    #[error("{0} document(s) failed to convert")]
    BuildFailed(usize),
}

impl HtlmError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            HtlmError::SourceDirMissing(_) => 2,
            HtlmError::Config(_) | HtlmError::TomlDeserialize(_) | HtlmError::JsonDeserialize(_) => {
                3
            }
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            HtlmError::UnknownTag(name) => {
                format!(
                    "Unknown HTML tag <{}>\n\n\
                    Suggestions:\n\
                    • Tag names must be anagrams of a real HTML tag (e.g. <vdi> for <div>)\n\
                    • Check that no letter was added or dropped while scrambling",
                    name
                )
            }
            HtlmError::SourceDirMissing(path) => {
                format!(
                    "Source directory does not exist: {}\n\n\
                    Suggestions:\n\
                    • Pass the directory holding your .htlm files with --src-dir\n\
                    • Set src_dir in htlm.config.toml",
                    path.display()
                )
            }
            HtlmError::TomlDeserialize(e) => {
                format!(
                    "Failed to read configuration: {}\n\n\
                    Valid keys: src_dir, out_dir\n\
                    Example:\n\
                    src_dir = \"pages\"\n\
                    out_dir = \"dist\"",
                    e
                )
            }
            HtlmError::JsonDeserialize(e) => {
                format!(
                    "Failed to read configuration: {}\n\n\
                    Valid keys: srcDir, outDir\n\
                    Example:\n\
                    {{ \"srcDir\": \"pages\", \"outDir\": \"dist\" }}",
                    e
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using HtlmError
pub type Result<T> = std::result::Result<T, HtlmError>;
