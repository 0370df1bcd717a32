//! File system access for source and output documents

use crate::domain::modules::linker::normalize_path;
use crate::domain::modules::OUTPUT_EXTENSION;
use crate::error::{HtlmError, Result};
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of source documents
pub const SOURCE_EXTENSION: &str = "htlm";

/// A source directory of .htlm files and the directory receiving their output
#[derive(Debug, Clone)]
pub struct SourceTree {
    src_dir: PathBuf,
    out_dir: PathBuf,
}

impl SourceTree {
    /// Resolve relative directories against `base`
    pub fn with_base(base: &Path, src_dir: &Path, out_dir: &Path) -> Self {
        SourceTree {
            src_dir: normalize_path(&base.join(src_dir)),
            out_dir: normalize_path(&base.join(out_dir)),
        }
    }

    /// Resolve relative directories against the current working directory
    pub fn from_config(config: &Config) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::with_base(&cwd, &config.src_dir, &config.out_dir))
    }

    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// All .htlm files below the source directory, relative and sorted.
    ///
    /// The output directory is not entered when it lies inside the source
    /// directory.
    pub fn list_sources(&self) -> Result<Vec<PathBuf>> {
        if !self.src_dir.is_dir() {
            return Err(HtlmError::SourceDirMissing(self.src_dir.clone()));
        }

        let out_dir = self.out_dir.clone();
        let walker = WalkDir::new(&self.src_dir)
            .into_iter()
            .filter_entry(move |entry| {
                entry.depth() == 0 || !entry.file_type().is_dir() || entry.path() != out_dir
            });

        let mut sources = Vec::new();
        for entry in walker {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_file() || !is_source_file(entry.path()) {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&self.src_dir) {
                sources.push(rel.to_path_buf());
            }
        }

        sources.sort();
        Ok(sources)
    }

    /// Output location for a source file: `a/b.htlm` becomes `<out>/a/b.html`
    pub fn target_path(&self, relative: &Path) -> PathBuf {
        self.out_dir.join(relative).with_extension(OUTPUT_EXTENSION)
    }

    pub fn read_source(&self, relative: &Path) -> Result<String> {
        fs::read_to_string(self.src_dir.join(relative)).map_err(HtlmError::Io)
    }

    /// Write rendered output, creating parent directories as needed
    pub fn write_output(&self, target: &Path, html: &str) -> Result<()> {
        if let Some(parent) = target.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(target, html).map_err(HtlmError::Io)
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}
