//! Build use case
//!
//! Converts every source document, links imports across the queued ones and
//! writes the results.

use crate::domain::modules::{resolve_queued_imports, LinkDiagnostic, QueuedDocument};
use crate::error::{HtlmError, Result};
use crate::infrastructure::{convert_markup, render_html, SourceTree};
use std::path::{Path, PathBuf};

/// Outcome of converting a single source file
#[derive(Debug)]
pub enum Converted {
    /// No module tags; HTML was written straight away
    Written(PathBuf),
    /// Holds imports or exports and waits for linking
    Queued(QueuedDocument),
}

/// Everything that happened during one build
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Documents written without linking
    pub written: Vec<PathBuf>,

    /// Documents waiting for linking
    pub queued: Vec<QueuedDocument>,

    /// Documents written after linking
    pub linked: Vec<PathBuf>,

    /// Source files that could not be converted, and outputs that could not
    /// be written
    pub failures: Vec<(PathBuf, HtlmError)>,

    pub diagnostics: Vec<LinkDiagnostic>,
}

impl BuildReport {
    pub fn converted_count(&self) -> usize {
        self.written.len() + self.linked.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Service for building a source tree
pub struct BuildService {
    tree: SourceTree,
}

impl BuildService {
    pub fn new(tree: SourceTree) -> Self {
        BuildService { tree }
    }

    pub fn tree(&self) -> &SourceTree {
        &self.tree
    }

    /// Convert one source file given relative to the source directory
    pub fn convert_file(&self, relative: &Path) -> Result<Converted> {
        let target = self.tree.target_path(relative);
        let content = self.tree.read_source(relative)?;
        let conversion = convert_markup(&content)?;

        if let Some(queued) = QueuedDocument::from_tree(target.clone(), conversion.tree) {
            tracing::debug!(
                source = %relative.display(),
                imports = queued.imports.len(),
                exports = queued.exports.len(),
                "Queued document with module tags"
            );
            return Ok(Converted::Queued(queued));
        }

        self.tree.write_output(&target, &conversion.html)?;
        tracing::info!(output = %target.display(), "Wrote document");
        Ok(Converted::Written(target))
    }

    /// Convert every source file.
    ///
    /// A file that fails is recorded in the report and does not stop the
    /// others.
    pub fn convert_all(&self) -> Result<BuildReport> {
        let sources = self.tree.list_sources()?;
        tracing::debug!(count = sources.len(), src = %self.tree.src_dir().display(), "Found sources");

        let mut report = BuildReport::default();
        for relative in sources {
            match self.convert_file(&relative) {
                Ok(Converted::Written(path)) => report.written.push(path),
                Ok(Converted::Queued(doc)) => report.queued.push(doc),
                Err(e) => {
                    tracing::error!(source = %relative.display(), "{}", e);
                    report.failures.push((relative, e));
                }
            }
        }

        Ok(report)
    }

    /// Resolve imports across the queued documents and write them.
    ///
    /// A document that cannot be written is recorded as a failure and the
    /// rest are still written.
    pub fn link_and_write(&self, report: &mut BuildReport) {
        if report.queued.is_empty() {
            return;
        }

        let diagnostics = resolve_queued_imports(&mut report.queued);
        for diagnostic in &diagnostics {
            tracing::warn!("{}", diagnostic);
        }
        report.diagnostics.extend(diagnostics);

        let queued = std::mem::take(&mut report.queued);
        for doc in queued {
            let html = render_html(&doc.content);
            match self.tree.write_output(&doc.target_path, &html) {
                Ok(()) => {
                    tracing::info!(output = %doc.target_path.display(), "Wrote linked document");
                    report.linked.push(doc.target_path);
                }
                Err(e) => {
                    tracing::error!(output = %doc.target_path.display(), "{}", e);
                    report.failures.push((doc.target_path, e));
                }
            }
        }
    }

    /// Run a full build
    pub fn execute(&self) -> Result<BuildReport> {
        let mut report = self.convert_all()?;
        self.link_and_write(&mut report);
        Ok(report)
    }
}
