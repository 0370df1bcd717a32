//! Replacing import elements with the content of matching exports

use crate::domain::modules::collector::{collect_module_tags, ModuleTag, ModuleTags};
use crate::domain::modules::path::{node_at, node_at_mut, PathEdit, PathSegment};
use crate::domain::node::{is_attribute_key, Mapping, Node, TEXT_KEY};
use crate::domain::tokens::CHILDREN_TAG;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Extension of generated documents, appended to `src` references
pub const OUTPUT_EXTENSION: &str = "html";

/// A converted document whose output waits for import resolution
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedDocument {
    /// Where the rendered HTML will be written
    pub target_path: PathBuf,
    pub content: Node,
    pub imports: Vec<ModuleTag>,
    pub exports: Vec<ModuleTag>,
}

impl QueuedDocument {
    pub fn new(target_path: PathBuf, content: Node, tags: ModuleTags) -> Self {
        QueuedDocument {
            target_path,
            content,
            imports: tags.imports,
            exports: tags.exports,
        }
    }

    /// Queue a canonical tree, or return None if it has no module tags
    pub fn from_tree(target_path: PathBuf, content: Node) -> Option<Self> {
        let tags = collect_module_tags(&content);
        if tags.is_empty() {
            return None;
        }
        Some(QueuedDocument::new(target_path, content, tags))
    }

    fn find_export(&self, id: &str) -> Option<&ModuleTag> {
        self.exports.iter().find(|e| e.id() == Some(id))
    }
}

/// Non-fatal problem found while linking
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkDiagnostic {
    #[error("Export not found for import id=\"{}\" in {}", .id, .document.display())]
    UnresolvedImport { id: String, document: PathBuf },

    #[error("Unable to resolve parent path for import: {} in {}", .path, .document.display())]
    UnresolvablePath { path: String, document: PathBuf },

    /// Export content carried an import along; it is not resolved in this run
    #[error("Nested import id=\"{}\" left unresolved in {}", .id, .document.display())]
    NestedImport { id: String, document: PathBuf },
}

/// Resolve every import of every queued document in one batch.
///
/// Matching exports are looked up before any document is modified, so a
/// splice in one document never changes what another document sees.
/// Resolved imports are removed from their document's import list;
/// unresolved ones stay in both the tree and the list.
pub fn resolve_queued_imports(documents: &mut [QueuedDocument]) -> Vec<LinkDiagnostic> {
    let snapshot: &[QueuedDocument] = documents;
    let matches: Vec<Vec<Option<Node>>> = snapshot
        .iter()
        .enumerate()
        .map(|(current, doc)| {
            doc.imports
                .iter()
                .map(|import| find_export_for(import, current, snapshot).map(|e| e.node.clone()))
                .collect()
        })
        .collect();

    let mut diagnostics = Vec::new();
    for (document, exports) in documents.iter_mut().zip(matches) {
        link_document(document, exports, &mut diagnostics);
    }
    diagnostics
}

/// Locate the export an import refers to
fn find_export_for<'a>(
    import: &ModuleTag,
    current: usize,
    documents: &'a [QueuedDocument],
) -> Option<&'a ModuleTag> {
    let id = import.id()?;
    let owner = &documents[current];

    if let Some(src) = import.src() {
        let wanted = source_document_path(&owner.target_path, src);
        return documents
            .iter()
            .find(|doc| normalize_path(&doc.target_path) == wanted)?
            .find_export(id);
    }

    owner.find_export(id).or_else(|| {
        documents
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != current)
            .find_map(|(_, doc)| doc.find_export(id))
    })
}

/// Output path referenced by `src`, relative to the importing document
pub fn source_document_path(importer: &Path, src: &str) -> PathBuf {
    let dir = importer.parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&dir.join(format!("{}.{}", src, OUTPUT_EXTENSION)))
}

/// Lexically resolve `.` and `..` components
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn link_document(
    document: &mut QueuedDocument,
    exports: Vec<Option<Node>>,
    diagnostics: &mut Vec<LinkDiagnostic>,
) {
    let mut pending = std::mem::take(&mut document.imports);
    let mut resolved = vec![false; pending.len()];

    for (i, export) in exports.iter().enumerate() {
        let Some(export) = export else {
            diagnostics.push(LinkDiagnostic::UnresolvedImport {
                id: pending[i].id().unwrap_or_default().to_string(),
                document: document.target_path.clone(),
            });
            continue;
        };

        let Some(spliced) = splice(&mut document.content, &pending[i], export) else {
            diagnostics.push(LinkDiagnostic::UnresolvablePath {
                path: pending[i].path.to_string(),
                document: document.target_path.clone(),
            });
            continue;
        };

        resolved[i] = true;
        for id in spliced.nested_imports {
            diagnostics.push(LinkDiagnostic::NestedImport {
                id,
                document: document.target_path.clone(),
            });
        }
        for edit in &spliced.edits {
            for (j, other) in pending.iter_mut().enumerate() {
                if !resolved[j] {
                    other.path.apply(edit);
                }
            }
        }
    }

    // Unresolved imports may have been modified by splices below them
    for import in pending.iter_mut() {
        if let Some(node) = node_at(&document.content, import.path.segments()) {
            import.node = node.clone();
        }
    }

    document.imports = pending
        .into_iter()
        .zip(resolved)
        .filter(|(_, done)| !done)
        .map(|(import, _)| import)
        .collect();
}

/// What a successful splice changed
struct Spliced {
    /// Edits made to the parent container
    edits: Vec<PathEdit>,
    /// Ids of imports the export content brought into the document
    nested_imports: Vec<String>,
}

/// Replace one import with export content.
///
/// Returns None when the import is no longer where its path says.
fn splice(root: &mut Node, import: &ModuleTag, export: &Node) -> Option<Spliced> {
    let (parent_segments, target) = import.path.split_last()?;
    let parent = node_at_mut(root, parent_segments)?.as_mapping_mut()?;

    let current = match (target.index, parent.get(&target.key)?) {
        (Some(index), Node::Sequence(items)) => items.get(index)?,
        (Some(_), _) => return None,
        (None, node) => node,
    };
    if *current != import.node {
        return None;
    }

    let nested_imports = nested_import_ids(export);
    let children = import_children(&import.node);
    let replacements = export_content(inject_children(export, &children));
    let mut edits = Vec::new();

    match target.index {
        Some(index) => {
            if let Some(Node::Sequence(items)) = parent.get_mut(&target.key) {
                items.remove(index);
            }
            edits.push(PathEdit::Removed {
                parent: parent_segments.to_vec(),
                key: target.key.clone(),
                index,
            });

            insert_replacements(parent, parent_segments, replacements, &mut edits);

            if matches!(parent.get(&target.key), Some(Node::Sequence(items)) if items.is_empty()) {
                parent.remove(&target.key);
            }
        }
        None => {
            parent.remove(&target.key);
            insert_replacements(parent, parent_segments, replacements, &mut edits);
        }
    }

    Some(Spliced {
        edits,
        nested_imports,
    })
}

/// Imports inside export content, which a single pass leaves in place
fn nested_import_ids(export: &Node) -> Vec<String> {
    let content: Mapping = export_content(export.clone()).into_iter().collect();
    collect_module_tags(&Node::Mapping(content))
        .imports
        .iter()
        .map(|import| import.id().unwrap_or_default().to_string())
        .collect()
}

fn insert_replacements(
    parent: &mut Mapping,
    parent_segments: &[PathSegment],
    replacements: Vec<(String, Node)>,
    edits: &mut Vec<PathEdit>,
) {
    for (key, value) in replacements {
        if parent.insert_child(key.clone(), value) {
            edits.push(PathEdit::Promoted {
                parent: parent_segments.to_vec(),
                key,
            });
        }
    }
}

/// Non-attribute entries supplied between `<import>` and `</import>`
fn import_children(node: &Node) -> Mapping {
    let Node::Mapping(mapping) = node else {
        return Mapping::new();
    };

    mapping
        .iter()
        .filter(|(key, _)| !is_attribute_key(key))
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Substitute every `<children>` placeholder, at any depth, with `children`
fn inject_children(node: &Node, children: &Mapping) -> Node {
    match node {
        Node::Sequence(items) => Node::Sequence(
            items
                .iter()
                .map(|item| inject_children(item, children))
                .collect(),
        ),
        Node::Mapping(mapping) => {
            let mut out = Mapping::new();
            for (key, value) in mapping.iter() {
                if key == CHILDREN_TAG {
                    for (child_key, child) in children.iter() {
                        out.insert_child(child_key, child.clone());
                    }
                } else {
                    out.insert_child(key, inject_children(value, children));
                }
            }
            Node::Mapping(out)
        }
        Node::Null | Node::Bool(_) | Node::Number(_) | Node::String(_) => node.clone(),
    }
}

/// Entries an export contributes to the importing element
fn export_content(node: Node) -> Vec<(String, Node)> {
    match node {
        Node::Mapping(mapping) => mapping
            .iter()
            .filter(|(key, _)| !is_attribute_key(key))
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
        other => vec![(TEXT_KEY.to_string(), other)],
    }
}
