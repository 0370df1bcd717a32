//! Cross-document import/export linking

pub mod collector;
pub mod linker;
pub mod path;

pub use collector::{collect_module_tags, ModuleTag, ModuleTags};
pub use linker::{resolve_queued_imports, LinkDiagnostic, QueuedDocument, OUTPUT_EXTENSION};
pub use path::{NodePath, PathSegment};
