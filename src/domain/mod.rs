//! Domain layer - Tag decoding and module linking

pub mod modules;
pub mod node;
pub mod resolver;
pub mod tokens;
pub mod transform;

pub use node::{Mapping, Node};
pub use resolver::resolve_tag;
pub use transform::transform_document;
