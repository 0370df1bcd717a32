//! Rewriting a parsed tree from encoded to canonical tag names

use crate::domain::node::{is_reserved_key, Mapping, Node};
use crate::domain::resolver::resolve_tag;
use crate::error::Result;

/// Transform a whole document.
///
/// Top-level elements are transformed independently and merged into one
/// mapping. Text and attribute keys are copied unchanged at every level.
pub fn transform_document(tree: &Node) -> Result<Node> {
    let Node::Mapping(root) = tree else {
        return Ok(tree.clone());
    };

    let mut ancestors = Vec::new();
    transform_mapping(root, &mut ancestors).map(Node::Mapping)
}

/// Resolve one element key and transform its value beneath it
fn transform_element(
    key: &str,
    node: &Node,
    ancestors: &mut Vec<&'static str>,
) -> Result<(&'static str, Node)> {
    let name = resolve_tag(key, ancestors)?;

    ancestors.push(name);
    let transformed = transform_value(node, ancestors);
    ancestors.pop();

    Ok((name, transformed?))
}

fn transform_value(node: &Node, ancestors: &mut Vec<&'static str>) -> Result<Node> {
    match node {
        // Sibling elements share one key, so every item sits under the same name
        Node::Sequence(items) => items
            .iter()
            .map(|item| transform_value(item, ancestors))
            .collect::<Result<Vec<_>>>()
            .map(Node::Sequence),
        Node::Mapping(mapping) => transform_mapping(mapping, ancestors).map(Node::Mapping),
        Node::Null | Node::Bool(_) | Node::Number(_) | Node::String(_) => Ok(node.clone()),
    }
}

fn transform_mapping(mapping: &Mapping, ancestors: &mut Vec<&'static str>) -> Result<Mapping> {
    let mut out = Mapping::new();

    for (key, value) in mapping.iter() {
        if is_reserved_key(key) {
            out.insert(key, value.clone());
            continue;
        }

        let (name, transformed) = transform_element(key, value, ancestors)?;
        out.insert(name, transformed);
    }

    Ok(out)
}
