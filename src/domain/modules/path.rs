//! Addressing nodes inside a document tree

use crate::domain::node::Node;
use crate::error::{HtlmError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Regex for one path segment: `key` or `key[3]`
fn segment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([^\[\]/]+)(?:\[(\d+)\])?$").unwrap())
}

/// A key, plus the position inside the value when that value is a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub key: String,
    pub index: Option<usize>,
}

impl PathSegment {
    pub fn new(key: impl Into<String>, index: Option<usize>) -> Self {
        PathSegment {
            key: key.into(),
            index,
        }
    }
}

/// Location of a node, written as `html/body/import[0]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

/// A structural change made by a splice that can shift other paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEdit {
    /// Item `index` of the sequence at `parent/key` was removed
    Removed {
        parent: Vec<PathSegment>,
        key: String,
        index: usize,
    },
    /// The single value at `parent/key` became item 0 of a sequence
    Promoted {
        parent: Vec<PathSegment>,
        key: String,
    },
}

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path of the element stored under `key` below this one
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::new(key, None));
        NodePath { segments }
    }

    /// Same path pointing at item `index` of the sequence it ends on
    pub fn indexed(&self, index: usize) -> Self {
        let mut path = self.clone();
        if let Some(last) = path.segments.last_mut() {
            last.index = Some(index);
        }
        path
    }

    /// Split into the parent container's segments and the final segment
    pub fn split_last(&self) -> Option<(&[PathSegment], &PathSegment)> {
        let (last, parent) = self.segments.split_last()?;
        Some((parent, last))
    }

    /// Keep this path pointing at the same node after `edit`
    pub fn apply(&mut self, edit: &PathEdit) {
        let (parent, key) = match edit {
            PathEdit::Removed { parent, key, .. } | PathEdit::Promoted { parent, key } => {
                (parent, key)
            }
        };

        if self.segments.len() <= parent.len() || self.segments[..parent.len()] != parent[..] {
            return;
        }

        let segment = &mut self.segments[parent.len()];
        if segment.key != *key {
            return;
        }

        match (edit, segment.index) {
            (PathEdit::Removed { index, .. }, Some(current)) if current > *index => {
                segment.index = Some(current - 1);
            }
            (PathEdit::Promoted { .. }, None) => segment.index = Some(0),
            _ => {}
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(&segment.key)?;
            if let Some(index) = segment.index {
                write!(f, "[{}]", index)?;
            }
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = HtlmError;

    fn from_str(s: &str) -> Result<Self> {
        let segments = s
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| -> Result<PathSegment> {
                let caps = segment_regex()
                    .captures(part)
                    .ok_or_else(|| HtlmError::Parse(format!("Invalid path segment '{}'", part)))?;
                let index = caps
                    .get(2)
                    .map(|m| m.as_str().parse::<usize>())
                    .transpose()
                    .map_err(|e| HtlmError::Parse(format!("Invalid index in '{}': {}", part, e)))?;
                Ok(PathSegment::new(&caps[1], index))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(NodePath { segments })
    }
}

/// Follow `segments` from `root`
pub fn node_at<'a>(root: &'a Node, segments: &[PathSegment]) -> Option<&'a Node> {
    segments.iter().try_fold(root, |node, segment| {
        let value = node.as_mapping()?.get(&segment.key)?;
        match (segment.index, value) {
            (None, _) => Some(value),
            (Some(i), Node::Sequence(items)) => items.get(i),
            (Some(_), _) => None,
        }
    })
}

/// Mutable variant of [`node_at`]
pub fn node_at_mut<'a>(root: &'a mut Node, segments: &[PathSegment]) -> Option<&'a mut Node> {
    segments.iter().try_fold(root, |node, segment| {
        let value = node.as_mapping_mut()?.get_mut(&segment.key)?;
        match (segment.index, value) {
            (None, value) => Some(value),
            (Some(i), Node::Sequence(items)) => items.get_mut(i),
            (Some(_), _) => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping;

    fn path(s: &str) -> NodePath {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let p = path("html/body/import[0]");
        assert_eq!(p.segments().len(), 3);
        assert_eq!(p.segments()[2], PathSegment::new("import", Some(0)));
        assert_eq!(p.to_string(), "html/body/import[0]");
        assert!(path("").is_root());
    }

    #[test]
    fn test_parse_rejects_malformed_segment() {
        assert!("html/bo[dy".parse::<NodePath>().is_err());
        assert!("html/body[x]".parse::<NodePath>().is_err());
    }

    #[test]
    fn test_child_and_indexed() {
        let p = NodePath::root().child("html").child("li").indexed(2);
        assert_eq!(p.to_string(), "html/li[2]");
    }

    #[test]
    fn test_node_at() {
        let tree = Node::from(mapping! {
            "html" => mapping! {
                "p" => Node::Sequence(vec![Node::text("a"), Node::text("b")]),
            },
        });
        assert_eq!(node_at(&tree, path("html/p[1]").segments()), Some(&Node::text("b")));
        assert!(node_at(&tree, path("html/p[2]").segments()).is_none());
        assert!(node_at(&tree, path("html/div").segments()).is_none());
    }

    #[test]
    fn test_removal_shifts_later_siblings() {
        let mut later = path("html/body/import[2]");
        let mut earlier = path("html/body/import[0]");
        let mut deeper = path("html/body/div[3]/import");
        let edit = PathEdit::Removed {
            parent: path("html/body").segments().to_vec(),
            key: "import".to_string(),
            index: 1,
        };

        later.apply(&edit);
        earlier.apply(&edit);
        deeper.apply(&edit);

        assert_eq!(later.to_string(), "html/body/import[1]");
        assert_eq!(earlier.to_string(), "html/body/import[0]");
        assert_eq!(deeper.to_string(), "html/body/div[3]/import");
    }

    #[test]
    fn test_promotion_adds_index() {
        let mut p = path("html/body/div/import");
        p.apply(&PathEdit::Promoted {
            parent: path("html/body").segments().to_vec(),
            key: "div".to_string(),
        });
        assert_eq!(p.to_string(), "html/body/div[0]/import");
    }
}
