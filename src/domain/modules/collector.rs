//! Finding import and export elements in a canonical tree

use crate::domain::modules::path::NodePath;
use crate::domain::node::{is_reserved_key, Node};
use crate::domain::tokens::{EXPORT_TAG, IMPORT_TAG};
use crate::error::Result;

/// An `<import>` or `<export>` element and where it sits in its document
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleTag {
    pub path: NodePath,
    pub node: Node,
}

impl ModuleTag {
    pub fn new(path: NodePath, node: Node) -> Self {
        ModuleTag { path, node }
    }

    /// Build a tag from a textual path such as `html/body/import[1]`
    pub fn parse(path: &str, node: Node) -> Result<Self> {
        Ok(ModuleTag::new(path.parse()?, node))
    }

    /// Value of the `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.node.attribute("id")?.as_str()
    }

    /// Value of the `src` attribute, if present and non-empty
    pub fn src(&self) -> Option<&str> {
        self.node
            .attribute("src")?
            .as_str()
            .filter(|src| !src.is_empty())
    }
}

/// Module tags collected from one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleTags {
    pub imports: Vec<ModuleTag>,
    pub exports: Vec<ModuleTag>,
}

impl ModuleTags {
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.exports.is_empty()
    }
}

/// Collect every import and export element, depth first.
///
/// Recorded elements are descended into as well, so module tags nested in
/// other module tags are found too.
pub fn collect_module_tags(tree: &Node) -> ModuleTags {
    let mut tags = ModuleTags::default();
    walk(tree, &NodePath::root(), &mut tags);
    tags
}

fn walk(node: &Node, path: &NodePath, tags: &mut ModuleTags) {
    match node {
        Node::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                walk(item, &path.indexed(index), tags);
            }
        }
        Node::Mapping(mapping) => {
            for (key, value) in mapping.iter() {
                if is_reserved_key(key) {
                    continue;
                }

                let next = path.child(key);
                let bucket = match key {
                    IMPORT_TAG => Some(&mut tags.imports),
                    EXPORT_TAG => Some(&mut tags.exports),
                    _ => None,
                };
                if let Some(bucket) = bucket {
                    record(value, &next, bucket);
                }

                walk(value, &next, tags);
            }
        }
        Node::Null | Node::Bool(_) | Node::Number(_) | Node::String(_) => {}
    }
}

fn record(value: &Node, path: &NodePath, bucket: &mut Vec<ModuleTag>) {
    match value {
        Node::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                bucket.push(ModuleTag::new(path.indexed(index), item.clone()));
            }
        }
        _ => bucket.push(ModuleTag::new(path.clone(), value.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping;

    fn paths(tags: &[ModuleTag]) -> Vec<String> {
        tags.iter().map(|t| t.path.to_string()).collect()
    }

    #[test]
    fn test_no_module_tags() {
        let tree = Node::from(mapping! { "html" => mapping! { "body" => mapping! { "p" => "x" } } });
        assert!(collect_module_tags(&tree).is_empty());
    }

    #[test]
    fn test_collects_single_and_repeated() {
        let tree = Node::from(mapping! {
            "html" => mapping! {
                "body" => mapping! {
                    "import" => Node::Sequence(vec![
                        Node::from(mapping! { "@_id" => "a" }),
                        Node::from(mapping! { "@_id" => "b" }),
                    ]),
                    "section" => mapping! { "export" => mapping! { "@_id" => "c", "p" => "x" } },
                },
            },
        });

        let tags = collect_module_tags(&tree);
        assert_eq!(
            paths(&tags.imports),
            vec!["html/body/import[0]", "html/body/import[1]"]
        );
        assert_eq!(paths(&tags.exports), vec!["html/body/section/export"]);
        assert_eq!(tags.imports[1].id(), Some("b"));
        assert_eq!(tags.exports[0].id(), Some("c"));
    }

    #[test]
    fn test_descends_into_module_tags_and_sequences() {
        let tree = Node::from(mapping! {
            "div" => Node::Sequence(vec![
                Node::text("plain"),
                Node::from(mapping! {
                    "export" => mapping! { "@_id" => "outer", "import" => mapping! { "@_id" => "inner" } },
                }),
            ]),
        });

        let tags = collect_module_tags(&tree);
        assert_eq!(paths(&tags.exports), vec!["div[1]/export"]);
        assert_eq!(paths(&tags.imports), vec!["div[1]/export/import"]);
    }

    #[test]
    fn test_src_attribute() {
        let tag = ModuleTag::parse(
            "html/body/import",
            Node::from(mapping! { "@_id" => "x", "@_src" => "./partials/b" }),
        )
        .unwrap();
        assert_eq!(tag.src(), Some("./partials/b"));

        let empty = ModuleTag::parse("import", Node::from(mapping! { "@_id" => "x", "@_src" => "" }))
            .unwrap();
        assert_eq!(empty.src(), None);
    }
}
