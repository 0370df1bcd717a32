//! Generic document tree

use std::fmt;

/// Key holding the inline text of an element
pub const TEXT_KEY: &str = "#text";

/// Prefix marking an attribute entry rather than a child element
pub const ATTRIBUTE_PREFIX: &str = "@_";

/// Returns true if the key holds inline text
pub fn is_text_key(key: &str) -> bool {
    key == TEXT_KEY
}

/// Returns true if the key is an attribute entry
pub fn is_attribute_key(key: &str) -> bool {
    key.starts_with(ATTRIBUTE_PREFIX)
}

/// Returns true for keys that never name an element (text or attributes)
pub fn is_reserved_key(key: &str) -> bool {
    is_text_key(key) || is_attribute_key(key)
}

/// Build the mapping key for an attribute name
pub fn attribute_key(name: &str) -> String {
    format!("{}{}", ATTRIBUTE_PREFIX, name)
}

/// A parsed markup value.
///
/// Elements with text only are stored as primitives, elements with
/// attributes or children as mappings, and repeated sibling elements sharing
/// one tag name as a sequence under that name.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::String(value.into())
    }

    /// True for everything that is not a sequence or a mapping
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Node::Sequence(_) | Node::Mapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Look up an attribute value on a mapping node
    pub fn attribute(&self, name: &str) -> Option<&Node> {
        self.as_mapping()?.get(&attribute_key(name))
    }

    /// Follow a chain of element keys through nested mappings.
    ///
    /// Sequences are not entered; this is meant for assertions on small trees.
    pub fn lookup(&self, dotted: &str) -> Option<&Node> {
        dotted
            .split('.')
            .try_fold(self, |node, key| node.as_mapping()?.get(key))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => Ok(()),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Number(n) => write!(f, "{}", n),
            Node::String(s) => f.write_str(s),
            Node::Sequence(_) | Node::Mapping(_) => f.write_str("[element]"),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

/// Insertion-ordered key/value entries of an element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Set a value, replacing an existing entry in place
    pub fn insert(&mut self, key: impl Into<String>, value: Node) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Add a child element, merging with an existing sibling of the same name.
    ///
    /// A new key is inserted directly. An existing single value is promoted to
    /// a sequence with the new value appended after it. Returns true when a
    /// promotion took place.
    pub fn insert_child(&mut self, key: impl Into<String>, value: Node) -> bool {
        let key = key.into();
        let Some(existing) = self.get_mut(&key) else {
            self.entries.push((key, value));
            return false;
        };

        match existing {
            Node::Sequence(items) => {
                items.push(value);
                false
            }
            _ => {
                let previous = std::mem::replace(existing, Node::Null);
                *existing = Node::Sequence(vec![previous, value]);
                true
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

/// Build a mapping from literal entries, mostly for tests
#[macro_export]
macro_rules! mapping {
    () => { $crate::domain::node::Mapping::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut m = $crate::domain::node::Mapping::new();
        $( m.insert($key, $crate::domain::node::Node::from($value)); )+
        m
    }};
}
