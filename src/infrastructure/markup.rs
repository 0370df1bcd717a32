//! Reading markup into a [`Node`] tree and rendering trees as HTML

use crate::domain::node::{
    attribute_key, is_attribute_key, is_reserved_key, is_text_key, Mapping, Node,
    ATTRIBUTE_PREFIX, TEXT_KEY,
};
use crate::domain::transform_document;
use crate::error::{HtlmError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

const INDENT: &str = "  ";

/// Result of converting one source text
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Rendered HTML
    pub html: String,
    /// Canonical tree the HTML was rendered from
    pub tree: Node,
}

/// Parse, decode tag names and render in one go
pub fn convert_markup(content: &str) -> Result<Conversion> {
    let parsed = parse_markup(content)?;
    let tree = transform_document(&parsed)?;
    Ok(Conversion {
        html: render_html(&tree),
        tree,
    })
}

/// An element whose end tag has not been seen yet
#[derive(Debug)]
struct OpenElement {
    name: String,
    content: Mapping,
    text: Vec<String>,
}

impl OpenElement {
    fn new(name: String) -> Self {
        OpenElement {
            name,
            content: Mapping::new(),
            text: Vec::new(),
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut element = OpenElement::new(decode(start.name().as_ref())?);

        for attr in start.html_attributes() {
            let attr = attr.map_err(|e| HtlmError::Parse(format!("Invalid attribute: {}", e)))?;
            let key = decode(attr.key.as_ref())?;
            let value = decode(&attr.value)?;
            // `hidden` and `hidden=""` mean the same in HTML; both render bare
            let value = if value.is_empty() {
                Node::Bool(true)
            } else {
                Node::String(value)
            };
            element.content.insert(attribute_key(&key), value);
        }

        Ok(element)
    }

    /// Text-only elements collapse to a string; anything else stays a mapping
    fn finish(self) -> (String, Node) {
        let text = self.text.join(" ");
        if self.content.is_empty() {
            return (self.name, Node::String(text));
        }

        let mut content = self.content;
        if !text.is_empty() {
            content.insert(TEXT_KEY, Node::String(text));
        }
        (self.name, Node::Mapping(content))
    }
}

fn decode(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| HtlmError::Parse(format!("Invalid UTF-8: {}", e)))
}

/// Parse markup into a root mapping of its top-level elements.
///
/// Attributes become `@_name` entries and text the `#text` entry; repeated
/// sibling tags are merged into sequences. Entities are left undecoded.
pub fn parse_markup(content: &str) -> Result<Node> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack = vec![OpenElement::new(String::new())];

    loop {
        let event = reader.read_event().map_err(|e| {
            HtlmError::Parse(format!("{} at position {}", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => stack.push(OpenElement::from_start(&start)?),
            Event::Empty(start) => {
                let (name, node) = OpenElement::from_start(&start)?.finish();
                if let Some(parent) = stack.last_mut() {
                    parent.content.insert_child(name, node);
                }
            }
            Event::End(_) => {
                // The reader rejects mismatched end tags, so the top is the one closing
                if stack.len() < 2 {
                    return Err(HtlmError::Parse("Unexpected closing tag".to_string()));
                }
                if let Some(element) = stack.pop() {
                    let (name, node) = element.finish();
                    if let Some(parent) = stack.last_mut() {
                        parent.content.insert_child(name, node);
                    }
                }
            }
            Event::Text(text) => {
                let text = decode(&text)?;
                if let Some(open) = stack.last_mut() {
                    open.text.push(text);
                }
            }
            Event::CData(data) => {
                let text = decode(&data)?;
                if let Some(open) = stack.last_mut() {
                    open.text.push(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        let unclosed = stack.last().map(|e| e.name.clone()).unwrap_or_default();
        return Err(HtlmError::Parse(format!("Unclosed tag <{}>", unclosed)));
    }

    let root = stack.pop().map(|root| {
        let mut content = root.content;
        if !root.text.is_empty() {
            content.insert(TEXT_KEY, Node::String(root.text.join(" ")));
        }
        content
    });

    Ok(Node::Mapping(root.unwrap_or_default()))
}

/// Render a tree as indented HTML
pub fn render_html(tree: &Node) -> String {
    let mut out = String::new();
    match tree {
        Node::Mapping(root) => write_entries(&mut out, root, 0),
        other => write_text_line(&mut out, other, 0),
    }
    out
}

fn write_entries(out: &mut String, mapping: &Mapping, depth: usize) {
    for (key, value) in mapping.iter() {
        if is_attribute_key(key) {
            continue;
        }
        if is_text_key(key) {
            write_text_line(out, value, depth);
            continue;
        }
        write_element(out, key, value, depth);
    }
}

fn write_element(out: &mut String, name: &str, node: &Node, depth: usize) {
    match node {
        Node::Sequence(items) => {
            for item in items {
                write_element(out, name, item, depth);
            }
        }
        Node::Mapping(mapping) => {
            push_indent(out, depth);
            out.push('<');
            out.push_str(name);
            write_attributes(out, mapping);
            out.push('>');

            if mapping.keys().any(|key| !is_reserved_key(key)) {
                out.push('\n');
                write_entries(out, mapping, depth + 1);
                push_indent(out, depth);
            } else if let Some(text) = mapping.get(TEXT_KEY) {
                out.push_str(&text_of(text));
            }

            out.push_str("</");
            out.push_str(name);
            out.push_str(">\n");
        }
        Node::Null | Node::Bool(_) | Node::Number(_) | Node::String(_) => {
            push_indent(out, depth);
            out.push_str(&format!("<{}>{}</{}>\n", name, node, name));
        }
    }
}

fn write_attributes(out: &mut String, mapping: &Mapping) {
    for (key, value) in mapping.iter() {
        let Some(name) = key.strip_prefix(ATTRIBUTE_PREFIX) else {
            continue;
        };
        match value {
            Node::Bool(true) => {
                out.push(' ');
                out.push_str(name);
            }
            Node::Bool(false) | Node::Null => {}
            other => {
                out.push_str(&format!(
                    " {}=\"{}\"",
                    name,
                    text_of(other).replace('"', "&quot;")
                ));
            }
        }
    }
}

fn write_text_line(out: &mut String, value: &Node, depth: usize) {
    let text = text_of(value);
    if text.is_empty() {
        return;
    }
    push_indent(out, depth);
    out.push_str(&text);
    out.push('\n');
}

fn text_of(value: &Node) -> String {
    match value {
        Node::Sequence(items) => items
            .iter()
            .map(text_of)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping;

    #[test]
    fn test_parse_text_only_elements_as_strings() {
        let tree = parse_markup("<html><body><p>Hello</p></body></html>").unwrap();
        assert_eq!(tree.lookup("html.body.p"), Some(&Node::text("Hello")));
    }

    #[test]
    fn test_parse_attributes_and_text() {
        let tree = parse_markup(r#"<vdi class="card" hidden>Hi <b>there</b></vdi>"#).unwrap();
        let div = tree.lookup("vdi").unwrap().as_mapping().unwrap();
        assert_eq!(div.get("@_class"), Some(&Node::text("card")));
        assert_eq!(div.get("@_hidden"), Some(&Node::Bool(true)));
        assert_eq!(div.get("b"), Some(&Node::text("there")));
        assert_eq!(div.get("#text"), Some(&Node::text("Hi")));
    }

    #[test]
    fn test_parse_merges_repeated_siblings() {
        let tree = parse_markup("<lu><il>a</il><il>b</il><il>c</il></lu>").unwrap();
        assert_eq!(
            tree.lookup("lu.il"),
            Some(&Node::Sequence(vec![Node::text("a"), Node::text("b"), Node::text("c")]))
        );
    }

    #[test]
    fn test_parse_empty_elements() {
        let tree = parse_markup(r#"<body><children/><import id="x" /></body>"#).unwrap();
        assert_eq!(tree.lookup("body.children"), Some(&Node::text("")));
        assert_eq!(
            tree.lookup("body.import"),
            Some(&Node::from(mapping! { "@_id" => "x" }))
        );
    }

    #[test]
    fn test_parse_keeps_entities_raw() {
        let tree = parse_markup("<p>a &amp; b</p>").unwrap();
        assert_eq!(tree.lookup("p"), Some(&Node::text("a &amp; b")));
    }

    #[test]
    fn test_parse_rejects_mismatched_tags() {
        assert!(matches!(
            parse_markup("<div><p>x</div>"),
            Err(HtlmError::Parse(_))
        ));
        assert!(matches!(parse_markup("<div><p>x</p>"), Err(HtlmError::Parse(_))));
    }

    #[test]
    fn test_valueless_attribute_renders_bare() {
        let result = convert_markup(r#"<ptinu type="checkbox" checked disabled=""></ptinu>"#).unwrap();
        assert!(
            result.html.contains(r#"<input type="checkbox" checked disabled></input>"#),
            "{}",
            result.html
        );
    }

    #[test]
    fn test_render_attributes_and_text() {
        let tree = Node::from(mapping! { "div" => mapping! { "@_class" => "card", "p" => "Hi" } });
        let html = render_html(&tree);
        assert!(html.contains(r#"<div class="card">"#));
        assert!(html.contains("<p>Hi</p>"));
    }

    #[test]
    fn test_render_layout() {
        let tree = Node::from(mapping! {
            "html" => mapping! {
                "body" => mapping! {
                    "p" => Node::Sequence(vec![Node::text("one"), Node::text("two")]),
                    "input" => mapping! { "@_disabled" => Node::Bool(true), "@_value" => "say \"hi\"" },
                },
            },
        });

        assert_eq!(
            render_html(&tree),
            "<html>\n  <body>\n    <p>one</p>\n    <p>two</p>\n    \
             <input disabled value=\"say &quot;hi&quot;\"></input>\n  </body>\n</html>\n"
        );
    }

    #[test]
    fn test_convert_markup() {
        let result = convert_markup("<hlmt><yodb><p>Hello</p></yodb></hlmt>").unwrap();
        assert!(result.html.contains("<html>"));
        assert!(result.html.contains("<body>"));
        assert!(result.html.contains("<p>Hello</p>"));
        assert!(result.tree.lookup("html.body.p").is_some());
    }

    #[test]
    fn test_convert_is_scramble_independent() {
        for body in ["bdoy", "yodb", "obdy", "BODY"] {
            let source = format!(r#"<{b} id="main"><vid>x</vid></{b}>"#, b = body);
            let result = convert_markup(&source).unwrap();
            assert!(result.html.contains(r#"<body id="main">"#), "{}", result.html);
            assert!(result.html.contains("<div>x</div>"));
        }
    }
}
