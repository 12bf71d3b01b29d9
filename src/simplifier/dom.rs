//! Owned document tree the simplification passes rewrite in place.

use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{ElementRef, Selector};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the attribute's value, or append it if absent
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.iter().any(|v| self.is(v))
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Whether this element is, or contains, an `img`
    pub fn has_image(&self) -> bool {
        self.is("img")
            || self.children.iter().any(|child| match child {
                Node::Element(el) => el.has_image(),
                Node::Text(_) => false,
            })
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

/// Copy the children of `parent` into owned nodes, skipping every element
/// matched by `denylist` together with its subtree.
///
/// Comments, processing instructions and doctypes are dropped.
pub fn collect_children(parent: ElementRef<'_>, denylist: &[Selector]) -> Vec<Node> {
    let mut nodes = Vec::new();

    for child in parent.children() {
        if let Some(text) = child.value().as_text() {
            nodes.push(Node::Text(text.to_string()));
            continue;
        }

        let Some(element) = ElementRef::wrap(child) else {
            continue;
        };

        if denylist.iter().any(|selector| selector.matches(&element)) {
            continue;
        }

        nodes.push(Node::Element(Element {
            name: element.value().name().to_string(),
            attrs: element
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children: collect_children(element, denylist),
        }));
    }

    nodes
}

/// Serialize nodes back to HTML markup.
pub fn serialize(nodes: &[Node]) -> String {
    let mut out = String::new();
    write_nodes(nodes, &mut out);
    out
}

fn write_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&encode_text(text)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.name);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');

                if el.is_void() {
                    continue;
                }

                write_nodes(&el.children, out);
                out.push_str("</");
                out.push_str(&el.name);
                out.push('>');
            }
        }
    }
}
