// File: crates/avexport-core/src/report/dom.rs
// Summary: Minimal HTML content tree built by report entries and serialised into the page template.

use std::fmt::Write as _;

use crate::tables::escape_xml as escape;

#[derive(Clone, Debug, PartialEq)]
pub enum DomNode {
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
        children: Vec<DomNode>,
    },
    Text(String),
}

impl DomNode {
    pub fn element(tag: &'static str) -> Self {
        DomNode::Element { tag, attrs: Vec::new(), children: Vec::new() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        DomNode::Text(text.into())
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let DomNode::Element { attrs, .. } = &mut self {
            attrs.push((name, value.into()));
        }
        self
    }

    pub fn class(self, class: &'static str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: DomNode) -> Self {
        if let DomNode::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn children<I: IntoIterator<Item = DomNode>>(mut self, nodes: I) -> Self {
        if let DomNode::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    /// `<tag>text</tag>` shorthand.
    pub fn with_text(tag: &'static str, text: impl Into<String>) -> Self {
        Self::element(tag).child(Self::text(text))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            DomNode::Text(t) => out.push_str(&escape(t)),
            DomNode::Element { tag, attrs, children } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape(value));
                }
                if is_void(tag) {
                    out.push('>');
                    return;
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "hr")
}
