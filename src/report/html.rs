//! Minimal HTML node tree.
//!
//! Templates build [`Node`]s rather than strings so tests can inspect structure; the tree is
//! serialised once, when the document is written to a window. Text content and attribute values
//! are escaped on output.

use std::fmt::Write as _;

const VOID_ELEMENTS: &[&str] = &["meta", "br", "hr", "img", "input", "link"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Markup emitted verbatim (doctype, stylesheet bodies).
    Raw(String),
    Fragment(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn style(self, style: impl Into<String>) -> Self {
        self.attr("style", style)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        Node::Raw(markup.into())
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(16 * 1024);
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Raw(markup) => out.push_str(markup),
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.write_to(out)),
            Node::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                for (name, value) in &element.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_to(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }

    /// All elements in document order matching `predicate`.
    pub fn find_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(&predicate, &mut found);
        found
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(|e| e.has_class(class))
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        self.find_all(|e| e.tag == tag)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        match self {
            Node::Element(element) => {
                if predicate(element) {
                    found.push(element);
                }
                for child in &element.children {
                    child.collect(predicate, found);
                }
            }
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.collect(predicate, found)),
            Node::Text(_) | Node::Raw(_) => {}
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => element.children.iter().for_each(|c| c.collect_text(out)),
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.collect_text(out)),
            Node::Raw(_) => {}
        }
    }
}

/// Escape text for HTML content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_elements() {
        let node: Node = el("div")
            .class("card")
            .child(el("h3").text("Total"))
            .child(el("p").class("value").text("LKR 1.00"))
            .into();
        assert_eq!(
            node.render(),
            r#"<div class="card"><h3>Total</h3><p class="value">LKR 1.00</p></div>"#
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node: Node = el("td")
            .attr("title", "a \"quoted\" value")
            .text("<script>&")
            .into();
        assert_eq!(
            node.render(),
            r#"<td title="a &quot;quoted&quot; value">&lt;script&gt;&amp;</td>"#
        );
    }

    #[test]
    fn raw_and_void_elements() {
        let node = Node::Fragment(vec![
            Node::raw("<!DOCTYPE html>"),
            el("meta").attr("charset", "UTF-8").into(),
        ]);
        assert_eq!(node.render(), r#"<!DOCTYPE html><meta charset="UTF-8">"#);
    }

    #[test]
    fn finds_elements_by_class() {
        let node: Node = el("table")
            .child(el("tr").class("data-row"))
            .child(el("tr").class("data-row highlighted"))
            .child(el("tr").class("totals-row"))
            .into();
        assert_eq!(node.find_by_class("data-row").len(), 2);
        assert_eq!(node.find_by_tag("tr").len(), 3);
        assert!(node.find_by_class("data").is_empty());
    }

    #[test]
    fn text_content_skips_raw() {
        let node: Node = el("div")
            .child(el("span").text("a"))
            .child(Node::raw("<b>x</b>"))
            .text("b")
            .into();
        assert_eq!(node.text_content(), "ab");
    }
}
