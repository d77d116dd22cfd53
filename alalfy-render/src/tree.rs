//! Element tree built from the token stream.

use crate::escape::{escape_attr, escape_text};
use crate::tokenizer::{Attribute, Token};

/// Nesting beyond this depth is flattened into the deepest open element.
pub const MAX_DEPTH: usize = 256;

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Start tags that close an open `<p>`.
const CLOSES_P: [&str; 28] = [
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre",
];

/// Open elements that stop the search for a `<p>` to close.
const P_SCOPE: [&str; 16] = [
    "blockquote", "dd", "div", "dt", "figcaption", "figure", "li", "ol", "pre", "table", "tbody",
    "td", "th", "thead", "tr", "ul",
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Element with its attributes and children.
pub struct Element {
    /// Lowercase tag name.
    pub name: String,
    /// Attributes in source order.
    pub attrs: Vec<Attribute>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Value of attribute `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Tree node.
pub enum Node {
    /// Element node.
    Element(Element),
    /// Decoded character data.
    Text(String),
}

/// `true` for elements that never have children or an end tag.
pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Builds a forest from tokens, recovering from misnested markup:
/// an end tag closes up to the nearest matching open element or is ignored,
/// `<li>`/`<dt>`/`<dd>` close their open sibling and block starts close `<p>`.
pub fn build(tokens: Vec<Token>) -> Vec<Node> {
    let mut builder = TreeBuilder::default();
    for token in tokens {
        match token {
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => builder.start(name, attrs, self_closing),
            Token::EndTag { name } => builder.end(&name),
            Token::Text(text) => builder.text(text),
        }
    }
    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn start(&mut self, name: String, attrs: Vec<Attribute>, self_closing: bool) {
        self.close_implied(&name);

        let element = Element {
            name,
            attrs,
            children: Vec::new(),
        };
        if self_closing || is_void(&element.name) {
            self.append(Node::Element(element));
        } else if self.open.len() >= MAX_DEPTH {
            // too deep: keep the content, lose the wrapper
        } else {
            self.open.push(element);
        }
    }

    fn end(&mut self, name: &str) {
        if let Some(index) = self.open.iter().rposition(|el| el.name == name) {
            self.close_to(index);
        }
    }

    fn text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        let siblings = match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        };
        if let Some(Node::Text(last)) = siblings.last_mut() {
            last.push_str(&text);
        } else {
            siblings.push(Node::Text(text));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.close_to(0);
        self.roots
    }

    fn close_implied(&mut self, name: &str) {
        let sibling_scope: &[&str] = match name {
            "li" => &["ol", "ul"],
            "dt" | "dd" => &["dl"],
            _ => &[],
        };
        if !sibling_scope.is_empty() {
            let same_kind: &[&str] = if name == "li" { &["li"] } else { &["dt", "dd"] };
            if let Some(index) = self.find_open(same_kind, sibling_scope) {
                self.close_to(index);
            }
        }

        if CLOSES_P.contains(&name) {
            if let Some(index) = self.find_open(&["p"], &P_SCOPE) {
                self.close_to(index);
            }
        }
    }

    /// Innermost open element named in `targets`, searching outwards and
    /// stopping at any element named in `scope`.
    fn find_open(&self, targets: &[&str], scope: &[&str]) -> Option<usize> {
        for (index, el) in self.open.iter().enumerate().rev() {
            if targets.contains(&el.name.as_str()) {
                return Some(index);
            }
            if scope.contains(&el.name.as_str()) {
                return None;
            }
        }
        None
    }

    /// Pops open elements until the stack is `index` long.
    fn close_to(&mut self, index: usize) {
        while self.open.len() > index {
            if let Some(el) = self.open.pop() {
                self.append(Node::Element(el));
            }
        }
    }

    fn append(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }
}

/// Serializes nodes back to HTML.
pub fn write_html(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Element(el) => {
                write_start_tag(&el.name, &el.attrs, out);
                if !is_void(&el.name) {
                    write_html(&el.children, out);
                    out.push_str("</");
                    out.push_str(&el.name);
                    out.push('>');
                }
            }
        }
    }
}

pub(crate) fn write_start_tag(name: &str, attrs: &[Attribute], out: &mut String) {
    out.push('<');
    out.push_str(name);
    for attr in attrs {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&escape_attr(&attr.value));
        out.push('"');
    }
    out.push('>');
}

/// Concatenated text of `nodes` and all their descendants.
pub fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn html(input: &str) -> String {
        let mut out = String::new();
        write_html(&build(tokenize(input)), &mut out);
        out
    }

    #[test]
    fn nests_and_serializes() {
        assert_eq!(
            html(r#"<p class=x>a <b>b</b> &lt;c&gt;</p>"#),
            r#"<p class="x">a <b>b</b> &lt;c&gt;</p>"#
        );
    }

    #[test]
    fn void_elements_take_no_children() {
        assert_eq!(html("<p>a<br>b<img src=x>c</p>"), r#"<p>a<br>b<img src="x">c</p>"#);
    }

    #[test]
    fn stray_end_tag_is_ignored() {
        assert_eq!(html("<p>a</span>b</p></div>"), "<p>ab</p>");
    }

    #[test]
    fn end_tag_closes_intermediate_elements() {
        assert_eq!(html("<div><b><i>x</div>y"), "<div><b><i>x</i></b></div>y");
    }

    #[test]
    fn list_items_close_their_open_sibling() {
        assert_eq!(
            html("<ul><li>a<li>b<ul><li>c</ul></ul>"),
            "<ul><li>a</li><li>b<ul><li>c</li></ul></li></ul>"
        );
    }

    #[test]
    fn block_start_closes_paragraph() {
        assert_eq!(html("<p>a<div>b</div>"), "<p>a</p><div>b</div>");
        assert_eq!(html("<p><span>a<h2>b</h2>"), "<p><span>a</span></p><h2>b</h2>");
        assert_eq!(html("<div><p>a</div>b"), "<div><p>a</p></div>b");
    }

    #[test]
    fn unclosed_elements_are_closed_at_end() {
        assert_eq!(html("<blockquote><p>quote"), "<blockquote><p>quote</p></blockquote>");
    }

    #[test]
    fn deep_nesting_is_flattened() {
        let input = "<span>".repeat(MAX_DEPTH + 50) + "x";
        let nodes = build(tokenize(&input));
        assert_eq!(text_content(&nodes), "x");

        let mut depth = 0;
        let mut current = &nodes;
        while let Some(Node::Element(el)) = current.first() {
            depth += 1;
            current = &el.children;
        }
        assert_eq!(depth, MAX_DEPTH);
    }
}
