//! Code-block rewrite and final serialization.

use crate::escape::{escape_attr, escape_code, escape_text};
use crate::sanitize::Sanitized;
use crate::tokenizer::Attribute;
use crate::tree::{Element, Node, is_void, text_content, write_start_tag};

/// Language used when a code block names none.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

const ROOT_CLASS: &str = "prose prose-lg max-w-none text-right direction-rtl";
const CODE_BLOCK_WRAPPER_CLASS: &str = "my-4 direction-ltr";
const CODE_BLOCK_PRE_CLASS: &str = "bg-gray-900 text-gray-100 p-4 rounded-lg overflow-x-auto direction-ltr text-left font-mono text-sm leading-relaxed";
const INLINE_CODE_CLASS: &str = "bg-muted px-2 py-1 rounded text-sm font-mono direction-ltr";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Node of the tree handed to the page.
pub enum RenderNode {
    /// Allowed element, attributes already filtered.
    Element {
        /// Tag name.
        name: String,
        /// Filtered attributes.
        attrs: Vec<Attribute>,
        /// Children.
        children: Vec<RenderNode>,
    },
    /// Character data.
    Text(String),
    /// `<pre><code>` block shown left-to-right.
    CodeBlock {
        /// `language-*` class name, or [`DEFAULT_LANGUAGE`].
        language: String,
        /// Literal code text.
        code: String,
    },
    /// `<code>` outside a block.
    InlineCode {
        /// Literal code text.
        code: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Rendered article body.
pub struct Document {
    nodes: Vec<RenderNode>,
}

impl Document {
    /// Top-level nodes.
    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    /// `true` when nothing survived sanitizing.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Code blocks in document order.
    pub fn code_blocks(&self) -> Vec<(&str, &str)> {
        let mut blocks = Vec::new();
        collect_code_blocks(&self.nodes, &mut blocks);
        blocks
    }

    /// HTML inside the right-to-left prose container.
    pub fn to_html(&self) -> String {
        self.to_html_with_class("")
    }

    /// Like [`Document::to_html`], appending `extra_class` to the container.
    pub fn to_html_with_class(&self, extra_class: &str) -> String {
        let class = match extra_class.trim() {
            "" => ROOT_CLASS.to_string(),
            extra => format!("{ROOT_CLASS} {extra}"),
        };
        let mut out = String::new();
        out.push_str("<div class=\"");
        out.push_str(&escape_attr(&class));
        out.push_str("\" dir=\"rtl\">");
        write_nodes(&self.nodes, &mut out);
        out.push_str("</div>");
        out
    }
}

/// Replaces code elements of a sanitized tree with code nodes.
///
/// A `<pre>` with a direct `<code>` child becomes a [`RenderNode::CodeBlock`]
/// holding the text of the whole `<pre>`. Every other `<code>` becomes
/// [`RenderNode::InlineCode`]. Code text is kept literal.
pub fn rewrite_code(sanitized: Sanitized) -> Document {
    Document {
        nodes: rewrite_nodes(sanitized.into_nodes()),
    }
}

fn rewrite_nodes(nodes: Vec<Node>) -> Vec<RenderNode> {
    nodes.into_iter().map(rewrite_node).collect()
}

fn rewrite_node(node: Node) -> RenderNode {
    let el = match node {
        Node::Text(text) => return RenderNode::Text(text),
        Node::Element(el) => el,
    };

    match el.name.as_str() {
        "pre" => match block_language(&el) {
            Some(language) => RenderNode::CodeBlock {
                language,
                code: text_content(&el.children),
            },
            None => plain_element(el),
        },
        "code" => RenderNode::InlineCode {
            code: text_content(&el.children),
        },
        _ => plain_element(el),
    }
}

fn plain_element(el: Element) -> RenderNode {
    RenderNode::Element {
        name: el.name,
        attrs: el.attrs,
        children: rewrite_nodes(el.children),
    }
}

/// Language of a `<pre>` whose direct children include `<code>`.
fn block_language(pre: &Element) -> Option<String> {
    let code = pre.children.iter().find_map(|child| match child {
        Node::Element(el) if el.name == "code" => Some(el),
        _ => None,
    })?;
    let language = code
        .attr("class")
        .and_then(language_from_class)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    Some(language)
}

fn language_from_class(class: &str) -> Option<String> {
    class.split_whitespace().find_map(|word| {
        let rest = word.strip_prefix("language-")?;
        let name: String = rest
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        (!name.is_empty()).then_some(name)
    })
}

fn collect_code_blocks<'a>(nodes: &'a [RenderNode], out: &mut Vec<(&'a str, &'a str)>) {
    for node in nodes {
        match node {
            RenderNode::CodeBlock { language, code } => {
                out.push((language.as_str(), code.as_str()));
            }
            RenderNode::Element { children, .. } => collect_code_blocks(children, out),
            _ => {}
        }
    }
}

fn write_nodes(nodes: &[RenderNode], out: &mut String) {
    for node in nodes {
        match node {
            RenderNode::Text(text) => out.push_str(&escape_text(text)),
            RenderNode::Element {
                name,
                attrs,
                children,
            } => {
                write_start_tag(name, attrs, out);
                if !is_void(name) {
                    write_nodes(children, out);
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
            }
            RenderNode::CodeBlock { language, code } => {
                out.push_str("<div class=\"");
                out.push_str(CODE_BLOCK_WRAPPER_CLASS);
                out.push_str("\" dir=\"ltr\"><pre class=\"");
                out.push_str(CODE_BLOCK_PRE_CLASS);
                out.push_str("\"><code class=\"language-");
                out.push_str(&escape_attr(language));
                out.push_str("\">");
                out.push_str(&escape_code(code));
                out.push_str("</code></pre></div>");
            }
            RenderNode::InlineCode { code } => {
                out.push_str("<code class=\"");
                out.push_str(INLINE_CODE_CLASS);
                out.push_str("\" dir=\"ltr\">");
                out.push_str(&escape_code(code));
                out.push_str("</code>");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::sanitize_nodes;
    use crate::tokenizer::tokenize;
    use crate::tree::build;

    fn doc(input: &str) -> Document {
        rewrite_code(sanitize_nodes(build(tokenize(input))))
    }

    #[test]
    fn pre_code_becomes_block_with_language() {
        let doc = doc(r#"<pre><code class="hljs language-rust">fn main() {}</code></pre>"#);
        assert_eq!(
            doc.nodes(),
            &[RenderNode::CodeBlock {
                language: "rust".to_string(),
                code: "fn main() {}".to_string(),
            }]
        );
    }

    #[test]
    fn block_without_language_defaults_to_plaintext() {
        let doc = doc("<pre><code>ls -la</code></pre>");
        assert_eq!(doc.code_blocks(), vec![(DEFAULT_LANGUAGE, "ls -la")]);
    }

    #[test]
    fn language_takes_word_prefix() {
        assert_eq!(language_from_class("language-c++"), Some("c".to_string()));
        assert_eq!(language_from_class("x language-"), None);
        assert_eq!(language_from_class("a language-js language-ts"), Some("js".to_string()));
    }

    #[test]
    fn block_code_is_text_of_whole_pre() {
        let doc = doc("<pre>$ <code>cargo</code> run</pre>");
        assert_eq!(doc.code_blocks(), vec![(DEFAULT_LANGUAGE, "$ cargo run")]);
    }

    #[test]
    fn pre_without_code_stays_an_element() {
        let doc = doc("<pre>plain</pre>");
        assert!(doc.code_blocks().is_empty());
        assert!(doc.to_html().contains("<pre>plain</pre>"));
    }

    #[test]
    fn other_code_is_inline() {
        let doc = doc("<p>use <code>Vec&lt;T&gt;</code></p>");
        assert_eq!(
            doc.nodes(),
            &[RenderNode::Element {
                name: "p".to_string(),
                attrs: vec![],
                children: vec![
                    RenderNode::Text("use ".to_string()),
                    RenderNode::InlineCode {
                        code: "Vec<T>".to_string(),
                    },
                ],
            }]
        );
    }

    #[test]
    fn serializes_inside_rtl_container() {
        let html = doc("<p>مرحبا</p>").to_html();
        assert_eq!(
            html,
            format!(r#"<div class="{ROOT_CLASS}" dir="rtl"><p>مرحبا</p></div>"#)
        );
    }

    #[test]
    fn extra_class_is_appended() {
        let html = Document::default().to_html_with_class("mt-8");
        assert_eq!(html, format!(r#"<div class="{ROOT_CLASS} mt-8" dir="rtl"></div>"#));
    }

    #[test]
    fn code_block_markup_is_ltr_and_escaped() {
        let html = doc(r#"<pre><code class="language-html">&lt;a href="x"&gt;it's&lt;/a&gt;</code></pre>"#)
            .to_html();
        assert!(html.contains(r#"<div class="my-4 direction-ltr" dir="ltr"><pre class=""#));
        assert!(html.contains(
            r#"<code class="language-html">&lt;a href=&quot;x&quot;&gt;it&#39;s&lt;/a&gt;</code></pre></div>"#
        ));
    }
}
