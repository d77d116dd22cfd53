//! Safe rendering of author-supplied article HTML.
//!
//! Every entry point runs the same pipeline:
//! `tokenize -> build tree -> sanitize -> rewrite code -> serialize`.
//! Markup is parsed once, sanitized as a tree and never re-parsed, so a
//! code sample containing `<div>` reaches the page as text.
//!
//! ```
//! let html = alalfy_render::render_html("<pre><code>&lt;div&gt;</code></pre>");
//! assert!(html.contains("&lt;div&gt;"));
//! assert!(!html.contains("<div>"));
//! ```

#![warn(missing_docs)]

mod escape;
mod render;
mod sanitize;
mod tokenizer;
mod tree;

pub use escape::{decode_entities, escape_attr, escape_code, escape_text};
pub use render::{DEFAULT_LANGUAGE, Document, RenderNode, rewrite_code};
pub use sanitize::{Sanitized, is_safe_url};
pub use tokenizer::{Attribute, Token, tokenize};
pub use tree::{Element, MAX_DEPTH, Node};

use tree::{build, text_content};

/// Elements whose boundaries separate words in plain text.
const TEXT_BREAKS: [&str; 22] = [
    "blockquote", "br", "dd", "div", "dl", "dt", "figcaption", "figure", "h1", "h2", "h3", "h4",
    "h5", "h6", "hr", "li", "ol", "p", "pre", "td", "tr", "ul",
];

/// Parses and sanitizes `html`.
pub fn sanitize(html: &str) -> Sanitized {
    sanitize::sanitize_nodes(build(tokenize(html)))
}

/// Sanitized HTML without the code rewrite or the prose container.
pub fn sanitize_html(html: &str) -> String {
    sanitize(html).to_html()
}

/// Full pipeline, returning the render tree.
pub fn render(html: &str) -> Document {
    rewrite_code(sanitize(html))
}

/// Full pipeline, returning markup ready to be injected into the page.
pub fn render_html(html: &str) -> String {
    render(html).to_html()
}

/// Visible text of `html` after sanitizing, whitespace collapsed.
///
/// Block boundaries and `<br>` count as spaces, so `<h3>a</h3><p>b</p>`
/// reads `a b`.
pub fn to_plain_text(html: &str) -> String {
    let mut raw = String::new();
    collect_plain(sanitize(html).nodes(), &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_plain(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name == "pre" => {
                out.push(' ');
                out.push_str(&text_content(&el.children));
                out.push(' ');
            }
            Node::Element(el) => {
                let breaks = TEXT_BREAKS.contains(&el.name.as_str());
                if breaks {
                    out.push(' ');
                }
                collect_plain(&el.children, out);
                if breaks {
                    out.push(' ');
                }
            }
        }
    }
}
