//! Allowlist sanitizer.
//!
//! Runs over the parsed tree, never over strings. An element is either
//! kept (with its attributes filtered), dropped together with everything
//! inside it, or unwrapped so only its children survive.

use tracing::debug;

use crate::tokenizer::Attribute;
use crate::tree::{Node, write_html};

const ALLOWED_ELEMENTS: [&str; 51] = [
    "a", "abbr", "b", "blockquote", "br", "caption", "cite", "code", "dd", "del", "div", "dl",
    "dt", "em", "figcaption", "figure", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img",
    "ins", "kbd", "li", "mark", "ol", "p", "pre", "q", "s", "small", "span", "strong", "sub",
    "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "u", "ul", "section", "article",
    "time",
];

const DROPPED_ELEMENTS: [&str; 24] = [
    "script", "style", "iframe", "object", "embed", "noscript", "template", "svg", "math", "form",
    "input", "button", "textarea", "select", "link", "meta", "base", "title", "frame",
    "frameset", "applet", "xmp", "noembed", "noframes",
];

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

const FORCED_REL: &str = "noopener noreferrer";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Tree that has been through the allowlist.
///
/// Only [`sanitize_nodes`] builds one, so code that takes `Sanitized`
/// cannot be handed unfiltered markup.
pub struct Sanitized {
    nodes: Vec<Node>,
}

impl Sanitized {
    /// Sanitized nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Serializes back to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(&self.nodes, &mut out);
        out
    }

    pub(crate) fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

/// Applies the element and attribute allowlists.
pub fn sanitize_nodes(nodes: Vec<Node>) -> Sanitized {
    let mut out = Vec::with_capacity(nodes.len());
    clean_into(nodes, &mut out);
    Sanitized { nodes: out }
}

fn clean_into(nodes: Vec<Node>, out: &mut Vec<Node>) {
    for node in nodes {
        match node {
            Node::Text(text) => push_text(out, text),
            Node::Element(mut el) => {
                let name = el.name.as_str();
                if DROPPED_ELEMENTS.contains(&name) {
                    debug!(element = name, "dropped element with its content");
                    continue;
                }
                if !ALLOWED_ELEMENTS.contains(&name) {
                    debug!(element = name, "unwrapped unknown element");
                    clean_into(el.children, out);
                    continue;
                }

                el.attrs = filter_attributes(&el.name, el.attrs);
                if el.name == "img" && el.attr("src").is_none() {
                    debug!("dropped image without a safe src");
                    continue;
                }

                let mut children = Vec::with_capacity(el.children.len());
                clean_into(std::mem::take(&mut el.children), &mut children);
                el.children = children;
                out.push(Node::Element(el));
            }
        }
    }
}

fn push_text(out: &mut Vec<Node>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = out.last_mut() {
        last.push_str(&text);
    } else {
        out.push(Node::Text(text));
    }
}

fn filter_attributes(element: &str, attrs: Vec<Attribute>) -> Vec<Attribute> {
    let mut kept = Vec::with_capacity(attrs.len());
    let mut blank_target = false;

    for attr in attrs {
        let keep = match (element, attr.name.as_str()) {
            (_, "class" | "lang" | "title") => true,
            (_, "dir") => matches!(
                attr.value.trim().to_ascii_lowercase().as_str(),
                "rtl" | "ltr" | "auto"
            ),
            ("a", "href") | ("img", "src") => is_safe_url(&attr.value),
            ("a", "target") => {
                blank_target = attr.value.trim().eq_ignore_ascii_case("_blank");
                blank_target
            }
            ("img", "alt") => true,
            ("img", "width" | "height")
            | ("td" | "th", "colspan" | "rowspan")
            | ("ol", "start") => is_number(&attr.value),
            _ => false,
        };

        if keep {
            kept.push(attr);
        } else {
            debug!(element, attribute = %attr.name, "dropped attribute");
        }
    }

    if blank_target {
        for attr in kept.iter_mut().filter(|attr| attr.name == "target") {
            attr.value = "_blank".to_string();
        }
        kept.push(Attribute::new("rel", FORCED_REL));
    }
    kept
}

/// `true` for `http`, `https`, `mailto` and scheme-less references.
///
/// Whitespace and control characters are ignored and the scheme is compared
/// case-insensitively, as browsers do when resolving the URL.
pub fn is_safe_url(raw: &str) -> bool {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    if compact.is_empty() {
        return false;
    }

    match compact.find(':') {
        None => true,
        Some(colon) => {
            let scheme = &compact[..colon];
            // a ':' after the path/query/fragment starts is not a scheme
            scheme.contains(['/', '?', '#']) || SAFE_SCHEMES.contains(&scheme)
        }
    }
}

fn is_number(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.len() <= 6 && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use crate::tree::build;

    fn clean(input: &str) -> String {
        sanitize_nodes(build(tokenize(input))).to_html()
    }

    #[test]
    fn keeps_allowed_markup() {
        assert_eq!(
            clean(r#"<h2 class="t" dir="RTL">عنوان</h2><p>نص <strong>مهم</strong></p>"#),
            r#"<h2 class="t" dir="RTL">عنوان</h2><p>نص <strong>مهم</strong></p>"#
        );
    }

    #[test]
    fn drops_dangerous_elements_with_content() {
        assert_eq!(
            clean("a<script>alert(1)</script><style>p{}</style><iframe src=x>y</iframe>b"),
            "ab"
        );
        assert_eq!(clean("<form><p>inside</p></form>after"), "after");
        assert_eq!(clean("<svg><script>x</script><text>t</text></svg>"), "");
    }

    #[test]
    fn unwraps_unknown_elements() {
        assert_eq!(
            clean("<custom-card><p>kept</p></custom-card><font>f</font>"),
            "<p>kept</p>f"
        );
    }

    #[test]
    fn strips_event_handlers_and_styles() {
        assert_eq!(
            clean(r#"<p onclick="x()" style="color:red" id="i" class="c">t</p>"#),
            r#"<p class="c">t</p>"#
        );
        assert_eq!(clean(r#"<img src="a.png" onerror="alert(1)">"#), r#"<img src="a.png">"#);
    }

    #[test]
    fn rejects_script_urls() {
        assert_eq!(clean(r#"<a href="javascript:alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(clean("<a href=\"  JaVa\tScRiPt:alert(1)\">x</a>"), "<a>x</a>");
        assert_eq!(clean(r#"<a href="&#106;avascript:alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(clean(r#"<img src="data:image/svg+xml;base64,xx">"#), "");
        assert_eq!(clean(r#"<a href="vbscript:x">x</a>"#), "<a>x</a>");
    }

    #[test]
    fn accepts_safe_urls() {
        for url in [
            "https://alalfy.com/post",
            "http://a.b",
            "mailto:me@alalfy.com",
            "/relative/path",
            "#section",
            "page?time=10:30",
            "post",
        ] {
            assert!(is_safe_url(url), "{url} must be allowed");
        }
        assert!(!is_safe_url(""));
        assert!(!is_safe_url("file:///etc/passwd"));
    }

    #[test]
    fn blank_target_forces_rel() {
        assert_eq!(
            clean(r#"<a href="https://x.y" target="_BLANK" rel="opener">x</a>"#),
            r#"<a href="https://x.y" target="_blank" rel="noopener noreferrer">x</a>"#
        );
        assert_eq!(clean(r#"<a href="/x" target="_top">x</a>"#), r#"<a href="/x">x</a>"#);
    }

    #[test]
    fn numeric_attributes_must_be_numbers() {
        assert_eq!(
            clean(r#"<img src="a.png" width="100" height="x" alt="a"><ol start="3"></ol>"#),
            r#"<img src="a.png" width="100" alt="a"><ol start="3"></ol>"#
        );
        assert_eq!(
            clean(r#"<table><tr><td colspan="2" rowspan="-1">x</td></tr></table>"#),
            r#"<table><tr><td colspan="2">x</td></tr></table>"#
        );
    }

    #[test]
    fn unknown_dir_values_are_dropped() {
        assert_eq!(clean(r#"<p dir="sideways">x</p>"#), "<p>x</p>");
    }
}
