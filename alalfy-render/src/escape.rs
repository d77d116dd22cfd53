//! Character references: decoding on the way in, escaping on the way out.

use pulldown_cmark_escape::{FmtWriter, escape_html, escape_html_body_text};

/// Escapes text content: `&`, `<`, `>`.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // writes into a String cannot fail
    let _ = escape_html_body_text(FmtWriter(&mut out), text);
    out
}

/// Escapes an attribute value: `&`, `<`, `>`, `"`, `'`.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let _ = escape_html(FmtWriter(&mut out), value);
    out
}

/// Escapes code so that no character can be read as markup:
/// `&`, `<`, `>`, `"`, `'`.
pub fn escape_code(code: &str) -> String {
    escape_attr(code)
}

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("copy", '©'),
    ("reg", '®'),
    ("trade", '™'),
    ("hellip", '…'),
    ("mdash", '—'),
    ("ndash", '–'),
    ("lsquo", '‘'),
    ("rsquo", '’'),
    ("ldquo", '“'),
    ("rdquo", '”'),
    ("laquo", '«'),
    ("raquo", '»'),
    ("times", '×'),
    ("divide", '÷'),
    ("middot", '·'),
    ("bull", '•'),
    ("euro", '€'),
    ("larr", '←'),
    ("rarr", '→'),
];

/// Decodes character references (`&amp;`, `&#60;`, `&#x3C;`, a set of
/// common named ones). Unknown or malformed references stay as written.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match decode_one(after) {
            Some((c, consumed)) => {
                out.push(c);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decodes the reference at the start of `s` (just after `&`).
/// Returns the character and the number of bytes consumed.
fn decode_one(s: &str) -> Option<(char, usize)> {
    if let Some(num) = s.strip_prefix('#') {
        let (digits, radix, prefix_len) = match num.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16, 2),
            None => (num, 10, 1),
        };
        let len = digits
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(digits.len());
        if len == 0 {
            return None;
        }
        let value = u32::from_str_radix(&digits[..len], radix).unwrap_or(u32::MAX);
        let c = char::from_u32(value)
            .filter(|c| *c != '\0')
            .unwrap_or('\u{fffd}');
        let semicolon = usize::from(digits[len..].starts_with(';'));
        return Some((c, prefix_len + len + semicolon));
    }

    let end = s.find(';')?;
    let name = &s[..end];
    NAMED
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, c)| (*c, end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_escape_covers_markup_characters_only() {
        assert_eq!(escape_text(r#"a < b && "c" > 'd'"#), r#"a &lt; b &amp;&amp; "c" &gt; 'd'"#);
    }

    #[test]
    fn attribute_escape_covers_both_quotes() {
        assert_eq!(escape_attr(r#"say "hi" & 'bye'"#), "say &quot;hi&quot; &amp; &#39;bye&#39;");
    }

    #[test]
    fn code_escape_covers_quotes() {
        assert_eq!(
            escape_code(r#"<a href="x">it's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;it&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(decode_entities("&lt;div&gt; &amp; &#65;&#x42;&#X43;"), "<div> & ABC");
        assert_eq!(decode_entities("caf&eacute"), "caf&eacute");
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("&#0;&#xD800;"), "\u{fffd}\u{fffd}");
        assert_eq!(decode_entities("&#9999999999;"), "\u{fffd}");
    }

    #[test]
    fn decoding_is_single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn handles_multibyte_text_around_references() {
        assert_eq!(decode_entities("مرحبا &amp; أهلا"), "مرحبا & أهلا");
    }
}
