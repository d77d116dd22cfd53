//! HTML tokenizer.
//!
//! A character-level state machine over the states of the WHATWG tokenizer
//! that matter for article markup. Comments, doctypes and processing
//! instructions are consumed and dropped. The body of a raw-text element
//! (`<script>`, `<style>`, ...) is taken verbatim up to its end tag.
//!
//! ```text
//! <p class="a">x &amp; y</p>
//!   StartTag { name: "p", attrs: [class="a"], self_closing: false }
//!   Text("x & y")
//!   EndTag { name: "p" }
//! ```

use crate::escape::decode_entities;

/// Elements whose content is never parsed as markup.
pub(crate) const RAW_TEXT_ELEMENTS: [&str; 9] = [
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed", "noframes", "noscript",
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// A `name="value"` pair on a tag. Names are lowercase, values decoded.
pub struct Attribute {
    /// Lowercase attribute name.
    pub name: String,
    /// Value with character references decoded.
    pub value: String,
}

impl Attribute {
    /// Builds an attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Unit of tokenizer output.
pub enum Token {
    /// `<name attr=value>` or `<name/>`.
    StartTag {
        /// Lowercase tag name.
        name: String,
        /// Attributes in source order; duplicates keep the first.
        attrs: Vec<Attribute>,
        /// Written with a trailing `/`.
        self_closing: bool,
    },
    /// `</name>`.
    EndTag {
        /// Lowercase tag name.
        name: String,
    },
    /// Run of character data, references decoded.
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
    Comment,
    BogusComment,
    RawText,
}

#[derive(Debug, Default)]
struct PendingTag {
    name: String,
    attrs: Vec<Attribute>,
    self_closing: bool,
    is_end: bool,
}

/// Splits `html` into tokens. Never fails: anything that is not
/// recognizable markup ends up as text or is dropped.
pub fn tokenize(html: &str) -> Vec<Token> {
    Tokenizer::new(html).run()
}

struct Tokenizer {
    input: Vec<char>,
    pos: usize,
    state: State,
    text: String,
    tag: PendingTag,
    attr: Option<Attribute>,
    raw_end: Option<String>,
    tokens: Vec<Token>,
}

impl Tokenizer {
    fn new(html: &str) -> Self {
        Self {
            input: html.chars().collect(),
            pos: 0,
            state: State::Data,
            text: String::new(),
            tag: PendingTag::default(),
            attr: None,
            raw_end: None,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.consume() {
            match self.state {
                State::Data => {
                    if c == '<' {
                        self.state = State::TagOpen;
                    } else {
                        self.text.push(c);
                    }
                }
                State::TagOpen => {
                    if c == '/' {
                        self.state = State::EndTagOpen;
                    } else if c == '!' {
                        if self.peek(0) == Some('-') && self.peek(1) == Some('-') {
                            self.pos += 2;
                            self.open_comment();
                        } else {
                            self.state = State::BogusComment;
                        }
                    } else if c == '?' {
                        self.state = State::BogusComment;
                    } else if c.is_ascii_alphabetic() {
                        self.start_tag(false);
                        self.reconsume(State::TagName);
                    } else {
                        self.text.push('<');
                        self.reconsume(State::Data);
                    }
                }
                State::EndTagOpen => {
                    if c.is_ascii_alphabetic() {
                        self.start_tag(true);
                        self.reconsume(State::TagName);
                    } else if c == '>' {
                        self.state = State::Data;
                    } else {
                        self.reconsume(State::BogusComment);
                    }
                }
                State::TagName => match c {
                    c if is_space(c) => self.state = State::BeforeAttributeName,
                    '/' => self.state = State::SelfClosingStartTag,
                    '>' => self.emit_tag(),
                    c => self.tag.name.push(c.to_ascii_lowercase()),
                },
                State::BeforeAttributeName => match c {
                    c if is_space(c) => {}
                    '/' => self.state = State::SelfClosingStartTag,
                    '>' => self.emit_tag(),
                    _ => {
                        self.start_attribute();
                        self.reconsume(State::AttributeName);
                    }
                },
                State::AttributeName => match c {
                    c if is_space(c) => self.state = State::AfterAttributeName,
                    '/' => self.state = State::SelfClosingStartTag,
                    '>' => self.emit_tag(),
                    '=' if self.attr_name_started() => self.state = State::BeforeAttributeValue,
                    c => {
                        if let Some(attr) = self.attr.as_mut() {
                            attr.name.push(c.to_ascii_lowercase());
                        }
                    }
                },
                State::AfterAttributeName => match c {
                    c if is_space(c) => {}
                    '/' => self.state = State::SelfClosingStartTag,
                    '=' => self.state = State::BeforeAttributeValue,
                    '>' => self.emit_tag(),
                    _ => {
                        self.start_attribute();
                        self.reconsume(State::AttributeName);
                    }
                },
                State::BeforeAttributeValue => match c {
                    c if is_space(c) => {}
                    '"' => self.state = State::AttributeValueDoubleQuoted,
                    '\'' => self.state = State::AttributeValueSingleQuoted,
                    '>' => self.emit_tag(),
                    _ => self.reconsume(State::AttributeValueUnquoted),
                },
                State::AttributeValueDoubleQuoted => match c {
                    '"' => self.state = State::AfterAttributeValueQuoted,
                    c => self.push_value(c),
                },
                State::AttributeValueSingleQuoted => match c {
                    '\'' => self.state = State::AfterAttributeValueQuoted,
                    c => self.push_value(c),
                },
                State::AttributeValueUnquoted => match c {
                    c if is_space(c) => self.state = State::BeforeAttributeName,
                    '>' => self.emit_tag(),
                    c => self.push_value(c),
                },
                State::AfterAttributeValueQuoted => match c {
                    c if is_space(c) => self.state = State::BeforeAttributeName,
                    '/' => self.state = State::SelfClosingStartTag,
                    '>' => self.emit_tag(),
                    _ => self.reconsume(State::BeforeAttributeName),
                },
                State::SelfClosingStartTag => {
                    if c == '>' {
                        self.tag.self_closing = true;
                        self.emit_tag();
                    } else {
                        self.reconsume(State::BeforeAttributeName);
                    }
                }
                State::Comment => {
                    if c == '-' && self.peek(0) == Some('-') && self.peek(1) == Some('>') {
                        self.pos += 2;
                        self.state = State::Data;
                    }
                }
                State::BogusComment => {
                    if c == '>' {
                        self.state = State::Data;
                    }
                }
                State::RawText => {
                    if c == '<' && self.at_raw_end() {
                        self.flush_raw_text();
                        self.raw_end = None;
                        self.state = State::TagOpen;
                    } else {
                        self.text.push(c);
                    }
                }
            }
        }

        self.finish()
    }

    fn finish(mut self) -> Vec<Token> {
        match self.state {
            State::TagOpen => self.text.push('<'),
            State::EndTagOpen => self.text.push_str("</"),
            State::RawText => self.flush_raw_text(),
            // unterminated tags and comments are dropped
            _ => {}
        }
        self.flush_text();
        self.tokens
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.pos).copied()?;
        self.pos += 1;
        Some(c)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    /// Steps back one char so `state` sees it again. Only used after a
    /// consume, so the next iteration always makes progress in the new state.
    fn reconsume(&mut self, state: State) {
        self.pos -= 1;
        self.state = state;
    }

    /// `<!-->` and `<!--->` are complete, empty comments.
    fn open_comment(&mut self) {
        match (self.peek(0), self.peek(1)) {
            (Some('>'), _) => {
                self.pos += 1;
                self.state = State::Data;
            }
            (Some('-'), Some('>')) => {
                self.pos += 2;
                self.state = State::Data;
            }
            _ => self.state = State::Comment,
        }
    }

    fn start_tag(&mut self, is_end: bool) {
        self.tag = PendingTag {
            is_end,
            ..PendingTag::default()
        };
        self.attr = None;
    }

    fn start_attribute(&mut self) {
        self.commit_attribute();
        self.attr = Some(Attribute::new(String::new(), String::new()));
    }

    fn attr_name_started(&self) -> bool {
        self.attr.as_ref().is_some_and(|attr| !attr.name.is_empty())
    }

    fn push_value(&mut self, c: char) {
        if let Some(attr) = self.attr.as_mut() {
            attr.value.push(c);
        }
    }

    fn commit_attribute(&mut self) {
        let Some(mut attr) = self.attr.take() else {
            return;
        };
        if attr.name.is_empty() || self.tag.attrs.iter().any(|a| a.name == attr.name) {
            return;
        }
        attr.value = decode_entities(&attr.value);
        self.tag.attrs.push(attr);
    }

    fn emit_tag(&mut self) {
        self.commit_attribute();
        self.flush_text();
        let tag = std::mem::take(&mut self.tag);

        if tag.is_end {
            self.tokens.push(Token::EndTag { name: tag.name });
            self.state = State::Data;
            return;
        }

        let raw = !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str());
        if raw {
            self.raw_end = Some(tag.name.clone());
        }
        self.tokens.push(Token::StartTag {
            name: tag.name,
            attrs: tag.attrs,
            self_closing: tag.self_closing,
        });
        self.state = if raw { State::RawText } else { State::Data };
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = decode_entities(&std::mem::take(&mut self.text));
        self.push_text(text);
    }

    fn flush_raw_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        self.push_text(text);
    }

    fn push_text(&mut self, text: String) {
        if let Some(Token::Text(last)) = self.tokens.last_mut() {
            last.push_str(&text);
        } else {
            self.tokens.push(Token::Text(text));
        }
    }

    /// Called with `pos` just past a `<` inside raw text: is this the
    /// element's end tag?
    fn at_raw_end(&self) -> bool {
        let Some(name) = self.raw_end.as_deref() else {
            return false;
        };
        if self.peek(0) != Some('/') {
            return false;
        }
        let mut offset = 1;
        for expected in name.chars() {
            match self.peek(offset) {
                Some(c) if c.to_ascii_lowercase() == expected => offset += 1,
                _ => return false,
            }
        }
        match self.peek(offset) {
            None => true,
            Some(c) => is_space(c) || c == '/' || c == '>',
        }
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{c}')
}
