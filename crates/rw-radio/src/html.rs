//! HTML rendering of a block token stream.

use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

use crate::markdown::parser_options;
use crate::token::{Token, TokenKind};

/// Renders [`Token`] streams, including synthesized radio tokens, to HTML.
///
/// Inline tokens from [`tokenize`](crate::tokenize) carry HTML rendered from
/// the document parse and are emitted as is. Inline tokens built elsewhere
/// fall back to rendering their `content` with pulldown-cmark, as inline text
/// only.
#[derive(Clone, Debug)]
pub struct HtmlRenderer {
    options: Options,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Create a renderer with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: parser_options(true),
        }
    }

    /// Enable or disable GitHub Flavored Markdown for inline content.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.options = parser_options(enabled);
        self
    }

    /// Render tokens to an HTML string.
    #[must_use]
    pub fn render(&self, tokens: &[Token]) -> String {
        let mut out = String::with_capacity(tokens.len() * 32);
        for (idx, token) in tokens.iter().enumerate() {
            let prev = idx.checked_sub(1).and_then(|prev| tokens.get(prev));
            self.render_token(&mut out, token, prev, tokens.get(idx + 1));
        }
        out
    }

    fn render_token(
        &self,
        out: &mut String,
        token: &Token,
        prev: Option<&Token>,
        next: Option<&Token>,
    ) {
        match &token.kind {
            TokenKind::Inline => match &token.html {
                Some(html) => out.push_str(html),
                None if token.children.is_empty() => self.render_inline(out, &token.content),
                None => {
                    for child in &token.children {
                        out.push_str(&escape_html(&child.content));
                    }
                }
            },
            TokenKind::Text => out.push_str(&escape_html(&token.content)),
            TokenKind::Other(name) if name == "fence" => {
                out.push_str("<pre><code");
                if !token.info.is_empty() {
                    out.push_str(&format!(
                        r#" class="language-{}""#,
                        escape_html(&token.info)
                    ));
                }
                out.push('>');
                out.push_str(&escape_html(&token.content));
                out.push_str("</code></pre>\n");
            }
            TokenKind::Other(name) if name == "html_block" => out.push_str(&token.content),
            TokenKind::Other(name) if name == "raw_block" => match &token.html {
                Some(html) => out.push_str(html),
                None => {
                    let parser = Parser::new_ext(&token.content, self.options);
                    pulldown_cmark::html::push_html(out, parser);
                }
            },
            _ if token.hidden => {}
            _ => render_element(out, token, prev, next),
        }
    }

    fn render_inline(&self, out: &mut String, content: &str) {
        let content = escape_block_starts(content);
        let events = Parser::new_ext(&content, self.options).filter(|event| {
            !matches!(
                event,
                Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)
            )
        });
        pulldown_cmark::html::push_html(out, events);
    }
}

fn render_element(out: &mut String, token: &Token, prev: Option<&Token>, next: Option<&Token>) {
    if token.tag.is_empty() {
        return;
    }
    // A hidden paragraph leaves its text unterminated before the next block.
    if token.block && token.nesting != -1 && prev.is_some_and(|prev| prev.hidden) {
        out.push('\n');
    }
    match token.nesting {
        -1 => {
            out.push_str("</");
            out.push_str(&token.tag);
            out.push('>');
        }
        nesting => {
            out.push('<');
            out.push_str(&token.tag);
            for (name, value) in &token.attrs {
                out.push_str(&format!(r#" {name}="{}""#, escape_html(value)));
            }
            out.push_str(if nesting == 0 { " />" } else { ">" });
        }
    }
    if token.block && needs_line_feed(token, next) {
        out.push('\n');
    }
}

/// Openers followed by inline content or their own closer stay on one line.
fn needs_line_feed(token: &Token, next: Option<&Token>) -> bool {
    if token.nesting != 1 {
        return true;
    }
    match next {
        Some(next) if next.kind == TokenKind::Inline || next.hidden => false,
        Some(next) => !(next.nesting == -1 && next.tag == token.tag),
        None => true,
    }
}

/// Line prefixes that would open a block (heading, quote, list item, rule,
/// setext underline) if inline text were parsed as a document.
static BLOCK_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:#{1,6}(?:[ \t]|$)|>|[-+*](?:[ \t]|$)|\d{1,9}[.)](?:[ \t]|$)",
        r"|[-*_=][-*_= \t]*$)",
    ))
    .unwrap()
});

/// Backslash-escape block openers at the start of each line so the text
/// stays inline.
fn escape_block_starts(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len() + 4);
    for (idx, line) in content.split('\n').enumerate() {
        if idx > 0 {
            escaped.push('\n');
        }
        let line = line.trim_start_matches([' ', '\t']);
        if !BLOCK_START.is_match(line) {
            escaped.push_str(line);
            continue;
        }
        // Ordered list markers are escaped at the delimiter: `1\. Intro`.
        let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let (head, tail) = line.split_at(digits);
        escaped.push_str(head);
        escaped.push('\\');
        escaped.push_str(tail);
    }
    escaped
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
