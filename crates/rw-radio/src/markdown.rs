//! Markdown to token stream adapter.
//!
//! Drives pulldown-cmark with source offsets and folds its event stream into
//! the block [`Token`] model the radio transform works on. Inline tokens keep
//! their raw markdown for matching plus the HTML of their own inline events,
//! so links resolve against the whole document's reference definitions.

use std::iter::Peekable;
use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::token::{LineRange, Token, TokenKind};

/// Parser options used for both tokenizing and inline rendering.
///
/// GFM enables tables, strikethrough and task lists.
#[must_use]
pub fn parser_options(gfm: bool) -> Options {
    if gfm {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    } else {
        Options::empty()
    }
}

/// Tokenize markdown into a flat block token stream.
///
/// # Example
///
/// ```
/// use rw_radio::{TokenKind, parser_options, tokenize};
///
/// let tokens = tokenize("Hello *world*", parser_options(true));
/// assert_eq!(tokens[0].kind, TokenKind::ParagraphOpen);
/// assert_eq!(tokens[1].content, "Hello *world*");
/// assert_eq!(tokens[0].map, Some((0, 1)));
/// ```
#[must_use]
pub fn tokenize(markdown: &str, options: Options) -> Vec<Token> {
    Tokenizer::new(markdown).run(Parser::new_ext(markdown, options).into_offset_iter())
}

struct Tokenizer<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
    tokens: Vec<Token>,
    /// Blockquote nesting, for stripping `>` from continuation lines.
    quote_depth: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self {
            source,
            line_starts,
            tokens: Vec::new(),
            quote_depth: 0,
        }
    }

    fn run<I>(mut self, events: I) -> Vec<Token>
    where
        I: Iterator<Item = (Event<'a>, Range<usize>)>,
    {
        let mut events = events.peekable();
        while let Some((event, range)) = events.next() {
            match event {
                Event::Start(tag) if is_block_tag(&tag) => self.start(tag, range, &mut events),
                Event::End(tag) if is_block_end(tag) => self.end(tag),
                Event::Rule => {
                    let map = self.lines(&range);
                    self.push(Token::block(TokenKind::Other("hr".to_owned()), "hr", 0), map);
                }
                _ => self.implicit_paragraph(event, range, &mut events),
            }
        }
        self.tokens
    }

    fn start<I>(&mut self, tag: Tag<'a>, range: Range<usize>, events: &mut Peekable<I>)
    where
        I: Iterator<Item = (Event<'a>, Range<usize>)>,
    {
        let map = self.lines(&range);
        match tag {
            Tag::Paragraph => {
                let run = inline_run(events, |end| matches!(end, TagEnd::Paragraph));
                self.paragraph(map, run, false);
            }
            Tag::Heading {
                level, id, classes, ..
            } => {
                let tag = format!("h{}", heading_level_to_num(level));
                let mut open =
                    Token::block(TokenKind::Other("heading_open".to_owned()), &tag, 1);
                if let Some(id) = id {
                    open.attr_set("id", id.to_string());
                }
                for class in classes {
                    open.attr_join("class", &class);
                }
                let run = inline_run(events, |end| matches!(end, TagEnd::Heading(_)));
                self.push(open, map);
                let inline = self.inline_token(run);
                self.tokens.push(inline.with_map(map));
                self.tokens.push(Token::block(
                    TokenKind::Other("heading_close".to_owned()),
                    tag,
                    -1,
                ));
            }
            Tag::BlockQuote(_) => {
                self.quote_depth += 1;
                let open =
                    Token::block(TokenKind::Other("blockquote_open".to_owned()), "blockquote", 1);
                self.push(open, map);
            }
            Tag::List(Some(start)) => {
                let mut open = Token::block(TokenKind::OrderedListOpen, "ol", 1);
                if start != 1 {
                    open.attr_set("start", start.to_string());
                }
                open.markup = self.list_marker(range.start);
                self.push(open, map);
            }
            Tag::List(None) => {
                let mut open = Token::block(TokenKind::BulletListOpen, "ul", 1);
                open.markup = self.list_marker(range.start);
                self.push(open, map);
            }
            Tag::Item => {
                let mut open = Token::block(TokenKind::ListItemOpen, "li", 1);
                open.markup = self.list_marker(range.start);
                self.push(open, map);
            }
            Tag::CodeBlock(kind) => {
                let mut fence = Token::block(TokenKind::Other("fence".to_owned()), "pre", 0);
                if let CodeBlockKind::Fenced(info) = kind {
                    fence.info = info.split_whitespace().next().unwrap_or_default().to_owned();
                }
                skip_block(events, |event| {
                    if let Event::Text(text) = event {
                        fence.content.push_str(&text);
                    }
                });
                self.push(fence, map);
            }
            Tag::HtmlBlock => {
                let mut html = Token::block(TokenKind::Other("html_block".to_owned()), "", 0);
                skip_block(events, |event| {
                    if let Event::Html(text) | Event::Text(text) = event {
                        html.content.push_str(&text);
                    }
                });
                self.push(html, map);
            }
            Tag::MetadataBlock(_) => skip_block(events, |_| {}),
            other => {
                // Tables, footnote definitions, definition lists: rendered as
                // a unit from their own events.
                let end = other.to_end();
                let mut raw = Token::block(TokenKind::Other("raw_block".to_owned()), "", 0);
                raw.content = self.inline_source(range);
                let mut block = vec![Event::Start(other)];
                skip_block(events, |event| block.push(event));
                block.push(Event::End(end));
                let mut html = String::new();
                pulldown_cmark::html::push_html(&mut html, block.into_iter());
                self.push(raw.with_html(html), map);
            }
        }
    }

    fn end(&mut self, tag: TagEnd) {
        let token = match tag {
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                Token::block(TokenKind::Other("blockquote_close".to_owned()), "blockquote", -1)
            }
            TagEnd::List(true) => Token::block(TokenKind::OrderedListClose, "ol", -1),
            TagEnd::List(false) => Token::block(TokenKind::BulletListClose, "ul", -1),
            TagEnd::Item => Token::block(TokenKind::ListItemClose, "li", -1),
            _ => return,
        };
        self.tokens.push(token);
    }

    /// Inline events directly inside a list item (tight list).
    fn implicit_paragraph<I>(
        &mut self,
        first: Event<'a>,
        range: Range<usize>,
        events: &mut Peekable<I>,
    ) where
        I: Iterator<Item = (Event<'a>, Range<usize>)>,
    {
        let mut run = InlineRun::default();
        run.push(first, range);
        while let Some((event, range)) = events.next_if(|(event, _)| !is_block_event(event)) {
            run.push(event, range);
        }
        let map = run.span.as_ref().and_then(|span| self.lines(span));
        self.paragraph(map, run, true);
    }

    fn paragraph(&mut self, map: Option<LineRange>, run: InlineRun<'a>, hidden: bool) {
        let mut open = Token::block(TokenKind::ParagraphOpen, "p", 1);
        open.hidden = hidden;
        let mut close = Token::block(TokenKind::ParagraphClose, "p", -1);
        close.hidden = hidden;
        self.push(open, map);
        let inline = self.inline_token(run);
        self.tokens.push(inline.with_map(map));
        self.tokens.push(close);
    }

    fn inline_token(&self, run: InlineRun<'a>) -> Token {
        let content = run
            .span
            .clone()
            .map(|span| self.inline_source(span))
            .unwrap_or_default();
        Token::inline(content).with_html(run.into_html())
    }

    fn push(&mut self, token: Token, map: Option<LineRange>) {
        self.tokens.push(token.with_map(map));
    }

    fn line_of(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    fn lines(&self, range: &Range<usize>) -> Option<LineRange> {
        let last = range.end.saturating_sub(1).max(range.start);
        Some((self.line_of(range.start), self.line_of(last) + 1))
    }

    /// Source text of a span with continuation-line indentation and
    /// blockquote markers removed.
    fn inline_source(&self, span: Range<usize>) -> String {
        let Some(slice) = self.source.get(span) else {
            return String::new();
        };
        let mut content = String::with_capacity(slice.len());
        for (idx, line) in slice.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if idx == 0 {
                content.push_str(line);
                continue;
            }
            content.push('\n');
            let mut rest = line;
            for _ in 0..self.quote_depth {
                rest = rest.trim_start();
                rest = rest.strip_prefix('>').unwrap_or(rest);
            }
            content.push_str(rest.trim_start());
        }
        content.truncate(content.trim_end().len());
        content
    }

    /// Marker of the list item starting at `offset` (`-`, `*`, `+`, `.`, `)`).
    fn list_marker(&self, offset: usize) -> String {
        let rest = self.source.get(offset..).unwrap_or_default().trim_start();
        let marker = rest.trim_start_matches(|c: char| c.is_ascii_digit());
        marker.chars().next().map(String::from).unwrap_or_default()
    }
}

/// Inline events of one block and the source span they cover.
#[derive(Default)]
struct InlineRun<'a> {
    span: Option<Range<usize>>,
    events: Vec<Event<'a>>,
}

impl<'a> InlineRun<'a> {
    fn push(&mut self, event: Event<'a>, range: Range<usize>) {
        self.span = Some(match self.span.take() {
            Some(span) => span.start.min(range.start)..span.end.max(range.end),
            None => range,
        });
        self.events.push(event);
    }

    fn into_html(self) -> String {
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, self.events.into_iter());
        html
    }
}

/// Consume events up to the end tag matching `is_end`.
fn inline_run<'a, I>(events: &mut Peekable<I>, is_end: impl Fn(&TagEnd) -> bool) -> InlineRun<'a>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let mut run = InlineRun::default();
    for (event, range) in events.by_ref() {
        if let Event::End(end) = &event {
            if is_end(end) {
                break;
            }
        }
        run.push(event, range);
    }
    run
}

/// Consume the rest of a block whose start event was already taken.
fn skip_block<'a, I>(events: &mut Peekable<I>, mut on_event: impl FnMut(Event<'a>))
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let mut depth = 1usize;
    for (event, _) in events.by_ref() {
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            _ => {}
        }
        on_event(event);
    }
}

fn is_block_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Paragraph
            | Tag::Heading { .. }
            | Tag::BlockQuote(_)
            | Tag::CodeBlock(_)
            | Tag::HtmlBlock
            | Tag::List(_)
            | Tag::Item
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Table(_)
            | Tag::TableHead
            | Tag::TableRow
            | Tag::TableCell
            | Tag::MetadataBlock(_)
    )
}

fn is_block_end(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock
            | TagEnd::HtmlBlock
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::FootnoteDefinition
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell
            | TagEnd::MetadataBlock(_)
    )
}

fn is_block_event(event: &Event<'_>) -> bool {
    match event {
        Event::Start(tag) => is_block_tag(tag),
        Event::End(tag) => is_block_end(*tag),
        Event::Rule | Event::Html(_) => true,
        _ => false,
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
