//! Block token model.
//!
//! A document is a flat sequence of [`Token`]s. Container blocks appear as an
//! open token (`nesting == 1`) and a matching close token (`nesting == -1`);
//! leaf content such as a paragraph's inline text is a single token with
//! `nesting == 0`.

/// Source line range `[start, end)`, 0-based.
pub type LineRange = (usize, usize);

/// Kind of a token.
///
/// Kinds the radio transform inspects or produces are named variants. Every
/// other block the host emits travels as [`TokenKind::Other`] and is carried
/// through verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    ParagraphOpen,
    ParagraphClose,
    /// Inline content of the enclosing block, either as raw markdown in
    /// `content` or pre-built `children`.
    Inline,
    /// Plain text child of an inline token.
    Text,
    BulletListOpen,
    BulletListClose,
    OrderedListOpen,
    OrderedListClose,
    ListItemOpen,
    ListItemClose,
    RadioOpen,
    RadioClose,
    RadioListOpen,
    RadioListClose,
    RadioButtonOpen,
    RadioButtonClose,
    RadioPanelOpen,
    RadioPanelClose,
    /// Any other host token, identified by name (`heading_open`, `fence`, ...).
    Other(String),
}

impl TokenKind {
    /// Opens an ordered or unordered list.
    #[must_use]
    pub fn is_list_open(&self) -> bool {
        matches!(self, Self::BulletListOpen | Self::OrderedListOpen)
    }

    /// Closes an ordered or unordered list.
    #[must_use]
    pub fn is_list_close(&self) -> bool {
        matches!(self, Self::BulletListClose | Self::OrderedListClose)
    }

    /// Token name as used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ParagraphOpen => "paragraph_open",
            Self::ParagraphClose => "paragraph_close",
            Self::Inline => "inline",
            Self::Text => "text",
            Self::BulletListOpen => "bullet_list_open",
            Self::BulletListClose => "bullet_list_close",
            Self::OrderedListOpen => "ordered_list_open",
            Self::OrderedListClose => "ordered_list_close",
            Self::ListItemOpen => "list_item_open",
            Self::ListItemClose => "list_item_close",
            Self::RadioOpen => "radio_open",
            Self::RadioClose => "radio_close",
            Self::RadioListOpen => "radio_list_open",
            Self::RadioListClose => "radio_list_close",
            Self::RadioButtonOpen => "radio_button_open",
            Self::RadioButtonClose => "radio_button_close",
            Self::RadioPanelOpen => "radio_panel_open",
            Self::RadioPanelClose => "radio_panel_close",
            Self::Other(name) => name,
        }
    }
}

/// A single token of the block stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// HTML tag used when rendering (`p`, `ul`, `div`, ...). Empty for
    /// tokens that render no element of their own.
    pub tag: String,
    /// `1` opens, `-1` closes, `0` is self-contained.
    pub nesting: i8,
    /// Source lines the token was parsed from, when known.
    pub map: Option<LineRange>,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Raw content: inline markdown, code, or HTML.
    pub content: String,
    /// Marker characters from the source (`-`, `*`, `.`, ...).
    pub markup: String,
    /// Fence info string (code language).
    pub info: String,
    /// Pre-built inline children; rendered instead of `content` when present.
    pub children: Vec<Token>,
    /// HTML produced from the document parse itself. Takes precedence over
    /// `children` and `content` when rendering.
    pub html: Option<String>,
    /// Block-level token (rendered on its own line).
    pub block: bool,
    /// Skip the element itself when rendering (tight list paragraphs).
    pub hidden: bool,
}

impl Token {
    /// Create a token with no content or attributes.
    #[must_use]
    pub fn new(kind: TokenKind, tag: impl Into<String>, nesting: i8) -> Self {
        Self {
            kind,
            tag: tag.into(),
            nesting,
            map: None,
            attrs: Vec::new(),
            content: String::new(),
            markup: String::new(),
            info: String::new(),
            children: Vec::new(),
            html: None,
            block: false,
            hidden: false,
        }
    }

    /// Create a block-level token.
    #[must_use]
    pub fn block(kind: TokenKind, tag: impl Into<String>, nesting: i8) -> Self {
        Self {
            block: true,
            ..Self::new(kind, tag, nesting)
        }
    }

    /// Create an inline token holding raw markdown.
    #[must_use]
    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::new(TokenKind::Inline, "", 0)
        }
    }

    /// Create a plain text token.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::new(TokenKind::Text, "", 0)
        }
    }

    /// Attach HTML rendered from the host parse.
    #[must_use]
    pub fn with_html(mut self, html: String) -> Self {
        self.html = Some(html);
        self
    }

    /// Set the source line range.
    #[must_use]
    pub fn with_map(mut self, map: Option<LineRange>) -> Self {
        self.map = map;
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr_get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn attr_set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Append to an attribute with a space separator, creating it if missing.
    pub fn attr_join(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some(slot) if !slot.1.is_empty() => {
                slot.1.push(' ');
                slot.1.push_str(value);
            }
            Some(slot) => slot.1 = value.to_owned(),
            None => self.attrs.push((name.to_owned(), value.to_owned())),
        }
    }
}
