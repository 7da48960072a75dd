//! Open and close markers of a radio list.
//!
//! ```markdown
//! {% list radio group=os %}
//!
//! - Linux
//!
//!   Install with apt.
//!
//! - macOS
//!
//!   Install with Homebrew.
//!
//! {% endlist %}
//! ```
//!
//! Both markers are standalone paragraphs. An open marker written as inline
//! code (`` `{% list radio %}` ``) is documentation text, not a marker.

use std::sync::LazyLock;

use regex::Regex;

use crate::token::{Token, TokenKind};

static OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`?\{% list radio(?: group=([^ ]*))? %\}`?").unwrap());

/// Inline content of a close marker paragraph (after trimming).
pub(crate) const CLOSE_MARKER: &str = "{% endlist %}";

/// Number of tokens a marker paragraph occupies (open, inline, close).
pub(crate) const MARKER_LEN: usize = 3;

/// A recognized open marker.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OpenMarker {
    /// Group written with `group=`, if any.
    pub(crate) group: Option<String>,
    /// The marker is wrapped in backticks and must not activate.
    pub(crate) escaped: bool,
}

/// Inline content of the marker paragraph starting at `idx`.
fn marker_content(tokens: &[Token], idx: usize) -> Option<&str> {
    let (open, inline) = (tokens.get(idx)?, tokens.get(idx + 1)?);
    (open.kind == TokenKind::ParagraphOpen && inline.kind == TokenKind::Inline)
        .then_some(inline.content.as_str())
}

/// Match an open marker at `idx`.
pub(crate) fn match_open(tokens: &[Token], idx: usize) -> Option<OpenMarker> {
    let caps = OPEN_RE.captures(marker_content(tokens, idx)?)?;
    let whole = caps.get(0)?.as_str();
    let escaped = whole.len() > 1 && whole.starts_with('`') && whole.ends_with('`');
    let group = caps
        .get(1)
        .map(|group| group.as_str())
        .filter(|group| !group.is_empty())
        .map(str::to_owned);
    Some(OpenMarker { group, escaped })
}

/// Match a close marker at `idx`.
pub(crate) fn match_close(tokens: &[Token], idx: usize) -> bool {
    marker_content(tokens, idx).is_some_and(|content| content.trim() == CLOSE_MARKER)
}

/// Find the close marker matching an open marker whose body starts at `from`.
///
/// Nested open markers each consume one close marker before the matching
/// one is accepted.
pub(crate) fn find_close(tokens: &[Token], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    for idx in from..tokens.len() {
        if match_open(tokens, idx).is_some_and(|marker| !marker.escaped) {
            depth += 1;
        } else if match_close(tokens, idx) {
            if depth == 0 {
                return Some(idx);
            }
            depth -= 1;
        }
    }
    None
}
