//! Splitting a radio list body into options.

use crate::token::{LineRange, Token, TokenKind};

/// One selectable option: a top-level list item of the radio list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioOption {
    /// Raw name, including any custom anchor directive.
    pub name: String,
    /// Body tokens, nested lists included, in source order.
    pub tokens: Vec<Token>,
    /// Source lines of the list item.
    pub map: Option<LineRange>,
    /// List item marker (`-`, `*`, `.`, ...).
    pub markup: String,
}

impl RadioOption {
    fn from_item(item: &Token) -> Self {
        Self {
            name: String::new(),
            tokens: Vec::new(),
            map: item.map,
            markup: item.markup.clone(),
        }
    }
}

/// Result of [`extract`].
#[derive(Debug, Default)]
pub(crate) struct Extraction {
    pub(crate) options: Vec<RadioOption>,
    /// Tokens in the body that belong to no option and were dropped.
    pub(crate) stray: usize,
}

/// Split the tokens between an open and a close marker into options.
///
/// The first list in `body` is the option list. Each of its items becomes an
/// option; the item's first paragraph is the option name and everything
/// else, nested lists included, is the option body.
pub(crate) fn extract(body: &[Token]) -> Extraction {
    let mut extraction = Extraction::default();
    // `None` until the option list opens; then list depth below it.
    let mut level: Option<usize> = None;
    let mut pending: Option<RadioOption> = None;
    let mut idx = 0;

    while idx < body.len() {
        let token = &body[idx];
        match (&token.kind, level) {
            (kind, None) if kind.is_list_open() => level = Some(0),
            (_, None) => extraction.stray += 1,
            (TokenKind::ListItemOpen, Some(0)) => pending = Some(RadioOption::from_item(token)),
            (TokenKind::ListItemClose, Some(0)) => {
                if let Some(option) = pending.take() {
                    extraction.options.push(option);
                }
            }
            (kind, Some(0)) if kind.is_list_close() => {
                extraction.stray += body.len() - idx - 1;
                return extraction;
            }
            (kind, Some(depth)) if kind.is_list_open() => {
                level = Some(depth + 1);
                push(&mut pending, &mut extraction, token);
            }
            (kind, Some(depth)) if kind.is_list_close() => {
                level = Some(depth - 1);
                push(&mut pending, &mut extraction, token);
            }
            (TokenKind::ParagraphOpen, Some(_)) => {
                let name = body
                    .get(idx + 1)
                    .filter(|next| next.kind == TokenKind::Inline)
                    .map(|inline| inline.content.clone());
                match (pending.as_mut(), name) {
                    (Some(option), Some(name)) if option.name.is_empty() => {
                        option.name = name;
                        // Skip the inline and the paragraph close.
                        idx += 2;
                    }
                    _ => push(&mut pending, &mut extraction, token),
                }
            }
            (_, Some(_)) => push(&mut pending, &mut extraction, token),
        }
        idx += 1;
    }

    extraction
}

fn push(pending: &mut Option<RadioOption>, extraction: &mut Extraction, token: &Token) {
    match pending {
        Some(option) => option.tokens.push(token.clone()),
        None => extraction.stray += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paragraph(content: &str) -> Vec<Token> {
        vec![
            Token::block(TokenKind::ParagraphOpen, "p", 1),
            Token::inline(content),
            Token::block(TokenKind::ParagraphClose, "p", -1),
        ]
    }

    fn item(line: usize, parts: Vec<Vec<Token>>) -> Vec<Token> {
        let mut tokens = vec![
            Token::block(TokenKind::ListItemOpen, "li", 1).with_map(Some((line, line + 2))),
        ];
        tokens.extend(parts.into_iter().flatten());
        tokens.push(Token::block(TokenKind::ListItemClose, "li", -1));
        tokens
    }

    fn bullet_list(items: Vec<Vec<Token>>) -> Vec<Token> {
        let mut tokens = vec![Token::block(TokenKind::BulletListOpen, "ul", 1)];
        tokens.extend(items.into_iter().flatten());
        tokens.push(Token::block(TokenKind::BulletListClose, "ul", -1));
        tokens
    }

    #[test]
    fn test_extracts_names_and_bodies() {
        let body = bullet_list(vec![
            item(0, vec![paragraph("Linux"), paragraph("apt install")]),
            item(4, vec![paragraph("macOS"), paragraph("brew install")]),
        ]);

        let extraction = extract(&body);

        assert_eq!(extraction.stray, 0);
        assert_eq!(extraction.options.len(), 2);
        assert_eq!(extraction.options[0].name, "Linux");
        assert_eq!(extraction.options[0].tokens, paragraph("apt install"));
        assert_eq!(extraction.options[0].map, Some((0, 2)));
        assert_eq!(extraction.options[1].name, "macOS");
        assert_eq!(extraction.options[1].tokens, paragraph("brew install"));
    }

    #[test]
    fn test_nested_list_stays_in_body() {
        let nested = bullet_list(vec![
            item(2, vec![paragraph("one")]),
            item(3, vec![paragraph("two")]),
        ]);
        let body = bullet_list(vec![
            item(0, vec![paragraph("Outer"), nested.clone()]),
            item(5, vec![paragraph("Other")]),
        ]);

        let extraction = extract(&body);

        assert_eq!(extraction.options.len(), 2);
        assert_eq!(extraction.options[0].name, "Outer");
        assert_eq!(extraction.options[0].tokens, nested);
        assert_eq!(extraction.options[1].name, "Other");
        assert!(extraction.options[1].tokens.is_empty());
    }

    #[test]
    fn test_only_first_paragraph_is_name() {
        let body = bullet_list(vec![item(
            0,
            vec![paragraph("Name"), paragraph("Second"), paragraph("Third")],
        )]);

        let extraction = extract(&body);

        assert_eq!(extraction.options[0].name, "Name");
        assert_eq!(
            extraction.options[0].tokens,
            [paragraph("Second"), paragraph("Third")].concat()
        );
    }

    #[test]
    fn test_ordered_list() {
        let mut body = bullet_list(vec![item(0, vec![paragraph("First")])]);
        body[0].kind = TokenKind::OrderedListOpen;
        let last = body.len() - 1;
        body[last].kind = TokenKind::OrderedListClose;

        let extraction = extract(&body);

        assert_eq!(extraction.options.len(), 1);
        assert_eq!(extraction.options[0].name, "First");
    }

    #[test]
    fn test_empty_body() {
        let extraction = extract(&[]);
        assert!(extraction.options.is_empty());
        assert_eq!(extraction.stray, 0);
    }

    #[test]
    fn test_no_list_counts_stray() {
        let extraction = extract(&paragraph("just text"));
        assert!(extraction.options.is_empty());
        assert_eq!(extraction.stray, 3);
    }

    #[test]
    fn test_tokens_after_list_are_stray() {
        let mut body = bullet_list(vec![item(0, vec![paragraph("A")])]);
        body.extend(paragraph("after"));

        let extraction = extract(&body);

        assert_eq!(extraction.options.len(), 1);
        assert_eq!(extraction.stray, 3);
    }
}
